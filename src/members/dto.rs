use serde::{Deserialize, Serialize};
use time::Date;
use uuid::Uuid;

use crate::entries::dto::EntryResponse;
use crate::nutrition::{DailyProgress, Sex};

#[derive(Debug, Deserialize)]
pub struct CreateMemberRequest {
    pub first_name: String,
    pub last_name: String,
    pub birth_date: Date,
    pub sex: Sex,
    pub height_cm: f64,
    pub weight_kg: f64,
}

/// Biometric edit; the calorie goal is re-derived from these inputs,
/// it is never set directly by the client.
#[derive(Debug, Deserialize)]
pub struct UpdateBiometricsRequest {
    pub birth_date: Date,
    pub sex: Sex,
    pub height_cm: f64,
    pub weight_kg: f64,
}

#[derive(Debug, Serialize)]
pub struct MemberSummary {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub sex: String,
    pub age: u32,
    pub daily_calorie_goal: i32,
    pub current_daily_calories: i64,
}

/// Detail view: member plus the refreshed ledger for today.
#[derive(Debug, Serialize)]
pub struct MemberDetails {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: Date,
    pub sex: String,
    pub age: u32,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub daily_calorie_goal: i32,
    pub current_daily_calories: i64,
    pub progress: DailyProgress,
    pub entries: Vec<EntryResponse>,
}
