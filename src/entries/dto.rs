use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::entries::repo::FoodEntry;

#[derive(Debug, Deserialize)]
pub struct CreateEntryRequest {
    pub food_name: String,
    pub calories: i32,
}

#[derive(Debug, Deserialize)]
pub struct DayQuery {
    pub date: Option<Date>,
}

#[derive(Debug, Serialize)]
pub struct EntryResponse {
    pub id: Uuid,
    pub food_name: String,
    pub calories: i32,
    pub eaten_at: OffsetDateTime,
    pub entry_date: Date,
}

impl From<FoodEntry> for EntryResponse {
    fn from(e: FoodEntry) -> Self {
        Self {
            id: e.id,
            food_name: e.food_name,
            calories: e.calories,
            eaten_at: e.eaten_at,
            entry_date: e.entry_date,
        }
    }
}

/// Returned by add/delete so the client can repaint the progress bar
/// without a second round trip.
#[derive(Debug, Serialize)]
pub struct LedgerResponse {
    pub entry: Option<EntryResponse>,
    pub entry_date: Date,
    pub daily_total: i64,
}
