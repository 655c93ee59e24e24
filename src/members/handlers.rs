use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use tracing::{error, info, instrument};
use uuid::Uuid;

use crate::{
    auth::jwt::AuthUser,
    entries::{self, dto::EntryResponse, repo::FoodEntry},
    members::{
        dto::{CreateMemberRequest, MemberDetails, MemberSummary, UpdateBiometricsRequest},
        repo::FamilyMember,
        services::{display_age, goal_for_biometrics},
    },
    nutrition::daily_progress,
    state::AppState,
};

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/members", get(list_members))
        .route("/members/:id", get(get_member))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/members", post(create_member))
        .route("/members/:id", put(update_member))
}

fn internal<E: std::fmt::Display>(e: E) -> (StatusCode, String) {
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}

fn summary(member: &FamilyMember, today: time::Date) -> MemberSummary {
    MemberSummary {
        id: member.id,
        first_name: member.first_name.clone(),
        last_name: member.last_name.clone(),
        sex: member.sex.clone(),
        age: display_age(member, today),
        daily_calorie_goal: member.daily_calorie_goal,
        current_daily_calories: member.current_daily_calories,
    }
}

#[instrument(skip(state, payload))]
pub async fn create_member(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CreateMemberRequest>,
) -> Result<(StatusCode, Json<MemberSummary>), (StatusCode, String)> {
    if payload.first_name.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "First name is required".into()));
    }

    let today = entries::services::today_utc();
    let (_age, goal) = goal_for_biometrics(
        payload.birth_date,
        payload.sex,
        payload.height_cm,
        payload.weight_kg,
        today,
    )
    .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

    let member = FamilyMember::create(
        &state.db,
        user_id,
        payload.first_name.trim(),
        payload.last_name.trim(),
        payload.birth_date,
        payload.sex.as_str(),
        payload.height_cm,
        payload.weight_kg,
        goal,
    )
    .await
    .map_err(|e| {
        error!(error = %e, %user_id, "create member failed");
        internal(e)
    })?;

    info!(member_id = %member.id, %user_id, goal, "family member created");
    Ok((StatusCode::CREATED, Json(summary(&member, today))))
}

#[instrument(skip(state))]
pub async fn list_members(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<MemberSummary>>, (StatusCode, String)> {
    let today = entries::services::today_utc();
    let members = FamilyMember::list_by_user(&state.db, user_id)
        .await
        .map_err(internal)?;
    Ok(Json(members.iter().map(|m| summary(m, today)).collect()))
}

fn details(
    member: &FamilyMember,
    day_entries: Vec<FoodEntry>,
    total: i64,
    today: time::Date,
) -> MemberDetails {
    MemberDetails {
        id: member.id,
        first_name: member.first_name.clone(),
        last_name: member.last_name.clone(),
        birth_date: member.birth_date,
        sex: member.sex.clone(),
        age: display_age(member, today),
        height_cm: member.height_cm,
        weight_kg: member.weight_kg,
        daily_calorie_goal: member.daily_calorie_goal,
        current_daily_calories: total,
        progress: daily_progress(total, i64::from(member.daily_calorie_goal)),
        entries: day_entries.into_iter().map(EntryResponse::from).collect(),
    }
}

/// Detail view. Recomputes today's aggregate from the entry set and writes
/// it back before responding, so the cached total never lags a reload. The
/// entry set is fetched once and serves both the aggregate and the body.
#[instrument(skip(state))]
pub async fn get_member(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MemberDetails>, (StatusCode, String)> {
    let member = FamilyMember::find(&state.db, user_id, id)
        .await
        .map_err(internal)?
        .ok_or((StatusCode::NOT_FOUND, "Family member not found".to_string()))?;

    let (day_entries, total) = entries::services::refresh_today(&state.db, member.id)
        .await
        .map_err(internal)?;

    let today = entries::services::today_utc();
    Ok(Json(details(&member, day_entries, total, today)))
}

#[instrument(skip(state, payload))]
pub async fn update_member(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateBiometricsRequest>,
) -> Result<Json<MemberSummary>, (StatusCode, String)> {
    let today = entries::services::today_utc();
    let (_age, goal) = goal_for_biometrics(
        payload.birth_date,
        payload.sex,
        payload.height_cm,
        payload.weight_kg,
        today,
    )
    .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

    let member = FamilyMember::update_biometrics(
        &state.db,
        user_id,
        id,
        payload.birth_date,
        payload.sex.as_str(),
        payload.height_cm,
        payload.weight_kg,
        goal,
    )
    .await
    .map_err(internal)?
    .ok_or((StatusCode::NOT_FOUND, "Family member not found".to_string()))?;

    info!(member_id = %member.id, %user_id, goal, "biometrics updated, goal recomputed");
    Ok(Json(summary(&member, today)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;
    use time::OffsetDateTime;

    fn member_fixture() -> FamilyMember {
        FamilyMember {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            first_name: "Ada".into(),
            last_name: "Larsen".into(),
            birth_date: date!(1996 - 05 - 01),
            sex: "female".into(),
            height_cm: 175.0,
            weight_kg: 70.0,
            daily_calorie_goal: 1483,
            current_daily_calories: 350,
            created_at: OffsetDateTime::now_utc(),
            updated_at: OffsetDateTime::now_utc(),
        }
    }

    fn entry_fixture(member_id: Uuid, day: time::Date, calories: i32) -> FoodEntry {
        FoodEntry {
            id: Uuid::new_v4(),
            member_id,
            user_id: Uuid::new_v4(),
            food_name: "oatmeal".into(),
            calories,
            eaten_at: OffsetDateTime::now_utc(),
            entry_date: day,
            deleted: false,
            created_at: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn detail_view_total_matches_the_rendered_entry_set() {
        let member = member_fixture();
        let today = date!(2026 - 08 - 29);
        let day_entries = vec![
            entry_fixture(member.id, today, 200),
            entry_fixture(member.id, today, 150),
        ];
        let total = crate::nutrition::aggregate_day(&day_entries, member.id, today);

        let d = details(&member, day_entries, total, today);
        assert_eq!(d.current_daily_calories, 350);
        assert_eq!(d.entries.len(), 2);
        assert_eq!(
            d.entries.iter().map(|e| i64::from(e.calories)).sum::<i64>(),
            d.current_daily_calories
        );
        // 350 / 1483 rounds to 24%.
        assert_eq!(d.progress.percent, 24);
        assert!(!d.progress.goal_exceeded);
    }

    #[test]
    fn summary_carries_goal_and_cached_total() {
        let member = member_fixture();
        let s = summary(&member, date!(2026 - 08 - 29));
        assert_eq!(s.age, 30);
        assert_eq!(s.daily_calorie_goal, 1483);
        assert_eq!(s.current_daily_calories, 350);
        let json = serde_json::to_string(&s).unwrap();
        assert!(json.contains("\"sex\":\"female\""));
    }
}
