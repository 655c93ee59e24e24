use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use time::OffsetDateTime;
use tracing::{error, info, instrument};
use uuid::Uuid;

use crate::{
    auth::jwt::AuthUser,
    entries::{
        dto::{CreateEntryRequest, DayQuery, EntryResponse, LedgerResponse},
        repo::FoodEntry,
        services::{refresh_daily_total, today_utc},
    },
    members::repo::FamilyMember,
    state::AppState,
};

pub fn read_routes() -> Router<AppState> {
    Router::new().route("/members/:id/entries", get(list_entries))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/members/:id/entries", post(create_entry))
        .route("/members/:id/entries/:entry_id", delete(delete_entry))
}

fn internal<E: std::fmt::Display>(e: E) -> (StatusCode, String) {
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}

async fn owned_member(
    state: &AppState,
    user_id: Uuid,
    member_id: Uuid,
) -> Result<FamilyMember, (StatusCode, String)> {
    FamilyMember::find(&state.db, user_id, member_id)
        .await
        .map_err(internal)?
        .ok_or((StatusCode::NOT_FOUND, "Family member not found".to_string()))
}

#[instrument(skip(state, payload))]
pub async fn create_entry(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(member_id): Path<Uuid>,
    Json(payload): Json<CreateEntryRequest>,
) -> Result<(StatusCode, Json<LedgerResponse>), (StatusCode, String)> {
    if payload.food_name.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Food name is required".into()));
    }
    if payload.calories <= 0 {
        return Err((
            StatusCode::BAD_REQUEST,
            "Calories must be a positive number".into(),
        ));
    }

    let member = owned_member(&state, user_id, member_id).await?;

    let now = OffsetDateTime::now_utc();
    let entry = FoodEntry::create(
        &state.db,
        member.id,
        user_id,
        payload.food_name.trim(),
        payload.calories,
        now,
        now.date(),
    )
    .await
    .map_err(|e| {
        error!(error = %e, member_id = %member.id, "create entry failed");
        internal(e)
    })?;

    let daily_total = refresh_daily_total(&state.db, member.id, entry.entry_date)
        .await
        .map_err(internal)?;

    info!(entry_id = %entry.id, member_id = %member.id, daily_total, "calorie entry added");
    Ok((
        StatusCode::CREATED,
        Json(LedgerResponse {
            entry_date: entry.entry_date,
            entry: Some(EntryResponse::from(entry)),
            daily_total,
        }),
    ))
}

#[instrument(skip(state))]
pub async fn delete_entry(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path((member_id, entry_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<LedgerResponse>, (StatusCode, String)> {
    let member = owned_member(&state, user_id, member_id).await?;

    let entry = FoodEntry::find(&state.db, member.id, entry_id)
        .await
        .map_err(internal)?
        .ok_or((StatusCode::NOT_FOUND, "Entry not found".to_string()))?;

    FoodEntry::soft_delete(&state.db, entry.id)
        .await
        .map_err(internal)?;

    let daily_total = refresh_daily_total(&state.db, member.id, entry.entry_date)
        .await
        .map_err(internal)?;

    info!(entry_id = %entry.id, member_id = %member.id, daily_total, "calorie entry soft-deleted");
    Ok(Json(LedgerResponse {
        entry: None,
        entry_date: entry.entry_date,
        daily_total,
    }))
}

#[instrument(skip(state))]
pub async fn list_entries(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(member_id): Path<Uuid>,
    Query(q): Query<DayQuery>,
) -> Result<Json<Vec<EntryResponse>>, (StatusCode, String)> {
    let member = owned_member(&state, user_id, member_id).await?;
    let day = q.date.unwrap_or_else(today_utc);

    let entries = FoodEntry::list_for_day(&state.db, member.id, day)
        .await
        .map_err(internal)?;
    Ok(Json(entries.into_iter().map(EntryResponse::from).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn ledger_response_reports_total_for_the_day() {
        let resp = LedgerResponse {
            entry: None,
            entry_date: date!(2026 - 08 - 29),
            daily_total: 350,
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"daily_total\":350"));
        assert!(json.contains("2026-08-29"));
    }
}
