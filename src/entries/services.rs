use sqlx::PgPool;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::entries::repo::FoodEntry;
use crate::members::repo::FamilyMember;
use crate::nutrition::aggregate_day;

pub fn today_utc() -> Date {
    OffsetDateTime::now_utc().date()
}

/// Total for one member and one calendar day, recomputed from the persisted
/// entry set.
pub async fn day_total(db: &PgPool, member_id: Uuid, day: Date) -> anyhow::Result<i64> {
    let entries = FoodEntry::list_for_day(db, member_id, day).await?;
    Ok(aggregate_day(&entries, member_id, day))
}

/// Recompute the aggregate for (member, day) and refresh the member's cached
/// `current_daily_calories` when the day is the current UTC date. The cache
/// is only written after a successful read, so a failed query can never
/// replace a valid total with incomplete data. Past days are summed without
/// touching the cache.
pub async fn refresh_daily_total(db: &PgPool, member_id: Uuid, day: Date) -> anyhow::Result<i64> {
    let total = day_total(db, member_id, day).await?;
    if day == today_utc() {
        FamilyMember::set_current_daily_calories(db, member_id, total).await?;
    }
    Ok(total)
}

/// Same refresh for the detail view, which also renders the entries: one
/// fetch serves both the aggregate and the response body.
pub async fn refresh_today(
    db: &PgPool,
    member_id: Uuid,
) -> anyhow::Result<(Vec<FoodEntry>, i64)> {
    let day = today_utc();
    let entries = FoodEntry::list_for_day(db, member_id, day).await?;
    let total = aggregate_day(&entries, member_id, day);
    FamilyMember::set_current_daily_calories(db, member_id, total).await?;
    Ok((entries, total))
}
