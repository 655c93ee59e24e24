use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

/// Food log entry. `entry_date` is the calendar partition key for the daily
/// ledger; `deleted` is a soft-delete flag, rows are never removed and the
/// only transition after creation is `deleted = true`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FoodEntry {
    pub id: Uuid,
    pub member_id: Uuid,
    pub user_id: Uuid,
    pub food_name: String,
    pub calories: i32,
    pub eaten_at: OffsetDateTime,
    pub entry_date: Date,
    pub deleted: bool,
    pub created_at: OffsetDateTime,
}

impl FoodEntry {
    pub async fn create(
        db: &PgPool,
        member_id: Uuid,
        user_id: Uuid,
        food_name: &str,
        calories: i32,
        eaten_at: OffsetDateTime,
        entry_date: Date,
    ) -> anyhow::Result<FoodEntry> {
        let entry = sqlx::query_as::<_, FoodEntry>(
            r#"
            INSERT INTO food_entries (member_id, user_id, food_name, calories, eaten_at, entry_date)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, member_id, user_id, food_name, calories, eaten_at, entry_date, deleted, created_at
            "#,
        )
        .bind(member_id)
        .bind(user_id)
        .bind(food_name)
        .bind(calories)
        .bind(eaten_at)
        .bind(entry_date)
        .fetch_one(db)
        .await?;
        Ok(entry)
    }

    /// Non-deleted entries for one member and one calendar day, newest first.
    pub async fn list_for_day(
        db: &PgPool,
        member_id: Uuid,
        day: Date,
    ) -> anyhow::Result<Vec<FoodEntry>> {
        let rows = sqlx::query_as::<_, FoodEntry>(
            r#"
            SELECT id, member_id, user_id, food_name, calories, eaten_at, entry_date, deleted, created_at
            FROM food_entries
            WHERE member_id = $1 AND entry_date = $2 AND deleted = FALSE
            ORDER BY eaten_at DESC
            "#,
        )
        .bind(member_id)
        .bind(day)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn find(
        db: &PgPool,
        member_id: Uuid,
        entry_id: Uuid,
    ) -> anyhow::Result<Option<FoodEntry>> {
        let entry = sqlx::query_as::<_, FoodEntry>(
            r#"
            SELECT id, member_id, user_id, food_name, calories, eaten_at, entry_date, deleted, created_at
            FROM food_entries
            WHERE id = $1 AND member_id = $2
            "#,
        )
        .bind(entry_id)
        .bind(member_id)
        .fetch_optional(db)
        .await?;
        Ok(entry)
    }

    /// Soft delete: the row is retained, only the flag flips.
    pub async fn soft_delete(db: &PgPool, entry_id: Uuid) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE food_entries
            SET deleted = TRUE
            WHERE id = $1
            "#,
        )
        .bind(entry_id)
        .execute(db)
        .await?;
        Ok(())
    }
}
