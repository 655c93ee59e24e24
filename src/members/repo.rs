use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

/// Family member row. `daily_calorie_goal` is recomputed only on create and
/// biometric edit; `current_daily_calories` is a cached projection of the
/// day's food entries and is re-derivable at any time.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FamilyMember {
    pub id: Uuid,
    pub user_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: Date,
    pub sex: String,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub daily_calorie_goal: i32,
    pub current_daily_calories: i64,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl FamilyMember {
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        db: &PgPool,
        user_id: Uuid,
        first_name: &str,
        last_name: &str,
        birth_date: Date,
        sex: &str,
        height_cm: f64,
        weight_kg: f64,
        daily_calorie_goal: i32,
    ) -> anyhow::Result<FamilyMember> {
        let member = sqlx::query_as::<_, FamilyMember>(
            r#"
            INSERT INTO family_members
                (user_id, first_name, last_name, birth_date, sex, height_cm, weight_kg, daily_calorie_goal)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, user_id, first_name, last_name, birth_date, sex, height_cm, weight_kg,
                      daily_calorie_goal, current_daily_calories, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(first_name)
        .bind(last_name)
        .bind(birth_date)
        .bind(sex)
        .bind(height_cm)
        .bind(weight_kg)
        .bind(daily_calorie_goal)
        .fetch_one(db)
        .await?;
        Ok(member)
    }

    pub async fn list_by_user(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<FamilyMember>> {
        let rows = sqlx::query_as::<_, FamilyMember>(
            r#"
            SELECT id, user_id, first_name, last_name, birth_date, sex, height_cm, weight_kg,
                   daily_calorie_goal, current_daily_calories, created_at, updated_at
            FROM family_members
            WHERE user_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    /// Lookup scoped by the owning account.
    pub async fn find(
        db: &PgPool,
        user_id: Uuid,
        member_id: Uuid,
    ) -> anyhow::Result<Option<FamilyMember>> {
        let member = sqlx::query_as::<_, FamilyMember>(
            r#"
            SELECT id, user_id, first_name, last_name, birth_date, sex, height_cm, weight_kg,
                   daily_calorie_goal, current_daily_calories, created_at, updated_at
            FROM family_members
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(member_id)
        .bind(user_id)
        .fetch_optional(db)
        .await?;
        Ok(member)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update_biometrics(
        db: &PgPool,
        user_id: Uuid,
        member_id: Uuid,
        birth_date: Date,
        sex: &str,
        height_cm: f64,
        weight_kg: f64,
        daily_calorie_goal: i32,
    ) -> anyhow::Result<Option<FamilyMember>> {
        let member = sqlx::query_as::<_, FamilyMember>(
            r#"
            UPDATE family_members
            SET birth_date = $3, sex = $4, height_cm = $5, weight_kg = $6,
                daily_calorie_goal = $7, updated_at = now()
            WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, first_name, last_name, birth_date, sex, height_cm, weight_kg,
                      daily_calorie_goal, current_daily_calories, created_at, updated_at
            "#,
        )
        .bind(member_id)
        .bind(user_id)
        .bind(birth_date)
        .bind(sex)
        .bind(height_cm)
        .bind(weight_kg)
        .bind(daily_calorie_goal)
        .fetch_optional(db)
        .await?;
        Ok(member)
    }

    /// Overwrite the cached daily total with a freshly computed aggregate.
    /// Last write wins; the value is always re-derivable from the entry set.
    pub async fn set_current_daily_calories(
        db: &PgPool,
        member_id: Uuid,
        total: i64,
    ) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE family_members
            SET current_daily_calories = $2, updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(member_id)
        .bind(total)
        .execute(db)
        .await?;
        Ok(())
    }
}
