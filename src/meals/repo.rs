use anyhow::Context;
use sqlx::{types::Json, PgPool};
use uuid::Uuid;

use crate::meals::{
    dto::{MealLog, MealLogRecord},
    repo_types::MealLogRow,
};

pub async fn insert(db: &PgPool, user_id: Uuid, log: &MealLog) -> anyhow::Result<MealLogRecord> {
    let row = sqlx::query_as::<_, MealLogRow>(
        r#"
        INSERT INTO meal_logs (id, user_id, meal_type, items, date)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, user_id, meal_type, items, date, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(log.meal_type.as_str())
    .bind(Json(&log.items))
    .bind(&log.date)
    .fetch_one(db)
    .await
    .context("insert meal log")?;
    MealLogRecord::try_from(row)
}

pub async fn list_by_user(
    db: &PgPool,
    user_id: Uuid,
    date: Option<&str>,
    limit: i64,
    offset: i64,
) -> anyhow::Result<Vec<MealLogRecord>> {
    let rows = sqlx::query_as::<_, MealLogRow>(
        r#"
        SELECT id, user_id, meal_type, items, date, created_at
        FROM meal_logs
        WHERE user_id = $1 AND ($2::TEXT IS NULL OR date = $2)
        ORDER BY date DESC, created_at DESC
        LIMIT $3 OFFSET $4
        "#,
    )
    .bind(user_id)
    .bind(date)
    .bind(limit)
    .bind(offset)
    .fetch_all(db)
    .await
    .context("list meal logs")?;
    rows.into_iter().map(MealLogRecord::try_from).collect()
}

pub async fn list_for_date(
    db: &PgPool,
    user_id: Uuid,
    date: &str,
) -> anyhow::Result<Vec<MealLogRecord>> {
    let rows = sqlx::query_as::<_, MealLogRow>(
        r#"
        SELECT id, user_id, meal_type, items, date, created_at
        FROM meal_logs
        WHERE user_id = $1 AND date = $2
        ORDER BY created_at ASC
        "#,
    )
    .bind(user_id)
    .bind(date)
    .fetch_all(db)
    .await
    .context("list meal logs for date")?;
    rows.into_iter().map(MealLogRecord::try_from).collect()
}

pub async fn get(db: &PgPool, user_id: Uuid, id: Uuid) -> anyhow::Result<Option<MealLogRecord>> {
    let row = sqlx::query_as::<_, MealLogRow>(
        r#"
        SELECT id, user_id, meal_type, items, date, created_at
        FROM meal_logs
        WHERE id = $1 AND user_id = $2
        "#,
    )
    .bind(id)
    .bind(user_id)
    .fetch_optional(db)
    .await
    .context("get meal log")?;
    row.map(MealLogRecord::try_from).transpose()
}

/// Returns false when no meal with this id belongs to the user.
pub async fn delete(db: &PgPool, user_id: Uuid, id: Uuid) -> anyhow::Result<bool> {
    let res = sqlx::query(r#"DELETE FROM meal_logs WHERE id = $1 AND user_id = $2"#)
        .bind(id)
        .bind(user_id)
        .execute(db)
        .await
        .context("delete meal log")?;
    Ok(res.rows_affected() > 0)
}
