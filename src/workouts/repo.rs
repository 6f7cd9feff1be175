use anyhow::Context;
use sqlx::PgPool;
use uuid::Uuid;

use super::dto::{CreateTemplateRequest, CreateWorkoutRequest, Workout, WorkoutTemplate};

pub async fn insert_workout(
    db: &PgPool,
    user_id: Uuid,
    req: &CreateWorkoutRequest,
) -> anyhow::Result<Workout> {
    sqlx::query_as::<_, Workout>(
        r#"
        INSERT INTO workouts (id, user_id, workout_template_id, sport, duration, rpe, date, notes)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING id, user_id, workout_template_id, sport, duration, rpe, date, notes, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(req.workout_template_id)
    .bind(&req.sport)
    .bind(req.duration)
    .bind(req.rpe)
    .bind(&req.date)
    .bind(&req.notes)
    .fetch_one(db)
    .await
    .context("insert workout")
}

pub async fn list_workouts(
    db: &PgPool,
    user_id: Uuid,
    limit: i64,
    offset: i64,
) -> anyhow::Result<Vec<Workout>> {
    sqlx::query_as::<_, Workout>(
        r#"
        SELECT id, user_id, workout_template_id, sport, duration, rpe, date, notes, created_at
        FROM workouts
        WHERE user_id = $1
        ORDER BY date DESC, created_at DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(user_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(db)
    .await
    .context("list workouts")
}

pub async fn delete_workout(db: &PgPool, user_id: Uuid, id: Uuid) -> anyhow::Result<bool> {
    let res = sqlx::query(r#"DELETE FROM workouts WHERE id = $1 AND user_id = $2"#)
        .bind(id)
        .bind(user_id)
        .execute(db)
        .await
        .context("delete workout")?;
    Ok(res.rows_affected() > 0)
}

pub async fn insert_template(
    db: &PgPool,
    user_id: Uuid,
    req: &CreateTemplateRequest,
) -> anyhow::Result<WorkoutTemplate> {
    sqlx::query_as::<_, WorkoutTemplate>(
        r#"
        INSERT INTO workout_templates (id, user_id, name, sport, duration, notes)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, user_id, name, sport, duration, notes, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(&req.name)
    .bind(&req.sport)
    .bind(req.duration)
    .bind(&req.notes)
    .fetch_one(db)
    .await
    .context("insert workout template")
}

pub async fn list_templates(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<WorkoutTemplate>> {
    sqlx::query_as::<_, WorkoutTemplate>(
        r#"
        SELECT id, user_id, name, sport, duration, notes, created_at
        FROM workout_templates
        WHERE user_id = $1
        ORDER BY name ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await
    .context("list workout templates")
}

/// Events referencing the template keep their (now dangling) id.
pub async fn delete_template(db: &PgPool, user_id: Uuid, id: Uuid) -> anyhow::Result<bool> {
    let res = sqlx::query(r#"DELETE FROM workout_templates WHERE id = $1 AND user_id = $2"#)
        .bind(id)
        .bind(user_id)
        .execute(db)
        .await
        .context("delete workout template")?;
    Ok(res.rows_affected() > 0)
}
