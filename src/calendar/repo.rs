use anyhow::Context;
use sqlx::PgPool;
use time::OffsetDateTime;
use uuid::Uuid;

use super::{
    dto::{CalendarEvent, CreateEventRequest, EventStatus},
    repo_types::CalendarEventRow,
};

pub async fn insert(
    db: &PgPool,
    user_id: Uuid,
    req: &CreateEventRequest,
) -> anyhow::Result<CalendarEvent> {
    let row = sqlx::query_as::<_, CalendarEventRow>(
        r#"
        INSERT INTO calendar_events (id, user_id, workout_template_id, title, starts_at, ends_at, status)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id, user_id, workout_template_id, title, starts_at, ends_at, status
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(req.workout_template_id)
    .bind(&req.title)
    .bind(req.start)
    .bind(req.end)
    .bind(req.status.as_str())
    .fetch_one(db)
    .await
    .context("insert calendar event")?;
    CalendarEvent::try_from(row)
}

/// Events overlapping `[from, to]`; an open bound is unbounded.
pub async fn list_in_range(
    db: &PgPool,
    user_id: Uuid,
    from: Option<OffsetDateTime>,
    to: Option<OffsetDateTime>,
) -> anyhow::Result<Vec<CalendarEvent>> {
    let rows = sqlx::query_as::<_, CalendarEventRow>(
        r#"
        SELECT id, user_id, workout_template_id, title, starts_at, ends_at, status
        FROM calendar_events
        WHERE user_id = $1
          AND ($2::TIMESTAMPTZ IS NULL OR ends_at >= $2)
          AND ($3::TIMESTAMPTZ IS NULL OR starts_at <= $3)
        ORDER BY starts_at ASC
        "#,
    )
    .bind(user_id)
    .bind(from)
    .bind(to)
    .fetch_all(db)
    .await
    .context("list calendar events")?;
    rows.into_iter().map(CalendarEvent::try_from).collect()
}

pub async fn update_status(
    db: &PgPool,
    user_id: Uuid,
    id: Uuid,
    status: EventStatus,
) -> anyhow::Result<Option<CalendarEvent>> {
    let row = sqlx::query_as::<_, CalendarEventRow>(
        r#"
        UPDATE calendar_events
        SET status = $3
        WHERE id = $1 AND user_id = $2
        RETURNING id, user_id, workout_template_id, title, starts_at, ends_at, status
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(status.as_str())
    .fetch_optional(db)
    .await
    .context("update calendar event status")?;
    row.map(CalendarEvent::try_from).transpose()
}

pub async fn delete(db: &PgPool, user_id: Uuid, id: Uuid) -> anyhow::Result<bool> {
    let res = sqlx::query(r#"DELETE FROM calendar_events WHERE id = $1 AND user_id = $2"#)
        .bind(id)
        .bind(user_id)
        .execute(db)
        .await
        .context("delete calendar event")?;
    Ok(res.rows_affected() > 0)
}
