use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

use super::dto::CalendarEvent;

#[derive(Debug, FromRow)]
pub struct CalendarEventRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub workout_template_id: Option<Uuid>,
    pub title: String,
    pub starts_at: OffsetDateTime,
    pub ends_at: OffsetDateTime,
    pub status: String,
}

impl TryFrom<CalendarEventRow> for CalendarEvent {
    type Error = anyhow::Error;

    fn try_from(r: CalendarEventRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: r.id,
            user_id: r.user_id,
            workout_template_id: r.workout_template_id,
            title: r.title,
            start: r.starts_at,
            end: r.ends_at,
            status: r.status.parse()?,
        })
    }
}
