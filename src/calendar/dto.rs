use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    #[default]
    Planned,
    Done,
    Skipped,
}

impl EventStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            EventStatus::Planned => "planned",
            EventStatus::Done => "done",
            EventStatus::Skipped => "skipped",
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "planned" => Ok(EventStatus::Planned),
            "done" => Ok(EventStatus::Done),
            "skipped" => Ok(EventStatus::Skipped),
            other => anyhow::bail!("unknown event status {:?}", other),
        }
    }
}

/// A scheduled or completed activity. `workout_template_id` is a plain
/// reference: the template may since have been deleted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: Uuid,
    pub user_id: Uuid,
    pub workout_template_id: Option<Uuid>,
    pub title: String,
    #[serde(with = "time::serde::rfc3339")]
    pub start: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub end: OffsetDateTime,
    pub status: EventStatus,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    pub title: String,
    #[serde(default)]
    pub workout_template_id: Option<Uuid>,
    #[serde(with = "time::serde::rfc3339")]
    pub start: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub end: OffsetDateTime,
    #[serde(default)]
    pub status: EventStatus,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: EventStatus,
}

/// `?from=&to=` bounds as RFC 3339. Query strings are form-decoded, so a
/// `+02:00` offset must be sent as `%2B02:00`; `Z` needs no escaping.
#[derive(Debug, Deserialize)]
pub struct EventRangeQuery {
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub from: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub to: Option<OffsetDateTime>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn status_parses_only_the_fixed_set() {
        for s in ["planned", "done", "skipped"] {
            assert_eq!(s.parse::<EventStatus>().unwrap().as_str(), s);
        }
        assert!("cancelled".parse::<EventStatus>().is_err());
        assert!(serde_json::from_value::<UpdateStatusRequest>(json!({ "status": "Done" })).is_err());
    }

    #[test]
    fn create_request_defaults_to_planned() {
        let req: CreateEventRequest = serde_json::from_value(json!({
            "title": "Long run",
            "start": "2024-06-01T08:00:00Z",
            "end": "2024-06-01T11:30:00+02:00"
        }))
        .unwrap();
        assert_eq!(req.status, EventStatus::Planned);
        assert!(req.workout_template_id.is_none());
        assert_eq!(req.end - req.start, time::Duration::minutes(90));
    }

    fn range(query: &str) -> Result<EventRangeQuery, axum::extract::rejection::QueryRejection> {
        let uri: axum::http::Uri = format!("/calendar/events?{}", query).parse().unwrap();
        axum::extract::Query::<EventRangeQuery>::try_from_uri(&uri).map(|q| q.0)
    }

    #[test]
    fn range_query_reads_utc_and_encoded_offsets() {
        let q = range("from=2024-06-01T08:00:00Z&to=2024-06-01T10:00:00%2B02:00").unwrap();
        assert_eq!(q.from, Some(time::macros::datetime!(2024-06-01 08:00 UTC)));
        assert_eq!(q.to, Some(time::macros::datetime!(2024-06-01 08:00 UTC)));

        let q = range("").unwrap();
        assert!(q.from.is_none() && q.to.is_none());
    }

    #[test]
    fn unescaped_plus_in_range_query_is_rejected() {
        assert!(range("from=2024-06-01T10:00:00+02:00").is_err());
    }

    #[test]
    fn event_serializes_start_and_end() {
        let event = CalendarEvent {
            id: Uuid::nil(),
            user_id: Uuid::nil(),
            workout_template_id: Some(Uuid::nil()),
            title: "Swim".into(),
            start: time::macros::datetime!(2024-06-01 08:00 UTC),
            end: time::macros::datetime!(2024-06-01 09:00 UTC),
            status: EventStatus::Done,
        };
        let v = serde_json::to_value(&event).unwrap();
        assert_eq!(v["start"], "2024-06-01T08:00:00Z");
        assert_eq!(v["status"], "done");
        assert_eq!(v["workoutTemplateId"], json!(Uuid::nil()));
    }
}
