use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct WeighIn {
    pub id: Uuid,
    pub user_id: Uuid,
    pub weight: f64, // kg
    pub date: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Deserialize)]
pub struct CreateWeighInRequest {
    pub weight: f64,
    pub date: String,
}

/// Tape measurements in cm, body fat in %. Any subset may be recorded.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Measurement {
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: String,
    pub waist: Option<f64>,
    pub chest: Option<f64>,
    pub hips: Option<f64>,
    pub arm: Option<f64>,
    pub thigh: Option<f64>,
    pub body_fat: Option<f64>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMeasurementRequest {
    pub date: String,
    #[serde(default)]
    pub waist: Option<f64>,
    #[serde(default)]
    pub chest: Option<f64>,
    #[serde(default)]
    pub hips: Option<f64>,
    #[serde(default)]
    pub arm: Option<f64>,
    #[serde(default)]
    pub thigh: Option<f64>,
    #[serde(default)]
    pub body_fat: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct RangeQuery {
    pub from: Option<String>,
    pub to: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn measurement_request_fields_are_optional() {
        let req: CreateMeasurementRequest =
            serde_json::from_value(json!({ "date": "2024-06-01", "bodyFat": 18.5 })).unwrap();
        assert_eq!(req.body_fat, Some(18.5));
        assert!(req.waist.is_none());
    }

    #[test]
    fn weigh_in_accepts_any_weight() {
        let req: CreateWeighInRequest =
            serde_json::from_value(json!({ "weight": -1, "date": "2024-06-01" })).unwrap();
        assert_eq!(req.weight, -1.0);
    }
}
