use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    #[cfg(test)]
    pub const ALL: [MealType; 4] = [
        MealType::Breakfast,
        MealType::Lunch,
        MealType::Dinner,
        MealType::Snack,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
            MealType::Snack => "snack",
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MealType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "breakfast" => Ok(MealType::Breakfast),
            "lunch" => Ok(MealType::Lunch),
            "dinner" => Ok(MealType::Dinner),
            "snack" => Ok(MealType::Snack),
            other => anyhow::bail!("unknown meal type {:?}", other),
        }
    }
}

/// One ingredient line of a meal. Nutrient values are for the logged quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealItem {
    pub ingredient_id: String,
    pub ingredient_name: String,
    pub quantity: f64,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

/// A validated meal, as produced by [`crate::meals::schema::validate_meal_log`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealLog {
    pub meal_type: MealType,
    pub items: Vec<MealItem>,
    pub date: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MealLogRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(flatten)]
    pub log: MealLog,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct NutritionTotals {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MealTypeTotals {
    pub meal_type: MealType,
    #[serde(flatten)]
    pub totals: NutritionTotals,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySummary {
    pub date: String,
    pub meal_count: usize,
    pub totals: NutritionTotals,
    pub by_meal_type: Vec<MealTypeTotals>,
}

#[derive(Debug, Deserialize)]
pub struct MealListQuery {
    pub date: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    pub date: String,
}

const MAX_LIMIT: i64 = 100;

impl MealListQuery {
    /// `(limit, offset)` safe to hand to `LIMIT`/`OFFSET`.
    pub fn bounded(&self) -> (i64, i64) {
        (self.limit.clamp(1, MAX_LIMIT), self.offset.max(0))
    }
}

fn default_limit() -> i64 {
    50
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn list_query_defaults_and_clamps() {
        let q: MealListQuery = serde_json::from_value(json!({})).unwrap();
        assert_eq!(q.bounded(), (50, 0));

        let q: MealListQuery =
            serde_json::from_value(json!({ "limit": -1, "offset": -10 })).unwrap();
        assert_eq!(q.bounded(), (1, 0));

        let q: MealListQuery =
            serde_json::from_value(json!({ "date": "2024-06-01", "limit": 100_000_000 })).unwrap();
        assert_eq!(q.bounded(), (100, 0));
    }

    #[test]
    fn meal_type_round_trips_through_its_name() {
        for meal_type in MealType::ALL {
            assert_eq!(meal_type.as_str().parse::<MealType>().unwrap(), meal_type);
        }
        assert!("brunch".parse::<MealType>().is_err());
    }
}
