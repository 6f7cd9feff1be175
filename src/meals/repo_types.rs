use sqlx::{types::Json, FromRow};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::meals::dto::{MealItem, MealLog, MealLogRecord};

#[derive(Debug, FromRow)]
pub struct MealLogRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub meal_type: String,
    pub items: Json<Vec<MealItem>>,
    pub date: String,
    pub created_at: OffsetDateTime,
}

impl TryFrom<MealLogRow> for MealLogRecord {
    type Error = anyhow::Error;

    fn try_from(r: MealLogRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: r.id,
            user_id: r.user_id,
            log: MealLog {
                meal_type: r.meal_type.parse()?,
                items: r.items.0,
                date: r.date,
            },
            created_at: r.created_at,
        })
    }
}
