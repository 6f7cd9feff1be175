use std::collections::BTreeMap;

use crate::meals::dto::{DailySummary, MealItem, MealLog, MealType, MealTypeTotals, NutritionTotals};

impl NutritionTotals {
    pub fn add_item(&mut self, item: &MealItem) {
        self.calories += item.calories;
        self.protein += item.protein;
        self.carbs += item.carbs;
        self.fat += item.fat;
    }
}

/// Totals for one day. Meal types appear in breakfast, lunch, dinner, snack
/// order and only when at least one meal of that type was logged.
pub fn daily_summary<'a>(date: &str, logs: impl IntoIterator<Item = &'a MealLog>) -> DailySummary {
    let mut totals = NutritionTotals::default();
    let mut by_type: BTreeMap<MealType, NutritionTotals> = BTreeMap::new();
    let mut meal_count = 0;

    for log in logs {
        meal_count += 1;
        let entry = by_type.entry(log.meal_type).or_default();
        for item in &log.items {
            totals.add_item(item);
            entry.add_item(item);
        }
    }

    DailySummary {
        date: date.to_string(),
        meal_count,
        totals,
        by_meal_type: by_type
            .into_iter()
            .map(|(meal_type, totals)| MealTypeTotals { meal_type, totals })
            .collect(),
    }
}
