//! Meal item and meal log validators.
//!
//! Both take the raw JSON candidate sent by the form and either return the
//! typed value or every field-scoped violation found. A record is accepted
//! whole or rejected whole.

use serde_json::Value;

use crate::meals::dto::{MealItem, MealLog, MealType};
use crate::validation::{self, join, ValidationErrors};

pub const QUANTITY_NOT_POSITIVE: &str = "La quantité doit être supérieure à 0";
pub const NO_ITEMS: &str = "Ajoutez au moins un aliment";
pub const INGREDIENT_ID_EMPTY: &str = "L'identifiant de l'ingrédient est requis";
pub const INGREDIENT_NAME_EMPTY: &str = "Le nom de l'aliment est requis";
pub const DATE_EMPTY: &str = "La date est requise";
pub const INVALID_MEAL_TYPE: &str = "Type de repas invalide";

pub fn validate_meal_item(candidate: &Value) -> Result<MealItem, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let item = check_meal_item(candidate, "", &mut errors);
    errors.finish(item)
}

pub fn validate_meal_log(candidate: &Value) -> Result<MealLog, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let log = check_meal_log(candidate, &mut errors);
    errors.finish(log)
}

fn check_meal_item(candidate: &Value, path: &str, errors: &mut ValidationErrors) -> Option<MealItem> {
    let obj = validation::object(candidate, path, errors)?;

    let ingredient_id = validation::non_empty_string(
        obj.get("ingredientId"),
        &join(path, "ingredientId"),
        INGREDIENT_ID_EMPTY,
        errors,
    );
    let ingredient_name = validation::non_empty_string(
        obj.get("ingredientName"),
        &join(path, "ingredientName"),
        INGREDIENT_NAME_EMPTY,
        errors,
    );
    let quantity = validation::positive_number(
        obj.get("quantity"),
        &join(path, "quantity"),
        QUANTITY_NOT_POSITIVE,
        errors,
    );
    let calories = validation::number(obj.get("calories"), &join(path, "calories"), errors);
    let protein = validation::number(obj.get("protein"), &join(path, "protein"), errors);
    let carbs = validation::number(obj.get("carbs"), &join(path, "carbs"), errors);
    let fat = validation::number(obj.get("fat"), &join(path, "fat"), errors);

    Some(MealItem {
        ingredient_id: ingredient_id?,
        ingredient_name: ingredient_name?,
        quantity: quantity?,
        calories: calories?,
        protein: protein?,
        carbs: carbs?,
        fat: fat?,
    })
}

fn check_meal_log(candidate: &Value, errors: &mut ValidationErrors) -> Option<MealLog> {
    let obj = validation::object(candidate, "", errors)?;

    let meal_type =
        validation::one_of::<MealType>(obj.get("mealType"), "mealType", INVALID_MEAL_TYPE, errors);

    let items = validation::list(obj.get("items"), "items", errors).and_then(|raw| {
        if raw.is_empty() {
            errors.push("items", NO_ITEMS);
            return None;
        }
        // Every item is checked even after one fails.
        let checked: Vec<Option<MealItem>> = raw
            .iter()
            .enumerate()
            .map(|(i, item)| check_meal_item(item, &format!("items.{}", i), errors))
            .collect();
        checked.into_iter().collect::<Option<Vec<_>>>()
    });

    let date = validation::non_empty_string(obj.get("date"), "date", DATE_EMPTY, errors);

    Some(MealLog {
        meal_type: meal_type?,
        items: items?,
        date: date?,
    })
}
