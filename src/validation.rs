//! Field-level constraint checks over untyped JSON candidates.
//!
//! Checks never stop at the first failure: each one records its violation in a
//! shared [`ValidationErrors`] and hands back `None`, so a caller can run every
//! check of a record and report all of a user's mistakes at once.

use serde::Serialize;
use serde_json::{Map, Value};

pub const REQUIRED: &str = "Champ requis";
pub const EXPECTED_STRING: &str = "Doit être une chaîne de caractères";
pub const EXPECTED_NUMBER: &str = "Doit être un nombre";
pub const EXPECTED_OBJECT: &str = "Doit être un objet";
pub const EXPECTED_LIST: &str = "Doit être une liste";

/// One violated constraint, addressed by a dot-joined path (`items.0.quantity`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub path: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(transparent)]
#[error("{} field constraint(s) violated", .0.len())]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.0.push(FieldError {
            path: path.into(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[cfg(test)]
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    pub fn first(&self) -> Option<&FieldError> {
        self.0.first()
    }

    /// Messages recorded for one exact path.
    #[cfg(test)]
    pub fn messages_for<'a>(&'a self, path: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.0
            .iter()
            .filter(move |e| e.path == path)
            .map(|e| e.message.as_str())
    }

    /// Closes a validation run. The value is accepted only when nothing was
    /// recorded; any recorded violation rejects the whole record.
    pub fn finish<T>(self, value: Option<T>) -> Result<T, ValidationErrors> {
        match value {
            Some(v) if self.is_empty() => Ok(v),
            _ => Err(self),
        }
    }
}

pub fn join(prefix: &str, field: &str) -> String {
    if prefix.is_empty() {
        field.to_string()
    } else {
        format!("{}.{}", prefix, field)
    }
}

pub fn object<'a>(
    value: &'a Value,
    path: &str,
    errors: &mut ValidationErrors,
) -> Option<&'a Map<String, Value>> {
    match value.as_object() {
        Some(map) => Some(map),
        None => {
            errors.push(path, EXPECTED_OBJECT);
            None
        }
    }
}

/// A string that must contain at least one character. `empty_message` is the
/// user-facing text for the blank case.
pub fn non_empty_string(
    value: Option<&Value>,
    path: &str,
    empty_message: &str,
    errors: &mut ValidationErrors,
) -> Option<String> {
    match value {
        None | Some(Value::Null) => {
            errors.push(path, REQUIRED);
            None
        }
        Some(Value::String(s)) if s.is_empty() => {
            errors.push(path, empty_message);
            None
        }
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            errors.push(path, EXPECTED_STRING);
            None
        }
    }
}

/// Any JSON number, sign and magnitude unchecked.
pub fn number(value: Option<&Value>, path: &str, errors: &mut ValidationErrors) -> Option<f64> {
    match value {
        None | Some(Value::Null) => {
            errors.push(path, REQUIRED);
            None
        }
        Some(Value::Number(n)) => match n.as_f64() {
            Some(f) => Some(f),
            None => {
                errors.push(path, EXPECTED_NUMBER);
                None
            }
        },
        Some(_) => {
            errors.push(path, EXPECTED_NUMBER);
            None
        }
    }
}

pub fn positive_number(
    value: Option<&Value>,
    path: &str,
    not_positive_message: &str,
    errors: &mut ValidationErrors,
) -> Option<f64> {
    let n = number(value, path, errors)?;
    if n > 0.0 {
        Some(n)
    } else {
        errors.push(path, not_positive_message);
        None
    }
}

/// A string that must parse into one member of a fixed enumeration.
pub fn one_of<T: std::str::FromStr>(
    value: Option<&Value>,
    path: &str,
    invalid_message: &str,
    errors: &mut ValidationErrors,
) -> Option<T> {
    match value {
        None | Some(Value::Null) => {
            errors.push(path, REQUIRED);
            None
        }
        Some(Value::String(s)) => match s.parse::<T>() {
            Ok(v) => Some(v),
            Err(_) => {
                errors.push(path, invalid_message);
                None
            }
        },
        Some(_) => {
            errors.push(path, invalid_message);
            None
        }
    }
}

pub fn list<'a>(
    value: Option<&'a Value>,
    path: &str,
    errors: &mut ValidationErrors,
) -> Option<&'a Vec<Value>> {
    match value {
        None | Some(Value::Null) => {
            errors.push(path, REQUIRED);
            None
        }
        Some(Value::Array(items)) => Some(items),
        Some(_) => {
            errors.push(path, EXPECTED_LIST);
            None
        }
    }
}
