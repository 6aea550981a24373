// Reusable field predicates and the named validator sets controllers
// resolve when building field descriptors

use std::collections::HashMap;

use chrono::{Datelike, Utc};

use crate::form::{is_defined, FieldValue, FormValues, Validator};

/// Passes when the named field resolved to a non-empty value. Distinct from
/// the synthesized `required` check in that it can be attached conditionally
/// or combined with other predicates.
pub fn value_required(field: &str) -> impl Fn(&FormValues) -> bool + Send + Sync {
    let field = field.to_string();
    move |values| is_defined(values.get(&field))
}

/// Passes when the field is unset or its text value fits within `max` chars.
pub fn max_length(field: &str, max: usize) -> impl Fn(&FormValues) -> bool + Send + Sync {
    let field = field.to_string();
    move |values| match values.get(&field).and_then(FieldValue::as_text) {
        Some(text) => text.chars().count() <= max,
        None => true,
    }
}

/// Passes when the field is unset or its value is one of the allowed ids.
/// Used for metadata-backed selects and radios.
pub fn is_one_of(field: &str, allowed: Vec<String>) -> impl Fn(&FormValues) -> bool + Send + Sync {
    let field = field.to_string();
    move |values| match values.get(&field).and_then(FieldValue::as_text) {
        Some(text) if !text.is_empty() => allowed.iter().any(|a| a == text),
        _ => true,
    }
}

/// Passes when every sub-value of a checkbox field is one of the allowed
/// ids. Empty sub-values are ignored.
pub fn group_values_one_of(
    field: &str,
    allowed: Vec<String>,
) -> impl Fn(&FormValues) -> bool + Send + Sync {
    let field = field.to_string();
    move |values| match values.get(&field).and_then(FieldValue::as_group) {
        Some(map) => map
            .values()
            .filter(|v| !v.trim().is_empty())
            .all(|v| allowed.iter().any(|a| a == v)),
        None => true,
    }
}

/// Passes when a month/year group field holds a real calendar month that is
/// not in the future. Unset fields pass; pair with a required check when
/// the date must be given.
pub fn is_past_month_year(field: &str) -> impl Fn(&FormValues) -> bool + Send + Sync {
    let field = field.to_string();
    move |values| {
        let Some(group) = values.get(&field).and_then(FieldValue::as_group) else {
            return true;
        };
        if group.values().all(|v| v.trim().is_empty()) {
            return true;
        }

        let month: u32 = match group.get("month").and_then(|v| v.trim().parse().ok()) {
            Some(m) => m,
            None => return false,
        };
        let year: i32 = match group.get("year").and_then(|v| v.trim().parse().ok()) {
            Some(y) => y,
            None => return false,
        };

        if !(1..=12).contains(&month) || year < 1900 {
            return false;
        }

        let now = Utc::now();
        (year, month) <= (now.year(), now.month())
    }
}

/// The validator-resolution capability: controllers ask for a named
/// predicate set instead of reaching into a module-level singleton.
pub trait ResolveValidators {
    fn resolve(&self, name: &str) -> Option<Vec<Validator>>;
}

/// Named validator sets, built once at startup from metadata and shared via
/// `AppState`.
#[derive(Default)]
pub struct ValidatorRegistry {
    sets: HashMap<String, Vec<Validator>>,
}

impl ValidatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: impl Into<String>, validators: Vec<Validator>) {
        self.sets.insert(name.into(), validators);
    }
}

impl ResolveValidators for ValidatorRegistry {
    fn resolve(&self, name: &str) -> Option<Vec<Validator>> {
        self.sets.get(name).cloned()
    }
}
