// Validation rule evaluator

use super::errors::{error_anchor, FieldError};
use super::field::Field;
use super::value::{FieldValue, FormValues};

/// Shared non-empty predicate: whitespace-only text is empty, a group needs
/// at least one non-blank sub-value, a file needs a name.
pub fn is_defined(value: Option<&FieldValue>) -> bool {
    match value {
        Some(FieldValue::Text(s)) => !s.trim().is_empty(),
        Some(FieldValue::Group(map)) => map.values().any(|v| !v.trim().is_empty()),
        Some(FieldValue::File(file)) => !file.name.is_empty(),
        None => false,
    }
}

/// Run every field's validators against the resolved values map, appending
/// one error per failing field in declared field order.
///
/// Save-and-exit submissions bypass all field validation: partial input is
/// persisted as-is. A field whose condition is unmet is skipped entirely.
/// This never fails in itself; validator panics propagate to the caller.
pub fn run(fields: &[Field], values: &FormValues, is_exit: bool, errors: &mut Vec<FieldError>) {
    if is_exit {
        return;
    }

    for field in fields {
        if let Some(condition) = &field.condition {
            if !condition.is_met(values) {
                continue;
            }
        }

        if let Some(message) = failing_message(field, values) {
            errors.push(FieldError {
                id: error_anchor(field),
                message,
            });
        }
    }
}

/// First failing validator wins; at most one error per field.
fn failing_message(field: &Field, values: &FormValues) -> Option<String> {
    if let Some(message) = &field.required {
        if !is_defined(values.get(&field.name)) {
            return Some(message.clone());
        }
    }

    for validator in &field.validators {
        if !(validator.test)(values) {
            return Some(validator.message.clone());
        }
    }

    None
}
