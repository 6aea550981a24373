// Error aggregation and anchor-id derivation for form fields

use super::field::Field;

/// A single validation failure, keyed by the anchor id templates link to.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    pub id: String,
    pub message: String,
}

/// Error reshaped for the template error summary: a `#anchor` href plus the
/// message text.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorSummary {
    pub href: String,
    pub text: String,
}

impl From<&FieldError> for ErrorSummary {
    fn from(error: &FieldError) -> Self {
        ErrorSummary {
            href: format!("#{}", error.id),
            text: error.message.clone(),
        }
    }
}

/// Convert a field name to its anchor-safe token: camelCase and snake_case
/// both become kebab-case, so `myCheckbox` and `my_checkbox` map to
/// `my-checkbox`. Must stay reproducible from the field name alone;
/// rendered templates link to these ids with `href="#id"`.
pub fn anchor_token(name: &str) -> String {
    let mut token = String::with_capacity(name.len() + 4);
    for ch in name.chars() {
        if ch.is_ascii_uppercase() {
            if !token.is_empty() && !token.ends_with('-') {
                token.push('-');
            }
            token.push(ch.to_ascii_lowercase());
        } else if ch == '_' {
            if !token.ends_with('-') {
                token.push('-');
            }
        } else {
            token.push(ch);
        }
    }
    token
}

/// Anchor id for a field's error. Checkbox and group fields point at their
/// first sub-input, hence the `-1` suffix.
pub fn error_anchor(field: &Field) -> String {
    let token = anchor_token(&field.name);
    if field.is_grouped() {
        format!("{}-1", token)
    } else {
        token
    }
}
