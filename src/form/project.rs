// Template projection: reshape resolved form state for rendering

use std::collections::HashMap;

use super::errors::{ErrorSummary, FieldError};
use super::field::{Field, FieldKind};
use super::value::{FieldValue, FormValues, UploadedFile};

/// One radio option ready to render, with its checked flag resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct RadioOption {
    pub value: String,
    pub text: String,
    pub checked: bool,
}

/// One select option ready to render, with its selected flag resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectOptionView {
    pub value: String,
    pub text: String,
    pub selected: bool,
}

/// Render-ready shape of one template entry.
#[derive(Debug, Clone, PartialEq)]
pub enum TemplateValue {
    Text(String),
    Radio(Vec<RadioOption>),
    Select(Vec<SelectOptionView>),
    Group(HashMap<String, String>),
    File(UploadedFile),
    Errors(Vec<ErrorSummary>),
}

impl TemplateValue {
    pub fn as_text(&self) -> &str {
        match self {
            TemplateValue::Text(s) => s,
            _ => "",
        }
    }

    pub fn as_radio(&self) -> &[RadioOption] {
        match self {
            TemplateValue::Radio(options) => options,
            _ => &[],
        }
    }

    pub fn as_select(&self) -> &[SelectOptionView] {
        match self {
            TemplateValue::Select(options) => options,
            _ => &[],
        }
    }

    pub fn as_group(&self) -> Option<&HashMap<String, String>> {
        match self {
            TemplateValue::Group(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_errors(&self) -> &[ErrorSummary] {
        match self {
            TemplateValue::Errors(errors) => errors,
            _ => &[],
        }
    }
}

/// Project resolved state into the flat map templates consume: one entry
/// per field, the CSRF token under `csrf_token`, and the error summary
/// under `errors_key`. Pure re-projection — never re-runs extraction or
/// validation, so calling it repeatedly yields identical output.
pub fn template_values(
    fields: &[Field],
    values: &FormValues,
    errors: &[FieldError],
    csrf_token: &str,
    errors_key: &str,
) -> HashMap<String, TemplateValue> {
    let mut out = HashMap::new();

    for field in fields {
        let resolved = values.get(&field.name);
        let projected = match field.kind {
            FieldKind::Plain => TemplateValue::Text(
                resolved
                    .and_then(FieldValue::as_text)
                    .unwrap_or_default()
                    .to_string(),
            ),
            FieldKind::Radio => {
                let current = resolved.and_then(FieldValue::as_text);
                TemplateValue::Radio(
                    field
                        .options
                        .iter()
                        .map(|opt| RadioOption {
                            value: opt.value.clone(),
                            text: opt.text.clone(),
                            checked: current == Some(opt.value.as_str()),
                        })
                        .collect(),
                )
            }
            FieldKind::Select => {
                let current = resolved.and_then(FieldValue::as_text);
                TemplateValue::Select(
                    field
                        .options
                        .iter()
                        .map(|opt| SelectOptionView {
                            value: opt.value.clone(),
                            text: opt.text.clone(),
                            selected: current == Some(opt.value.as_str()),
                        })
                        .collect(),
                )
            }
            FieldKind::Checkboxes | FieldKind::Group => TemplateValue::Group(
                resolved
                    .and_then(FieldValue::as_group)
                    .cloned()
                    .unwrap_or_default(),
            ),
            FieldKind::File => match resolved.and_then(FieldValue::as_file) {
                Some(file) => TemplateValue::File(file.clone()),
                None => continue,
            },
        };
        out.insert(field.name.clone(), projected);
    }

    out.insert(
        "csrf_token".to_string(),
        TemplateValue::Text(csrf_token.to_string()),
    );
    out.insert(
        errors_key.to_string(),
        TemplateValue::Errors(errors.iter().map(ErrorSummary::from).collect()),
    );

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::field::SelectOption;

    #[test]
    fn test_radio_projection_marks_checked_option() {
        let fields = vec![Field::radio(
            "radio",
            vec![
                SelectOption::new("1", "text 1"),
                SelectOption::new("2", "text 2"),
            ],
        )];
        let mut values = FormValues::new();
        values.insert("radio".to_string(), FieldValue::text("2"));

        let out = template_values(&fields, &values, &[], "tok", "errors");

        assert_eq!(
            out.get("radio"),
            Some(&TemplateValue::Radio(vec![
                RadioOption {
                    value: "1".to_string(),
                    text: "text 1".to_string(),
                    checked: false
                },
                RadioOption {
                    value: "2".to_string(),
                    text: "text 2".to_string(),
                    checked: true
                },
            ]))
        );
    }

    #[test]
    fn test_select_projection_marks_selected_option() {
        let fields = vec![Field::select(
            "country",
            vec![
                SelectOption::new("fr", "France"),
                SelectOption::new("de", "Germany"),
            ],
        )];
        let mut values = FormValues::new();
        values.insert("country".to_string(), FieldValue::text("fr"));

        let out = template_values(&fields, &values, &[], "tok", "errors");
        let options = out.get("country").unwrap().as_select();

        assert!(options[0].selected);
        assert!(!options[1].selected);
    }

    #[test]
    fn test_errors_entry_and_csrf_token() {
        let errors = vec![FieldError {
            id: "title".to_string(),
            message: "Enter a title".to_string(),
        }];
        let out = template_values(&[], &FormValues::new(), &errors, "abc123", "errors");

        assert_eq!(out.get("csrf_token").unwrap().as_text(), "abc123");
        assert_eq!(
            out.get("errors").unwrap().as_errors(),
            &[ErrorSummary {
                href: "#title".to_string(),
                text: "Enter a title".to_string()
            }]
        );
    }

    #[test]
    fn test_custom_errors_key() {
        let out = template_values(&[], &FormValues::new(), &[], "tok", "stepErrors");
        assert!(out.contains_key("stepErrors"));
        assert!(!out.contains_key("errors"));
    }

    #[test]
    fn test_unresolved_plain_field_projects_empty_text() {
        let fields = vec![Field::plain("summary")];
        let out = template_values(&fields, &FormValues::new(), &[], "tok", "errors");
        assert_eq!(out.get("summary"), Some(&TemplateValue::Text(String::new())));
    }
}
