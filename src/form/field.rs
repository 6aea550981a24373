// Field descriptors: declarative configuration for one form input

use std::sync::Arc;

use super::value::{FieldValue, FormValues};

/// How a field's raw submission is read and how it re-renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Plain,
    Checkboxes,
    Radio,
    Select,
    Group,
    File,
}

/// One option of a radio or select field.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectOption {
    pub value: String,
    pub text: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, text: impl Into<String>) -> Self {
        SelectOption {
            value: value.into(),
            text: text.into(),
        }
    }
}

pub type ValidatorFn = Arc<dyn Fn(&FormValues) -> bool + Send + Sync>;

/// A predicate over the full resolved values map plus the message shown
/// when it fails. The first failing validator wins for a field.
#[derive(Clone)]
pub struct Validator {
    pub test: ValidatorFn,
    pub message: String,
}

impl Validator {
    pub fn new<F>(test: F, message: impl Into<String>) -> Self
    where
        F: Fn(&FormValues) -> bool + Send + Sync + 'static,
    {
        Validator {
            test: Arc::new(test),
            message: message.into(),
        }
    }
}

impl std::fmt::Debug for Validator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Validator")
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

/// Gate on a sibling field's resolved value. The field is only validated
/// when the condition holds.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Equals { name: String, value: String },
    AnyOf { name: String, values: Vec<String> },
}

impl Condition {
    pub fn equals(name: impl Into<String>, value: impl Into<String>) -> Self {
        Condition::Equals {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn any_of(name: impl Into<String>, values: Vec<String>) -> Self {
        Condition::AnyOf {
            name: name.into(),
            values,
        }
    }

    /// Evaluated against resolved sibling values, never the raw body.
    pub fn is_met(&self, values: &FormValues) -> bool {
        let name = match self {
            Condition::Equals { name, .. } | Condition::AnyOf { name, .. } => name,
        };
        let Some(current) = values.get(name.as_str()).and_then(FieldValue::as_text) else {
            return false;
        };

        match self {
            Condition::Equals { value, .. } => current == value,
            Condition::AnyOf { values, .. } => values.iter().any(|v| v == current),
        }
    }
}

pub type Sanitizer = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Declarative configuration for one form field. Built once per request by
/// the controller, then handed to `Form::new` as part of an ordered list.
#[derive(Clone)]
pub struct Field {
    pub name: String,
    pub kind: FieldKind,
    /// Prior values in priority order (session value, persisted value, ...).
    /// The first present one wins on a GET.
    pub candidates: Vec<FieldValue>,
    /// Human-readable message; presence implies a synthesized
    /// "must be non-empty" validator ahead of any explicit ones.
    pub required: Option<String>,
    pub validators: Vec<Validator>,
    pub condition: Option<Condition>,
    /// Options for radio/select fields.
    pub options: Vec<SelectOption>,
    /// Named sub-inputs for checkboxes/group fields, in display order.
    pub sub_items: Vec<String>,
    pub sanitize: Option<Sanitizer>,
    /// Alias under which external systems (e.g. a backend 400 response)
    /// report errors against this field.
    pub error_field: Option<String>,
}

impl Field {
    fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Field {
            name: name.into(),
            kind,
            candidates: Vec::new(),
            required: None,
            validators: Vec::new(),
            condition: None,
            options: Vec::new(),
            sub_items: Vec::new(),
            sanitize: None,
            error_field: None,
        }
    }

    pub fn plain(name: impl Into<String>) -> Self {
        Field::new(name, FieldKind::Plain)
    }

    pub fn radio(name: impl Into<String>, options: Vec<SelectOption>) -> Self {
        let mut field = Field::new(name, FieldKind::Radio);
        field.options = options;
        field
    }

    pub fn select(name: impl Into<String>, options: Vec<SelectOption>) -> Self {
        let mut field = Field::new(name, FieldKind::Select);
        field.options = options;
        field
    }

    pub fn checkboxes(name: impl Into<String>, sub_items: Vec<String>) -> Self {
        let mut field = Field::new(name, FieldKind::Checkboxes);
        field.sub_items = sub_items;
        field
    }

    pub fn group(name: impl Into<String>, sub_items: Vec<String>) -> Self {
        let mut field = Field::new(name, FieldKind::Group);
        field.sub_items = sub_items;
        field
    }

    pub fn file(name: impl Into<String>) -> Self {
        Field::new(name, FieldKind::File)
    }

    pub fn required(mut self, message: impl Into<String>) -> Self {
        self.required = Some(message.into());
        self
    }

    pub fn candidate(mut self, value: FieldValue) -> Self {
        self.candidates.push(value);
        self
    }

    /// Convenience for optional prior values: `None` entries are skipped.
    pub fn maybe_candidate(mut self, value: Option<FieldValue>) -> Self {
        if let Some(value) = value {
            self.candidates.push(value);
        }
        self
    }

    pub fn validator(mut self, validator: Validator) -> Self {
        self.validators.push(validator);
        self
    }

    pub fn validators(mut self, validators: Vec<Validator>) -> Self {
        self.validators.extend(validators);
        self
    }

    pub fn condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    pub fn sanitize<F>(mut self, sanitizer: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.sanitize = Some(Arc::new(sanitizer));
        self
    }

    pub fn error_field(mut self, alias: impl Into<String>) -> Self {
        self.error_field = Some(alias.into());
        self
    }

    /// Whether this field resolves to a nested map of sub-values.
    pub fn is_grouped(&self) -> bool {
        matches!(self.kind, FieldKind::Checkboxes | FieldKind::Group)
    }
}

impl std::fmt::Debug for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("required", &self.required)
            .field("condition", &self.condition)
            .finish_non_exhaustive()
    }
}
