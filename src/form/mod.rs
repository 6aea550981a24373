// Form engine: declarative per-request form modeling, validation and
// template projection.
//
// A controller constructs one `Form` per request from an ordered field
// list, calls `validate()` on POST, then either re-renders with
// `template_values()` or persists `values()` and redirects. The engine
// performs no I/O of its own.

pub mod errors;
pub mod extract;
pub mod field;
pub mod project;
pub mod validate;
pub mod value;

use std::collections::HashMap;

pub use errors::{ErrorSummary, FieldError};
pub use field::{Condition, Field, FieldKind, SelectOption, Validator};
pub use project::{RadioOption, SelectOptionView, TemplateValue};
pub use validate::is_defined;
pub use value::{
    BodyValue, FieldValue, FormRequest, FormValues, RequestMethod, SubmittedBody, UploadedFile,
};

/// Reserved submission field marking a save-and-exit request.
const EXIT_ACTION: &str = "exit";

/// Per-request form model. Extraction happens once, at construction;
/// everything else re-reads the resolved state.
pub struct Form {
    fields: Vec<Field>,
    values: FormValues,
    errors: Vec<FieldError>,
    is_post: bool,
    is_exit: bool,
    csrf_token: String,
    validated: bool,
}

impl Form {
    pub fn new(request: &FormRequest, fields: Vec<Field>) -> Self {
        let is_post = request.method == RequestMethod::Post;
        let is_exit = is_post && request.body.text("action") == Some(EXIT_ACTION);
        let values = extract::resolve_values(&fields, request);

        Form {
            fields,
            values,
            errors: Vec::new(),
            is_post,
            is_exit,
            csrf_token: request.csrf_token.clone(),
            validated: false,
        }
    }

    pub fn is_post(&self) -> bool {
        self.is_post
    }

    pub fn is_exit(&self) -> bool {
        self.is_exit
    }

    /// Run all field validators against the resolved values. Guarded:
    /// repeat calls are no-ops, so errors are never duplicated.
    pub fn validate(&mut self) {
        if self.validated {
            return;
        }
        self.validated = true;
        validate::run(&self.fields, &self.values, self.is_exit, &mut self.errors);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Merge errors reported by an external system (e.g. a backend 400
    /// response naming fields), in the order given. Keys are matched
    /// against each field's `error_field` alias first, then its name;
    /// unmatched keys fall back to their own kebab-case anchor.
    pub fn add_errors<'a, I>(&mut self, external: I)
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        for (key, message) in external {
            let matched = self.fields.iter().find(|field| {
                field.error_field.as_deref() == Some(key) || field.name == key
            });

            let id = match matched {
                Some(field) => errors::error_anchor(field),
                None => errors::anchor_token(key),
            };

            self.errors.push(FieldError {
                id,
                message: message.to_string(),
            });
        }
    }

    /// The persistence-ready shape: resolved values only, checkbox/group
    /// fields as nested maps.
    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn value(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    /// Render-ready projection of the whole form; see `project`. Legal to
    /// call before `validate()`, in which case the error list is empty.
    pub fn template_values(&self) -> HashMap<String, TemplateValue> {
        self.template_values_with("errors")
    }

    pub fn template_values_with(&self, errors_key: &str) -> HashMap<String, TemplateValue> {
        project::template_values(
            &self.fields,
            &self.values,
            &self.errors,
            &self.csrf_token,
            errors_key,
        )
    }

    /// Just the reshaped error list, for controllers that render their own
    /// field values.
    pub fn template_errors(&self) -> Vec<ErrorSummary> {
        self.errors.iter().map(ErrorSummary::from).collect()
    }
}
