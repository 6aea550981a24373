// Resolved form values and the submitted-body model

use std::collections::HashMap;

/// Pre-parsed upload descriptor for a posted file field.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedFile {
    pub name: String,
    pub size: u64,
}

/// The resolved value of a single field.
///
/// Plain, radio and select fields resolve to `Text`; checkbox and group
/// fields resolve to a map of sub-item name to raw value; file fields carry
/// the upload descriptor through unchanged. A field with no value at all is
/// simply absent from the values map.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Group(HashMap<String, String>),
    File(UploadedFile),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    pub fn group<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        FieldValue::Group(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_group(&self) -> Option<&HashMap<String, String>> {
        match self {
            FieldValue::Group(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_file(&self) -> Option<&UploadedFile> {
        match self {
            FieldValue::File(file) => Some(file),
            _ => None,
        }
    }

    /// Whether this value counts as a usable prior value when resolving a
    /// field's candidate list. Whitespace-only text is kept here; it only
    /// becomes "empty" at validation time.
    pub fn is_present(&self) -> bool {
        match self {
            FieldValue::Text(s) => !s.is_empty(),
            FieldValue::Group(map) => !map.is_empty(),
            FieldValue::File(file) => !file.name.is_empty(),
        }
    }
}

/// The full resolved values map a validator sees: field name -> value.
pub type FormValues = HashMap<String, FieldValue>;

/// One raw entry of a submitted body.
#[derive(Debug, Clone, PartialEq)]
pub enum BodyValue {
    Text(String),
    File(UploadedFile),
}

/// Parsed request body, field name -> raw value.
#[derive(Debug, Clone, Default)]
pub struct SubmittedBody {
    entries: HashMap<String, BodyValue>,
}

impl SubmittedBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_text(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries
            .insert(name.into(), BodyValue::Text(value.into()));
    }

    pub fn insert_file(&mut self, name: impl Into<String>, file: UploadedFile) {
        self.entries.insert(name.into(), BodyValue::File(file));
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        match self.entries.get(name) {
            Some(BodyValue::Text(s)) => Some(s),
            _ => None,
        }
    }

    pub fn file(&self, name: &str) -> Option<&UploadedFile> {
        match self.entries.get(name) {
            Some(BodyValue::File(f)) => Some(f),
            _ => None,
        }
    }
}

impl From<HashMap<String, String>> for SubmittedBody {
    fn from(fields: HashMap<String, String>) -> Self {
        let mut body = SubmittedBody::new();
        for (name, value) in fields {
            body.insert_text(name, value);
        }
        body
    }
}

/// The slice of the incoming request the form engine needs: the method, the
/// parsed body, and the CSRF token the controller captured for this request.
#[derive(Debug, Clone)]
pub struct FormRequest {
    pub method: RequestMethod,
    pub body: SubmittedBody,
    pub csrf_token: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMethod {
    Get,
    Post,
}

impl FormRequest {
    pub fn get(csrf_token: impl Into<String>) -> Self {
        FormRequest {
            method: RequestMethod::Get,
            body: SubmittedBody::new(),
            csrf_token: csrf_token.into(),
        }
    }

    pub fn post(body: SubmittedBody, csrf_token: impl Into<String>) -> Self {
        FormRequest {
            method: RequestMethod::Post,
            body,
            csrf_token: csrf_token.into(),
        }
    }
}
