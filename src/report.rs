// Barrier report model and the in-memory store standing in for the
// backend persistence service

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::form::{FieldValue, FormValues};

/// A reported trade barrier. Unset fields are empty strings so drafts can
/// round-trip straight back into form candidates.
#[derive(Debug, Clone, PartialEq)]
pub struct BarrierReport {
    pub id: Uuid,
    pub title: String,
    pub summary: String,
    pub country: String,
    pub status: String,
    pub resolved_month: String,
    pub resolved_year: String,
    pub sectors: Vec<String>,
    pub is_draft: bool,
    pub created_at: DateTime<Utc>,
}

impl BarrierReport {
    pub fn new() -> Self {
        BarrierReport {
            id: Uuid::new_v4(),
            title: String::new(),
            summary: String::new(),
            country: String::new(),
            status: String::new(),
            resolved_month: String::new(),
            resolved_year: String::new(),
            sectors: Vec::new(),
            is_draft: true,
            created_at: Utc::now(),
        }
    }

    /// Overwrite report fields from a form's persistence-ready values map.
    /// Absent fields are left untouched so partial (save-and-exit) drafts
    /// keep earlier answers.
    pub fn apply_values(&mut self, values: &FormValues) {
        if let Some(title) = values.get("title").and_then(FieldValue::as_text) {
            self.title = title.to_string();
        }
        if let Some(summary) = values.get("summary").and_then(FieldValue::as_text) {
            self.summary = summary.to_string();
        }
        if let Some(country) = values.get("country").and_then(FieldValue::as_text) {
            self.country = country.to_string();
        }
        if let Some(status) = values.get("status").and_then(FieldValue::as_text) {
            self.status = status.to_string();
        }
        if let Some(date) = values.get("resolved_date").and_then(FieldValue::as_group) {
            self.resolved_month = date.get("month").cloned().unwrap_or_default();
            self.resolved_year = date.get("year").cloned().unwrap_or_default();
        }
        if let Some(sectors) = values.get("sectors").and_then(FieldValue::as_group) {
            let mut picked: Vec<String> = sectors
                .values()
                .filter(|v| !v.is_empty())
                .cloned()
                .collect();
            picked.sort();
            self.sectors = picked;
        }
    }

    /// Prior-value candidate for a plain or single-choice field, or `None`
    /// when the report has nothing stored for it.
    pub fn candidate(&self, field: &str) -> Option<FieldValue> {
        let stored = match field {
            "title" => &self.title,
            "summary" => &self.summary,
            "country" => &self.country,
            "status" => &self.status,
            _ => return None,
        };
        if stored.is_empty() {
            None
        } else {
            Some(FieldValue::text(stored.clone()))
        }
    }

    pub fn resolved_date_candidate(&self) -> Option<FieldValue> {
        if self.resolved_month.is_empty() && self.resolved_year.is_empty() {
            return None;
        }
        Some(FieldValue::group([
            ("month", self.resolved_month.clone()),
            ("year", self.resolved_year.clone()),
        ]))
    }

    pub fn sectors_candidate(&self) -> Option<FieldValue> {
        if self.sectors.is_empty() {
            return None;
        }
        Some(FieldValue::group(
            self.sectors.iter().map(|s| (s.clone(), s.clone())),
        ))
    }
}

impl Default for BarrierReport {
    fn default() -> Self {
        Self::new()
    }
}

/// In-memory report store; one per application, behind `AppState`.
pub type ReportStore = RwLock<HashMap<Uuid, BarrierReport>>;
