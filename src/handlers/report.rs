// Barrier report wizard handlers for the /report routes

use askama::Template;
use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form as AxumForm,
};
use std::{collections::HashMap, sync::Arc};
use uuid::Uuid;

use crate::{
    error::AppError,
    form::{
        Condition, ErrorSummary, Field, FieldValue, Form, FormRequest, RadioOption,
        SelectOptionView, TemplateValue,
    },
    metadata::{Metadata, STATUS_RESOLVED},
    report::BarrierReport,
    validators::ResolveValidators,
    AppState,
};

#[derive(Template)]
#[template(path = "report_form.html")]
struct ReportFormTemplate {
    action: String,
    csrf_token: String,
    errors: Vec<ErrorSummary>,
    title: String,
    summary: String,
    country_options: Vec<SelectOptionView>,
    status_options: Vec<RadioOption>,
    resolved_month: String,
    resolved_year: String,
    sectors: Vec<SectorCheckbox>,
}

struct SectorCheckbox {
    id: String,
    name: String,
    checked: bool,
}

/// Field descriptors for the "about the barrier" step. Candidates come from
/// the stored report when resuming a draft; validator sets are resolved
/// from the registry rather than baked in here.
fn step_fields(state: &AppState, report: Option<&BarrierReport>) -> Vec<Field> {
    let registry = &state.validators;
    let metadata = &state.metadata;

    vec![
        Field::plain("title")
            .required("Enter a title for the barrier")
            .sanitize(|v| v.trim().to_string())
            .validators(registry.resolve("title").unwrap_or_default())
            .maybe_candidate(report.and_then(|r| r.candidate("title"))),
        Field::plain("summary")
            .sanitize(|v| v.trim().to_string())
            .maybe_candidate(report.and_then(|r| r.candidate("summary"))),
        Field::select("country", metadata.country_options())
            .required("Select the country the barrier applies to")
            .validators(registry.resolve("country").unwrap_or_default())
            .maybe_candidate(report.and_then(|r| r.candidate("country"))),
        Field::radio("status", metadata.status_options())
            .required("Select the status of the barrier")
            .validators(registry.resolve("status").unwrap_or_default())
            .maybe_candidate(report.and_then(|r| r.candidate("status"))),
        Field::group("resolved_date", vec!["month".to_string(), "year".to_string()])
            .condition(Condition::equals("status", STATUS_RESOLVED))
            .required("Enter the month and year the barrier was resolved")
            .validators(registry.resolve("resolved_date").unwrap_or_default())
            .maybe_candidate(report.and_then(|r| r.resolved_date_candidate())),
        Field::checkboxes("sectors", metadata.sector_ids())
            .validators(registry.resolve("sectors").unwrap_or_default())
            .maybe_candidate(report.and_then(|r| r.sectors_candidate())),
    ]
}

fn render_step(form: &Form, metadata: &Metadata, action: &str) -> Result<Html<String>, AppError> {
    let values = form.template_values();

    let text = |name: &str| -> String {
        values
            .get(name)
            .map(|v| v.as_text().to_string())
            .unwrap_or_default()
    };
    let group_entry = |name: &str, key: &str| -> String {
        values
            .get(name)
            .and_then(TemplateValue::as_group)
            .and_then(|map| map.get(key).cloned())
            .unwrap_or_default()
    };

    let picked_sectors = values
        .get("sectors")
        .and_then(TemplateValue::as_group)
        .cloned()
        .unwrap_or_default();

    let template = ReportFormTemplate {
        action: action.to_string(),
        csrf_token: text("csrf_token"),
        errors: values
            .get("errors")
            .map(|v| v.as_errors().to_vec())
            .unwrap_or_default(),
        title: text("title"),
        summary: text("summary"),
        country_options: values
            .get("country")
            .map(|v| v.as_select().to_vec())
            .unwrap_or_default(),
        status_options: values
            .get("status")
            .map(|v| v.as_radio().to_vec())
            .unwrap_or_default(),
        resolved_month: group_entry("resolved_date", "month"),
        resolved_year: group_entry("resolved_date", "year"),
        sectors: metadata
            .sectors
            .iter()
            .map(|sector| SectorCheckbox {
                id: sector.id.clone(),
                name: sector.name.clone(),
                checked: picked_sectors
                    .get(&sector.id)
                    .is_some_and(|v| !v.is_empty()),
            })
            .collect(),
    };

    Ok(Html(template.render()?))
}

// GET /report/new - Blank "about the barrier" step
pub async fn new_report_page(
    State(state): State<Arc<AppState>>,
) -> Result<Html<String>, AppError> {
    let request = FormRequest::get(Uuid::new_v4().to_string());
    let form = Form::new(&request, step_fields(&state, None));
    render_step(&form, &state.metadata, "/report/new")
}

// GET /report/{id} - Resume a saved draft
pub async fn resume_report_page(
    Path(id): Path<Uuid>,
    State(state): State<Arc<AppState>>,
) -> Result<Html<String>, AppError> {
    let report = state
        .reports
        .read()
        .await
        .get(&id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("No barrier report with id {}", id)))?;

    let request = FormRequest::get(Uuid::new_v4().to_string());
    let form = Form::new(&request, step_fields(&state, Some(&report)));
    render_step(&form, &state.metadata, &format!("/report/{}", id))
}

// POST /report/new - Submit the step for a brand new report
pub async fn submit_new_report(
    State(state): State<Arc<AppState>>,
    AxumForm(body): AxumForm<HashMap<String, String>>,
) -> Result<Response, AppError> {
    process_submission(state, BarrierReport::new(), "/report/new", body).await
}

// POST /report/{id} - Submit the step for an existing draft
pub async fn submit_report(
    Path(id): Path<Uuid>,
    State(state): State<Arc<AppState>>,
    AxumForm(body): AxumForm<HashMap<String, String>>,
) -> Result<Response, AppError> {
    let report = state
        .reports
        .read()
        .await
        .get(&id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("No barrier report with id {}", id)))?;

    process_submission(state, report, &format!("/report/{}", id), body).await
}

/// The canonical controller flow: construct the form, validate, then either
/// persist a draft (save-and-exit), re-render with errors, or persist the
/// completed step and redirect.
async fn process_submission(
    state: Arc<AppState>,
    mut report: BarrierReport,
    action: &str,
    body: HashMap<String, String>,
) -> Result<Response, AppError> {
    let request = FormRequest::post(body.into(), Uuid::new_v4().to_string());
    let mut form = Form::new(&request, step_fields(&state, Some(&report)));

    form.validate();

    if form.is_exit() {
        report.apply_values(form.values());
        report.is_draft = true;
        let id = report.id;
        state.reports.write().await.insert(id, report);
        tracing::info!(report_id = %id, "saved draft barrier report");
        return Ok(Redirect::to("/").into_response());
    }

    if !form.has_errors() {
        if let Some(message) = duplicate_title_error(&state, &report, &form).await {
            form.add_errors([("title", message)]);
        }
    }

    if form.has_errors() {
        tracing::debug!(error_count = form.errors().len(), "re-rendering report step");
        return Ok(render_step(&form, &state.metadata, action)?.into_response());
    }

    report.apply_values(form.values());
    report.is_draft = false;
    let id = report.id;
    state.reports.write().await.insert(id, report);
    tracing::info!(report_id = %id, "barrier report submitted");

    Ok(Redirect::to("/").into_response())
}

/// Field-level rejection sourced from outside the form, merged via
/// `add_errors` so it renders through the same error summary.
async fn duplicate_title_error(
    state: &AppState,
    report: &BarrierReport,
    form: &Form,
) -> Option<&'static str> {
    let title = form.value("title").and_then(FieldValue::as_text)?;
    if title.is_empty() {
        return None;
    }

    let reports = state.reports.read().await;
    let duplicate = reports
        .values()
        .any(|other| other.id != report.id && other.title == title);

    duplicate.then_some("A report with this title already exists")
}
