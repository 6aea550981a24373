mod error;
mod handlers;
mod security;

pub mod form;
pub mod metadata;
pub mod report;
pub mod validators;

use askama::Template;
use axum::{
    extract::State,
    middleware,
    response::{Html, IntoResponse},
    routing::get,
    Router,
};
use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

use error::AppError;
use metadata::Metadata;
use report::ReportStore;
use validators::{
    group_values_one_of, is_one_of, is_past_month_year, max_length, ValidatorRegistry,
};

const MAX_BODY_BYTES: usize = 64 * 1024;

// Template structs
#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    reports: Vec<ReportRow>,
}

struct ReportRow {
    id: String,
    title: String,
    country: String,
    status: String,
    is_draft: bool,
}

// Application state
pub struct AppState {
    pub metadata: Metadata,
    pub validators: ValidatorRegistry,
    pub reports: ReportStore,
}

impl AppState {
    pub fn new(metadata: Metadata) -> Self {
        let validators = build_validator_registry(&metadata);
        AppState {
            metadata,
            validators,
            reports: RwLock::new(HashMap::new()),
        }
    }
}

/// Named validator sets for the barrier report fields, derived from the
/// reference data once at startup.
fn build_validator_registry(metadata: &Metadata) -> ValidatorRegistry {
    use form::Validator;

    let mut registry = ValidatorRegistry::new();
    registry.register(
        "title",
        vec![Validator::new(
            max_length("title", 255),
            "Title must be 255 characters or fewer",
        )],
    );
    registry.register(
        "country",
        vec![Validator::new(
            is_one_of("country", metadata.country_ids()),
            "Select a country from the list",
        )],
    );
    registry.register(
        "status",
        vec![Validator::new(
            is_one_of("status", metadata.status_ids()),
            "Select a valid barrier status",
        )],
    );
    registry.register(
        "resolved_date",
        vec![Validator::new(
            is_past_month_year("resolved_date"),
            "Resolved date must be a real month and year in the past",
        )],
    );
    registry.register(
        "sectors",
        vec![Validator::new(
            group_values_one_of("sectors", metadata.sector_ids()),
            "Select sectors from the list",
        )],
    );
    registry
}

// GET / - Index: list reports, link to start a new one
async fn index(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, AppError> {
    let store = state.reports.read().await;

    let mut reports: Vec<&report::BarrierReport> = store.values().collect();
    reports.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let rows = reports
        .into_iter()
        .map(|r| ReportRow {
            id: r.id.to_string(),
            title: if r.title.is_empty() {
                "Untitled barrier".to_string()
            } else {
                r.title.clone()
            },
            country: state
                .metadata
                .country_name(&r.country)
                .unwrap_or("")
                .to_string(),
            status: state
                .metadata
                .status_name(&r.status)
                .unwrap_or("")
                .to_string(),
            is_draft: r.is_draft,
        })
        .collect();

    let template = IndexTemplate { reports: rows };
    Ok(Html(template.render()?))
}

/// Build the application router around the given reference data.
pub fn create_router(metadata: Metadata) -> Router {
    let state = Arc::new(AppState::new(metadata));

    Router::new()
        .route("/", get(index))
        .route(
            "/report/new",
            get(handlers::report::new_report_page).post(handlers::report::submit_new_report),
        )
        .route(
            "/report/{id}",
            get(handlers::report::resume_report_page).post(handlers::report::submit_report),
        )
        .layer(middleware::from_fn(security::security_headers))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
