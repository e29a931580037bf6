use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Json, Router,
};
use metrics::{counter, gauge};
use tower_http::{cors::CorsLayer, services::ServeDir};

use crate::engine::{self, ComputeError};
use crate::history::History;
use crate::metrics::{ANALYTICS_RUNS, RECORDS_SUBMITTED, RECORD_STORE_ROWS};
use crate::record::JobRecord;
use crate::report::{DerivedMetrics, FieldSummary};
use crate::store::{RecordStore, StoreError};

#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn RecordStore>,
    history: Arc<History>,
}

impl AppState {
    pub fn new(store: Arc<dyn RecordStore>, history_cap: usize) -> Self {
        Self {
            store,
            history: Arc::new(History::with_capacity(history_cap)),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/records", post(submit_record).get(list_records))
        .route("/records/summary", get(records_summary))
        .route("/analytics", get(analytics))
        .route("/debug/history", get(debug_history))
        .route("/", get(|| async { Redirect::permanent("/ui/") }))
        .nest_service("/ui", ServeDir::new("ui"))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

#[derive(serde::Serialize)]
struct SubmitResp {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

/// POST /records — one entry-form submission. A storage failure is surfaced
/// to the user and the record is not committed.
async fn submit_record(
    State(state): State<AppState>,
    Json(record): Json<JobRecord>,
) -> Response {
    match state.store.append(&record).await {
        Ok(()) => {
            counter!(RECORDS_SUBMITTED).increment(1);
            tracing::info!(job = %record.job_name, "record saved");
            (
                StatusCode::CREATED,
                Json(SubmitResp {
                    status: "saved",
                    message: None,
                }),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "record append failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(SubmitResp {
                    status: "error",
                    message: Some(format!("entry was not saved: {e}")),
                }),
            )
                .into_response()
        }
    }
}

/// GET /records — the full raw record list, in store order.
async fn list_records(State(state): State<AppState>) -> Response {
    match state.store.load_all().await {
        Ok(ds) => Json(ds.records).into_response(),
        Err(e) => store_unavailable(e),
    }
}

/// GET /records/summary — count/mean/min/max over the raw numeric columns.
async fn records_summary(State(state): State<AppState>) -> Response {
    match state.store.load_all().await {
        Ok(ds) => {
            let summary: Vec<FieldSummary> = engine::summarize(&ds);
            Json(summary).into_response()
        }
        Err(e) => store_unavailable(e),
    }
}

/// Dashboard payload: the derived columns and aggregates plus the raw series
/// the charts are drawn from (revenue vs. direct costs, cash-flow forecast,
/// break-even). Labels are job names, in record order.
#[derive(serde::Serialize)]
struct AnalyticsReport {
    record_count: usize,
    job_names: Vec<String>,
    revenue: Vec<f64>,
    direct_job_costs: Vec<f64>,
    metrics: DerivedMetrics,
}

/// The three result shapes the dashboard must branch on.
#[derive(serde::Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum AnalyticsBody {
    Ready(AnalyticsReport),
    InsufficientData { message: String },
    SchemaMismatch { missing_column: String },
}

/// GET /analytics — one full recomputation over the loaded record store.
async fn analytics(State(state): State<AppState>) -> Response {
    let dataset = match state.store.load_all().await {
        Ok(ds) => ds,
        Err(e) => return store_unavailable(e),
    };
    gauge!(RECORD_STORE_ROWS).set(dataset.len() as f64);

    match engine::compute(&dataset) {
        Ok(metrics) => {
            counter!(ANALYTICS_RUNS, "outcome" => "ready").increment(1);
            state.history.push(dataset.len(), &metrics);
            let report = AnalyticsReport {
                record_count: dataset.len(),
                job_names: dataset.records.iter().map(|r| r.job_name.clone()).collect(),
                revenue: dataset.records.iter().map(|r| r.revenue).collect(),
                direct_job_costs: dataset.records.iter().map(|r| r.direct_job_costs).collect(),
                metrics,
            };
            (StatusCode::OK, Json(AnalyticsBody::Ready(report))).into_response()
        }
        Err(ComputeError::InsufficientData) => {
            counter!(ANALYTICS_RUNS, "outcome" => "insufficient_data").increment(1);
            (
                StatusCode::OK,
                Json(AnalyticsBody::InsufficientData {
                    message: "No data available for analysis.".to_string(),
                }),
            )
                .into_response()
        }
        Err(ComputeError::MissingColumn(column)) => {
            counter!(ANALYTICS_RUNS, "outcome" => "schema_mismatch").increment(1);
            tracing::error!(column, "record store schema mismatch");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(AnalyticsBody::SchemaMismatch {
                    missing_column: column.to_string(),
                }),
            )
                .into_response()
        }
    }
}

fn store_unavailable(e: StoreError) -> Response {
    tracing::error!(error = %e, "record store load failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(SubmitResp {
            status: "error",
            message: Some(format!("record store unavailable: {e}")),
        }),
    )
        .into_response()
}

#[derive(serde::Serialize)]
struct HistoryOut {
    ts_unix: u64,
    record_count: usize,
    avg_ccc: Option<f64>,
    avg_roic: Option<f64>,
    avg_utilization: Option<f64>,
}

async fn debug_history(State(state): State<AppState>) -> Json<Vec<HistoryOut>> {
    let rows = state.history.snapshot_last_n(10);
    let out = rows
        .into_iter()
        .map(|h| HistoryOut {
            ts_unix: h.ts_unix,
            record_count: h.record_count,
            avg_ccc: h.avg_ccc,
            avg_roic: h.avg_roic,
            avg_utilization: h.avg_utilization,
        })
        .collect::<Vec<_>>();
    Json(out)
}
