use axum::{routing::get, Router};
use metrics::{describe_counter, describe_gauge};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

pub const RECORDS_SUBMITTED: &str = "records_submitted_total";
pub const ANALYTICS_RUNS: &str = "analytics_runs_total";
pub const RECORD_STORE_ROWS: &str = "record_store_rows";

pub struct Metrics {
    pub handle: PrometheusHandle,
}

impl Metrics {
    /// Initialize the Prometheus recorder and describe the service gauges.
    pub fn init() -> Self {
        let builder = PrometheusBuilder::new();

        let handle = builder
            .install_recorder()
            .expect("prometheus: install recorder");

        describe_counter!(
            RECORDS_SUBMITTED,
            "Job records accepted through the entry-form API."
        );
        describe_counter!(
            ANALYTICS_RUNS,
            "Analytics computations, labeled by outcome."
        );
        describe_gauge!(
            RECORD_STORE_ROWS,
            "Rows loaded from the record store on the last analytics pass."
        );

        Self { handle }
    }

    /// Returns a router exposing `/metrics` with the Prometheus exposition format.
    pub fn router(&self) -> Router {
        let handle = self.handle.clone();
        Router::new().route(
            "/metrics",
            get(move || {
                let h = handle.clone();
                async move { h.render() }
            }),
        )
    }
}
