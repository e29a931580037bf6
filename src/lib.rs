// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod api;
pub mod config;
pub mod engine;
pub mod history;
pub mod metrics;
pub mod record;
pub mod report;
pub mod store;

// ---- Re-exports for stable public API ----
pub use crate::api::{router, AppState};
pub use crate::engine::{compute, summarize, ComputeError, DAYS_IN_PERIOD};
pub use crate::record::{JobRecord, LeadStatus, Seasonality};
pub use crate::report::{DerivedColumn, DerivedMetrics};
pub use crate::store::{CsvStore, Dataset, RecordStore, StoreError};
