//! # Record Store
//! File-backed tabular storage for job records: one CSV file, a fixed header
//! row, one data row per entry. The store stays deliberately dumb — append
//! and full load only — and reports the schema it actually found so the
//! metrics engine can decide whether the file is usable.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

use crate::record::{JobRecord, BUDGETED_REVENUE_COLUMN, COLUMNS};

/// Storage failures surfaced to the submit/analytics callers. An append that
/// returns an error means the record was NOT committed.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record store I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("record store CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Full contents of the record store as loaded for one analytics pass.
///
/// `columns` is the header row actually present in the file (the canonical
/// schema when no file exists yet). `budgeted_revenue` is populated only
/// when the optional column exists, one cell per record in record order.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub columns: Vec<String>,
    pub records: Vec<JobRecord>,
    pub budgeted_revenue: Option<Vec<Option<f64>>>,
}

impl Dataset {
    /// Empty dataset carrying the canonical schema, as reported before any
    /// entry has been submitted.
    pub fn empty() -> Self {
        Self::with_canonical_schema(Vec::new())
    }

    /// Dataset over the given records with the canonical 35-column schema
    /// and no optional columns.
    pub fn with_canonical_schema(records: Vec<JobRecord>) -> Self {
        Self {
            columns: COLUMNS.iter().map(|c| c.to_string()).collect(),
            records,
            budgeted_revenue: None,
        }
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Contract between the application and the record store: append one record,
/// or load everything for analysis.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn load_all(&self) -> Result<Dataset, StoreError>;
    async fn append(&self, record: &JobRecord) -> Result<(), StoreError>;
}

/// CSV-file implementation of the record store.
pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl RecordStore for CsvStore {
    async fn load_all(&self) -> Result<Dataset, StoreError> {
        if !self.path.exists() {
            return Ok(Dataset::empty());
        }

        let mut rdr = csv::Reader::from_path(&self.path)?;
        let headers = rdr.headers()?.clone();
        let columns: Vec<String> = headers.iter().map(str::to_string).collect();
        let budget_idx = columns.iter().position(|c| c == BUDGETED_REVENUE_COLUMN);

        let mut records = Vec::new();
        let mut budgeted = budget_idx.map(|_| Vec::new());
        for row in rdr.records() {
            let row = row?;
            let record: JobRecord = row.deserialize(Some(&headers))?;
            if let (Some(idx), Some(col)) = (budget_idx, budgeted.as_mut()) {
                col.push(parse_optional_amount(row.get(idx)));
            }
            records.push(record);
        }

        Ok(Dataset {
            columns,
            records,
            budgeted_revenue: budgeted,
        })
    }

    async fn append(&self, record: &JobRecord) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }

        // Header row is written once, when the file is created (or empty).
        let write_header = !self.path.exists() || fs::metadata(&self.path)?.len() == 0;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(write_header)
            .from_writer(file);
        wtr.serialize(record)?;
        wtr.flush()?;
        Ok(())
    }
}

/// Lenient cell parse for the optional budgeted-revenue column. An empty or
/// unparsable cell is a missing value for that record, never a load failure.
fn parse_optional_amount(cell: Option<&str>) -> Option<f64> {
    let raw = cell.map(str::trim).unwrap_or_default();
    if raw.is_empty() {
        return None;
    }
    match raw.parse::<f64>() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!(value = raw, "unparsable budgeted revenue cell, treating as missing");
            None
        }
    }
}

// --- Test helper ---
/// In-memory store double for router tests: serves a fixed dataset and can
/// be switched to fail appends.
pub struct MockStore {
    pub dataset: std::sync::Mutex<Dataset>,
    pub fail_append: bool,
}

impl MockStore {
    pub fn new(dataset: Dataset) -> Self {
        Self {
            dataset: std::sync::Mutex::new(dataset),
            fail_append: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            dataset: std::sync::Mutex::new(Dataset::empty()),
            fail_append: true,
        }
    }
}

#[async_trait]
impl RecordStore for MockStore {
    async fn load_all(&self) -> Result<Dataset, StoreError> {
        Ok(self.dataset.lock().expect("mock store mutex poisoned").clone())
    }

    async fn append(&self, record: &JobRecord) -> Result<(), StoreError> {
        if self.fail_append {
            return Err(StoreError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "append rejected by mock store",
            )));
        }
        let mut ds = self.dataset.lock().expect("mock store mutex poisoned");
        ds.records.push(record.clone());
        if let Some(col) = ds.budgeted_revenue.as_mut() {
            col.push(None);
        }
        Ok(())
    }
}
