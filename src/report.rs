//! report.rs — output types for the metrics engine.
//!
//! A `DerivedColumn` keeps one value per input record, in input order. `None`
//! is the undefined-ratio marker for a zero or missing denominator: it is
//! excluded from the average rather than treated as zero, and the average
//! itself is `None` when no record produced a defined value. Consumers must
//! render a placeholder for `None`, never "0.00".

use serde::Serialize;

/// Per-record derived series plus its aggregate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedColumn {
    pub values: Vec<Option<f64>>,
    /// Arithmetic mean over the defined values only.
    pub average: Option<f64>,
}

impl DerivedColumn {
    /// Build a column and compute its aggregate in one step, so the two can
    /// never drift apart.
    pub fn from_values(values: Vec<Option<f64>>) -> Self {
        let average = mean(&values);
        Self { values, average }
    }
}

/// Mean of the defined values; `None` when every value is undefined.
fn mean(values: &[Option<f64>]) -> Option<f64> {
    let mut sum = 0.0;
    let mut n = 0usize;
    for v in values.iter().flatten() {
        sum += v;
        n += 1;
    }
    (n > 0).then(|| sum / n as f64)
}

/// Everything the analytics dashboard derives from one load of the record
/// store. Recomputed on every view; never persisted or mutated downstream.
///
/// `variance` uses tagged presence: it exists only when the record store
/// carries a "Budgeted Revenue" column, and is omitted from serialized
/// output entirely otherwise — never zero-filled.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedMetrics {
    pub dso: DerivedColumn,
    pub dpo: DerivedColumn,
    pub dio: DerivedColumn,
    pub ccc: DerivedColumn,
    pub projected_cash_flow: DerivedColumn,
    pub break_even_revenue: DerivedColumn,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variance: Option<DerivedColumn>,
    pub roic: DerivedColumn,
    pub utilization_rate: DerivedColumn,
}

/// Summary statistics over one raw numeric column, for the dashboard's
/// summary panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSummary {
    pub field: &'static str,
    pub count: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}
