//! # Metrics Engine
//! Pure, deterministic logic that maps the full record collection to the
//! derived financial/operational series. No I/O, no shared state — calling
//! it twice on the same input yields identical output, which makes it
//! suitable for unit tests and offline evaluation.
//!
//! Policy: a zero denominator degrades only that record's value to the
//! undefined marker; an empty collection or a stale store schema aborts the
//! whole call with a typed signal the caller must branch on.

use thiserror::Error;

use crate::record::JobRecord;
use crate::report::{DerivedColumn, DerivedMetrics, FieldSummary};
use crate::store::Dataset;

/// Reporting window for the working-capital timing ratios (DSO/DPO/DIO).
pub const DAYS_IN_PERIOD: f64 = 30.0;

/// Columns every unconditional formula reads. A file missing any of these is
/// a schema/version mismatch between store and engine — fatal, never
/// silently defaulted.
pub const REQUIRED_COLUMNS: [&str; 9] = [
    "Revenue",
    "Direct Job Costs",
    "Overhead Costs",
    "CapEx",
    "Accounts Receivable (AR)",
    "Accounts Payable (AP)",
    "Inventory Cost",
    "Billable Tech Hours",
    "Total Available Hours",
];

/// Dataset-level conditions that abort a computation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ComputeError {
    /// Record collection is empty. Recovered by the caller with a warning,
    /// not by rendering zero-row charts.
    #[error("no records available for analysis")]
    InsufficientData,
    /// A column required by an unconditional formula is absent from the
    /// store schema.
    #[error("required column `{0}` is missing from the record store schema")]
    MissingColumn(&'static str),
}

/// Compute every derived series and aggregate for the given dataset.
///
/// Output rows are in input order, one value per record. Variance is present
/// only when the dataset carries the optional budgeted-revenue column.
pub fn compute(dataset: &Dataset) -> Result<DerivedMetrics, ComputeError> {
    if dataset.is_empty() {
        return Err(ComputeError::InsufficientData);
    }
    if let Some(missing) = REQUIRED_COLUMNS
        .iter()
        .copied()
        .find(|col| !dataset.has_column(col))
    {
        return Err(ComputeError::MissingColumn(missing));
    }

    let n = dataset.len();
    let mut dso = Vec::with_capacity(n);
    let mut dpo = Vec::with_capacity(n);
    let mut dio = Vec::with_capacity(n);
    let mut ccc = Vec::with_capacity(n);
    let mut projected = Vec::with_capacity(n);
    let mut break_even = Vec::with_capacity(n);
    let mut roic = Vec::with_capacity(n);
    let mut utilization = Vec::with_capacity(n);

    for r in &dataset.records {
        let dso_v = ratio(r.accounts_receivable, r.revenue).map(|x| x * DAYS_IN_PERIOD);
        let dpo_v = ratio(r.accounts_payable, r.direct_job_costs).map(|x| x * DAYS_IN_PERIOD);
        let dio_v = ratio(r.inventory_cost, r.direct_job_costs).map(|x| x * DAYS_IN_PERIOD);

        // CCC = DSO + DIO - DPO; undefined inputs propagate.
        let ccc_v = match (dso_v, dio_v, dpo_v) {
            (Some(s), Some(i), Some(p)) => Some(s + i - p),
            _ => None,
        };

        let operating_margin = r.revenue - r.direct_job_costs - r.overhead_costs;

        dso.push(dso_v);
        dpo.push(dpo_v);
        dio.push(dio_v);
        ccc.push(ccc_v);
        projected.push(Some(operating_margin));
        break_even.push(Some(r.direct_job_costs + r.overhead_costs));
        roic.push(ratio(operating_margin, r.capex + r.overhead_costs));
        utilization.push(
            ratio(
                f64::from(r.billable_tech_hours),
                f64::from(r.total_available_hours),
            )
            .map(|x| x * 100.0),
        );
    }

    let variance = dataset.budgeted_revenue.as_ref().map(|budgeted| {
        DerivedColumn::from_values(
            dataset
                .records
                .iter()
                .zip(budgeted)
                .map(|(r, b)| b.map(|b| r.revenue - b))
                .collect(),
        )
    });

    Ok(DerivedMetrics {
        dso: DerivedColumn::from_values(dso),
        dpo: DerivedColumn::from_values(dpo),
        dio: DerivedColumn::from_values(dio),
        ccc: DerivedColumn::from_values(ccc),
        projected_cash_flow: DerivedColumn::from_values(projected),
        break_even_revenue: DerivedColumn::from_values(break_even),
        variance,
        roic: DerivedColumn::from_values(roic),
        utilization_rate: DerivedColumn::from_values(utilization),
    })
}

/// Summary statistics over the raw numeric columns, one entry per field in
/// schema order. Empty input yields an empty summary.
pub fn summarize(dataset: &Dataset) -> Vec<FieldSummary> {
    if dataset.is_empty() {
        return Vec::new();
    }

    let fields: [(&'static str, fn(&JobRecord) -> f64); 19] = [
        ("Leads Converted to Signed Job", |r| f64::from(r.leads_converted)),
        ("Technician Hrs on Job", |r| f64::from(r.technician_hours)),
        ("Billable Tech Hours", |r| f64::from(r.billable_tech_hours)),
        ("Billable Lead Tech Hours", |r| f64::from(r.billable_lead_tech_hours)),
        ("Billable PM Hours on Job", |r| f64::from(r.billable_pm_hours)),
        ("Days EQ on a Job", |r| f64::from(r.equipment_days)),
        ("Total Available Hours", |r| f64::from(r.total_available_hours)),
        ("Cost of Lead", |r| r.cost_of_lead),
        ("Revenue", |r| r.revenue),
        ("Direct Job Costs", |r| r.direct_job_costs),
        ("Overhead Costs", |r| r.overhead_costs),
        ("CapEx", |r| r.capex),
        ("Payments Made to Vendors or Staff", |r| r.vendor_payments),
        ("Material or Subcontractor Costs", |r| r.material_costs),
        ("Outstanding Customer Payments", |r| r.outstanding_payments),
        ("Accounts Receivable (AR)", |r| r.accounts_receivable),
        ("Accounts Payable (AP)", |r| r.accounts_payable),
        ("Inventory Cost", |r| r.inventory_cost),
        ("Debt Amounts", |r| r.debt_amount),
    ];

    fields
        .iter()
        .map(|(name, get)| {
            let mut sum = 0.0;
            let mut min = f64::INFINITY;
            let mut max = f64::NEG_INFINITY;
            for r in &dataset.records {
                let v = get(r);
                sum += v;
                min = min.min(v);
                max = max.max(v);
            }
            FieldSummary {
                field: name,
                count: dataset.len(),
                mean: sum / dataset.len() as f64,
                min,
                max,
            }
        })
        .collect()
}

/// Undefined-ratio guard: a zero denominator yields the marker, not a
/// crash and not zero.
fn ratio(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 {
        None
    } else {
        Some(numerator / denominator)
    }
}
