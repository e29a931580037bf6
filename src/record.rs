//! record.rs — typed job/lead entry and the canonical record-store schema.
//!
//! One `JobRecord` per submitted entry. Field names are Rust-idiomatic; the
//! serde renames carry the persisted CSV header spellings, which are the
//! contract with the record store and the entry form.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Where a lead currently stands in the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LeadStatus {
    #[default]
    Pending,
    Converted,
    Lost,
}

/// Seasonal demand driver attached to an entry, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Seasonality {
    #[default]
    None,
    #[serde(rename = "Hurricane Season")]
    HurricaneSeason,
    #[serde(rename = "Winter Storm")]
    WinterStorm,
}

/// One row of the record store: a single job/lead entry as collected by the
/// entry form. All numeric fields are non-negative at entry time; the
/// analytics side only has to tolerate zeros, never negatives.
///
/// `#[serde(default)]` keeps loading lenient for files written by older
/// schema versions — schema validation happens in the engine, where a stale
/// file surfaces as a typed error instead of a silent default.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct JobRecord {
    // Job details
    #[serde(rename = "Job Name")]
    pub job_name: String,
    #[serde(rename = "Project Manager")]
    pub project_manager: String,
    #[serde(rename = "Insurance Carrier")]
    pub insurance_carrier: String,
    #[serde(rename = "Lead Technician")]
    pub lead_technician: String,
    #[serde(rename = "Technician Name")]
    pub technician_name: String,

    // Leads
    #[serde(rename = "Lead ID")]
    pub lead_id: String,
    #[serde(rename = "Referral Source")]
    pub referral_source: String,
    #[serde(rename = "Type of Lead")]
    pub type_of_lead: String,
    #[serde(rename = "Source of Lead")]
    pub source_of_lead: String,
    #[serde(rename = "EQ Used on Job")]
    pub equipment_used: String,

    // Dates (calendar dates, no time component). Optional so a blank cell
    // or an absent column in a legacy/externally-edited file loads as "not
    // recorded" instead of a fabricated epoch date.
    #[serde(rename = "Project Start Date")]
    pub project_start_date: Option<NaiveDate>,
    #[serde(rename = "Project End Date")]
    pub project_end_date: Option<NaiveDate>,
    #[serde(rename = "SCA Signature Date")]
    pub sca_signature_date: Option<NaiveDate>,
    #[serde(rename = "Lead Date")]
    pub lead_date: Option<NaiveDate>,

    #[serde(rename = "Lead Status")]
    pub lead_status: LeadStatus,
    #[serde(rename = "Seasonality Indicator")]
    pub seasonality: Seasonality,

    // Counts
    #[serde(rename = "Leads Converted to Signed Job")]
    pub leads_converted: u32,
    #[serde(rename = "Technician Hrs on Job")]
    pub technician_hours: u32,
    #[serde(rename = "Billable Tech Hours")]
    pub billable_tech_hours: u32,
    #[serde(rename = "Billable Lead Tech Hours")]
    pub billable_lead_tech_hours: u32,
    #[serde(rename = "Billable PM Hours on Job")]
    pub billable_pm_hours: u32,
    #[serde(rename = "Days EQ on a Job")]
    pub equipment_days: u32,
    #[serde(rename = "Total Available Hours")]
    pub total_available_hours: u32,

    // Monetary amounts (currency-agnostic units)
    #[serde(rename = "Cost of Lead")]
    pub cost_of_lead: f64,
    #[serde(rename = "Revenue")]
    pub revenue: f64,
    #[serde(rename = "Direct Job Costs")]
    pub direct_job_costs: f64,
    #[serde(rename = "Overhead Costs")]
    pub overhead_costs: f64,
    #[serde(rename = "CapEx")]
    pub capex: f64,
    #[serde(rename = "Payments Made to Vendors or Staff")]
    pub vendor_payments: f64,
    #[serde(rename = "Material or Subcontractor Costs")]
    pub material_costs: f64,
    #[serde(rename = "Outstanding Customer Payments")]
    pub outstanding_payments: f64,
    #[serde(rename = "Accounts Receivable (AR)")]
    pub accounts_receivable: f64,
    #[serde(rename = "Accounts Payable (AP)")]
    pub accounts_payable: f64,
    #[serde(rename = "Inventory Cost")]
    pub inventory_cost: f64,
    #[serde(rename = "Debt Amounts")]
    pub debt_amount: f64,
}

/// Fixed header row of the persisted layout, in schema order. Must stay in
/// sync with the serde renames above: the CSV writer derives its header from
/// the struct, and this list is what an empty store reports as its schema.
pub const COLUMNS: [&str; 35] = [
    "Job Name",
    "Project Manager",
    "Insurance Carrier",
    "Lead Technician",
    "Technician Name",
    "Lead ID",
    "Referral Source",
    "Type of Lead",
    "Source of Lead",
    "EQ Used on Job",
    "Project Start Date",
    "Project End Date",
    "SCA Signature Date",
    "Lead Date",
    "Lead Status",
    "Seasonality Indicator",
    "Leads Converted to Signed Job",
    "Technician Hrs on Job",
    "Billable Tech Hours",
    "Billable Lead Tech Hours",
    "Billable PM Hours on Job",
    "Days EQ on a Job",
    "Total Available Hours",
    "Cost of Lead",
    "Revenue",
    "Direct Job Costs",
    "Overhead Costs",
    "CapEx",
    "Payments Made to Vendors or Staff",
    "Material or Subcontractor Costs",
    "Outstanding Customer Payments",
    "Accounts Receivable (AR)",
    "Accounts Payable (AP)",
    "Inventory Cost",
    "Debt Amounts",
];

/// Optional column: the entry form never collects it, so canonical files
/// don't carry it. It only appears in externally-edited files, and its
/// presence is what switches variance analysis on.
pub const BUDGETED_REVENUE_COLUMN: &str = "Budgeted Revenue";
