// tests/analytics_flow.rs
//
// End-to-end scenarios through the real store: append records to a CSV file
// in a temp dir, load them back, and run the metrics engine over the result.

use restoration_tracker::engine::{self, ComputeError};
use restoration_tracker::record::JobRecord;
use restoration_tracker::store::{CsvStore, RecordStore};

fn job(name: &str) -> JobRecord {
    JobRecord {
        job_name: name.to_string(),
        ..JobRecord::default()
    }
}

#[tokio::test]
async fn fresh_store_reports_insufficient_data() {
    let dir = tempfile::tempdir().unwrap();
    let store = CsvStore::new(dir.path().join("jobs.csv"));

    let ds = store.load_all().await.unwrap();
    assert_eq!(engine::compute(&ds).unwrap_err(), ComputeError::InsufficientData);
}

#[tokio::test]
async fn single_job_produces_the_expected_working_capital_cycle() {
    let dir = tempfile::tempdir().unwrap();
    let store = CsvStore::new(dir.path().join("jobs.csv"));

    let mut r = job("Flood - Maple St");
    r.revenue = 1000.0;
    r.accounts_receivable = 100.0;
    r.accounts_payable = 50.0;
    r.direct_job_costs = 500.0;
    r.inventory_cost = 25.0;
    store.append(&r).await.unwrap();

    let ds = store.load_all().await.unwrap();
    let m = engine::compute(&ds).unwrap();
    assert_eq!(m.dso.values, vec![Some(3.0)]);
    assert_eq!(m.dpo.values, vec![Some(3.0)]);
    assert_eq!(m.dio.values, vec![Some(1.5)]);
    assert_eq!(m.ccc.values, vec![Some(1.5)]);
}

#[tokio::test]
async fn zero_cost_job_degrades_only_its_own_ratios() {
    let dir = tempfile::tempdir().unwrap();
    let store = CsvStore::new(dir.path().join("jobs.csv"));

    let mut healthy = job("Fire - Dock 4");
    healthy.revenue = 1000.0;
    healthy.accounts_receivable = 100.0;
    healthy.accounts_payable = 50.0;
    healthy.direct_job_costs = 500.0;
    healthy.inventory_cost = 25.0;
    store.append(&healthy).await.unwrap();

    let mut no_costs = job("Estimate only");
    no_costs.revenue = 200.0;
    no_costs.accounts_receivable = 20.0;
    no_costs.direct_job_costs = 0.0;
    store.append(&no_costs).await.unwrap();

    let ds = store.load_all().await.unwrap();
    let m = engine::compute(&ds).unwrap();

    // The degenerate record is undefined, the healthy one untouched.
    assert_eq!(m.dpo.values[1], None);
    assert_eq!(m.dio.values[1], None);
    assert_eq!(m.ccc.values[1], None);
    assert_eq!(m.ccc.values[0], Some(1.5));

    // Aggregates average the defined rows only.
    assert_eq!(m.ccc.average, Some(1.5));
}

#[tokio::test]
async fn utilization_and_roic_edge_cases_survive_the_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let store = CsvStore::new(dir.path().join("jobs.csv"));

    let mut r = job("Mold - Unit 12");
    r.revenue = 1000.0;
    r.direct_job_costs = 500.0;
    r.billable_tech_hours = 40;
    r.total_available_hours = 160;
    // CapEx and overhead both zero: ROIC has no invested capital.
    r.capex = 0.0;
    r.overhead_costs = 0.0;
    store.append(&r).await.unwrap();

    let ds = store.load_all().await.unwrap();
    let m = engine::compute(&ds).unwrap();
    assert_eq!(m.utilization_rate.values, vec![Some(25.0)]);
    assert_eq!(m.roic.values, vec![None]);
    assert_eq!(m.roic.average, None);
}

#[tokio::test]
async fn externally_budgeted_file_switches_variance_on() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("jobs.csv");
    std::fs::write(
        &path,
        "Job Name,Revenue,Direct Job Costs,Overhead Costs,CapEx,\
         Accounts Receivable (AR),Accounts Payable (AP),Inventory Cost,\
         Billable Tech Hours,Total Available Hours,Budgeted Revenue\n\
         Storm - Pier 9,1000,400,100,50,100,40,20,30,40,900\n\
         Roof - Elm Ave,2000,800,200,50,200,80,40,35,40,\n",
    )
    .unwrap();

    let store = CsvStore::new(&path);
    let ds = store.load_all().await.unwrap();
    let m = engine::compute(&ds).unwrap();

    let variance = m.variance.expect("budgeted column present");
    assert_eq!(variance.values, vec![Some(100.0), None]);
    assert_eq!(variance.average, Some(100.0));
}

#[tokio::test]
async fn stale_schema_file_is_a_fatal_mismatch() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("jobs.csv");
    // An old export that predates the AR column.
    std::fs::write(&path, "Job Name,Revenue,Direct Job Costs\nLegacy job,1000,400\n").unwrap();

    let store = CsvStore::new(&path);
    let ds = store.load_all().await.unwrap();
    assert_eq!(
        engine::compute(&ds).unwrap_err(),
        ComputeError::MissingColumn("Overhead Costs"),
    );
}

#[tokio::test]
async fn recomputation_over_unchanged_input_is_identical() {
    let dir = tempfile::tempdir().unwrap();
    let store = CsvStore::new(dir.path().join("jobs.csv"));

    let mut r = job("Flood - Maple St");
    r.revenue = 1234.56;
    r.accounts_receivable = 78.9;
    r.direct_job_costs = 1000.0;
    r.accounts_payable = 10.0;
    r.inventory_cost = 5.0;
    store.append(&r).await.unwrap();

    let first = engine::compute(&store.load_all().await.unwrap()).unwrap();
    let second = engine::compute(&store.load_all().await.unwrap()).unwrap();
    assert_eq!(first, second);
}
