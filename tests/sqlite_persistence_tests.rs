#![cfg(feature = "sqlite")]

use chrono::NaiveDate;
use rusqlite::{Connection, params};
use staffing_forecast::{
    DailyPlan, DateWindow, ForecastVolumes, PersistenceError, PlanStore, RateTable, ShiftConfig,
    SqlitePlanStore,
};
use tempfile::NamedTempFile;

fn d(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn plan_for(date: NaiveDate, volumes: ForecastVolumes) -> DailyPlan {
    DailyPlan::build(
        DateWindow::for_day(date),
        volumes,
        &ShiftConfig::default(),
        &RateTable::default(),
    )
}

#[test]
fn sqlite_store_round_trip_plan() {
    let file = NamedTempFile::new().unwrap();
    let store = SqlitePlanStore::new(file.path()).unwrap();
    let plan = plan_for(d(2025, 1, 6), ForecastVolumes::new(400.0, 200.0, 3000.0, 50.0));

    store.save_plan(&plan).expect("save plan");

    // Reopen to make sure the row hit disk.
    let reopened = SqlitePlanStore::new(file.path()).unwrap();
    let loaded = reopened
        .load_plan(d(2025, 1, 6))
        .expect("load plan")
        .expect("plan exists");
    assert_eq!(loaded, plan);
    assert_eq!(loaded.total_staff, 18);
}

#[test]
fn saving_same_date_replaces_previous_plan() {
    let store = SqlitePlanStore::in_memory().unwrap();
    store
        .save_plan(&plan_for(d(2025, 1, 6), ForecastVolumes::default()))
        .unwrap();
    let busier = plan_for(d(2025, 1, 6), ForecastVolumes::new(1000.0, 600.0, 9000.0, 300.0));
    store.save_plan(&busier).unwrap();

    assert_eq!(store.list_dates().unwrap(), vec![d(2025, 1, 6)]);
    assert_eq!(store.load_plan(d(2025, 1, 6)).unwrap(), Some(busier));
}

#[test]
fn list_and_delete_plans() {
    let store = SqlitePlanStore::in_memory().unwrap();
    for date in [d(2025, 1, 7), d(2025, 1, 6), d(2025, 1, 8)] {
        store
            .save_plan(&plan_for(date, ForecastVolumes::default()))
            .unwrap();
    }
    assert_eq!(
        store.list_dates().unwrap(),
        vec![d(2025, 1, 6), d(2025, 1, 7), d(2025, 1, 8)]
    );

    assert!(store.delete_plan(d(2025, 1, 7)).unwrap());
    assert!(!store.delete_plan(d(2025, 1, 7)).unwrap());
    assert_eq!(store.load_plan(d(2025, 1, 7)).unwrap(), None);
    assert_eq!(store.list_dates().unwrap().len(), 2);
}

#[test]
fn plan_with_mismatched_window_is_rejected() {
    let store = SqlitePlanStore::in_memory().unwrap();
    let mut plan = plan_for(d(2025, 1, 6), ForecastVolumes::default());
    plan.date = d(2025, 1, 9);
    assert!(matches!(
        store.save_plan(&plan),
        Err(PersistenceError::InvalidData(_))
    ));
}

#[test]
fn stored_plan_with_invalid_roles_fails_to_load() {
    let file = NamedTempFile::new().unwrap();
    let store = SqlitePlanStore::new(file.path()).unwrap();
    let plan = plan_for(d(2025, 1, 6), ForecastVolumes::default());
    store.save_plan(&plan).unwrap();

    let mut value = serde_json::to_value(&plan).unwrap();
    value["required_roles"]["replenishment"]["staff"] = serde_json::json!(0);
    let conn = Connection::open(file.path()).unwrap();
    conn.execute(
        "UPDATE daily_plans SET plan_json = ?1 WHERE plan_date = ?2",
        params![value.to_string(), "2025-01-06"],
    )
    .unwrap();
    drop(conn);

    let err = store.load_plan(d(2025, 1, 6)).unwrap_err();
    assert!(matches!(err, PersistenceError::InvalidData(_)));
    assert!(err.to_string().contains("replenishment.staff"));
}
