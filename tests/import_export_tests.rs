use chrono::NaiveDate;
use staffing_forecast::{
    DailyPlan, DateWindow, ForecastVolumes, PersistenceError, RateTable, RequiredRoles,
    ShiftConfig, export_roles_to_csv, load_plans_from_json, load_roles_from_csv,
    save_plans_to_json,
};
use std::fs;
use tempfile::NamedTempFile;

fn d(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn sample_plans() -> Vec<DailyPlan> {
    let shift = ShiftConfig::default();
    let rates = RateTable::default();
    vec![
        DailyPlan::build(
            DateWindow::for_day(d(2025, 1, 6)),
            ForecastVolumes::new(400.0, 200.0, 3000.0, 50.0),
            &shift,
            &rates,
        ),
        DailyPlan::build(
            DateWindow::for_day(d(2025, 1, 7)),
            ForecastVolumes::new(0.0, 0.0, 112.0, 0.0),
            &shift,
            &rates,
        ),
    ]
}

#[test]
fn json_round_trip_preserves_plans() {
    let tmp = NamedTempFile::new().unwrap();
    let plans = sample_plans();
    save_plans_to_json(&plans, tmp.path()).unwrap();
    let loaded = load_plans_from_json(tmp.path()).unwrap();
    assert_eq!(loaded, plans);
}

#[test]
fn json_without_array_is_rejected() {
    let tmp = NamedTempFile::new().unwrap();
    fs::write(tmp.path(), r#"{"date": "2025-01-06"}"#).unwrap();
    assert!(matches!(
        load_plans_from_json(tmp.path()),
        Err(PersistenceError::InvalidData(_))
    ));
}

#[test]
fn json_with_negative_count_is_rejected() {
    let tmp = NamedTempFile::new().unwrap();
    let mut value = serde_json::to_value(sample_plans()).unwrap();
    value[0]["required_roles"]["picking"]["general_labor"] = serde_json::json!(-2);
    fs::write(tmp.path(), value.to_string()).unwrap();

    let err = load_plans_from_json(tmp.path()).unwrap_err();
    assert!(err.to_string().contains("picking.general_labor"));
}

#[test]
fn csv_export_writes_one_row_per_role() {
    let tmp = NamedTempFile::new().unwrap();
    export_roles_to_csv(&sample_plans(), tmp.path()).unwrap();
    let text = fs::read_to_string(tmp.path()).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("date,day_name,area,role,count"));
    assert_eq!(lines.clone().count(), 14);
    assert!(text.contains("2025-01-06,Monday,picking,general_labor,6"));
    assert!(text.contains("2025-01-07,Tuesday,replenishment,staff,1"));
}

#[test]
fn csv_round_trip_restores_roles() {
    let tmp = NamedTempFile::new().unwrap();
    let plans = sample_plans();
    export_roles_to_csv(&plans, tmp.path()).unwrap();

    let loaded = load_roles_from_csv(tmp.path()).unwrap();
    let expected: Vec<(NaiveDate, RequiredRoles)> = plans
        .iter()
        .map(|plan| (plan.date, plan.required_roles))
        .collect();
    assert_eq!(loaded.into_iter().collect::<Vec<_>>(), expected);
}

#[test]
fn csv_with_unknown_area_is_rejected() {
    let tmp = NamedTempFile::new().unwrap();
    fs::write(
        tmp.path(),
        "date,day_name,area,role,count\n2025-01-06,Monday,yard,spotter,2\n",
    )
    .unwrap();
    let err = load_roles_from_csv(tmp.path()).unwrap_err();
    assert!(err.to_string().contains("yard"));
}

#[test]
fn csv_missing_an_area_is_rejected() {
    let tmp = NamedTempFile::new().unwrap();
    fs::write(
        tmp.path(),
        "date,day_name,area,role,count\n2025-01-06,Monday,replenishment,staff,1\n",
    )
    .unwrap();
    let err = load_roles_from_csv(tmp.path()).unwrap_err();
    assert!(err.to_string().contains("missing operation area"));
}
