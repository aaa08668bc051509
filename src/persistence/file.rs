use super::{PersistenceError, PersistenceResult};
use crate::calendar::{DATE_FORMAT, parse_plan_date};
use crate::plan::DailyPlan;
use crate::roles::{self, OPERATION_AREAS, RequiredRoles};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;

pub fn save_plans_to_json<P: AsRef<Path>>(plans: &[DailyPlan], path: P) -> PersistenceResult<()> {
    for plan in plans {
        super::validate_plan(plan)?;
    }
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, plans)?;
    Ok(())
}

pub fn load_plans_from_json<P: AsRef<Path>>(path: P) -> PersistenceResult<Vec<DailyPlan>> {
    let file = File::open(path)?;
    let value: Value = serde_json::from_reader(file)?;
    let Value::Array(items) = value else {
        return Err(PersistenceError::InvalidData(
            "plan file must contain a JSON array".into(),
        ));
    };
    items.into_iter().map(super::plan_from_value).collect()
}

#[derive(Debug, Serialize, Deserialize)]
struct RoleCsvRecord {
    date: String,
    day_name: String,
    area: String,
    role: String,
    count: u32,
}

/// One row per date, operation area and role.
pub fn export_roles_to_csv<P: AsRef<Path>>(plans: &[DailyPlan], path: P) -> PersistenceResult<()> {
    let file = File::create(path)?;
    let mut writer = csv::Writer::from_writer(file);
    for plan in plans {
        super::validate_plan(plan)?;
        for (area, role, count) in plan.required_roles.entries() {
            writer.serialize(RoleCsvRecord {
                date: plan.date.format(DATE_FORMAT).to_string(),
                day_name: plan.day_name.clone(),
                area: area.to_string(),
                role: role.to_string(),
                count,
            })?;
        }
    }
    writer.flush()?;
    Ok(())
}

/// Rebuild per-date role counts from a CSV written by [`export_roles_to_csv`].
pub fn load_roles_from_csv<P: AsRef<Path>>(
    path: P,
) -> PersistenceResult<BTreeMap<NaiveDate, RequiredRoles>> {
    let file = File::open(path)?;
    let mut reader = csv::Reader::from_reader(file);
    let mut documents: BTreeMap<NaiveDate, Map<String, Value>> = BTreeMap::new();

    for record in reader.deserialize::<RoleCsvRecord>() {
        let record = record?;
        let date = parse_plan_date(&record.date)
            .map_err(|err| PersistenceError::InvalidData(err.to_string()))?;
        if !OPERATION_AREAS.contains(&record.area.as_str()) {
            return Err(PersistenceError::InvalidData(format!(
                "unknown operation area '{}'",
                record.area
            )));
        }
        let areas = documents.entry(date).or_default();
        let roles = areas
            .entry(record.area)
            .or_insert_with(|| Value::Object(Map::new()));
        if let Value::Object(roles) = roles {
            roles.insert(record.role, Value::from(record.count));
        }
    }

    if documents.is_empty() {
        return Err(PersistenceError::InvalidData(
            "CSV file contained no role rows".into(),
        ));
    }

    let mut loaded = BTreeMap::new();
    for (date, areas) in documents {
        let value = Value::Object(areas);
        roles::validate_roles_value(&value)?;
        loaded.insert(date, serde_json::from_value(value)?);
    }
    Ok(loaded)
}
