use crate::plan::{DailyPlan, StaffingPlan};
use crate::roles::{self, RolesValidationError};
use chrono::NaiveDate;
use serde_json::Value;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("sqlite error: {0}")]
    Sqlite(String),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid data: {0}")]
    InvalidData(String),
    #[error("plan store lock poisoned")]
    LockPoisoned,
}

impl From<RolesValidationError> for PersistenceError {
    fn from(value: RolesValidationError) -> Self {
        Self::InvalidData(value.to_string())
    }
}

#[cfg(feature = "sqlite")]
impl From<rusqlite::Error> for PersistenceError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value.to_string())
    }
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Daily plans keyed by calendar date. Saving a date replaces whatever was stored for it.
pub trait PlanStore: Send + Sync {
    fn save_plan(&self, plan: &DailyPlan) -> PersistenceResult<()>;
    fn load_plan(&self, date: NaiveDate) -> PersistenceResult<Option<DailyPlan>>;
    fn delete_plan(&self, date: NaiveDate) -> PersistenceResult<bool>;
    fn list_dates(&self) -> PersistenceResult<Vec<NaiveDate>>;

    fn save_staffing_plan(&self, plan: &StaffingPlan) -> PersistenceResult<()> {
        for day in plan.days() {
            self.save_plan(day)?;
        }
        Ok(())
    }
}

/// Decode a stored plan document, rejecting role counts that fail validation.
pub fn plan_from_value(value: Value) -> PersistenceResult<DailyPlan> {
    let required_roles = value
        .get("required_roles")
        .ok_or_else(|| PersistenceError::InvalidData("plan is missing required_roles".into()))?;
    roles::validate_roles_value(required_roles)?;
    Ok(serde_json::from_value(value)?)
}

pub fn validate_plan(plan: &DailyPlan) -> PersistenceResult<()> {
    roles::validate_roles(&plan.required_roles)?;
    if plan.window.date() != plan.date {
        return Err(PersistenceError::InvalidData(format!(
            "plan for {} carries a window starting {}",
            plan.date, plan.window.start
        )));
    }
    Ok(())
}

pub mod file;
#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use file::{export_roles_to_csv, load_plans_from_json, load_roles_from_csv, save_plans_to_json};
