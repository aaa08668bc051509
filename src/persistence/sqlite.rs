use super::{PersistenceError, PersistenceResult, PlanStore};
use crate::calendar::{DATE_FORMAT, parse_plan_date};
use crate::plan::DailyPlan;
use chrono::{NaiveDate, Utc};
use rusqlite::{Connection, OptionalExtension, params};
use std::sync::{Mutex, MutexGuard};

pub struct SqlitePlanStore {
    connection: Mutex<Connection>,
}

impl SqlitePlanStore {
    pub fn new<P: AsRef<std::path::Path>>(path: P) -> PersistenceResult<Self> {
        let connection = Connection::open(path)?;
        Self::from_connection(connection)
    }

    pub fn in_memory() -> PersistenceResult<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(connection: Connection) -> PersistenceResult<Self> {
        Self::initialize_schema(&connection)?;
        Ok(Self {
            connection: Mutex::new(connection),
        })
    }

    fn initialize_schema(connection: &Connection) -> PersistenceResult<()> {
        let ddl = r#"
            CREATE TABLE IF NOT EXISTS daily_plans (
                plan_date TEXT PRIMARY KEY,
                day_name TEXT NOT NULL,
                total_staff INTEGER NOT NULL,
                plan_json TEXT NOT NULL,
                saved_at TEXT NOT NULL
            );
        "#;
        connection.execute_batch(ddl)?;
        Ok(())
    }

    fn lock(&self) -> PersistenceResult<MutexGuard<'_, Connection>> {
        self.connection
            .lock()
            .map_err(|_| PersistenceError::LockPoisoned)
    }
}

fn date_key(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

impl PlanStore for SqlitePlanStore {
    fn save_plan(&self, plan: &DailyPlan) -> PersistenceResult<()> {
        super::validate_plan(plan)?;
        let json = serde_json::to_string(plan)?;
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO daily_plans (plan_date, day_name, total_staff, plan_json, saved_at)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(plan_date) DO UPDATE SET
                day_name = excluded.day_name,
                total_staff = excluded.total_staff,
                plan_json = excluded.plan_json,
                saved_at = excluded.saved_at",
            params![
                date_key(plan.date),
                plan.day_name,
                plan.total_staff,
                json,
                Utc::now().to_rfc3339()
            ],
        )?;
        log::info!(
            "saved staffing plan for {} ({} staff)",
            plan.date,
            plan.total_staff
        );
        Ok(())
    }

    fn load_plan(&self, date: NaiveDate) -> PersistenceResult<Option<DailyPlan>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare("SELECT plan_json FROM daily_plans WHERE plan_date = ?1")?;
        let json: Option<String> = stmt
            .query_row(params![date_key(date)], |row| row.get(0))
            .optional()?;

        let Some(json) = json else {
            return Ok(None);
        };
        let plan = super::plan_from_value(serde_json::from_str(&json)?)?;
        Ok(Some(plan))
    }

    fn delete_plan(&self, date: NaiveDate) -> PersistenceResult<bool> {
        let conn = self.lock()?;
        let removed = conn.execute(
            "DELETE FROM daily_plans WHERE plan_date = ?1",
            params![date_key(date)],
        )?;
        Ok(removed > 0)
    }

    fn list_dates(&self) -> PersistenceResult<Vec<NaiveDate>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare("SELECT plan_date FROM daily_plans ORDER BY plan_date ASC")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut dates = Vec::new();
        for key in rows {
            let key = key?;
            let date = parse_plan_date(&key)
                .map_err(|err| PersistenceError::InvalidData(err.to_string()))?;
            dates.push(date);
        }
        Ok(dates)
    }
}
