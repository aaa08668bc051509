use crate::calculations::staffing::{ForecastVolumes, compute_required_roles};
use crate::calendar::{DateWindow, resolve_target_dates};
use crate::config::ShiftConfig;
use crate::forecast::{CustomerVolume, ForecastSource, fetch_or_default};
use crate::rates::RateTable;
use crate::roles::RequiredRoles;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPlan {
    pub date: NaiveDate,
    pub day_name: String,
    pub window: DateWindow,
    pub volumes: ForecastVolumes,
    pub required_roles: RequiredRoles,
    pub total_staff: u32,
    /// Open-order volume per customer; empty when the source has no breakdown.
    #[serde(default)]
    pub customers: Vec<CustomerVolume>,
}

impl DailyPlan {
    pub fn build(
        window: DateWindow,
        volumes: ForecastVolumes,
        shift: &ShiftConfig,
        rates: &RateTable,
    ) -> Self {
        let required_roles = compute_required_roles(shift, rates, &volumes);
        Self {
            date: window.date(),
            day_name: window.day_name(),
            window,
            volumes,
            total_staff: required_roles.total_staff(),
            required_roles,
            customers: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffingPlan {
    pub planned_on: NaiveDate,
    pub tomorrow: DailyPlan,
    pub day_after: DailyPlan,
}

impl StaffingPlan {
    pub fn days(&self) -> [&DailyPlan; 2] {
        [&self.tomorrow, &self.day_after]
    }
}

pub struct Planner {
    shift: ShiftConfig,
    source: Arc<dyn ForecastSource>,
}

impl Planner {
    pub fn new(shift: ShiftConfig, source: Arc<dyn ForecastSource>) -> Self {
        Self { shift, source }
    }

    /// Plan the next two working days after `today` using a snapshot of the rate table.
    pub async fn plan(&self, today: NaiveDate, rates: &RateTable) -> StaffingPlan {
        let windows = resolve_target_dates(today);
        let tomorrow = self.plan_day(windows.tomorrow, rates).await;
        let day_after = self.plan_day(windows.day_after, rates).await;
        log::info!(
            "planned {} ({} staff) and {} ({} staff)",
            tomorrow.date,
            tomorrow.total_staff,
            day_after.date,
            day_after.total_staff
        );
        StaffingPlan {
            planned_on: today,
            tomorrow,
            day_after,
        }
    }

    pub async fn plan_day(&self, window: DateWindow, rates: &RateTable) -> DailyPlan {
        let forecast = fetch_or_default(self.source.as_ref(), &window).await;
        let mut plan = DailyPlan::build(window, forecast.volumes, &self.shift, rates);
        plan.customers = forecast.customers;
        plan
    }
}
