pub mod calculations;
pub mod calendar;
pub mod config;
pub mod forecast;
#[cfg(feature = "http_api")]
pub mod http_api;
pub mod persistence;
pub mod plan;
pub mod rates;
pub mod roles;

pub use calculations::staffing::{
    ForecastVolumes, StaffingCalculation, StaffingError, compute_required_roles,
    try_compute_required_roles,
};
pub use calendar::{
    CalendarError, DateWindow, PlanClock, TargetWindows, parse_plan_date, resolve_target_dates,
};
pub use config::{AppConfig, ConfigError, ShiftConfig, WmsConfig};
pub use forecast::{
    CustomerVolume, DayForecast, ForecastError, ForecastSource, StaticForecastSource,
    fetch_or_default,
};
#[cfg(feature = "sqlite")]
pub use persistence::sqlite::SqlitePlanStore;
pub use persistence::{
    PersistenceError, PlanStore, export_roles_to_csv, load_plans_from_json, load_roles_from_csv,
    save_plans_to_json,
};
pub use plan::{DailyPlan, Planner, StaffingPlan};
pub use rates::{RateError, RateTable};
pub use roles::{RequiredRoles, RolesValidationError, validate_roles, validate_roles_value};
