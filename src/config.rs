use serde::{Deserialize, Serialize};
use std::env;
use std::net::SocketAddr;
use thiserror::Error;

pub const DEFAULT_WMS_BASE_URL: &str = "https://wise.logisticsteam.com/v2/valleyview";
pub const DEFAULT_DB_PATH: &str = "./staffing.db";
pub const DEFAULT_HTTP_ADDR: &str = "0.0.0.0:3000";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("environment variable {key} has invalid value '{value}'")]
    InvalidValue { key: &'static str, value: String },
}

/// Shift parameters that turn throughput minutes into headcount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftConfig {
    pub hours_per_shift: f64,
    pub workforce_efficiency: f64,
    pub start_time: String,
    pub end_time: String,
    pub lunch_duration: String,
    pub location: String,
}

impl Default for ShiftConfig {
    fn default() -> Self {
        Self {
            hours_per_shift: 7.5,
            workforce_efficiency: 0.8,
            start_time: "6:00 AM".to_string(),
            end_time: "2:30 PM".to_string(),
            lunch_duration: "30 Mins".to_string(),
            location: "Buena Park, CA".to_string(),
        }
    }
}

impl ShiftConfig {
    pub fn new(hours_per_shift: f64, workforce_efficiency: f64) -> Self {
        Self {
            hours_per_shift,
            workforce_efficiency,
            ..Self::default()
        }
    }

    /// Productive minutes one person contributes per shift.
    pub fn effective_minutes_per_person(&self) -> f64 {
        self.hours_per_shift * 60.0 * self.workforce_efficiency
    }
}

/// Connection settings for the warehouse-management API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WmsConfig {
    pub base_url: String,
    pub api_key: String,
    pub facility_id: String,
    pub user: String,
    pub customer_ids: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub wms: WmsConfig,
    pub shift: ShiftConfig,
    pub db_path: String,
    pub http_addr: SocketAddr,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();
        Self::from_env_only()
    }

    /// Reads the process environment without consulting a `.env` file.
    pub fn from_env_only() -> Result<Self, ConfigError> {
        let defaults = ShiftConfig::default();
        let shift = ShiftConfig {
            hours_per_shift: parse_var("HOURS_PER_SHIFT", defaults.hours_per_shift)?,
            workforce_efficiency: parse_var("WORKFORCE_EFFICIENCY", defaults.workforce_efficiency)?,
            ..defaults
        };

        let wms = WmsConfig {
            base_url: env::var("WMS_BASE_URL").unwrap_or_else(|_| DEFAULT_WMS_BASE_URL.to_string()),
            api_key: env::var("WMS_API_KEY").unwrap_or_default(),
            facility_id: env::var("WMS_FACILITY_ID").unwrap_or_else(|_| "F1".to_string()),
            user: env::var("WMS_USER").unwrap_or_default(),
            customer_ids: parse_customer_ids(&env::var("CUSTOMER_IDS").unwrap_or_default()),
        };

        Ok(Self {
            wms,
            shift,
            db_path: env::var("DB_PATH").unwrap_or_else(|_| DEFAULT_DB_PATH.to_string()),
            http_addr: parse_var("STAFFING_HTTP_ADDR", default_http_addr())?,
        })
    }
}

fn default_http_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 3000))
}

fn parse_var<T: std::str::FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value: raw }),
        _ => Ok(default),
    }
}

/// Split a comma-separated customer list, trimming and dropping empty entries.
pub fn parse_customer_ids(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}
