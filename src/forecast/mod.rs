//! Forecast volumes for a planning window.
//!
//! The calculator never talks to the warehouse system directly; it receives a
//! [`DayForecast`] from a [`ForecastSource`]. Fetch failures are absorbed by
//! [`fetch_or_default`], which hands the calculator zero volumes instead.

use crate::calculations::staffing::ForecastVolumes;
use crate::calendar::DateWindow;
use async_trait::async_trait;
use chrono::NaiveDate;
use polars::prelude::PolarsError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

pub mod aggregate;
pub mod records;
#[cfg(feature = "wms")]
pub mod wms;

pub use aggregate::{CustomerVolume, aggregate_volumes, customer_breakdown};
pub use records::{ForecastRows, OrderRow, ReceiptRow};

#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("forecast request failed: {0}")]
    Http(String),
    #[error("forecast service returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("could not decode forecast response: {0}")]
    Decode(String),
    #[error("could not aggregate forecast rows: {0}")]
    Aggregate(#[from] PolarsError),
}

/// Volumes for one window plus the open-order split by customer, when the source has one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DayForecast {
    pub volumes: ForecastVolumes,
    #[serde(default)]
    pub customers: Vec<CustomerVolume>,
}

impl From<ForecastVolumes> for DayForecast {
    fn from(volumes: ForecastVolumes) -> Self {
        Self {
            volumes,
            customers: Vec::new(),
        }
    }
}

#[async_trait]
pub trait ForecastSource: Send + Sync {
    async fn fetch_forecast(&self, window: &DateWindow) -> Result<DayForecast, ForecastError>;
}

pub async fn fetch_or_default(source: &dyn ForecastSource, window: &DateWindow) -> DayForecast {
    match source.fetch_forecast(window).await {
        Ok(forecast) => forecast,
        Err(err) => {
            log::warn!(
                "forecast for {} unavailable, planning with zero volumes: {err}",
                window.date()
            );
            DayForecast::default()
        }
    }
}

/// Fixed forecasts per date, for offline runs and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticForecastSource {
    by_date: BTreeMap<NaiveDate, DayForecast>,
    fallback: ForecastVolumes,
}

impl StaticForecastSource {
    pub fn new(fallback: ForecastVolumes) -> Self {
        Self {
            by_date: BTreeMap::new(),
            fallback,
        }
    }

    pub fn with_day(mut self, date: NaiveDate, forecast: impl Into<DayForecast>) -> Self {
        self.by_date.insert(date, forecast.into());
        self
    }
}

#[async_trait]
impl ForecastSource for StaticForecastSource {
    async fn fetch_forecast(&self, window: &DateWindow) -> Result<DayForecast, ForecastError> {
        Ok(self
            .by_date
            .get(&window.date())
            .cloned()
            .unwrap_or_else(|| self.fallback.into()))
    }
}
