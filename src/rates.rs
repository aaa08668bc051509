use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

pub const INBOUND: &str = "inbound";
pub const PICKING: &str = "picking";
pub const LOAD: &str = "load";

pub const AVG_OFFLOAD_TIME: &str = "avg_offload_time";
pub const AVG_SCAN_TIME: &str = "avg_scan_time";
pub const AVG_PUTAWAY_TIME: &str = "avg_putaway_time";
pub const AVG_PICK_TIME_FLOOR: &str = "avg_pick_time_floor";
pub const AVG_PICK_TIME_BENDI: &str = "avg_pick_time_bendi";
pub const AVG_WRAP_TIME: &str = "avg_wrap_time";
pub const AVG_LOAD_TIME_PER_PALLET: &str = "avg_load_time_per_pallet";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RateError {
    #[error("rate {area}.{name} must be a finite, non-negative number of minutes (got {value})")]
    Invalid {
        area: String,
        name: String,
        value: f64,
    },
    #[error("unknown operation area '{0}' (expected inbound, picking, or load)")]
    UnknownArea(String),
}

/// Documented fallback for a rate that is absent from its area.
pub fn default_rate(area: &str, name: &str) -> Option<f64> {
    match (area, name) {
        (INBOUND, AVG_OFFLOAD_TIME) => Some(3.0),
        (INBOUND, AVG_SCAN_TIME) => Some(1.5),
        (INBOUND, AVG_PUTAWAY_TIME) => Some(3.25),
        (PICKING, AVG_PICK_TIME_FLOOR) => Some(0.4),
        (PICKING, AVG_PICK_TIME_BENDI) => Some(2.0),
        (PICKING, AVG_SCAN_TIME) => Some(0.15),
        (PICKING, AVG_WRAP_TIME) => Some(3.5),
        (LOAD, AVG_LOAD_TIME_PER_PALLET) => Some(3.0),
        _ => None,
    }
}

/// Minutes per unit (pallet or case) keyed by operation area, then by rate name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RateTable {
    areas: BTreeMap<String, BTreeMap<String, f64>>,
}

impl Default for RateTable {
    fn default() -> Self {
        let mut table = Self::empty();
        let defaults = [
            (INBOUND, AVG_OFFLOAD_TIME),
            (INBOUND, AVG_SCAN_TIME),
            (INBOUND, AVG_PUTAWAY_TIME),
            (PICKING, AVG_PICK_TIME_FLOOR),
            (PICKING, AVG_PICK_TIME_BENDI),
            (PICKING, AVG_SCAN_TIME),
            (PICKING, AVG_WRAP_TIME),
            (LOAD, AVG_LOAD_TIME_PER_PALLET),
        ];
        for (area, name) in defaults {
            if let Some(minutes) = default_rate(area, name) {
                table
                    .areas
                    .entry(area.to_string())
                    .or_default()
                    .insert(name.to_string(), minutes);
            }
        }
        table
    }
}

impl RateTable {
    pub fn empty() -> Self {
        Self {
            areas: BTreeMap::new(),
        }
    }

    pub fn has_area(&self, area: &str) -> bool {
        self.areas.contains_key(area)
    }

    pub fn area(&self, area: &str) -> Option<&BTreeMap<String, f64>> {
        self.areas.get(area)
    }

    pub fn areas(&self) -> impl Iterator<Item = &str> {
        self.areas.keys().map(String::as_str)
    }

    /// Rate configured for `area.name`, falling back to its documented default.
    /// Returns `None` only when the area is absent and no default exists.
    pub fn rate(&self, area: &str, name: &str) -> Result<Option<f64>, RateError> {
        let configured = self.areas.get(area).and_then(|rates| rates.get(name));
        match configured {
            Some(&value) => {
                check_minutes(area, name, value)?;
                Ok(Some(value))
            }
            None => Ok(default_rate(area, name)),
        }
    }

    pub fn set_rate(&mut self, area: &str, name: &str, minutes: f64) -> Result<(), RateError> {
        if !matches!(area, INBOUND | PICKING | LOAD) {
            return Err(RateError::UnknownArea(area.to_string()));
        }
        check_minutes(area, name, minutes)?;
        self.areas
            .entry(area.to_string())
            .or_default()
            .insert(name.to_string(), minutes);
        Ok(())
    }

    pub fn remove_area(&mut self, area: &str) -> bool {
        self.areas.remove(area).is_some()
    }

    /// Every configured rate must be a usable number of minutes.
    pub fn validate(&self) -> Result<(), RateError> {
        for (area, rates) in &self.areas {
            for (name, value) in rates {
                check_minutes(area, name, *value)?;
            }
        }
        Ok(())
    }
}

fn check_minutes(area: &str, name: &str, value: f64) -> Result<(), RateError> {
    if !value.is_finite() || value < 0.0 {
        return Err(RateError::Invalid {
            area: area.to_string(),
            name: name.to_string(),
            value,
        });
    }
    Ok(())
}
