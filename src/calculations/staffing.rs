use crate::config::ShiftConfig;
use crate::rates::{self, RateError, RateTable};
use crate::roles::{InboundRoles, LoadingRoles, PickingRoles, ReplenishmentRoles, RequiredRoles};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CASES_PER_PALLET: f64 = 75.0;
pub const REPLENISHMENT_SHARE: f64 = 0.10;

/// Aggregated forecast quantities for one planning day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastVolumes {
    #[serde(default)]
    pub daily_incoming_pallets: f64,
    #[serde(default)]
    pub daily_shipping_pallets: f64,
    #[serde(default)]
    pub cases_to_pick: f64,
    #[serde(default)]
    pub staged_pallets: f64,
}

impl ForecastVolumes {
    pub fn new(incoming: f64, shipping: f64, cases: f64, staged: f64) -> Self {
        Self {
            daily_incoming_pallets: incoming,
            daily_shipping_pallets: shipping,
            cases_to_pick: cases,
            staged_pallets: staged,
        }
    }

    fn validate(&self) -> Result<(), StaffingError> {
        let fields = [
            ("daily_incoming_pallets", self.daily_incoming_pallets),
            ("daily_shipping_pallets", self.daily_shipping_pallets),
            ("cases_to_pick", self.cases_to_pick),
            ("staged_pallets", self.staged_pallets),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(StaffingError::InvalidVolume { name, value });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StaffingError {
    #[error("rate table has no '{0}' area")]
    MissingArea(&'static str),
    #[error("rate {area}.{name} is not configured and has no default")]
    MissingRate {
        area: &'static str,
        name: &'static str,
    },
    #[error(transparent)]
    InvalidRate(#[from] RateError),
    #[error("volume {name} must be finite and non-negative (got {value})")]
    InvalidVolume { name: &'static str, value: f64 },
    #[error("effective minutes per person must be positive (got {0})")]
    NonPositiveCapacity(f64),
    #[error("headcount for {0} is not a finite count")]
    NonFiniteHeadcount(&'static str),
}

/// Intermediate per-role counts before they are folded into operation areas.
#[derive(Debug, Default)]
struct RoleTally {
    forklift_driver_inbound: u32,
    scanner_inbound: u32,
    bendi_driver: u32,
    picker: u32,
    packer: u32,
    forklift_driver_loading: u32,
}

pub struct StaffingCalculation<'a> {
    shift: &'a ShiftConfig,
    rates: &'a RateTable,
}

impl<'a> StaffingCalculation<'a> {
    pub fn new(shift: &'a ShiftConfig, rates: &'a RateTable) -> Self {
        Self { shift, rates }
    }

    pub fn execute(&self, volumes: &ForecastVolumes) -> Result<RequiredRoles, StaffingError> {
        volumes.validate()?;
        let capacity = self.shift.effective_minutes_per_person();
        if !capacity.is_finite() || capacity <= 0.0 {
            return Err(StaffingError::NonPositiveCapacity(capacity));
        }

        let incoming = volumes.daily_incoming_pallets;
        let shipping = volumes.daily_shipping_pallets;
        let cases = volumes.cases_to_pick;
        let staged = volumes.staged_pallets;

        let mut tally = RoleTally::default();

        if self.rates.has_area(rates::INBOUND) && incoming > 0.0 {
            let offload = incoming * self.rate(rates::INBOUND, rates::AVG_OFFLOAD_TIME)?;
            let scan = incoming * self.rate(rates::INBOUND, rates::AVG_SCAN_TIME)?;
            let putaway = incoming * self.rate(rates::INBOUND, rates::AVG_PUTAWAY_TIME)?;

            tally.forklift_driver_inbound = headcount("forklift_driver_inbound", offload, capacity)?;
            tally.scanner_inbound = headcount("scanner_inbound", scan, capacity)?;
            tally.bendi_driver = headcount("bendi_driver", putaway, capacity)?;
        }

        if shipping > 0.0 || cases > 0.0 {
            if !self.rates.has_area(rates::PICKING) {
                return Err(StaffingError::MissingArea(rates::PICKING));
            }
            let floor_pick = cases * self.rate(rates::PICKING, rates::AVG_PICK_TIME_FLOOR)?;
            let bendi_pick = shipping * self.rate(rates::PICKING, rates::AVG_PICK_TIME_BENDI)?;
            let wrap = shipping * self.rate(rates::PICKING, rates::AVG_WRAP_TIME)?;
            let scan = cases * self.rate(rates::PICKING, rates::AVG_SCAN_TIME)?;

            // Replaces the putaway figure rather than adding to it.
            tally.bendi_driver = headcount("bendi_driver", bendi_pick, capacity)?;
            tally.picker = headcount("picker", floor_pick, capacity)?;
            tally.packer = headcount("packer", wrap + scan, capacity)?;
        }

        if self.rates.has_area(rates::LOAD) {
            let per_pallet = self.rate(rates::LOAD, rates::AVG_LOAD_TIME_PER_PALLET)?;

            if staged > 0.0 {
                tally.forklift_driver_loading =
                    headcount("forklift_driver_loading", staged * per_pallet, capacity)?;
            }

            // Staged and forecast pallets are each floored at one driver, then summed.
            let implied_pallets = (cases / CASES_PER_PALLET).round_ties_even();
            let forecast_pallets = shipping + implied_pallets;
            if forecast_pallets > 0.0 {
                let forecast_drivers =
                    headcount("forklift_driver_loading", forecast_pallets * per_pallet, capacity)?;
                tally.forklift_driver_loading =
                    tally.forklift_driver_loading.saturating_add(forecast_drivers);
            }
        }

        log::debug!("staffing tally for {volumes:?}: {tally:?}");
        Ok(assemble(&tally))
    }

    fn rate(&self, area: &'static str, name: &'static str) -> Result<f64, StaffingError> {
        self.rates
            .rate(area, name)?
            .ok_or(StaffingError::MissingRate { area, name })
    }
}

fn headcount(role: &'static str, minutes: f64, capacity: f64) -> Result<u32, StaffingError> {
    let rounded = (minutes / capacity).round_ties_even();
    if !rounded.is_finite() || rounded > f64::from(u32::MAX) {
        return Err(StaffingError::NonFiniteHeadcount(role));
    }
    Ok((rounded as u32).max(1))
}

fn replenishment_staff(total_headcount: u64) -> u32 {
    let share = (total_headcount as f64 * REPLENISHMENT_SHARE).round_ties_even();
    (share.min(f64::from(u32::MAX)) as u32).max(1)
}

fn assemble(tally: &RoleTally) -> RequiredRoles {
    let forklift_drivers =
        u64::from(tally.forklift_driver_inbound) + u64::from(tally.forklift_driver_loading);
    let scanners = u64::from(tally.scanner_inbound) + u64::from(tally.picker);
    let packers = u64::from(tally.packer);
    let bendi_drivers = u64::from(tally.bendi_driver);
    let total_headcount = forklift_drivers + scanners + packers + bendi_drivers;

    RequiredRoles {
        inbound: InboundRoles {
            forklift_driver: tally.forklift_driver_inbound,
            receiver: tally.scanner_inbound,
            bendi_driver: tally.bendi_driver,
        },
        picking: PickingRoles {
            bendi_driver: tally.bendi_driver,
            general_labor: tally.packer.saturating_add(tally.picker),
        },
        loading: LoadingRoles {
            forklift_driver: tally.forklift_driver_loading,
        },
        replenishment: ReplenishmentRoles {
            staff: replenishment_staff(total_headcount),
        },
    }
}

/// Typed inner stage: surfaces the first computation failure.
pub fn try_compute_required_roles(
    shift: &ShiftConfig,
    rates: &RateTable,
    volumes: &ForecastVolumes,
) -> Result<RequiredRoles, StaffingError> {
    StaffingCalculation::new(shift, rates).execute(volumes)
}

/// Never fails: a computation error is logged and replaced by [`RequiredRoles::fallback`].
pub fn compute_required_roles(
    shift: &ShiftConfig,
    rates: &RateTable,
    volumes: &ForecastVolumes,
) -> RequiredRoles {
    match try_compute_required_roles(shift, rates, volumes) {
        Ok(roles) => roles,
        Err(err) => {
            log::error!("staffing calculation failed, using fallback roles: {err}");
            RequiredRoles::fallback()
        }
    }
}
