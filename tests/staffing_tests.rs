use staffing_forecast::rates::{self, RateTable};
use staffing_forecast::roles::{InboundRoles, LoadingRoles, PickingRoles, ReplenishmentRoles};
use staffing_forecast::{
    ForecastVolumes, RequiredRoles, ShiftConfig, StaffingError, compute_required_roles,
    try_compute_required_roles, validate_roles,
};

fn roles(
    inbound: (u32, u32, u32),
    picking: (u32, u32),
    loading: u32,
    staff: u32,
) -> RequiredRoles {
    RequiredRoles {
        inbound: InboundRoles {
            forklift_driver: inbound.0,
            receiver: inbound.1,
            bendi_driver: inbound.2,
        },
        picking: PickingRoles {
            bendi_driver: picking.0,
            general_labor: picking.1,
        },
        loading: LoadingRoles {
            forklift_driver: loading,
        },
        replenishment: ReplenishmentRoles { staff },
    }
}

fn compute(incoming: f64, shipping: f64, cases: f64, staged: f64) -> RequiredRoles {
    compute_required_roles(
        &ShiftConfig::default(),
        &RateTable::default(),
        &ForecastVolumes::new(incoming, shipping, cases, staged),
    )
}

#[test]
fn zero_volumes_need_only_replenishment() {
    let result = compute(0.0, 0.0, 0.0, 0.0);
    assert_eq!(result, roles((0, 0, 0), (0, 0), 0, 1));
    assert_eq!(result.total_staff(), 1);
}

#[test]
fn small_inbound_floors_each_active_role_at_one() {
    let result = compute(100.0, 0.0, 0.0, 0.0);
    assert_eq!(result, roles((1, 1, 1), (1, 0), 0, 1));
}

#[test]
fn mixed_day_matches_reference_counts() {
    let result = compute(400.0, 200.0, 3000.0, 50.0);
    assert_eq!(result, roles((3, 2, 1), (1, 6), 3, 2));
    assert_eq!(result.total_staff(), 18);
}

#[test]
fn heavy_day_scales_every_area() {
    let result = compute(1000.0, 600.0, 9000.0, 300.0);
    assert_eq!(result, roles((8, 4, 3), (3, 20), 8, 4));
}

#[test]
fn picking_bendi_replaces_putaway_bendi() {
    // 1000 incoming pallets alone would need 9 putaway drivers.
    let inbound_only = compute(1000.0, 0.0, 0.0, 0.0);
    assert_eq!(inbound_only.inbound.bendi_driver, 9);

    let with_picking = compute(1000.0, 10.0, 0.0, 0.0);
    assert_eq!(with_picking.inbound.bendi_driver, 1);
    assert_eq!(with_picking.picking.bendi_driver, 1);
}

#[test]
fn cases_imply_loading_pallets_once_they_round_up() {
    // 112 / 75 rounds to 1 pallet, 37 / 75 rounds to 0.
    assert_eq!(compute(0.0, 0.0, 112.0, 0.0), roles((0, 0, 1), (1, 2), 1, 1));
    assert_eq!(compute(0.0, 0.0, 37.0, 0.0), roles((0, 0, 1), (1, 2), 0, 1));
}

#[test]
fn staged_and_forecast_loading_are_floored_separately() {
    assert_eq!(compute(0.0, 0.0, 0.0, 500.0), roles((0, 0, 0), (0, 0), 4, 1));
    // 120 staged and 90 forecast pallets each come to one driver.
    assert_eq!(compute(0.0, 90.0, 0.0, 120.0), roles((0, 0, 1), (1, 2), 2, 1));
}

#[test]
fn missing_picking_area_with_demand_falls_back() {
    let mut table = RateTable::default();
    table.remove_area(rates::PICKING);
    let volumes = ForecastVolumes::new(0.0, 0.0, 10.0, 0.0);
    let shift = ShiftConfig::default();

    assert_eq!(
        try_compute_required_roles(&shift, &table, &volumes),
        Err(StaffingError::MissingArea(rates::PICKING))
    );
    assert_eq!(
        compute_required_roles(&shift, &table, &volumes),
        RequiredRoles::fallback()
    );
}

#[test]
fn missing_inbound_and_load_areas_skip_those_phases() {
    let result = compute_required_roles(
        &ShiftConfig::default(),
        &RateTable::empty(),
        &ForecastVolumes::new(10.0, 0.0, 0.0, 10.0),
    );
    assert_eq!(result, roles((0, 0, 0), (0, 0), 0, 1));
}

#[test]
fn absent_rate_uses_documented_default() {
    let mut table = RateTable::empty();
    table
        .set_rate(rates::INBOUND, rates::AVG_OFFLOAD_TIME, 3.0)
        .unwrap();
    let result = try_compute_required_roles(
        &ShiftConfig::default(),
        &table,
        &ForecastVolumes::new(400.0, 0.0, 0.0, 0.0),
    )
    .unwrap();
    assert_eq!(result.inbound, InboundRoles {
        forklift_driver: 3,
        receiver: 2,
        bendi_driver: 4,
    });
}

#[test]
fn invalid_volume_is_reported_and_falls_back() {
    let shift = ShiftConfig::default();
    let table = RateTable::default();
    let volumes = ForecastVolumes::new(-5.0, 0.0, 0.0, 0.0);
    assert!(matches!(
        try_compute_required_roles(&shift, &table, &volumes),
        Err(StaffingError::InvalidVolume {
            name: "daily_incoming_pallets",
            ..
        })
    ));
    assert_eq!(
        compute_required_roles(&shift, &table, &ForecastVolumes::new(f64::NAN, 0.0, 0.0, 0.0)),
        RequiredRoles::fallback()
    );
}

#[test]
fn zero_shift_capacity_is_rejected() {
    let shift = ShiftConfig::new(0.0, 0.8);
    assert_eq!(
        try_compute_required_roles(&shift, &RateTable::default(), &ForecastVolumes::default()),
        Err(StaffingError::NonPositiveCapacity(0.0))
    );
}

#[test]
fn shorter_shift_needs_more_people() {
    let volumes = ForecastVolumes::new(400.0, 0.0, 0.0, 0.0);
    let full = compute_required_roles(&ShiftConfig::default(), &RateTable::default(), &volumes);
    let half = compute_required_roles(&ShiftConfig::new(3.75, 0.8), &RateTable::default(), &volumes);
    assert!(half.inbound.forklift_driver > full.inbound.forklift_driver);
}

#[test]
fn computed_and_fallback_roles_pass_validation() {
    validate_roles(&RequiredRoles::fallback()).unwrap();
    validate_roles(&compute(400.0, 200.0, 3000.0, 50.0)).unwrap();
    assert_eq!(RequiredRoles::fallback().total_staff(), 15);
}
