use super::records::{ForecastRows, OrderRow, ReceiptRow};
use crate::calculations::staffing::ForecastVolumes;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerVolume {
    pub customer: String,
    pub shipping_pallets: f64,
    pub cases_to_pick: f64,
}

pub fn orders_frame(orders: &[OrderRow]) -> PolarsResult<DataFrame> {
    let customers: Vec<&str> = orders.iter().map(|o| o.customer.as_str()).collect();
    let statuses: Vec<&str> = orders.iter().map(|o| o.status.as_str()).collect();
    let pallets: Vec<f64> = orders.iter().map(|o| o.pallet_qty).collect();
    let cases: Vec<f64> = orders.iter().map(|o| o.order_qty).collect();

    DataFrame::new(vec![
        Series::new(PlSmallStr::from_static("customer"), customers).into_column(),
        Series::new(PlSmallStr::from_static("status"), statuses).into_column(),
        Series::new(PlSmallStr::from_static("pallet_qty"), pallets).into_column(),
        Series::new(PlSmallStr::from_static("order_qty"), cases).into_column(),
    ])
}

pub fn receipts_frame(receipts: &[ReceiptRow]) -> PolarsResult<DataFrame> {
    let customers: Vec<&str> = receipts.iter().map(|r| r.customer.as_str()).collect();
    let pallets: Vec<f64> = receipts.iter().map(|r| r.pallet_qty).collect();

    DataFrame::new(vec![
        Series::new(PlSmallStr::from_static("customer"), customers).into_column(),
        Series::new(PlSmallStr::from_static("pallet_qty"), pallets).into_column(),
    ])
}

fn column_sum(df: &DataFrame, name: &str) -> PolarsResult<f64> {
    Ok(df.column(name)?.f64()?.sum().unwrap_or(0.0))
}

/// Collapse raw rows into the four volumes the calculator consumes.
pub fn aggregate_volumes(rows: &ForecastRows) -> PolarsResult<ForecastVolumes> {
    let receipts = receipts_frame(&rows.receipts)?;
    let open = orders_frame(&rows.open_orders)?;
    let staged = orders_frame(&rows.staged_orders)?;

    Ok(ForecastVolumes {
        daily_incoming_pallets: column_sum(&receipts, "pallet_qty")?,
        daily_shipping_pallets: column_sum(&open, "pallet_qty")?,
        cases_to_pick: column_sum(&open, "order_qty")?,
        staged_pallets: column_sum(&staged, "pallet_qty")?,
    })
}

/// Open-order pallets and cases per customer, sorted by customer id.
pub fn customer_breakdown(orders: &[OrderRow]) -> PolarsResult<Vec<CustomerVolume>> {
    let grouped = orders_frame(orders)?
        .lazy()
        .group_by([col("customer")])
        .agg([col("pallet_qty").sum(), col("order_qty").sum()])
        .sort(["customer"], SortMultipleOptions::default())
        .collect()?;

    let customers = grouped.column("customer")?.str()?;
    let pallets = grouped.column("pallet_qty")?.f64()?;
    let cases = grouped.column("order_qty")?.f64()?;

    let mut breakdown = Vec::with_capacity(grouped.height());
    for idx in 0..grouped.height() {
        breakdown.push(CustomerVolume {
            customer: customers.get(idx).unwrap_or_default().to_string(),
            shipping_pallets: pallets.get(idx).unwrap_or(0.0),
            cases_to_pick: cases.get(idx).unwrap_or(0.0),
        });
    }
    Ok(breakdown)
}
