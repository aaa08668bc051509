use super::ForecastError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One inbound receipt expected during the planning window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptRow {
    pub receipt_id: String,
    pub customer: String,
    pub pallet_qty: f64,
}

/// One outbound order line from the order status report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRow {
    pub order_no: Option<String>,
    pub customer: String,
    pub status: String,
    pub pallet_qty: f64,
    pub order_qty: f64,
    pub picking_type: String,
}

/// Raw forecast rows for a single window, before aggregation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastRows {
    pub receipts: Vec<ReceiptRow>,
    pub open_orders: Vec<OrderRow>,
    pub staged_orders: Vec<OrderRow>,
}

const RECEIPT_PALLET_KEYS: [&str; 3] = ["palletQty", "totalPallets", "Pallet QTY"];

/// Quantities arrive as numbers or numeric strings; a missing or null field counts as zero.
pub fn quantity(field: &str, value: Option<&Value>) -> Result<f64, ForecastError> {
    let parsed = match value {
        None | Some(Value::Null) => return Ok(0.0),
        Some(Value::Number(number)) => number.as_f64(),
        Some(Value::String(text)) => text.trim().parse::<f64>().ok(),
        Some(_) => None,
    };
    parsed.filter(|v| v.is_finite()).ok_or_else(|| {
        ForecastError::Decode(format!(
            "{field} is not a number: {}",
            value.map(Value::to_string).unwrap_or_default()
        ))
    })
}

fn text(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

/// Parse the `receipts` array of an inbound receipt search response.
pub fn parse_receipt_rows(response: &Value) -> Vec<ReceiptRow> {
    let Some(receipts) = response.get("receipts").and_then(Value::as_array) else {
        return Vec::new();
    };
    receipts
        .iter()
        .filter(|receipt| receipt.is_object())
        .map(|receipt| {
            let receipt_id = text(receipt.get("id")).unwrap_or_default();
            let pallets = RECEIPT_PALLET_KEYS
                .iter()
                .find_map(|key| receipt.get(*key).map(|value| (*key, value)));
            let pallet_qty = match pallets {
                Some((key, value)) => quantity(key, Some(value)).unwrap_or_else(|err| {
                    log::warn!("receipt {receipt_id}: {err}; counting 0 pallets");
                    0.0
                }),
                None => 0.0,
            };
            ReceiptRow {
                receipt_id,
                customer: text(receipt.get("customerId")).unwrap_or_default(),
                pallet_qty,
            }
        })
        .collect()
}

/// Parse `results.data` of an order status report response for one customer.
/// A quantity that is present but not numeric rejects the whole batch.
pub fn parse_order_rows(customer: &str, response: &Value) -> Result<Vec<OrderRow>, ForecastError> {
    let Some(orders) = response
        .get("results")
        .and_then(|results| results.get("data"))
        .and_then(Value::as_array)
    else {
        return Ok(Vec::new());
    };
    orders
        .iter()
        .filter(|order| order.is_object())
        .map(|order| {
            Ok(OrderRow {
                order_no: text(order.get("Order No.")),
                customer: customer.to_string(),
                status: text(order.get("Order Status")).unwrap_or_else(|| "Unknown".to_string()),
                pallet_qty: quantity("Pallet QTY", order.get("Pallet QTY"))?,
                order_qty: quantity("Order QTY", order.get("Order QTY"))?,
                picking_type: text(order.get("Picking Type")).unwrap_or_default(),
            })
        })
        .collect()
}
