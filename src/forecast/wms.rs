//! HTTP client for the warehouse-management system's report endpoints.

use super::records::{self, ForecastRows, OrderRow, ReceiptRow};
use super::{DayForecast, ForecastError, ForecastSource, aggregate_volumes, customer_breakdown};
use crate::calendar::DateWindow;
use crate::config::WmsConfig;
use async_trait::async_trait;
use serde_json::{Value, json};

const RECEIPT_SEARCH_PATH: &str = "bam/inbound/receipt/search-by-paging";
const ORDER_STATUS_REPORT_PATH: &str = "report-center/outbound/order-status-report/search-by-paging";
const PAGE_LIMIT: u32 = 1000;
const WMS_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

pub const RECEIPT_STATUSES: [&str; 2] = ["Appointment Made", "In Yard"];
pub const OPEN_ORDER_STATUSES: [&str; 5] = ["Imported", "Open", "Planning", "Planned", "Committed"];
pub const STAGED_ORDER_STATUSES: [&str; 3] = ["Picked", "Packed", "Staged"];

pub struct WmsClient {
    client: reqwest::Client,
    config: WmsConfig,
}

impl WmsClient {
    pub fn new(config: WmsConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    async fn post(&self, path: &str, payload: &Value) -> Result<Value, ForecastError> {
        let resp = self
            .client
            .post(self.url(path))
            .header("authorization", self.config.api_key.as_str())
            .header("wise-facility-id", self.config.facility_id.as_str())
            .header("user", self.config.user.as_str())
            .json(payload)
            .send()
            .await
            .map_err(|e| ForecastError::Http(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(ForecastError::Status { status, body });
        }

        resp.json::<Value>()
            .await
            .map_err(|e| ForecastError::Decode(e.to_string()))
    }

    /// Receipts with an appointment inside the window, across every configured customer.
    /// A failed search is logged and treated as no receipts.
    pub async fn fetch_receipts(&self, window: &DateWindow) -> Vec<ReceiptRow> {
        let payload = json!({
            "appointmentTimeFrom": window.start.format(WMS_TIME_FORMAT).to_string(),
            "appointmentTimeTo": window.end.format(WMS_TIME_FORMAT).to_string(),
            "customerIds": self.config.customer_ids,
            "paging": { "pageNo": 1, "limit": PAGE_LIMIT },
            "statuses": RECEIPT_STATUSES,
        });
        let receipts = match self.post(RECEIPT_SEARCH_PATH, &payload).await {
            Ok(response) => records::parse_receipt_rows(&response),
            Err(err) => {
                log::warn!("inbound receipt search failed for {}: {err}", window.date());
                Vec::new()
            }
        };
        log::info!("retrieved {} inbound receipts for {}", receipts.len(), window.date());
        receipts
    }

    /// Regular orders scheduled inside the window in one of `statuses`.
    /// A customer whose report fails is logged and skipped.
    pub async fn fetch_orders(&self, window: &DateWindow, statuses: &[&str]) -> Vec<OrderRow> {
        let mut orders = Vec::new();
        for customer in &self.config.customer_ids {
            let payload = json!({
                "scheduleTimeFrom": window.start.format(WMS_TIME_FORMAT).to_string(),
                "scheduleTimeTo": window.end.format(WMS_TIME_FORMAT).to_string(),
                "customerId": customer,
                "orderTypes": ["Regular Order"],
                "paging": { "pageNo": 1, "limit": PAGE_LIMIT },
                "statuses": statuses,
            });
            let rows = self
                .post(ORDER_STATUS_REPORT_PATH, &payload)
                .await
                .and_then(|response| records::parse_order_rows(customer, &response));
            match rows {
                Ok(rows) => orders.extend(rows),
                Err(err) => log::warn!("order status report failed for {customer}: {err}"),
            }
        }
        log::info!(
            "retrieved {} orders ({}) for {}",
            orders.len(),
            statuses.join("/"),
            window.date()
        );
        orders
    }

    pub async fn fetch_rows(&self, window: &DateWindow) -> ForecastRows {
        ForecastRows {
            receipts: self.fetch_receipts(window).await,
            open_orders: self.fetch_orders(window, &OPEN_ORDER_STATUSES).await,
            staged_orders: self.fetch_orders(window, &STAGED_ORDER_STATUSES).await,
        }
    }
}

#[async_trait]
impl ForecastSource for WmsClient {
    async fn fetch_forecast(&self, window: &DateWindow) -> Result<DayForecast, ForecastError> {
        let rows = self.fetch_rows(window).await;
        Ok(DayForecast {
            volumes: aggregate_volumes(&rows)?,
            customers: customer_breakdown(&rows.open_orders)?,
        })
    }
}
