#[cfg(all(feature = "http_api", feature = "sqlite", feature = "wms"))]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use std::sync::Arc;

    use staffing_forecast::forecast::wms::WmsClient;
    use staffing_forecast::{AppConfig, Planner, RateTable, SqlitePlanStore, http_api};

    env_logger::init();

    let config = AppConfig::from_env()?;
    if config.wms.customer_ids.is_empty() {
        log::warn!("CUSTOMER_IDS is empty; order forecasts will be zero");
    }

    let store = SqlitePlanStore::new(&config.db_path)?;
    let planner = Planner::new(config.shift.clone(), Arc::new(WmsClient::new(config.wms.clone())));
    let state = http_api::AppState::new(planner, Arc::new(store), RateTable::default());

    log::info!("staffing-forecast HTTP API listening on http://{}", config.http_addr);
    http_api::serve(config.http_addr, state).await?;
    Ok(())
}

#[cfg(not(all(feature = "http_api", feature = "sqlite", feature = "wms")))]
fn main() {
    eprintln!("Rebuild with the `http_api`, `sqlite` and `wms` features to enable the HTTP server.");
}
