use std::{net::SocketAddr, sync::Arc};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::NaiveDate;
use parking_lot::RwLock;
use serde::Serialize;
use serde_json::json;

use crate::calendar::{CalendarError, PlanClock, TargetWindows, parse_plan_date};
use crate::persistence::{PersistenceError, PersistenceResult, PlanStore};
use crate::plan::{DailyPlan, Planner, StaffingPlan};
use crate::rates::{RateError, RateTable};

#[derive(Clone)]
pub struct AppState {
    planner: Arc<Planner>,
    store: Arc<dyn PlanStore>,
    rates: Arc<RwLock<RateTable>>,
    clock: PlanClock,
}

impl AppState {
    pub fn new(planner: Planner, store: Arc<dyn PlanStore>, rates: RateTable) -> Self {
        Self {
            planner: Arc::new(planner),
            store,
            rates: Arc::new(RwLock::new(rates)),
            clock: PlanClock::System,
        }
    }

    pub fn with_clock(mut self, clock: PlanClock) -> Self {
        self.clock = clock;
        self
    }

    fn rates_snapshot(&self) -> RateTable {
        self.rates.read().clone()
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

#[derive(Debug, Serialize)]
struct Envelope<T> {
    success: bool,
    data: T,
}

impl<T> Envelope<T> {
    fn ok(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data,
        })
    }
}

#[derive(Debug, Serialize)]
struct ScheduleResponse {
    success: bool,
    data: StaffingPlan,
    database_saves: DatabaseSaves,
}

#[derive(Debug, Serialize)]
struct DatabaseSaves {
    tomorrow: bool,
    day_after: bool,
}

#[derive(Debug)]
enum ApiError {
    NotFound(String),
    Invalid(String),
    Internal(String),
}

impl ApiError {
    fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }
}

impl From<CalendarError> for ApiError {
    fn from(value: CalendarError) -> Self {
        ApiError::Invalid(value.to_string())
    }
}

impl From<RateError> for ApiError {
    fn from(value: RateError) -> Self {
        ApiError::Invalid(value.to_string())
    }
}

impl From<PersistenceError> for ApiError {
    fn from(value: PersistenceError) -> Self {
        ApiError::Internal(value.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, "not_found", message),
            ApiError::Invalid(message) => (StatusCode::BAD_REQUEST, "invalid_request", message),
            ApiError::Internal(message) => {
                log::error!("request failed: {message}");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", message)
            }
        };
        (status, Json(ErrorBody { error, message })).into_response()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/", get(generate_schedule))
        .route("/api/schedule", get(generate_schedule))
        .route("/api/dates", get(target_dates))
        .route("/api/scheduled", get(list_scheduled))
        .route(
            "/api/scheduled/:date",
            get(get_scheduled).delete(delete_scheduled),
        )
        .route("/api/rates", get(get_rates).put(update_rates))
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, state: AppState) -> std::io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// Run a store operation on the blocking pool; SQLite calls are synchronous.
async fn with_store<T, F>(store: Arc<dyn PlanStore>, op: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&dyn PlanStore) -> PersistenceResult<T> + Send + 'static,
{
    tokio::task::spawn_blocking(move || op(store.as_ref()))
        .await
        .map_err(|err| ApiError::Internal(format!("plan store task failed: {err}")))?
        .map_err(ApiError::from)
}

fn save_day(store: &dyn PlanStore, plan: &DailyPlan) -> bool {
    match store.save_plan(plan) {
        Ok(()) => true,
        Err(err) => {
            log::error!("could not save staffing plan for {}: {err}", plan.date);
            false
        }
    }
}

async fn generate_schedule(
    State(state): State<AppState>,
) -> Result<Json<ScheduleResponse>, ApiError> {
    let rates = state.rates_snapshot();
    let plan = state.planner.plan(state.clock.today(), &rates).await;
    let days = (plan.tomorrow.clone(), plan.day_after.clone());
    let database_saves = with_store(state.store.clone(), move |store| {
        Ok(DatabaseSaves {
            tomorrow: save_day(store, &days.0),
            day_after: save_day(store, &days.1),
        })
    })
    .await?;
    Ok(Json(ScheduleResponse {
        success: true,
        data: plan,
        database_saves,
    }))
}

async fn target_dates(State(state): State<AppState>) -> Json<TargetWindows> {
    Json(state.clock.target_windows())
}

async fn list_scheduled(
    State(state): State<AppState>,
) -> Result<Json<Envelope<Vec<NaiveDate>>>, ApiError> {
    let dates = with_store(state.store.clone(), |store| store.list_dates()).await?;
    Ok(Envelope::ok(dates))
}

async fn get_scheduled(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<Envelope<DailyPlan>>, ApiError> {
    let date = parse_plan_date(&date)?;
    match with_store(state.store.clone(), move |store| store.load_plan(date)).await? {
        Some(plan) => Ok(Envelope::ok(plan)),
        None => Err(ApiError::not_found(format!("no staffing plan stored for {date}"))),
    }
}

async fn delete_scheduled(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<StatusCode, ApiError> {
    let date = parse_plan_date(&date)?;
    if !with_store(state.store.clone(), move |store| store.delete_plan(date)).await? {
        return Err(ApiError::not_found(format!("no staffing plan stored for {date}")));
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn get_rates(State(state): State<AppState>) -> Json<RateTable> {
    Json(state.rates_snapshot())
}

async fn update_rates(
    State(state): State<AppState>,
    Json(rates): Json<RateTable>,
) -> Result<Json<RateTable>, ApiError> {
    rates.validate()?;
    {
        let mut guard = state.rates.write();
        *guard = rates;
    }
    Ok(Json(state.rates_snapshot()))
}
