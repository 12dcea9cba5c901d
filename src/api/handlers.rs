//! API Request Handlers

use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

use super::types::*;
use crate::core::resolver::Resolver;
use crate::models::errors::AppError;
use crate::models::types::AddressProfile;
use crate::utils::constants::{APP_VERSION, MAX_API_BATCH_SIZE};

type ApiResult<T> = Result<Json<ApiResponse<T>>, (StatusCode, Json<ApiResponse<()>>)>;

/// Shared application state
pub struct AppState {
    pub resolver: Arc<Resolver>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(resolver: Arc<Resolver>) -> Self {
        Self {
            resolver,
            start_time: Instant::now(),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

fn ok<T: serde::Serialize>(data: T, start: Instant) -> ApiResult<T> {
    Ok(Json(ApiResponse::success(data, elapsed_ms(start))))
}

/// Error tuple with the status the error code maps to
fn api_error(err: AppError, start: Instant) -> (StatusCode, Json<ApiResponse<()>>) {
    let status = StatusCode::from_u16(err.code.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(ApiResponse::error(err.into(), elapsed_ms(start))))
}

// ============================================
// Health Check
// ============================================

pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<ApiResponse<HealthData>> {
    let start = Instant::now();

    let data = HealthData {
        status: "healthy".to_string(),
        version: APP_VERSION.to_string(),
        uptime_seconds: state.uptime_seconds(),
        breaker_open: state.resolver.breaker().snapshot().is_open,
    };

    Json(ApiResponse::success(data, elapsed_ms(start)))
}

// ============================================
// Resolution
// ============================================

pub async fn get_profile(
    State(state): State<Arc<AppState>>,
    Path(address): Path<String>,
) -> ApiResult<AddressProfile> {
    let start = Instant::now();
    let profile = state.resolver.resolve(&address).await;
    ok(profile, start)
}

pub async fn resolve(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ResolveRequest>,
) -> ApiResult<AddressProfile> {
    let start = Instant::now();
    let profile = state.resolver.resolve_value(&req.address).await;
    ok(profile, start)
}

pub async fn resolve_batch(
    State(state): State<Arc<AppState>>,
    Json(req): Json<BatchResolveRequest>,
) -> ApiResult<BatchResolveData> {
    let start = Instant::now();

    if req.addresses.len() > MAX_API_BATCH_SIZE {
        warn!("Batch rejected: {} addresses", req.addresses.len());
        return Err(api_error(
            AppError::bad_request(format!("Maximum {} addresses per batch", MAX_API_BATCH_SIZE)),
            start,
        ));
    }

    let addresses: Vec<String> = req
        .addresses
        .iter()
        .filter_map(|v| v.as_str().map(str::to_string))
        .collect();

    let profiles = state.resolver.resolve_many(addresses).await;
    info!(
        "📦 Batch resolved: {} of {} inputs in {:.1}ms",
        profiles.len(),
        req.addresses.len(),
        elapsed_ms(start)
    );

    ok(
        BatchResolveData {
            count: profiles.len(),
            profiles,
        },
        start,
    )
}

// ============================================
// Name service
// ============================================

pub async fn resolve_name(
    State(state): State<Arc<AppState>>,
    Path(domain): Path<String>,
) -> ApiResult<NameData> {
    let start = Instant::now();
    let address = state.resolver.resolve_name(&domain).await;
    ok(NameData { domain, address }, start)
}

// ============================================
// Cache maintenance
// ============================================

pub async fn get_stats(State(state): State<Arc<AppState>>) -> ApiResult<StatsData> {
    let start = Instant::now();
    ok(state.resolver.stats(), start)
}

pub async fn clear_cache(State(state): State<Arc<AppState>>) -> ApiResult<ClearData> {
    let start = Instant::now();
    state.resolver.clear_cache();
    ok(ClearData { cleared: true }, start)
}

pub async fn prune_cache(State(state): State<Arc<AppState>>) -> ApiResult<PruneData> {
    let start = Instant::now();
    let removed = state.resolver.prune_expired_cache();
    ok(PruneData { removed }, start)
}
