//! API Request/Response Types

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::errors::AppError;
use crate::models::types::{AddressProfile, ResolverStats};

/// API Response wrapper
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
    pub latency_ms: f64,
    pub timestamp: i64,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T, latency_ms: f64) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            latency_ms,
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}

impl ApiResponse<()> {
    pub fn error(error: ApiError, latency_ms: f64) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
            latency_ms,
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}

/// API Error
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Same request may succeed later without changes
    pub retryable: bool,
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self {
            code: err.code_str().to_string(),
            retryable: err.code.is_retryable(),
            details: std::error::Error::source(&err).map(|s| s.to_string()),
            message: err.message,
        }
    }
}

// ============================================
// Health
// ============================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthData {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub breaker_open: bool,
}

// ============================================
// Resolution
// ============================================

/// Single resolution; the address may be any JSON value
#[derive(Debug, Deserialize)]
pub struct ResolveRequest {
    #[serde(default)]
    pub address: serde_json::Value,
}

/// Batch resolution
#[derive(Debug, Deserialize)]
pub struct BatchResolveRequest {
    pub addresses: Vec<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct BatchResolveData {
    pub count: usize,
    pub profiles: HashMap<String, AddressProfile>,
}

// ============================================
// Name service
// ============================================

#[derive(Debug, Serialize)]
pub struct NameData {
    pub domain: String,
    pub address: Option<String>,
}

// ============================================
// Cache maintenance
// ============================================

pub type StatsData = ResolverStats;

#[derive(Debug, Serialize)]
pub struct PruneData {
    pub removed: usize,
}

#[derive(Debug, Serialize)]
pub struct ClearData {
    pub cleared: bool,
}
