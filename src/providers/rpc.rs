//! RPC Client Module - Sui JSON-RPC
//!
//! 1. One call per request, bounded by a hard timeout (no retries)
//! 2. Typed failures: rate limited, timeout, transport, protocol
//! 3. HTTP 429 (or a protocol-level rate-limit code) trips the circuit breaker
//! 4. Process-wide monotonically increasing request ids
//! 5. Pluggable transport so tests can count and script upstream replies

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_ENCODING, CONTENT_TYPE, USER_AGENT};
use serde::Deserialize;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use super::circuit_breaker::CircuitBreaker;
use crate::models::errors::{AppError, AppResult, ErrorCode};
use crate::utils::constants::{
    DEFAULT_RPC_TIMEOUT_MS, JSONRPC_VERSION, METHOD_GET_OBJECT, METHOD_RESOLVE_NAME,
    USER_AGENT as USER_AGENT_CONST,
};

/// Request id counter shared by every client in the process
static REQUEST_ID: AtomicU64 = AtomicU64::new(0);

/// Next JSON-RPC request id (correlation only)
pub fn next_request_id() -> u64 {
    REQUEST_ID.fetch_add(1, Ordering::Relaxed) + 1
}

// ============================================
// WIRE TYPES
// ============================================

/// JSON-RPC response structure
#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<serde_json::Value>,
    #[serde(default)]
    error: Option<serde_json::Value>,
}

/// JSON-RPC error structure
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

impl RpcError {
    /// Rate limit signalled inside the envelope (code -32005 or message)
    pub fn is_rate_limit(&self) -> bool {
        self.code == -32005 || self.message.to_lowercase().contains("rate limit")
    }

    /// Upstream says the object is not there
    pub fn is_object_absent(&self) -> bool {
        let msg = self.message.to_lowercase();
        msg.contains("not exist") || msg.contains("not found") || msg.contains("deleted")
    }
}

/// Raw HTTP reply handed back by a transport
#[derive(Debug, Clone)]
pub struct HttpReply {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpReply {
    pub fn json(status: u16, body: &serde_json::Value) -> Self {
        Self {
            status,
            body: body.to_string().into_bytes(),
        }
    }
}

// ============================================
// FAILURES
// ============================================

/// Typed RPC failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RpcFailure {
    /// HTTP 429 or protocol-level rate limit
    RateLimited { message: String },
    /// Deadline exceeded, call abandoned
    Timeout { after: Duration },
    /// Connection failure, non-2xx status or unreadable body
    Transport { status: Option<u16>, message: String },
    /// Well-formed JSON-RPC error envelope, kept verbatim
    Protocol(RpcError),
}

impl RpcFailure {
    pub fn code(&self) -> ErrorCode {
        match self {
            RpcFailure::RateLimited { .. } => ErrorCode::UpstreamRateLimited,
            RpcFailure::Timeout { .. } => ErrorCode::UpstreamTimeout,
            RpcFailure::Transport { .. } => ErrorCode::UpstreamTransportError,
            RpcFailure::Protocol(_) => ErrorCode::UpstreamProtocolError,
        }
    }

    /// Diagnostic message; for protocol errors this is the upstream text as-is
    pub fn message(&self) -> String {
        match self {
            RpcFailure::RateLimited { message } => message.clone(),
            RpcFailure::Timeout { .. } => "Request timeout".to_string(),
            RpcFailure::Transport { message, .. } => message.clone(),
            RpcFailure::Protocol(err) => err.message.clone(),
        }
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(self, RpcFailure::RateLimited { .. })
    }

    /// Protocol reply saying there is no object at the address
    pub fn is_object_absent(&self) -> bool {
        matches!(self, RpcFailure::Protocol(err) if err.is_object_absent())
    }
}

impl fmt::Display for RpcFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RpcFailure::Timeout { after } => {
                write!(f, "[{}] Request timeout after {}ms", self.code().as_str(), after.as_millis())
            }
            RpcFailure::Transport {
                status: Some(status),
                message,
            } => write!(f, "[{}] {} (status {})", self.code().as_str(), message, status),
            RpcFailure::Protocol(err) => write!(
                f,
                "[{}] {} (code: {})",
                self.code().as_str(),
                err.message,
                err.code
            ),
            _ => write!(f, "[{}] {}", self.code().as_str(), self.message()),
        }
    }
}

impl std::error::Error for RpcFailure {}

impl From<RpcFailure> for AppError {
    fn from(failure: RpcFailure) -> Self {
        AppError::new(failure.code(), failure.message())
    }
}

/// Result of a single RPC call
pub type RpcResult = Result<serde_json::Value, RpcFailure>;

// ============================================
// TRANSPORT
// ============================================

/// Sends one JSON-RPC payload and returns the raw HTTP reply
#[async_trait]
pub trait RpcTransport: Send + Sync {
    async fn send(&self, payload: &serde_json::Value) -> Result<HttpReply, RpcFailure>;

    /// Endpoint description safe for logs
    fn endpoint(&self) -> String {
        "custom transport".to_string()
    }
}

/// reqwest-backed transport (gzip enabled)
#[derive(Clone)]
pub struct HttpTransport {
    url: String,
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(url: impl Into<String>) -> AppResult<Self> {
        Ok(Self {
            url: url.into(),
            client: Self::build_client()?,
        })
    }

    /// Build HTTP client with custom headers
    fn build_client() -> AppResult<reqwest::Client> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_CONST));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT_ENCODING, HeaderValue::from_static("gzip"));

        reqwest::Client::builder()
            .default_headers(headers)
            .gzip(true)
            .build()
            .map_err(|e| AppError::with_source(ErrorCode::ConfigInvalidValue, "Failed to build HTTP client", e))
    }

    /// Endpoint URL with credentials and query string hidden
    pub fn masked_url(&self) -> String {
        let base = self.url.split('?').next().unwrap_or_default();
        match base.split_once("/v2/") {
            Some((host, _)) => format!("{}/v2/***HIDDEN***", host),
            None => base.to_string(),
        }
    }
}

#[async_trait]
impl RpcTransport for HttpTransport {
    async fn send(&self, payload: &serde_json::Value) -> Result<HttpReply, RpcFailure> {
        let response = self
            .client
            .post(&self.url)
            .json(payload)
            .send()
            .await
            .map_err(|e| RpcFailure::Transport {
                status: None,
                message: format!("Request failed: {}", e),
            })?;

        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(|e| RpcFailure::Transport {
            status: Some(status),
            message: format!("Failed to read response: {}", e),
        })?;

        Ok(HttpReply {
            status,
            body: body.to_vec(),
        })
    }

    fn endpoint(&self) -> String {
        self.masked_url()
    }
}

// ============================================
// CLIENT
// ============================================

/// Single-call JSON-RPC client with a hard timeout.
///
/// The client never checks the breaker itself (the resolver gates before
/// calling), but it is the one that trips it on a rate-limit reply.
#[derive(Clone)]
pub struct RpcClient {
    transport: Arc<dyn RpcTransport>,
    breaker: Arc<CircuitBreaker>,
    timeout: Duration,
}

impl RpcClient {
    pub fn new(transport: Arc<dyn RpcTransport>, breaker: Arc<CircuitBreaker>) -> Self {
        Self {
            transport,
            breaker,
            timeout: Duration::from_millis(DEFAULT_RPC_TIMEOUT_MS),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Execute one JSON-RPC call
    pub async fn call(&self, method: &str, params: serde_json::Value) -> RpcResult {
        let id = next_request_id();
        let payload = serde_json::json!({
            "jsonrpc": JSONRPC_VERSION,
            "id": id,
            "method": method,
            "params": params,
        });

        debug!(id, method, endpoint = %self.transport.endpoint(), "➡️ RPC call");

        let result = match tokio::time::timeout(self.timeout, self.transport.send(&payload)).await {
            Ok(Ok(reply)) => Self::parse_reply(reply),
            Ok(Err(failure)) => Err(failure),
            Err(_) => Err(RpcFailure::Timeout { after: self.timeout }),
        };

        if let Err(failure) = &result {
            if failure.is_rate_limited() {
                self.breaker.trip();
            }
            if failure.is_object_absent() {
                debug!(id, method, "📭 No object: {}", failure);
            } else {
                warn!(id, method, "⚠️ RPC call failed: {}", failure);
            }
        }

        result
    }

    /// Map an HTTP reply onto the typed result
    fn parse_reply(reply: HttpReply) -> RpcResult {
        if reply.status == 429 {
            return Err(RpcFailure::RateLimited {
                message: "Rate limited by RPC".to_string(),
            });
        }
        if !(200..300).contains(&reply.status) {
            return Err(RpcFailure::Transport {
                status: Some(reply.status),
                message: format!("HTTP {}", reply.status),
            });
        }

        let response: RpcResponse =
            serde_json::from_slice(&reply.body).map_err(|e| RpcFailure::Transport {
                status: Some(reply.status),
                message: format!("Invalid response: {}", e),
            })?;

        if let Some(error) = response.error {
            let error: RpcError =
                serde_json::from_value(error).map_err(|e| RpcFailure::Transport {
                    status: Some(reply.status),
                    message: format!("Malformed error envelope: {}", e),
                })?;
            if error.is_rate_limit() {
                return Err(RpcFailure::RateLimited {
                    message: error.message,
                });
            }
            return Err(RpcFailure::Protocol(error));
        }

        Ok(response.result.unwrap_or(serde_json::Value::Null))
    }

    /// `sui_getObject` with type, owner, content and display
    pub async fn get_object(&self, address: &str) -> RpcResult {
        let params = serde_json::json!([
            address,
            {
                "showType": true,
                "showOwner": true,
                "showContent": true,
                "showDisplay": true,
            }
        ]);
        self.call(METHOD_GET_OBJECT, params).await
    }

    /// SuiNS lookup; `Ok(None)` when the name is not registered
    pub async fn resolve_name_service_address(&self, domain: &str) -> Result<Option<String>, RpcFailure> {
        let result = self.call(METHOD_RESOLVE_NAME, serde_json::json!([domain])).await?;
        Ok(result.as_str().map(str::to_string))
    }
}
