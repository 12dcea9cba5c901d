//! Centralized Error Handling Module
//!
//! Every failure carries a unique error code so degraded answers can be traced
//! in logs and API responses.
//!
//! Error codes follow pattern: CATEGORY_SPECIFIC_ERROR
//! - UPSTREAM_xxx: RPC-related failures
//! - CFG_xxx: Configuration errors
//! - API_xxx: API errors

use std::fmt;

use crate::utils::constants::{MSG_CIRCUIT_OPEN, MSG_INVALID_INPUT};

/// Application-wide error type
#[derive(Debug)]
pub struct AppError {
    /// Unique error code for logging/monitoring
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Optional underlying error
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new AppError
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Create AppError with source error
    pub fn with_source(
        code: ErrorCode,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Get error code as string (for logging)
    pub fn code_str(&self) -> &'static str {
        self.code.as_str()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_ref().map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Unique error codes for monitoring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // ============================================
    // Resolution Errors
    // ============================================
    /// Empty, absent or non-string address
    InvalidInput,
    /// Circuit breaker is open, no call was made
    CircuitOpen,

    // ============================================
    // Upstream (RPC) Errors
    // ============================================
    /// Upstream rate limited us (HTTP 429)
    UpstreamRateLimited,
    /// RPC call exceeded its deadline
    UpstreamTimeout,
    /// Connection failure or non-2xx status
    UpstreamTransportError,
    /// Well-formed JSON-RPC error envelope
    UpstreamProtocolError,

    // ============================================
    // Configuration Errors
    // ============================================
    /// Invalid configuration value
    ConfigInvalidValue,

    // ============================================
    // API Errors
    // ============================================
    /// Invalid request format
    ApiBadRequest,
    /// Internal server error
    ApiInternalError,

    // ============================================
    // Generic Errors
    // ============================================
    /// Unknown error
    Unknown,
}

impl ErrorCode {
    /// Get string representation of error code
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidInput => "INVALID_INPUT",
            Self::CircuitOpen => "CIRCUIT_OPEN",

            Self::UpstreamRateLimited => "UPSTREAM_RATE_LIMITED",
            Self::UpstreamTimeout => "UPSTREAM_TIMEOUT",
            Self::UpstreamTransportError => "UPSTREAM_TRANSPORT_ERROR",
            Self::UpstreamProtocolError => "UPSTREAM_PROTOCOL_ERROR",

            Self::ConfigInvalidValue => "CFG_INVALID_VALUE",

            Self::ApiBadRequest => "API_BAD_REQUEST",
            Self::ApiInternalError => "API_INTERNAL_ERROR",

            Self::Unknown => "UNKNOWN_ERROR",
        }
    }

    /// Get HTTP status code for API responses
    pub fn http_status(&self) -> u16 {
        match self {
            Self::ApiBadRequest | Self::InvalidInput | Self::ConfigInvalidValue => 400,
            Self::UpstreamRateLimited => 429,
            Self::CircuitOpen => 503,
            Self::UpstreamTimeout => 504,
            Self::UpstreamTransportError | Self::UpstreamProtocolError => 502,
            _ => 500,
        }
    }

    /// Check if the next request may succeed without any change on our side
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::UpstreamTimeout
                | Self::UpstreamRateLimited
                | Self::UpstreamTransportError
                | Self::CircuitOpen
        )
    }
}

// ============================================
// Convenience constructors
// ============================================

impl AppError {
    /// Empty, absent or non-string address input
    pub fn invalid_input() -> Self {
        Self::new(ErrorCode::InvalidInput, MSG_INVALID_INPUT)
    }

    /// Breaker is open
    pub fn circuit_open() -> Self {
        Self::new(ErrorCode::CircuitOpen, MSG_CIRCUIT_OPEN)
    }

    /// Invalid configuration value
    pub fn invalid_config(key: &str, value: &str) -> Self {
        Self::new(
            ErrorCode::ConfigInvalidValue,
            format!("Invalid value for {}: {:?}", key, value),
        )
    }

    /// API bad request
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ApiBadRequest, msg)
    }
}

// ============================================
// Result type alias
// ============================================

/// Application Result type
pub type AppResult<T> = Result<T, AppError>;

// ============================================
// Conversion from common error types
// ============================================

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::with_source(ErrorCode::Unknown, "IO error", err)
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::new(ErrorCode::UpstreamTimeout, "Request timeout")
        } else {
            Self::new(ErrorCode::UpstreamTransportError, err.to_string())
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(ErrorCode::UpstreamTransportError, "JSON parse error", err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = AppError::circuit_open();
        assert_eq!(err.code, ErrorCode::CircuitOpen);
        assert_eq!(err.code_str(), "CIRCUIT_OPEN");
        assert_eq!(err.to_string(), "[CIRCUIT_OPEN] circuit breaker open");
        assert_eq!(AppError::invalid_input().message, "invalid input");
    }

    #[test]
    fn test_retryable() {
        assert!(ErrorCode::UpstreamTimeout.is_retryable());
        assert!(ErrorCode::UpstreamRateLimited.is_retryable());
        assert!(!ErrorCode::InvalidInput.is_retryable());
        assert!(!ErrorCode::UpstreamProtocolError.is_retryable());
    }

    #[test]
    fn test_http_status() {
        assert_eq!(ErrorCode::ApiBadRequest.http_status(), 400);
        assert_eq!(ErrorCode::UpstreamRateLimited.http_status(), 429);
        assert_eq!(ErrorCode::CircuitOpen.http_status(), 503);
        assert_eq!(ErrorCode::Unknown.http_status(), 500);
    }

    #[test]
    fn test_json_error_conversion() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: AppError = parse_err.into();
        assert_eq!(err.code, ErrorCode::UpstreamTransportError);
        assert!(std::error::Error::source(&err).is_some());
    }
}
