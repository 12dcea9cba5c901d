//! Type Inference Engine
//!
//! Maps the outcome of `sui_getObject` onto an address classification:
//!
//! | Outcome                                   | Type    | Confidence |
//! |-------------------------------------------|---------|------------|
//! | protocol error "not exist/found/deleted"  | ACCOUNT | medium     |
//! | result `{error: notExists / deleted}`     | ACCOUNT | medium     |
//! | any other failure                         | UNKNOWN | low        |
//! | success without `data`                    | UNKNOWN | low        |
//! | `data.type == "package"`                  | PACKAGE | high       |
//! | coin object type                          | OBJECT  | high       |
//! | qualified struct type                     | OBJECT  | high       |
//! | anything else                             | OBJECT  | medium     |

use serde::Serialize;
use serde_json::Value;

use crate::models::types::{AddressType, Confidence};
use crate::providers::rpc::{RpcFailure, RpcResult};
use crate::utils::address::canonical_type_tag;

/// Finer object classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubType {
    Coin,
    Other,
}

/// Result of inference over one RPC outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeInference {
    pub address_type: AddressType,
    pub confidence: Confidence,
    pub sub_type: Option<SubType>,
    pub reason: String,
    /// Declared object type, carried forward for coin objects
    pub object_type: Option<String>,
    /// `display.data.symbol`, when the object exposes one
    pub display_symbol: Option<String>,
}

impl TypeInference {
    fn new(address_type: AddressType, confidence: Confidence, reason: impl Into<String>) -> Self {
        Self {
            address_type,
            confidence,
            sub_type: None,
            reason: reason.into(),
            object_type: None,
            display_symbol: None,
        }
    }

    fn account() -> Self {
        Self::new(
            AddressType::Account,
            Confidence::Medium,
            "Object not found, likely an account address",
        )
    }

    pub fn is_coin(&self) -> bool {
        self.sub_type == Some(SubType::Coin)
    }
}

/// Whether a failure means "no object here" rather than "could not ask"
pub fn is_absence(failure: &RpcFailure) -> bool {
    failure.is_object_absent()
}

/// Whether a declared type is a coin object
pub fn is_coin_type(object_type: &str) -> bool {
    let canonical = canonical_type_tag(object_type);
    canonical.contains("::coin::coin<") || canonical.starts_with("0x2::coin::")
}

pub fn infer(result: &RpcResult) -> TypeInference {
    match result {
        Err(failure) if is_absence(failure) => TypeInference::account(),
        Err(failure) => TypeInference::new(
            AddressType::Unknown,
            Confidence::Low,
            format!("RPC error: {}", failure.message()),
        ),
        Ok(payload) => infer_payload(payload),
    }
}

fn infer_payload(payload: &Value) -> TypeInference {
    // Sui reports missing objects as a successful call with an error body
    if let Some(code) = payload.pointer("/error/code").and_then(Value::as_str) {
        if matches!(code, "notExists" | "deleted" | "dynamicFieldNotFound") {
            return TypeInference::account();
        }
    }

    let Some(data) = payload.get("data").filter(|d| d.is_object()) else {
        return TypeInference::new(AddressType::Unknown, Confidence::Low, "No data in response");
    };

    let object_type = data.get("type").and_then(Value::as_str).unwrap_or_default();
    let data_type = data.pointer("/content/dataType").and_then(Value::as_str);

    if object_type == "package" || data_type == Some("package") {
        return TypeInference::new(AddressType::Package, Confidence::High, "Object type is package");
    }

    let display_symbol = data
        .pointer("/display/data/symbol")
        .and_then(Value::as_str)
        .map(str::to_string);

    if is_coin_type(object_type) {
        return TypeInference {
            sub_type: Some(SubType::Coin),
            object_type: Some(object_type.to_string()),
            display_symbol,
            ..TypeInference::new(AddressType::Object, Confidence::High, "Object is a Coin")
        };
    }

    let (confidence, reason) = if object_type.contains("::") {
        (Confidence::High, "On-chain object")
    } else {
        (Confidence::Medium, "Generic on-chain object")
    };

    TypeInference {
        sub_type: Some(SubType::Other),
        object_type: (!object_type.is_empty()).then(|| object_type.to_string()),
        display_symbol,
        ..TypeInference::new(AddressType::Object, confidence, reason)
    }
}
