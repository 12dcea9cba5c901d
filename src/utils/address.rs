//! Address normalization and format helpers.
//!
//! Sui addresses show up in several spellings:
//! - Short form: "0x2"
//! - Full form: "0x0000000000000000000000000000000000000000000000000000000000000002"
//! - Abbreviated display form used by explorers: "0x5306...fb6a"
//!
//! `normalize_address` only trims and lowercases. Short/full equivalence is
//! resolved by the whitelist through `short_form`, with exact equality.

use regex::{Captures, Regex};
use std::collections::HashSet;

/// Length of a full address body in hex characters
pub const FULL_ADDRESS_HEX_LEN: usize = 64;

lazy_static::lazy_static! {
    /// `0x` + hex at an identifier boundary, in a lowercased type string
    static ref EMBEDDED_ADDRESS: Regex =
        Regex::new(r"(^|[^a-z0-9_])0x([0-9a-f]+)").expect("embedded address pattern");

    /// `0x` + hex, optionally followed by an explorer-style `...` tail
    static ref ADDRESS_CANDIDATE: Regex =
        Regex::new(r"(?i)0x[0-9a-f]+(?:\.\.\.[0-9a-f]+)?").expect("address candidate pattern");
}

/// Canonicalize raw input: trimmed and lowercased. `None` for empty input.
pub fn normalize_address(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_lowercase())
}

/// Normalize an arbitrary JSON value. Anything other than a non-empty string
/// is invalid input.
pub fn normalize_value(raw: &serde_json::Value) -> Option<String> {
    raw.as_str().and_then(normalize_address)
}

/// Whether a normalized input is a Move type string (`0x2::sui::SUI`)
/// rather than an address.
#[inline]
pub fn is_type_string(input: &str) -> bool {
    input.contains("::")
}

/// Hex body of a `0x`-prefixed address, if it is one.
fn hex_body(address: &str) -> Option<&str> {
    let body = address
        .strip_prefix("0x")
        .or_else(|| address.strip_prefix("0X"))?;
    if body.is_empty() || !body.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    Some(body)
}

/// Leading-zero-stripped form of a hex address.
///
/// `0x000...02` becomes `0x2`, all zeros become `0x0`. Returns `None` for
/// anything that is not `0x` followed by hex digits.
pub fn short_form(address: &str) -> Option<String> {
    let body = hex_body(address)?;
    let digits = body.trim_start_matches('0');
    let digits = if digits.is_empty() { "0" } else { digits };
    Some(format!("0x{}", digits.to_lowercase()))
}

/// Whether the address carries leading zero padding (`0x0002`, full 64-char forms of `0x2`).
pub fn is_zero_padded(address: &str) -> bool {
    hex_body(address)
        .map(|body| body.len() > 1 && body.starts_with('0'))
        .unwrap_or(false)
}

/// Lowercase a type string and rewrite every embedded address to its short
/// form, so differently padded spellings of the same type compare equal.
pub fn canonical_type_tag(type_str: &str) -> String {
    let lower = type_str.trim().to_lowercase();
    EMBEDDED_ADDRESS
        .replace_all(&lower, |caps: &Captures| {
            let digits = caps[2].trim_start_matches('0');
            format!("{}0x{}", &caps[1], if digits.is_empty() { "0" } else { digits })
        })
        .into_owned()
}

// ============================================
// FORMAT VALIDATION (scanning helpers)
// ============================================

/// Full 64-hex-character address
fn is_standard_format(s: &str) -> bool {
    match hex_body(s) {
        Some(body) => body.len() == FULL_ADDRESS_HEX_LEN && hex::decode(body).is_ok(),
        None => false,
    }
}

/// System short address `0x1`..`0x3`
fn is_system_format(s: &str) -> bool {
    matches!(s, "0x1" | "0x2" | "0x3")
}

/// Explorer abbreviation `0x123...abc` (3-8 hex digits on each side)
fn is_abbreviated_format(s: &str) -> bool {
    let Some(rest) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) else {
        return false;
    };
    let Some((head, tail)) = rest.split_once("...") else {
        return false;
    };
    let side_ok = |part: &str| (3..=8).contains(&part.len()) && part.bytes().all(|b| b.is_ascii_hexdigit());
    side_ok(head) && side_ok(tail)
}

/// Whether a string looks like a Sui address in any displayed spelling
pub fn is_valid_address_format(s: &str) -> bool {
    !s.is_empty() && (is_standard_format(s) || is_system_format(s) || is_abbreviated_format(s))
}

/// Pull every plausible address out of a block of text, deduplicated in
/// first-seen order.
pub fn extract_addresses(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    ADDRESS_CANDIDATE
        .find_iter(text)
        .map(|m| m.as_str())
        .filter(|candidate| is_valid_address_format(candidate))
        .filter(|candidate| seen.insert(*candidate))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_0X2: &str = "0x0000000000000000000000000000000000000000000000000000000000000002";

    #[test]
    fn test_normalize_trims_and_lowercases() {
        assert_eq!(normalize_address(" 0x2 ").as_deref(), Some("0x2"));
        assert_eq!(normalize_address("0X2").as_deref(), Some("0x2"));
        assert_eq!(normalize_address("0xABCdef").as_deref(), Some("0xabcdef"));
        assert_eq!(normalize_address(""), None);
        assert_eq!(normalize_address("   "), None);
    }

    #[test]
    fn test_normalize_value_rejects_non_strings() {
        assert_eq!(normalize_value(&serde_json::json!("0x2")).as_deref(), Some("0x2"));
        assert_eq!(normalize_value(&serde_json::Value::Null), None);
        assert_eq!(normalize_value(&serde_json::json!(12345)), None);
        assert_eq!(normalize_value(&serde_json::json!(["0x2"])), None);
    }

    #[test]
    fn test_short_form() {
        assert_eq!(short_form(FULL_0X2).as_deref(), Some("0x2"));
        assert_eq!(short_form("0x0000dee9").as_deref(), Some("0xdee9"));
        assert_eq!(short_form("0x000").as_deref(), Some("0x0"));
        assert_eq!(short_form("0x2").as_deref(), Some("0x2"));
        assert_eq!(short_form("0x"), None);
        assert_eq!(short_form("0xzz"), None);
        assert_eq!(short_form("2"), None);
    }

    #[test]
    fn test_is_zero_padded() {
        assert!(is_zero_padded(FULL_0X2));
        assert!(is_zero_padded("0x02"));
        assert!(!is_zero_padded("0x2"));
        assert!(!is_zero_padded("0x0"));
        assert!(!is_zero_padded("0x20"));
    }

    #[test]
    fn test_canonical_type_tag() {
        let padded = format!("{}::sui::SUI", FULL_0X2);
        assert_eq!(canonical_type_tag(&padded), "0x2::sui::sui");
        assert_eq!(canonical_type_tag("0x2::sui::SUI"), "0x2::sui::sui");
        assert_eq!(
            canonical_type_tag("0x2::coin::Coin<0x0002::sui::SUI>"),
            "0x2::coin::coin<0x2::sui::sui>"
        );
        // Identifiers containing "0x" are left alone
        assert_eq!(canonical_type_tag("0xabc::a0x1::B"), "0xabc::a0x1::b");
    }

    #[test]
    fn test_canonical_type_tag_rewrites_every_argument() {
        assert_eq!(
            canonical_type_tag("0x0002::pool::Pool<0x02::sui::SUI,0x000dee9::x::Y>"),
            "0x2::pool::pool<0x2::sui::sui,0xdee9::x::y>"
        );
        assert_eq!(canonical_type_tag("0x000::a::B"), "0x0::a::b");
    }

    #[test]
    fn test_address_formats() {
        assert!(is_valid_address_format(FULL_0X2));
        assert!(is_valid_address_format("0x1"));
        assert!(is_valid_address_format("0x3"));
        assert!(is_valid_address_format("0x123...abc"));
        assert!(!is_valid_address_format("0x4"));
        assert!(!is_valid_address_format("0xabc"));
        assert!(!is_valid_address_format("0x12...abc"));
        assert!(!is_valid_address_format(""));
        assert!(!is_valid_address_format(&format!("0x{}", "1".repeat(63))));
    }

    #[test]
    fn test_extract_addresses() {
        let text = format!(
            "Account: 0x123...abc, Package: 0x2, again 0x2, full {} and junk 0xabc",
            FULL_0X2
        );
        assert_eq!(
            extract_addresses(&text),
            vec!["0x123...abc".to_string(), "0x2".to_string(), FULL_0X2.to_string()]
        );
        assert!(extract_addresses("").is_empty());
        assert!(extract_addresses("no addresses here 0x").is_empty());
        assert_eq!(
            extract_addresses("sent to 0xAbC...12345 today"),
            vec!["0xAbC...12345".to_string()]
        );
    }
}
