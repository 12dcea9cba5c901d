//! Fake-Asset Detector
//!
//! Two rule tables, checked in order:
//! 1. Impersonation: the type names an official symbol as a standalone
//!    segment (or the display symbol equals it) but is not the registered type
//! 2. Phishing patterns on the lowercased type string
//!
//! Framework wrappers (`Coin<T>`, `CoinMetadata<T>`, `TreasuryCap<T>`) are
//! judged by their type parameter. An official `T` is never flagged.
//!
//! Only flags. Marking an exact official coin SAFE is the resolver's job.

use regex::Regex;

use crate::core::whitelist::{is_known_coin_type, official_coins};
use crate::models::types::FakeReason;

/// Phishing heuristic over a lowercased type string
#[derive(Debug, Clone)]
pub struct PhishingRule {
    pub label: &'static str,
    pattern: Regex,
}

impl PhishingRule {
    fn new(label: &'static str, pattern: &str) -> Self {
        Self {
            label,
            pattern: Regex::new(pattern).expect("phishing rule pattern"),
        }
    }

    pub fn matches(&self, haystack: &str) -> bool {
        self.pattern.is_match(haystack)
    }
}

lazy_static::lazy_static! {
    pub static ref PHISHING_RULES: Vec<PhishingRule> = vec![
        PhishingRule::new("fake", "fake"),
        PhishingRule::new("scam", "scam"),
        PhishingRule::new("test…coin", "test.*coin"),
        PhishingRule::new("airdrop…claim", "airdrop.*claim"),
    ];

    /// Any `0x2::coin::<Struct><T>` wrapper, padded or short framework address
    static ref COIN_WRAPPER: Regex =
        Regex::new(r"(?i)^0x0*2::coin::[a-z_][a-z0-9_]*<(.+)>$").expect("coin wrapper pattern");
}

/// Detector verdict
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FakeVerdict {
    pub is_fake: bool,
    pub reason: Option<FakeReason>,
}

impl FakeVerdict {
    fn flagged(reason: FakeReason) -> Self {
        Self {
            is_fake: true,
            reason: Some(reason),
        }
    }
}

/// Type parameter of a framework coin wrapper (`Coin<T>`, `CoinMetadata<T>`,
/// `TreasuryCap<T>`, ...), or the input itself
pub fn inner_coin_type(declared: &str) -> &str {
    let trimmed = declared.trim();
    COIN_WRAPPER
        .captures(trimmed)
        .and_then(|caps| caps.get(1))
        .map(|inner| inner.as_str())
        .unwrap_or(trimmed)
}

/// Whether `::symbol` appears as a whole segment: followed by `>`, `,`, `::` or end
fn references_symbol(type_lower: &str, symbol_lower: &str) -> bool {
    let needle = format!("::{}", symbol_lower);
    type_lower.match_indices(&needle).any(|(at, _)| {
        let rest = &type_lower[at + needle.len()..];
        rest.is_empty() || rest.starts_with('>') || rest.starts_with(',') || rest.starts_with("::")
    })
}

/// Check a declared coin type (and optional display symbol) against both rule tables
pub fn detect(declared_type: &str, display_symbol: Option<&str>) -> FakeVerdict {
    let coin_type = inner_coin_type(declared_type);
    if is_known_coin_type(coin_type) {
        return FakeVerdict::default();
    }
    let lower = declared_type.to_lowercase();

    for coin in official_coins() {
        let symbol_lower = coin.symbol.to_lowercase();
        let by_segment = references_symbol(&lower, &symbol_lower);
        let by_display = display_symbol
            .map(|s| s.trim().eq_ignore_ascii_case(coin.symbol))
            .unwrap_or(false);

        if by_segment || by_display {
            return FakeVerdict::flagged(FakeReason::Impersonation {
                claimed_symbol: coin.symbol.to_string(),
                actual_type: coin_type.to_string(),
                official_type: coin.coin_type.to_string(),
            });
        }
    }

    if let Some(rule) = PHISHING_RULES.iter().find(|rule| rule.matches(&lower)) {
        return FakeVerdict::flagged(FakeReason::PhishingPattern {
            pattern: rule.label.to_string(),
            actual_type: coin_type.to_string(),
        });
    }

    FakeVerdict::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    const USDC: &str = "0xdba34672e30cb065b1f93e3ab55318768fd6fef66c15942c9f7cb846e2f900e7::usdc::USDC";

    #[test]
    fn test_official_coins_are_not_flagged() {
        assert!(!detect("0x2::coin::Coin<0x2::sui::SUI>", Some("SUI")).is_fake);
        assert!(!detect(&format!("0x2::coin::Coin<{}>", USDC), Some("USDC")).is_fake);
        assert!(!detect(USDC, None).is_fake);
        assert!(!detect(
            "0x0000000000000000000000000000000000000000000000000000000000000002::sui::SUI",
            None
        )
        .is_fake);
    }

    #[test]
    fn test_impersonation_by_type_segment() {
        let verdict = detect("0x2::coin::Coin<0xbad::usdc::USDC>", None);
        assert!(verdict.is_fake);
        match verdict.reason.unwrap() {
            FakeReason::Impersonation {
                claimed_symbol,
                actual_type,
                official_type,
            } => {
                assert_eq!(claimed_symbol, "USDC");
                assert_eq!(actual_type, "0xbad::usdc::USDC");
                assert_eq!(official_type, USDC);
            }
            other => panic!("unexpected reason {:?}", other),
        }
    }

    #[test]
    fn test_impersonation_by_display_symbol() {
        let verdict = detect("0x2::coin::Coin<0xbad::token::TOKEN>", Some("usdt"));
        assert!(matches!(
            verdict.reason,
            Some(FakeReason::Impersonation { ref claimed_symbol, .. }) if claimed_symbol == "USDT"
        ));
    }

    #[test]
    fn test_symbol_must_be_whole_segment() {
        // "::suifren" and "::usdcx" only share a prefix with official symbols
        assert!(!detect("0x2::coin::Coin<0xabc::suifren::SUIFREN>", None).is_fake);
        assert!(!detect("0x2::coin::Coin<0xabc::usdcx::USDCX>", None).is_fake);
        // Followed by "," inside generics
        assert!(detect("0xabc::pool::Pool<0xabc::sui, 0x2::x::Y>", None).is_fake);
    }

    #[test]
    fn test_phishing_patterns() {
        let cases = [
            ("0x2::coin::Coin<0xabc::fake_token::FT>", "fake"),
            ("0x2::coin::Coin<0xabc::x::SCAMMER>", "scam"),
            ("0x2::coin::Coin<0xabc::test_reward::RewardCoin>", "test…coin"),
            ("0x2::coin::Coin<0xabc::airdrop::ClaimToken>", "airdrop…claim"),
        ];
        for (declared, pattern) in cases {
            let verdict = detect(declared, None);
            assert!(verdict.is_fake, "{} should be flagged", declared);
            assert!(matches!(
                verdict.reason,
                Some(FakeReason::PhishingPattern { pattern: ref p, .. }) if p == pattern
            ));
        }
    }

    #[test]
    fn test_rule_order_matters() {
        let rule = PHISHING_RULES
            .iter()
            .find(|rule| rule.label == "test…coin")
            .unwrap();
        assert!(!rule.matches("coin::test"));
        assert!(rule.matches("testcoin"));
    }

    #[test]
    fn test_plain_coin_is_clean() {
        assert_eq!(detect("0x2::coin::Coin<0xabc::cetus::CETUS>", None), FakeVerdict::default());
    }

    #[test]
    fn test_inner_coin_type() {
        assert_eq!(inner_coin_type("0x2::coin::Coin<0xbad::usdc::USDC>"), "0xbad::usdc::USDC");
        assert_eq!(inner_coin_type("0x2::coin::CoinMetadata<0x2::sui::SUI>"), "0x2::sui::SUI");
        assert_eq!(
            inner_coin_type(
                "0x0000000000000000000000000000000000000000000000000000000000000002::coin::TreasuryCap<0xa::b::C>"
            ),
            "0xa::b::C"
        );
        assert_eq!(inner_coin_type("0xbad::usdc::USDC"), "0xbad::usdc::USDC");
        // Only the framework package unwraps
        assert_eq!(
            inner_coin_type("0xbad::coin::Coin<0x2::sui::SUI>"),
            "0xbad::coin::Coin<0x2::sui::SUI>"
        );
    }

    #[test]
    fn test_official_coin_wrappers_are_not_flagged() {
        assert!(!detect("0x2::coin::CoinMetadata<0x2::sui::SUI>", None).is_fake);
        assert!(!detect(&format!("0x2::coin::TreasuryCap<{}>", USDC), None).is_fake);
        assert!(!detect(
            "0x0000000000000000000000000000000000000000000000000000000000000002::coin::CoinMetadata<0x2::sui::SUI>",
            Some("SUI")
        )
        .is_fake);
    }

    #[test]
    fn test_wrapper_of_lookalike_is_flagged() {
        let verdict = detect("0x2::coin::CoinMetadata<0xbad::usdc::USDC>", None);
        assert!(matches!(
            verdict.reason,
            Some(FakeReason::Impersonation { ref actual_type, .. }) if actual_type == "0xbad::usdc::USDC"
        ));
        // Non-framework wrapper around an official type is not the official coin
        assert!(detect("0xbad::coin::Coin<0x2::sui::SUI>", None).is_fake);
    }
}
