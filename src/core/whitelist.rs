//! Whitelist Classifier
//!
//! Read-only lookups against the official package and coin tables. Indexes
//! are built once on first use and keyed by canonical form, so lookups are
//! hash-map hits.
//!
//! Lookup order for addresses:
//! 1. Exact match against the canonical table
//! 2. If the input is zero-padded, its short form
//!
//! Matching is plain equality. `0x2abc` is NOT `0x2`.

use std::collections::HashMap;

use crate::models::types::{AddressProfile, AddressType, CoinInfo, RiskLevel, WhitelistMetadata};
use crate::utils::address::{canonical_type_tag, is_zero_padded, short_form};
use crate::utils::constants::{OfficialCoin, PackageInfo, OFFICIAL_COINS, OFFICIAL_PACKAGES};

lazy_static::lazy_static! {
    static ref PACKAGE_INDEX: HashMap<&'static str, &'static PackageInfo> =
        OFFICIAL_PACKAGES.iter().map(|pkg| (pkg.address, pkg)).collect();

    static ref COIN_INDEX: HashMap<String, &'static OfficialCoin> =
        OFFICIAL_COINS.iter().map(|coin| (canonical_type_tag(coin.coin_type), coin)).collect();
}

/// Official package entry for a normalized address
pub fn package_info(address: &str) -> Option<&'static PackageInfo> {
    if let Some(info) = PACKAGE_INDEX.get(address) {
        return Some(*info);
    }
    if is_zero_padded(address) {
        let short = short_form(address)?;
        return PACKAGE_INDEX.get(short.as_str()).copied();
    }
    None
}

pub fn is_known_package(address: &str) -> bool {
    package_info(address).is_some()
}

/// Official coin entry for a type string (any case, any address padding)
pub fn coin_info(type_str: &str) -> Option<&'static OfficialCoin> {
    COIN_INDEX.get(&canonical_type_tag(type_str)).copied()
}

pub fn is_known_coin_type(type_str: &str) -> bool {
    coin_info(type_str).is_some()
}

/// All official coins, for symbol scanning
pub fn official_coins() -> &'static [OfficialCoin] {
    &OFFICIAL_COINS
}

impl From<&OfficialCoin> for CoinInfo {
    fn from(coin: &OfficialCoin) -> Self {
        Self {
            symbol: coin.symbol.to_string(),
            decimals: coin.decimals,
            registered_type: coin.coin_type.to_string(),
        }
    }
}

impl From<&PackageInfo> for WhitelistMetadata {
    fn from(pkg: &PackageInfo) -> Self {
        Self {
            address: pkg.address.to_string(),
            name: pkg.name.to_string(),
            description: pkg.description.to_string(),
            is_system_package: pkg.is_system_package,
        }
    }
}

/// SAFE profile for a whitelisted package address, if it is one
pub fn package_profile(address: &str) -> Option<AddressProfile> {
    let info = package_info(address)?;
    Some(AddressProfile {
        risk_level: RiskLevel::Safe,
        label: Some(format!("Official: {}", info.name)),
        is_contract: true,
        is_whitelisted: true,
        metadata: Some(info.into()),
        ..AddressProfile::new(address, AddressType::Package)
    })
}

/// SAFE profile for an official coin type string, if it is one
pub fn coin_type_profile(type_str: &str) -> Option<AddressProfile> {
    let coin = coin_info(type_str)?;
    Some(AddressProfile {
        risk_level: RiskLevel::Safe,
        label: Some(format!("Official {}", coin.symbol)),
        is_whitelisted: true,
        coin_info: Some(coin.into()),
        metadata: Some(WhitelistMetadata {
            address: coin.coin_type.to_string(),
            name: coin.symbol.to_string(),
            description: coin.description.to_string(),
            is_system_package: false,
        }),
        ..AddressProfile::new(type_str, AddressType::Object)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_0X2: &str = "0x0000000000000000000000000000000000000000000000000000000000000002";

    #[test]
    fn test_system_packages_short_and_padded() {
        for addr in ["0x1", "0x2", "0x3", "0xdee9", FULL_0X2, "0x02", "0x000dee9"] {
            assert!(is_known_package(addr), "{} should be whitelisted", addr);
        }
        assert_eq!(package_info(FULL_0X2).map(|p| p.name), Some("Sui Framework"));
    }

    #[test]
    fn test_full_protocol_packages() {
        let suins = "0xd22b24490e0bae52676651b4f56660a5ff8022a2576e0089f79b3c88d44e08f0";
        assert_eq!(package_info(suins).map(|p| p.name), Some("SuiNS"));
        assert!(!package_info(suins).map(|p| p.is_system_package).unwrap_or(true));
    }

    #[test]
    fn test_prefix_is_not_a_match() {
        assert!(!is_known_package("0x2abc"));
        assert!(!is_known_package("0x20"));
        assert!(!is_known_package("0x1234"));
        assert!(!is_known_package("0xdee99"));
        assert!(!is_known_package(&format!("{}0", FULL_0X2)));
        // Truncated protocol package address
        assert!(!is_known_package("0xd22b24490e0bae52676651b4f56660a5ff8022a2576e0089f79b3c88d44e08f"));
    }

    #[test]
    fn test_coin_type_lookup() {
        assert_eq!(coin_info("0x2::sui::SUI").map(|c| c.symbol), Some("SUI"));
        assert_eq!(coin_info("0x2::sui::sui").map(|c| c.symbol), Some("SUI"));
        assert_eq!(coin_info(&format!("{}::sui::SUI", FULL_0X2)).map(|c| c.decimals), Some(9));
        assert!(is_known_coin_type(
            "0xdba34672e30cb065b1f93e3ab55318768fd6fef66c15942c9f7cb846e2f900e7::usdc::USDC"
        ));
        assert!(!is_known_coin_type("0xbad::usdc::USDC"));
        assert!(!is_known_coin_type("0x2::sui::SUIX"));
    }

    #[test]
    fn test_package_profile() {
        let profile = package_profile(FULL_0X2).unwrap();
        assert_eq!(profile.address, FULL_0X2);
        assert_eq!(profile.risk_level, RiskLevel::Safe);
        assert!(profile.is_whitelisted);
        assert!(profile.is_contract);
        assert!(!profile.is_cacheable());
        assert_eq!(profile.metadata.unwrap().address, "0x2");

        assert!(package_profile("0xabcdef").is_none());
    }

    #[test]
    fn test_coin_type_profile() {
        let profile = coin_type_profile("0x2::sui::sui").unwrap();
        assert_eq!(profile.address_type, AddressType::Object);
        assert_eq!(profile.risk_level, RiskLevel::Safe);
        assert_eq!(profile.label.as_deref(), Some("Official SUI"));
        assert_eq!(profile.coin_info.unwrap().registered_type, "0x2::sui::SUI");
    }
}
