//! # Chain Addresses
//!
//! `Address` is the validated account identifier for buyers, sellers, and
//! arbiters: `0x` followed by exactly 40 hexadecimal digits.
//!
//! ## Security Invariant
//!
//! Addresses are lowercased at construction. Role resolution throughout the
//! system is plain equality against the three participant addresses on an
//! escrow; mixed checksum casing between the ledger, the mirror, and caller
//! input must never make two renderings of the same account compare unequal.

use serde::{Deserialize, Serialize};

use crate::error::HearthError;

/// A validated, lowercase-normalized chain account address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(String);

impl Address {
    /// Parse and normalize an address.
    ///
    /// Accepts `0x` (case-insensitive prefix) followed by exactly 40 hex
    /// digits in either case. The stored form is always lowercase.
    ///
    /// # Errors
    ///
    /// Returns [`HearthError::InvalidAddress`] when the prefix is missing,
    /// the length is wrong, or a non-hex digit appears.
    pub fn parse(input: &str) -> Result<Self, HearthError> {
        let rest = input
            .strip_prefix("0x")
            .or_else(|| input.strip_prefix("0X"))
            .ok_or_else(|| HearthError::InvalidAddress {
                input: input.to_string(),
                reason: "missing 0x prefix".to_string(),
            })?;

        if rest.len() != 40 {
            return Err(HearthError::InvalidAddress {
                input: input.to_string(),
                reason: format!("expected 40 hex digits after 0x, got {}", rest.len()),
            });
        }
        if !rest.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(HearthError::InvalidAddress {
                input: input.to_string(),
                reason: "non-hexadecimal digit".to_string(),
            });
        }

        Ok(Self(format!("0x{}", rest.to_ascii_lowercase())))
    }

    /// The full lowercase `0x`-prefixed form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Shortened display form (`0x1234...abcd`) for logs and UIs.
    pub fn truncated(&self) -> String {
        format!("{}...{}", &self.0[..6], &self.0[self.0.len() - 4..])
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Address {
    type Error = HearthError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Address> for String {
    fn from(addr: Address) -> Self {
        addr.0
    }
}

impl std::str::FromStr for Address {
    type Err = HearthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const WELL_FORMED: &str = "0x8ccedbAe4916b79da7F3F612EfB2EB93A2bFD6cF";

    #[test]
    fn test_parse_normalizes_to_lowercase() {
        let addr = Address::parse(WELL_FORMED).unwrap();
        assert_eq!(addr.as_str(), "0x8ccedbae4916b79da7f3f612efb2eb93a2bfd6cf");
    }

    #[test]
    fn test_casing_variants_compare_equal() {
        let a = Address::parse(WELL_FORMED).unwrap();
        let b = Address::parse(&WELL_FORMED.to_ascii_uppercase().replace("0X", "0x")).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_missing_prefix_rejected() {
        assert!(Address::parse("8ccedbae4916b79da7f3f612efb2eb93a2bfd6cf").is_err());
    }

    #[test]
    fn test_wrong_length_rejected() {
        assert!(Address::parse("0x1234").is_err());
        assert!(Address::parse(&format!("{WELL_FORMED}00")).is_err());
    }

    #[test]
    fn test_non_hex_rejected() {
        assert!(Address::parse("0x8ccedbae4916b79da7f3f612efb2eb93a2bfdzzz").is_err());
    }

    #[test]
    fn test_truncated_form() {
        let addr = Address::parse(WELL_FORMED).unwrap();
        assert_eq!(addr.truncated(), "0x8cce...d6cf");
    }

    #[test]
    fn test_serde_roundtrip() {
        let addr = Address::parse(WELL_FORMED).unwrap();
        let json = serde_json::to_string(&addr).unwrap();
        let parsed: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(addr, parsed);
    }

    #[test]
    fn test_serde_rejects_malformed() {
        let result: Result<Address, _> = serde_json::from_str("\"0xnothex\"");
        assert!(result.is_err());
    }

    proptest! {
        #[test]
        fn prop_valid_hex_always_parses(hex in "[0-9a-fA-F]{40}") {
            let addr = Address::parse(&format!("0x{hex}")).unwrap();
            prop_assert_eq!(addr.as_str(), format!("0x{}", hex.to_ascii_lowercase()));
        }

        #[test]
        fn prop_wrong_length_never_parses(hex in "[0-9a-f]{0,39}") {
            let result = Address::parse(&format!("0x{hex}"));
            prop_assert!(result.is_err());
        }
    }
}
