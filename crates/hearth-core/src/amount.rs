//! # Token Amounts — Fixed-Point Settlement Units
//!
//! `TokenAmount` holds a quantity of the settlement token as integer base
//! units (18 decimals) in a `u128`. Decimal strings are parsed exactly and
//! rendered back without loss; there is no floating-point constructor.
//!
//! ## Security Invariant
//!
//! Escrowed amounts cross three boundaries (caller input, ledger calls,
//! mirrored records). Representing them as floats anywhere would let
//! rounding produce a mirrored amount that disagrees with the ledger.
//! Amounts serialize as decimal strings, never JSON numbers.

use serde::{Deserialize, Serialize};

use crate::error::HearthError;

/// Number of decimal places carried by the settlement token.
pub const TOKEN_DECIMALS: u32 = 18;

const ONE: u128 = 10u128.pow(TOKEN_DECIMALS);

/// A quantity of the settlement token in base units (18 decimals).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct TokenAmount(u128);

impl TokenAmount {
    /// Zero tokens.
    pub const ZERO: TokenAmount = TokenAmount(0);

    /// Construct from raw base units.
    pub fn from_base_units(units: u128) -> Self {
        Self(units)
    }

    /// Construct from a whole number of tokens.
    pub fn from_tokens(tokens: u64) -> Self {
        Self(tokens as u128 * ONE)
    }

    /// Parse a decimal token string, e.g. `"500"` or `"0.25"`.
    ///
    /// At most [`TOKEN_DECIMALS`] fraction digits are accepted; the value
    /// must fit in a `u128` of base units.
    ///
    /// # Errors
    ///
    /// Returns [`HearthError::InvalidAmount`] on empty input, non-digit
    /// characters, excess fraction digits, or overflow.
    pub fn parse_decimal(input: &str) -> Result<Self, HearthError> {
        let reject = |reason: &str| HearthError::InvalidAmount {
            input: input.to_string(),
            reason: reason.to_string(),
        };

        let (int_part, frac_part) = match input.split_once('.') {
            Some((i, f)) => (i, f),
            None => (input, ""),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(reject("empty"));
        }
        if !int_part.bytes().all(|b| b.is_ascii_digit())
            || !frac_part.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(reject("non-digit character"));
        }
        if frac_part.len() > TOKEN_DECIMALS as usize {
            return Err(reject("too many fraction digits"));
        }

        let whole: u128 = if int_part.is_empty() {
            0
        } else {
            int_part.parse().map_err(|_| reject("integer part overflows"))?
        };
        let frac_scale = 10u128.pow(TOKEN_DECIMALS - frac_part.len() as u32);
        let frac: u128 = if frac_part.is_empty() {
            0
        } else {
            frac_part
                .parse::<u128>()
                .map_err(|_| reject("fraction part overflows"))?
                * frac_scale
        };

        whole
            .checked_mul(ONE)
            .and_then(|w| w.checked_add(frac))
            .map(Self)
            .ok_or_else(|| reject("value overflows"))
    }

    /// The raw base-unit quantity.
    pub fn base_units(&self) -> u128 {
        self.0
    }

    /// Whether this amount is zero.
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checked addition in base units.
    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    /// Checked subtraction in base units.
    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    /// Render as a decimal token string with trailing zeros trimmed.
    pub fn to_decimal_string(&self) -> String {
        let whole = self.0 / ONE;
        let frac = self.0 % ONE;
        if frac == 0 {
            return whole.to_string();
        }
        let frac = format!("{frac:018}");
        format!("{whole}.{}", frac.trim_end_matches('0'))
    }
}

impl std::fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_decimal_string())
    }
}

impl std::str::FromStr for TokenAmount {
    type Err = HearthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_decimal(s)
    }
}

impl TryFrom<String> for TokenAmount {
    type Error = HearthError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse_decimal(&value)
    }
}

impl From<TokenAmount> for String {
    fn from(amount: TokenAmount) -> Self {
        amount.to_decimal_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_whole_tokens() {
        let amt = TokenAmount::parse_decimal("500").unwrap();
        assert_eq!(amt.base_units(), 500 * ONE);
        assert_eq!(amt, TokenAmount::from_tokens(500));
    }

    #[test]
    fn test_parse_fractional() {
        let amt = TokenAmount::parse_decimal("0.25").unwrap();
        assert_eq!(amt.base_units(), ONE / 4);
    }

    #[test]
    fn test_parse_leading_dot() {
        assert_eq!(
            TokenAmount::parse_decimal(".5").unwrap().base_units(),
            ONE / 2
        );
    }

    #[test]
    fn test_parse_max_fraction_digits() {
        let amt = TokenAmount::parse_decimal("0.000000000000000001").unwrap();
        assert_eq!(amt.base_units(), 1);
        assert!(TokenAmount::parse_decimal("0.0000000000000000001").is_err());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(TokenAmount::parse_decimal("").is_err());
        assert!(TokenAmount::parse_decimal(".").is_err());
        assert!(TokenAmount::parse_decimal("12a").is_err());
        assert!(TokenAmount::parse_decimal("-5").is_err());
        assert!(TokenAmount::parse_decimal("1.2.3").is_err());
    }

    #[test]
    fn test_display_trims_trailing_zeros() {
        assert_eq!(TokenAmount::parse_decimal("500").unwrap().to_string(), "500");
        assert_eq!(
            TokenAmount::parse_decimal("1.500").unwrap().to_string(),
            "1.5"
        );
    }

    #[test]
    fn test_checked_arithmetic() {
        let a = TokenAmount::from_tokens(3);
        let b = TokenAmount::from_tokens(2);
        assert_eq!(a.checked_add(b), Some(TokenAmount::from_tokens(5)));
        assert_eq!(a.checked_sub(b), Some(TokenAmount::from_tokens(1)));
        assert_eq!(b.checked_sub(a), None);
    }

    #[test]
    fn test_ordering_matches_value() {
        assert!(TokenAmount::from_tokens(1) < TokenAmount::from_tokens(2));
        assert!(TokenAmount::parse_decimal("0.9").unwrap() < TokenAmount::from_tokens(1));
    }

    #[test]
    fn test_serde_uses_decimal_strings() {
        let amt = TokenAmount::parse_decimal("12.5").unwrap();
        let json = serde_json::to_string(&amt).unwrap();
        assert_eq!(json, "\"12.5\"");
        let parsed: TokenAmount = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, amt);
    }

    proptest! {
        #[test]
        fn prop_decimal_string_roundtrip(units in any::<u64>()) {
            let amt = TokenAmount::from_base_units(units as u128);
            let reparsed = TokenAmount::parse_decimal(&amt.to_decimal_string()).unwrap();
            prop_assert_eq!(amt, reparsed);
        }

        #[test]
        fn prop_whole_tokens_roundtrip(tokens in 0u64..1_000_000_000) {
            let amt = TokenAmount::parse_decimal(&tokens.to_string()).unwrap();
            prop_assert_eq!(amt.to_decimal_string(), tokens.to_string());
        }
    }
}
