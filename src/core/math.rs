//! 256-bit integer arithmetic for reserves and token amounts.
//!
//! Reserves coming from an 18-decimal subgraph overflow `u64` quickly, and the
//! constant-product numerators (`amount * 997 * reserve`) overflow `u128` for
//! realistic pools, so every money amount in the crate is a `U256`.

use crate::core::{SwapError, SwapResult};
use rust_decimal::Decimal;
use uint::construct_uint;

construct_uint! {
    pub struct U256(4);
}

/// Largest mantissa a `rust_decimal::Decimal` can hold (2^96 - 1).
const MAX_DECIMAL_MANTISSA: u128 = (1u128 << 96) - 1;

/// `floor(value * numerator / denominator)` with overflow and zero checks.
pub fn mul_div(value: U256, numerator: U256, denominator: U256) -> SwapResult<U256> {
    if denominator.is_zero() {
        return Err(SwapError::MathOverflow);
    }
    let product = value.checked_mul(numerator).ok_or(SwapError::MathOverflow)?;
    Ok(product / denominator)
}

/// Converts `numerator / denominator` into a `Decimal` with up to `scale`
/// fractional digits, flooring the remainder. Large ratios give up fractional
/// digits first and saturate at `Decimal::MAX` only past the integer range.
pub fn ratio_to_decimal(numerator: U256, denominator: U256, scale: u32) -> Decimal {
    if denominator.is_zero() || numerator.is_zero() {
        return Decimal::ZERO;
    }

    let max_mantissa = U256::from(MAX_DECIMAL_MANTISSA);
    let mut scale = scale;
    loop {
        let factor = U256::exp10(scale as usize);
        let scaled = match numerator.checked_mul(factor) {
            Some(product) => product / denominator,
            None => (numerator / denominator).saturating_mul(factor),
        };

        if scaled <= max_mantissa {
            return Decimal::from_i128_with_scale(scaled.low_u128() as i128, scale).normalize();
        }
        if scale == 0 {
            return Decimal::MAX;
        }
        scale -= 1;
    }
}

/// Saturating conversion used when reporting basis points.
pub fn to_u64_saturating(value: U256) -> u64 {
    if value > U256::from(u64::MAX) {
        u64::MAX
    } else {
        value.low_u64()
    }
}

/// Serde adapter storing `U256` as a decimal string, the way subgraphs and
/// JSON APIs carry big integers.
pub mod serde_u256 {
    use super::U256;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &U256, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<U256, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        U256::from_dec_str(raw.trim())
            .map_err(|e| D::Error::custom(format!("invalid integer {raw:?}: {e:?}")))
    }
}
