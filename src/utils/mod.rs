use crate::core::{SwapError, SwapResult, U256, MAX_TOKEN_DECIMALS};

/// Parse a human-readable amount ("1.25") into smallest units.
/// Rejects more fractional digits than `decimals` allows.
pub fn parse_units(input: &str, decimals: u8) -> SwapResult<U256> {
    parse_decimal_str(input, decimals, false)
}

/// Like `parse_units`, but floors extra fractional digits instead of failing.
/// Used for subgraph reserves, which are not user input.
pub fn parse_units_truncating(input: &str, decimals: u8) -> SwapResult<U256> {
    parse_decimal_str(input, decimals, true)
}

fn parse_decimal_str(input: &str, decimals: u8, truncate: bool) -> SwapResult<U256> {
    let s = input.trim();
    if decimals > MAX_TOKEN_DECIMALS {
        return Err(SwapError::InvalidAmount(format!(
            "unsupported decimals {decimals}"
        )));
    }
    if s.is_empty() {
        return Err(SwapError::InvalidAmount("empty amount".to_string()));
    }

    let (whole, fraction) = match s.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (s, ""),
    };

    if whole.is_empty() && fraction.is_empty() {
        return Err(SwapError::InvalidAmount(format!("{s:?} is not a number")));
    }
    if !whole.chars().all(|c| c.is_ascii_digit()) || !fraction.chars().all(|c| c.is_ascii_digit()) {
        return Err(SwapError::InvalidAmount(format!("{s:?} is not a number")));
    }

    let decimals = decimals as usize;
    let fraction = if fraction.len() > decimals {
        if !truncate {
            return Err(SwapError::InvalidAmount(format!(
                "{s:?} has more than {decimals} decimal places"
            )));
        }
        &fraction[..decimals]
    } else {
        fraction
    };

    let digits = format!("{}{:0<width$}", whole, fraction, width = decimals);
    let digits = digits.trim_start_matches('0');
    if digits.is_empty() {
        return Ok(U256::zero());
    }

    U256::from_dec_str(digits).map_err(|_| SwapError::InvalidAmount(format!("{s:?} is too large")))
}

/// Format smallest units as a human-readable amount, trimming trailing zeros.
pub fn format_units(amount: U256, decimals: u8) -> String {
    let divisor = U256::exp10(decimals as usize);
    let whole = amount / divisor;
    let fraction = amount % divisor;

    if fraction.is_zero() {
        format!("{}", whole)
    } else {
        let fraction_str = format!("{:0>width$}", fraction.to_string(), width = decimals as usize);
        let trimmed = fraction_str.trim_end_matches('0');
        format!("{}.{}", whole, trimmed)
    }
}

/// Shorten an address for terminal output: `0x1234…abcd`.
pub fn short_address(address: &str) -> String {
    if address.len() <= 12 {
        return address.to_string();
    }
    format!("{}…{}", &address[..6], &address[address.len() - 4..])
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("1", 18, "1000000000000000000" ; "whole number")]
    #[test_case("1.5", 6, "1500000" ; "fraction")]
    #[test_case("0.000001", 6, "1" ; "smallest unit")]
    #[test_case(".5", 1, "5" ; "leading dot")]
    #[test_case("7.", 2, "700" ; "trailing dot")]
    #[test_case("0", 18, "0" ; "zero")]
    #[test_case("42", 0, "42" ; "no decimals")]
    fn test_parse_units(input: &str, decimals: u8, expected: &str) {
        assert_eq!(
            parse_units(input, decimals).unwrap(),
            U256::from_dec_str(expected).unwrap()
        );
    }

    #[test_case("" ; "empty")]
    #[test_case("." ; "lone dot")]
    #[test_case("-1" ; "negative")]
    #[test_case("1e18" ; "exponent")]
    #[test_case("1.2.3" ; "two dots")]
    #[test_case("1.0000001" ; "too precise")]
    fn test_parse_units_rejects(input: &str) {
        assert!(parse_units(input, 6).is_err());
    }

    #[test]
    fn test_parse_units_truncating() {
        assert_eq!(
            parse_units_truncating("1.23456789", 6).unwrap(),
            U256::from(1_234_567u64)
        );
        assert!(parse_units_truncating("abc", 6).is_err());
    }

    #[test]
    fn test_format_units() {
        assert_eq!(format_units(U256::from(1_500_000u64), 6), "1.5");
        assert_eq!(format_units(U256::from(1u64), 6), "0.000001");
        assert_eq!(format_units(U256::exp10(18), 18), "1");
        assert_eq!(format_units(U256::from(42u64), 0), "42");
        assert_eq!(format_units(U256::zero(), 18), "0");
    }

    #[test]
    fn test_short_address() {
        assert_eq!(
            short_address("0x760afe86e5de5fa0ee542fc7b7b713e1c5425701"),
            "0x760a…5701"
        );
        assert_eq!(short_address("0xabc"), "0xabc");
    }
}
