use crate::core::constants::FIXED_RESERVE_DECIMALS;
use crate::core::math::{serde_u256, U256};
use crate::core::{SwapError, SwapResult};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Case-insensitive token identifier. Stored lower-cased so equality and
/// hashing ignore checksum casing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct TokenAddress(String);

impl TokenAddress {
    pub fn new(address: impl AsRef<str>) -> Self {
        Self(address.as_ref().trim().to_ascii_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `0x` followed by 40 hex digits.
    pub fn is_valid_evm(&self) -> bool {
        self.0.len() == 42
            && self.0.starts_with("0x")
            && self.0[2..].chars().all(|c| c.is_ascii_hexdigit())
    }
}

impl From<String> for TokenAddress {
    fn from(address: String) -> Self {
        Self::new(address)
    }
}

impl From<&str> for TokenAddress {
    fn from(address: &str) -> Self {
        Self::new(address)
    }
}

impl From<TokenAddress> for String {
    fn from(address: TokenAddress) -> Self {
        address.0
    }
}

impl fmt::Display for TokenAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenInfo {
    pub address: TokenAddress,
    pub symbol: String,
    pub name: String,
    pub decimals: u8,
}

impl TokenInfo {
    pub fn new(address: impl Into<TokenAddress>, symbol: &str, decimals: u8) -> Self {
        Self {
            address: address.into(),
            symbol: symbol.to_string(),
            name: symbol.to_string(),
            decimals,
        }
    }

    /// Symbol when known, otherwise the address.
    pub fn label(&self) -> &str {
        if self.symbol.is_empty() {
            self.address.as_str()
        } else {
            &self.symbol
        }
    }
}

/// A constant-product pair. Reserves are in smallest units of the snapshot's
/// `ReserveUnits` convention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pool {
    pub id: Option<String>,
    pub token_a: TokenInfo,
    pub token_b: TokenInfo,
    #[serde(with = "serde_u256")]
    pub reserve_a: U256,
    #[serde(with = "serde_u256")]
    pub reserve_b: U256,
}

impl Pool {
    pub fn new(token_a: TokenInfo, token_b: TokenInfo, reserve_a: U256, reserve_b: U256) -> Self {
        Self {
            id: None,
            token_a,
            token_b,
            reserve_a,
            reserve_b,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Reserves oriented for a swap selling `token_in`: `(reserve_in, reserve_out)`.
    pub fn reserves_for_swap(&self, token_in: &TokenAddress) -> Option<(U256, U256)> {
        if self.token_a.address == *token_in {
            Some((self.reserve_a, self.reserve_b))
        } else if self.token_b.address == *token_in {
            Some((self.reserve_b, self.reserve_a))
        } else {
            None
        }
    }

    pub fn token(&self, address: &TokenAddress) -> Option<&TokenInfo> {
        if self.token_a.address == *address {
            Some(&self.token_a)
        } else if self.token_b.address == *address {
            Some(&self.token_b)
        } else {
            None
        }
    }

    pub fn is_swappable(&self) -> bool {
        !self.reserve_a.is_zero() && !self.reserve_b.is_zero()
    }
}

/// Ordered token path. Empty means no route was found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Route(Vec<TokenAddress>);

impl Route {
    pub fn new(tokens: Vec<TokenAddress>) -> Self {
        Self(tokens)
    }

    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn tokens(&self) -> &[TokenAddress] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn hop_count(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    /// Consecutive `(from, to)` pairs in trade order.
    pub fn hops(&self) -> impl DoubleEndedIterator<Item = (&TokenAddress, &TokenAddress)> {
        self.0.windows(2).map(|pair| (&pair[0], &pair[1]))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<&str> = self.0.iter().map(|t| t.as_str()).collect();
        write!(f, "{}", parts.join(" → "))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeDirection {
    ExactInput,
    ExactOutput,
}

impl fmt::Display for TradeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeDirection::ExactInput => write!(f, "ExactInput"),
            TradeDirection::ExactOutput => write!(f, "ExactOutput"),
        }
    }
}

/// Validated quote request. `amount` is still human-readable; it is converted
/// with the snapshot's unit convention at quote time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub token_in: TokenAddress,
    pub token_out: TokenAddress,
    pub amount: String,
    pub direction: TradeDirection,
}

impl QuoteRequest {
    /// Exactly one of `from_amount` / `to_amount` must be set (empty strings
    /// count as unset) and both tokens must be EVM addresses.
    pub fn from_parts(
        from_token: &str,
        to_token: &str,
        from_amount: Option<&str>,
        to_amount: Option<&str>,
    ) -> SwapResult<Self> {
        let from_amount = from_amount.map(str::trim).filter(|a| !a.is_empty());
        let to_amount = to_amount.map(str::trim).filter(|a| !a.is_empty());

        let (amount, direction) = match (from_amount, to_amount) {
            (None, None) => return Err(SwapError::MissingAmount),
            (Some(_), Some(_)) => return Err(SwapError::MultipleAmounts),
            (Some(amount), None) => (amount, TradeDirection::ExactInput),
            (None, Some(amount)) => (amount, TradeDirection::ExactOutput),
        };

        let token_in = TokenAddress::new(from_token);
        if !token_in.is_valid_evm() {
            return Err(SwapError::InvalidTokenAddress("fromToken".to_string()));
        }

        let token_out = TokenAddress::new(to_token);
        if !token_out.is_valid_evm() {
            return Err(SwapError::InvalidTokenAddress("toToken".to_string()));
        }

        Ok(Self {
            token_in,
            token_out,
            amount: amount.to_string(),
            direction,
        })
    }

    /// Token whose decimals the request amount is expressed in.
    pub fn amount_token(&self) -> &TokenAddress {
        match self.direction {
            TradeDirection::ExactInput => &self.token_in,
            TradeDirection::ExactOutput => &self.token_out,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteResult {
    pub route: Route,
    pub direction: TradeDirection,
    /// Amount the caller fixed (input for ExactInput, output for ExactOutput).
    #[serde(with = "serde_u256")]
    pub amount: U256,
    /// Simulated output (ExactInput) or required input (ExactOutput).
    #[serde(with = "serde_u256")]
    pub quote: U256,
    /// Fee-free marginal-price amount for the same route.
    #[serde(with = "serde_u256")]
    pub ideal_quote: U256,
    /// Deviation from the ideal amount as a fraction. Impacts beyond the
    /// `Decimal` range are reported as `Decimal::MAX`.
    pub price_impact: Decimal,
    /// Impact plus the slippage buffer, floored to a basis point. Capped at
    /// `Decimal::MAX` like `price_impact`.
    pub suggested_slippage: Decimal,
    /// Same value in basis points, capped at `u64::MAX`.
    pub suggested_slippage_bps: u64,
    /// Minimum output (ExactInput) or maximum input (ExactOutput) after slippage.
    #[serde(with = "serde_u256")]
    pub amount_limit: U256,
}

impl QuoteResult {
    pub fn empty(direction: TradeDirection, amount: U256) -> Self {
        Self {
            route: Route::empty(),
            direction,
            amount,
            quote: U256::zero(),
            ideal_quote: U256::zero(),
            price_impact: Decimal::ZERO,
            suggested_slippage: Decimal::ZERO,
            suggested_slippage_bps: 0,
            amount_limit: U256::zero(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.route.is_empty()
    }

    pub fn amount_in(&self) -> U256 {
        match self.direction {
            TradeDirection::ExactInput => self.amount,
            TradeDirection::ExactOutput => self.quote,
        }
    }

    pub fn amount_out(&self) -> U256 {
        match self.direction {
            TradeDirection::ExactInput => self.quote,
            TradeDirection::ExactOutput => self.amount,
        }
    }
}

/// Integer unit convention shared by every reserve and request amount of a
/// snapshot. Mixing conventions inside one snapshot is not representable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReserveUnits {
    /// Each amount scaled by its own token's declared decimals.
    #[default]
    TokenDecimals,
    /// Every amount scaled by 18 decimals regardless of the token.
    Fixed18,
}

impl ReserveUnits {
    pub fn decimals_for(&self, token: &TokenInfo) -> u8 {
        match self {
            ReserveUnits::TokenDecimals => token.decimals,
            ReserveUnits::Fixed18 => FIXED_RESERVE_DECIMALS,
        }
    }
}

impl FromStr for ReserveUnits {
    type Err = SwapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "token" | "token_decimals" | "token-decimals" => Ok(ReserveUnits::TokenDecimals),
            "fixed18" | "fixed_18" | "fixed-18" => Ok(ReserveUnits::Fixed18),
            other => Err(SwapError::ConfigError(format!(
                "Unknown reserve units {other:?} (expected \"token\" or \"fixed18\")"
            ))),
        }
    }
}

impl fmt::Display for ReserveUnits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReserveUnits::TokenDecimals => write!(f, "token"),
            ReserveUnits::Fixed18 => write!(f, "fixed18"),
        }
    }
}

/// Immutable pool snapshot handed to the quote engine.
#[derive(Debug, Clone)]
pub struct PoolSnapshot {
    pub pools: Vec<Pool>,
    pub units: ReserveUnits,
    pub fetched_at: DateTime<Utc>,
}

impl PoolSnapshot {
    pub fn new(pools: Vec<Pool>, units: ReserveUnits) -> Self {
        Self {
            pools,
            units,
            fetched_at: Utc::now(),
        }
    }

    pub fn token_info(&self, address: &TokenAddress) -> Option<&TokenInfo> {
        self.pools.iter().find_map(|pool| pool.token(address))
    }

    /// Decimals a request amount for `address` must be parsed with so it
    /// matches the reserves of this snapshot.
    pub fn amount_decimals(&self, address: &TokenAddress) -> Option<u8> {
        self.token_info(address)
            .map(|token| self.units.decimals_for(token))
    }

    pub fn len(&self) -> usize {
        self.pools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const WMON: &str = "0x760AfE86e5de5fa0Ee542fc7B7B713e1c5425701";
    const USDC: &str = "0xf817257fed379853cDe0fa4F97AB987181B1E5Ea";

    fn create_test_pool() -> Pool {
        Pool::new(
            TokenInfo::new(WMON, "WMON", 18),
            TokenInfo::new(USDC, "USDC", 6),
            U256::from(1_000u64),
            U256::from(2_000u64),
        )
    }

    #[test]
    fn test_token_address_is_case_insensitive() {
        assert_eq!(TokenAddress::new(WMON), TokenAddress::new(WMON.to_lowercase()));
        assert!(TokenAddress::new(WMON).is_valid_evm());
        assert!(!TokenAddress::new("0x1234").is_valid_evm());
        assert!(!TokenAddress::new("0xzz0AfE86e5de5fa0Ee542fc7B7B713e1c5425701").is_valid_evm());
    }

    #[test]
    fn test_pool_orientation() {
        let pool = create_test_pool();
        let wmon = TokenAddress::new(WMON);
        let usdc = TokenAddress::new(USDC);

        assert_eq!(
            pool.reserves_for_swap(&wmon),
            Some((U256::from(1_000u64), U256::from(2_000u64)))
        );
        assert_eq!(
            pool.reserves_for_swap(&usdc),
            Some((U256::from(2_000u64), U256::from(1_000u64)))
        );
        assert_eq!(pool.reserves_for_swap(&TokenAddress::new("0xabc")), None);
    }

    #[test]
    fn test_route_hops() {
        let route = Route::new(vec!["0xa".into(), "0xb".into(), "0xc".into()]);
        assert_eq!(route.hop_count(), 2);

        let hops: Vec<(&str, &str)> = route.hops().map(|(a, b)| (a.as_str(), b.as_str())).collect();
        assert_eq!(hops, vec![("0xa", "0xb"), ("0xb", "0xc")]);

        let backwards: Vec<&str> = route.hops().rev().map(|(a, _)| a.as_str()).collect();
        assert_eq!(backwards, vec!["0xb", "0xa"]);
        assert_eq!(Route::empty().hop_count(), 0);
    }

    #[test]
    fn test_request_from_parts() {
        let request = QuoteRequest::from_parts(WMON, USDC, Some("1.5"), None).unwrap();
        assert_eq!(request.direction, TradeDirection::ExactInput);
        assert_eq!(request.amount, "1.5");
        assert_eq!(request.amount_token(), &TokenAddress::new(WMON));

        let request = QuoteRequest::from_parts(WMON, USDC, Some(""), Some("20")).unwrap();
        assert_eq!(request.direction, TradeDirection::ExactOutput);
        assert_eq!(request.amount_token(), &TokenAddress::new(USDC));
    }

    #[test]
    fn test_request_validation_order() {
        assert!(matches!(
            QuoteRequest::from_parts("bad", USDC, None, None),
            Err(SwapError::MissingAmount)
        ));
        assert!(matches!(
            QuoteRequest::from_parts(WMON, USDC, Some("1"), Some("2")),
            Err(SwapError::MultipleAmounts)
        ));
        assert!(matches!(
            QuoteRequest::from_parts("bad", USDC, Some("1"), None),
            Err(SwapError::InvalidTokenAddress(field)) if field == "fromToken"
        ));
        assert!(matches!(
            QuoteRequest::from_parts(WMON, "bad", Some("1"), None),
            Err(SwapError::InvalidTokenAddress(field)) if field == "toToken"
        ));
    }

    #[test]
    fn test_reserve_units() {
        let usdc = TokenInfo::new(USDC, "USDC", 6);
        assert_eq!(ReserveUnits::TokenDecimals.decimals_for(&usdc), 6);
        assert_eq!(ReserveUnits::Fixed18.decimals_for(&usdc), 18);
        assert_eq!("fixed18".parse::<ReserveUnits>().unwrap(), ReserveUnits::Fixed18);
        assert_eq!("Token".parse::<ReserveUnits>().unwrap(), ReserveUnits::TokenDecimals);
        assert!("wei".parse::<ReserveUnits>().is_err());
    }

    #[test]
    fn test_snapshot_amount_decimals_follow_units() {
        let snapshot = PoolSnapshot::new(vec![create_test_pool()], ReserveUnits::TokenDecimals);
        assert_eq!(snapshot.amount_decimals(&TokenAddress::new(USDC)), Some(6));

        let snapshot = PoolSnapshot::new(vec![create_test_pool()], ReserveUnits::Fixed18);
        assert_eq!(snapshot.amount_decimals(&TokenAddress::new(USDC)), Some(18));
        assert_eq!(snapshot.amount_decimals(&TokenAddress::new("0xdead")), None);
    }

    #[test]
    fn test_empty_quote_result() {
        let result = QuoteResult::empty(TradeDirection::ExactInput, U256::zero());
        assert!(result.is_empty());
        assert_eq!(result.quote, U256::zero());
        assert_eq!(result.price_impact, Decimal::ZERO);
    }
}
