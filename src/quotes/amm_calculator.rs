use crate::core::{
    math::mul_div, SwapError, SwapResult, U256, FEE_DENOMINATOR, FEE_NUMERATOR,
};

/// Constant-product (x * y = k) pricing with a fixed 0.3% input fee.
///
/// All arithmetic is integer over smallest units; results are floored the
/// same way the on-chain router floors them.
#[derive(Debug, Clone, Copy)]
pub struct AmmQuoteCalculator {
    fee_numerator: U256,
    fee_denominator: U256,
}

impl AmmQuoteCalculator {
    pub fn new() -> Self {
        Self {
            fee_numerator: U256::from(FEE_NUMERATOR),
            fee_denominator: U256::from(FEE_DENOMINATOR),
        }
    }

    /// Output received for selling `amount_in`:
    /// `floor(amount_in * 997 * reserve_out / (reserve_in * 1000 + amount_in * 997))`.
    pub fn get_amount_out(
        &self,
        amount_in: U256,
        reserve_in: U256,
        reserve_out: U256,
    ) -> SwapResult<U256> {
        if reserve_in.is_zero() || reserve_out.is_zero() {
            return Err(SwapError::InvalidPoolState(
                "Pool has zero reserves".to_string(),
            ));
        }

        if amount_in.is_zero() {
            return Ok(U256::zero());
        }

        let amount_in_with_fee = amount_in
            .checked_mul(self.fee_numerator)
            .ok_or(SwapError::MathOverflow)?;
        let numerator = amount_in_with_fee
            .checked_mul(reserve_out)
            .ok_or(SwapError::MathOverflow)?;
        let denominator = reserve_in
            .checked_mul(self.fee_denominator)
            .and_then(|scaled| scaled.checked_add(amount_in_with_fee))
            .ok_or(SwapError::MathOverflow)?;

        Ok(numerator / denominator)
    }

    /// Input required to receive `amount_out`:
    /// `floor(reserve_in * amount_out * 1000 / ((reserve_out - amount_out) * 997)) + 1`.
    ///
    /// The `+ 1` makes sure the computed input never under-delivers.
    pub fn get_amount_in(
        &self,
        amount_out: U256,
        reserve_in: U256,
        reserve_out: U256,
    ) -> SwapResult<U256> {
        if reserve_in.is_zero() || reserve_out.is_zero() {
            return Err(SwapError::InvalidPoolState(
                "Pool has zero reserves".to_string(),
            ));
        }

        if amount_out >= reserve_out {
            return Err(SwapError::InsufficientLiquidity {
                available: reserve_out,
                required: amount_out,
            });
        }

        let numerator = reserve_in
            .checked_mul(amount_out)
            .and_then(|product| product.checked_mul(self.fee_denominator))
            .ok_or(SwapError::MathOverflow)?;
        let denominator = (reserve_out - amount_out)
            .checked_mul(self.fee_numerator)
            .ok_or(SwapError::MathOverflow)?;

        (numerator / denominator)
            .checked_add(U256::one())
            .ok_or(SwapError::MathOverflow)
    }

    /// Fee-free conversion at the pool's marginal price:
    /// `floor(amount * reserve_to / reserve_from)`.
    pub fn quote_marginal(
        &self,
        amount: U256,
        reserve_from: U256,
        reserve_to: U256,
    ) -> SwapResult<U256> {
        if reserve_from.is_zero() {
            return Err(SwapError::InvalidPoolState(
                "Pool has zero reserves".to_string(),
            ));
        }
        mul_div(amount, reserve_to, reserve_from)
    }
}

impl Default for AmmQuoteCalculator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn u(value: u64) -> U256 {
        U256::from(value)
    }

    #[test]
    fn test_calculate_output_amount() {
        let calculator = AmmQuoteCalculator::new();

        // 100 * 997 * 1000 / (1000 * 1000 + 100 * 997) = 90.66...
        let amount_out = calculator.get_amount_out(u(100), u(1000), u(1000)).unwrap();
        assert_eq!(amount_out, u(90));

        let amount_out = calculator.get_amount_out(u(90), u(1000), u(1000)).unwrap();
        assert_eq!(amount_out, u(82));

        // With 0.3% fee and deep equal reserves, output is just under input
        let amount_out = calculator
            .get_amount_out(u(1000), u(1_000_000_000), u(1_000_000_000))
            .unwrap();
        assert_eq!(amount_out, u(996));
    }

    #[test]
    fn test_calculate_input_amount() {
        let calculator = AmmQuoteCalculator::new();

        // 1000 * 90 * 1000 / (910 * 997) = 99.19... -> 99 + 1
        let amount_in = calculator.get_amount_in(u(90), u(1000), u(1000)).unwrap();
        assert_eq!(amount_in, u(100));

        // Zero output still charges the rounding unit
        let amount_in = calculator.get_amount_in(u(0), u(1000), u(1000)).unwrap();
        assert_eq!(amount_in, u(1));
    }

    #[test]
    fn test_input_needs_liquidity() {
        let calculator = AmmQuoteCalculator::new();

        let result = calculator.get_amount_in(u(1000), u(1000), u(1000));
        assert!(matches!(
            result,
            Err(SwapError::InsufficientLiquidity { available, required })
                if available == u(1000) && required == u(1000)
        ));
        assert!(calculator.get_amount_in(u(2000), u(1000), u(1000)).is_err());
    }

    #[test]
    fn test_edge_cases() {
        let calculator = AmmQuoteCalculator::new();

        // Zero input
        let amount_out = calculator.get_amount_out(u(0), u(1000), u(1000)).unwrap();
        assert_eq!(amount_out, u(0));

        // Zero reserves should error, even with zero input
        assert!(calculator.get_amount_out(u(1000), u(0), u(1000)).is_err());
        assert!(calculator.get_amount_out(u(0), u(0), u(1000)).is_err());
        assert!(calculator.get_amount_out(u(1000), u(1000), u(0)).is_err());
        assert!(calculator.get_amount_in(u(10), u(0), u(1000)).is_err());
    }

    #[test]
    fn test_overflow_is_reported() {
        let calculator = AmmQuoteCalculator::new();

        let result = calculator.get_amount_out(U256::MAX, u(1000), u(1000));
        assert!(matches!(result, Err(SwapError::MathOverflow)));

        let result = calculator.get_amount_in(u(10), U256::MAX, u(1000));
        assert!(matches!(result, Err(SwapError::MathOverflow)));
    }

    #[test]
    fn test_quote_marginal() {
        let calculator = AmmQuoteCalculator::new();

        assert_eq!(calculator.quote_marginal(u(100), u(1000), u(2000)).unwrap(), u(200));
        assert_eq!(calculator.quote_marginal(u(1), u(3), u(2)).unwrap(), u(0));
        assert!(calculator.quote_marginal(u(1), u(0), u(2)).is_err());
    }
}
