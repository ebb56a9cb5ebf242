use crate::core::{
    math::{ratio_to_decimal, to_u64_saturating},
    Route, TradeDirection, U256, BPS_DENOMINATOR, PRICE_IMPACT_SCALE, SLIPPAGE_BUFFER_BPS,
};
use crate::discovery::PoolGraph;
use crate::quotes::AmmQuoteCalculator;
use log::{debug, warn};
use rust_decimal::Decimal;

/// Price impact and slippage derived for a simulated route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiskAssessment {
    pub ideal_amount: U256,
    pub price_impact: Decimal,
    pub slippage_bps: u64,
    pub suggested_slippage: Decimal,
    /// Minimum output (ExactInput) or maximum input (ExactOutput).
    pub amount_limit: U256,
}

pub struct RiskEstimator {
    calculator: AmmQuoteCalculator,
    buffer_bps: u64,
}

impl RiskEstimator {
    pub fn new() -> Self {
        Self {
            calculator: AmmQuoteCalculator::new(),
            buffer_bps: SLIPPAGE_BUFFER_BPS,
        }
    }

    /// Amount the route would yield (or need) at the marginal, fee-free price
    /// of every hop. Hops without a usable pool are skipped.
    pub fn ideal_amount(
        &self,
        graph: &PoolGraph<'_>,
        route: &Route,
        amount: U256,
        direction: TradeDirection,
    ) -> U256 {
        let mut ideal = amount;

        let mut hops: Vec<_> = route.hops().collect();
        if direction == TradeDirection::ExactOutput {
            hops.reverse();
        }

        for (token_a, token_b) in hops {
            let Some((reserve_in, reserve_out)) = graph.reserves_for_hop(token_a, token_b) else {
                continue;
            };

            let next = match direction {
                TradeDirection::ExactInput => {
                    self.calculator.quote_marginal(ideal, reserve_in, reserve_out)
                }
                TradeDirection::ExactOutput => {
                    self.calculator.quote_marginal(ideal, reserve_out, reserve_in)
                }
            };

            match next {
                Ok(value) => ideal = value,
                Err(e) => debug!("Ideal amount skips hop {}/{}: {}", token_a, token_b, e),
            }
        }

        ideal
    }

    /// Compare the simulated amount with the ideal one and derive slippage.
    ///
    /// Slippage in basis points is `floor(impact * 10000) + buffer`, computed
    /// on integers, which equals `floor((impact + 0.001) * 10000)`.
    pub fn assess(
        &self,
        graph: &PoolGraph<'_>,
        route: &Route,
        amount: U256,
        simulated: U256,
        direction: TradeDirection,
    ) -> RiskAssessment {
        if route.is_empty() {
            return RiskAssessment {
                ideal_amount: U256::zero(),
                price_impact: Decimal::ZERO,
                slippage_bps: 0,
                suggested_slippage: Decimal::ZERO,
                amount_limit: simulated,
            };
        }

        let ideal = self.ideal_amount(graph, route, amount, direction);

        let deviation = match direction {
            TradeDirection::ExactInput => ideal.saturating_sub(simulated),
            TradeDirection::ExactOutput => simulated.saturating_sub(ideal),
        };

        let (price_impact, impact_bps) = if ideal.is_zero() {
            (Decimal::ZERO, U256::zero())
        } else {
            let bps = U256::from(BPS_DENOMINATOR);
            let impact_bps = match deviation.checked_mul(bps) {
                Some(scaled) => scaled / ideal,
                None => (deviation / ideal).saturating_mul(bps),
            };
            (
                ratio_to_decimal(deviation, ideal, PRICE_IMPACT_SCALE),
                impact_bps,
            )
        };

        let slippage_bps = impact_bps.saturating_add(U256::from(self.buffer_bps));
        let suggested_slippage =
            ratio_to_decimal(slippage_bps, U256::from(BPS_DENOMINATOR), PRICE_IMPACT_SCALE);

        if price_impact == Decimal::MAX || slippage_bps > U256::from(u64::MAX) {
            warn!(
                "Price impact on route {} exceeds the reportable range, capping \
                 (deviation {} over ideal {})",
                route, deviation, ideal
            );
        }

        RiskAssessment {
            ideal_amount: ideal,
            price_impact,
            slippage_bps: to_u64_saturating(slippage_bps),
            suggested_slippage,
            amount_limit: apply_slippage(simulated, slippage_bps, direction),
        }
    }
}

impl Default for RiskEstimator {
    fn default() -> Self {
        Self::new()
    }
}

/// Integer slippage application over a 10000 denominator.
fn apply_slippage(amount: U256, slippage_bps: U256, direction: TradeDirection) -> U256 {
    let denominator = U256::from(BPS_DENOMINATOR);

    match direction {
        TradeDirection::ExactInput => {
            let kept = denominator.saturating_sub(slippage_bps.min(denominator));
            match amount.checked_mul(kept) {
                Some(product) => product / denominator,
                None => (amount / denominator) * kept,
            }
        }
        TradeDirection::ExactOutput => {
            let factor = denominator.saturating_add(slippage_bps);
            match amount.checked_mul(factor) {
                Some(product) => product / denominator,
                None => U256::MAX,
            }
        }
    }
}
