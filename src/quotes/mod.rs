pub mod amm_calculator;
pub mod risk;

use crate::core::{
    Config, Pool, PoolSnapshot, QuoteRequest, QuoteResult, SwapError, SwapResult, TokenAddress,
    TradeDirection, U256, MAX_HOPS,
};
use crate::discovery::PoolGraph;
use crate::selection::{RouteEvaluation, RouteSelector};
use crate::utils::parse_units;
use log::{debug, info};

pub use amm_calculator::AmmQuoteCalculator;
pub use risk::{RiskAssessment, RiskEstimator};

/// Route search, simulation and risk estimation over one pool snapshot.
///
/// Pure and synchronous: the engine only borrows the snapshot, so quotes on a
/// shared `Arc<PoolSnapshot>` can run in parallel.
pub struct QuoteEngine {
    selector: RouteSelector,
    risk: RiskEstimator,
}

impl QuoteEngine {
    pub fn new(max_hops: usize) -> Self {
        Self {
            selector: RouteSelector::new(max_hops),
            risk: RiskEstimator::new(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.max_hops)
    }

    /// Best quote for `amount` of `token_in` -> `token_out`.
    ///
    /// A zero amount or a pair with no valid route yields an empty result;
    /// callers check `QuoteResult::is_empty`.
    pub fn quote(
        &self,
        pools: &[Pool],
        token_in: &TokenAddress,
        token_out: &TokenAddress,
        amount: U256,
        direction: TradeDirection,
    ) -> QuoteResult {
        if amount.is_zero() {
            debug!("Zero amount for {} -> {}, skipping route search", token_in, token_out);
            return QuoteResult::empty(direction, amount);
        }

        let graph = PoolGraph::new(pools);
        let selection = self
            .selector
            .select_best_route(&graph, token_in, token_out, amount, direction);

        if selection.is_empty() {
            return QuoteResult::empty(direction, amount);
        }

        let assessment =
            self.risk
                .assess(&graph, &selection.route, amount, selection.amount, direction);

        info!(
            "{} quote {} -> {}: amount={}, quote={}, impact={}, slippage={}bps",
            direction,
            token_in,
            token_out,
            amount,
            selection.amount,
            assessment.price_impact,
            assessment.slippage_bps
        );

        QuoteResult {
            route: selection.route,
            direction,
            amount,
            quote: selection.amount,
            ideal_quote: assessment.ideal_amount,
            price_impact: assessment.price_impact,
            suggested_slippage: assessment.suggested_slippage,
            suggested_slippage_bps: assessment.slippage_bps,
            amount_limit: assessment.amount_limit,
        }
    }

    /// Every candidate route with its simulated amount or skip reason.
    pub fn evaluate_routes(
        &self,
        pools: &[Pool],
        token_in: &TokenAddress,
        token_out: &TokenAddress,
        amount: U256,
        direction: TradeDirection,
    ) -> Vec<RouteEvaluation> {
        let graph = PoolGraph::new(pools);
        self.selector
            .evaluate_all(&graph, token_in, token_out, amount, direction)
    }

    /// Quote a validated request against a snapshot, parsing the request
    /// amount with the snapshot's unit convention.
    pub fn quote_request(
        &self,
        snapshot: &PoolSnapshot,
        request: &QuoteRequest,
    ) -> SwapResult<QuoteResult> {
        let amount = parse_request_amount(snapshot, request)?;
        Ok(self.quote(
            &snapshot.pools,
            &request.token_in,
            &request.token_out,
            amount,
            request.direction,
        ))
    }
}

impl Default for QuoteEngine {
    fn default() -> Self {
        Self::new(MAX_HOPS)
    }
}

/// Convert the human-readable request amount into the snapshot's smallest units.
pub fn parse_request_amount(snapshot: &PoolSnapshot, request: &QuoteRequest) -> SwapResult<U256> {
    let token = request.amount_token();
    let decimals = snapshot
        .amount_decimals(token)
        .ok_or_else(|| SwapError::TokenNotFound(token.to_string()))?;
    parse_units(&request.amount, decimals)
}

/// Single-call entry point with the default hop cap.
pub fn compute_quote(
    amount: U256,
    token_in: &TokenAddress,
    token_out: &TokenAddress,
    pools: &[Pool],
    direction: TradeDirection,
) -> QuoteResult {
    QuoteEngine::default().quote(pools, token_in, token_out, amount, direction)
}
