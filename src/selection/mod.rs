pub mod route_enumerator;

use crate::core::{Route, SwapError, SwapResult, TokenAddress, TradeDirection, U256, MAX_HOPS};
use crate::discovery::PoolGraph;
use crate::quotes::AmmQuoteCalculator;
use log::{debug, info};

pub use route_enumerator::RouteEnumerator;

/// Winning route and its simulated amount: output for `ExactInput`, required
/// input for `ExactOutput`. An empty route means no candidate was valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteSelection {
    pub route: Route,
    pub amount: U256,
}

impl RouteSelection {
    pub fn none() -> Self {
        Self {
            route: Route::empty(),
            amount: U256::zero(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.route.is_empty()
    }
}

/// One candidate route with its simulation outcome.
#[derive(Debug)]
pub struct RouteEvaluation {
    pub route: Route,
    pub result: SwapResult<U256>,
}

/// Simulates candidate routes hop by hop and keeps the best one.
pub struct RouteSelector {
    calculator: AmmQuoteCalculator,
    max_hops: usize,
}

impl RouteSelector {
    pub fn new(max_hops: usize) -> Self {
        Self {
            calculator: AmmQuoteCalculator::new(),
            max_hops,
        }
    }

    /// Simulate `amount` along `route` with real reserves.
    ///
    /// `ExactInput` walks forward applying `get_amount_out`; `ExactOutput`
    /// walks backward from the last token applying `get_amount_in`.
    pub fn simulate_route(
        &self,
        graph: &PoolGraph<'_>,
        route: &Route,
        amount: U256,
        direction: TradeDirection,
    ) -> SwapResult<U256> {
        let mut result = amount;

        match direction {
            TradeDirection::ExactInput => {
                for (token_a, token_b) in route.hops() {
                    let (reserve_in, reserve_out) = hop_reserves(graph, token_a, token_b)?;
                    result = self.calculator.get_amount_out(result, reserve_in, reserve_out)?;
                }
            }
            TradeDirection::ExactOutput => {
                for (token_a, token_b) in route.hops().rev() {
                    let (reserve_in, reserve_out) = hop_reserves(graph, token_a, token_b)?;
                    result = self.calculator.get_amount_in(result, reserve_in, reserve_out)?;
                }
            }
        }

        Ok(result)
    }

    /// Every candidate route with its simulated amount or the reason it was skipped.
    pub fn evaluate_all(
        &self,
        graph: &PoolGraph<'_>,
        token_in: &TokenAddress,
        token_out: &TokenAddress,
        amount: U256,
        direction: TradeDirection,
    ) -> Vec<RouteEvaluation> {
        RouteEnumerator::new(graph, self.max_hops)
            .enumerate(token_in, token_out)
            .into_iter()
            .map(|route| {
                let result = self.simulate_route(graph, &route, amount, direction);
                RouteEvaluation { route, result }
            })
            .collect()
    }

    /// Best route for the trade. Ties keep the first route found.
    pub fn select_best_route(
        &self,
        graph: &PoolGraph<'_>,
        token_in: &TokenAddress,
        token_out: &TokenAddress,
        amount: U256,
        direction: TradeDirection,
    ) -> RouteSelection {
        let evaluations = self.evaluate_all(graph, token_in, token_out, amount, direction);
        let candidates = evaluations.len();

        let mut best = RouteSelection::none();
        // ExactOutput starts unbounded so the first valid route always wins
        let mut best_input: Option<U256> = None;

        for evaluation in evaluations {
            let simulated = match evaluation.result {
                Ok(simulated) => simulated,
                Err(e) => {
                    debug!("Skipping route {}: {}", evaluation.route, e);
                    continue;
                }
            };

            debug!("Route {} ({}): {}", evaluation.route, direction, simulated);

            match direction {
                TradeDirection::ExactInput => {
                    if simulated > best.amount {
                        best = RouteSelection {
                            route: evaluation.route,
                            amount: simulated,
                        };
                    }
                }
                TradeDirection::ExactOutput => {
                    if best_input.map_or(true, |current| simulated < current) {
                        best_input = Some(simulated);
                        best = RouteSelection {
                            route: evaluation.route,
                            amount: simulated,
                        };
                    }
                }
            }
        }

        if best.is_empty() {
            info!(
                "No valid route for {} -> {} among {} candidates",
                token_in, token_out, candidates
            );
        } else {
            info!(
                "Selected {}-hop route {} out of {} candidates",
                best.route.hop_count(),
                best.route,
                candidates
            );
        }

        best
    }
}

impl Default for RouteSelector {
    fn default() -> Self {
        Self::new(MAX_HOPS)
    }
}

fn hop_reserves(
    graph: &PoolGraph<'_>,
    token_a: &TokenAddress,
    token_b: &TokenAddress,
) -> SwapResult<(U256, U256)> {
    graph
        .reserves_for_hop(token_a, token_b)
        .ok_or_else(|| SwapError::PoolNotFound(format!("{}/{}", token_a, token_b)))
}
