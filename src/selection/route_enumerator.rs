use crate::core::{Route, TokenAddress, MAX_HOPS};
use crate::discovery::PoolGraph;
use log::debug;

/// Generates candidate routes of 1 to `max_hops` hops.
///
/// Routes never repeat a token. Generation order is deterministic for a given
/// snapshot: direct route, then 2-hop routes in token order, then 3-hop routes
/// for each token pair `(x, y)` as `[in, x, y, out]` followed by `[in, y, x, out]`.
/// Selection breaks ties on this order.
pub struct RouteEnumerator<'g, 'a> {
    graph: &'g PoolGraph<'a>,
    max_hops: usize,
}

impl<'g, 'a> RouteEnumerator<'g, 'a> {
    pub fn new(graph: &'g PoolGraph<'a>, max_hops: usize) -> Self {
        Self {
            graph,
            max_hops: max_hops.min(MAX_HOPS),
        }
    }

    pub fn enumerate(&self, token_in: &TokenAddress, token_out: &TokenAddress) -> Vec<Route> {
        let mut routes = Vec::new();
        if token_in == token_out || self.max_hops == 0 {
            return routes;
        }

        let graph = self.graph;

        if graph.pool_exists(token_in, token_out) {
            routes.push(Route::new(vec![token_in.clone(), token_out.clone()]));
        }

        if self.max_hops >= 2 {
            let candidates: Vec<&TokenAddress> = graph
                .tokens()
                .iter()
                .filter(|token| *token != token_in && *token != token_out)
                .collect();

            for x in &candidates {
                if graph.pool_exists(token_in, x) && graph.pool_exists(x, token_out) {
                    routes.push(Route::new(vec![
                        token_in.clone(),
                        (*x).clone(),
                        token_out.clone(),
                    ]));
                }
            }

            if self.max_hops >= 3 {
                for (i, x) in candidates.iter().enumerate() {
                    for y in &candidates[i + 1..] {
                        if !graph.pool_exists(x, y) {
                            continue;
                        }
                        if graph.pool_exists(token_in, x) && graph.pool_exists(y, token_out) {
                            routes.push(Route::new(vec![
                                token_in.clone(),
                                (*x).clone(),
                                (*y).clone(),
                                token_out.clone(),
                            ]));
                        }
                        if graph.pool_exists(token_in, y) && graph.pool_exists(x, token_out) {
                            routes.push(Route::new(vec![
                                token_in.clone(),
                                (*y).clone(),
                                (*x).clone(),
                                token_out.clone(),
                            ]));
                        }
                    }
                }
            }
        }

        debug!(
            "Enumerated {} candidate routes for {} -> {} (max {} hops)",
            routes.len(),
            token_in,
            token_out,
            self.max_hops
        );

        routes
    }
}
