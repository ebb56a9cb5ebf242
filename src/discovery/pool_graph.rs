use crate::core::{Pool, TokenAddress, U256};
use log::{debug, warn};
use std::collections::{HashMap, HashSet};

/// Adjacency view over an immutable pool snapshot.
///
/// Lookups are order-independent and case-insensitive (addresses are
/// normalized by `TokenAddress`). When a snapshot holds several pools for the
/// same pair, the first one in snapshot order wins.
pub struct PoolGraph<'a> {
    pools: &'a [Pool],
    adjacency: HashMap<TokenAddress, HashMap<TokenAddress, usize>>,
    tokens: Vec<TokenAddress>,
}

impl<'a> PoolGraph<'a> {
    pub fn new(pools: &'a [Pool]) -> Self {
        let mut adjacency: HashMap<TokenAddress, HashMap<TokenAddress, usize>> = HashMap::new();
        let mut tokens = Vec::new();
        let mut seen = HashSet::new();

        for (index, pool) in pools.iter().enumerate() {
            let a = &pool.token_a.address;
            let b = &pool.token_b.address;

            for token in [a, b] {
                if seen.insert(token.clone()) {
                    tokens.push(token.clone());
                }
            }

            if a == b {
                warn!("Ignoring pool {:?} pairing {} with itself", pool.id, a);
                continue;
            }

            let entry = adjacency.entry(a.clone()).or_default();
            if entry.contains_key(b) {
                debug!("Duplicate pool for {}/{} at index {}, keeping first", a, b, index);
                continue;
            }
            entry.insert(b.clone(), index);
            adjacency.entry(b.clone()).or_default().insert(a.clone(), index);
        }

        Self {
            pools,
            adjacency,
            tokens,
        }
    }

    pub fn pool_exists(&self, token_a: &TokenAddress, token_b: &TokenAddress) -> bool {
        self.pool_index(token_a, token_b).is_some()
    }

    pub fn find_pool(&self, token_a: &TokenAddress, token_b: &TokenAddress) -> Option<&'a Pool> {
        self.pool_index(token_a, token_b).map(|index| &self.pools[index])
    }

    /// `(reserve_in, reserve_out)` for a hop selling `token_in` into `token_out`.
    pub fn reserves_for_hop(
        &self,
        token_in: &TokenAddress,
        token_out: &TokenAddress,
    ) -> Option<(U256, U256)> {
        self.find_pool(token_in, token_out)?
            .reserves_for_swap(token_in)
    }

    /// Distinct tokens in order of first appearance in the snapshot.
    pub fn tokens(&self) -> &[TokenAddress] {
        &self.tokens
    }

    pub fn pools_for_token(&self, token: &TokenAddress) -> Vec<&'a Pool> {
        let pools = self.pools;
        let mut indices: Vec<usize> = self
            .adjacency
            .get(token)
            .map(|neighbours| neighbours.values().copied().collect())
            .unwrap_or_default();
        indices.sort_unstable();
        indices.into_iter().map(|index| &pools[index]).collect()
    }

    fn pool_index(&self, token_a: &TokenAddress, token_b: &TokenAddress) -> Option<usize> {
        self.adjacency.get(token_a)?.get(token_b).copied()
    }
}
