use crate::core::{
    Config, Pool, ReserveUnits, SwapError, SwapResult, TokenInfo, MAX_SUBGRAPH_SKIP,
    MAX_TOKEN_DECIMALS,
};
use crate::discovery::source::SnapshotSource;
use crate::utils::parse_units_truncating;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;

const PAIRS_QUERY: &str = r#"
query GetPools($first: Int!, $skip: Int!) {
    pairs(first: $first, skip: $skip, orderBy: volumeUSD, orderDirection: desc) {
        id
        reserve0
        reserve1
        token0 {
            id
            name
            symbol
            decimals
        }
        token1 {
            id
            name
            symbol
            decimals
        }
        totalSupply
        volumeUSD
        reserveUSD
    }
}
"#;

/// Token as returned by the v2 subgraph. Decimals arrive as a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairToken {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub symbol: String,
    pub decimals: String,
}

impl PairToken {
    fn into_token_info(self) -> SwapResult<TokenInfo> {
        let decimals: u8 = self.decimals.trim().parse().map_err(|_| {
            SwapError::SnapshotError(format!(
                "token {} has invalid decimals {:?}",
                self.id, self.decimals
            ))
        })?;
        if decimals > MAX_TOKEN_DECIMALS {
            return Err(SwapError::SnapshotError(format!(
                "token {} has unsupported decimals {}",
                self.id, decimals
            )));
        }

        let mut token = TokenInfo::new(self.id.as_str(), &self.symbol, decimals);
        if !token.address.is_valid_evm() {
            return Err(SwapError::InvalidTokenAddress(self.id));
        }
        if !self.name.is_empty() {
            token.name = self.name;
        }
        Ok(token)
    }
}

/// One v2 pair record. Reserves are human-decimal strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairRecord {
    pub id: String,
    pub reserve0: String,
    pub reserve1: String,
    pub token0: PairToken,
    pub token1: PairToken,
    #[serde(default)]
    pub total_supply: Option<String>,
    #[serde(rename = "volumeUSD", default)]
    pub volume_usd: Option<String>,
    #[serde(rename = "reserveUSD", default)]
    pub reserve_usd: Option<String>,
}

impl PairRecord {
    /// Convert to a `Pool`, scaling both reserves with `units`.
    pub fn into_pool(self, units: ReserveUnits) -> SwapResult<Pool> {
        let token_a = self.token0.into_token_info()?;
        let token_b = self.token1.into_token_info()?;

        let reserve_a = parse_units_truncating(&self.reserve0, units.decimals_for(&token_a))?;
        let reserve_b = parse_units_truncating(&self.reserve1, units.decimals_for(&token_b))?;

        Ok(Pool::new(token_a, token_b, reserve_a, reserve_b).with_id(self.id))
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct PairsData {
    pub pairs: Vec<PairRecord>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    data: Option<PairsData>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

/// Pair source backed by a v2 subgraph GraphQL endpoint.
pub struct SubgraphClient {
    http_client: reqwest::Client,
    url: String,
    page_size: usize,
}

impl SubgraphClient {
    pub fn new(config: &Config) -> SwapResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http_client,
            url: config.subgraph_url.clone(),
            page_size: config.pool_page_size.max(1),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn fetch_page(&self, skip: usize) -> SwapResult<Vec<PairRecord>> {
        let body = json!({
            "query": PAIRS_QUERY,
            "variables": { "first": self.page_size, "skip": skip },
        });

        let response = self
            .http_client
            .post(&self.url)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        let response: GraphQlResponse = response.json().await?;

        if !response.errors.is_empty() {
            let messages: Vec<String> = response.errors.into_iter().map(|e| e.message).collect();
            return Err(SwapError::SnapshotError(format!(
                "subgraph returned errors: {}",
                messages.join("; ")
            )));
        }

        response
            .data
            .map(|data| data.pairs)
            .ok_or_else(|| SwapError::SnapshotError("subgraph response has no data".to_string()))
    }
}

#[async_trait::async_trait]
impl SnapshotSource for SubgraphClient {
    async fn fetch_pairs(&self) -> SwapResult<Vec<PairRecord>> {
        let mut pairs = Vec::new();
        let mut skip = 0;

        loop {
            let page = self.fetch_page(skip).await?;
            let page_len = page.len();
            debug!("Fetched {} pairs at skip {}", page_len, skip);
            pairs.extend(page);

            if page_len < self.page_size {
                break;
            }
            skip += self.page_size;
            if skip > MAX_SUBGRAPH_SKIP {
                info!("Reached subgraph skip limit with {} pairs", pairs.len());
                break;
            }
        }

        info!("Fetched {} pairs from {}", pairs.len(), self.url);
        Ok(pairs)
    }

    fn cache_key(&self) -> String {
        format!("subgraph:{}", self.url)
    }
}
