use crate::core::{constants::*, error::SwapResult, ReserveUnits, SwapError};
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub subgraph_url: String,
    pub timeout_secs: u64,
    pub cache_ttl_secs: u64,
    pub max_hops: usize,
    pub reserve_units: ReserveUnits,
    pub pool_page_size: usize,
}

impl Config {
    pub fn from_env() -> SwapResult<Self> {
        let reserve_units = match env::var("RESERVE_UNITS") {
            Ok(raw) if !raw.trim().is_empty() => raw.parse()?,
            _ => ReserveUnits::default(),
        };

        Ok(Self {
            subgraph_url: env::var("SUBGRAPH_URL")
                .unwrap_or_else(|_| DEFAULT_SUBGRAPH_URL.to_string()),
            timeout_secs: env::var("TIMEOUT_SECS")
                .unwrap_or_default()
                .parse()
                .unwrap_or(DEFAULT_TIMEOUT),
            cache_ttl_secs: env::var("POOLS_CACHE_TTL_SECS")
                .unwrap_or_default()
                .parse()
                .unwrap_or(POOLS_CACHE_TTL),
            max_hops: env::var("MAX_HOPS")
                .unwrap_or_default()
                .parse()
                .unwrap_or(MAX_HOPS),
            reserve_units,
            pool_page_size: env::var("POOL_PAGE_SIZE")
                .unwrap_or_default()
                .parse()
                .unwrap_or(POOL_PAGE_SIZE),
        })
    }

    pub fn validate(&self) -> SwapResult<()> {
        if self.max_hops == 0 || self.max_hops > MAX_HOPS {
            return Err(SwapError::ConfigError(format!(
                "Max hops must be between 1 and {}",
                MAX_HOPS
            )));
        }

        if self.timeout_secs == 0 {
            return Err(SwapError::ConfigError(
                "Timeout must be greater than 0".to_string(),
            ));
        }

        if self.pool_page_size == 0 || self.pool_page_size > POOL_PAGE_SIZE {
            return Err(SwapError::ConfigError(format!(
                "Pool page size must be between 1 and {}",
                POOL_PAGE_SIZE
            )));
        }

        if !(self.subgraph_url.starts_with("http://")
            || self.subgraph_url.starts_with("https://"))
        {
            return Err(SwapError::ConfigError(format!(
                "Subgraph URL must be http(s): {}",
                self.subgraph_url
            )));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            subgraph_url: DEFAULT_SUBGRAPH_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT,
            cache_ttl_secs: POOLS_CACHE_TTL,
            max_hops: MAX_HOPS,
            reserve_units: ReserveUnits::default(),
            pool_page_size: POOL_PAGE_SIZE,
        }
    }
}
