pub mod cli;
pub mod core;
pub mod discovery;
pub mod quotes;
pub mod selection;
pub mod utils;

// Re-export commonly used types
pub use core::{
    Config, Pool, PoolSnapshot, QuoteRequest, QuoteResult, ReserveUnits, Route, SwapError,
    SwapResult, TokenAddress, TokenInfo, TradeDirection, U256,
};
pub use discovery::{PoolDiscovery, PoolGraph};
pub use quotes::{compute_quote, QuoteEngine};
pub use selection::RouteSelector;
