use crate::core::math::U256;
use thiserror::Error;

pub type SwapResult<T> = Result<T, SwapError>;

#[derive(Error, Debug)]
pub enum SwapError {
    #[error("Insufficient liquidity: available {available}, required {required}")]
    InsufficientLiquidity { available: U256, required: U256 },

    #[error("Invalid pool state: {0}")]
    InvalidPoolState(String),

    #[error("Math overflow in calculation")]
    MathOverflow,

    #[error("The \"{0}\" address is invalid")]
    InvalidTokenAddress(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("The quote request requires an amount; neither \"fromAmount\" nor \"toAmount\" was provided.")]
    MissingAmount,

    #[error("The quote request requires either \"fromAmount\" or \"toAmount\", but not both.")]
    MultipleAmounts,

    #[error("Pool not found: {0}")]
    PoolNotFound(String),

    #[error("Token not found: {0}")]
    TokenNotFound(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Snapshot error: {0}")]
    SnapshotError(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<reqwest::Error> for SwapError {
    fn from(err: reqwest::Error) -> Self {
        SwapError::NetworkError(err.to_string())
    }
}

impl From<serde_json::Error> for SwapError {
    fn from(err: serde_json::Error) -> Self {
        SwapError::SerializationError(err.to_string())
    }
}
