pub mod config;
pub mod constants;
pub mod error;
pub mod math;
pub mod types;

pub use config::Config;
pub use constants::*;
pub use error::{SwapError, SwapResult};
pub use math::U256;
pub use types::*;
