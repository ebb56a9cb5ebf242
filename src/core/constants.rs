// TayaSwap v2 subgraph (Monad)
pub const DEFAULT_SUBGRAPH_URL: &str =
    "https://graph-monad.kindynos.mx/subgraphs/name/tayaswap-v2-subgraph";

// Constant-product fee: 0.3%
pub const FEE_NUMERATOR: u64 = 997;
pub const FEE_DENOMINATOR: u64 = 1000;

// Route search
pub const MAX_HOPS: usize = 3;

// Risk estimation
pub const BPS_DENOMINATOR: u64 = 10_000;
pub const SLIPPAGE_BUFFER_BPS: u64 = 10; // 0.1%
pub const PRICE_IMPACT_SCALE: u32 = 18;

// Cache TTL in seconds
pub const POOLS_CACHE_TTL: u64 = 300;

// Subgraph Configuration
pub const DEFAULT_TIMEOUT: u64 = 30;
pub const POOL_PAGE_SIZE: usize = 1000;
pub const MAX_SUBGRAPH_SKIP: usize = 5000;

// Reserve normalization
pub const FIXED_RESERVE_DECIMALS: u8 = 18;
pub const MAX_TOKEN_DECIMALS: u8 = 36;
