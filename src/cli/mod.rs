use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;
pub mod display;

#[derive(Parser)]
#[command(name = "swap-quoter")]
#[command(
    about = "Multi-hop route finder and quote tool for constant-product pools",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Get the best route quote with price impact and suggested slippage
    Quote(QuoteArgs),

    /// List every candidate route with its simulated amount
    Routes(RoutesArgs),

    /// Find all pools containing a specific token
    Pools(PoolsArgs),
}

#[derive(Parser)]
pub struct QuoteArgs {
    /// Token to sell
    pub from_token: String,

    /// Token to buy
    pub to_token: String,

    /// Exact amount to sell (human-readable, e.g. 1.5)
    #[arg(long)]
    pub from_amount: Option<String>,

    /// Exact amount to buy (human-readable)
    #[arg(long)]
    pub to_amount: Option<String>,

    /// Read pairs from a JSON file instead of the subgraph
    #[arg(short, long, env = "SNAPSHOT_FILE")]
    pub snapshot: Option<PathBuf>,

    /// Print the quote as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser)]
pub struct RoutesArgs {
    /// Token to sell
    pub from_token: String,

    /// Token to buy
    pub to_token: String,

    /// Amount to sell, or to buy with --exact-output
    pub amount: String,

    /// Treat the amount as the exact output
    #[arg(long)]
    pub exact_output: bool,

    /// Read pairs from a JSON file instead of the subgraph
    #[arg(short, long, env = "SNAPSHOT_FILE")]
    pub snapshot: Option<PathBuf>,
}

#[derive(Parser)]
pub struct PoolsArgs {
    /// Token address to search for
    pub token: String,

    /// Read pairs from a JSON file instead of the subgraph
    #[arg(short, long, env = "SNAPSHOT_FILE")]
    pub snapshot: Option<PathBuf>,

    /// Show detailed pool information
    #[arg(short, long)]
    pub detailed: bool,
}
