pub mod pools;
pub mod quote;
pub mod routes;

use crate::cli::display::QuoteDisplay;
use crate::core::{Config, PoolSnapshot, SwapResult};
use crate::discovery::{FileSource, PoolDiscovery};
use std::path::Path;
use std::sync::Arc;

/// Load the snapshot from `file` when given, otherwise from the subgraph.
pub async fn load_snapshot(config: &Config, file: Option<&Path>) -> SwapResult<Arc<PoolSnapshot>> {
    let pb = QuoteDisplay::create_progress_bar("Loading pools...");

    let discovery = match file {
        Some(path) => {
            pb.set_message(format!("Reading pairs from {}...", path.display()));
            PoolDiscovery::with_source(config, Arc::new(FileSource::new(path)))
        }
        None => {
            pb.set_message(format!("Fetching pairs from {}...", config.subgraph_url));
            PoolDiscovery::new(config)?
        }
    };

    let snapshot = discovery.load_snapshot().await;
    pb.finish_and_clear();
    snapshot
}
