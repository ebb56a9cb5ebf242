use crate::cli::{commands::load_snapshot, display::QuoteDisplay, PoolsArgs};
use crate::core::{Config, SwapError, SwapResult, TokenAddress};
use crate::discovery::PoolGraph;
use colored::*;

pub async fn execute(args: PoolsArgs, config: &Config) -> SwapResult<()> {
    let token = TokenAddress::new(&args.token);
    if !token.is_valid_evm() {
        return Err(SwapError::InvalidTokenAddress("token".to_string()));
    }

    println!("{}", "🔍 Searching pools containing token...".bold().cyan());

    let snapshot = load_snapshot(config, args.snapshot.as_deref()).await?;
    let graph = PoolGraph::new(&snapshot.pools);
    let pools = graph.pools_for_token(&token);

    if pools.is_empty() {
        println!(
            "{}",
            "❌ No pools found containing this token".red().bold()
        );
        return Ok(());
    }

    println!(
        "\n{} {} {} {}",
        "Found".green().bold(),
        pools.len().to_string().cyan().bold(),
        "pools containing".green().bold(),
        token.to_string().bright_yellow()
    );

    QuoteDisplay::display_pool_list(&token, &pools, &snapshot, args.detailed);

    if !args.detailed {
        println!(
            "\n{}: Use {} to see detailed pool information",
            "Tip".bright_yellow().bold(),
            "--detailed".bright_cyan()
        );
    }

    Ok(())
}
