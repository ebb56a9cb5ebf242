use crate::cli::{commands::load_snapshot, display::QuoteDisplay, QuoteArgs};
use crate::core::{Config, QuoteRequest, SwapResult};
use crate::quotes::QuoteEngine;
use colored::*;
use console::style;
use log::info;

pub async fn execute(args: QuoteArgs, config: &Config) -> SwapResult<()> {
    let request = QuoteRequest::from_parts(
        &args.from_token,
        &args.to_token,
        args.from_amount.as_deref(),
        args.to_amount.as_deref(),
    )?;

    if !args.json {
        println!("{}", "🚀 Swap Route Quote".bold().cyan());
    }

    let snapshot = load_snapshot(config, args.snapshot.as_deref()).await?;
    let engine = QuoteEngine::from_config(config);

    info!(
        "Quoting {} -> {} ({} {})",
        request.token_in, request.token_out, request.direction, request.amount
    );

    let result = engine.quote_request(&snapshot, &request)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    if result.is_empty() {
        println!(
            "{}",
            "❌ No route found for this token pair".red().bold()
        );
        return Ok(());
    }

    println!("\n{}", "🏆 Best Route Found".bold().green());
    QuoteDisplay::display_quote(&result, &snapshot);

    println!(
        "{}",
        style("💡 Tip: Use the routes command to compare every candidate route").dim()
    );

    Ok(())
}
