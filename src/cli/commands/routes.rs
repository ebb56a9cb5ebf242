use crate::cli::{commands::load_snapshot, display::QuoteDisplay, RoutesArgs};
use crate::core::{Config, QuoteRequest, SwapResult};
use crate::quotes::{parse_request_amount, QuoteEngine};
use colored::*;

pub async fn execute(args: RoutesArgs, config: &Config) -> SwapResult<()> {
    let (from_amount, to_amount) = if args.exact_output {
        (None, Some(args.amount.as_str()))
    } else {
        (Some(args.amount.as_str()), None)
    };
    let request =
        QuoteRequest::from_parts(&args.from_token, &args.to_token, from_amount, to_amount)?;

    println!("{}", "🔍 Evaluating candidate routes...".bold().cyan());

    let snapshot = load_snapshot(config, args.snapshot.as_deref()).await?;
    let engine = QuoteEngine::from_config(config);
    let amount = parse_request_amount(&snapshot, &request)?;

    let evaluations = engine.evaluate_routes(
        &snapshot.pools,
        &request.token_in,
        &request.token_out,
        amount,
        request.direction,
    );

    if evaluations.is_empty() {
        println!(
            "{}",
            "❌ No route connects these tokens".red().bold()
        );
        return Ok(());
    }

    let best = engine.quote(
        &snapshot.pools,
        &request.token_in,
        &request.token_out,
        amount,
        request.direction,
    );

    QuoteDisplay::display_route_evaluations(
        &evaluations,
        &best.route,
        request.direction,
        &snapshot,
    );

    let valid = evaluations.iter().filter(|e| e.result.is_ok()).count();
    println!(
        "\n{} {} of {} routes are tradable",
        "Summary:".bright_blue().bold(),
        valid.to_string().cyan().bold(),
        evaluations.len()
    );

    if !best.is_empty() {
        println!("\n{}", "🏆 Best Route".bold().green());
        QuoteDisplay::display_quote(&best, &snapshot);
    }

    Ok(())
}
