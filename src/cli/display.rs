use crate::core::{Pool, PoolSnapshot, QuoteResult, Route, TokenAddress, TradeDirection, U256};
use crate::selection::RouteEvaluation;
use crate::utils::{format_units, short_address};
use colored::*;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use rust_decimal::Decimal;

/// Display helper for quotes, routes and pools
pub struct QuoteDisplay;

impl QuoteDisplay {
    /// Display a single quote result
    pub fn display_quote(quote: &QuoteResult, snapshot: &PoolSnapshot) {
        let tokens = quote.route.tokens();
        let (Some(token_in), Some(token_out)) = (tokens.first(), tokens.last()) else {
            return;
        };

        println!(
            "{} {} ({}-hop){}",
            style("►").cyan(),
            route_label(&quote.route, snapshot).bold(),
            quote.route.hop_count(),
            match quote.direction {
                TradeDirection::ExactInput => "".normal(),
                TradeDirection::ExactOutput => " exact output".bright_blue(),
            }
        );

        println!(
            "  {} {} → {} {}",
            format_token_amount(quote.amount_in(), token_in, snapshot),
            token_symbol(token_in, snapshot),
            format_token_amount(quote.amount_out(), token_out, snapshot),
            token_symbol(token_out, snapshot)
        );

        let (ideal_token, ideal_label) = match quote.direction {
            TradeDirection::ExactInput => (token_out, "Ideal Output"),
            TradeDirection::ExactOutput => (token_in, "Ideal Input"),
        };
        println!(
            "  Price Impact: {} | {}: {} {}",
            format_impact(quote.price_impact),
            ideal_label,
            format_token_amount(quote.ideal_quote, ideal_token, snapshot),
            token_symbol(ideal_token, snapshot)
        );

        let (limit_token, limit_label) = match quote.direction {
            TradeDirection::ExactInput => (token_out, "Min Output"),
            TradeDirection::ExactOutput => (token_in, "Max Input"),
        };
        println!(
            "  {}: {} {} ({} slippage)",
            limit_label,
            format_token_amount(quote.amount_limit, limit_token, snapshot),
            token_symbol(limit_token, snapshot),
            percent(quote.suggested_slippage)
        );
        println!();
    }

    /// Display every candidate route, marking the selected one
    pub fn display_route_evaluations(
        evaluations: &[RouteEvaluation],
        best: &Route,
        direction: TradeDirection,
        snapshot: &PoolSnapshot,
    ) {
        println!("\n{}", style("🧭 Candidate Routes").bold().underlined());

        for (i, evaluation) in evaluations.iter().enumerate() {
            let marker = if !best.is_empty() && evaluation.route == *best {
                " ⭐ BEST".bright_green().bold()
            } else {
                "".normal()
            };

            let outcome = match (&evaluation.result, amount_token(&evaluation.route, direction)) {
                (Ok(amount), Some(token)) => format!(
                    "{} {}",
                    format_token_amount(*amount, token, snapshot),
                    token_symbol(token, snapshot)
                )
                .normal(),
                (Ok(amount), None) => amount.to_string().normal(),
                (Err(e), _) => format!("skipped: {}", e).red(),
            };

            println!(
                "{}. {} | {}{}",
                i + 1,
                route_label(&evaluation.route, snapshot),
                outcome,
                marker
            );
        }
    }

    /// Display pools touching `token`
    pub fn display_pool_list(
        token: &TokenAddress,
        pools: &[&Pool],
        snapshot: &PoolSnapshot,
        detailed: bool,
    ) {
        println!("\n{}", style("🏊 Available Pools").bold().underlined());

        for (i, pool) in pools.iter().enumerate() {
            let (own, other) = if pool.token_a.address == *token {
                (&pool.token_a, &pool.token_b)
            } else {
                (&pool.token_b, &pool.token_a)
            };

            let state = if pool.is_swappable() {
                "".normal()
            } else {
                " (empty)".red()
            };

            println!(
                "{}. {} → {}{}",
                i + 1,
                own.label().bold(),
                other.label().bold(),
                state
            );

            if detailed {
                if let Some(id) = &pool.id {
                    println!("   Pair: {}", style(id).dim());
                }
                println!(
                    "   Tokens: {} ({} decimals) / {} ({} decimals)",
                    style(short_address(pool.token_a.address.as_str())).dim(),
                    pool.token_a.decimals,
                    style(short_address(pool.token_b.address.as_str())).dim(),
                    pool.token_b.decimals
                );
                println!(
                    "   Reserves: {} {} | {} {}",
                    format_token_amount(pool.reserve_a, &pool.token_a.address, snapshot),
                    pool.token_a.label(),
                    format_token_amount(pool.reserve_b, &pool.token_b.address, snapshot),
                    pool.token_b.label()
                );
                println!();
            }
        }
    }

    /// Create a progress bar for operations
    pub fn create_progress_bar(message: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ "),
        );
        pb.set_message(message.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(80));
        pb
    }
}

/// Token whose units an evaluated amount is in.
fn amount_token(route: &Route, direction: TradeDirection) -> Option<&TokenAddress> {
    match direction {
        TradeDirection::ExactInput => route.tokens().last(),
        TradeDirection::ExactOutput => route.tokens().first(),
    }
}

fn token_symbol(address: &TokenAddress, snapshot: &PoolSnapshot) -> String {
    snapshot
        .token_info(address)
        .map(|token| token.label().to_string())
        .unwrap_or_else(|| short_address(address.as_str()))
}

/// Route as token symbols joined by arrows.
pub fn route_label(route: &Route, snapshot: &PoolSnapshot) -> String {
    route
        .tokens()
        .iter()
        .map(|token| token_symbol(token, snapshot))
        .collect::<Vec<_>>()
        .join(" → ")
}

/// Format smallest units with the decimals the snapshot scaled the token by
pub fn format_token_amount(amount: U256, token: &TokenAddress, snapshot: &PoolSnapshot) -> String {
    match snapshot.amount_decimals(token) {
        Some(decimals) => format_units(amount, decimals),
        None => amount.to_string(),
    }
}

/// Largest percentage printed verbatim; anything above is shown as a bound.
const MAX_DISPLAY_PERCENT: i64 = 99_999;

/// Fraction as a percentage with three decimals: 0.0181 -> "1.810%".
pub fn percent(fraction: Decimal) -> String {
    match fraction.checked_mul(Decimal::ONE_HUNDRED) {
        Some(value) if value <= Decimal::from(MAX_DISPLAY_PERCENT) => format!("{:.3}%", value),
        _ => format!(">{}%", MAX_DISPLAY_PERCENT),
    }
}

/// Format price impact with color
fn format_impact(impact: Decimal) -> ColoredString {
    let impact_str = percent(impact);
    if impact < Decimal::new(1, 3) {
        impact_str.green()
    } else if impact < Decimal::new(1, 2) {
        impact_str.yellow()
    } else {
        impact_str.red()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ReserveUnits, TokenInfo};
    use std::str::FromStr;

    const WMON: &str = "0x760afe86e5de5fa0ee542fc7b7b713e1c5425701";
    const USDC: &str = "0xf817257fed379853cde0fa4f97ab987181b1e5ea";

    fn snapshot(units: ReserveUnits) -> PoolSnapshot {
        let pool = Pool::new(
            TokenInfo::new(WMON, "WMON", 18),
            TokenInfo::new(USDC, "USDC", 6),
            U256::from(1_000u64),
            U256::from(2_000u64),
        );
        PoolSnapshot::new(vec![pool], units)
    }

    #[test]
    fn test_percent() {
        assert_eq!(percent(Decimal::from_str("0.181").unwrap()), "18.100%");
        assert_eq!(percent(Decimal::ZERO), "0.000%");
        assert_eq!(percent(Decimal::from_str("999.99").unwrap()), "99999.000%");
    }

    #[test]
    fn test_percent_caps_huge_impact() {
        assert_eq!(percent(Decimal::from(1_000)), ">99999%");
        assert_eq!(percent(Decimal::MAX), ">99999%");
    }

    #[test]
    fn test_display_quote_with_saturated_impact() {
        let reserve = U256::exp10(30);
        let a = TokenAddress::new("0x00000000000000000000000000000000000000aa");
        let b = TokenAddress::new("0x00000000000000000000000000000000000000bb");
        let pool = Pool::new(
            TokenInfo::new(a.as_str(), "A", 18),
            TokenInfo::new(b.as_str(), "B", 18),
            reserve,
            reserve,
        );
        let snapshot = PoolSnapshot::new(vec![pool], ReserveUnits::TokenDecimals);

        let quote = crate::quotes::compute_quote(
            reserve - U256::one(),
            &a,
            &b,
            &snapshot.pools,
            TradeDirection::ExactOutput,
        );

        assert_eq!(quote.price_impact, Decimal::MAX);
        assert_eq!(percent(quote.price_impact), ">99999%");
        QuoteDisplay::display_quote(&quote, &snapshot);
    }

    #[test]
    fn test_route_label_uses_symbols() {
        let snapshot = snapshot(ReserveUnits::TokenDecimals);
        let route = Route::new(vec![
            WMON.into(),
            USDC.into(),
            "0x00000000000000000000000000000000000000cc".into(),
        ]);
        assert_eq!(route_label(&route, &snapshot), "WMON → USDC → 0x0000…00cc");
    }

    #[test]
    fn test_format_token_amount_follows_units() {
        let usdc = TokenAddress::new(USDC);
        let amount = U256::from(1_500_000u64);

        assert_eq!(
            format_token_amount(amount, &usdc, &snapshot(ReserveUnits::TokenDecimals)),
            "1.5"
        );
        assert_eq!(
            format_token_amount(amount, &usdc, &snapshot(ReserveUnits::Fixed18)),
            "0.0000000000015"
        );
    }
}
