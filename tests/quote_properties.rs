use proptest::prelude::*;
use rust_decimal::Decimal;
use swap_quoter::quotes::AmmQuoteCalculator;
use swap_quoter::{compute_quote, Pool, TokenAddress, TokenInfo, TradeDirection, U256};

const A: &str = "0x00000000000000000000000000000000000000aa";
const B: &str = "0x00000000000000000000000000000000000000bb";
const C: &str = "0x00000000000000000000000000000000000000cc";

fn pool(a: &str, b: &str, reserve_a: u128, reserve_b: u128) -> Pool {
    Pool::new(
        TokenInfo::new(a, "A", 18),
        TokenInfo::new(b, "B", 18),
        U256::from(reserve_a),
        U256::from(reserve_b),
    )
}

fn quote(
    pools: &[Pool],
    from: &str,
    to: &str,
    amount: u128,
    direction: TradeDirection,
) -> swap_quoter::QuoteResult {
    compute_quote(
        U256::from(amount),
        &TokenAddress::new(from),
        &TokenAddress::new(to),
        pools,
        direction,
    )
}

const MIN_RESERVE: u128 = 1_000;
const MAX_RESERVE: u128 = 1_000_000_000_000_000_000_000;
const MIN_DEEP_RESERVE: u128 = 1_000_000_000_000_000_000_000_000;
const MAX_DEEP_RESERVE: u128 = 1_000_000_000_000_000_000_000_000_000;

prop_compose! {
    fn reserves()(reserve in MIN_RESERVE..MAX_RESERVE) -> u128 {
        reserve
    }
}

prop_compose! {
    fn deep_reserves()(reserve in MIN_DEEP_RESERVE..MAX_DEEP_RESERVE) -> u128 {
        reserve
    }
}

proptest! {
    /// Property: selling more never yields less along a fixed route
    #[test]
    fn output_is_monotonic_in_input(
        r0 in reserves(),
        r1 in reserves(),
        r2 in reserves(),
        r3 in reserves(),
        small in 1u128..1_000_000_000_000u128,
        extra in 0u128..1_000_000_000_000u128,
    ) {
        let pools = vec![pool(A, B, r0, r1), pool(B, C, r2, r3)];

        let low = quote(&pools, A, C, small, TradeDirection::ExactInput);
        let high = quote(&pools, A, C, small + extra, TradeDirection::ExactInput);

        prop_assert!(low.quote <= high.quote,
                    "output {} for {} exceeds output {} for {}",
                    low.quote, small, high.quote, small + extra);
    }

    /// Property: buying back the quoted output never costs more than the
    /// input it came from, except for the +1 rounding unit when the forward
    /// division was exact
    #[test]
    fn exact_output_round_trip_is_bounded(
        reserve_in in reserves(),
        reserve_out in reserves(),
        amount_in in 1u128..1_000_000_000_000_000u128,
    ) {
        let pools = vec![pool(A, B, reserve_in, reserve_out)];

        let forward = quote(&pools, A, B, amount_in, TradeDirection::ExactInput);
        prop_assume!(!forward.quote.is_zero());

        let out: u128 = forward.quote.as_u128();
        let backward = quote(&pools, A, B, out, TradeDirection::ExactOutput);
        prop_assert!(!backward.is_empty());

        let amount_in_u = U256::from(amount_in);
        let numerator = amount_in_u * U256::from(997u64) * U256::from(reserve_out);
        let denominator =
            U256::from(reserve_in) * U256::from(1000u64) + amount_in_u * U256::from(997u64);
        let exact = (numerator % denominator).is_zero();

        prop_assert!(
            backward.quote <= amount_in_u || (exact && backward.quote == amount_in_u + U256::one()),
            "buying {} back costs {} > {}", out, backward.quote, amount_in
        );
    }

    /// Property: the input from get_amount_in always delivers the requested output
    #[test]
    fn amount_in_covers_requested_output(
        reserve_in in reserves(),
        reserve_out in reserves(),
        fraction in 1u128..1_000_000u128,
    ) {
        let calculator = AmmQuoteCalculator::new();
        // Request strictly less than the pool holds
        let out = U256::from(reserve_out) * U256::from(fraction) / U256::from(1_000_001u128);
        let (reserve_in, reserve_out) = (U256::from(reserve_in), U256::from(reserve_out));

        let required = calculator.get_amount_in(out, reserve_in, reserve_out).unwrap();
        let delivered = calculator.get_amount_out(required, reserve_in, reserve_out).unwrap();

        prop_assert!(delivered >= out, "input {} delivers {} < {}", required, delivered, out);
    }

    /// Property: tiny trades on deep pools pay about the 0.3% fee, never less than nothing
    #[test]
    fn price_impact_converges_to_fee(
        reserve_in in deep_reserves(),
        reserve_out in deep_reserves(),
        amount in 1_000_000_000_000u128..1_000_000_000_000_000u128,
    ) {
        let pools = vec![pool(A, B, reserve_in, reserve_out)];
        let fee = Decimal::new(3, 3);
        let tolerance = Decimal::new(1, 4);

        for direction in [TradeDirection::ExactInput, TradeDirection::ExactOutput] {
            let result = quote(&pools, A, B, amount, direction);
            prop_assert!(!result.is_empty());
            prop_assert!(result.price_impact >= Decimal::ZERO);
            prop_assert!((result.price_impact - fee).abs() < tolerance,
                        "{} impact {} is far from the fee", direction, result.price_impact);
        }
    }

    /// Property: suggested slippage is the impact plus a 0.1% buffer, floored to a basis point
    #[test]
    fn slippage_covers_impact_plus_buffer(
        r0 in reserves(),
        r1 in reserves(),
        r2 in reserves(),
        r3 in reserves(),
        amount in 1u128..1_000_000_000_000_000u128,
        exact_output in any::<bool>(),
    ) {
        let pools = vec![pool(A, B, r0, r1), pool(B, C, r2, r3)];
        let direction = if exact_output {
            TradeDirection::ExactOutput
        } else {
            TradeDirection::ExactInput
        };

        let result = quote(&pools, A, C, amount, direction);
        prop_assume!(!result.is_empty());

        let buffer = Decimal::new(1, 3);
        let one_bp = Decimal::new(1, 4);
        prop_assert!(result.price_impact >= Decimal::ZERO);
        prop_assert!(
            result.suggested_slippage + one_bp >= result.price_impact + buffer,
            "slippage {} below impact {} + buffer",
            result.suggested_slippage,
            result.price_impact
        );
        prop_assert!(result.suggested_slippage <= result.price_impact + buffer + one_bp);
    }
}
