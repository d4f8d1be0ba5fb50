//! Integration test: level-walk engine vs. dense tick-grid scan
//!
//! The engine only evaluates observed levels plus one tick per gap. A
//! brute-force scan of every tick between best ask and best bid must pick
//! the same price on any book.

use auctionmatch_matchcore::compute_equilibrium_price;
use auctionmatch_types::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;

fn tick() -> TickSize {
    TickSize::new(Decimal::new(2, 1)).unwrap()
}

/// Scan every tick in `[q(best_ask), q(best_bid)]` and apply the
/// three-level selection directly.
fn dense_oracle(orders: &[Order], tick: TickSize) -> Option<Decimal> {
    let bid = orders.iter().filter(|o| o.is_buy()).map(|o| o.price).max()?;
    let ask = orders.iter().filter(|o| !o.is_buy()).map(|o| o.price).min()?;
    if bid < ask {
        return None;
    }
    let quantized: Vec<(i64, &Order)> = orders
        .iter()
        .map(|o| (tick.to_ticks(o.price).unwrap(), o))
        .collect();
    let high = tick.to_ticks(bid).unwrap();
    let low = tick.to_ticks(ask).unwrap();

    let mut best: Option<(u64, u64, i64)> = None;
    for p in low..=high {
        let accum_buy: u64 = quantized
            .iter()
            .filter(|(q, o)| o.is_buy() && *q >= p && *q <= high)
            .map(|(_, o)| u64::from(o.volume))
            .sum();
        let accum_sell: u64 = quantized
            .iter()
            .filter(|(q, o)| !o.is_buy() && *q <= p && *q >= low)
            .map(|(_, o)| u64::from(o.volume))
            .sum();
        let matched = accum_buy.min(accum_sell);
        let residual = accum_buy.abs_diff(accum_sell);
        let better = match best {
            None => true,
            Some((m, r, t)) => {
                matched > m || (matched == m && residual < r) || (matched == m && residual == r && p > t)
            }
        };
        if better {
            best = Some((matched, residual, p));
        }
    }
    match best {
        Some((matched, _, p)) if matched > 0 => Some(tick.to_price(p)),
        _ => None,
    }
}

fn random_book(rng: &mut StdRng) -> Vec<Order> {
    let count = rng.gen_range(1..30);
    (0..count)
        .map(|_| {
            let side = if rng.gen_bool(0.5) {
                OrderSide::Buy
            } else {
                OrderSide::Sell
            };
            // 3970.0 ..= 3974.0 on the 0.2 grid
            let ticks: i64 = rng.gen_range(19850..=19870);
            Order {
                instrument: "IF2412".to_string(),
                side,
                price: tick().to_price(ticks),
                volume: rng.gen_range(0..20),
            }
        })
        .collect()
}

#[test]
fn engine_matches_dense_scan_on_random_books() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for round in 0..2_000 {
        let orders = random_book(&mut rng);
        let engine = compute_equilibrium_price(&orders, tick()).unwrap().price;
        let oracle = dense_oracle(&orders, tick());
        assert_eq!(engine, oracle, "round {round}: orders {orders:?}");
    }
}

#[test]
fn engine_matches_dense_scan_on_sparse_books() {
    // Few orders over a wide range: most ticks are unobserved gaps.
    let mut rng = StdRng::seed_from_u64(42);
    for round in 0..2_000 {
        let count = rng.gen_range(2..6);
        let orders: Vec<Order> = (0..count)
            .map(|i| Order {
                instrument: "IF2412".to_string(),
                side: if i % 2 == 0 { OrderSide::Buy } else { OrderSide::Sell },
                price: tick().to_price(rng.gen_range(19800..=19900)),
                volume: rng.gen_range(1..10),
            })
            .collect();
        let engine = compute_equilibrium_price(&orders, tick()).unwrap().price;
        assert_eq!(engine, dense_oracle(&orders, tick()), "round {round}");
    }
}

#[test]
fn no_cross_books_never_match() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..500 {
        let mut orders = Vec::new();
        let split: i64 = rng.gen_range(19860..19870);
        for _ in 0..rng.gen_range(1..10) {
            orders.push(Order {
                instrument: "IF2412".to_string(),
                side: OrderSide::Buy,
                price: tick().to_price(rng.gen_range(19800..split)),
                volume: rng.gen_range(1..10),
            });
            orders.push(Order {
                instrument: "IF2412".to_string(),
                side: OrderSide::Sell,
                price: tick().to_price(rng.gen_range(split..19900)),
                volume: rng.gen_range(1..10),
            });
        }
        let outcome = compute_equilibrium_price(&orders, tick()).unwrap();
        assert!(outcome.price.is_none());
    }
}

#[test]
fn one_sided_books_never_match() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..500 {
        let side = if rng.gen_bool(0.5) {
            OrderSide::Buy
        } else {
            OrderSide::Sell
        };
        let orders: Vec<Order> = (0..rng.gen_range(1..10))
            .map(|_| Order {
                instrument: "IF2412".to_string(),
                side,
                price: tick().to_price(rng.gen_range(19800..19900)),
                volume: rng.gen_range(1..10),
            })
            .collect();
        assert!(compute_equilibrium_price(&orders, tick()).unwrap().price.is_none());
    }
}
