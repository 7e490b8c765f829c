//! Property-based invariant tests for the order table.
//!
//! Uses proptest to generate (seed, num_orders, months); builds synthetic order lists
//! with a share of malformed dates and asserts the filter, reset and sort invariants.

use chrono::{NaiveDate, NaiveDateTime};
use merchant_dashboard::{
    parse_order_date, parse_price, DateWindow, Generator, GeneratorConfig, Order, OrderTable,
    SortKey,
};
use proptest::prelude::*;

fn fixed_now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 19)
        .unwrap()
        .and_hms_opt(15, 30, 0)
        .unwrap()
}

fn generate(seed: u64, num_orders: usize) -> Vec<Order> {
    Generator::new(GeneratorConfig {
        seed,
        num_orders,
        now: fixed_now(),
        max_age_days: 720,
        malformed_date_ratio: 0.15,
        ..Default::default()
    })
    .all_orders()
}

fn sorted_ids(orders: &[Order]) -> Vec<String> {
    let mut ids: Vec<String> = orders.iter().map(|o| o.id.0.clone()).collect();
    ids.sort();
    ids
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    /// Filtering yields a subset of the original list, in original order, with every
    /// date parseable and inside the window.
    #[test]
    fn prop_filter_is_windowed_subset(seed in 0u64..100_000u64, num_orders in 0usize..120usize, months in 1i64..=120i64) {
        let original = generate(seed, num_orders);
        let mut table = OrderTable::new(original.clone());
        table.filter_by_date_range(months, fixed_now()).unwrap();
        let window = DateWindow::trailing_months(months as u32, fixed_now()).unwrap();

        let mut cursor = original.iter();
        for order in table.orders() {
            let parsed = parse_order_date(&order.date, fixed_now());
            prop_assert!(parsed.is_some(), "unparseable date kept: {:?}", order.date);
            prop_assert!(window.contains(parsed.unwrap()));
            prop_assert!(cursor.any(|o| o == order), "not an ordered subset");
        }
        let expected = original
            .iter()
            .filter(|o| parse_order_date(&o.date, fixed_now()).is_some_and(|d| window.contains(d)))
            .count();
        prop_assert_eq!(table.orders().len(), expected);
    }

    /// Same width twice ⇒ same list; reset ⇒ exactly the original list.
    #[test]
    fn prop_filter_idempotent_and_reset_restores(seed in 0u64..100_000u64, num_orders in 0usize..80usize, months in 1i64..=24i64) {
        let original = generate(seed, num_orders);
        let mut table = OrderTable::new(original.clone());
        table.sort(SortKey::PriceDesc, fixed_now());
        table.filter_by_date_range(months, fixed_now()).unwrap();
        let first = table.orders().to_vec();
        table.filter_by_date_range(1, fixed_now()).unwrap();
        table.filter_by_date_range(months, fixed_now()).unwrap();
        prop_assert_eq!(table.orders(), first.as_slice());
        table.reset_filters();
        prop_assert_eq!(table.orders(), original.as_slice());
    }

    /// Out-of-range widths never change the displayed list.
    #[test]
    fn prop_invalid_window_rejected(seed in 0u64..100_000u64, months in prop_oneof![-1000i64..=0i64, 121i64..=10_000i64]) {
        let mut table = OrderTable::new(generate(seed, 30));
        table.sort(SortKey::Product, fixed_now());
        let before = table.orders().to_vec();
        prop_assert!(table.filter_by_date_range(months, fixed_now()).is_err());
        prop_assert_eq!(table.orders(), before.as_slice());
        prop_assert!(table.active_filter().is_none());
    }

    /// Every sort is a permutation; date sort is ascending with unparseable dates last;
    /// price sorts are monotone over parseable prices.
    #[test]
    fn prop_sorts_are_ordered_permutations(seed in 0u64..100_000u64, num_orders in 0usize..120usize) {
        let original = generate(seed, num_orders);
        let mut table = OrderTable::new(original.clone());

        table.sort(SortKey::Date, fixed_now());
        prop_assert_eq!(sorted_ids(table.orders()), sorted_ids(&original));
        let dates: Vec<Option<NaiveDateTime>> = table
            .orders()
            .iter()
            .map(|o| parse_order_date(&o.date, fixed_now()))
            .collect();
        let first_none = dates.iter().position(|d| d.is_none()).unwrap_or(dates.len());
        prop_assert!(dates[first_none..].iter().all(|d| d.is_none()));
        prop_assert!(dates[..first_none].windows(2).all(|w| w[0] <= w[1]));

        table.sort(SortKey::PriceAsc, fixed_now());
        prop_assert_eq!(sorted_ids(table.orders()), sorted_ids(&original));
        let prices: Vec<_> = table.orders().iter().filter_map(|o| parse_price(&o.price)).collect();
        prop_assert!(prices.windows(2).all(|w| w[0] <= w[1]));

        table.sort(SortKey::PriceDesc, fixed_now());
        let prices: Vec<_> = table.orders().iter().filter_map(|o| parse_price(&o.price)).collect();
        prop_assert!(prices.windows(2).all(|w| w[0] >= w[1]));

        prop_assert_eq!(table.original_orders(), original.as_slice());
    }
}

/// Same seed ⇒ same filtered and sorted outcome.
#[test]
fn deterministic_replay_same_seed_same_outcome() {
    let run = || {
        let mut table = OrderTable::new(generate(999, 80));
        table.filter_by_date_range(6, fixed_now()).unwrap();
        table.sort(SortKey::Date, fixed_now());
        table.orders().to_vec()
    };
    assert_eq!(run(), run());
}
