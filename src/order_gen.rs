//! Synthetic order generator.
//!
//! Deterministic, configurable order lists for property tests, benchmarks and demos.
//! Same seed ⇒ same list. A share of the orders can carry malformed dates to exercise
//! the unparseable path.

use chrono::{Duration, NaiveDateTime};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::date::format_order_date;
use crate::types::{Order, OrderId, OrderStatus};

const PRODUCTS: [&str; 10] = [
    "Cotton Shirt",
    "Jeans",
    "Chinos",
    "Maxi Dress",
    "Sundress",
    "Watches",
    "Handbags",
    "blazers",
    "T-shirts",
    "Tops",
];
const PAYMENTS: [&str; 5] = ["UPI", "Credit Card", "Debit Card", "Net Banking", "Cash on Delivery"];
const MALFORMED_DATES: [&str; 6] = [
    "",
    "13:65 pm",
    "Feb 30, 10:00 am",
    "Smarch 3, 9:15 am",
    "2025-02-11",
    "Jun 12, 25:00 pm",
];

/// Configuration for the synthetic order generator. Ranges are inclusive.
#[derive(Clone, Debug)]
pub struct GeneratorConfig {
    /// RNG seed. Same seed ⇒ same orders.
    pub seed: u64,
    pub num_orders: usize,
    /// Reference time; generated dates lie at or before it.
    pub now: NaiveDateTime,
    /// Oldest generated order, in days before `now`.
    pub max_age_days: i64,
    /// Probability (0.0..=1.0) that an order's date is malformed.
    pub malformed_date_ratio: f64,
    /// Whole-rupee price range.
    pub price_min: u64,
    pub price_max: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            num_orders: 100,
            now: chrono::Local::now().naive_local(),
            max_age_days: 360,
            malformed_date_ratio: 0.05,
            price_min: 199,
            price_max: 49_999,
        }
    }
}

/// Deterministic order stream. Create with [`Generator::new`].
pub struct Generator {
    rng: StdRng,
    config: GeneratorConfig,
    next_order_id: u64,
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        Self {
            rng,
            config,
            next_order_id: 1001,
        }
    }

    /// Generates the next order. Ids are sequential (`#1001`, `#1002`, ...).
    pub fn next_order(&mut self) -> Order {
        let id = OrderId(format!("#{}", self.next_order_id));
        self.next_order_id += 1;
        let product = PRODUCTS.choose(&mut self.rng).copied().unwrap_or("Tops");
        let date = if self.rng.gen::<f64>() < self.config.malformed_date_ratio {
            MALFORMED_DATES.choose(&mut self.rng).copied().unwrap_or("").to_string()
        } else {
            let age_minutes = self
                .rng
                .gen_range(0..=self.config.max_age_days.max(0) * 24 * 60);
            format_order_date(self.config.now - Duration::minutes(age_minutes))
        };
        let price = self
            .rng
            .gen_range(self.config.price_min..=self.config.price_max.max(self.config.price_min));
        let payment = PAYMENTS.choose(&mut self.rng).copied().unwrap_or("UPI");
        let status = OrderStatus::ALL[self.rng.gen_range(0..OrderStatus::ALL.len())];
        Order {
            id,
            product: product.to_string(),
            date,
            price: format!("₹ {}", crate::price::format_inr(price.into())),
            payment: payment.to_string(),
            status,
        }
    }

    pub fn take_orders(&mut self, n: usize) -> Vec<Order> {
        (0..n).map(|_| self.next_order()).collect()
    }

    /// Returns `config.num_orders` orders.
    pub fn all_orders(&mut self) -> Vec<Order> {
        self.take_orders(self.config.num_orders)
    }
}
