//! # Merchant Dashboard
//!
//! Backend for a merchant's store admin: the order table (date filter, sorting, status
//! edits, export layout), the product analytics dashboard, the feedback form and the
//! store onboarding form.
//!
//! ## Entry point
//!
//! [`OrderTable`] holds the original and the displayed order lists. Filter with
//! [`OrderTable::filter_by_date_range`], undo with [`OrderTable::reset_filters`], and
//! reorder with [`OrderTable::sort`].
//!
//! ## Example
//!
//! ```rust
//! use merchant_dashboard::{parse_order_date, Order, OrderId, OrderStatus, OrderTable, SortKey};
//! use chrono::NaiveDate;
//!
//! let now = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap().and_hms_opt(12, 0, 0).unwrap();
//! let order = |id: &str, date: &str, price: &str| Order {
//!     id: OrderId::from(id),
//!     product: "Jeans".into(),
//!     date: date.into(),
//!     price: price.into(),
//!     payment: "UPI".into(),
//!     status: OrderStatus::Pending,
//! };
//! let mut table = OrderTable::new(vec![
//!     order("#1", "Oct 2, 12:05 pm", "₹ 1,200"),
//!     order("#2", "Feb 11, 10:25 am", "₹ 500"),
//!     order("#3", "not a date", "₹ 10,000"),
//! ]);
//!
//! let notice = table.filter_by_date_range(3, now).unwrap();
//! assert_eq!(notice.description, "Showing 1 orders from the last 3 months");
//! assert!(table.filter_by_date_range(121, now).is_err());
//!
//! table.reset_filters();
//! table.sort(SortKey::PriceAsc, now);
//! assert_eq!(table.orders()[0].id, OrderId::from("#2"));
//! assert!(parse_order_date("13:65 pm", now).is_none());
//! ```
//!
//! ## HTTP
//!
//! [`api::create_router`] exposes a single session over REST; the binary serves it.

pub mod api;
pub mod config;
pub mod dashboard;
pub mod date;
pub mod export;
pub mod feedback;
pub mod notice;
pub mod onboarding;
pub mod order_gen;
pub mod persistence;
pub mod price;
pub mod table;
pub mod types;

pub use config::AppConfig;
pub use dashboard::{CategoryData, DashboardView, ProductCatalog};
pub use date::{format_order_date, parse_order_date};
pub use export::{compose, export_orders, ExportDocument};
pub use feedback::FeedbackForm;
pub use notice::{Notice, NoticeLevel};
pub use onboarding::{fetch_country_names, OnboardingForm, StoreProfile};
pub use order_gen::{Generator, GeneratorConfig};
pub use persistence::{load_orders, LocalStore};
pub use price::{format_inr, parse_price};
pub use table::{ActiveFilter, DateWindow, OrderTable, SaveOutcome, SortKey};
pub use types::{Order, OrderId, OrderStatus, Rgb};
