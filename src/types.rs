//! Core order types for the merchant order table.
//!
//! [`Order`] mirrors the upstream order record field for field. Dates and prices stay
//! as the free text the source supplies; [`crate::date`] and [`crate::price`] interpret them.

use std::fmt;

/// Order identifier as supplied by the order source (e.g. `"#1001"`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub String);

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OrderId {
    fn from(s: &str) -> Self {
        OrderId(s.to_string())
    }
}

/// RGB triple used for status cells in the table and the export document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Order fulfilment status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum OrderStatus {
    Completed,
    Processing,
    Incomplete,
    Pending,
}

impl OrderStatus {
    /// Every status, in the order the status picker lists them.
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Completed,
        OrderStatus::Processing,
        OrderStatus::Incomplete,
        OrderStatus::Pending,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Completed => "Completed",
            OrderStatus::Processing => "Processing",
            OrderStatus::Incomplete => "Incomplete",
            OrderStatus::Pending => "Pending",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == s)
    }

    /// Text color for this status.
    pub fn color(&self) -> Rgb {
        match self {
            OrderStatus::Completed => Rgb(0, 128, 0),
            OrderStatus::Processing => Rgb(62, 84, 200),
            OrderStatus::Incomplete => Rgb(255, 165, 0),
            OrderStatus::Pending => Rgb(255, 0, 0),
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the order table.
///
/// `date` is free text such as `"Feb 11, 10:25 am"` and `price` is currency-formatted
/// such as `"₹ 1,234"`. Neither is validated on load.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub product: String,
    pub date: String,
    pub price: String,
    pub payment: String,
    pub status: OrderStatus,
}
