//! Order table state: the original list, the working (displayed) list, the active date
//! filter, and staged status edits.
//!
//! Filters always read the original list, so applying them is non-cumulative. Sorts
//! reorder the working list only. Every operation that replaces the working list drops
//! staged status edits.

use crate::date::parse_order_date;
use crate::notice::Notice;
use crate::price::parse_price;
use crate::types::{Order, OrderId, OrderStatus};
use chrono::{Months, NaiveDateTime, NaiveTime};
use log::{debug, info, warn};
use std::cmp::{Ordering, Reverse};
use std::collections::HashMap;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Narrowest accepted filter window, in months.
pub const MIN_WINDOW_MONTHS: i64 = 1;
/// Widest accepted filter window, in months.
pub const MAX_WINDOW_MONTHS: i64 = 120;

/// Orderings offered by the sort menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Date,
    Product,
    PriceAsc,
    PriceDesc,
}

/// Currently applied date filter.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct ActiveFilter {
    pub months: u32,
    /// `"Last N Months"`.
    pub label: String,
}

/// Inclusive `[start, end]` range used by the date filter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct DateWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DateWindow {
    /// From the start of the day `months` calendar months before `now` to the end of today.
    /// The start day is clamped to the end of a shorter month (May 31 − 3 months = Feb 28).
    pub fn trailing_months(months: u32, now: NaiveDateTime) -> Option<Self> {
        let today = now.date();
        // Clamps, never rolls over: May 31 - 3 months is Feb 28, so Feb 28..Mar 2 stay in.
        let start = today.checked_sub_months(Months::new(months))?.and_time(NaiveTime::MIN);
        let end = today.and_time(NaiveTime::from_hms_milli_opt(23, 59, 59, 999)?);
        Some(Self { start, end })
    }

    pub fn contains(&self, at: NaiveDateTime) -> bool {
        at >= self.start && at <= self.end
    }
}

/// Checks a requested window width. The error is the notice shown to the user.
pub fn validate_window(months: i64) -> Result<u32, Notice> {
    if (MIN_WINDOW_MONTHS..=MAX_WINDOW_MONTHS).contains(&months) {
        return Ok(months as u32);
    }
    warn!("invalid months value: {}", months);
    Err(Notice::warning(
        "Invalid Filter",
        "Please select a valid time range (1-120 months).",
    ))
}

/// Outcome of saving staged status edits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SaveOutcome {
    /// At least one staged status differs from the displayed one; ask before applying.
    NeedsConfirmation { changed: usize },
    NoChanges(Notice),
}

/// Filterable, sortable view over a fixed list of orders.
#[derive(Clone, Debug)]
pub struct OrderTable {
    original: Vec<Order>,
    working: Vec<Order>,
    active_filter: Option<ActiveFilter>,
    staged: HashMap<OrderId, OrderStatus>,
}

impl OrderTable {
    /// Creates a table whose working and original lists both start as `orders`.
    pub fn new(orders: Vec<Order>) -> Self {
        Self {
            working: orders.clone(),
            original: orders,
            active_filter: None,
            staged: HashMap::new(),
        }
    }

    /// The displayed list.
    pub fn orders(&self) -> &[Order] {
        &self.working
    }

    /// The baseline list all filters read from.
    pub fn original_orders(&self) -> &[Order] {
        &self.original
    }

    pub fn active_filter(&self) -> Option<&ActiveFilter> {
        self.active_filter.as_ref()
    }

    /// Keeps the orders from the original list whose date falls within the last `months`
    /// calendar months of `now`. Unparseable dates are dropped.
    ///
    /// An out-of-range width returns the rejection notice and leaves the table untouched.
    pub fn filter_by_date_range(&mut self, months: i64, now: NaiveDateTime) -> Result<Notice, Notice> {
        let months = validate_window(months)?;
        let Some(window) = DateWindow::trailing_months(months, now) else {
            warn!("filter window out of calendar range months={}", months);
            return Err(Notice::warning(
                "Invalid Filter",
                "Please select a valid time range (1-120 months).",
            ));
        };
        info!("filter range from={} to={}", window.start, window.end);

        let mut filtered = Vec::new();
        for order in &self.original {
            let Some(order_date) = parse_order_date(&order.date, now) else {
                warn!(
                    "skipping order {} due to invalid date format: {}",
                    order.id, order.date
                );
                continue;
            };
            if window.contains(order_date) {
                debug!("order {} date={} within range", order.id, order_date);
                filtered.push(order.clone());
            } else {
                debug!("order {} date={} outside range", order.id, order_date);
            }
        }
        info!("filtered {} -> {} orders", self.original.len(), filtered.len());

        let count = filtered.len();
        self.replace_working(filtered);
        self.active_filter = Some(ActiveFilter {
            months,
            label: format!("Last {} Months", months),
        });
        Ok(Notice::info(
            "Filter Applied",
            format!("Showing {} orders from the last {} months", count, months),
        ))
    }

    /// Restores the original list and clears the active filter.
    pub fn reset_filters(&mut self) -> Notice {
        self.replace_working(self.original.clone());
        self.active_filter = None;
        info!("filter cleared, {} orders", self.working.len());
        Notice::info("Filter Cleared", "Showing all orders")
    }

    pub fn sort(&mut self, key: SortKey, now: NaiveDateTime) {
        match key {
            SortKey::Date => self.sort_by_date(now),
            SortKey::Product => self.sort_by_product(),
            SortKey::PriceAsc => self.sort_by_price(false),
            SortKey::PriceDesc => self.sort_by_price(true),
        }
    }

    /// Oldest first; unparseable dates go last and keep their relative order.
    pub fn sort_by_date(&mut self, now: NaiveDateTime) {
        let mut orders = std::mem::take(&mut self.working);
        orders.sort_by_cached_key(|o| {
            let parsed = parse_order_date(&o.date, now);
            (parsed.is_none(), parsed)
        });
        self.replace_working(orders);
    }

    pub fn sort_by_product(&mut self) {
        let mut orders = std::mem::take(&mut self.working);
        orders.sort_by(|a, b| compare_product_names(&a.product, &b.product));
        self.replace_working(orders);
    }

    /// Sorts by normalized price. Unparseable prices go last in both directions.
    pub fn sort_by_price(&mut self, descending: bool) {
        let mut orders = std::mem::take(&mut self.working);
        if descending {
            orders.sort_by_cached_key(|o| {
                let price = parse_price(&o.price);
                (price.is_none(), price.map(Reverse))
            });
        } else {
            orders.sort_by_cached_key(|o| {
                let price = parse_price(&o.price);
                (price.is_none(), price)
            });
        }
        self.replace_working(orders);
    }

    /// Stages a status change for a displayed order. Nothing is applied until
    /// [`OrderTable::confirm_status_edits`].
    pub fn stage_status(&mut self, order_id: &OrderId, status: OrderStatus) -> Result<(), String> {
        if !self.working.iter().any(|o| &o.id == order_id) {
            return Err(format!("Order {} not found", order_id));
        }
        self.staged.insert(order_id.clone(), status);
        Ok(())
    }

    /// Staged status if any, otherwise the displayed order's status.
    pub fn effective_status(&self, order_id: &OrderId) -> Option<OrderStatus> {
        if let Some(status) = self.staged.get(order_id) {
            return Some(*status);
        }
        self.working
            .iter()
            .find(|o| &o.id == order_id)
            .map(|o| o.status)
    }

    pub fn staged_edits(&self) -> &HashMap<OrderId, OrderStatus> {
        &self.staged
    }

    pub fn save_status_edits(&mut self) -> SaveOutcome {
        let changed = self
            .working
            .iter()
            .filter(|o| self.staged.get(&o.id).is_some_and(|s| *s != o.status))
            .count();
        if changed > 0 {
            return SaveOutcome::NeedsConfirmation { changed };
        }
        self.staged.clear();
        SaveOutcome::NoChanges(Notice::info("No Changes", "No status changes were made."))
    }

    /// Applies staged edits to the displayed and the original list.
    pub fn confirm_status_edits(&mut self) -> Notice {
        let staged = std::mem::take(&mut self.staged);
        for order in self.original.iter_mut() {
            if let Some(status) = staged.get(&order.id) {
                if order.status != *status {
                    info!(
                        "order status updated order_id={} from={} to={}",
                        order.id, order.status, status
                    );
                    order.status = *status;
                }
            }
        }
        for order in self.working.iter_mut() {
            if let Some(status) = staged.get(&order.id) {
                order.status = *status;
            }
        }
        Notice::info(
            "Status Updated",
            "Order statuses have been updated successfully",
        )
    }

    pub fn discard_status_edits(&mut self) {
        self.staged.clear();
    }

    fn replace_working(&mut self, orders: Vec<Order>) {
        self.working = orders;
        self.staged.clear();
    }
}

/// Name order ignoring case and accents first ("Écharpe" between "Dhoti" and "Zebra"),
/// then unaccented before accented, then lowercase before uppercase.
pub fn compare_product_names(a: &str, b: &str) -> Ordering {
    primary_key(a)
        .cmp(&primary_key(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| b.cmp(a))
}

fn primary_key(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}
