//! Product analytics dashboard.
//!
//! Static per-category sales data (bundled JSON) and the values the charts need:
//! peak month and its marker position, per-month peak flags, and product growth trends.

use log::debug;
use serde::{Deserialize, Serialize};

/// Category shown when the dashboard opens.
pub const DEFAULT_CATEGORY: &str = "shirts";
/// Growth above this percentage counts as trending up.
pub const GROWTH_THRESHOLD_PERCENT: f64 = 5.0;

const BUNDLED_PRODUCT_DATA: &str = include_str!("../data/product_data.json");

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SizeUnits {
    pub size: String,
    pub units: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MonthlyUnits {
    pub month: String,
    pub units: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u32,
    pub name: String,
    pub sales: u64,
    pub percent_growth: f64,
    pub stock_remaining: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowthTrend {
    Up,
    Down,
}

impl Product {
    pub fn trend(&self) -> GrowthTrend {
        if self.percent_growth > GROWTH_THRESHOLD_PERCENT {
            GrowthTrend::Up
        } else {
            GrowthTrend::Down
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CategoryData {
    pub category: String,
    pub label: String,
    pub size_data: Vec<SizeUnits>,
    pub monthly_data: Vec<MonthlyUnits>,
    pub products: Vec<Product>,
}

impl CategoryData {
    /// First month holding the highest unit count.
    pub fn peak_month(&self) -> Option<(usize, &MonthlyUnits)> {
        let max = self.monthly_data.iter().map(|m| m.units).max()?;
        self.monthly_data
            .iter()
            .enumerate()
            .find(|(_, m)| m.units == max)
    }

    /// Horizontal position of the peak marker, as a percentage of the chart width.
    pub fn peak_month_position(&self) -> f64 {
        match self.peak_month() {
            Some((index, _)) if self.monthly_data.len() > 1 => {
                index as f64 / (self.monthly_data.len() - 1) as f64 * 100.0
            }
            _ => 0.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CategorySummary {
    pub id: String,
    pub label: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MonthPoint {
    pub month: String,
    pub units: u64,
    pub is_peak: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PeakSummary {
    pub month: String,
    pub units: u64,
    pub position_percent: f64,
    /// `"Peak: N units"`.
    pub caption: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProductCard {
    pub id: u32,
    pub name: String,
    pub sales_label: String,
    pub percent_growth: f64,
    pub trend: GrowthTrend,
    pub stock_label: String,
}

/// Everything the dashboard renders for one category.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DashboardView {
    pub category: String,
    pub label: String,
    pub size_data: Vec<SizeUnits>,
    pub monthly: Vec<MonthPoint>,
    pub peak: Option<PeakSummary>,
    pub products: Vec<ProductCard>,
}

#[derive(Clone, Debug)]
pub struct ProductCatalog {
    categories: Vec<CategoryData>,
}

impl ProductCatalog {
    pub fn from_json(json: &str) -> Result<Self, String> {
        let categories: Vec<CategoryData> = serde_json::from_str(json).map_err(|e| e.to_string())?;
        Ok(Self { categories })
    }

    /// The data set shipped with the crate.
    pub fn bundled() -> Result<Self, String> {
        Self::from_json(BUNDLED_PRODUCT_DATA)
    }

    /// Category ids and labels in menu order.
    pub fn categories(&self) -> Vec<CategorySummary> {
        self.categories
            .iter()
            .map(|c| CategorySummary {
                id: c.category.clone(),
                label: c.label.clone(),
            })
            .collect()
    }

    pub fn category(&self, id: &str) -> Option<&CategoryData> {
        self.categories.iter().find(|c| c.category == id)
    }

    pub fn view(&self, id: &str) -> Option<DashboardView> {
        let data = self.category(id)?;
        let peak = data.peak_month().map(|(_, m)| PeakSummary {
            month: m.month.clone(),
            units: m.units,
            position_percent: data.peak_month_position(),
            caption: format!("Peak: {} units", m.units),
        });
        let peak_units = peak.as_ref().map(|p| p.units);
        debug!("dashboard view category={} peak={:?}", id, peak_units);
        Some(DashboardView {
            category: data.category.clone(),
            label: data.label.clone(),
            size_data: data.size_data.clone(),
            monthly: data
                .monthly_data
                .iter()
                .map(|m| MonthPoint {
                    month: m.month.clone(),
                    units: m.units,
                    is_peak: Some(m.units) == peak_units,
                })
                .collect(),
            peak,
            products: data
                .products
                .iter()
                .map(|p| ProductCard {
                    id: p.id,
                    name: p.name.clone(),
                    sales_label: format!("{} Sales", group_thousands(p.sales)),
                    percent_growth: p.percent_growth,
                    trend: p.trend(),
                    stock_label: format!("{} Stocks Remaining", p.stock_remaining),
                })
                .collect(),
        })
    }
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
