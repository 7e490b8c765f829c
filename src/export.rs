//! Export layout for the displayed order list.
//!
//! Produces the document model handed to the PDF renderer: fixed title, columns and
//! file name, en-IN formatted prices, a color per status cell, and an optional centered
//! watermark. The watermark image is loaded before composition; a failed load only
//! drops the watermark.

use crate::price::{format_inr, parse_price};
use crate::types::{Order, Rgb};
use base64::engine::general_purpose::STANDARD as B64;
use base64::Engine;
use log::{info, warn};
use serde::{Serialize, Serializer};
use std::path::Path;

pub const EXPORT_TITLE: &str = "Store Orders";
pub const EXPORT_FILE_NAME: &str = "store_orders.pdf";
pub const EXPORT_COLUMNS: [&str; 6] = [
    "Order ID",
    "Product",
    "Order Date",
    "Price (Rs)",
    "Payment",
    "Status",
];

/// A4 portrait, millimetres.
pub const PAGE_WIDTH_MM: f64 = 210.0;
pub const PAGE_HEIGHT_MM: f64 = 297.0;

const WATERMARK_SIZE_MM: f64 = 100.0;
const WATERMARK_OPACITY: f64 = 0.2;

/// Watermark image and its placement on every page. The image serializes as a
/// base64 data URL.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Watermark {
    #[serde(serialize_with = "serialize_data_url")]
    pub image: Vec<u8>,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub opacity: f64,
}

impl Watermark {
    /// Centers the image on the page at the fixed watermark size.
    pub fn centered(image: Vec<u8>) -> Self {
        Self {
            image,
            x: (PAGE_WIDTH_MM - WATERMARK_SIZE_MM) / 2.0,
            y: (PAGE_HEIGHT_MM - WATERMARK_SIZE_MM) / 2.0,
            width: WATERMARK_SIZE_MM,
            height: WATERMARK_SIZE_MM,
            opacity: WATERMARK_OPACITY,
        }
    }
}

/// `data:<mime>;base64,<payload>`, with the mime type sniffed from the leading bytes.
pub fn image_data_url(image: &[u8]) -> String {
    let mime = if image.starts_with(b"\x89PNG") {
        "image/png"
    } else if image.starts_with(&[0xFF, 0xD8, 0xFF]) {
        "image/jpeg"
    } else {
        "application/octet-stream"
    };
    format!("data:{};base64,{}", mime, B64.encode(image))
}

fn serialize_data_url<S: Serializer>(image: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&image_data_url(image))
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ExportRow {
    /// One cell per entry of [`EXPORT_COLUMNS`].
    pub cells: Vec<String>,
    pub status_color: Rgb,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ExportDocument {
    pub file_name: String,
    pub title: String,
    pub columns: Vec<String>,
    pub rows: Vec<ExportRow>,
    pub watermark: Option<Watermark>,
}

/// Reads the watermark image. Errors are logged and yield `None`.
pub async fn load_watermark(path: &Path) -> Option<Watermark> {
    match tokio::fs::read(path).await {
        Ok(image) => {
            info!("watermark loaded path={} bytes={}", path.display(), image.len());
            Some(Watermark::centered(image))
        }
        Err(e) => {
            warn!("watermark unavailable path={}: {}", path.display(), e);
            None
        }
    }
}

/// Builds the export document for `orders` in their displayed order.
pub fn compose(orders: &[Order], watermark: Option<Watermark>) -> ExportDocument {
    let rows = orders
        .iter()
        .map(|order| {
            let price = match parse_price(&order.price) {
                Some(amount) => format_inr(amount),
                None => order.price.clone(),
            };
            ExportRow {
                cells: vec![
                    order.id.to_string(),
                    order.product.clone(),
                    order.date.clone(),
                    price,
                    order.payment.clone(),
                    order.status.to_string(),
                ],
                status_color: order.status.color(),
            }
        })
        .collect();
    ExportDocument {
        file_name: EXPORT_FILE_NAME.to_string(),
        title: EXPORT_TITLE.to_string(),
        columns: EXPORT_COLUMNS.iter().map(|c| c.to_string()).collect(),
        rows,
        watermark,
    }
}

/// Loads the watermark (when a path is given), then composes the document.
pub async fn export_orders(orders: &[Order], watermark_path: Option<&Path>) -> ExportDocument {
    let watermark = match watermark_path {
        Some(path) => load_watermark(path).await,
        None => None,
    };
    let document = compose(orders, watermark);
    info!(
        "export composed file={} rows={} watermark={}",
        document.file_name,
        document.rows.len(),
        document.watermark.is_some()
    );
    document
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{OrderId, OrderStatus};
    use std::io::Write;

    fn order(id: &str, price: &str, status: OrderStatus) -> Order {
        Order {
            id: OrderId::from(id),
            product: "Jeans".into(),
            date: "Feb 11, 10:25 am".into(),
            price: price.into(),
            payment: "Card".into(),
            status,
        }
    }

    #[test]
    fn compose_formats_rows_and_colors() {
        let orders = vec![
            order("#1", "₹ 1,23,456", OrderStatus::Completed),
            order("#2", "₹ 499.5", OrderStatus::Pending),
            order("#3", "on request", OrderStatus::Incomplete),
        ];
        let doc = compose(&orders, None);
        assert_eq!(doc.file_name, "store_orders.pdf");
        assert_eq!(doc.title, "Store Orders");
        assert_eq!(doc.columns.len(), 6);
        assert_eq!(doc.columns[3], "Price (Rs)");
        assert_eq!(
            doc.rows[0].cells,
            vec!["#1", "Jeans", "Feb 11, 10:25 am", "1,23,456", "Card", "Completed"]
        );
        assert_eq!(doc.rows[0].status_color, Rgb(0, 128, 0));
        assert_eq!(doc.rows[1].cells[3], "499.5");
        assert_eq!(doc.rows[1].status_color, Rgb(255, 0, 0));
        assert_eq!(doc.rows[2].cells[3], "on request");
        assert_eq!(doc.rows[2].status_color, Rgb(255, 165, 0));
    }

    #[test]
    fn watermark_image_serializes_as_data_url() {
        let doc = compose(&[], Some(Watermark::centered(vec![1, 2, 3])));
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["watermark"]["image"], "data:application/octet-stream;base64,AQID");
        assert_eq!(json["watermark"]["x"], 55.0);
        assert_eq!(
            image_data_url(&[0xFF, 0xD8, 0xFF, 0xE0]),
            "data:image/jpeg;base64,/9j/4A=="
        );
    }

    #[test]
    fn watermark_is_centered_on_a4() {
        let mark = Watermark::centered(vec![1, 2, 3]);
        assert_eq!(mark.x, 55.0);
        assert_eq!(mark.y, 98.5);
        assert_eq!(mark.width, 100.0);
        assert_eq!(mark.opacity, 0.2);
    }

    #[tokio::test]
    async fn export_loads_watermark_before_composing() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"\x89PNG fake").unwrap();
        let orders = vec![order("#1", "₹ 10", OrderStatus::Processing)];
        let doc = export_orders(&orders, Some(file.path())).await;
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["watermark"]["image"], "data:image/png;base64,iVBORyBmYWtl");
        assert_eq!(json["watermark"]["opacity"], 0.2);
        let mark = doc.watermark.unwrap();
        assert_eq!(mark.image, b"\x89PNG fake".to_vec());
    }

    #[tokio::test]
    async fn missing_watermark_degrades_to_none() {
        let orders = vec![order("#1", "₹ 10", OrderStatus::Processing)];
        let doc = export_orders(&orders, Some(Path::new("/nonexistent/wm.png"))).await;
        assert!(doc.watermark.is_none());
        assert_eq!(doc.rows.len(), 1);
        let json = serde_json::to_value(&doc).unwrap();
        assert!(json["watermark"].is_null());
        assert_eq!(json["rows"][0]["status_color"], serde_json::json!([62, 84, 200]));
    }
}
