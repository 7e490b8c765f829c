//! Price normalization and en-IN formatting.
//!
//! Prices arrive as display strings (`"₹ 1,234"`). Normalization keeps only ASCII digits
//! and `.`, which drops the currency symbol and thousands separators.

use rust_decimal::Decimal;
use std::str::FromStr;

/// Strips every character that is not an ASCII digit or a decimal point.
pub fn normalize_price(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect()
}

/// Numeric value of a display price, or `None` when nothing numeric remains.
pub fn parse_price(raw: &str) -> Option<Decimal> {
    let normalized = normalize_price(raw);
    if normalized.is_empty() {
        return None;
    }
    Decimal::from_str(&normalized).ok()
}

/// Formats an amount with Indian digit grouping (`1,23,456.5`), at most three fraction digits.
pub fn format_inr(amount: Decimal) -> String {
    let value = amount.round_dp(3).normalize();
    let text = value.abs().to_string();
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };
    let mut out = String::new();
    if value.is_sign_negative() && !value.is_zero() {
        out.push('-');
    }
    out.push_str(&group_indian(int_part));
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Last three digits form one group, the rest are grouped in pairs.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}
