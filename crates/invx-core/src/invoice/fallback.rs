//! Generic line-item heuristic for invoices without a known vendor layout.
//!
//! Per line: the last money token is the price, an integer token directly
//! before the first money token is the quantity, and whatever remains once
//! money and quantity are removed is the product name.

use tracing::trace;

use super::rules::patterns::{INTEGER, WHITESPACE_RUN};
use super::rules::{normalize_comma_decimal, strip_money, FieldExtractor, MoneyExtractor};
use super::vendors::content_lines;
use crate::models::{InvoiceMeta, LineItem};

/// Lines containing any of these (lower-cased) are totals, taxes or
/// footers rather than items.
pub const SUMMARY_KEYWORDS: &[&str] = &[
    "subtotal",
    "total",
    "tax",
    "vat",
    "mwst",
    "gross",
    "sales tax",
    "deposit",
    "powered by",
];

/// Whether a line is a summary or tax line.
pub fn is_summary_line(line: &str) -> bool {
    let lower = line.to_lowercase();
    SUMMARY_KEYWORDS.iter().any(|kw| lower.contains(kw))
}

/// Parse one trimmed line, or `None` when it does not look like an item.
pub fn parse_generic_line(line: &str, meta: &InvoiceMeta, currency: &str) -> Option<LineItem> {
    if is_summary_line(line) {
        return None;
    }

    let money = MoneyExtractor::new().extract_all(line);
    let first = money.first()?;
    let last = money.last()?;

    let mut tokens: Vec<&str> = line.split_whitespace().collect();

    // Quantity: pure integer token right before the token holding the first amount.
    let mut quantity = "";
    if let Some((start, _)) = first.position {
        let before = &line[..start];
        let mut preceding = before.split_whitespace().count();
        if !before.is_empty() && !before.ends_with(char::is_whitespace) {
            // the amount starts inside a token
            preceding -= 1;
        }
        if preceding > 0 && INTEGER.is_match(tokens[preceding - 1]) {
            quantity = tokens.remove(preceding - 1);
        }
    }

    let description = strip_money(&tokens.join(" "));
    let description = WHITESPACE_RUN.replace_all(&description, " ");
    let description = description.trim_matches(|c: char| c == ':' || c == '-' || c.is_whitespace());

    if description.is_empty() {
        return None;
    }

    Some(LineItem::new(
        meta,
        description,
        quantity,
        normalize_comma_decimal(&last.value),
        currency,
    ))
}

/// Run the heuristic over every non-empty line, in line order.
pub fn parse_generic(text: &str, meta: &InvoiceMeta, currency: &str) -> Vec<LineItem> {
    content_lines(text)
        .filter_map(|line| {
            let item = parse_generic_line(line, meta, currency);
            if item.is_none() {
                trace!("generic: skipped line {:?}", line);
            }
            item
        })
        .collect()
}
