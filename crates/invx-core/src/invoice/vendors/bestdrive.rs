//! Bestdrive / Continental invoices.
//!
//! Item rows carry everything on one line:
//!
//! ```text
//! 255/50R19*Y BRAVURIS 5HM 107Y FR XL 2,00 EA 1 842,00 3 684,00
//! MILJU@AVGIFT GRUPPE 1 2,00 EA 20,00 40,00
//! ```

use tracing::trace;

use super::{content_lines, VendorGrammar};
use crate::invoice::rules::patterns::BESTDRIVE_LINE;
use crate::invoice::rules::{normalize_money, normalize_quantity};
use crate::models::{InvoiceMeta, LineItem};

/// `NAME QTY EA UNIT [TOTAL]` grammar.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bestdrive;

impl Bestdrive {
    /// Match a single line. The total is preferred, the unit price is used
    /// when the row has no total column.
    pub fn parse_line(&self, line: &str, meta: &InvoiceMeta, currency: &str) -> Option<LineItem> {
        let caps = BESTDRIVE_LINE.captures(line)?;

        let price = caps
            .name("total")
            .or_else(|| caps.name("unit"))
            .map(|m| normalize_money(m.as_str()))?;

        Some(LineItem::new(
            meta,
            &caps["name"],
            normalize_quantity(&caps["qty"]),
            price,
            currency,
        ))
    }
}

impl VendorGrammar for Bestdrive {
    fn name(&self) -> &'static str {
        "bestdrive"
    }

    fn signatures(&self) -> &'static [&'static str] {
        &["BESTDR", "BESTDRIVE", "BY CONTINENTAL"]
    }

    fn parse(&self, text: &str, meta: &InvoiceMeta, currency: &str) -> Vec<LineItem> {
        content_lines(text)
            .filter_map(|line| {
                let item = self.parse_line(line, meta, currency);
                if item.is_none() {
                    trace!("bestdrive: skipped line {:?}", line);
                }
                item
            })
            .collect()
    }
}
