//! NDI Norge invoices.
//!
//! ```text
//! 3965185651541006 185/65R15 92T XL Nexen N'blue 4 stk 881,00 30,0 2.466,80
//! Dekkavgift PV/VV 4 20,00 80,00
//! ```

use tracing::trace;

use super::{content_lines, VendorGrammar};
use crate::invoice::rules::normalize_money;
use crate::invoice::rules::patterns::{NDI_FEE_LINE, NDI_PRODUCT_LINE};
use crate::models::{InvoiceMeta, LineItem};

/// Product rows (`ID DESC QTY stk UNIT DISCOUNT TOTAL`) and tire-fee rows
/// (`Dekkavgift ... QTY UNIT TOTAL`).
#[derive(Debug, Clone, Copy, Default)]
pub struct Ndi;

impl Ndi {
    /// Match a product row. Quantity is kept verbatim, price is the total.
    pub fn parse_product_line(
        &self,
        line: &str,
        meta: &InvoiceMeta,
        currency: &str,
    ) -> Option<LineItem> {
        let caps = NDI_PRODUCT_LINE.captures(line)?;
        Some(LineItem::new(
            meta,
            &caps["desc"],
            &caps["qty"],
            normalize_money(&caps["total"]),
            currency,
        ))
    }

    /// Match a tire-fee row.
    pub fn parse_fee_line(&self, line: &str, meta: &InvoiceMeta, currency: &str) -> Option<LineItem> {
        let caps = NDI_FEE_LINE.captures(line)?;
        Some(LineItem::new(
            meta,
            &caps["name"],
            &caps["qty"],
            normalize_money(&caps["total"]),
            currency,
        ))
    }
}

impl VendorGrammar for Ndi {
    fn name(&self) -> &'static str {
        "ndi"
    }

    fn signatures(&self) -> &'static [&'static str] {
        &["NDI NORGE AS", "NDI NORGE A/S", "NDI NORGE"]
    }

    fn parse(&self, text: &str, meta: &InvoiceMeta, currency: &str) -> Vec<LineItem> {
        let mut items = Vec::new();

        for line in content_lines(text) {
            if let Some(item) = self.parse_product_line(line, meta, currency) {
                items.push(item);
                continue;
            }

            if let Some(item) = self.parse_fee_line(line, meta, currency) {
                items.push(item);
                continue;
            }

            trace!("ndi: skipped line {:?}", line);
        }

        items
    }
}
