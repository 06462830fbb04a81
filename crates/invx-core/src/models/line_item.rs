//! The line-item record shared by the local parser and the LLM extractor.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Document-level fields, replicated onto every line item of one invoice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceMeta {
    /// Invoice number, empty when not found.
    pub invoice_number: String,
    /// Invoice date exactly as written, empty when not found.
    pub invoice_date: String,
    /// Recipient name, empty when not found.
    pub client_name: String,
}

/// One product, service or fee row extracted from an invoice.
///
/// Every field is text. Missing values are empty strings, never absent, so
/// a tabular projection needs no null handling.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineItem {
    pub invoice_number: String,
    pub invoice_date: String,
    pub client_name: String,
    pub product_name: String,
    pub quantity: String,
    /// Dot-decimal price string.
    pub product_price: String,
    /// Three-letter currency code or empty.
    pub currency: String,
}

/// Field names of [`LineItem`], in schema order.
pub const LINE_ITEM_FIELDS: [&str; 7] = [
    "invoice_number",
    "invoice_date",
    "client_name",
    "product_name",
    "quantity",
    "product_price",
    "currency",
];

impl LineItem {
    /// Build a line item carrying the document-level fields of `meta`.
    pub fn new(
        meta: &InvoiceMeta,
        product_name: impl Into<String>,
        quantity: impl Into<String>,
        product_price: impl Into<String>,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            invoice_number: meta.invoice_number.clone(),
            invoice_date: meta.invoice_date.clone(),
            client_name: meta.client_name.clone(),
            product_name: product_name.into(),
            quantity: quantity.into(),
            product_price: product_price.into(),
            currency: currency.into(),
        }
    }

    /// Parse the price as a decimal, if it is one.
    pub fn price_decimal(&self) -> Option<Decimal> {
        Decimal::from_str(self.product_price.trim()).ok()
    }
}

/// A line item tagged with the document it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRow {
    /// Source file name.
    pub file_name: String,
    /// The extracted record.
    #[serde(flatten)]
    pub item: LineItem,
}

impl ItemRow {
    /// Column headers for tabular output.
    pub const HEADERS: [&'static str; 8] = [
        "File Name",
        "Invoice Number",
        "Invoice Date",
        "Client Name",
        "Product Name",
        "Quantity",
        "Product Price",
        "Currency",
    ];

    /// Cell values in [`ItemRow::HEADERS`] order.
    pub fn cells(&self) -> [&str; 8] {
        [
            self.file_name.as_str(),
            self.item.invoice_number.as_str(),
            self.item.invoice_date.as_str(),
            self.item.client_name.as_str(),
            self.item.product_name.as_str(),
            self.item.quantity.as_str(),
            self.item.product_price.as_str(),
            self.item.currency.as_str(),
        ]
    }
}
