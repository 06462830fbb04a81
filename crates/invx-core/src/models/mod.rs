//! Data models for line items and configuration.

pub mod config;
pub mod line_item;

pub use config::{ExtractionConfig, ExtractionMode, InputConfig, InvxConfig, LlmConfig};
pub use line_item::{InvoiceMeta, ItemRow, LineItem, LINE_ITEM_FIELDS};
