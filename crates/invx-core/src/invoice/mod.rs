//! Line-item extraction from invoice text.

mod dispatcher;
pub mod fallback;
pub mod rules;
pub mod vendors;

pub use dispatcher::{extract_line_items, ExtractionPath, LocalParser};
pub use fallback::{parse_generic, parse_generic_line, SUMMARY_KEYWORDS};
pub use vendors::{Bestdrive, Ndi, VendorGrammar};

use crate::models::LineItem;

pub use crate::error::Result;

/// Trait for anything that turns document text into line items.
///
/// The local parser never fails. Remote extractors may, and callers
/// treat a failure as a per-document error.
pub trait LineItemExtractor {
    /// Extract line items from plain document text.
    fn extract_items(&self, text: &str) -> Result<Vec<LineItem>>;
}
