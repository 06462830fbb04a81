//! Rule-based field extractors for invoice text.

pub mod currency;
pub mod metadata;
pub mod money;
pub mod patterns;

pub use currency::{detect_currency, CurrencyExtractor};
pub use metadata::{
    extract_client_name, extract_invoice_date, extract_invoice_number, extract_metadata,
    DateExtractor,
};
pub use money::{
    normalize_comma_decimal, normalize_money, normalize_quantity, strip_money, MoneyExtractor,
};

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// A matched value and where it sits in the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Byte range in source text.
    pub position: Option<(usize, usize)>,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            position: None,
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}

impl ExtractionMatch<String> {
    /// Wrap a regex match, keeping its byte range.
    pub fn from_regex(m: regex::Match<'_>) -> Self {
        Self::new(m.as_str().to_string()).with_position(m.start(), m.end())
    }
}
