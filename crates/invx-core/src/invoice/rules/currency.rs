//! Document currency detection.

use super::FieldExtractor;

/// Ordered probes: the first one that hits decides the currency.
///
/// The probes overlap. `"kr"` also occurs inside ordinary words, so a
/// document mentioning e.g. "Ukraine" is reported as NOK unless an earlier
/// probe fires first. Known imprecision, kept as is.
const CURRENCY_PROBES: &[(&str, &[Probe])] = &[
    ("USD", &[Probe::Exact("$")]),
    ("EUR", &[Probe::Exact("€")]),
    ("NOK", &[Probe::Exact(" NOK"), Probe::Exact("kr")]),
    ("PLN", &[Probe::Exact(" PLN"), Probe::Lowercase("zł")]),
    ("GBP", &[Probe::Exact(" GBP"), Probe::Exact("£")]),
];

#[derive(Debug, Clone, Copy)]
enum Probe {
    /// Case-sensitive substring of the original text.
    Exact(&'static str),
    /// Substring of the lower-cased text.
    Lowercase(&'static str),
}

impl Probe {
    fn hits(&self, text: &str, lower: &str) -> bool {
        match self {
            Probe::Exact(needle) => text.contains(needle),
            Probe::Lowercase(needle) => lower.contains(needle),
        }
    }
}

/// Currency extractor over the whole document text.
pub struct CurrencyExtractor;

impl CurrencyExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CurrencyExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for CurrencyExtractor {
    type Output = &'static str;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let lower = text.to_lowercase();
        CURRENCY_PROBES
            .iter()
            .filter(|(_, probes)| probes.iter().any(|p| p.hits(text, &lower)))
            .map(|(code, _)| *code)
            .collect()
    }
}

/// Detect the document currency as a three-letter code, or `""`.
pub fn detect_currency(text: &str) -> &'static str {
    CurrencyExtractor::new().extract(text).unwrap_or("")
}
