//! Invoice number, date and recipient extraction.

use super::patterns::{CLIENT_NAME, DATE_DOTTED, DATE_ISO, DATE_SLASHED, INVOICE_NUMBER};
use super::{ExtractionMatch, FieldExtractor};
use crate::models::InvoiceMeta;

/// Date extractor. Shapes are probed in priority order:
/// `YYYY-MM-DD`, then `DD.MM.YYYY`, then `D/M/YY` or `D/M/YYYY`.
///
/// Dates are returned verbatim. Calendar validity is not checked.
pub struct DateExtractor;

impl DateExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DateExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        [&*DATE_ISO, &*DATE_DOTTED, &*DATE_SLASHED]
            .into_iter()
            .find_map(|re| re.find(text))
            .map(ExtractionMatch::from_regex)
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        [&*DATE_ISO, &*DATE_DOTTED, &*DATE_SLASHED]
            .into_iter()
            .flat_map(|re| re.find_iter(text))
            .map(ExtractionMatch::from_regex)
            .collect()
    }
}

/// Extract the invoice number following `Invoice` or `Faktura`.
pub fn extract_invoice_number(text: &str) -> Option<String> {
    INVOICE_NUMBER
        .captures(text)
        .map(|caps| caps[2].trim().to_string())
}

/// Extract the first date in any of the accepted shapes.
pub fn extract_invoice_date(text: &str) -> Option<String> {
    DateExtractor::new().extract(text).map(|m| m.value)
}

/// Extract the remainder of the line after `Bill to` or `Recipient`.
pub fn extract_client_name(text: &str) -> Option<String> {
    CLIENT_NAME
        .captures(text)
        .map(|caps| caps[2].trim().to_string())
        .filter(|name| !name.is_empty())
}

/// Extract all document-level fields. Each probe runs independently and
/// a miss leaves its field empty.
pub fn extract_metadata(text: &str) -> InvoiceMeta {
    InvoiceMeta {
        invoice_number: extract_invoice_number(text).unwrap_or_default(),
        invoice_date: extract_invoice_date(text).unwrap_or_default(),
        client_name: extract_client_name(text).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_invoice_number_variants() {
        assert_eq!(extract_invoice_number("Invoice #1058"), Some("1058".to_string()));
        assert_eq!(extract_invoice_number("FAKTURA 7001884827"), Some("7001884827".to_string()));
        assert_eq!(extract_invoice_number("invoice: INV-2024/07"), Some("INV-2024/07".to_string()));
        assert_eq!(extract_invoice_number("Invoice - A12"), Some("A12".to_string()));
        assert_eq!(extract_invoice_number("Receipt 42"), None);
    }

    #[test]
    fn test_date_priority() {
        // ISO wins even when a dotted date appears earlier in the text
        let text = "Forfall 19.03.2024\nDato 2024-02-19";
        assert_eq!(extract_invoice_date(text), Some("2024-02-19".to_string()));

        assert_eq!(extract_invoice_date("Dato: 19.02.2024"), Some("19.02.2024".to_string()));
        assert_eq!(extract_invoice_date("Date 7/19/24"), Some("7/19/24".to_string()));
        assert_eq!(extract_invoice_date("Date 07/19/2024"), Some("07/19/2024".to_string()));
        assert_eq!(extract_invoice_date("no date here"), None);
    }

    #[test]
    fn test_date_not_validated() {
        assert_eq!(extract_invoice_date("2024-13-45"), Some("2024-13-45".to_string()));
    }

    #[test]
    fn test_extract_all_dates_in_probe_order() {
        let found: Vec<String> = DateExtractor::new()
            .extract_all("7/1/24 then 01.02.2024 then 2024-03-01")
            .into_iter()
            .map(|m| m.value)
            .collect();
        assert_eq!(found, vec!["2024-03-01", "01.02.2024", "7/1/24"]);
    }

    #[test]
    fn test_client_name() {
        assert_eq!(
            extract_client_name("Bill to: ABC Supplies\nItem"),
            Some("ABC Supplies".to_string())
        );
        assert_eq!(
            extract_client_name("RECIPIENT Dekk AS"),
            Some("Dekk AS".to_string())
        );
        assert_eq!(extract_client_name("Ship to: Somewhere"), None);
    }

    #[test]
    fn test_extract_metadata_independent_probes() {
        let meta = extract_metadata("Bill to: ABC Supplies\n2024-05-14");
        assert_eq!(
            meta,
            InvoiceMeta {
                invoice_number: String::new(),
                invoice_date: "2024-05-14".to_string(),
                client_name: "ABC Supplies".to_string(),
            }
        );
    }
}
