//! Local (no network) line-item extraction.
//!
//! Document-level fields and currency are extracted once. Vendor grammars
//! are then tried in priority order; the first one whose signature is
//! present and which produces at least one item wins. Everything else goes
//! through the generic heuristic.

use tracing::{debug, info};

use super::fallback::parse_generic;
use super::rules::{detect_currency, extract_metadata};
use super::vendors::{default_grammars, VendorGrammar};
use super::{LineItemExtractor, Result};
use crate::models::{ExtractionConfig, LineItem};

/// Which path produced a document's items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionPath {
    /// A vendor grammar, by name.
    Vendor(&'static str),
    /// The generic heuristic.
    Generic,
}

/// Rule-based extractor: vendor grammars with a generic fallback.
pub struct LocalParser {
    grammars: Vec<Box<dyn VendorGrammar + Send + Sync>>,
    vendor_default_currency: String,
}

impl LocalParser {
    /// Create a parser with the built-in grammars.
    pub fn new() -> Self {
        Self {
            grammars: default_grammars(),
            vendor_default_currency: "NOK".to_string(),
        }
    }

    /// Create a parser from extraction settings.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new().with_vendor_default_currency(config.vendor_default_currency.clone())
    }

    /// Currency applied to vendor-grammar items when none is detected.
    pub fn with_vendor_default_currency(mut self, currency: impl Into<String>) -> Self {
        self.vendor_default_currency = currency.into();
        self
    }

    /// Replace the grammar list. Order is dispatch priority.
    pub fn with_grammars(mut self, grammars: Vec<Box<dyn VendorGrammar + Send + Sync>>) -> Self {
        self.grammars = grammars;
        self
    }

    /// Extract items and report which path produced them.
    pub fn parse_with_path(&self, text: &str) -> (Vec<LineItem>, ExtractionPath) {
        let meta = extract_metadata(text);
        let detected = detect_currency(text);
        debug!(
            "metadata: number={:?} date={:?} client={:?} currency={:?}",
            meta.invoice_number, meta.invoice_date, meta.client_name, detected
        );

        let vendor_currency = if detected.is_empty() {
            self.vendor_default_currency.as_str()
        } else {
            detected
        };

        for grammar in &self.grammars {
            if !grammar.signature_matches(text) {
                continue;
            }

            let items = grammar.parse(text, &meta, vendor_currency);
            if !items.is_empty() {
                info!("{} grammar extracted {} items", grammar.name(), items.len());
                return (items, ExtractionPath::Vendor(grammar.name()));
            }
            debug!("{} signature present but no lines matched", grammar.name());
        }

        let items = parse_generic(text, &meta, detected);
        info!("generic heuristic extracted {} items", items.len());
        (items, ExtractionPath::Generic)
    }

    /// Extract all line items from document text.
    pub fn parse(&self, text: &str) -> Vec<LineItem> {
        self.parse_with_path(text).0
    }
}

impl Default for LocalParser {
    fn default() -> Self {
        Self::new()
    }
}

impl LineItemExtractor for LocalParser {
    fn extract_items(&self, text: &str) -> Result<Vec<LineItem>> {
        Ok(self.parse(text))
    }
}

/// Extract line items with the default local parser.
pub fn extract_line_items(text: &str) -> Vec<LineItem> {
    LocalParser::new().parse(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invoice::fallback::parse_generic;
    use crate::models::InvoiceMeta;
    use pretty_assertions::assert_eq;

    const NDI_INVOICE: &str = "\
NDI Norge AS
Faktura 20240117
Dato: 17.01.2024
Recipient: Dekkhotellet Oslo AS
3965185651541006 185/65R15 92T XL Nexen N'blue 4 stk 881,00 30,0 2.466,80
Dekkavgift PV/VV 4 20,00 80,00
Totalt 2.546,80
";

    const BESTDRIVE_INVOICE: &str = "\
BESTDRIVE by Continental
Faktura 7001884827
2024-02-19
255/50R19*Y BRAVURIS 5HM 107Y FR XL 2,00 EA 1 842,00 3 684,00
MILJU@AVGIFT GRUPPE 1 2,00 EA 20,00 40,00
";

    const GENERIC_INVOICE: &str = "\
Invoice #1058
Date: 5/14/24
Bill to: ABC Supplies
Brake Pads 4 $89.90
Oil Filter 2 $12.50
Subtotal $102.40
Sales tax $8.19
";

    #[test]
    fn test_ndi_document() {
        let (items, path) = LocalParser::new().parse_with_path(NDI_INVOICE);

        assert_eq!(path, ExtractionPath::Vendor("ndi"));
        assert_eq!(items.len(), 2);
        assert_eq!(
            items[0],
            LineItem {
                invoice_number: "20240117".into(),
                invoice_date: "17.01.2024".into(),
                client_name: "Dekkhotellet Oslo AS".into(),
                product_name: "185/65R15 92T XL Nexen N'blue".into(),
                quantity: "4".into(),
                product_price: "2466.80".into(),
                currency: "NOK".into(),
            }
        );
        assert_eq!(items[1].product_price, "80.00");
    }

    #[test]
    fn test_bestdrive_document() {
        let (items, path) = LocalParser::new().parse_with_path(BESTDRIVE_INVOICE);

        assert_eq!(path, ExtractionPath::Vendor("bestdrive"));
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].product_name, "255/50R19*Y BRAVURIS 5HM 107Y FR XL");
        assert_eq!(items[0].quantity, "2.00");
        assert_eq!(items[0].product_price, "3684.00");
        assert_eq!(items[0].invoice_number, "7001884827");
        assert_eq!(items[0].invoice_date, "2024-02-19");
        assert!(items.iter().all(|i| i.currency == "NOK"));
    }

    #[test]
    fn test_generic_document() {
        let (items, path) = LocalParser::new().parse_with_path(GENERIC_INVOICE);

        assert_eq!(path, ExtractionPath::Generic);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].product_name, "Brake Pads $");
        assert_eq!(items[0].quantity, "4");
        assert_eq!(items[0].product_price, "89.90");
        assert_eq!(items[0].currency, "USD");
        assert_eq!(items[0].invoice_number, "1058");
        assert_eq!(items[0].invoice_date, "5/14/24");
        assert_eq!(items[0].client_name, "ABC Supplies");
    }

    #[test]
    fn test_detected_currency_beats_vendor_default() {
        let text = format!("{BESTDRIVE_INVOICE}Sum EUR €3 724,00\n");
        let items = extract_line_items(&text);
        assert!(items.iter().all(|i| i.currency == "EUR"));
    }

    #[test]
    fn test_vendor_default_currency_configurable() {
        let items = LocalParser::new()
            .with_vendor_default_currency("SEK")
            .parse(BESTDRIVE_INVOICE);
        assert!(items.iter().all(|i| i.currency == "SEK"));
    }

    #[test]
    fn test_kr_in_text_beats_configured_default() {
        // "Beskrivelse" carries the "kr" probe, so NOK is detected
        let text = BESTDRIVE_INVOICE.replace("2024-02-19\n", "2024-02-19\nBeskrivelse Antall Enhet Pris\n");
        let items = LocalParser::new()
            .with_vendor_default_currency("SEK")
            .parse(&text);

        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|i| i.currency == "NOK"));
    }

    #[test]
    fn test_fallback_keeps_empty_currency() {
        let items = extract_line_items("Brake Pads 4 89.90");

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].product_name, "Brake Pads");
        assert_eq!(items[0].currency, "");
    }

    #[test]
    fn test_vendor_without_matches_falls_back() {
        let text = "NDI Norge AS\nMonteringssett 1 250,00\n";
        let (items, path) = LocalParser::new().parse_with_path(text);

        assert_eq!(path, ExtractionPath::Generic);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].product_name, "Monteringssett");
        assert_eq!(items[0].quantity, "1");
        assert_eq!(items[0].product_price, "250.00");
        // fallback path: detected currency only, no vendor default
        assert_eq!(items[0].currency, "");
    }

    #[test]
    fn test_ndi_checked_before_bestdrive() {
        let text = format!("{NDI_INVOICE}Levert via Bestdrive\n");
        let (_, path) = LocalParser::new().parse_with_path(&text);
        assert_eq!(path, ExtractionPath::Vendor("ndi"));
    }

    #[test]
    fn test_no_signature_equals_generic() {
        let meta = extract_metadata(GENERIC_INVOICE);
        let expected = parse_generic(GENERIC_INVOICE, &meta, detect_currency(GENERIC_INVOICE));
        assert_eq!(extract_line_items(GENERIC_INVOICE), expected);
    }

    #[test]
    fn test_idempotent() {
        let parser = LocalParser::new();
        for text in [NDI_INVOICE, BESTDRIVE_INVOICE, GENERIC_INVOICE] {
            assert_eq!(parser.parse(text), parser.parse(text));
        }
    }

    #[test]
    fn test_empty_text() {
        assert!(extract_line_items("").is_empty());
        assert_eq!(
            LocalParser::new().parse_with_path("\n\n").1,
            ExtractionPath::Generic
        );
    }

    #[test]
    fn test_document_fields_shared() {
        let items = extract_line_items(NDI_INVOICE);
        let first = InvoiceMeta {
            invoice_number: items[0].invoice_number.clone(),
            invoice_date: items[0].invoice_date.clone(),
            client_name: items[0].client_name.clone(),
        };
        for item in &items {
            assert_eq!(item.invoice_number, first.invoice_number);
            assert_eq!(item.invoice_date, first.invoice_date);
            assert_eq!(item.client_name, first.client_name);
        }
    }
}
