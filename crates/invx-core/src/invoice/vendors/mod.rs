//! Vendor-specific line grammars.
//!
//! A grammar is picked by a signature substring in the upper-cased
//! document and then matched line by line. Lines that fit no rule are
//! skipped; invoices mix item rows with headers, addresses and totals.

mod bestdrive;
mod ndi;

pub use bestdrive::Bestdrive;
pub use ndi::Ndi;

use crate::models::{InvoiceMeta, LineItem};

/// A fixed per-line token grammar for one invoice issuer.
pub trait VendorGrammar {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Upper-case substrings that identify this vendor.
    fn signatures(&self) -> &'static [&'static str];

    /// Whether the document carries this vendor's signature.
    fn signature_matches(&self, text: &str) -> bool {
        let upper = text.to_uppercase();
        self.signatures().iter().any(|sig| upper.contains(sig))
    }

    /// Parse every matching line. `currency` is already defaulted.
    fn parse(&self, text: &str, meta: &InvoiceMeta, currency: &str) -> Vec<LineItem>;
}

/// Vendor grammars in dispatch priority order.
pub fn default_grammars() -> Vec<Box<dyn VendorGrammar + Send + Sync>> {
    vec![Box::new(Ndi), Box::new(Bestdrive)]
}

/// Line boundaries in OCR and PDF text. Form feeds and the ASCII
/// separators mark page breaks.
const LINE_BREAKS: &[char] = &[
    '\n', '\r', '\x0b', '\x0c', '\x1c', '\x1d', '\x1e', '\u{85}', '\u{2028}', '\u{2029}',
];

/// Trimmed, non-empty lines of a document.
pub(crate) fn content_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split(LINE_BREAKS).map(str::trim).filter(|line| !line.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_order() {
        let names: Vec<&str> = default_grammars().iter().map(|g| g.name()).collect();
        assert_eq!(names, vec!["ndi", "bestdrive"]);
    }

    #[test]
    fn test_signature_is_case_insensitive() {
        assert!(Ndi.signature_matches("Levert av Ndi Norge AS"));
        assert!(Bestdrive.signature_matches("BestDrive by Continental"));
        assert!(!Bestdrive.signature_matches("Ndi Norge AS"));
    }

    #[test]
    fn test_content_lines() {
        let lines: Vec<&str> = content_lines("  a \n\n\t\nb\r\n").collect();
        assert_eq!(lines, vec!["a", "b"]);
    }

    #[test]
    fn test_content_lines_break_on_page_separators() {
        let text = "Dekkavgift PV/VV 4 20,00 80,00\x0cMILJU@AVGIFT GRUPPE 1 2,00 EA 20,00 40,00\u{2028}x\x1dy";
        let lines: Vec<&str> = content_lines(text).collect();
        assert_eq!(
            lines,
            vec![
                "Dekkavgift PV/VV 4 20,00 80,00",
                "MILJU@AVGIFT GRUPPE 1 2,00 EA 20,00 40,00",
                "x",
                "y",
            ]
        );
    }

    #[test]
    fn test_page_break_does_not_merge_rows() {
        let text = "BESTDRIVE\n255/50R19 TIRE 2,00 EA 1 842,00 3 684,00\x0cMILJU@AVGIFT GRUPPE 1 2,00 EA 20,00 40,00";
        let items = Bestdrive.parse(text, &InvoiceMeta::default(), "NOK");

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].product_price, "3684.00");
        assert_eq!(items[1].product_price, "40.00");
    }
}
