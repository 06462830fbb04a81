//! Sequential multi-document processing.
//!
//! A document whose text could not be acquired carries an in-band marker
//! (`"[ERROR processing file: ...]"`) instead of text. Marked documents
//! are reported and skipped; they never stop the rest of the batch.

use std::fmt::Display;

use tracing::{debug, warn};

use crate::invoice::LineItemExtractor;
use crate::models::ItemRow;

/// Prefix shared by every per-document error marker.
pub const ERROR_MARKER_PREFIX: &str = "[ERROR";

/// Build the in-band marker for a failed document.
pub fn error_marker(error: impl Display) -> String {
    format!("[ERROR processing file: {}]", error)
}

/// Whether document text is an error marker rather than content.
pub fn is_error_marker(text: &str) -> bool {
    text.starts_with(ERROR_MARKER_PREFIX)
}

/// A named document and its text (or error marker).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub file_name: String,
    pub text: String,
}

impl Document {
    pub fn new(file_name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            text: text.into(),
        }
    }

    /// Record the outcome of text acquisition; a failure becomes a marker.
    pub fn from_result<E: Display>(file_name: impl Into<String>, text: Result<String, E>) -> Self {
        let file_name = file_name.into();
        match text {
            Ok(text) => Self::new(file_name, text),
            Err(e) => {
                warn!("failed to read {}: {}", file_name, e);
                Self::new(file_name, error_marker(e))
            }
        }
    }

    pub fn is_error(&self) -> bool {
        is_error_marker(&self.text)
    }
}

/// A document that produced no rows because of an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentFailure {
    pub file_name: String,
    pub message: String,
}

/// Rows from every successful document plus the failures.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// Rows in document order, then line order.
    pub rows: Vec<ItemRow>,
    /// Documents skipped because of an error.
    pub failures: Vec<DocumentFailure>,
    /// Number of documents seen.
    pub documents: usize,
}

impl BatchReport {
    /// Number of documents that were parsed.
    pub fn succeeded(&self) -> usize {
        self.documents - self.failures.len()
    }
}

/// Run `extractor` over each document in order.
pub fn process_documents<'a, I, X>(documents: I, extractor: &X) -> BatchReport
where
    I: IntoIterator<Item = &'a Document>,
    X: LineItemExtractor + ?Sized,
{
    let mut report = BatchReport::default();

    for doc in documents {
        report.documents += 1;

        if doc.is_error() {
            report.failures.push(DocumentFailure {
                file_name: doc.file_name.clone(),
                message: doc.text.clone(),
            });
            continue;
        }

        match extractor.extract_items(&doc.text) {
            Ok(items) => {
                debug!("{}: {} items", doc.file_name, items.len());
                report.rows.extend(items.into_iter().map(|item| ItemRow {
                    file_name: doc.file_name.clone(),
                    item,
                }));
            }
            Err(e) => {
                warn!("failed to extract {}: {}", doc.file_name, e);
                report.failures.push(DocumentFailure {
                    file_name: doc.file_name.clone(),
                    message: error_marker(e),
                });
            }
        }
    }

    report
}

/// Concatenate document texts with `===== name =====` separators.
pub fn combined_text<'a, I>(documents: I) -> String
where
    I: IntoIterator<Item = &'a Document>,
{
    let mut out = String::new();
    for doc in documents {
        out.push_str(&format!("\n\n===== {} =====\n{}", doc.file_name, doc.text));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{InvxError, SourceError};
    use crate::invoice::{LocalParser, Result};
    use crate::models::LineItem;

    #[test]
    fn test_failure_does_not_abort_batch() {
        let docs = vec![
            Document::new("a.txt", "Brake Pads 4 89.90"),
            Document::from_result(
                "scan.png",
                Err(SourceError::UnsupportedFormat("png".into())),
            ),
            Document::new("b.txt", "Oil Filter 2 12.50\nWiper 1 9.00"),
        ];

        let report = process_documents(&docs, &LocalParser::new());

        assert_eq!(report.documents, 3);
        assert_eq!(report.succeeded(), 2);
        assert_eq!(report.rows.len(), 3);
        assert_eq!(report.rows[0].file_name, "a.txt");
        assert_eq!(report.rows[2].file_name, "b.txt");
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].file_name, "scan.png");
        assert_eq!(
            report.failures[0].message,
            "[ERROR processing file: unsupported document type: png]"
        );
    }

    struct Failing;

    impl LineItemExtractor for Failing {
        fn extract_items(&self, text: &str) -> Result<Vec<LineItem>> {
            if text.contains("boom") {
                Err(InvxError::Remote("timeout".into()))
            } else {
                Ok(vec![LineItem::default()])
            }
        }
    }

    #[test]
    fn test_extractor_error_recorded() {
        let docs = vec![Document::new("x", "boom"), Document::new("y", "fine")];
        let report = process_documents(&docs, &Failing);

        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.rows[0].file_name, "y");
        assert!(is_error_marker(&report.failures[0].message));
    }

    #[test]
    fn test_empty_document_is_not_a_failure() {
        let docs = vec![Document::new("blank.txt", "")];
        let report = process_documents(&docs, &LocalParser::new());

        assert!(report.rows.is_empty());
        assert!(report.failures.is_empty());
    }

    #[test]
    fn test_combined_text() {
        let docs = vec![Document::new("a.txt", "one"), Document::new("b.txt", "two")];
        assert_eq!(
            combined_text(&docs),
            "\n\n===== a.txt =====\none\n\n===== b.txt =====\ntwo"
        );
    }
}
