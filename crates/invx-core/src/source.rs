//! Document text acquisition.
//!
//! Plain-text files are read as-is and PDFs yield their embedded text.
//! Raster images need an OCR engine, which this crate does not ship, so
//! they are reported as unsupported.

use std::path::Path;

use tracing::debug;

use crate::error::SourceError;

/// Kind of document, decided by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// UTF-8 text, e.g. the output of an external OCR step.
    Text,
    /// PDF with an embedded text layer.
    Pdf,
    /// Raster image that needs OCR.
    Image,
}

impl SourceKind {
    /// Classify a file name by its extension.
    pub fn from_name(name: &str) -> Option<Self> {
        let ext = Path::new(name).extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "txt" | "text" => Some(Self::Text),
            "pdf" => Some(Self::Pdf),
            "png" | "jpg" | "jpeg" | "tif" | "tiff" | "webp" | "bmp" => Some(Self::Image),
            _ => None,
        }
    }
}

/// Read the text of a document on disk.
pub fn load_text(path: &Path) -> Result<String, SourceError> {
    let name = path.to_string_lossy();
    let data = std::fs::read(path)?;
    text_from_bytes(&name, &data)
}

/// Extract text from document bytes (a file or an archive entry).
pub fn text_from_bytes(name: &str, data: &[u8]) -> Result<String, SourceError> {
    match SourceKind::from_name(name) {
        Some(SourceKind::Text) => Ok(String::from_utf8_lossy(data).into_owned()),
        Some(SourceKind::Pdf) => pdf_text(name, data),
        Some(SourceKind::Image) => Err(SourceError::UnsupportedFormat(format!(
            "{} (image input needs an external OCR step)",
            name
        ))),
        None => Err(SourceError::UnsupportedFormat(name.to_string())),
    }
}

#[cfg(feature = "pdf")]
fn pdf_text(name: &str, data: &[u8]) -> Result<String, SourceError> {
    use lopdf::Document;

    let mut doc = Document::load_mem(data).map_err(|e| SourceError::Pdf(e.to_string()))?;

    // PDFs "encrypted" with an empty user password are common in invoicing
    // systems and open fine once decrypted.
    let raw = if doc.is_encrypted() {
        if doc.decrypt("").is_err() {
            return Err(SourceError::Encrypted);
        }
        debug!("decrypted {} with empty password", name);
        let mut decrypted = Vec::new();
        doc.save_to(&mut decrypted)
            .map_err(|e| SourceError::Pdf(format!("failed to save decrypted PDF: {}", e)))?;
        decrypted
    } else {
        data.to_vec()
    };

    let pages = doc.get_pages().len();
    if pages == 0 {
        return Err(SourceError::Pdf("PDF has no pages".to_string()));
    }

    let text = pdf_extract::extract_text_from_mem(&raw)
        .map_err(|e| SourceError::Pdf(e.to_string()))?;
    debug!("{}: {} pages, {} chars of embedded text", name, pages, text.len());

    if text.trim().is_empty() {
        return Err(SourceError::EmptyText(name.to_string()));
    }
    Ok(text)
}

#[cfg(not(feature = "pdf"))]
fn pdf_text(name: &str, _data: &[u8]) -> Result<String, SourceError> {
    Err(SourceError::UnsupportedFormat(format!(
        "{} (built without PDF support)",
        name
    )))
}
