//! Error types for the invx-core library.
//!
//! The parsing engine itself has no failure modes: a missing field is an
//! empty string and an unmatched line is skipped. The errors below belong
//! to the edges around it (loading text, decoding remote responses, config).

use thiserror::Error;

/// Main error type for the invx library.
#[derive(Error, Debug)]
pub enum InvxError {
    /// Document text could not be acquired.
    #[error("source error: {0}")]
    Source(#[from] SourceError),

    /// A language-model response could not be decoded.
    #[error("response error: {0}")]
    Response(#[from] ResponseError),

    /// The remote extractor could not be reached or answered with an error.
    #[error("remote extractor error: {0}")]
    Remote(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to acquiring document text.
#[derive(Error, Debug)]
pub enum SourceError {
    /// The file type has no text source in this crate (e.g. raster images).
    #[error("unsupported document type: {0}")]
    UnsupportedFormat(String),

    /// Failed to open or read the PDF.
    #[error("failed to read PDF: {0}")]
    Pdf(String),

    /// The PDF is encrypted with a non-empty password.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The document yielded no text at all.
    #[error("no text extracted from {0}")]
    EmptyText(String),

    /// I/O error while reading the document.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Reasons an LLM response degrades to an empty item list.
#[derive(Error, Debug)]
pub enum ResponseError {
    /// The content is not valid JSON.
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// Valid JSON, but neither an array nor an object with an `items` array.
    #[error("unexpected response shape: {0}")]
    UnexpectedShape(&'static str),
}

/// Result type for the invx library.
pub type Result<T> = std::result::Result<T, InvxError>;
