//! Core library for invoice line-item extraction.
//!
//! This crate provides:
//! - Currency and invoice metadata detection on raw OCR text
//! - Vendor grammars for known invoice layouts with a generic fallback
//! - Decoding of language-model replies into the same record schema
//! - Sequential batch processing with per-document error markers

pub mod batch;
pub mod error;
pub mod invoice;
pub mod llm;
pub mod models;
pub mod source;

pub use batch::{process_documents, BatchReport, Document, DocumentFailure};
pub use error::{InvxError, ResponseError, Result, SourceError};
pub use invoice::rules::{detect_currency, extract_metadata, normalize_money};
pub use invoice::{extract_line_items, ExtractionPath, LineItemExtractor, LocalParser};
pub use llm::{build_messages, parse_llm_response, ChatMessage, CompletionClient, LlmExtractor};
pub use models::config::InvxConfig;
pub use models::line_item::{InvoiceMeta, ItemRow, LineItem};
