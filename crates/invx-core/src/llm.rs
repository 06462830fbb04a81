//! Language-model extraction: prompt construction and response decoding.
//!
//! The transport is not part of this crate. A [`CompletionClient`] sends
//! the chat messages and returns the assistant's text; this module turns
//! that text into [`LineItem`]s with the same schema as the local parser.
//! A response that is not a JSON array (or an object wrapping one under
//! `items`) degrades to an empty list.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::ResponseError;
use crate::invoice::{LineItemExtractor, Result};
use crate::models::{LineItem, LINE_ITEM_FIELDS};

const SYSTEM_PROMPT: &str = "You are an assistant that extracts structured invoice data from raw OCR text. \
You always return ONLY valid JSON, no explanation.";

const USER_PROMPT_HEAD: &str = r#"You will receive raw OCR text extracted from an invoice.

Your task is to identify all line items (products or services) from the invoice
and return them as a JSON array.

For each line item, extract:

- invoice_number
- invoice_date
- client_name
- product_name
- quantity
- product_price
- currency

Rules:
- If the invoice contains multiple products, return ONE JSON object per product.
- If quantity is not visible, use "1".
- If currency is visible (e.g. $, €, kr, NOK, PLN, GBP), map it to a 3-letter code
  when possible (USD, EUR, NOK, PLN, GBP). If unknown, use an empty string "".
- If product price includes VAT, just return that total into "product_price".
- If some invoice fields (like client_name or invoice_date) appear once,
  repeat them for every product row.
- If you cannot find a field, use an empty string "".
- Always return ONLY a JSON array, no extra text or comments.

Example of the ONLY valid output format:

[
  {
    "invoice_number": "12345",
    "invoice_date": "2024-05-14",
    "client_name": "ABC Supplies",
    "product_name": "Brake Pads",
    "quantity": "4",
    "product_price": "89.90",
    "currency": "USD"
  },
  {
    "invoice_number": "12345",
    "invoice_date": "2024-05-14",
    "client_name": "ABC Supplies",
    "product_name": "Oil Filter",
    "quantity": "2",
    "product_price": "12.50",
    "currency": "USD"
  }
]

Now extract the line items from this OCR text:

"#;

/// Delimiters around the document text in the user prompt.
pub const TEXT_START: &str = "<<<OCR_TEXT_START>>>";
pub const TEXT_END: &str = "<<<OCR_TEXT_END>>>";

/// One chat message in an OpenAI-style conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Build the system and user messages for one document.
pub fn build_messages(text: &str) -> Vec<ChatMessage> {
    let user = format!("{USER_PROMPT_HEAD}{TEXT_START}\n{text}\n{TEXT_END}\n");
    vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(user)]
}

/// Sends chat messages to a model and returns the assistant's reply text.
pub trait CompletionClient {
    fn complete(&self, messages: &[ChatMessage]) -> Result<String>;
}

/// Remove a surrounding markdown code fence (```json ... ```), if any.
fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(body) = rest.strip_suffix("```") else {
        return trimmed;
    };
    // Drop the info string ("json") on the opening fence line.
    match body.split_once('\n') {
        Some((_, inner)) => inner.trim(),
        None => body.trim(),
    }
}

/// Render a JSON scalar as schema text. Null and containers become `""`.
fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    }
}

/// Project one JSON element onto the seven-field schema.
fn item_from_value(value: &Value) -> Option<LineItem> {
    let object = value.as_object()?;
    let field = |name: &str| object.get(name).map(value_to_text).unwrap_or_default();

    Some(LineItem {
        invoice_number: field(LINE_ITEM_FIELDS[0]),
        invoice_date: field(LINE_ITEM_FIELDS[1]),
        client_name: field(LINE_ITEM_FIELDS[2]),
        product_name: field(LINE_ITEM_FIELDS[3]),
        quantity: field(LINE_ITEM_FIELDS[4]),
        product_price: field(LINE_ITEM_FIELDS[5]),
        currency: field(LINE_ITEM_FIELDS[6]),
    })
}

/// Decode a model reply, reporting why it was rejected.
pub fn try_parse_llm_response(content: &str) -> std::result::Result<Vec<LineItem>, ResponseError> {
    let value: Value = serde_json::from_str(strip_code_fence(content))?;

    let elements = match &value {
        Value::Array(elements) => elements,
        Value::Object(object) => match object.get("items") {
            Some(Value::Array(elements)) => elements,
            _ => return Err(ResponseError::UnexpectedShape("object without an items array")),
        },
        _ => return Err(ResponseError::UnexpectedShape("neither array nor object")),
    };

    let items: Vec<LineItem> = elements.iter().filter_map(item_from_value).collect();
    if items.len() < elements.len() {
        debug!("dropped {} non-object elements", elements.len() - items.len());
    }
    Ok(items)
}

/// Decode a model reply. Anything malformed yields an empty list.
pub fn parse_llm_response(content: &str) -> Vec<LineItem> {
    match try_parse_llm_response(content) {
        Ok(items) => items,
        Err(e) => {
            warn!("discarding model response: {}", e);
            Vec::new()
        }
    }
}

/// Extractor backed by a chat-completion model.
pub struct LlmExtractor<C> {
    client: C,
}

impl<C: CompletionClient> LlmExtractor<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }
}

impl<C: CompletionClient> LineItemExtractor for LlmExtractor<C> {
    fn extract_items(&self, text: &str) -> Result<Vec<LineItem>> {
        let messages = build_messages(text);
        let reply = self.client.complete(&messages)?;
        Ok(parse_llm_response(&reply))
    }
}
