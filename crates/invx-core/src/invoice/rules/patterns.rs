//! Common regex patterns for line-item extraction.
//!
//! Compiled once on first use and never mutated.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Invoice number ("Invoice #1058", "Faktura 7001884827")
    pub static ref INVOICE_NUMBER: Regex = Regex::new(
        r"(?i)(Invoice|Faktura)\s*#?\s*[:\-]?\s*([A-Za-z0-9\-/]+)"
    ).unwrap();

    // Dates, in probe order
    pub static ref DATE_ISO: Regex = Regex::new(
        r"\d{4}-\d{2}-\d{2}"
    ).unwrap();

    pub static ref DATE_DOTTED: Regex = Regex::new(
        r"\d{2}\.\d{2}\.\d{4}"
    ).unwrap();

    pub static ref DATE_SLASHED: Regex = Regex::new(
        r"\d{1,2}/\d{1,2}/\d{2,4}"
    ).unwrap();

    // Recipient ("Bill to: ACME AS", "RECIPIENT\nACME AS")
    pub static ref CLIENT_NAME: Regex = Regex::new(
        r"(?i)(Bill to|Recipient)[:\s]+(.+)"
    ).unwrap();

    // Generic money token: 89.90, 1,234.56, 1.234,56
    pub static ref MONEY: Regex = Regex::new(
        r"\d{1,3}(?:[.,]\d{3})*(?:[.,]\d{2})"
    ).unwrap();

    pub static ref INTEGER: Regex = Regex::new(
        r"^\d+$"
    ).unwrap();

    pub static ref WHITESPACE_RUN: Regex = Regex::new(
        r"\s+"
    ).unwrap();

    // Bestdrive: NAME QTY EA UNIT [TOTAL]
    pub static ref BESTDRIVE_LINE: Regex = Regex::new(concat!(
        r"^(?P<name>.+?)\s+",
        r"(?P<qty>[\d,]+)\s+EA\s+",
        r"(?P<unit>[\d\s]+,\d+)",
        r"(?:\s+(?P<total>[\d\s]+,\d+))?$",
    )).unwrap();

    // NDI tire line: PRODUCT_ID DESC QTY stk UNIT DISCOUNT TOTAL
    pub static ref NDI_PRODUCT_LINE: Regex = Regex::new(concat!(
        r"(?i)^(?P<product_id>\d{8,})\s+",
        r"(?P<desc>.+?)\s+",
        r"(?P<qty>\d+)\s+stk\s+",
        r"(?P<unit>[\d.,]+)\s+",
        r"(?P<discount>[\d.,]+)\s+",
        r"(?P<total>[\d.,]+)$",
    )).unwrap();

    // NDI fee line: Dekkavgift PV/VV QTY UNIT TOTAL
    pub static ref NDI_FEE_LINE: Regex = Regex::new(concat!(
        r"(?i)^(?P<name>Dekkavgift.*)\s+",
        r"(?P<qty>\d+)\s+",
        r"(?P<unit>[\d.,]+)\s+",
        r"(?P<total>[\d.,]+)$",
    )).unwrap();
}
