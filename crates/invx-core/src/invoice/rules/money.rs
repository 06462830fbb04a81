//! Money token detection and normalization.
//!
//! Two normalizers exist on purpose. Vendor grammars see continental
//! formatting (`1 842,00`, `2.466,80`) and strip thousands separators; the
//! generic heuristic only swaps the decimal comma, so `1,234.56` becomes
//! `1.234.56` there. Unifying them needs a decision on locale handling.

use super::patterns::MONEY;
use super::{ExtractionMatch, FieldExtractor};

/// Canonicalize a continental amount: drop whitespace, drop `.` thousands
/// separators, turn the decimal `,` into `.`.
///
/// `"1 842,00"` becomes `"1842.00"`.
pub fn normalize_money(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace() && *c != '.')
        .map(|c| if c == ',' { '.' } else { c })
        .collect()
}

/// Normalize a quantity token the same way as an amount (`"2,00"` to `"2.00"`).
pub fn normalize_quantity(raw: &str) -> String {
    normalize_money(raw)
}

/// Fallback price normalization: only `,` becomes `.`.
pub fn normalize_comma_decimal(raw: &str) -> String {
    raw.replace(',', ".")
}

/// Finds money-shaped substrings (`89.90`, `1,234.56`, `1.234,56`).
pub struct MoneyExtractor;

impl MoneyExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MoneyExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for MoneyExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        MONEY.find(text).map(ExtractionMatch::from_regex)
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        MONEY.find_iter(text).map(ExtractionMatch::from_regex).collect()
    }
}

/// Remove every money-shaped substring from `text`.
pub fn strip_money(text: &str) -> String {
    MONEY.replace_all(text, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_money() {
        assert_eq!(normalize_money("1 842,00"), "1842.00");
        assert_eq!(normalize_money("3 684,00"), "3684.00");
        assert_eq!(normalize_money("2.466,80"), "2466.80");
        assert_eq!(normalize_money("12 345 678,90"), "12345678.90");
        assert_eq!(normalize_money("881,00"), "881.00");
        assert_eq!(normalize_money("1\u{00a0}200,50"), "1200.50");
    }

    #[test]
    fn test_normalized_shape() {
        for raw in ["1 842,00", "2.466,80", "20,00", "1.000.000,00"] {
            let normalized = normalize_money(raw);
            let (int_part, frac) = normalized.split_once('.').unwrap();
            assert!(int_part.chars().all(|c| c.is_ascii_digit()), "{normalized}");
            assert_eq!(frac.len(), 2, "{normalized}");
        }
    }

    #[test]
    fn test_normalize_quantity() {
        assert_eq!(normalize_quantity("2,00"), "2.00");
        assert_eq!(normalize_quantity("4"), "4");
    }

    #[test]
    fn test_comma_decimal_keeps_thousands_dots() {
        assert_eq!(normalize_comma_decimal("89,90"), "89.90");
        assert_eq!(normalize_comma_decimal("1,234.56"), "1.234.56");
    }

    #[test]
    fn test_extract_money_positions() {
        let found = MoneyExtractor::new().extract_all("Pads 4 89.90 179.80");
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].value, "89.90");
        assert_eq!(found[0].position, Some((7, 12)));
        assert_eq!(found[1].value, "179.80");
    }

    #[test]
    fn test_strip_money() {
        assert_eq!(strip_money("Brake Pads 4 89.90"), "Brake Pads 4 ");
    }
}
