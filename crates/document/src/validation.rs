//! Input normalisation shared by change constructors and callers building
//! changes from raw text.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::DocumentError;

static NUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(\.\d+)?$").expect("numeric pattern is valid"));

/// Trims `value` and rejects it if nothing is left.
pub fn require_text(field: &'static str, value: &str) -> Result<String, DocumentError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DocumentError::Required { field });
    }
    Ok(trimmed.to_string())
}

/// Normalises a price as typed by an operator: surrounding whitespace and
/// thousands separators are removed, and the rest must be a plain decimal.
pub fn normalize_price(field: &'static str, raw: &str) -> Result<String, DocumentError> {
    let normalized = raw.trim().replace(',', "");
    if normalized.is_empty() {
        return Err(DocumentError::Required { field });
    }
    if !NUMERIC.is_match(&normalized) {
        return Err(DocumentError::NotNumeric {
            field,
            value: raw.to_string(),
        });
    }
    Ok(normalized)
}

/// Like [`normalize_price`], but a blank value is accepted and yields an
/// empty string.
pub fn normalize_optional_price(field: &'static str, raw: &str) -> Result<String, DocumentError> {
    if raw.trim().is_empty() {
        return Ok(String::new());
    }
    normalize_price(field, raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prices_are_normalised() {
        assert_eq!(normalize_price("unitPrice", " 1,200 ").unwrap(), "1200");
        assert_eq!(normalize_price("unitPrice", "12.50").unwrap(), "12.50");
    }

    #[test]
    fn bad_prices_are_rejected() {
        assert_eq!(
            normalize_price("unitPrice", "  "),
            Err(DocumentError::Required { field: "unitPrice" })
        );
        for raw in ["-1", "1.", ".5", "12a", "1.2.3"] {
            assert!(matches!(
                normalize_price("unitPrice", raw),
                Err(DocumentError::NotNumeric { .. })
            ));
        }
    }

    #[test]
    fn optional_price_accepts_blank() {
        assert_eq!(normalize_optional_price("costPrice", "").unwrap(), "");
        assert!(normalize_optional_price("costPrice", "abc").is_err());
    }

    #[test]
    fn required_text_is_trimmed() {
        assert_eq!(require_text("itemCode", " 1001 ").unwrap(), "1001");
        assert!(require_text("itemCode", "\t").is_err());
    }
}
