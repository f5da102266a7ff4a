//! Shared utility functions used across multiple modules.

use std::sync::OnceLock;

use regex::Regex;

/// Normalize optional text by trimming whitespace and removing empties.
///
/// Returns `None` when the input is `None` or the trimmed value is empty.
pub fn normalize_text_option(value: Option<String>) -> Option<String> {
    let value = value?;
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Check if a string starts with `http://` or `https://`.
pub fn is_http_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

/// Truncate text to at most 180 characters for error messages.
pub fn compact_text(value: &str) -> String {
    value.trim().chars().take(180).collect()
}

/// Coerce a raw amount the way a browser `parseFloat(value) || 0` does.
///
/// The longest numeric prefix wins (`"12abc"` is 12), anything without a
/// numeric prefix becomes 0, and negative zero collapses to 0.
#[allow(clippy::float_cmp)]
pub fn parse_amount(raw: &str) -> f64 {
    static AMOUNT_PREFIX: OnceLock<Regex> = OnceLock::new();
    let re = AMOUNT_PREFIX.get_or_init(|| {
        Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?").expect("Invalid regex")
    });

    let value = re
        .find(raw.trim_start())
        .and_then(|found| found.as_str().parse::<f64>().ok())
        .filter(|value| value.is_finite())
        .unwrap_or(0.0);

    if value == 0.0 {
        0.0
    } else {
        value
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn normalize_text_option_rejects_empty() {
        assert_eq!(normalize_text_option(None), None);
        assert_eq!(normalize_text_option(Some("   ".to_string())), None);
    }

    #[test]
    fn normalize_text_option_trims_value() {
        assert_eq!(
            normalize_text_option(Some(" http://localhost:8080 ".to_string())),
            Some("http://localhost:8080".to_string())
        );
    }

    #[test]
    fn is_http_url_accepts_valid_schemes() {
        assert!(is_http_url("http://localhost"));
        assert!(is_http_url("https://example.com"));
        assert!(!is_http_url("ftp://example.com"));
        assert!(!is_http_url("example.com"));
    }

    #[test]
    fn parse_amount_reads_plain_numbers() {
        assert!((parse_amount("12.50") - 12.5).abs() < f64::EPSILON);
        assert!((parse_amount("30") - 30.0).abs() < f64::EPSILON);
        assert!((parse_amount("  .5") - 0.5).abs() < f64::EPSILON);
        assert!((parse_amount("-4.25") + 4.25).abs() < f64::EPSILON);
        assert!((parse_amount("1e2") - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn parse_amount_keeps_numeric_prefix() {
        assert!((parse_amount("12abc") - 12.0).abs() < f64::EPSILON);
        assert!((parse_amount("7,90") - 7.0).abs() < f64::EPSILON);
        assert!((parse_amount("3.") - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn parse_amount_falls_back_to_zero() {
        assert_eq!(parse_amount(""), 0.0);
        assert_eq!(parse_amount("abc"), 0.0);
        assert_eq!(parse_amount("R$ 10"), 0.0);
        assert!(parse_amount("-0").is_sign_positive());
    }
}
