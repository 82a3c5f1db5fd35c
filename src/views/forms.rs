//! Form Input Parsing
//!
//! Text inputs arrive as strings; these helpers turn them into the values
//! the API expects and reject what cannot be submitted.

use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

/// Characters of document content shown in list previews
pub const PREVIEW_CHARS: usize = 200;

/// Client-side validation failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("{field} is required")]
    Required { field: &'static str },

    #[error("{field} must be a number, got {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("{0:?} is not a valid email address")]
    InvalidEmail(String),

    #[error("{0:?} is not a valid phone number")]
    InvalidPhone(String),
}

/// Trimmed value of a required field
pub fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str, FormError> {
    let value = value.trim();
    if value.is_empty() {
        Err(FormError::Required { field })
    } else {
        Ok(value)
    }
}

/// Non-negative whole number, e.g. hours or minutes
pub fn parse_count(field: &'static str, input: &str) -> Result<u32, FormError> {
    let input = required(field, input)?;
    input.parse().map_err(|_| FormError::InvalidNumber {
        field,
        value: input.to_string(),
    })
}

/// Optional price: blank means absent, not zero
pub fn parse_price(input: &str) -> Result<Option<f64>, FormError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }

    match input.parse::<f64>() {
        Ok(price) if price.is_finite() && price >= 0.0 => Ok(Some(price)),
        _ => Err(FormError::InvalidNumber {
            field: "price",
            value: input.to_string(),
        }),
    }
}

/// Optional free text: blank means absent
pub fn optional_text(input: &str) -> Option<String> {
    let input = input.trim();
    (!input.is_empty()).then(|| input.to_string())
}

pub fn validate_email(input: &str) -> Result<(), FormError> {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    let re = EMAIL.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("email pattern is valid")
    });

    if re.is_match(input.trim()) {
        Ok(())
    } else {
        Err(FormError::InvalidEmail(input.to_string()))
    }
}

/// 10 to 15 digits with an optional leading `+`, separators ignored
pub fn validate_phone(input: &str) -> Result<(), FormError> {
    static PHONE: OnceLock<Regex> = OnceLock::new();
    let re = PHONE.get_or_init(|| Regex::new(r"^\+?\d{10,15}$").expect("phone pattern is valid"));

    let cleaned: String = input
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect();

    if re.is_match(&cleaned) {
        Ok(())
    } else {
        Err(FormError::InvalidPhone(input.to_string()))
    }
}

/// List preview of document content, cut at [`PREVIEW_CHARS`] characters
pub fn preview(content: &str) -> String {
    match content.char_indices().nth(PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}...", &content[..cut]),
        None => content.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required() {
        assert_eq!(required("title", "  FAQ "), Ok("FAQ"));
        assert_eq!(required("title", "   "), Err(FormError::Required { field: "title" }));
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("duration", "45"), Ok(45));
        assert_eq!(parse_count("duration", " 30 "), Ok(30));
        assert!(matches!(
            parse_count("duration", "-5"),
            Err(FormError::InvalidNumber { field: "duration", .. })
        ));
        assert!(matches!(
            parse_count("duration", "1.5"),
            Err(FormError::InvalidNumber { .. })
        ));
        assert_eq!(
            parse_count("duration", ""),
            Err(FormError::Required { field: "duration" })
        );
    }

    #[test]
    fn test_empty_price_is_absent() {
        assert_eq!(parse_price(""), Ok(None));
        assert_eq!(parse_price("   "), Ok(None));
        assert_eq!(parse_price("0"), Ok(Some(0.0)));
        assert_eq!(parse_price("19.99"), Ok(Some(19.99)));
        assert!(parse_price("free").is_err());
        assert!(parse_price("-1").is_err());
        assert!(parse_price("NaN").is_err());
    }

    #[test]
    fn test_optional_text() {
        assert_eq!(optional_text(""), None);
        assert_eq!(optional_text(" Trim and style "), Some("Trim and style".to_string()));
    }

    #[test]
    fn test_email_validation() {
        assert!(validate_email("owner@salon.com").is_ok());
        assert!(validate_email("first.last+tag@mail.example.co").is_ok());
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("a@b").is_err());
    }

    #[test]
    fn test_phone_validation() {
        assert!(validate_phone("+1 (555) 123-4567").is_ok());
        assert!(validate_phone("5551234567").is_ok());
        assert!(validate_phone("12345").is_err());
        assert!(validate_phone("+1234567890123456").is_err());
    }

    #[test]
    fn test_preview_truncates_at_200_chars() {
        let short = "Opening hours are 9 to 5.";
        assert_eq!(preview(short), short);

        let exact = "x".repeat(PREVIEW_CHARS);
        assert_eq!(preview(&exact), exact);

        let long = "é".repeat(PREVIEW_CHARS + 50);
        let shown = preview(&long);
        assert_eq!(shown.chars().count(), PREVIEW_CHARS + 3);
        assert!(shown.ends_with("..."));
        assert!(shown.starts_with(&"é".repeat(PREVIEW_CHARS)));
    }
}
