//! Field checks run before a row is written. Each returns
//! [`AppError::Validation`] naming the offending field.

use crate::error::{AppError, AppResult};

pub fn require_non_empty(field: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    Ok(())
}

pub fn max_len(field: &str, value: &str, max: usize) -> AppResult<()> {
    let len = value.chars().count();
    if len > max {
        return Err(AppError::validation(format!(
            "{field} must be at most {max} characters (got {len})"
        )));
    }
    Ok(())
}

/// Required string column: non-blank and within the column width.
pub fn required(field: &str, value: &str, max: usize) -> AppResult<()> {
    require_non_empty(field, value)?;
    max_len(field, value, max)
}

pub fn optional(field: &str, value: Option<&str>, max: usize) -> AppResult<()> {
    match value {
        Some(v) => max_len(field, v, max),
        None => Ok(()),
    }
}

/// ISO 4217 style code: exactly three uppercase ASCII letters.
pub fn currency_code(value: &str) -> AppResult<()> {
    if value.len() == 3 && value.bytes().all(|b| b.is_ascii_uppercase()) {
        Ok(())
    } else {
        Err(AppError::validation(format!(
            "currency must be a 3-letter uppercase code, got {value:?}"
        )))
    }
}

/// Lowercase ASCII letters, digits, hyphens and underscores.
pub fn slug(value: &str) -> AppResult<()> {
    required("slug", value, 100)?;
    let ok = value
        .bytes()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-' || b == b'_');
    if !ok {
        return Err(AppError::validation(format!(
            "slug may only contain lowercase letters, digits, '-' and '_', got {value:?}"
        )));
    }
    Ok(())
}

pub fn non_negative(field: &str, value: i64) -> AppResult<()> {
    if value < 0 {
        return Err(AppError::validation(format!("{field} must not be negative")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_codes() {
        assert!(currency_code("USD").is_ok());
        assert!(currency_code("usd").is_err());
        assert!(currency_code("US").is_err());
        assert!(currency_code("EURO").is_err());
    }

    #[test]
    fn slugs() {
        assert!(slug("mens-shoes_2").is_ok());
        assert!(slug("Mens Shoes").is_err());
        assert!(slug("").is_err());
    }

    #[test]
    fn lengths_count_characters_not_bytes() {
        assert!(max_len("name", "ééé", 3).is_ok());
        assert!(max_len("name", "éééé", 3).is_err());
        assert!(required("name", "   ", 10).is_err());
        assert!(optional("tags", None, 1).is_ok());
    }

    #[test]
    fn error_names_the_field() {
        let err = non_negative("amount", -1).unwrap_err();
        assert_eq!(err.to_string(), "Validation error: amount must not be negative");
    }
}
