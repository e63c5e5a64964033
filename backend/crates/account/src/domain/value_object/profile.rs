//! Profile field value objects
//!
//! Free-text profile fields and external profile links. Each constructor
//! trims its input; an empty string clears the field.

use kernel::error::app_error::{AppError, AppResult};

pub const NAME_MAX_LENGTH: usize = 100;
pub const BIO_MAX_LENGTH: usize = 500;
pub const URL_MAX_LENGTH: usize = 2048;

/// First or last name
pub fn personal_name(field: &'static str, value: &str) -> AppResult<Option<String>> {
    bounded_text(field, value, NAME_MAX_LENGTH)
}

pub fn bio(value: &str) -> AppResult<Option<String>> {
    bounded_text("Bio", value, BIO_MAX_LENGTH)
}

/// Absolute `http`/`https` URL without whitespace
pub fn profile_url(field: &'static str, value: &str) -> AppResult<Option<String>> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    if value.len() > URL_MAX_LENGTH {
        return Err(AppError::bad_request(format!(
            "{field} must be at most {URL_MAX_LENGTH} characters"
        )));
    }

    let rest = value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"));
    match rest {
        Some(rest) if !rest.is_empty() && !rest.starts_with('/') && !value.contains(char::is_whitespace) => {
            Ok(Some(value.to_string()))
        }
        _ => Err(AppError::bad_request(format!("{field} must be an http(s) URL"))),
    }
}

fn bounded_text(field: &'static str, value: &str, max: usize) -> AppResult<Option<String>> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    if value.chars().count() > max {
        return Err(AppError::bad_request(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(Some(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_clears() {
        assert_eq!(bio("   ").unwrap(), None);
        assert_eq!(profile_url("GitHub URL", "").unwrap(), None);
    }

    #[test]
    fn test_length_limits() {
        assert!(personal_name("First name", &"a".repeat(NAME_MAX_LENGTH)).is_ok());
        assert!(personal_name("First name", &"a".repeat(NAME_MAX_LENGTH + 1)).is_err());
        assert!(bio(&"b".repeat(BIO_MAX_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_profile_url() {
        assert_eq!(
            profile_url("GitHub URL", " https://github.com/ada ").unwrap().as_deref(),
            Some("https://github.com/ada")
        );
        assert!(profile_url("GitHub URL", "ftp://github.com/ada").is_err());
        assert!(profile_url("GitHub URL", "https://").is_err());
        assert!(profile_url("GitHub URL", "https://git hub.com").is_err());
    }
}
