// ABOUTME: Input validation for site settings
// ABOUTME: Key-specific rules for text, email, URL, currency and numeric settings

use shopx_core::{is_valid_email, is_valid_url};
use thiserror::Error;

pub const SUPPORTED_CURRENCIES: &[&str] = &["USD", "EUR", "GBP", "CAD", "AUD"];

const SITE_NAME_MAX: usize = 100;
const SITE_DESCRIPTION_MAX: usize = 300;
const CONTACT_FIELD_MAX: usize = 200;
const LOW_STOCK_THRESHOLD_MAX: i64 = 10_000;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid integer value: {0}. {1}")]
    InvalidInteger(String, String),

    #[error("Invalid enum value: {0}. Must be one of: {1}")]
    InvalidEnum(String, String),

    #[error("Value cannot be empty")]
    EmptyValue,

    #[error("Value must be at most {0} characters")]
    TooLong(usize),

    #[error("Unknown setting key: {0}")]
    UnknownKey(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid email address: {0}")]
    InvalidEmail(String),
}

/// Validate a setting value based on its key
pub fn validate_setting_value(key: &str, value: &str) -> Result<(), ValidationError> {
    match key {
        // Required text
        "site_name" => {
            validate_required(value)?;
            validate_max_len(value, SITE_NAME_MAX)?;
        }

        "site_description" => validate_max_len(value, SITE_DESCRIPTION_MAX)?,

        "contact_email" => {
            validate_required(value)?;
            if !is_valid_email(value) {
                return Err(ValidationError::InvalidEmail(value.to_string()));
            }
        }

        "contact_phone" | "contact_address" => validate_max_len(value, CONTACT_FIELD_MAX)?,

        // Optional URLs; empty clears the setting
        "logo" | "favicon" | "facebook" | "twitter" | "instagram" | "linkedin" => {
            if !value.is_empty() {
                validate_url(value)?;
            }
        }

        "currency" => validate_enum(value, SUPPORTED_CURRENCIES)?,

        "low_stock_threshold" => validate_integer(value, Some(0), Some(LOW_STOCK_THRESHOLD_MAX))?,

        _ => return Err(ValidationError::UnknownKey(key.to_string())),
    }

    Ok(())
}

fn validate_required(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::EmptyValue)
    } else {
        Ok(())
    }
}

fn validate_max_len(value: &str, max: usize) -> Result<(), ValidationError> {
    if value.chars().count() > max {
        Err(ValidationError::TooLong(max))
    } else {
        Ok(())
    }
}

/// Validate integer value with optional min/max bounds
fn validate_integer(
    value: &str,
    min: Option<i64>,
    max: Option<i64>,
) -> Result<(), ValidationError> {
    let parsed = value.parse::<i64>().map_err(|_| {
        ValidationError::InvalidInteger(value.to_string(), "Not a valid integer".to_string())
    })?;

    if let Some(min_val) = min {
        if parsed < min_val {
            return Err(ValidationError::InvalidInteger(
                value.to_string(),
                format!("Must be >= {}", min_val),
            ));
        }
    }

    if let Some(max_val) = max {
        if parsed > max_val {
            return Err(ValidationError::InvalidInteger(
                value.to_string(),
                format!("Must be <= {}", max_val),
            ));
        }
    }

    Ok(())
}

fn validate_enum(value: &str, allowed: &[&str]) -> Result<(), ValidationError> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::InvalidEnum(
            value.to_string(),
            allowed.join(", "),
        ))
    }
}

/// Absolute http(s) URL without spaces
fn validate_url(value: &str) -> Result<(), ValidationError> {
    if !value.starts_with("http://") && !value.starts_with("https://") {
        return Err(ValidationError::InvalidUrl(
            "URL must start with http:// or https://".to_string(),
        ));
    }

    if value.contains(' ') || !is_valid_url(value) {
        return Err(ValidationError::InvalidUrl(value.to_string()));
    }

    Ok(())
}
