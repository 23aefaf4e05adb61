//! Request payloads accepted at the HTTP boundary.
//!
//! Every form validates with `validator`, sanitizes its text fields and
//! converts into a domain payload.

use rust_decimal::Decimal;
use thiserror::Error;
use validator::ValidationErrors;

use crate::domain::money::decimal_to_cents;

pub mod catalog;
pub mod checkout;
pub mod customers;
pub mod members;

pub type FormResult<T> = Result<T, FormError>;

/// Errors produced while turning a form into a domain payload.
#[derive(Debug, Error)]
pub enum FormError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("{0} cannot be empty")]
    EmptyField(&'static str),
    #[error("invalid {field} `{value}`")]
    InvalidAmount { field: &'static str, value: Decimal },
    #[error("invalid {field} `{value}`, expected YYYY-MM-DD")]
    InvalidDate { field: &'static str, value: String },
    #[error("nothing to update")]
    NothingToUpdate,
}

/// Collapse whitespace runs into a single space and drop control characters.
pub(crate) fn sanitize_inline_text(input: &str) -> String {
    let mut sanitized = String::with_capacity(input.len());
    let mut previous_whitespace = false;

    for ch in input.trim().chars() {
        if ch.is_whitespace() {
            if !previous_whitespace {
                sanitized.push(' ');
                previous_whitespace = true;
            }
        } else if ch.is_control() {
            continue;
        } else {
            sanitized.push(ch);
            previous_whitespace = false;
        }
    }

    sanitized
}

/// Sanitized value of a required text field.
pub(crate) fn required_text(input: &str, field: &'static str) -> FormResult<String> {
    let sanitized = sanitize_inline_text(input);
    if sanitized.is_empty() {
        return Err(FormError::EmptyField(field));
    }
    Ok(sanitized)
}

/// Sanitized value of an optional text field; blank input becomes `None`.
pub(crate) fn optional_text(input: Option<&str>) -> Option<String> {
    input
        .map(sanitize_inline_text)
        .filter(|value| !value.is_empty())
}

/// Convert a non-negative price with at most two decimals into cents.
pub(crate) fn price_to_cents(price: Decimal, field: &'static str) -> FormResult<i64> {
    if price.is_sign_negative() {
        return Err(FormError::InvalidAmount {
            field,
            value: price,
        });
    }
    decimal_to_cents(price).ok_or(FormError::InvalidAmount {
        field,
        value: price,
    })
}
