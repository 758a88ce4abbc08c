//! Validation Utilities
//!
//! Field-format checks shared by the request DTOs and the patch paths,
//! which must re-validate merged values.

use chrono::NaiveDate;
use uuid::Uuid;
use validator::ValidationErrors;

use super::error::AppError;

/// Convert validation errors to AppError
pub fn validation_error(errors: ValidationErrors) -> AppError {
    let message = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                let detail = e
                    .message
                    .clone()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "invalid value".into());
                format!("{field}: {detail}")
            })
        })
        .next()
        .unwrap_or_else(|| "Validation failed".into());

    AppError::InvalidInput(message)
}

/// Email must have a `local@domain.tld` shape.
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty()
        || !local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "._%+-".contains(c))
    {
        return false;
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !host.is_empty()
        && host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
        && tld.len() >= 2
        && tld.chars().all(|c| c.is_ascii_alphabetic())
}

/// Phone numbers are stored as exactly 10 digits, no separators.
pub fn is_valid_phone(phone: &str) -> bool {
    phone.len() == 10 && phone.chars().all(|c| c.is_ascii_digit())
}

/// Driving licences follow the provincial policy: two letters, a hyphen,
/// eight digits (e.g. `ON-12345678`).
pub fn is_valid_licence(licence: &str) -> bool {
    let bytes = licence.as_bytes();
    licence.len() == 11
        && bytes[0].is_ascii_alphabetic()
        && bytes[1].is_ascii_alphabetic()
        && bytes[2] == b'-'
        && bytes[3..].iter().all(|b| b.is_ascii_digit())
}

/// Parse a `YYYY-MM-DD` date, rejecting calendar-invalid values.
pub fn parse_date(date: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::InvalidInput("Invalid date format. Expected YYYY-MM-DD.".into()))
}

/// Parse a path or body id, rejecting anything that is not a UUID.
///
/// `what` names the entity for the error message ("customer", "vehicle"...).
pub fn parse_uuid(value: &str, what: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(value).map_err(|_| AppError::InvalidInput(format!("Invalid {what} id")))
}
