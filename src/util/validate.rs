//! Client-side input validation.
//!
//! Every check here runs before a request is built, so a rejected form never
//! touches the network.

#[cfg(test)]
#[path = "validate_test.rs"]
mod validate_test;

use email_address::EmailAddress;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime};

use crate::net::error::ApiError;
use crate::net::types::{Credentials, DEFAULT_CURRENCY, NewTransaction};

pub const MIN_PASSWORD_LEN: usize = 6;

/// Validate a registration form: syntactically valid email, password of at
/// least [`MIN_PASSWORD_LEN`] characters.
///
/// # Errors
///
/// Returns [`ApiError::Validation`] naming the offending field.
pub fn registration(email: &str, password: &str) -> Result<Credentials, ApiError> {
    let email = email.trim();
    if !EmailAddress::is_valid(email) {
        return Err(ApiError::validation("email", "enter a valid email address"));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ApiError::validation(
            "password",
            format!("must be at least {MIN_PASSWORD_LEN} characters"),
        ));
    }
    Ok(Credentials { email: email.to_owned(), password: password.to_owned() })
}

/// Validate a login form: both fields present.
///
/// # Errors
///
/// Returns [`ApiError::Validation`] naming the empty field.
pub fn login(email: &str, password: &str) -> Result<Credentials, ApiError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(ApiError::validation("email", "required"));
    }
    if password.is_empty() {
        return Err(ApiError::validation("password", "required"));
    }
    Ok(Credentials { email: email.to_owned(), password: password.to_owned() })
}

/// Trimmed, non-empty account name.
///
/// # Errors
///
/// Returns [`ApiError::Validation`] for a blank name.
pub fn account_name(name: &str) -> Result<String, ApiError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ApiError::validation("name", "required"));
    }
    Ok(name.to_owned())
}

/// Normalize an ISO 4217 code: blank means [`DEFAULT_CURRENCY`], letters are
/// uppercased, and exactly three ASCII letters are required.
///
/// # Errors
///
/// Returns [`ApiError::Validation`] for anything that is not a 3-letter code.
pub fn currency(raw: &str) -> Result<String, ApiError> {
    let code = raw.trim();
    if code.is_empty() {
        return Ok(DEFAULT_CURRENCY.to_owned());
    }
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ApiError::validation("currency", "use a 3-letter ISO code such as USD"));
    }
    Ok(code.to_ascii_uppercase())
}

/// Ids handed out by the backend are positive.
///
/// # Errors
///
/// Returns [`ApiError::Validation`] for zero or negative ids.
pub fn positive_id(field: &'static str, id: i64) -> Result<i64, ApiError> {
    if id <= 0 {
        return Err(ApiError::validation(field, "must be a positive id"));
    }
    Ok(id)
}

/// Parse a signed amount in minor units from a form field.
///
/// # Errors
///
/// Returns [`ApiError::Validation`] if the value is not a whole number.
pub fn amount_minor(raw: &str) -> Result<i64, ApiError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ApiError::validation("amount_minor", "enter a whole number of minor units, e.g. -1250"))
}

/// Check and normalize a transaction body before it is sent.
///
/// # Errors
///
/// Returns [`ApiError::Validation`] for bad ids or currency.
pub fn transaction(tx: &NewTransaction) -> Result<NewTransaction, ApiError> {
    positive_id("user_id", tx.user_id)?;
    positive_id("account_id", tx.account_id)?;
    let currency = currency(&tx.currency)?;
    let note = tx.note.as_deref().map(str::trim).filter(|note| !note.is_empty()).map(str::to_owned);
    Ok(NewTransaction { currency, note, ..tx.clone() })
}

/// Parse the transaction timestamp: RFC 3339, or the zone-less value of a
/// `datetime-local` input, taken as UTC.
///
/// # Errors
///
/// Returns [`ApiError::Validation`] for anything else.
pub fn occurred_at(raw: &str) -> Result<OffsetDateTime, ApiError> {
    let raw = raw.trim();
    if let Ok(at) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Ok(at);
    }
    let local = PrimitiveDateTime::parse(raw, format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"))
        .or_else(|_| PrimitiveDateTime::parse(raw, format_description!("[year]-[month]-[day]T[hour]:[minute]")))
        .map_err(|_| ApiError::validation("occurred_at", "enter a date and time"))?;
    Ok(local.assume_utc())
}
