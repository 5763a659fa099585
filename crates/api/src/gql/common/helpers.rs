use async_graphql::ID;
use chrono::{DateTime, SecondsFormat, Utc};
use uuid::Uuid;

use crate::gql::error::{GqlError, GqlResult};

/// Parse an opaque GraphQL id. Ids that are not UUIDs can never resolve to a
/// stored entity, so they are reported as missing rather than malformed.
pub fn parse_id(id: &ID, resource: &'static str) -> GqlResult<Uuid> {
    Uuid::parse_str(id.as_str()).map_err(|_| GqlError::not_found(resource, id.as_str()))
}

pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Trim a required text field and reject it when blank.
pub fn required_text(field: &str, value: String) -> GqlResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(GqlError::validation(field, "must not be blank"));
    }
    Ok(trimmed.to_string())
}

/// Same as [`required_text`] for fields that may be omitted in an update.
pub fn optional_text(field: &str, value: Option<String>) -> GqlResult<Option<String>> {
    value.map(|v| required_text(field, v)).transpose()
}

/// Optional free text where blank means "no value".
pub fn blank_to_none(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub fn validate_email(field: &str, value: String) -> GqlResult<String> {
    let email = required_text(field, value)?;
    let well_formed = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && !domain.is_empty() && !domain.contains('@')
        }
        None => false,
    };
    if !well_formed {
        return Err(GqlError::validation(field, "must be a valid email address"));
    }
    Ok(email.to_lowercase())
}

pub fn non_negative_int(field: &str, value: i32) -> GqlResult<i32> {
    if value < 0 {
        return Err(GqlError::validation(field, "must not be negative"));
    }
    Ok(value)
}

pub fn non_negative_amount(field: &str, value: f64) -> GqlResult<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(GqlError::validation(
            field,
            "must be a finite, non-negative number",
        ));
    }
    Ok(value)
}
