//! Request payloads accepted by the admin API.
//!
//! Payloads are deserialized with `serde`, checked with `validator` and then
//! converted into domain values; conversion failures surface as [`FormError`].

use thiserror::Error;
use validator::ValidationErrors;

use crate::domain::types::TypeConstraintError;

pub mod activity;
pub mod companies;
pub mod contacts;
pub mod deals;
pub mod meetings;
pub mod prospects;
pub mod stats;
pub mod todos;
pub mod upload;

#[derive(Debug, Error)]
/// Errors that can occur when processing request payloads.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("{0}")]
    TypeConstraint(#[from] TypeConstraintError),

    /// A query parameter was present but not a positive integer.
    #[error("invalid {0}: expected a positive integer")]
    InvalidId(&'static str),

    #[error("invalid {0}")]
    InvalidParameter(&'static str),

    #[error("no ids provided")]
    EmptySelection,
}

/// Treats missing and whitespace-only strings alike.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.and_then(|value| {
        let trimmed = value.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    })
}

/// Parses an optional positive id parameter; blank means absent.
pub(crate) fn parse_optional_id<T>(
    raw: Option<&str>,
    name: &'static str,
) -> Result<Option<T>, FormError>
where
    T: TryFrom<i32, Error = TypeConstraintError>,
{
    let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return Ok(None);
    };
    let value: i32 = raw.parse().map_err(|_| FormError::InvalidId(name))?;
    T::try_from(value)
        .map(Some)
        .map_err(|_| FormError::InvalidId(name))
}

/// Maps an optional blank-tolerant string through a fallible constructor.
pub(crate) fn optional<T, F>(value: Option<String>, build: F) -> Result<Option<T>, FormError>
where
    F: FnOnce(String) -> Result<T, TypeConstraintError>,
{
    non_blank(value).map(build).transpose().map_err(FormError::from)
}
