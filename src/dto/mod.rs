//! Response bodies shared by the JSON handlers.

use serde::Serialize;

pub mod imports;
pub mod stats;

/// Body of every error response.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// Wraps a collection as `{ "data": [...] }`.
#[derive(Debug, Serialize)]
pub struct DataEnvelope<T: Serialize> {
    pub data: T,
}
