//! Command implementations for the linr CLI.
//!
//! Commands are organized by entity type and stay thin: they resolve the
//! user's tokens through [`crate::resolve`], run one query or mutation, and
//! wrap the result in a type implementing [`Output`]. No command contains
//! search or disambiguation logic of its own.

pub mod cycle;
pub mod issue;
pub mod label;
pub mod milestone;
pub mod project;
pub mod state;
pub mod team;
pub mod viewer;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::api::ApiError;

/// Command results that can be serialized to JSON or formatted for humans.
pub trait Output {
    /// Serialize to JSON string.
    fn to_json(&self) -> String;

    /// Format for human-readable output.
    fn to_human(&self) -> String;
}

/// Compact JSON for the machine-readable default output.
pub(crate) fn json_string<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string())
}

/// Decode one field of a response `data` object into a model type.
pub(crate) fn decode<T: DeserializeOwned>(data: &Value, field: &str) -> crate::Result<T> {
    let value = data.get(field).cloned().unwrap_or(Value::Null);
    serde_json::from_value(value)
        .map_err(|e| ApiError::Malformed(format!("bad '{field}' payload: {e}")).into())
}
