//! Pure functions for serializing/deserializing cached values to/from bytes.
//!
//! JSON keeps cache values human-readable, which matters when inspecting the
//! external cache with `redis-cli`.

use thiserror::Error;

use super::CacheError;
use crate::league::TableRow;

/// Errors that can occur during cache serialization/deserialization.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SerializationError {
    /// Failed to serialize a value to bytes.
    #[error("Failed to serialize: {0}")]
    SerializeFailed(String),
    /// Failed to deserialize bytes to a value.
    #[error("Failed to deserialize: {0}")]
    DeserializeFailed(String),
}

impl From<SerializationError> for CacheError {
    fn from(err: SerializationError) -> Self {
        CacheError::Serialization(err.to_string())
    }
}

/// Result type for serialization operations.
pub type Result<T> = std::result::Result<T, SerializationError>;

/// Serializes league table rows to JSON bytes.
pub fn serialize_table(rows: &[TableRow]) -> Result<Vec<u8>> {
    serde_json::to_vec(rows).map_err(|e| SerializationError::SerializeFailed(e.to_string()))
}

/// Deserializes JSON bytes to league table rows.
pub fn deserialize_table(bytes: &[u8]) -> Result<Vec<TableRow>> {
    serde_json::from_slice(bytes).map_err(|e| SerializationError::DeserializeFailed(e.to_string()))
}
