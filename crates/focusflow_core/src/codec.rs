//! Collection codec.
//!
//! # Responsibility
//! - Serialize a whole collection to JSON text and back.
//! - Collapse unreadable text to an empty collection on the fail-soft path.
//!
//! # Invariants
//! - Element order round-trips exactly.
//! - Only a top-level JSON array is accepted as a collection.

use log::warn;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Why a stored blob could not be decoded.
#[derive(Debug)]
pub enum CodecError {
    /// Text is not JSON at all.
    Syntax(serde_json::Error),
    /// Valid JSON whose top level is not an array.
    NotAnArray(&'static str),
    /// An element does not have the expected record shape.
    Shape(serde_json::Error),
    /// Serialization failed (non-string map keys and similar).
    Encode(serde_json::Error),
}

impl Display for CodecError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Syntax(err) => write!(f, "malformed json: {err}"),
            Self::NotAnArray(found) => write!(f, "expected a json array, found {found}"),
            Self::Shape(err) => write!(f, "unexpected record shape: {err}"),
            Self::Encode(err) => write!(f, "encode failed: {err}"),
        }
    }
}

impl Error for CodecError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Syntax(err) | Self::Shape(err) | Self::Encode(err) => Some(err),
            Self::NotAnArray(_) => None,
        }
    }
}

/// Encodes a full collection as a JSON array.
pub fn encode<T: Serialize>(items: &[T]) -> Result<String, CodecError> {
    serde_json::to_string(items).map_err(CodecError::Encode)
}

/// Strict decode used when the caller needs to know what went wrong.
pub fn try_decode<T: DeserializeOwned>(text: &str) -> Result<Vec<T>, CodecError> {
    let value: Value = serde_json::from_str(text).map_err(CodecError::Syntax)?;
    if !value.is_array() {
        return Err(CodecError::NotAnArray(json_kind(&value)));
    }
    serde_json::from_value(value).map_err(CodecError::Shape)
}

/// Fail-soft decode: anything unreadable becomes an empty collection.
///
/// `kind` only labels the warning that is logged on failure.
pub fn decode<T: DeserializeOwned>(kind: &str, text: &str) -> Vec<T> {
    match try_decode(text) {
        Ok(items) => items,
        Err(err) => {
            warn!(
                "event=codec_decode module=codec kind={kind} status=recovered bytes={} error={err}",
                text.len()
            );
            Vec::new()
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
