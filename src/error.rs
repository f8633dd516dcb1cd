//! Error types for value access and conversion.
//!
//! `AccessError` is what the raw accessors on [`Value`](crate::Value) return.
//! The navigation layer ([`Chain`](crate::Chain), [`VoidSafe`](crate::VoidSafe))
//! never lets one escape: a failed read becomes `Undefined` and a failed
//! write becomes a no-op.

use thiserror::Error;

use crate::sentinel::VoidKind;
use crate::value::ValueType;

/// The kind of access that was attempted on a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessKind {
    GetAttr,
    GetItem,
    Call,
    SetAttr,
    SetItem,
}

impl std::fmt::Display for AccessKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            AccessKind::GetAttr => "attribute read",
            AccessKind::GetItem => "item read",
            AccessKind::Call => "call",
            AccessKind::SetAttr => "attribute write",
            AccessKind::SetItem => "item write",
        };
        f.write_str(s)
    }
}

/// Failure to read, write or call something on a value.
#[derive(Debug, Error)]
pub enum AccessError {
    /// The receiver is one of the void sentinels.
    #[error("{op} on {kind}")]
    VoidReceiver { kind: VoidKind, op: AccessKind },

    /// Attribute does not exist on the receiver.
    #[error("'{type_name}' has no attribute '{name}'")]
    MissingAttribute { type_name: String, name: String },

    /// Key does not exist in the mapping.
    #[error("missing key: {0}")]
    MissingKey(String),

    /// Sequence index outside `-len..len`.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: i64, len: usize },

    /// The value cannot be used as a mapping key or sequence index.
    #[error("{0} cannot be used as a key")]
    UnhashableKey(ValueType),

    /// The receiver does not support this kind of access at all.
    #[error("{value_type} does not support {op}")]
    Unsupported { op: AccessKind, value_type: ValueType },

    /// The receiver is not callable.
    #[error("{0} is not callable")]
    NotCallable(ValueType),

    /// Sealed object refused to create a new attribute.
    #[error("'{type_name}' is sealed; cannot create attribute '{name}'")]
    Sealed { type_name: String, name: String },

    /// A native callable returned an error.
    #[error("`{name}` raised: {message}")]
    Raised { name: String, message: String },
}

/// Errors converting between [`Value`](crate::Value) and JSON.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// JSON text could not be parsed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The value has no JSON representation.
    #[error("{0} has no JSON representation")]
    Unrepresentable(ValueType),

    /// A container holds itself, directly or through other containers.
    #[error("{0} contains itself")]
    Cycle(ValueType),

    /// An integer key and a string key render to the same JSON field name.
    #[error("duplicate JSON field name {0:?}")]
    DuplicateKey(String),
}

pub type AccessResult<T> = Result<T, AccessError>;
