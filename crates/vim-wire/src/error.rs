//! Error types for encoding, decoding, registration and copying.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("no wire name for Rust type `{rust_type}`")]
    UnresolvedType { rust_type: String },
    #[error("field `{field}` must be a scalar to be written as an XML {kind}")]
    NotScalar { field: String, kind: &'static str },
    #[error("required field `{field}` of `{type_name}` is unset")]
    MissingField { field: String, type_name: String },
    #[error("cannot write a bare {found} as an XML document root")]
    MissingRoot { found: &'static str },
    #[error("XML write error: {0}")]
    Xml(String),
    #[error("JSON write error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Custom(String),
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("unknown wire type `{name}` at {path}")]
    UnknownType { name: String, path: String },
    #[error("missing type discriminator for `{expected}` at {path}")]
    MissingDiscriminator { expected: String, path: String },
    #[error("missing required field `{field}` at {path}")]
    MissingField { field: String, path: String },
    #[error("no value to decode at {path}")]
    MissingValue { path: String },
    #[error("expected {expected}, found {found} at {path}")]
    TypeMismatch {
        expected: String,
        found: String,
        path: String,
    },
    #[error("value {value} out of range for {kind} at {path}")]
    OutOfRange {
        kind: &'static str,
        value: String,
        path: String,
    },
    #[error("invalid {kind} literal {text:?} at {path}")]
    InvalidScalar {
        kind: &'static str,
        text: String,
        path: String,
    },
    #[error("XML parse error: {0}")]
    Xml(String),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Custom(String),
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("wire type `{name}` is already registered to `{existing}`")]
    Duplicate { name: String, existing: &'static str },
    #[error("`{name}` is not a valid wire type name")]
    InvalidName { name: String },
}

#[derive(Debug, Error)]
pub enum CopyError {
    #[error("deep copy encode failed: {0}")]
    Encode(#[from] EncodeError),
    #[error("deep copy decode failed: {0}")]
    Decode(#[from] DecodeError),
}
