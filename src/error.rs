//! Error types for metadata attachment, translation, and validation.

use std::path::PathBuf;
use thiserror::Error;

/// Errors loading JSON documents (schemas, payloads, metadata files).
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[cfg(feature = "remote")]
    #[error("failed to fetch {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("cannot fetch {url}: built without the \"remote\" feature")]
    RemoteDisabled { url: String },

    #[error("invalid JSON: {source}")]
    InvalidJson {
        #[source]
        source: serde_json::Error,
    },
}

/// Errors producing a structural description or translating it to field metadata.
#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("cannot describe node at {path}: {message}")]
    Description { path: String, message: String },

    #[error("unknown node kind \"{kind}\" at {path}: expected date, predicate, morph, or default")]
    UnknownKind { path: String, kind: String },
}

/// Errors attaching documentation metadata to a schema.
#[derive(Debug, Error)]
pub enum MetaError {
    #[error("metadata references unknown field \"{field}\": schema fields are [{}]", known.join(", "))]
    UnknownField { field: String, known: Vec<String> },
}

/// Errors during payload validation.
#[derive(Debug, Error)]
pub enum ValidateError {
    #[error(transparent)]
    Translate(#[from] TranslateError),

    #[error("invalid schema: {message}")]
    InvalidSchema { message: String },

    #[error("validation failed with {} error(s)", errors.len())]
    Invalid { errors: Vec<FieldError> },
}

/// Single validation error with path context.
#[derive(Debug, Clone, serde::Serialize)]
pub struct FieldError {
    /// JSON Pointer (RFC 6901) to the invalid field.
    pub path: String,
    /// Human-readable error message.
    pub message: String,
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Client-facing rejection body for a failed validation.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Rejection {
    pub message: String,
    pub errors: Vec<FieldError>,
}

impl Rejection {
    pub fn new(errors: Vec<FieldError>) -> Self {
        Self {
            message: "Validation failed".to_string(),
            errors,
        }
    }

    /// HTTP status paired with the rejection body.
    pub fn status_code(&self) -> u16 {
        400
    }
}

impl LoadError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            LoadError::InvalidJson { .. } => 2,
            _ => 3, // IO
        }
    }
}

impl TranslateError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        2
    }
}

impl MetaError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        2
    }
}

impl ValidateError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            ValidateError::Invalid { .. } => 1,
            _ => 2,
        }
    }

    /// HTTP status an adapter should answer with.
    ///
    /// Validation failures are the client's fault; everything else is a
    /// schema-definition problem on the server side.
    pub fn status_code(&self) -> u16 {
        match self {
            ValidateError::Invalid { .. } => 400,
            _ => 500,
        }
    }

    /// Client-facing rejection body, present only for validation failures.
    pub fn to_rejection(&self) -> Option<Rejection> {
        match self {
            ValidateError::Invalid { errors } => Some(Rejection::new(errors.clone())),
            _ => None,
        }
    }
}
