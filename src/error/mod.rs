//! Error handling for cidx.
//!
//! This module provides:
//! - [`CidxError`]: The main error enum for all fallible cidx operations
//! - [`ErrorCode`]: Standardized error codes for machine parsing
//! - [`StructuredError`]: Rich error type with suggestions and context
//!
//! Searching and loading never return these errors: degenerate inputs there
//! have defined outputs, and per-category failures are recorded in the
//! store's load report instead.

mod codes;
mod suggestions;

use std::io;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub use codes::ErrorCode;
pub use suggestions::{suggest_for_error, suggest_similar_types};

/// Main error type for cidx operations.
#[derive(Error, Debug)]
pub enum CidxError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to read catalog file {path}: {source}")]
    CatalogRead {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Catalog server returned HTTP {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Catalog payload for '{category}' is malformed: {reason}")]
    MalformedPayload { category: String, reason: String },

    #[error("Catalog type not loaded: {requested}")]
    CategoryNotFound {
        requested: String,
        known: Vec<String>,
    },

    #[error("No base item named '{name}' in '{category}'")]
    ItemNotFound { category: String, name: String },

    #[error("Config error: {0}")]
    Config(String),

    #[error("Config file not found: {path}")]
    ConfigNotFound { path: String },

    #[error("No catalog types are loaded")]
    NoCatalogs,

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CidxError {
    /// Get the error code for this error.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Io(_) => ErrorCode::IoError,
            Self::Json(_) => ErrorCode::SerializationError,
            Self::Http(_) => ErrorCode::NetworkUnreachable,
            Self::CatalogRead { .. } => ErrorCode::StorageReadError,
            Self::HttpStatus { .. } => ErrorCode::NetworkBadStatus,
            Self::MalformedPayload { .. } => ErrorCode::MalformedPayload,
            Self::CategoryNotFound { .. } => ErrorCode::CategoryNotFound,
            Self::ItemNotFound { .. } => ErrorCode::ItemNotFound,
            Self::Config(_) => ErrorCode::ConfigInvalid,
            Self::ConfigNotFound { .. } => ErrorCode::ConfigNotFound,
            Self::NoCatalogs => ErrorCode::IndexEmpty,
            Self::Timeout(_) => ErrorCode::NetworkTimeout,
            Self::Internal(_) => ErrorCode::InternalError,
        }
    }

    /// Get context information for this error as JSON.
    #[must_use]
    pub fn context(&self) -> Option<Value> {
        match self {
            Self::CatalogRead { path, .. } => Some(serde_json::json!({ "path": path })),
            Self::HttpStatus { url, status } => {
                Some(serde_json::json!({ "url": url, "status": status }))
            }
            Self::MalformedPayload { category, reason } => {
                Some(serde_json::json!({ "type": category, "reason": reason }))
            }
            Self::CategoryNotFound { requested, known } => {
                Some(serde_json::json!({ "type": requested, "known": known }))
            }
            Self::ItemNotFound { category, name } => {
                Some(serde_json::json!({ "type": category, "name": name }))
            }
            Self::ConfigNotFound { path } => Some(serde_json::json!({ "path": path })),
            _ => None,
        }
    }

    /// Convert this error to a structured error.
    #[must_use]
    pub fn to_structured(&self) -> StructuredError {
        StructuredError::from_cidx_error(self)
    }
}

/// A structured error with machine-readable code, suggestion, and context.
///
/// Emitted by the CLI in machine output modes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredError {
    /// The error code (e.g., "CATEGORY_NOT_FOUND")
    pub code: ErrorCode,

    /// The numeric error code (e.g., 101)
    pub numeric_code: u16,

    /// Human-readable error message
    pub message: String,

    /// Actionable suggestion for recovery
    pub suggestion: String,

    /// Additional context for debugging
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,

    /// Whether this error is potentially recoverable by the user
    pub recoverable: bool,

    /// URL to documentation about this error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help_url: Option<String>,

    /// Error category (e.g., "catalog", "config", "network")
    pub category: String,
}

impl StructuredError {
    /// Create a new structured error.
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            numeric_code: code.numeric(),
            suggestion: code.suggestion().to_string(),
            context: None,
            recoverable: code.is_recoverable(),
            help_url: code.help_url(),
            category: code.category().to_string(),
            code,
            message,
        }
    }

    /// Create a structured error from a [`CidxError`].
    #[must_use]
    pub fn from_cidx_error(err: &CidxError) -> Self {
        let code = err.code();
        let context = err.context();
        let message = err.to_string();
        let suggestion = suggest_for_error(code, context.as_ref());

        Self {
            code,
            numeric_code: code.numeric(),
            message,
            suggestion,
            context,
            recoverable: code.is_recoverable(),
            help_url: code.help_url(),
            category: code.category().to_string(),
        }
    }

    /// Add context to this error.
    #[must_use]
    pub fn with_context(mut self, context: Value) -> Self {
        self.context = Some(context);
        self.suggestion = suggest_for_error(self.code, self.context.as_ref());
        self
    }

    /// Set a custom suggestion.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = suggestion.into();
        self
    }
}

impl std::fmt::Display for StructuredError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl From<CidxError> for StructuredError {
    fn from(err: CidxError) -> Self {
        Self::from_cidx_error(&err)
    }
}

impl From<&CidxError> for StructuredError {
    fn from(err: &CidxError) -> Self {
        Self::from_cidx_error(err)
    }
}

/// Result type alias using [`CidxError`].
pub type Result<T> = std::result::Result<T, CidxError>;
