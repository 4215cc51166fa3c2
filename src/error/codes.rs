//! Standardized error codes for machine-parseable output.
//!
//! Error codes follow a numeric taxonomy:
//! - 1xx: Catalog errors
//! - 2xx: Index errors
//! - 3xx: Config errors
//! - 5xx: Network errors
//! - 6xx: Storage errors
//! - 9xx: Internal errors

use serde::{Deserialize, Serialize};

/// Standardized error codes for robot mode output.
///
/// Each variant maps to a numeric code (e.g., `CategoryNotFound` -> E101).
/// Codes are grouped by category for easy identification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // ========================================
    // Catalog errors (1xx)
    // ========================================
    /// E101: Requested catalog type is not loaded
    CategoryNotFound,
    /// E103: Catalog payload is not a JSON array
    MalformedPayload,
    /// E104: Base item lookup by name failed
    ItemNotFound,

    // ========================================
    // Index errors (2xx)
    // ========================================
    /// E201: No categories were loaded
    IndexEmpty,

    // ========================================
    // Config errors (3xx)
    // ========================================
    /// E301: Config file not found
    ConfigNotFound,
    /// E302: Config file has invalid syntax or values
    ConfigInvalid,

    // ========================================
    // Network errors (5xx)
    // ========================================
    /// E501: Cannot reach catalog server
    NetworkUnreachable,
    /// E502: Catalog request timed out
    NetworkTimeout,
    /// E503: Catalog server answered with a non-success status
    NetworkBadStatus,

    // ========================================
    // Storage errors (6xx)
    // ========================================
    /// E601: Failed to read a catalog file
    StorageReadError,
    /// E602: Serialization/deserialization failed
    SerializationError,

    // ========================================
    // Internal errors (9xx)
    // ========================================
    /// E901: Unexpected internal error
    InternalError,
    /// E902: IO operation failed
    IoError,
}

impl ErrorCode {
    /// Get the numeric error code (e.g., `CategoryNotFound` -> 101).
    #[must_use]
    pub const fn numeric(&self) -> u16 {
        match self {
            Self::CategoryNotFound => 101,
            Self::MalformedPayload => 103,
            Self::ItemNotFound => 104,

            Self::IndexEmpty => 201,

            Self::ConfigNotFound => 301,
            Self::ConfigInvalid => 302,

            Self::NetworkUnreachable => 501,
            Self::NetworkTimeout => 502,
            Self::NetworkBadStatus => 503,

            Self::StorageReadError => 601,
            Self::SerializationError => 602,

            Self::InternalError => 901,
            Self::IoError => 902,
        }
    }

    /// Error category name (e.g., "catalog", "network").
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self.numeric() / 100 {
            1 => "catalog",
            2 => "index",
            3 => "config",
            5 => "network",
            6 => "storage",
            _ => "internal",
        }
    }

    /// Whether the user can plausibly recover (fix input, retry, reconfigure).
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        !matches!(self, Self::InternalError)
    }

    /// Static recovery suggestion.
    #[must_use]
    pub const fn suggestion(&self) -> &'static str {
        match self {
            Self::CategoryNotFound => {
                "Run `cidx types` to list loaded categories, or add a source with --source <type>=<url|path>"
            }
            Self::MalformedPayload => "The catalog source must contain a JSON array of item objects",
            Self::ItemNotFound => "Use `cidx search <type> <query>` to find the exact item name",
            Self::IndexEmpty => "Configure catalog sources in cidx.toml or pass --source <type>=<url|path>",
            Self::ConfigNotFound => "Create cidx.toml or pass --config <path>",
            Self::ConfigInvalid => "Check the config file syntax and value types",
            Self::NetworkUnreachable => "Check network connectivity and the catalog URL",
            Self::NetworkTimeout => "Increase load.timeout or retry later",
            Self::NetworkBadStatus => "Verify the catalog URL; the server rejected the request",
            Self::StorageReadError => "Check the catalog file path and permissions",
            Self::SerializationError => "The input is not valid JSON",
            Self::InternalError => "Unexpected internal error; re-run with -vv",
            Self::IoError => "Check file paths and permissions",
        }
    }

    /// Documentation anchor for this code, if any.
    #[must_use]
    pub fn help_url(&self) -> Option<String> {
        match self.category() {
            "internal" => None,
            category => Some(format!("https://docs.rs/cidx/latest/cidx/#{category}-errors")),
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "E{}", self.numeric())
    }
}
