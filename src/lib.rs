pub mod app;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod search;
pub mod store;
pub mod test_utils;

pub use error::{CidxError, Result};

/// Package version from Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
