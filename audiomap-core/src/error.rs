//! Common error types for audiomap

use thiserror::Error;

/// Common result type for audiomap operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while loading a catalog or engine configuration.
///
/// Resolution itself never fails: a prompt that cannot be matched comes back
/// as a `ResolutionResult` carrying its missing segments, not as an error.
#[derive(Error, Debug)]
pub enum Error {
    /// Catalog source unreadable (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Catalog source unparsable (wraps csv::Error)
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Required catalog columns absent
    #[error("Catalog format error: {0}")]
    CatalogFormat(String),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),
}
