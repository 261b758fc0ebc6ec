//! Error types for the Scrub core library
//!
//! Follows the spec's taxonomy: configuration errors (bad rule
//! declarations, unknown filter names) abort a sanitize call outright,
//! while filter execution failures propagate to the caller untouched.

use thiserror::Error;

/// Main error type for sanitization operations
#[derive(Error, Debug)]
pub enum Error {
    /// A rule declaration was neither a string, a list of strings, nor an
    /// inline function
    #[error("Unsupported rule type for field '{field}': found {found}")]
    UnsupportedRule { field: String, found: String },

    /// A named rule referenced a filter the registry does not know
    #[error("No filter found by the name of '{name}' (field '{field}')")]
    UnknownFilter { name: String, field: String },

    /// A filter rejected its input or options
    #[error("Filter '{name}' failed: {message}")]
    Filter { name: String, message: String },

    /// Invalid engine configuration
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl Error {
    /// Create a filter execution error
    pub fn filter(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Filter {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;
