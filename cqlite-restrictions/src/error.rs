//! Error types for CQLite restrictions

use std::fmt;
use thiserror::Error;

/// Result type alias for restriction operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for restriction operations
#[derive(Error, Debug)]
pub enum Error {
    /// The two sides of an extension belong to different key kinds
    #[error("Cannot extend elements with elements of a different kind")]
    DifferentKind,

    /// The appended elements do not start right after the last column
    #[error("Cannot extend elements with non consecutive elements")]
    NonConsecutiveElements,

    /// A bottom or top value was used as the left side of an extension
    #[error("Range endpoints cannot be extended")]
    RangeEndpointExtension,

    /// Columns and values do not describe a valid set of elements
    #[error("Invalid elements: {0}")]
    InvalidElements(String),

    /// Schema validation errors
    #[error("Schema error: {0}")]
    Schema(String),

    /// Type conversion errors
    #[error("Type conversion error: {0}")]
    TypeConversion(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create an invalid elements error
    pub fn invalid_elements(msg: impl Into<String>) -> Self {
        Self::InvalidElements(msg.into())
    }

    /// Create a schema error
    pub fn schema(msg: impl Into<String>) -> Self {
        Self::Schema(msg.into())
    }

    /// Create a type conversion error
    pub fn type_conversion(msg: impl Into<String>) -> Self {
        Self::TypeConversion(msg.into())
    }

    /// Create a configuration error
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Check if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            Error::Io(_) => true,

            // Misuse of the element algebra is a programming error
            Error::DifferentKind
            | Error::NonConsecutiveElements
            | Error::RangeEndpointExtension
            | Error::InvalidElements(_) => false,

            Error::Schema(_) => false,
            Error::TypeConversion(_) => false,
            Error::Configuration(_) => false,
        }
    }

    /// Check if this error reports a broken caller contract rather than bad input
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            Error::DifferentKind
                | Error::NonConsecutiveElements
                | Error::RangeEndpointExtension
                | Error::InvalidElements(_)
        )
    }

    /// Get the error category
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::DifferentKind
            | Error::NonConsecutiveElements
            | Error::RangeEndpointExtension
            | Error::InvalidElements(_) => ErrorCategory::Logic,
            Error::Schema(_) => ErrorCategory::Schema,
            Error::TypeConversion(_) => ErrorCategory::Data,
            Error::Configuration(_) => ErrorCategory::Configuration,
            Error::Io(_) => ErrorCategory::System,
        }
    }
}

/// Error categories for grouping related errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// System-level errors (I/O)
    System,
    /// Data-related errors (value conversion)
    Data,
    /// Schema-related errors
    Schema,
    /// Configuration errors
    Configuration,
    /// Logic errors
    Logic,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorCategory::System => "System",
            ErrorCategory::Data => "Data",
            ErrorCategory::Schema => "Schema",
            ErrorCategory::Configuration => "Configuration",
            ErrorCategory::Logic => "Logic",
        };
        write!(f, "{}", name)
    }
}
