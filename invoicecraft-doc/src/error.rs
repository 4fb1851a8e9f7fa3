//! Document pipeline error types
//!
//! Re-exports invoicecraft-error and provides pipeline-specific conveniences.

// Re-export the core error types
pub use invoicecraft_error::{Error, ErrorKind, ErrorStatus, Result};

// =============================================================================
// Pipeline-specific error constructors
// =============================================================================

/// Create a ParseFailed error
pub fn parse_error(message: impl Into<String>) -> Error {
    Error::parse_failed(message)
}

/// Create a RenderFailed error
pub fn render_error(message: impl Into<String>) -> Error {
    Error::render_failed(message)
}

/// Create an IoFailed error
pub fn io_error(message: impl Into<String>) -> Error {
    Error::new(ErrorKind::IoFailed, message)
}

/// Create a SerializationFailed error
pub fn serialization_error(message: impl Into<String>) -> Error {
    Error::new(ErrorKind::SerializationFailed, message)
}

/// Create an InvalidArgument error
pub fn invalid_argument(message: impl Into<String>) -> Error {
    Error::invalid_argument(message)
}
