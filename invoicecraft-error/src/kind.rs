//! Error kinds for invoicecraft operations

use std::fmt;

/// The kind of error that occurred.
///
/// This enum categorizes errors to help users write clear error handling logic.
/// Users can match on ErrorKind to decide how to handle specific error cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    // =========================================================================
    // General errors
    // =========================================================================
    /// An unexpected error occurred - catch-all for unhandled cases
    Unexpected,

    /// The requested feature or operation is not supported
    Unsupported,

    /// Invalid configuration or parameters
    ConfigInvalid,

    // =========================================================================
    // Record errors
    // =========================================================================
    /// Failed to parse an invoice record from structured input
    ParseFailed,

    /// Serialization/deserialization failed
    SerializationFailed,

    /// Invalid argument passed to function
    InvalidArgument,

    // =========================================================================
    // Render errors
    // =========================================================================
    /// Document rendering failed (layout or underlying library fault)
    RenderFailed,

    // =========================================================================
    // Tool errors
    // =========================================================================
    /// No tool with the requested name is registered
    ToolUnknown,

    /// Tool registration was rejected (duplicate name, bad schema)
    ToolRejected,

    // =========================================================================
    // Session errors
    // =========================================================================
    /// The requested session was not found
    SessionNotFound,

    // =========================================================================
    // IO errors
    // =========================================================================
    /// File not found
    FileNotFound,

    /// Permission denied
    PermissionDenied,

    /// IO operation failed
    IoFailed,
}

impl ErrorKind {
    /// Returns the error kind as a static string
    pub fn as_str(&self) -> &'static str {
        match self {
            // General
            ErrorKind::Unexpected => "Unexpected",
            ErrorKind::Unsupported => "Unsupported",
            ErrorKind::ConfigInvalid => "ConfigInvalid",

            // Record
            ErrorKind::ParseFailed => "ParseFailed",
            ErrorKind::SerializationFailed => "SerializationFailed",
            ErrorKind::InvalidArgument => "InvalidArgument",

            // Render
            ErrorKind::RenderFailed => "RenderFailed",

            // Tool
            ErrorKind::ToolUnknown => "ToolUnknown",
            ErrorKind::ToolRejected => "ToolRejected",

            // Session
            ErrorKind::SessionNotFound => "SessionNotFound",

            // IO
            ErrorKind::FileNotFound => "FileNotFound",
            ErrorKind::PermissionDenied => "PermissionDenied",
            ErrorKind::IoFailed => "IoFailed",
        }
    }

    /// Check if this error kind is retryable by default
    pub fn is_retryable(&self) -> bool {
        // Only transient filesystem faults qualify; everything else in this
        // domain is deterministic.
        matches!(self, ErrorKind::IoFailed)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_display() {
        assert_eq!(ErrorKind::ParseFailed.to_string(), "ParseFailed");
        assert_eq!(ErrorKind::RenderFailed.to_string(), "RenderFailed");
        assert_eq!(ErrorKind::ToolUnknown.to_string(), "ToolUnknown");
    }

    #[test]
    fn test_is_retryable() {
        assert!(ErrorKind::IoFailed.is_retryable());
        assert!(!ErrorKind::ParseFailed.is_retryable());
        assert!(!ErrorKind::RenderFailed.is_retryable());
        assert!(!ErrorKind::ToolUnknown.is_retryable());
    }
}
