//! Error types for value access and archive operations.

use thiserror::Error;

/// Errors raised by the type traits and the binary archive.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FeaturizerError {
    /// A null `Option` was read as if it held a value.
    #[error("get_nullable_value attempt on Optional type null.")]
    NullOptionalAccess,

    /// A NaN float or double was read as if it held a value.
    #[error("get_nullable_value attempt on {type_name} null.")]
    NullFloatAccess { type_name: &'static str },

    /// Decode requested more bytes than remain in the buffer.
    #[error(
        "archive underflow: {requested} byte(s) requested at offset {offset}, {remaining} remaining"
    )]
    ArchiveUnderflow {
        requested: usize,
        remaining: usize,
        offset: usize,
    },

    /// Model archive carries a major version this build cannot read.
    #[error("Unsupported archive version: {major}.{minor} (supported major version: {supported_major})")]
    UnsupportedVersion {
        major: u16,
        minor: u16,
        supported_major: u16,
    },

    /// Caller-supplied input is unusable.
    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    /// Archive bytes do not decode to the requested type.
    #[error("malformed archive: {message}")]
    Malformed { message: String },

    /// A length prefix does not fit the 32-bit count field.
    #[error("length {len} exceeds the 32-bit count field")]
    LengthOverflow { len: usize },

    /// Bytes were left over after the caller finished decoding.
    #[error("archive has {remaining} unread trailing byte(s)")]
    TrailingBytes { remaining: usize },
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, FeaturizerError>;

impl FeaturizerError {
    /// Create an InvalidInput error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create a Malformed error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            message: message.into(),
        }
    }

    /// Create a NullFloatAccess error for the given floating type name.
    pub fn null_float(type_name: &'static str) -> Self {
        Self::NullFloatAccess { type_name }
    }
}
