//! Error types for the persistence codec.

use coil_core::ImageCodecError;
use std::fmt;
use std::io;

/// Errors that can occur while saving or loading a traversal record.
#[derive(Debug)]
pub enum CodecError {
    /// An I/O error occurred during read or write.
    Io(io::Error),
    /// The record does not start with the expected `b"COIL"` magic bytes.
    InvalidMagic,
    /// The format version is not supported by this build.
    UnsupportedVersion {
        /// The version found in the record.
        found: u8,
    },
    /// A direction byte is outside the valid ordinal range `0..=5`.
    BadDirection {
        /// The offending byte.
        byte: u8,
    },
    /// The record could not be decoded (truncated or corrupt data).
    MalformedRecord {
        /// Human-readable description of what went wrong.
        detail: String,
    },
    /// The embedded image blob failed to decode.
    Image(ImageCodecError),
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::InvalidMagic => write!(f, "invalid magic bytes (expected b\"COIL\")"),
            Self::UnsupportedVersion { found } => {
                write!(f, "unsupported format version {found}")
            }
            Self::BadDirection { byte } => write!(f, "invalid direction ordinal {byte}"),
            Self::MalformedRecord { detail } => write!(f, "malformed record: {detail}"),
            Self::Image(e) => write!(f, "image blob: {e}"),
        }
    }
}

impl std::error::Error for CodecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Image(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for CodecError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<ImageCodecError> for CodecError {
    fn from(e: ImageCodecError) -> Self {
        Self::Image(e)
    }
}
