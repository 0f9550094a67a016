//! Error types for the Coil circuit traversal engine.
//!
//! Discovery failures are result values returned to the caller. Traversal-time
//! conditions (missing cell, ambiguous exit, lost controller) are not error
//! values at all: the step contract is a boolean continuation signal plus
//! host-visible notifications, so they never appear here.

use crate::pos::GridPos;
use std::error::Error;
use std::fmt;

/// Errors from network discovery.
///
/// Both variants are non-fatal to the hosting process; they describe a grid
/// that does not form a usable circuit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DiscoveryError {
    /// No cell accepted entry at all — the seed points at nothing.
    Empty,
    /// The structure never loops back onto the seed's housing cell.
    UnclosedLoop {
        /// The terminal dead-end cell, for diagnostics. Guaranteed to have
        /// no valid exits back into the discovered set.
        last_pos: GridPos,
    },
}

impl fmt::Display for DiscoveryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "no circuit cell accepted entry from the seed"),
            Self::UnclosedLoop { last_pos } => {
                write!(f, "circuit does not close; dead end at {last_pos}")
            }
        }
    }
}

impl Error for DiscoveryError {}

/// Errors from decoding an opaque carried-image blob.
///
/// Produced by [`CarriedImage::from_bytes`](crate::image::CarriedImage) and
/// wrapped by the persistence codec.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImageCodecError {
    /// The blob does not decode to a valid image.
    Malformed {
        /// What went wrong.
        detail: String,
    },
}

impl fmt::Display for ImageCodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed { detail } => write!(f, "malformed image blob: {detail}"),
        }
    }
}

impl Error for ImageCodecError {}
