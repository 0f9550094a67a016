//! The opaque carried-image contract.

use crate::error::ImageCodecError;

/// Program state carried from cell to cell during traversal.
///
/// The engine treats the image as an opaque payload: it is cloned into each
/// cell's control-flow decision, replaced wholesale by the cell's update on a
/// successful advance, and serialized by the persistence codec through this
/// trait alone. The engine never assumes anything about its internal
/// structure.
///
/// `Default` supplies the fresh image installed when a network is first
/// discovered.
pub trait CarriedImage: Clone + Default {
    /// Serialize to an opaque byte blob for persistence.
    fn to_bytes(&self) -> Vec<u8>;

    /// Decode a blob previously produced by [`to_bytes`](Self::to_bytes).
    fn from_bytes(bytes: &[u8]) -> Result<Self, ImageCodecError>;

    /// The same image with its cumulative per-slate operation budget reset
    /// to zero.
    ///
    /// Applied by the engine after every successful advance so that no
    /// single cell's evaluation can monopolize a tick.
    #[must_use]
    fn with_ops_reset(self) -> Self;
}
