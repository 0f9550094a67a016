//! Deterministic save/restore of Coil traversal state.
//!
//! Serializes a [`TraversalState`](coil_engine::TraversalState) to a compact
//! binary record and back with full fidelity. All I/O uses a custom binary
//! codec (no serde dependency).
//!
//! # Format
//!
//! ```text
//! [MAGIC "COIL"] [VERSION u8]
//! [origin pos] [origin dir u8]
//! [reached count u32] [pos]...
//! [current pos] [entered-from dir u8]
//! [image blob: u32 length + bytes]
//! [caster: u8 flag + u128]
//! [caster attributes: u8 flag + u32 length + bytes]
//! [step count: u8 flag + u64]
//! [bounds: u8 flag + min pos + max pos]
//! ```
//!
//! Integers are little-endian; positions are three `i32`s; directions are
//! their stable ordinal byte. Optional fields use presence-flag encoding.
//! Readers tolerate an absent step count (defaults to 0) and absent bounds
//! (default to the zero coordinate) so records written before those fields
//! existed still load; the bounds can then be re-derived from the reached
//! set via [`TraversalState::rederive_bounds`](coil_engine::TraversalState).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod codec;
pub mod error;

pub use codec::{load, save, save_to_vec};
pub use error::CodecError;

/// Magic bytes at the start of every persisted record.
pub const MAGIC: [u8; 4] = *b"COIL";

/// Current binary format version.
pub const FORMAT_VERSION: u8 = 1;
