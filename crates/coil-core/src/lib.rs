//! Core types and traits for the Coil circuit traversal engine.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! fundamental abstractions used throughout the Coil workspace: grid
//! coordinates and directions, caster identity, error types, the cell
//! capability trait, and the grid/host collaborator traits.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cell;
pub mod error;
pub mod id;
pub mod image;
pub mod pos;

pub use cell::{CircuitCell, ControlFlow, ExitCandidates, ExitDirections, Grid, Host};
pub use error::{DiscoveryError, ImageCodecError};
pub use id::CasterId;
pub use image::CarriedImage;
pub use pos::{Direction, GridPos};
