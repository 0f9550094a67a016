//! Coil: circuit discovery and tick-by-tick traversal over sparse 3D grids.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! Coil sub-crates. For most users, adding `coil` as a single dependency is
//! sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use coil::prelude::*;
//! use coil::types::{ExitCandidates, ExitDirections, ImageCodecError};
//! use std::collections::HashMap;
//!
//! // The program state carried around the loop: here, a hop counter.
//! #[derive(Clone, Default, Debug, PartialEq)]
//! struct Counter(u64);
//! impl CarriedImage for Counter {
//!     fn to_bytes(&self) -> Vec<u8> {
//!         self.0.to_le_bytes().to_vec()
//!     }
//!     fn from_bytes(bytes: &[u8]) -> Result<Self, ImageCodecError> {
//!         let raw = bytes.try_into().map_err(|_| ImageCodecError::Malformed {
//!             detail: "counter image must be 8 bytes".into(),
//!         })?;
//!         Ok(Self(u64::from_le_bytes(raw)))
//!     }
//!     fn with_ops_reset(self) -> Self {
//!         self
//!     }
//! }
//!
//! // A wire cell: accepts one travel direction, exits through one.
//! struct Wire {
//!     enter: Direction,
//!     exit: Direction,
//! }
//! impl CircuitCell<Counter> for Wire {
//!     fn can_enter_from(&self, dir: Direction, _pos: GridPos) -> bool {
//!         dir == self.enter
//!     }
//!     fn exit_directions(&self, _pos: GridPos) -> ExitDirections {
//!         [self.exit].into_iter().collect()
//!     }
//!     fn energize(&self, _pos: GridPos) {}
//!     fn de_energize(&self, _pos: GridPos) {}
//!     fn on_control_flow(
//!         &self,
//!         image: Counter,
//!         _host: &mut dyn Host,
//!         _entered_from: Direction,
//!         pos: GridPos,
//!     ) -> ControlFlow<Counter> {
//!         let exits: ExitCandidates =
//!             [(pos.relative(self.exit), self.exit)].into_iter().collect();
//!         ControlFlow::Continue {
//!             exits,
//!             update: Counter(image.0 + 1),
//!         }
//!     }
//! }
//!
//! struct Ring(HashMap<GridPos, Wire>);
//! impl Grid<Counter> for Ring {
//!     fn cell_at(&self, pos: GridPos) -> Option<&dyn CircuitCell<Counter>> {
//!         self.0.get(&pos).map(|c| c as &dyn CircuitCell<Counter>)
//!     }
//! }
//!
//! struct Silent;
//! impl Host for Silent {
//!     fn report_many_exits(&mut self, _pos: GridPos) {}
//!     fn report_no_exits(&mut self, _pos: GridPos) {}
//!     fn report_cell_missing(&mut self, _pos: GridPos) {}
//!     fn sfx(&mut self, _pos: GridPos, _success: bool) {}
//!     fn is_impetus_present(&self) -> bool {
//!         true
//!     }
//! }
//!
//! // A 2×2 square loop in the XZ plane.
//! use coil::types::Direction::{East, North, South, West};
//! let p = GridPos::new;
//! let grid = Ring(HashMap::from([
//!     (p(0, 0, 0), Wire { enter: North, exit: East }),
//!     (p(1, 0, 0), Wire { enter: East, exit: South }),
//!     (p(1, 0, 1), Wire { enter: South, exit: West }),
//!     (p(0, 0, 1), Wire { enter: West, exit: North }),
//! ]));
//!
//! // Discover the loop from its seed cell, then run one full revolution.
//! let mut state: TraversalState<Counter> =
//!     TraversalState::discover(p(0, 0, 0), East, &grid, None, None).unwrap();
//! let mut host = Silent;
//! for _ in 0..4 {
//!     assert!(state.step(&grid, &mut host));
//! }
//! assert_eq!(state.image, Counter(4));
//! assert_eq!(state.reached.len(), 4);
//!
//! // Persist and restore with full fidelity.
//! let record = coil::codec::save_to_vec(&state).unwrap();
//! let restored: TraversalState<Counter> =
//!     coil::codec::load(&mut record.as_slice()).unwrap();
//! assert_eq!(restored, state);
//!
//! state.end_execution(&grid);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `coil-core` | Coordinates, directions, IDs, core traits, errors |
//! | [`engine`] | `coil-engine` | Discovery, traversal state machine, lockstep runner |
//! | [`codec`] | `coil-codec` | Binary save/restore of traversal records |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types and traits (`coil-core`).
///
/// Contains grid coordinates, directions, caster identity, error types, and
/// the fundamental traits ([`types::CircuitCell`], [`types::Grid`],
/// [`types::Host`], [`types::CarriedImage`]).
pub use coil_core as types;

/// Discovery, traversal, and pacing (`coil-engine`).
///
/// The [`engine::discover()`] flood fill, the [`engine::TraversalState`] state
/// machine, the [`engine::CircuitRunner`] lockstep driver, and the
/// [`engine::ticks_until_next_step`] speed policy.
pub use coil_engine as engine;

/// Binary persistence of traversal records (`coil-codec`).
///
/// [`codec::save`] and [`codec::load`] round-trip a
/// [`engine::TraversalState`] through a compact versioned record.
pub use coil_codec as codec;

/// Common imports for typical Coil usage.
///
/// ```rust
/// use coil::prelude::*;
/// ```
///
/// This imports the most frequently used types: the cell/grid/host traits,
/// coordinates and directions, the traversal state machine, the runner, and
/// the codec entry points.
pub mod prelude {
    // Core types and traits
    pub use coil_core::{
        CarriedImage, CasterId, CircuitCell, ControlFlow, Direction, Grid, GridPos, Host,
    };

    // Errors
    pub use coil_core::{DiscoveryError, ImageCodecError};

    // Engine
    pub use coil_engine::{
        discover, CircuitRunner, DiscoveredNetwork, RunnerStatus, TraversalState,
        ticks_until_next_step,
    };

    // Codec
    pub use coil_codec::{load, save, save_to_vec, CodecError};
}
