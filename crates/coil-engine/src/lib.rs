//! Network discovery and tick-by-tick circuit traversal.
//!
//! The engine has three moving parts:
//!
//! - [`discover()`]: a single-pass flood fill that walks the sparse grid from a
//!   seed, validates loop closure, and computes the network's bounding corners.
//! - [`TraversalState`]: the persistent record of one running circuit plus the
//!   per-tick [`step`](TraversalState::step) state machine.
//! - [`CircuitRunner`]: a lockstep driver that spaces steps according to the
//!   [`speed`] policy.
//!
//! # Concurrency
//!
//! Single-threaded cooperative model. `step()` is atomic from the scheduler's
//! perspective — it advances zero or one cell-hop and returns. Exclusive
//! `&mut` ownership of the state enforces the one-in-flight-tick rule at
//! compile time; no locks are involved.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod discover;
pub mod runner;
pub mod speed;
pub mod state;

pub use discover::{discover, DiscoveredNetwork};
pub use runner::{CircuitRunner, RunnerStatus};
pub use speed::ticks_until_next_step;
pub use state::TraversalState;
