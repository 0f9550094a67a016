//! Test utilities and mock types for Coil development.
//!
//! Provides mock implementations of the collaborator traits
//! ([`Host`], [`CarriedImage`]) and, in [`fixtures`], a scriptable grid of
//! slate cells for constructing circuit scenarios.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::cell::Cell;
use std::rc::Rc;

use coil_core::{CarriedImage, GridPos, Host, ImageCodecError};

pub mod fixtures;

pub use fixtures::{ScriptedGrid, SlateCell};

/// Image fixture that counts work.
///
/// `ops_used` is the per-slate operation budget the engine resets on every
/// successful advance; `generation` counts how many cells have executed the
/// image and is never reset, which makes it a convenient progress probe.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CountingImage {
    pub ops_used: u32,
    pub generation: u64,
}

impl CarriedImage for CountingImage {
    fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(12);
        buf.extend_from_slice(&self.ops_used.to_le_bytes());
        buf.extend_from_slice(&self.generation.to_le_bytes());
        buf
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, ImageCodecError> {
        if bytes.len() != 12 {
            return Err(ImageCodecError::Malformed {
                detail: format!("expected 12 bytes, got {}", bytes.len()),
            });
        }
        Ok(Self {
            ops_used: u32::from_le_bytes(bytes[0..4].try_into().unwrap()),
            generation: u64::from_le_bytes(bytes[4..12].try_into().unwrap()),
        })
    }

    fn with_ops_reset(self) -> Self {
        Self {
            ops_used: 0,
            ..self
        }
    }
}

/// One notification or effect observed by a [`RecordingHost`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HostEvent {
    ManyExits(GridPos),
    NoExits(GridPos),
    CellMissing(GridPos),
    Sfx { pos: GridPos, success: bool },
}

/// Host mock that records every notification in order.
///
/// Liveness is backed by a shared flag so a fixture cell can tear the
/// controller down mid-step (see
/// [`SlateCell::killing_impetus`](fixtures::SlateCell::killing_impetus)).
#[derive(Clone, Debug)]
pub struct RecordingHost {
    pub events: Vec<HostEvent>,
    present: Rc<Cell<bool>>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            present: Rc::new(Cell::new(true)),
        }
    }

    /// The shared liveness flag; hand a clone to a fixture cell to simulate
    /// controller teardown during its control-flow decision.
    pub fn liveness_flag(&self) -> Rc<Cell<bool>> {
        Rc::clone(&self.present)
    }

    /// Mark the controller as gone.
    pub fn vanish(&self) {
        self.present.set(false);
    }

    /// Events excluding sfx, for assertions on notifications alone.
    pub fn notifications(&self) -> Vec<HostEvent> {
        self.events
            .iter()
            .copied()
            .filter(|e| !matches!(e, HostEvent::Sfx { .. }))
            .collect()
    }
}

impl Default for RecordingHost {
    fn default() -> Self {
        Self::new()
    }
}

impl Host for RecordingHost {
    fn report_many_exits(&mut self, pos: GridPos) {
        self.events.push(HostEvent::ManyExits(pos));
    }

    fn report_no_exits(&mut self, pos: GridPos) {
        self.events.push(HostEvent::NoExits(pos));
    }

    fn report_cell_missing(&mut self, pos: GridPos) {
        self.events.push(HostEvent::CellMissing(pos));
    }

    fn sfx(&mut self, pos: GridPos, success: bool) {
        self.events.push(HostEvent::Sfx { pos, success });
    }

    fn is_impetus_present(&self) -> bool {
        self.present.get()
    }
}
