//! Lockstep driver for a traversal instance.
//!
//! The engine itself never owns a clock; an external scheduler calls
//! [`CircuitRunner::tick`] once per scheduling tick and the runner spaces
//! out traversal steps according to the [`speed`](crate::speed) policy.

use coil_core::{CarriedImage, Grid, Host};

use crate::speed::ticks_until_next_step;
use crate::state::TraversalState;

/// Outcome of one scheduler tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunnerStatus {
    /// The cooldown has not elapsed; no step was executed.
    Waiting {
        /// Ticks remaining before the next step.
        ticks_left: u64,
    },
    /// One step executed and the traversal continues.
    Advanced,
    /// The traversal has halted. Terminal; later ticks keep returning this.
    Halted,
}

/// Drives a [`TraversalState`] on the speed-policy cadence.
///
/// After [`RunnerStatus::Halted`] is returned the runner is inert; recover
/// the state with [`into_state`](CircuitRunner::into_state) for cleanup and
/// persistence.
#[derive(Clone, Debug)]
pub struct CircuitRunner<I> {
    state: TraversalState<I>,
    cooldown: u64,
    halted: bool,
}

impl<I: CarriedImage> CircuitRunner<I> {
    /// Wrap a freshly discovered (or restored) state. The first step runs
    /// after the full interval the speed policy assigns to the current step
    /// count.
    pub fn new(state: TraversalState<I>) -> Self {
        let cooldown = ticks_until_next_step(state.step_count);
        Self {
            state,
            cooldown,
            halted: false,
        }
    }

    /// Advance one scheduler tick.
    pub fn tick(&mut self, grid: &dyn Grid<I>, host: &mut dyn Host) -> RunnerStatus {
        if self.halted {
            return RunnerStatus::Halted;
        }
        self.cooldown -= 1;
        if self.cooldown > 0 {
            return RunnerStatus::Waiting {
                ticks_left: self.cooldown,
            };
        }
        if self.state.step(grid, host) {
            self.cooldown = ticks_until_next_step(self.state.step_count);
            RunnerStatus::Advanced
        } else {
            self.halted = true;
            RunnerStatus::Halted
        }
    }

    /// Whether the traversal has halted.
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Read access to the driven state.
    pub fn state(&self) -> &TraversalState<I> {
        &self.state
    }

    /// Recover the state, e.g. for end-of-execution cleanup or persistence.
    pub fn into_state(self) -> TraversalState<I> {
        self.state
    }
}
