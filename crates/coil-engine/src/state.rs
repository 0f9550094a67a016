//! The persistent traversal state and the per-tick step state machine.

use coil_core::{
    CarriedImage, CasterId, ControlFlow, Direction, DiscoveryError, Grid, GridPos, Host,
};
use indexmap::IndexSet;

use crate::discover::{bounding_corners, discover, DiscoveredNetwork};

/// The persistent record of one running circuit.
///
/// Created once by discovery, mutated every tick by
/// [`step`](TraversalState::step), and discarded after the step signals halt
/// and [`end_execution`](TraversalState::end_execution) has run. Owned by the
/// external impetus object for its entire lifetime; exclusive `&mut` access
/// guarantees at most one in-flight tick.
#[derive(Clone, Debug, PartialEq)]
pub struct TraversalState<I> {
    /// The fixed seed coordinate. Immutable after creation.
    pub origin_pos: GridPos,
    /// The fixed initial direction. Immutable after creation.
    pub origin_dir: Direction,
    /// Positions visited at least once during execution. Starts containing
    /// only the origin; grows monotonically, never shrinks.
    pub reached: IndexSet<GridPos>,
    /// The active cursor position. Always a member of the originally
    /// discovered network or the origin itself.
    pub current_pos: GridPos,
    /// The direction execution last entered `current_pos` from.
    pub entered_from: Direction,
    /// The opaque carried program state. Replaced wholesale at the end of
    /// each successful step.
    pub image: I,
    /// Identity of the initiating entity, if any. Immutable.
    pub caster: Option<CasterId>,
    /// Opaque decoration of the initiating entity, if any. Immutable.
    pub caster_attributes: Option<Vec<u8>>,
    /// Completed energize operations. Drives the speed policy.
    pub step_count: u64,
    /// Componentwise minimum of the discovered network. Computed once at
    /// discovery; not updated during traversal.
    pub bounds_min: GridPos,
    /// Componentwise maximum of the discovered network plus a one-cell
    /// margin on every axis (exclusive-style bound).
    pub bounds_max: GridPos,
}

impl<I: CarriedImage> TraversalState<I> {
    /// Build the initial state from a discovered network.
    ///
    /// The reached set starts with the origin alone; the cursor starts at the
    /// network's entry cell with the seed direction as its entry direction;
    /// the image is fresh and the step count zero.
    pub fn new(
        network: &DiscoveredNetwork,
        origin_pos: GridPos,
        origin_dir: Direction,
        caster: Option<CasterId>,
        caster_attributes: Option<Vec<u8>>,
    ) -> Self {
        let mut reached = IndexSet::new();
        reached.insert(origin_pos);
        Self {
            origin_pos,
            origin_dir,
            reached,
            current_pos: network.entry,
            entered_from: origin_dir,
            image: I::default(),
            caster,
            caster_attributes,
            step_count: 0,
            bounds_min: network.bounds_min,
            bounds_max: network.bounds_max,
        }
    }

    /// Run discovery from a seed and build the initial state in one call.
    ///
    /// # Errors
    ///
    /// Propagates [`DiscoveryError`] when the grid does not form a closed
    /// circuit through the seed.
    pub fn discover(
        seed_pos: GridPos,
        seed_dir: Direction,
        grid: &dyn Grid<I>,
        caster: Option<CasterId>,
        caster_attributes: Option<Vec<u8>>,
    ) -> Result<Self, DiscoveryError> {
        let network = discover(seed_pos, seed_dir, grid)?;
        Ok(Self::new(
            &network,
            seed_pos,
            seed_dir,
            caster,
            caster_attributes,
        ))
    }

    /// Execute one traversal step. Returns `true` to continue running.
    ///
    /// Atomic from the scheduler's perspective: advances zero or one
    /// cell-hop and returns. On any halting condition the state is left
    /// as-is apart from the energize bookkeeping that already happened.
    pub fn step(&mut self, grid: &dyn Grid<I>, host: &mut dyn Host) -> bool {
        // Desync: the cell we were standing on vanished or changed.
        let Some(cell) = grid.cell_at(self.current_pos) else {
            host.sfx(self.current_pos, false);
            host.report_cell_missing(self.current_pos);
            return false;
        };

        cell.energize(self.current_pos);
        self.reached.insert(self.current_pos);
        self.step_count += 1;

        let decision =
            cell.on_control_flow(self.image.clone(), host, self.entered_from, self.current_pos);

        // The cell may have torn the controller down while executing. Do not
        // trust its exits against a missing controller, and do not notify —
        // the notification channel is gone.
        if !host.is_impetus_present() {
            return false;
        }

        let (exits, update) = match decision {
            // The cell already reported why it stopped.
            ControlFlow::Stop => return false,
            ControlFlow::Continue { exits, update } => (exits, update),
        };

        let mut found: Option<(GridPos, Direction)> = None;
        for (pos, dir) in exits {
            let valid = grid
                .cell_at(pos)
                .is_some_and(|c| c.can_enter_from(dir, pos));
            if !valid {
                continue;
            }
            if found.is_some() {
                // Branching is disallowed: the network must have a single
                // deterministic successor at every point.
                host.sfx(self.current_pos, false);
                host.report_many_exits(self.current_pos);
                return false;
            }
            found = Some((pos, dir));
        }

        match found {
            None => {
                host.sfx(self.current_pos, false);
                host.report_no_exits(self.current_pos);
                false
            }
            Some((pos, dir)) => {
                host.sfx(self.current_pos, true);
                self.current_pos = pos;
                self.entered_from = dir;
                self.image = update.with_ops_reset();
                true
            }
        }
    }

    /// Best-effort de-energize of every reached cell.
    ///
    /// Idempotent per cell; positions whose cell vanished or changed are
    /// silently skipped. Must be called once the step function has signalled
    /// halt.
    pub fn end_execution(&self, grid: &dyn Grid<I>) {
        for &pos in &self.reached {
            if let Some(cell) = grid.cell_at(pos) {
                cell.de_energize(pos);
            }
        }
    }

    /// Re-derive the bounding corners from the reached set.
    ///
    /// Fallback for records persisted before the bounding box was stored;
    /// lossy relative to the discovery-time bounds when the traversal has
    /// not yet revisited every cell.
    pub fn rederive_bounds(&mut self) {
        let (min, max) = bounding_corners(&self.reached);
        self.bounds_min = min;
        self.bounds_max = max;
    }
}
