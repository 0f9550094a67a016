//! Scriptable grid and slate-cell fixtures.
//!
//! [`ScriptedGrid`] maps positions to [`SlateCell`]s, each configured with an
//! accept set and exit list. Helper constructors build the two canonical
//! shapes used across the workspace tests: a closed loop and an open path.

use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;

use coil_core::{CircuitCell, ControlFlow, Direction, Grid, GridPos, Host};
use smallvec::SmallVec;

use crate::CountingImage;

/// A scriptable circuit cell.
///
/// Entry acceptance and exit enumeration come from configured lists;
/// energize/de-energize toggle interior-mutable flags so tests can assert on
/// side effects through `&self`. The control-flow decision passes the image
/// through with one operation consumed and the generation bumped.
#[derive(Clone, Debug, Default)]
pub struct SlateCell {
    accepts: SmallVec<[Direction; 6]>,
    exits: SmallVec<[Direction; 6]>,
    stop: bool,
    kill_flag: Option<Rc<Cell<bool>>>,
    proposed: Option<Vec<(GridPos, Direction)>>,
    energized: Cell<bool>,
    energize_count: Cell<u32>,
    de_energize_count: Cell<u32>,
}

impl SlateCell {
    /// A cell accepting the given travel directions and exiting through
    /// `exits` (order preserved — it drives discovery order).
    pub fn new(
        accepts: impl IntoIterator<Item = Direction>,
        exits: impl IntoIterator<Item = Direction>,
    ) -> Self {
        Self {
            accepts: accepts.into_iter().collect(),
            exits: exits.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Make the control-flow decision `Stop`.
    pub fn stopping(mut self) -> Self {
        self.stop = true;
        self
    }

    /// Clear the shared liveness flag during the control-flow decision,
    /// simulating the controller being torn down by cell execution.
    pub fn killing_impetus(mut self, flag: Rc<Cell<bool>>) -> Self {
        self.kill_flag = Some(flag);
        self
    }

    /// Override the exit candidates proposed at control-flow time (by
    /// default they are derived from the configured exit directions).
    pub fn proposing(mut self, exits: Vec<(GridPos, Direction)>) -> Self {
        self.proposed = Some(exits);
        self
    }

    pub fn is_energized(&self) -> bool {
        self.energized.get()
    }

    pub fn energize_count(&self) -> u32 {
        self.energize_count.get()
    }

    pub fn de_energize_count(&self) -> u32 {
        self.de_energize_count.get()
    }
}

impl CircuitCell<CountingImage> for SlateCell {
    fn can_enter_from(&self, dir: Direction, _pos: GridPos) -> bool {
        self.accepts.contains(&dir)
    }

    fn exit_directions(&self, _pos: GridPos) -> SmallVec<[Direction; 6]> {
        self.exits.clone()
    }

    fn energize(&self, _pos: GridPos) {
        self.energized.set(true);
        self.energize_count.set(self.energize_count.get() + 1);
    }

    fn de_energize(&self, _pos: GridPos) {
        self.energized.set(false);
        self.de_energize_count.set(self.de_energize_count.get() + 1);
    }

    fn on_control_flow(
        &self,
        image: CountingImage,
        _host: &mut dyn Host,
        _entered_from: Direction,
        pos: GridPos,
    ) -> ControlFlow<CountingImage> {
        if let Some(flag) = &self.kill_flag {
            flag.set(false);
        }
        if self.stop {
            return ControlFlow::Stop;
        }
        let exits = match &self.proposed {
            Some(list) => list.iter().copied().collect(),
            None => self
                .exits
                .iter()
                .map(|&dir| (pos.relative(dir), dir))
                .collect(),
        };
        ControlFlow::Continue {
            exits,
            update: CountingImage {
                ops_used: image.ops_used + 1,
                generation: image.generation + 1,
            },
        }
    }
}

/// In-memory sparse grid of [`SlateCell`]s.
#[derive(Debug, Default)]
pub struct ScriptedGrid {
    cells: HashMap<GridPos, SlateCell>,
}

impl ScriptedGrid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, pos: GridPos, cell: SlateCell) {
        self.cells.insert(pos, cell);
    }

    /// Remove the cell at `pos`, for desync scenarios.
    pub fn remove(&mut self, pos: GridPos) -> Option<SlateCell> {
        self.cells.remove(&pos)
    }

    /// Direct fixture access for side-effect assertions.
    pub fn cell(&self, pos: GridPos) -> Option<&SlateCell> {
        self.cells.get(&pos)
    }

    /// Build a closed loop along `path` (adjacent coordinates, first entry is
    /// the seed's housing cell). Each cell exits toward its successor and
    /// accepts the travel direction from its predecessor.
    ///
    /// Returns the grid, the seed position, and the seed direction.
    ///
    /// # Panics
    ///
    /// Panics if consecutive path entries are not axis-adjacent or the path
    /// has fewer than three cells.
    pub fn closed_loop(path: &[GridPos]) -> (Self, GridPos, Direction) {
        assert!(path.len() >= 3, "a loop needs at least three cells");
        let n = path.len();
        let mut grid = Self::new();
        let step_dir = |i: usize| {
            path[i]
                .direction_to(path[(i + 1) % n])
                .expect("path entries must be axis-adjacent")
        };
        for i in 0..n {
            let enter = step_dir((i + n - 1) % n);
            let exit = step_dir(i);
            grid.insert(path[i], SlateCell::new([enter], [exit]));
        }
        (grid, path[0], step_dir(0))
    }

    /// Build an open path along `path` (first entry is the seed's housing
    /// cell). The last cell keeps exiting in its entry direction, pointing
    /// at empty space, so it is a terminal dead end.
    ///
    /// # Panics
    ///
    /// Panics if consecutive path entries are not axis-adjacent or the path
    /// has fewer than two cells.
    pub fn open_path(path: &[GridPos]) -> (Self, GridPos, Direction) {
        assert!(path.len() >= 2, "a path needs at least two cells");
        let n = path.len();
        let mut grid = Self::new();
        let step_dir = |i: usize| {
            path[i]
                .direction_to(path[i + 1])
                .expect("path entries must be axis-adjacent")
        };
        for i in 0..n {
            let enter = if i == 0 { step_dir(0).opposite() } else { step_dir(i - 1) };
            let exit = if i == n - 1 { enter } else { step_dir(i) };
            grid.insert(path[i], SlateCell::new([enter], [exit]));
        }
        (grid, path[0], step_dir(0))
    }
}

impl Grid<CountingImage> for ScriptedGrid {
    fn cell_at(&self, pos: GridPos) -> Option<&dyn CircuitCell<CountingImage>> {
        self.cells
            .get(&pos)
            .map(|c| c as &dyn CircuitCell<CountingImage>)
    }
}
