//! Flood-fill discovery of a circuit network.

use coil_core::{CarriedImage, Direction, DiscoveryError, Grid, GridPos};
use indexmap::IndexSet;

/// The result of a successful [`discover`] pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiscoveredNetwork {
    /// Every position the flood fill accepted, in acceptance order. Includes
    /// the seed's own housing cell (its presence is the closure proof).
    pub positions: IndexSet<GridPos>,
    /// The first-accepted position — where traversal begins.
    pub entry: GridPos,
    /// Componentwise minimum over the discovered set.
    pub bounds_min: GridPos,
    /// Componentwise maximum over the discovered set, plus a one-cell margin
    /// on every axis so the pair forms exclusive-style volume bounds.
    pub bounds_max: GridPos,
}

impl DiscoveredNetwork {
    /// Whether `pos` falls inside the bounding volume (`min` inclusive,
    /// `max` exclusive).
    pub fn bounds_contain(&self, pos: GridPos) -> bool {
        self.bounds_min.all_le(pos)
            && pos.x < self.bounds_max.x
            && pos.y < self.bounds_max.y
            && pos.z < self.bounds_max.z
    }
}

/// Fold the bounding corners of a non-empty position set.
///
/// Returns `(min, max + (1, 1, 1))`. The margin makes the max corner
/// exclusive, matching [`DiscoveredNetwork::bounds_max`].
///
/// # Panics
///
/// Panics if `positions` is empty; callers hold a discovered (therefore
/// non-empty) set.
pub fn bounding_corners<'a>(positions: impl IntoIterator<Item = &'a GridPos>) -> (GridPos, GridPos) {
    let mut iter = positions.into_iter().copied();
    let first = iter.next().expect("bounding_corners of an empty set");
    let (min, max) = iter.fold((first, first), |(lo, hi), p| {
        (lo.component_min(p), hi.component_max(p))
    });
    (min, max.offset(1, 1, 1))
}

/// Discover the circuit network reachable from a seed.
///
/// Depth-first flood fill over an explicit work stack of
/// `(entry direction, candidate position)` pairs, seeded one cell out from
/// `seed_pos` in `seed_dir`. A candidate is discarded silently when no cell
/// exists there or the cell refuses entry — dead ends are normal during the
/// scan. The first time a position is accepted, one work item is pushed per
/// exit direction the cell reports.
///
/// Traversal order depends on the LIFO stack discipline and the cell's exit
/// enumeration order; that affects which cell is reported as the dead end on
/// failure, but never whether discovery succeeds — the seen set and the
/// closure condition are order-independent.
///
/// # Errors
///
/// - [`DiscoveryError::Empty`] when no cell accepted at all.
/// - [`DiscoveryError::UnclosedLoop`] when the fill never re-included
///   `seed_pos`, meaning the structure cannot loop back through the seed's
///   housing cell. The reported position is the last-accepted cell, which is
///   necessarily terminal: a non-terminal acceptance would have pushed
///   successors that were examined after it.
pub fn discover<I: CarriedImage>(
    seed_pos: GridPos,
    seed_dir: Direction,
    grid: &dyn Grid<I>,
) -> Result<DiscoveredNetwork, DiscoveryError> {
    let mut todo: Vec<(Direction, GridPos)> = vec![(seed_dir, seed_pos.relative(seed_dir))];
    let mut seen: IndexSet<GridPos> = IndexSet::new();
    let mut first_pos: Option<GridPos> = None;
    let mut last_pos = seed_pos;

    while let Some((enter_dir, here)) = todo.pop() {
        let Some(cell) = grid.cell_at(here) else {
            continue;
        };
        if !cell.can_enter_from(enter_dir, here) {
            continue;
        }
        if seen.insert(here) {
            first_pos.get_or_insert(here);
            last_pos = here;
            for out in cell.exit_directions(here) {
                todo.push((out, here.relative(out)));
            }
        }
    }

    let Some(entry) = first_pos else {
        return Err(DiscoveryError::Empty);
    };
    if !seen.contains(&seed_pos) {
        return Err(DiscoveryError::UnclosedLoop { last_pos });
    }

    let (bounds_min, bounds_max) = bounding_corners(&seen);
    Ok(DiscoveredNetwork {
        positions: seen,
        entry,
        bounds_min,
        bounds_max,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use coil_core::CircuitCell;
    use coil_core::Direction::*;
    use coil_test_utils::{ScriptedGrid, SlateCell};
    use proptest::prelude::*;

    fn p(x: i32, y: i32, z: i32) -> GridPos {
        GridPos::new(x, y, z)
    }

    /// Square loop: seed → north → east → south → back west into the seed.
    fn square_loop() -> (ScriptedGrid, GridPos, Direction) {
        ScriptedGrid::closed_loop(&[p(0, 0, 0), p(0, 0, -1), p(1, 0, -1), p(1, 0, 0)])
    }

    #[test]
    fn closed_loop_discovers_every_cell() {
        let (grid, seed, dir) = square_loop();
        let net = discover(seed, dir, &grid).unwrap();
        assert_eq!(net.positions.len(), 4);
        assert!(net.positions.contains(&seed));
        // Entry is the first cell out from the seed.
        assert_eq!(net.entry, p(0, 0, -1));
    }

    #[test]
    fn empty_grid_fails_without_location() {
        let grid = ScriptedGrid::new();
        let err = discover(p(0, 0, 0), North, &grid).unwrap_err();
        assert_eq!(err, DiscoveryError::Empty);
    }

    #[test]
    fn refused_entry_is_empty_not_unclosed() {
        let mut grid = ScriptedGrid::new();
        // A cell exists one step north but only accepts eastbound entry.
        grid.insert(p(0, 0, -1), SlateCell::new([East], [North]));
        let err = discover(p(0, 0, 0), North, &grid).unwrap_err();
        assert_eq!(err, DiscoveryError::Empty);
    }

    #[test]
    fn unclosed_path_reports_terminal_dead_end() {
        let (grid, seed, dir) =
            ScriptedGrid::open_path(&[p(0, 0, 0), p(1, 0, 0), p(2, 0, 0), p(3, 0, 0)]);
        let err = discover(seed, dir, &grid).unwrap_err();
        assert_eq!(
            err,
            DiscoveryError::UnclosedLoop {
                last_pos: p(3, 0, 0)
            }
        );
    }

    #[test]
    fn dead_end_has_no_exit_back_into_network() {
        let (grid, seed, dir) = ScriptedGrid::open_path(&[p(0, 0, 0), p(1, 0, 0), p(2, 0, 0)]);
        let DiscoveryError::UnclosedLoop { last_pos } =
            discover(seed, dir, &grid).unwrap_err()
        else {
            panic!("expected unclosed loop");
        };
        let cell = grid.cell(last_pos).unwrap();
        for dir in cell.exit_directions(last_pos) {
            let target = last_pos.relative(dir);
            let valid = grid
                .cell(target)
                .is_some_and(|c| c.can_enter_from(dir, target));
            assert!(!valid, "dead end {last_pos} has a valid exit toward {target}");
        }
    }

    #[test]
    fn branch_to_absent_cell_is_ignored() {
        // Seed exits both north and east; north points at nothing, east is a
        // straight run that never loops back.
        let mut grid = ScriptedGrid::new();
        grid.insert(p(0, 0, 0), SlateCell::new([West], [North, East]));
        grid.insert(p(1, 0, 0), SlateCell::new([East], [East]));
        grid.insert(p(2, 0, 0), SlateCell::new([East], [East]));
        let err = discover(p(0, 0, 0), East, &grid).unwrap_err();
        assert_eq!(
            err,
            DiscoveryError::UnclosedLoop {
                last_pos: p(2, 0, 0)
            }
        );
    }

    #[test]
    fn bounds_cover_discovered_set_with_margin() {
        let (grid, seed, dir) = square_loop();
        let net = discover(seed, dir, &grid).unwrap();
        assert_eq!(net.bounds_min, p(0, 0, -1));
        assert_eq!(net.bounds_max, p(2, 1, 1));
        for &pos in &net.positions {
            assert!(net.bounds_contain(pos));
        }
        assert!(!net.bounds_contain(p(2, 0, 0)));
        assert!(!net.bounds_contain(p(0, -1, 0)));
    }

    // ── Property tests ──────────────────────────────────────────

    /// Axis-aligned rectangular loop in the XZ plane at height `y`.
    fn rect_loop(x0: i32, z0: i32, w: i32, d: i32, y: i32) -> Vec<GridPos> {
        let mut path = Vec::new();
        for x in x0..x0 + w {
            path.push(p(x, y, z0));
        }
        for z in z0..z0 + d {
            path.push(p(x0 + w, y, z));
        }
        for x in (x0 + 1..=x0 + w).rev() {
            path.push(p(x, y, z0 + d));
        }
        for z in (z0 + 1..=z0 + d).rev() {
            path.push(p(x0, y, z));
        }
        path
    }

    proptest! {
        #[test]
        fn rectangular_loops_close(
            x0 in -20i32..20, z0 in -20i32..20,
            w in 1i32..6, d in 1i32..6,
            y in -5i32..5,
        ) {
            let path = rect_loop(x0, z0, w, d, y);
            let (grid, seed, dir) = ScriptedGrid::closed_loop(&path);
            let net = discover(seed, dir, &grid).unwrap();
            prop_assert_eq!(net.positions.len(), path.len());
            for pos in &path {
                prop_assert!(net.positions.contains(pos));
            }
        }

        #[test]
        fn bounds_invariant_holds(
            x0 in -20i32..20, z0 in -20i32..20,
            w in 1i32..6, d in 1i32..6,
            y in -5i32..5,
        ) {
            let path = rect_loop(x0, z0, w, d, y);
            let (grid, seed, dir) = ScriptedGrid::closed_loop(&path);
            let net = discover(seed, dir, &grid).unwrap();
            for &pos in &net.positions {
                prop_assert!(net.bounds_min.all_le(pos));
                prop_assert!(pos.all_le(net.bounds_max.offset(-1, -1, -1)));
            }
        }
    }
}
