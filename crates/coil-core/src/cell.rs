//! The cell capability trait and its collaborator traits.
//!
//! [`CircuitCell`] is the polymorphic behavior queried by discovery and
//! traversal: entry acceptance, exit enumeration, energize/de-energize, and
//! the control-flow decision. Concrete cell kinds implement it as variants;
//! there is no inheritance hierarchy, and the engine stays generic over cell
//! kind by only ever seeing `&dyn CircuitCell`.

use crate::image::CarriedImage;
use crate::pos::{Direction, GridPos};
use smallvec::SmallVec;

/// Exit candidates proposed by a cell's control-flow decision.
///
/// Inline capacity covers the six axis directions without heap allocation.
pub type ExitCandidates = SmallVec<[(GridPos, Direction); 6]>;

/// The directions a cell exposes as exits, in its stable enumeration order.
pub type ExitDirections = SmallVec<[Direction; 6]>;

/// A cell's control-flow decision after being energized.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ControlFlow<I> {
    /// Execution must end here. The cell is responsible for having already
    /// reported why through the host.
    Stop,
    /// Execution may continue through one of the proposed exits.
    Continue {
        /// Zero or more `(position, entry direction)` candidates. The engine
        /// enforces that exactly one is currently valid.
        exits: ExitCandidates,
        /// The image to carry forward if the advance succeeds.
        update: I,
    },
}

/// The capability interface of one circuit cell.
///
/// # Contract
///
/// - Queries take `&self`; energize/de-energize are externally-owned
///   mutations (implementations use interior mutability or forward to the
///   owning world).
/// - `exit_directions()` order is significant: it fixes the discovery
///   work-stack order and therefore which cell is reported as the dead end
///   on an unclosed loop.
pub trait CircuitCell<I: CarriedImage> {
    /// Whether execution may enter this cell travelling in `dir`.
    fn can_enter_from(&self, dir: Direction, pos: GridPos) -> bool;

    /// The directions execution may exit through, in a stable order.
    fn exit_directions(&self, pos: GridPos) -> ExitDirections;

    /// Host-visible side effect marking this cell active.
    fn energize(&self, pos: GridPos);

    /// Host-visible side effect marking this cell inactive. Idempotent.
    fn de_energize(&self, pos: GridPos);

    /// Execute this cell and decide where control flows next.
    ///
    /// Receives the carried image, the host handle (through which the cell
    /// may post notifications or tear the controller down), the direction
    /// execution entered from, and this cell's position.
    fn on_control_flow(
        &self,
        image: I,
        host: &mut dyn Host,
        entered_from: Direction,
        pos: GridPos,
    ) -> ControlFlow<I>;
}

/// Pure lookup into the sparse grid.
///
/// Read-only from the engine's perspective; the energize/de-energize calls
/// the engine triggers go through the returned cell capability, not through
/// this trait.
pub trait Grid<I: CarriedImage> {
    /// The cell at `pos`, if one exists there.
    fn cell_at(&self, pos: GridPos) -> Option<&dyn CircuitCell<I>>;
}

/// The external controller ("impetus") hosting a traversal instance.
///
/// Consumed for notifications and visual effects; queried for liveness after
/// every control-flow decision, since a cell may tear the controller down as
/// a side effect of executing.
pub trait Host {
    /// A cell reported two or more simultaneously valid exits at `pos`.
    fn report_many_exits(&mut self, pos: GridPos);

    /// A cell reported no valid exit at `pos`.
    fn report_no_exits(&mut self, pos: GridPos);

    /// The cell expected at `pos` vanished or changed under the traversal.
    fn report_cell_missing(&mut self, pos: GridPos);

    /// Visual/sound effect at `pos`; `success` distinguishes the advance
    /// cue from the failure cue.
    fn sfx(&mut self, pos: GridPos, success: bool);

    /// Whether the controller still exists.
    fn is_impetus_present(&self) -> bool;
}
