//! Sparse 3D grid coordinates and axis-aligned directions.

use std::fmt;

/// A coordinate in the sparse 3D grid.
///
/// Plain integer triple with value semantics. Ordering is lexicographic
/// (derived), which is only used for stable sorting in diagnostics; bounding
/// comparisons go through [`component_min`](GridPos::component_min) and
/// [`component_max`](GridPos::component_max) instead.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridPos {
    /// West–east axis.
    pub x: i32,
    /// Down–up axis.
    pub y: i32,
    /// North–south axis.
    pub z: i32,
}

impl GridPos {
    /// The zero coordinate, used as the lossy default when an older persisted
    /// record lacks bounding-box fields.
    pub const ZERO: GridPos = GridPos { x: 0, y: 0, z: 0 };

    /// Create a coordinate from its components.
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// The coordinate one cell away in `dir`.
    pub fn relative(self, dir: Direction) -> Self {
        let (dx, dy, dz) = dir.unit();
        self.offset(dx, dy, dz)
    }

    /// Translate by a component delta.
    pub const fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            z: self.z + dz,
        }
    }

    /// Componentwise minimum with `other`.
    pub fn component_min(self, other: Self) -> Self {
        Self {
            x: self.x.min(other.x),
            y: self.y.min(other.y),
            z: self.z.min(other.z),
        }
    }

    /// Componentwise maximum with `other`.
    pub fn component_max(self, other: Self) -> Self {
        Self {
            x: self.x.max(other.x),
            y: self.y.max(other.y),
            z: self.z.max(other.z),
        }
    }

    /// `true` if `self <= other` on every axis.
    pub fn all_le(self, other: Self) -> bool {
        self.x <= other.x && self.y <= other.y && self.z <= other.z
    }

    /// The direction of travel from `self` to an adjacent coordinate, or
    /// `None` if `other` is not exactly one cell away along an axis.
    pub fn direction_to(self, other: Self) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|&dir| self.relative(dir) == other)
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

impl From<(i32, i32, i32)> for GridPos {
    fn from((x, y, z): (i32, i32, i32)) -> Self {
        Self { x, y, z }
    }
}

/// One of the six axis-aligned unit directions.
///
/// The discriminant order is the stable ordinal encoding used by the
/// persistence codec; it must never be reordered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Direction {
    /// −Y.
    Down = 0,
    /// +Y.
    Up = 1,
    /// −Z.
    North = 2,
    /// +Z.
    South = 3,
    /// −X.
    West = 4,
    /// +X.
    East = 5,
}

impl Direction {
    /// All six directions in ordinal order.
    pub const ALL: [Direction; 6] = [
        Direction::Down,
        Direction::Up,
        Direction::North,
        Direction::South,
        Direction::West,
        Direction::East,
    ];

    /// The unit vector for this direction as `(dx, dy, dz)`.
    pub const fn unit(self) -> (i32, i32, i32) {
        match self {
            Direction::Down => (0, -1, 0),
            Direction::Up => (0, 1, 0),
            Direction::North => (0, 0, -1),
            Direction::South => (0, 0, 1),
            Direction::West => (-1, 0, 0),
            Direction::East => (1, 0, 0),
        }
    }

    /// The direction pointing the opposite way.
    pub const fn opposite(self) -> Self {
        match self {
            Direction::Down => Direction::Up,
            Direction::Up => Direction::Down,
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
            Direction::East => Direction::West,
        }
    }

    /// Stable small-integer encoding for persistence.
    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    /// Decode a persisted ordinal. Returns `None` for bytes outside `0..=5`.
    pub const fn from_ordinal(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(Direction::Down),
            1 => Some(Direction::Up),
            2 => Some(Direction::North),
            3 => Some(Direction::South),
            4 => Some(Direction::West),
            5 => Some(Direction::East),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Down => "down",
            Direction::Up => "up",
            Direction::North => "north",
            Direction::South => "south",
            Direction::West => "west",
            Direction::East => "east",
        };
        write!(f, "{name}")
    }
}
