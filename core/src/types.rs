use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::Hash;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Neighbor list sized for the largest adjacency (8-way grid).
pub type Neighbors<C> = SmallVec<[C; 8]>;

/// Adjacency and distance for one coordinate space.
///
/// `neighbors` is fixed-size and unfiltered: callers combine it with
/// `in_bounds`. The enumeration order is stable and doubles as the AI tie-break
/// order.
pub trait Topology {
    type Coord: Copy + Eq + Ord + Hash + Debug;

    fn neighbors(&self, coord: Self::Coord) -> Neighbors<Self::Coord>;

    fn in_bounds(&self, coord: Self::Coord) -> bool;

    fn distance(&self, a: Self::Coord, b: Self::Coord) -> u32;

    /// Whether `coord` lies on the outer boundary of the shape.
    fn is_edge(&self, coord: Self::Coord) -> bool;

    /// All in-bounds coordinates, in a stable order.
    fn cells(&self) -> Vec<Self::Coord>;

    fn is_adjacent(&self, a: Self::Coord, b: Self::Coord) -> bool {
        self.neighbors(a).contains(&b)
    }
}

/// Axial hex coordinates, the third axis is `s = -q - r`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Hex {
    pub q: i32,
    pub r: i32,
}

const HEX_DISPLACEMENTS: [(i32, i32); 6] = [(1, 0), (-1, 0), (0, 1), (0, -1), (1, -1), (-1, 1)];

impl Hex {
    pub const ORIGIN: Hex = Hex::new(0, 0);

    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    pub const fn s(self) -> i32 {
        -self.q - self.r
    }

    pub const fn offset(self, (dq, dr): (i32, i32)) -> Self {
        Self::new(self.q + dq, self.r + dr)
    }

    /// Unnormalized distance `|Δq| + |Δr| + |Δq+Δr|`, always twice the step count.
    pub const fn distance_sum(self, other: Hex) -> u32 {
        let dq = self.q - other.q;
        let dr = self.r - other.r;
        dq.unsigned_abs() + dr.unsigned_abs() + (dq + dr).unsigned_abs()
    }

    pub const fn distance_to(self, other: Hex) -> u32 {
        self.distance_sum(other) / 2
    }

    /// Distance from the origin along the widest axis.
    pub const fn ring(self) -> u32 {
        self.distance_to(Self::ORIGIN)
    }
}

/// Hex disk of the given radius centered on the origin.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HexDisk {
    pub radius: i32,
}

impl HexDisk {
    pub const fn new(radius: i32) -> Self {
        Self { radius }
    }

    /// Number of cells in a disk: `3R(R+1) + 1`.
    pub const fn cell_count(&self) -> usize {
        let r = self.radius as usize;
        3 * r * (r + 1) + 1
    }
}

impl Topology for HexDisk {
    type Coord = Hex;

    fn neighbors(&self, coord: Hex) -> Neighbors<Hex> {
        HEX_DISPLACEMENTS.iter().map(|&delta| coord.offset(delta)).collect()
    }

    fn in_bounds(&self, coord: Hex) -> bool {
        // widened so that coordinates near the i32 limits cannot overflow
        let (q, r, radius) = (i64::from(coord.q), i64::from(coord.r), i64::from(self.radius));
        q.abs() <= radius && r.abs() <= radius && (q + r).abs() <= radius
    }

    fn distance(&self, a: Hex, b: Hex) -> u32 {
        a.distance_to(b)
    }

    fn is_edge(&self, coord: Hex) -> bool {
        self.in_bounds(coord) && coord.ring() == self.radius as u32
    }

    fn cells(&self) -> Vec<Hex> {
        let radius = self.radius;
        let mut cells = Vec::with_capacity(self.cell_count());
        for q in -radius..=radius {
            let r_start = (-radius).max(-q - radius);
            let r_end = radius.min(-q + radius);
            for r in r_start..=r_end {
                cells.push(Hex::new(q, r));
            }
        }
        cells
    }
}

/// Orthogonal grid coordinates.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GridPos {
    pub row: i32,
    pub col: i32,
}

impl GridPos {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    pub const fn offset(self, (drow, dcol): (i32, i32)) -> Self {
        Self::new(self.row + drow, self.col + dcol)
    }

    pub const fn step(self, direction: Direction) -> Self {
        self.offset(direction.delta())
    }

    pub const fn manhattan(self, other: GridPos) -> u32 {
        (self.row - other.row).unsigned_abs() + (self.col - other.col).unsigned_abs()
    }

    pub const fn chebyshev(self, other: GridPos) -> u32 {
        let drow = (self.row - other.row).unsigned_abs();
        let dcol = (self.col - other.col).unsigned_abs();
        if drow > dcol { drow } else { dcol }
    }
}

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for GridPos {
    type Output = [usize; 2];

    /// Only meaningful for in-bounds coordinates.
    fn to_nd_index(self) -> Self::Output {
        [self.row as usize, self.col as usize]
    }
}

/// Compass directions for `move_player`, north is decreasing row.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    pub const fn delta(self) -> (i32, i32) {
        use Direction::*;
        match self {
            North => (-1, 0),
            NorthEast => (-1, 1),
            East => (0, 1),
            SouthEast => (1, 1),
            South => (1, 0),
            SouthWest => (1, -1),
            West => (0, -1),
            NorthWest => (-1, -1),
        }
    }

    pub const fn is_diagonal(self) -> bool {
        let (drow, dcol) = self.delta();
        drow != 0 && dcol != 0
    }
}

const FOUR_WAY: [(i32, i32); 4] = [(-1, 0), (0, -1), (0, 1), (1, 0)];

const EIGHT_WAY: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Grid adjacency, which also fixes the distance metric.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Adjacency {
    /// Orthogonal steps, Manhattan distance.
    Four,
    /// Orthogonal and diagonal steps, Chebyshev distance.
    Eight,
}

impl Adjacency {
    pub const fn displacements(self) -> &'static [(i32, i32)] {
        match self {
            Self::Four => &FOUR_WAY,
            Self::Eight => &EIGHT_WAY,
        }
    }

    pub const fn distance(self, a: GridPos, b: GridPos) -> u32 {
        match self {
            Self::Four => a.manhattan(b),
            Self::Eight => a.chebyshev(b),
        }
    }
}

impl Default for Adjacency {
    fn default() -> Self {
        Self::Eight
    }
}

/// Square grid of side `size` with rows and columns in `0..size`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SquareGrid {
    pub size: i32,
    pub adjacency: Adjacency,
}

impl SquareGrid {
    pub const fn new(size: i32, adjacency: Adjacency) -> Self {
        Self { size, adjacency }
    }

    pub const fn corners(&self) -> [GridPos; 4] {
        let last = self.size - 1;
        [
            GridPos::new(0, 0),
            GridPos::new(0, last),
            GridPos::new(last, 0),
            GridPos::new(last, last),
        ]
    }

    pub const fn center(&self) -> GridPos {
        GridPos::new(self.size / 2, self.size / 2)
    }

    pub const fn nd_dim(&self) -> (usize, usize) {
        (self.size as usize, self.size as usize)
    }
}

impl Topology for SquareGrid {
    type Coord = GridPos;

    fn neighbors(&self, coord: GridPos) -> Neighbors<GridPos> {
        self.adjacency
            .displacements()
            .iter()
            .map(|&delta| coord.offset(delta))
            .collect()
    }

    fn in_bounds(&self, coord: GridPos) -> bool {
        (0..self.size).contains(&coord.row) && (0..self.size).contains(&coord.col)
    }

    fn distance(&self, a: GridPos, b: GridPos) -> u32 {
        self.adjacency.distance(a, b)
    }

    fn is_edge(&self, coord: GridPos) -> bool {
        let last = self.size - 1;
        self.in_bounds(coord)
            && (coord.row == 0 || coord.col == 0 || coord.row == last || coord.col == last)
    }

    fn cells(&self) -> Vec<GridPos> {
        (0..self.size)
            .flat_map(|row| (0..self.size).map(move |col| GridPos::new(row, col)))
            .collect()
    }
}
