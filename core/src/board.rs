use alloc::vec::Vec;
use hashbrown::HashMap;
use ndarray::Array2;

use crate::*;

/// Coordinate type of a board's topology.
pub type BoardCoord<B> = <<B as Board>::Topology as Topology>::Coord;

/// Fixed-shape map from coordinate to [`Cell`].
pub trait Board {
    type Topology: Topology;

    fn topology(&self) -> &Self::Topology;

    /// `None` outside the board.
    fn cell_at(&self, coord: BoardCoord<Self>) -> Option<Cell>;

    fn goal(&self) -> BoardCoord<Self>;

    fn in_bounds(&self, coord: BoardCoord<Self>) -> bool {
        self.topology().in_bounds(coord)
    }

    fn is_blocked(&self, coord: BoardCoord<Self>) -> bool {
        self.cell_at(coord).is_some_and(Cell::is_blocked)
    }

    fn is_goal(&self, coord: BoardCoord<Self>) -> bool {
        self.cell_at(coord).is_some_and(Cell::is_goal)
    }

    fn iter_cells(&self) -> Vec<(BoardCoord<Self>, Cell)> {
        self.topology()
            .cells()
            .into_iter()
            .filter_map(|coord| self.cell_at(coord).map(|cell| (coord, cell)))
            .collect()
    }

    fn blocked_count(&self) -> usize {
        self.iter_cells()
            .into_iter()
            .filter(|(_, cell)| cell.is_blocked())
            .count()
    }
}

/// Hex disk board used by escape.
#[derive(Clone, Debug, PartialEq)]
pub struct HexBoard {
    disk: HexDisk,
    cells: HashMap<Hex, Cell>,
    goal: Hex,
}

impl HexBoard {
    pub fn new(disk: HexDisk, goal: Hex, blocked: impl IntoIterator<Item = Hex>) -> Result<Self> {
        if !disk.in_bounds(goal) {
            return Err(GameError::OutOfBounds);
        }

        let mut cells: HashMap<Hex, Cell> = disk.cells().into_iter().map(|hex| (hex, Cell::Open)).collect();
        cells.insert(goal, Cell::Goal);

        for hex in blocked {
            match cells.get_mut(&hex) {
                None => return Err(GameError::OutOfBounds),
                Some(Cell::Goal) => return Err(GameError::Occupied),
                Some(cell) => *cell = Cell::Blocked,
            }
        }

        Ok(Self { disk, cells, goal })
    }

    pub fn radius(&self) -> i32 {
        self.disk.radius
    }
}

impl Board for HexBoard {
    type Topology = HexDisk;

    fn topology(&self) -> &HexDisk {
        &self.disk
    }

    fn cell_at(&self, coord: Hex) -> Option<Cell> {
        self.cells.get(&coord).copied()
    }

    fn goal(&self) -> Hex {
        self.goal
    }
}

/// Square board used by hunt.
#[derive(Clone, Debug, PartialEq)]
pub struct GridBoard {
    grid: SquareGrid,
    cells: Array2<Cell>,
    exit: GridPos,
}

impl GridBoard {
    pub fn new(grid: SquareGrid, exit: GridPos, blocked: impl IntoIterator<Item = GridPos>) -> Result<Self> {
        if !grid.in_bounds(exit) {
            return Err(GameError::OutOfBounds);
        }

        let mut cells = Array2::from_elem(grid.nd_dim(), Cell::Open);
        cells[exit.to_nd_index()] = Cell::Goal;

        for pos in blocked {
            if !grid.in_bounds(pos) {
                return Err(GameError::OutOfBounds);
            }
            if pos == exit {
                return Err(GameError::Occupied);
            }
            cells[pos.to_nd_index()] = Cell::Blocked;
        }

        Ok(Self { grid, cells, exit })
    }

    pub fn size(&self) -> i32 {
        self.grid.size
    }

    pub fn adjacency(&self) -> Adjacency {
        self.grid.adjacency
    }

    /// Cells indexed by `(row, col)`.
    pub fn cells(&self) -> &Array2<Cell> {
        &self.cells
    }
}

impl Board for GridBoard {
    type Topology = SquareGrid;

    fn topology(&self) -> &SquareGrid {
        &self.grid
    }

    fn cell_at(&self, coord: GridPos) -> Option<Cell> {
        self.grid
            .in_bounds(coord)
            .then(|| self.cells[coord.to_nd_index()])
    }

    fn goal(&self) -> GridPos {
        self.exit
    }

    fn blocked_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_blocked()).count()
    }
}
