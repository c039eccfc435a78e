//! Board layouts.
//!
//! A board is a fixed 15 x 10 grid. Row `r` sits at lateral `3.2 - 0.4 * r`
//! and column `c` at depth `2.4 - 0.4 * c` in token coordinates, so the
//! spawn cell of the first board, `(0, 0)`, is row 8, column 6.

use crate::token::{SHORT_STEP, near};

pub const ROWS: usize = 15;
pub const COLS: usize = 10;

/// Lateral coordinate of row 0.
pub const ROW0_LATERAL: f32 = 3.2;
/// Depth coordinate of column 0.
pub const COL0_DEPTH: f32 = 2.4;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum Cell {
    #[default]
    Empty,
    /// Solid tile.
    TileA,
    /// Fragile tile. Standing upright on it is fatal only inside the
    /// fragile bands of the third board.
    TileB,
}

impl Cell {
    fn from_glyph(g: u8) -> Cell {
        match g {
            b'#' => Cell::TileA,
            b'~' => Cell::TileB,
            _ => Cell::Empty,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum LayoutId {
    One,
    Two,
    Three,
}

type Rows = [&'static [u8; COLS]; ROWS];

const LAYOUT_ONE: Rows = [
    b"..........",
    b"...######.",
    b"...####.#.",
    b"...######.",
    b"...######.",
    b"...####...",
    b"...####...",
    b"...####...",
    b"...####...",
    b"...###....",
    b"..........",
    b"..........",
    b"..........",
    b"..........",
    b"..........",
];

const LAYOUT_TWO: Rows = [
    b"..######..",
    b"..#.####..",
    b"..######..",
    b"..........",
    b"..........",
    b"...#####..",
    b"...#####..",
    b"...#####..",
    b"...#####..",
    b"..........",
    b"..........",
    b"...#####..",
    b"...#####..",
    b"...#####..",
    b"...#####..",
];

const LAYOUT_THREE: Rows = [
    b"..........",
    b"......~~~~",
    b"......~~.~",
    b"...###~~~~",
    b"...###~~~~",
    b".~~#..~~..",
    b".~~...##..",
    b".~~.......",
    b".~~.......",
    b".~~.......",
    b".~~.......",
    b".~~#......",
    b"...#####..",
    b"...#####..",
    b"...#####..",
];

/// Bridge cells laid over the second board once its first waypoint is hit.
pub const BRIDGE_A: [(usize, usize); 2] = [(10, 6), (9, 6)];
/// Bridge cells laid over the second board once its second waypoint is hit.
pub const BRIDGE_B: [(usize, usize); 2] = [(4, 6), (3, 6)];

impl LayoutId {
    fn rows(self) -> &'static Rows {
        match self {
            LayoutId::One => &LAYOUT_ONE,
            LayoutId::Two => &LAYOUT_TWO,
            LayoutId::Three => &LAYOUT_THREE,
        }
    }
}

/// The active board.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    cells: [[Cell; COLS]; ROWS],
}

impl Grid {
    /// Fresh copy of a layout with no overlays.
    pub fn load(id: LayoutId) -> Self {
        let mut cells = [[Cell::Empty; COLS]; ROWS];
        for (row, glyphs) in id.rows().iter().enumerate() {
            for (col, g) in glyphs.iter().enumerate() {
                cells[row][col] = Cell::from_glyph(*g);
            }
        }
        Self { cells }
    }

    pub fn cell(&self, row: usize, col: usize) -> Cell {
        self.cells
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or(Cell::Empty)
    }

    /// Turns the given cells into solid tiles.
    pub fn overlay(&mut self, cells: &[(usize, usize)]) {
        for &(row, col) in cells {
            if let Some(c) = self.cells.get_mut(row).and_then(|r| r.get_mut(col)) {
                *c = Cell::TileA;
            }
        }
    }

    /// Row-major iteration over every cell.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .flat_map(|(r, row)| row.iter().enumerate().map(move |(c, cell)| (r, c, *cell)))
    }
}

/// Lateral coordinate of a row.
pub fn row_lateral(row: usize) -> f32 {
    ROW0_LATERAL - SHORT_STEP * row as f32
}

/// Depth coordinate of a column.
pub fn col_depth(col: usize) -> f32 {
    COL0_DEPTH - SHORT_STEP * col as f32
}

/// Cell under a token coordinate, if it lies on the grid.
pub fn cell_at(lateral: f32, depth: f32) -> Option<(usize, usize)> {
    let row = ((ROW0_LATERAL - lateral) / SHORT_STEP).round();
    let col = ((COL0_DEPTH - depth) / SHORT_STEP).round();
    if row < 0.0 || col < 0.0 || row >= ROWS as f32 || col >= COLS as f32 {
        return None;
    }
    let (row, col) = (row as usize, col as usize);
    (near(row_lateral(row), lateral) && near(col_depth(col), depth)).then_some((row, col))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_cells_are_solid() {
        assert_eq!(cell_at(0.0, 0.0), Some((8, 6)));
        assert_eq!(Grid::load(LayoutId::One).cell(8, 6), Cell::TileA);

        assert_eq!(cell_at(-2.0, 0.0), Some((13, 6)));
        assert_eq!(Grid::load(LayoutId::Two).cell(13, 6), Cell::TileA);
        assert_eq!(Grid::load(LayoutId::Three).cell(13, 6), Cell::TileA);
    }

    #[test]
    fn goals_are_holes() {
        let (r, c) = cell_at(2.4, -0.4).unwrap();
        assert_eq!(Grid::load(LayoutId::One).cell(r, c), Cell::Empty);

        let (r, c) = cell_at(2.8, 1.2).unwrap();
        assert_eq!(Grid::load(LayoutId::Two).cell(r, c), Cell::Empty);

        let (r, c) = cell_at(2.4, -0.8).unwrap();
        assert_eq!(Grid::load(LayoutId::Three).cell(r, c), Cell::Empty);
    }

    #[test]
    fn overlay_fills_bridge_gaps() {
        let mut grid = Grid::load(LayoutId::Two);
        assert!(BRIDGE_A.iter().all(|&(r, c)| grid.cell(r, c) == Cell::Empty));
        grid.overlay(&BRIDGE_A);
        assert!(BRIDGE_A.iter().all(|&(r, c)| grid.cell(r, c) == Cell::TileA));

        // A reload drops every overlay.
        assert_eq!(Grid::load(LayoutId::Two).cell(10, 6), Cell::Empty);
    }

    #[test]
    fn third_board_has_fragile_tiles() {
        let grid = Grid::load(LayoutId::Three);
        assert_eq!(grid.cell(4, 6), Cell::TileB);
        assert_eq!(grid.cell(6, 6), Cell::TileA);
        assert_eq!(grid.iter().filter(|(_, _, c)| *c == Cell::TileB).count(), 31);
    }

    #[test]
    fn off_grid_coordinates_have_no_cell() {
        assert_eq!(cell_at(3.6, 0.0), None);
        assert_eq!(cell_at(0.0, 2.8), None);
        assert_eq!(cell_at(0.1, 0.0), None);
        assert_eq!(Grid::load(LayoutId::One).cell(40, 40), Cell::Empty);
    }
}
