//! Board module - manages the tile grid
//!
//! The board is a W x H grid where each cell is empty or holds a colored tile.
//! Cells live in a flat row-major vector that is allocated once per grid size
//! and overwritten in place afterwards.
//! Coordinates: (x, y) where x grows left to right and y grows bottom to top.

use arrayvec::ArrayVec;

use crate::types::{Cell, GridPos, TileColor};

/// The 8-neighbourhood of `pos` clipped to a `width` x `height` grid
pub fn neighbors(pos: GridPos, width: usize, height: usize) -> ArrayVec<GridPos, 8> {
    let mut out = ArrayVec::new();
    for dy in -1..=1 {
        for dx in -1..=1 {
            if dx == 0 && dy == 0 {
                continue;
            }
            let n = pos.offset(dx, dy);
            if in_bounds(n, width, height) {
                out.push(n);
            }
        }
    }
    out
}

#[inline(always)]
fn in_bounds(pos: GridPos, width: usize, height: usize) -> bool {
    pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < width && (pos.y as usize) < height
}

/// The tile grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::Empty; width * height],
        }
    }

    /// Calculate flat index from a coordinate
    #[inline(always)]
    fn index(&self, pos: GridPos) -> Option<usize> {
        if !in_bounds(pos, self.width, self.height) {
            return None;
        }
        Some(pos.y as usize * self.width + pos.x as usize)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Check if a coordinate lies on the board
    pub fn contains(&self, pos: GridPos) -> bool {
        in_bounds(pos, self.width, self.height)
    }

    /// Get cell at `pos`
    /// Returns None if out of bounds
    pub fn get(&self, pos: GridPos) -> Option<Cell> {
        self.index(pos).map(|idx| self.cells[idx])
    }

    /// Set cell at `pos`
    /// Returns false if out of bounds
    pub fn set(&mut self, pos: GridPos, cell: Cell) -> bool {
        match self.index(pos) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Color of the tile at `pos`, None if empty or out of bounds
    pub fn color_at(&self, pos: GridPos) -> Option<TileColor> {
        self.get(pos).and_then(|cell| cell.color())
    }

    /// Exchange two cells
    /// Returns false (and leaves the board untouched) if either is out of bounds
    pub fn swap(&mut self, a: GridPos, b: GridPos) -> bool {
        match (self.index(a), self.index(b)) {
            (Some(ia), Some(ib)) => {
                self.cells.swap(ia, ib);
                true
            }
            _ => false,
        }
    }

    /// Raise the matched flag on an occupied cell
    pub fn mark_matched(&mut self, pos: GridPos) {
        if let Some(idx) = self.index(pos) {
            if let Cell::Occupied { matched, .. } = &mut self.cells[idx] {
                *matched = true;
            }
        }
    }

    /// Empty every matched cell and return their coordinates in row-major order
    pub fn take_matched(&mut self) -> Vec<GridPos> {
        let width = self.width;
        let mut removed = Vec::new();
        for (idx, cell) in self.cells.iter_mut().enumerate() {
            if cell.is_matched() {
                *cell = Cell::Empty;
                removed.push(GridPos::new((idx % width) as i32, (idx / width) as i32));
            }
        }
        removed
    }

    /// Number of empty cells
    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_empty()).count()
    }

    /// All coordinates, row-major from the bottom-left corner
    pub fn positions(&self) -> impl Iterator<Item = GridPos> + '_ {
        (0..self.height).flat_map(move |y| {
            (0..self.width).map(move |x| GridPos::new(x as i32, y as i32))
        })
    }

    /// Colors by row (`rows[y][x]`)
    pub fn color_rows(&self) -> Vec<Vec<Option<TileColor>>> {
        self.cells
            .chunks(self.width.max(1))
            .map(|row| row.iter().map(|cell| cell.color()).collect())
            .collect()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Empty every cell
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = Cell::Empty;
        }
    }

    /// Change dimensions; the board comes back empty
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.cells.clear();
        self.cells.resize(width * height, Cell::Empty);
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(
            crate::types::DEFAULT_GRID_WIDTH,
            crate::types::DEFAULT_GRID_HEIGHT,
        )
    }
}
