//! Bounds-checked square grid of cell types in doubled coordinates.
//!
//! ## Coordinate System
//!
//! Cells are addressed by `(x, y)` where a valid hex satisfies `x + y` even.
//! The six neighbours of `(x, y)` are reached with the vectors
//! `(0,2) (1,1) (1,-1) (0,-2) (-1,-1) (-1,1)`, so every step preserves parity
//! and the complementary parity is unused filler.
//!
//! ## Flat Indexing
//!
//! `idx = x + y * side`, like the other flat-state grids in this crate.
//!
//! Coordinates are signed because cursors routinely probe one step past the
//! array edge; every access outside `0..side` is reported as
//! [`GridError::OutOfBounds`] instead of being clamped or wrapped.

use std::fmt;

use crate::cell::CellType;

/// Errors raised by grid access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// The position lies outside the array.
    OutOfBounds { x: i32, y: i32, side: usize },
    /// A raw write used a code that is not a cell type.
    InvalidCode { x: i32, y: i32, code: u8 },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::OutOfBounds { x, y, side } => {
                write!(f, "position ({}, {}) is outside the {}x{} grid", x, y, side, side)
            }
            GridError::InvalidCode { x, y, code } => {
                write!(f, "code {} written at ({}, {}) is not a cell type", code, x, y)
            }
        }
    }
}

impl std::error::Error for GridError {}

/// Result type for grid access.
pub type GridResult<T> = Result<T, GridError>;

/// Fixed-size square array of cell types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HexGrid {
    side: usize,
    cells: Vec<CellType>,
}

impl HexGrid {
    /// Create an all-`Empty` grid with `side * side` positions.
    pub fn new(side: usize) -> Self {
        Self {
            side,
            cells: vec![CellType::Empty; side * side],
        }
    }

    /// Length of one side of the array.
    #[inline]
    pub fn side(&self) -> usize {
        self.side
    }

    /// Whether `(x, y)` lies inside the array.
    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.side && (y as usize) < self.side
    }

    /// Whether `(x, y)` has the parity of a hex cell.
    #[inline]
    pub fn is_hex_parity(x: i32, y: i32) -> bool {
        (x + y).rem_euclid(2) == 0
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> GridResult<usize> {
        if self.contains(x, y) {
            Ok(x as usize + y as usize * self.side)
        } else {
            Err(GridError::OutOfBounds {
                x,
                y,
                side: self.side,
            })
        }
    }

    /// Read the cell at `(x, y)`.
    pub fn get(&self, x: i32, y: i32) -> GridResult<CellType> {
        let idx = self.index(x, y)?;
        Ok(self.cells[idx])
    }

    /// Write the cell at `(x, y)`.
    pub fn set(&mut self, x: i32, y: i32, value: CellType) -> GridResult<()> {
        let idx = self.index(x, y)?;
        self.cells[idx] = value;
        Ok(())
    }

    /// Write a raw code, rejecting anything that is not a cell type.
    ///
    /// Bounds are checked first so an out-of-range write is always reported
    /// as such, whatever the code.
    pub fn set_code(&mut self, x: i32, y: i32, code: u8) -> GridResult<()> {
        let idx = self.index(x, y)?;
        let value = CellType::from_code(code).ok_or(GridError::InvalidCode { x, y, code })?;
        self.cells[idx] = value;
        Ok(())
    }

    /// Whether `(x, y)` is inside the array and holds `value`.
    #[inline]
    pub fn is(&self, x: i32, y: i32, value: CellType) -> bool {
        self.get(x, y) == Ok(value)
    }

    /// Raw codes in flat index order.
    pub fn codes(&self) -> Vec<u8> {
        self.cells.iter().map(|c| c.code()).collect()
    }

    /// Iterate over every position as `(x, y, cell)`.
    pub fn iter(&self) -> impl Iterator<Item = (i32, i32, CellType)> + '_ {
        let side = self.side;
        self.cells
            .iter()
            .enumerate()
            .map(move |(idx, cell)| ((idx % side) as i32, (idx / side) as i32, *cell))
    }

    /// Number of positions holding `value`.
    pub fn count(&self, value: CellType) -> usize {
        self.cells.iter().filter(|c| **c == value).count()
    }
}

/// Text dump, top row first. Odd-parity filler prints as a space.
impl fmt::Display for HexGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in (0..self.side).rev() {
            let line: String = (0..self.side)
                .map(|x| {
                    if (x + y) % 2 == 0 {
                        self.cells[x + y * self.side].glyph()
                    } else {
                        ' '
                    }
                })
                .collect();
            writeln!(f, "{}", line.trim_end())?;
        }
        Ok(())
    }
}
