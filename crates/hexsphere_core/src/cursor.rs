//! Stepping cursor ("turtle") bound to a [`HexGrid`].
//!
//! A cursor is a position plus one of six facings. It only ever moves one
//! cell at a time and turns in sixths of a full turn, like a Logo turtle
//! restricted to a hex lattice.
//!
//! The cursor does not own its grid. It is generic over how it holds it:
//! `Cursor<&HexGrid>` is a cheap `Copy` probe used by navigation, while
//! `Cursor<&mut HexGrid>` can also stamp cells and is what construction uses.
//!
//! ```ignore
//! let mut grid = HexGrid::new(12);
//! let mut cursor = Cursor::new(&mut grid);
//! cursor.place(2, 4, Facing::North);
//! cursor.right(1);
//! cursor.forward();
//! cursor.set_value(CellType::Common)?;
//! assert_eq!((cursor.x(), cursor.y()), (3, 5));
//! ```

use serde::{Deserialize, Serialize};
use std::borrow::{Borrow, BorrowMut};
use std::fmt;

use crate::cell::CellType;
use crate::grid::{GridResult, HexGrid};

/// One of the six hex facings, in clockwise order starting at "up".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Facing {
    #[default]
    North,
    NorthEast,
    SouthEast,
    South,
    SouthWest,
    NorthWest,
}

impl Facing {
    /// All facings in clockwise order.
    pub const ALL: [Facing; 6] = [
        Facing::North,
        Facing::NorthEast,
        Facing::SouthEast,
        Facing::South,
        Facing::SouthWest,
        Facing::NorthWest,
    ];

    /// Doubled-coordinate step for each facing, indexed like [`Facing::ALL`].
    pub const VECTORS: [(i32, i32); 6] = [(0, 2), (1, 1), (1, -1), (0, -2), (-1, -1), (-1, 1)];

    /// Facing for any integer index, wrapping negatives into range.
    #[inline]
    pub fn from_index(index: i32) -> Self {
        Self::ALL[index.rem_euclid(6) as usize]
    }

    #[inline]
    pub fn index(self) -> i32 {
        self as i32
    }

    /// The `(dx, dy)` step taken when moving in this facing.
    #[inline]
    pub fn vector(self) -> (i32, i32) {
        Self::VECTORS[self as usize]
    }

    /// Rotate clockwise by `turns` sixths (negative turns go anticlockwise).
    #[inline]
    pub fn turned(self, turns: i32) -> Self {
        Self::from_index(self.index() + turns)
    }

    #[inline]
    pub fn opposite(self) -> Self {
        self.turned(3)
    }

    /// The facing that steps from `from` straight onto `to`, if they are neighbours.
    pub fn between(from: (i32, i32), to: (i32, i32)) -> Option<Self> {
        let delta = (to.0 - from.0, to.1 - from.1);
        Self::VECTORS
            .iter()
            .position(|v| *v == delta)
            .map(|i| Self::ALL[i])
    }
}

/// Position and facing of a cursor, detached from any grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CursorPose {
    pub x: i32,
    pub y: i32,
    pub facing: Facing,
}

impl CursorPose {
    pub fn new(x: i32, y: i32, facing: Facing) -> Self {
        Self { x, y, facing }
    }

    /// The position one step ahead.
    #[inline]
    pub fn ahead(&self) -> (i32, i32) {
        let (dx, dy) = self.facing.vector();
        (self.x + dx, self.y + dy)
    }
}

impl fmt::Display for CursorPose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "X: {} - Y: {} - F: {}",
            self.x,
            self.y,
            self.facing.index()
        )
    }
}

/// A stepping cursor bound to a grid.
#[derive(Debug, Clone, Copy)]
pub struct Cursor<G> {
    grid: G,
    pose: CursorPose,
}

impl<G: Borrow<HexGrid>> Cursor<G> {
    /// Bind a cursor to `grid` at the origin, facing north.
    pub fn new(grid: G) -> Self {
        Self::at(grid, CursorPose::default())
    }

    /// Bind a cursor to `grid` at `pose`.
    pub fn at(grid: G, pose: CursorPose) -> Self {
        Self { grid, pose }
    }

    pub fn grid(&self) -> &HexGrid {
        <G as Borrow<HexGrid>>::borrow(&self.grid)
    }

    #[inline]
    pub fn pose(&self) -> CursorPose {
        self.pose
    }

    #[inline]
    pub fn x(&self) -> i32 {
        self.pose.x
    }

    #[inline]
    pub fn y(&self) -> i32 {
        self.pose.y
    }

    #[inline]
    pub fn facing(&self) -> Facing {
        self.pose.facing
    }

    /// Absolute repositioning. No validation against the grid.
    pub fn place(&mut self, x: i32, y: i32, facing: Facing) {
        self.pose = CursorPose::new(x, y, facing);
    }

    /// Turn clockwise by `turns` sixths.
    pub fn right(&mut self, turns: i32) {
        self.pose.facing = self.pose.facing.turned(turns);
    }

    /// Turn anticlockwise by `turns` sixths.
    pub fn left(&mut self, turns: i32) {
        self.right(-turns);
    }

    /// Step one cell in the current facing. Bounds are not checked here.
    pub fn forward(&mut self) {
        let (x, y) = self.pose.ahead();
        self.pose.x = x;
        self.pose.y = y;
    }

    /// Read the cell under the cursor.
    pub fn get_value(&self) -> GridResult<CellType> {
        self.grid().get(self.pose.x, self.pose.y)
    }

    /// Whether the cell under the cursor is `value`. Off-grid is never a match.
    pub fn state(&self, value: CellType) -> bool {
        self.grid().is(self.pose.x, self.pose.y, value)
    }

    /// Whether the cell straight ahead is `value`, without moving.
    pub fn is_next(&self, value: CellType) -> bool {
        let (x, y) = self.pose.ahead();
        self.grid().is(x, y, value)
    }

    /// Whether any of the six neighbours is `value`.
    pub fn is_adjacent(&self, value: CellType) -> bool {
        Facing::VECTORS
            .iter()
            .any(|(dx, dy)| self.grid().is(self.pose.x + dx, self.pose.y + dy, value))
    }
}

impl<G: BorrowMut<HexGrid>> Cursor<G> {
    /// Stamp `value` on the cell under the cursor.
    ///
    /// Fails with [`GridError::OutOfBounds`](crate::grid::GridError::OutOfBounds)
    /// when the cursor has left the array.
    pub fn set_value(&mut self, value: CellType) -> GridResult<()> {
        let CursorPose { x, y, .. } = self.pose;
        <G as BorrowMut<HexGrid>>::borrow_mut(&mut self.grid).set(x, y, value)
    }
}
