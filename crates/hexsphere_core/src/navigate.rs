//! Seam-aware movement over a constructed [`HexSphere`].
//!
//! The flat net splits some sphere locations into several array cells
//! ("twins"). A step whose array destination is not a real cell has crossed
//! such a seam, and the true destination is found next to a twin instead.
//!
//! ## Twins
//!
//! | Cell   | Twins                                       | Frame turn                 |
//! |--------|---------------------------------------------|----------------------------|
//! | `Wrap` | next `Wrap` east in the row (cyclic)        | none                       |
//! | `Edge` | next `Edge` across the neighbouring section | one sixth, by hemisphere   |
//! | `Pole` | every other `Pole` in the row               | section offset, signed     |
//!
//! `Pentagon` cells have no twin; their missing sixth side resolves through the
//! rotation fallback like any other absent direction.
//!
//! ## Resolution
//!
//! A `Wrap` cell resolves with four attempts: straight from itself, straight
//! from its twin, then the same two after one turn left. Only `Common`
//! destinations are accepted.
//!
//! Every other resting cell tries the facings straight, left, right and two
//! left. For each facing the plain array neighbour wins if it is real;
//! otherwise the step is replayed from the twins of the cells bordering the
//! seam. Running out of attempts is [`NavError::SeamUnresolved`], which can
//! only mean the grid was built wrong.
//!
//! ```ignore
//! let sphere = HexSphere::build(&GeodesicConfig::default())?;
//! let navigator = Navigator::new(&sphere);
//! let next = navigator.advance(&sphere.origin_cursor())?;
//! assert!(next.get_value()?.is_real());
//! ```

use bevy::log::{debug, error};
use std::borrow::Borrow;
use std::fmt;

use crate::cell::CellType;
use crate::cursor::{Cursor, CursorPose, Facing};
use crate::grid::{GridError, HexGrid};
use crate::sphere::HexSphere;

/// Facing offsets tried in order when the requested direction does not resolve.
pub const FALLBACK_TURNS: [i32; 4] = [0, -1, 1, -2];

/// Errors raised by navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavError {
    /// The cursor is on a cell that is not a location on the sphere.
    NotResting { pose: CursorPose, cell: CellType },
    /// The cursor is outside the array.
    Grid(GridError),
    /// No attempt produced a real destination. The grid is inconsistent.
    SeamUnresolved { pose: CursorPose },
}

impl fmt::Display for NavError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavError::NotResting { pose, cell } => {
                write!(f, "cannot move from a {} cell at [{}]", cell, pose)
            }
            NavError::Grid(e) => write!(f, "Grid error: {}", e),
            NavError::SeamUnresolved { pose } => {
                write!(f, "no real destination from [{}]", pose)
            }
        }
    }
}

impl std::error::Error for NavError {}

impl From<GridError> for NavError {
    fn from(e: GridError) -> Self {
        NavError::Grid(e)
    }
}

/// Result type for navigation.
pub type NavResult<T> = Result<T, NavError>;

/// Another array cell that is the same sphere location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Twin {
    pub x: i32,
    pub y: i32,
    /// Sixths to turn a facing by when carrying it over to the twin.
    pub turn: i32,
}

/// Moves cursors across a sphere one logical step at a time.
#[derive(Debug, Clone, Copy)]
pub struct Navigator<'a> {
    sphere: &'a HexSphere,
}

impl<'a> Navigator<'a> {
    pub fn new(sphere: &'a HexSphere) -> Self {
        Self { sphere }
    }

    pub fn sphere(&self) -> &'a HexSphere {
        self.sphere
    }

    #[inline]
    fn grid(&self) -> &'a HexGrid {
        self.sphere.grid()
    }

    #[inline]
    fn is_real(&self, (x, y): (i32, i32)) -> bool {
        self.grid().get(x, y).map_or(false, CellType::is_real)
    }

    // === Moving ===

    /// Move `cursor` one step, returning a cursor on this sphere.
    pub fn advance<G: Borrow<HexGrid>>(&self, cursor: &Cursor<G>) -> NavResult<Cursor<&'a HexGrid>> {
        let next = self.advance_pose(cursor.pose())?;
        Ok(self.sphere.cursor_at(next))
    }

    /// Resolve one step from `pose`.
    pub fn advance_pose(&self, pose: CursorPose) -> NavResult<CursorPose> {
        let cell = self.resting_cell(pose)?;
        let resolved = if cell == CellType::Wrap {
            self.resolve_wrap(pose)
        } else {
            FALLBACK_TURNS.iter().find_map(|&turn| {
                let next = self.step(CursorPose {
                    facing: pose.facing.turned(turn),
                    ..pose
                })?;
                if turn != 0 {
                    debug!("[{}] turned {} to reach [{}]", pose, turn, next);
                }
                Some(next)
            })
        };
        resolved.ok_or_else(|| {
            error!("navigation failed on {} cell at [{}]", cell, pose);
            NavError::SeamUnresolved { pose }
        })
    }

    /// The destination straight ahead of `pose`, if that direction exists.
    ///
    /// `None` means the facing points at the missing sixth side of a pole or
    /// pentagon.
    pub fn neighbour(&self, pose: CursorPose) -> NavResult<Option<CursorPose>> {
        self.resting_cell(pose)?;
        Ok(self.step(pose))
    }

    fn resting_cell(&self, pose: CursorPose) -> NavResult<CellType> {
        let cell = self.grid().get(pose.x, pose.y)?;
        if cell.is_real() {
            Ok(cell)
        } else {
            Err(NavError::NotResting { pose, cell })
        }
    }

    /// One step in exactly `pose.facing`, crossing a seam if needed.
    fn step(&self, pose: CursorPose) -> Option<CursorPose> {
        let dest = pose.ahead();
        if self.is_real(dest) {
            return Some(CursorPose::new(dest.0, dest.1, pose.facing));
        }

        let here = (pose.x, pose.y);
        let flanks = [1, -1].map(|turn| {
            let (dx, dy) = pose.facing.turned(turn).vector();
            (pose.x + dx, pose.y + dy)
        });
        let anchors = std::iter::once(here).chain(flanks).filter(|&(x, y)| {
            self.grid()
                .get(x, y)
                .map_or(false, CellType::has_twins)
        });

        for anchor in anchors {
            let Some(toward) = Facing::between(anchor, dest) else {
                continue;
            };
            for twin in self.twins(anchor.0, anchor.1) {
                let (dx, dy) = toward.turned(twin.turn).vector();
                let landing = (twin.x + dx, twin.y + dy);
                if self.is_real(landing) {
                    let next = CursorPose::new(landing.0, landing.1, pose.facing.turned(twin.turn));
                    debug!(
                        "[{}] crossed seam via ({}, {}) to [{}]",
                        pose, twin.x, twin.y, next
                    );
                    return Some(next);
                }
            }
        }
        None
    }

    fn resolve_wrap(&self, pose: CursorPose) -> Option<CursorPose> {
        let twin_x = self.scan_row(pose.x, pose.y, CellType::Wrap, 2);
        for facing in [pose.facing, pose.facing.turned(-1)] {
            let (dx, dy) = facing.vector();
            for base_x in std::iter::once(pose.x).chain(twin_x) {
                let (x, y) = (base_x + dx, pose.y + dy);
                if self.grid().is(x, y, CellType::Common) {
                    let next = CursorPose::new(x, y, facing);
                    if base_x != pose.x || facing != pose.facing {
                        debug!("[{}] resolved wrap seam to [{}]", pose, next);
                    }
                    return Some(next);
                }
            }
        }
        None
    }

    // === Twins ===

    /// Every other array cell that is the same sphere location as `(x, y)`.
    pub fn twins(&self, x: i32, y: i32) -> Vec<Twin> {
        match self.grid().get(x, y) {
            Ok(CellType::Wrap) => self
                .scan_row(x, y, CellType::Wrap, 2)
                .map(|tx| Twin { x: tx, y, turn: 0 })
                .into_iter()
                .collect(),
            Ok(CellType::Edge) => {
                let east = self.edge_faces_east(x, y);
                let dir = if east { 1 } else { -1 };
                let turn = dir * self.sphere.hemisphere(y).sign();
                self.scan_row(x, y, CellType::Edge, 2 * dir)
                    .map(|tx| Twin { x: tx, y, turn })
                    .into_iter()
                    .collect()
            }
            Ok(CellType::Pole) => self.pole_twins(x, y),
            _ => Vec::new(),
        }
    }

    /// Next `x` in row `y` holding `value`, moving by `stride` and wrapping
    /// around the row. Never returns `x` itself.
    fn scan_row(&self, x: i32, y: i32, value: CellType, stride: i32) -> Option<i32> {
        let side = self.grid().side() as i32;
        let mut cx = x;
        for _ in 0..side {
            cx = (cx + stride).rem_euclid(side);
            if cx == x {
                return None;
            }
            if self.grid().is(cx, y, value) {
                return Some(cx);
            }
        }
        None
    }

    /// Whether the section this edge cell borders lies to its east.
    fn edge_faces_east(&self, x: i32, y: i32) -> bool {
        let grid = self.grid();
        grid.is(x + 1, y + 1, CellType::Virtual) || grid.is(x + 1, y - 1, CellType::Virtual)
    }

    fn pole_twins(&self, x: i32, y: i32) -> Vec<Twin> {
        let grid = self.grid();
        let side = grid.side() as i32;
        let poles: Vec<i32> = (y.rem_euclid(2)..side)
            .step_by(2)
            .filter(|&px| grid.is(px, y, CellType::Pole))
            .collect();
        let Some(k) = poles.iter().position(|&px| px == x) else {
            return Vec::new();
        };

        let n = poles.len() as i32;
        let sign = self.sphere.hemisphere(y).sign();
        poles
            .iter()
            .enumerate()
            .filter(|&(j, _)| j != k)
            .map(|(j, &px)| {
                let mut offset = (j as i32 - k as i32).rem_euclid(n);
                if offset > n / 2 {
                    offset -= n;
                }
                Twin {
                    x: px,
                    y,
                    turn: offset * sign,
                }
            })
            .collect()
    }
}
