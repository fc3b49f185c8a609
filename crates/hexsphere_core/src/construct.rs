//! Stamping the icosahedron net onto a flat grid.
//!
//! Construction runs in three passes:
//!
//! 1. **Perimeter** - a cursor traces both hemispheres. Each hemisphere is five
//!    triangular sections (edge up to the pole, pole, edge back down, vertex)
//!    followed by the equatorial seam, marked `Wrap`.
//! 2. **Fill** - an even-odd scanline per column turns everything between
//!    perimeter crossings into `Common`.
//! 3. **Virtual ring** - every empty cell touching a real cell becomes
//!    `Virtual`, so each real cell sees a complete ring of non-empty neighbours.
//!
//! ## Layout (steps = 5, side = 60)
//!
//! ```text
//!   P    P    P    P    P        y = 51   north pole x5
//!  / \  / \  / \  / \  / \
//! W   5    5    5    5    W      y = 36   northern vertices
//!  \    band (10 triangles)  \
//!   W    5    5    5    5    W   y = 21   southern vertices
//!    \ /  \ /  \ /  \ /  \ /
//!     P    P    P    P    P      y = 6    south pole x5
//! ```

use bevy::log::debug;
use std::borrow::BorrowMut;
use std::fmt;

use crate::cell::CellType;
use crate::config::{ConfigError, SECTIONS};
use crate::cursor::{Cursor, CursorPose, Facing};
use crate::grid::{GridError, GridResult, HexGrid};

/// Errors that abort construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// The configuration was rejected before anything was stamped.
    Config(ConfigError),
    /// Tracing left the array: the geometry does not fit the grid.
    Geometry(GridError),
    /// The perimeter trace did not return to where it started.
    Unclosed {
        expected: CursorPose,
        actual: CursorPose,
    },
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::Config(e) => write!(f, "Configuration error: {}", e),
            BuildError::Geometry(e) => write!(f, "Geometry error: {}", e),
            BuildError::Unclosed { expected, actual } => write!(
                f,
                "perimeter did not close: expected [{}], finished at [{}]",
                expected, actual
            ),
        }
    }
}

impl std::error::Error for BuildError {}

impl From<ConfigError> for BuildError {
    fn from(e: ConfigError) -> Self {
        BuildError::Config(e)
    }
}

impl From<GridError> for BuildError {
    fn from(e: GridError) -> Self {
        BuildError::Geometry(e)
    }
}

/// Trace one slanted edge: a zigzag of `Common` cells with `marker` cells on
/// the true edge line.
pub fn edgewise<G: BorrowMut<HexGrid>>(
    cursor: &mut Cursor<G>,
    steps: usize,
    marker: CellType,
) -> GridResult<()> {
    for _ in 0..steps {
        cursor.right(1);
        cursor.forward();
        cursor.set_value(CellType::Common)?;
        cursor.left(1);
        cursor.forward();
        cursor.set_value(marker)?;
    }
    Ok(())
}

/// Mark the pole and the off-sphere cell beyond it, then turn back.
pub fn mark_pole<G: BorrowMut<HexGrid>>(cursor: &mut Cursor<G>) -> GridResult<()> {
    cursor.set_value(CellType::Pole)?;
    cursor.forward();
    cursor.set_value(CellType::Verboten)?;
    cursor.right(3);
    cursor.forward();
    cursor.left(1);
    Ok(())
}

/// Trace five sections and then the equatorial seam.
pub fn trace_hemisphere<G: BorrowMut<HexGrid>>(
    cursor: &mut Cursor<G>,
    steps: usize,
) -> GridResult<()> {
    for _ in 0..SECTIONS {
        edgewise(cursor, steps, CellType::Edge)?;
        mark_pole(cursor)?;
        edgewise(cursor, steps, CellType::Edge)?;
        cursor.set_value(CellType::Pentagon)?;
        cursor.left(2);
    }
    // The fifth vertex is the seam corner.
    cursor.set_value(CellType::Wrap)?;
    cursor.right(2);
    edgewise(cursor, steps, CellType::Wrap)?;
    cursor.right(1);
    Ok(())
}

/// Northern hemisphere, then southern hemisphere.
pub fn trace_perimeter<G: BorrowMut<HexGrid>>(
    cursor: &mut Cursor<G>,
    steps: usize,
) -> GridResult<()> {
    trace_hemisphere(cursor, steps)?;
    debug!("northern hemisphere traced, cursor at [{}]", cursor.pose());
    trace_hemisphere(cursor, steps)?;
    debug!("southern hemisphere traced, cursor at [{}]", cursor.pose());
    Ok(())
}

/// Fill the cells between perimeter crossings with `Common`.
///
/// Each column is scanned along its valid parity. `Common` and `Pentagon`
/// cells toggle the inside flag; empty cells met while inside are filled.
pub fn fill_centre(grid: &mut HexGrid) -> GridResult<()> {
    let side = grid.side() as i32;
    for x in 0..side {
        let mut inside = false;
        for y in (x % 2..side).step_by(2) {
            let cell = grid.get(x, y)?;
            if cell.is_fill_marker() {
                inside = !inside;
            } else if inside && cell == CellType::Empty {
                grid.set(x, y, CellType::Common)?;
            }
        }
    }
    Ok(())
}

/// Turn every empty cell that touches a real cell into `Virtual`.
///
/// The outermost ring of the array is never touched, so every neighbour probe
/// stays in bounds.
pub fn set_virtual(grid: &mut HexGrid) -> GridResult<()> {
    let side = grid.side() as i32;
    for x in 1..side - 1 {
        for y in (2 + x % 2..side - 2).step_by(2) {
            if grid.get(x, y)? != CellType::Empty {
                continue;
            }
            let mut touches_real = false;
            for (dx, dy) in Facing::VECTORS {
                if grid.get(x + dx, y + dy)?.is_real() {
                    touches_real = true;
                    break;
                }
            }
            if touches_real {
                grid.set(x, y, CellType::Virtual)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn traced(steps: usize) -> GridResult<HexGrid> {
        let mut grid = HexGrid::new(steps * 12);
        let origin = ((steps + 1) * 6) as i32;
        {
            let mut cursor = Cursor::new(&mut grid);
            cursor.place(2, origin, Facing::North);
            trace_perimeter(&mut cursor, steps)?;
        }
        Ok(grid)
    }

    // ========================================================================
    // Perimeter
    // ========================================================================

    #[test]
    fn test_edgewise_zigzag() {
        let mut grid = HexGrid::new(20);
        let mut cursor = Cursor::new(&mut grid);
        cursor.place(4, 4, Facing::North);
        edgewise(&mut cursor, 3, CellType::Edge).unwrap();

        // Each repetition goes (1,1) then (0,2): net (1,3)
        assert_eq!((cursor.x(), cursor.y()), (7, 13));
        assert_eq!(cursor.facing(), Facing::North);
        let grid = cursor.grid();
        assert_eq!(grid.get(5, 5), Ok(CellType::Common));
        assert_eq!(grid.get(5, 7), Ok(CellType::Edge));
        assert_eq!(grid.get(6, 8), Ok(CellType::Common));
        assert_eq!(grid.get(7, 13), Ok(CellType::Edge));
        assert_eq!(grid.count(CellType::Common), 3);
        assert_eq!(grid.count(CellType::Edge), 3);
    }

    #[test]
    fn test_mark_pole_turns_back() {
        let mut grid = HexGrid::new(10);
        let mut cursor = Cursor::new(&mut grid);
        cursor.place(4, 4, Facing::North);
        mark_pole(&mut cursor).unwrap();

        assert_eq!((cursor.x(), cursor.y()), (4, 4));
        assert_eq!(cursor.facing(), Facing::SouthEast);
        assert_eq!(cursor.grid().get(4, 4), Ok(CellType::Pole));
        assert_eq!(cursor.grid().get(4, 6), Ok(CellType::Verboten));
    }

    #[test]
    fn test_perimeter_counts() {
        let grid = traced(5).unwrap();
        assert_eq!(grid.count(CellType::Pole), 10);
        assert_eq!(grid.count(CellType::Verboten), 10);
        assert_eq!(grid.count(CellType::Pentagon), 8);
        assert_eq!(grid.count(CellType::Edge), 80);
        assert_eq!(grid.count(CellType::Wrap), 12);
        assert_eq!(grid.count(CellType::Virtual), 0);
    }

    #[test]
    fn test_perimeter_out_of_bounds_is_fatal() {
        // Too few steps for the tracing to fit inside its own grid
        assert!(matches!(traced(2), Err(GridError::OutOfBounds { .. })));
        assert!(matches!(traced(1), Err(GridError::OutOfBounds { .. })));
    }

    #[test]
    fn test_perimeter_in_undersized_grid() {
        let mut grid = HexGrid::new(40);
        let mut cursor = Cursor::new(&mut grid);
        cursor.place(2, 36, Facing::North);
        assert!(matches!(
            trace_perimeter(&mut cursor, 5),
            Err(GridError::OutOfBounds { .. })
        ));
    }

    // ========================================================================
    // Fill
    // ========================================================================

    #[test]
    fn test_fill_between_markers() {
        let mut grid = HexGrid::new(12);
        grid.set(4, 2, CellType::Common).unwrap();
        grid.set(4, 8, CellType::Pentagon).unwrap();
        grid.set(4, 6, CellType::Edge).unwrap();
        fill_centre(&mut grid).unwrap();

        assert_eq!(grid.get(4, 0), Ok(CellType::Empty));
        assert_eq!(grid.get(4, 4), Ok(CellType::Common));
        // Non-empty cells inside are left alone
        assert_eq!(grid.get(4, 6), Ok(CellType::Edge));
        assert_eq!(grid.get(4, 10), Ok(CellType::Empty));
        // Other parity and other columns untouched
        assert_eq!(grid.get(4, 5), Ok(CellType::Empty));
        assert_eq!(grid.count(CellType::Common), 2);
    }

    #[test]
    fn test_fill_unclosed_column_runs_to_end() {
        let mut grid = HexGrid::new(8);
        grid.set(3, 3, CellType::Common).unwrap();
        fill_centre(&mut grid).unwrap();
        assert_eq!(grid.get(3, 5), Ok(CellType::Common));
        assert_eq!(grid.get(3, 7), Ok(CellType::Common));
        assert_eq!(grid.get(3, 1), Ok(CellType::Empty));
    }

    #[test]
    fn test_fill_traced_sphere() {
        let mut grid = traced(5).unwrap();
        fill_centre(&mut grid).unwrap();
        assert_eq!(grid.count(CellType::Common), 696);
    }

    // ========================================================================
    // Virtual ring
    // ========================================================================

    #[test]
    fn test_virtual_ring_around_single_cell() {
        let mut grid = HexGrid::new(12);
        grid.set(5, 5, CellType::Common).unwrap();
        set_virtual(&mut grid).unwrap();

        for (dx, dy) in Facing::VECTORS {
            assert_eq!(grid.get(5 + dx, 5 + dy), Ok(CellType::Virtual));
        }
        assert_eq!(grid.count(CellType::Virtual), 6);
        assert_eq!(grid.get(5, 5), Ok(CellType::Common));
    }

    #[test]
    fn test_virtual_skips_outer_ring() {
        let mut grid = HexGrid::new(12);
        grid.set(1, 1, CellType::Wrap).unwrap();
        set_virtual(&mut grid).unwrap();

        // (1, 3) and (2, 2) are interior; (0, 0), (0, 2), (2, 0), (1, -1) are not
        assert_eq!(grid.get(1, 3), Ok(CellType::Virtual));
        assert_eq!(grid.get(2, 2), Ok(CellType::Virtual));
        assert_eq!(grid.get(0, 0), Ok(CellType::Empty));
        assert_eq!(grid.get(0, 2), Ok(CellType::Empty));
        assert_eq!(grid.get(2, 0), Ok(CellType::Empty));
    }

    #[test]
    fn test_virtual_ignores_verboten() {
        let mut grid = HexGrid::new(12);
        grid.set(5, 5, CellType::Verboten).unwrap();
        set_virtual(&mut grid).unwrap();
        assert_eq!(grid.count(CellType::Virtual), 0);
    }
}
