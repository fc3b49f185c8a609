//! Cell-type taxonomy for the flattened geodesic sphere.
//!
//! Every position of a [`HexGrid`](crate::grid::HexGrid) stores one of these
//! codes. Only the "real" kinds are locations on the sphere; the rest are
//! bookkeeping left behind by construction.
//!
//! | Code | Kind       | Glyph | On the sphere?                          |
//! |------|------------|-------|-----------------------------------------|
//! | 0    | `Empty`    | `.`   | no                                      |
//! | 1    | `Common`   | `C`   | yes, six neighbours                     |
//! | 2    | `Pole`     | `P`   | yes, five neighbours, five array copies |
//! | 3    | `Pentagon` | `5`   | yes, five neighbours                    |
//! | 4    | `Virtual`  | `v`   | no, stands in for a cell across a seam  |
//! | 5    | `Edge`     | `E`   | yes, shared by two sections             |
//! | 6    | `Verboten` | `#`   | no, never enterable                     |
//! | 7    | `Wrap`     | `W`   | yes, equatorial seam                    |

use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of cell stored at a grid position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum CellType {
    /// Unvisited / unassigned.
    #[default]
    Empty = 0,
    /// Ordinary hexagon.
    Common = 1,
    /// One of the two sphere poles.
    Pole = 2,
    /// A non-pole icosahedron vertex.
    Pentagon = 3,
    /// Placeholder next to real cells where the true neighbour lies across a seam.
    Virtual = 4,
    /// Traced perimeter cell between a pentagon and a pole.
    Edge = 5,
    /// Outside the sphere surface, next to a pole.
    Verboten = 6,
    /// Equatorial seam cell; has a twin elsewhere in its row.
    Wrap = 7,
}

impl CellType {
    /// All kinds in code order.
    pub const ALL: [CellType; 8] = [
        CellType::Empty,
        CellType::Common,
        CellType::Pole,
        CellType::Pentagon,
        CellType::Virtual,
        CellType::Edge,
        CellType::Verboten,
        CellType::Wrap,
    ];

    /// Decode a raw cell code.
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }

    /// The raw code stored in the grid.
    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Whether this kind is a location on the sphere (a valid resting position).
    #[inline]
    pub fn is_real(self) -> bool {
        matches!(
            self,
            CellType::Common
                | CellType::Pole
                | CellType::Pentagon
                | CellType::Edge
                | CellType::Wrap
        )
    }

    /// Whether cells of this kind have topological twins elsewhere in the array.
    #[inline]
    pub fn has_twins(self) -> bool {
        matches!(self, CellType::Pole | CellType::Edge | CellType::Wrap)
    }

    /// Kinds that toggle the scanline fill.
    #[inline]
    pub fn is_fill_marker(self) -> bool {
        matches!(self, CellType::Common | CellType::Pentagon)
    }

    /// Single-character glyph used by the text dump.
    pub fn glyph(self) -> char {
        match self {
            CellType::Empty => '.',
            CellType::Common => 'C',
            CellType::Pole => 'P',
            CellType::Pentagon => '5',
            CellType::Virtual => 'v',
            CellType::Edge => 'E',
            CellType::Verboten => '#',
            CellType::Wrap => 'W',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CellType::Empty => "EMPTY",
            CellType::Common => "COMMON",
            CellType::Pole => "POLE",
            CellType::Pentagon => "PENTAGON",
            CellType::Virtual => "VIRTUAL",
            CellType::Edge => "EDGE",
            CellType::Verboten => "VERBOTEN",
            CellType::Wrap => "WRAP",
        }
    }
}

impl fmt::Display for CellType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
