//! A fully constructed geodesic sphere and its read-only boundary.
//!
//! [`HexSphere::build`] is the only way to obtain a sphere, and it only
//! returns one when every construction pass succeeded. After that the grid is
//! never mutated again, so any number of cursors may read it at once.

use bevy::log::info;
use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::cell::CellType;
use crate::config::GeodesicConfig;
use crate::construct::{fill_centre, set_virtual, trace_perimeter, BuildError};
use crate::cursor::{Cursor, CursorPose, Facing};
use crate::grid::HexGrid;

/// Which half of the net a row belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hemisphere {
    North,
    South,
}

impl Hemisphere {
    /// `+1` in the north, `-1` in the south.
    #[inline]
    pub fn sign(self) -> i32 {
        match self {
            Hemisphere::North => 1,
            Hemisphere::South => -1,
        }
    }
}

/// A constructed sphere: the stamped grid plus the geometry that produced it.
#[derive(Debug, Clone, Resource)]
pub struct HexSphere {
    config: GeodesicConfig,
    grid: HexGrid,
}

impl HexSphere {
    /// Validate `config`, trace the perimeter, fill the centre and add the
    /// virtual ring.
    pub fn build(config: &GeodesicConfig) -> Result<Self, BuildError> {
        config.validate()?;

        let mut grid = HexGrid::new(config.side());
        let (x, y) = config.origin();
        let start = CursorPose::new(x, y, Facing::North);
        {
            let mut cursor = Cursor::at(&mut grid, start);
            trace_perimeter(&mut cursor, config.steps)?;
            if cursor.pose() != start {
                return Err(BuildError::Unclosed {
                    expected: start,
                    actual: cursor.pose(),
                });
            }
        }
        fill_centre(&mut grid)?;
        set_virtual(&mut grid)?;

        info!(
            "built geodesic sphere: steps={} side={} common={} edge={} wrap={} virtual={}",
            config.steps,
            grid.side(),
            grid.count(CellType::Common),
            grid.count(CellType::Edge),
            grid.count(CellType::Wrap),
            grid.count(CellType::Virtual),
        );

        Ok(Self {
            config: *config,
            grid,
        })
    }

    /// Wrap an arbitrary grid without running construction.
    #[cfg(test)]
    pub(crate) fn from_parts(config: GeodesicConfig, grid: HexGrid) -> Self {
        Self { config, grid }
    }

    pub fn config(&self) -> &GeodesicConfig {
        &self.config
    }

    pub fn grid(&self) -> &HexGrid {
        &self.grid
    }

    /// A cursor on the trace origin, facing north.
    pub fn origin_cursor(&self) -> Cursor<&HexGrid> {
        let (x, y) = self.config.origin();
        self.cursor_at(CursorPose::new(x, y, Facing::North))
    }

    pub fn cursor_at(&self, pose: CursorPose) -> Cursor<&HexGrid> {
        Cursor::at(&self.grid, pose)
    }

    /// Hemisphere of row `y`, split halfway between the two vertex rows.
    pub fn hemisphere(&self, y: i32) -> Hemisphere {
        if 2 * y > self.config.north_vertex_row() + self.config.south_vertex_row() {
            Hemisphere::North
        } else {
            Hemisphere::South
        }
    }

    /// Every position that is a location on the sphere.
    pub fn real_cells(&self) -> impl Iterator<Item = (i32, i32, CellType)> + '_ {
        self.grid.iter().filter(|(_, _, cell)| cell.is_real())
    }

    /// Read-only view for a renderer: every non-empty cell plus an optional cursor.
    pub fn snapshot(&self, cursor: Option<CursorPose>) -> SphereSnapshot {
        SphereSnapshot {
            steps: self.config.steps,
            side: self.grid.side(),
            cells: self
                .grid
                .iter()
                .filter(|(_, _, cell)| *cell != CellType::Empty)
                .map(|(x, y, cell)| CellRecord { x, y, cell })
                .collect(),
            cursor,
        }
    }
}

/// One non-empty cell in a [`SphereSnapshot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellRecord {
    pub x: i32,
    pub y: i32,
    pub cell: CellType,
}

/// What a renderer needs to draw the sphere and a cursor on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SphereSnapshot {
    pub steps: usize,
    pub side: usize,
    pub cells: Vec<CellRecord>,
    pub cursor: Option<CursorPose>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;

    #[test]
    fn test_build_default_sphere() {
        let sphere = HexSphere::build(&GeodesicConfig::default()).unwrap();
        let grid = sphere.grid();
        assert_eq!(grid.side(), 60);
        assert_eq!(grid.count(CellType::Common), 696);
        assert_eq!(grid.count(CellType::Pole), 10);
        assert_eq!(grid.count(CellType::Pentagon), 8);
        assert_eq!(grid.count(CellType::Virtual), 208);
        assert_eq!(grid.count(CellType::Edge), 80);
        assert_eq!(grid.count(CellType::Verboten), 10);
        assert_eq!(grid.count(CellType::Wrap), 12);
        assert_eq!(sphere.real_cells().count(), 806);
    }

    #[test]
    fn test_origin_is_seam_corner() {
        let sphere = HexSphere::build(&GeodesicConfig::default()).unwrap();
        let cursor = sphere.origin_cursor();
        assert_eq!((cursor.x(), cursor.y()), (2, 36));
        assert!(cursor.state(CellType::Wrap));
        // Its twin sits one band period to the east
        assert_eq!(sphere.grid().get(52, 36), Ok(CellType::Wrap));
    }

    #[test]
    fn test_vertex_positions() {
        let sphere = HexSphere::build(&GeodesicConfig::default()).unwrap();
        let grid = sphere.grid();
        for k in 0..4 {
            assert_eq!(grid.get(12 + 10 * k, 36), Ok(CellType::Pentagon));
            assert_eq!(grid.get(17 + 10 * k, 21), Ok(CellType::Pentagon));
        }
        for k in 0..5 {
            assert_eq!(grid.get(7 + 10 * k, 51), Ok(CellType::Pole));
            assert_eq!(grid.get(7 + 10 * k, 53), Ok(CellType::Verboten));
            assert_eq!(grid.get(12 + 10 * k, 6), Ok(CellType::Pole));
            assert_eq!(grid.get(12 + 10 * k, 4), Ok(CellType::Verboten));
        }
        assert_eq!(grid.get(7, 21), Ok(CellType::Wrap));
        assert_eq!(grid.get(57, 21), Ok(CellType::Wrap));
    }

    #[test]
    fn test_only_hex_parity_is_used() {
        let sphere = HexSphere::build(&GeodesicConfig::new(6)).unwrap();
        for (x, y, cell) in sphere.grid().iter() {
            if !HexGrid::is_hex_parity(x, y) {
                assert_eq!(cell, CellType::Empty, "filler at ({}, {})", x, y);
            }
        }
    }

    #[test]
    fn test_every_real_cell_has_full_ring() {
        for steps in [5, 6, 9] {
            let sphere = HexSphere::build(&GeodesicConfig::new(steps)).unwrap();
            let grid = sphere.grid();
            for (x, y, _) in sphere.real_cells() {
                for (dx, dy) in Facing::VECTORS {
                    let n = grid.get(x + dx, y + dy).unwrap();
                    assert_ne!(
                        n,
                        CellType::Empty,
                        "gap next to ({}, {}) with steps={}",
                        x,
                        y,
                        steps
                    );
                }
            }
        }
    }

    #[test]
    fn test_rejects_bad_config() {
        assert_eq!(
            HexSphere::build(&GeodesicConfig::new(3)).unwrap_err(),
            BuildError::Config(ConfigError::TooFewSteps { steps: 3, min: 5 })
        );
    }

    #[test]
    fn test_hemispheres() {
        let sphere = HexSphere::build(&GeodesicConfig::default()).unwrap();
        assert_eq!(sphere.hemisphere(51), Hemisphere::North);
        assert_eq!(sphere.hemisphere(36), Hemisphere::North);
        assert_eq!(sphere.hemisphere(29), Hemisphere::North);
        assert_eq!(sphere.hemisphere(28), Hemisphere::South);
        assert_eq!(sphere.hemisphere(6), Hemisphere::South);
    }

    #[test]
    fn test_snapshot() {
        let sphere = HexSphere::build(&GeodesicConfig::default()).unwrap();
        let pose = CursorPose::new(2, 36, Facing::North);
        let snapshot = sphere.snapshot(Some(pose));
        assert_eq!(snapshot.side, 60);
        assert_eq!(snapshot.cells.len(), 60 * 60 - sphere.grid().count(CellType::Empty));
        assert!(snapshot.cells.contains(&CellRecord {
            x: 2,
            y: 36,
            cell: CellType::Wrap
        }));

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["cursor"]["x"], 2);
        assert_eq!(json["cursor"]["facing"], "North");
        assert_eq!(json["cells"].as_array().unwrap().len(), snapshot.cells.len());
    }
}
