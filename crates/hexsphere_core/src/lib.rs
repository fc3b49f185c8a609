//! Core types for Hexsphere Studio.
//!
//! This crate provides:
//! - The cell taxonomy and bounds-checked hex grid
//! - A stepping cursor bound to a grid
//! - Construction of a geodesic (icosahedral) sphere on a flat grid
//! - Seam-aware navigation across the constructed sphere
//! - JSON snapshots of a sphere for external renderers
//! - A bevy plugin that random-walks a cursor over the sphere

pub mod cell;
pub mod config;
pub mod construct;
pub mod cursor;
pub mod grid;
pub mod navigate;
pub mod snapshot_io;
pub mod sphere;
pub mod walker;

pub use cell::CellType;
pub use config::{ConfigError, GeodesicConfig, MAX_STEPS, MIN_STEPS, SECTIONS};
pub use construct::{
    edgewise, fill_centre, mark_pole, set_virtual, trace_hemisphere, trace_perimeter, BuildError,
};
pub use cursor::{Cursor, CursorPose, Facing};
pub use grid::{GridError, GridResult, HexGrid};
pub use navigate::{NavError, NavResult, Navigator, Twin, FALLBACK_TURNS};
pub use snapshot_io::{
    load_config_json, load_snapshot_json, save_snapshot_json, SnapshotIoError, SnapshotIoResult,
};
pub use sphere::{CellRecord, Hemisphere, HexSphere, SphereSnapshot};
pub use walker::{SphereWalkPlugin, SphereWalker, WalkConfig};
