//! Save/load of sphere snapshots as JSON.
//!
//! A [`SphereSnapshot`] is what a renderer consumes. Writing it to disk lets a
//! separate viewer draw a sphere (and where a walk ended) without linking this
//! crate.
//!
//! ```ignore
//! let sphere = HexSphere::build(&GeodesicConfig::default())?;
//! save_snapshot_json(&sphere.snapshot(None), "sphere.json")?;
//! let loaded = load_snapshot_json("sphere.json")?;
//! ```

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use crate::config::GeodesicConfig;
use crate::sphere::SphereSnapshot;

/// Errors that can occur while reading or writing snapshot files.
#[derive(Debug)]
pub enum SnapshotIoError {
    /// File system error
    Io(std::io::Error),
    /// JSON serialization error
    Json(String),
}

impl std::fmt::Display for SnapshotIoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnapshotIoError::Io(e) => write!(f, "IO error: {}", e),
            SnapshotIoError::Json(e) => write!(f, "JSON error: {}", e),
        }
    }
}

impl std::error::Error for SnapshotIoError {}

impl From<std::io::Error> for SnapshotIoError {
    fn from(e: std::io::Error) -> Self {
        SnapshotIoError::Io(e)
    }
}

impl From<serde_json::Error> for SnapshotIoError {
    fn from(e: serde_json::Error) -> Self {
        SnapshotIoError::Json(e.to_string())
    }
}

pub type SnapshotIoResult<T> = Result<T, SnapshotIoError>;

/// Write `snapshot` as pretty-printed JSON.
pub fn save_snapshot_json<P: AsRef<Path>>(snapshot: &SphereSnapshot, path: P) -> SnapshotIoResult<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, snapshot)?;
    Ok(())
}

pub fn load_snapshot_json<P: AsRef<Path>>(path: P) -> SnapshotIoResult<SphereSnapshot> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let snapshot = serde_json::from_reader(reader)?;
    Ok(snapshot)
}

/// Read a geometry configuration file. The result is not validated here;
/// [`HexSphere::build`](crate::sphere::HexSphere::build) does that.
pub fn load_config_json<P: AsRef<Path>>(path: P) -> SnapshotIoResult<GeodesicConfig> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let config = serde_json::from_reader(reader)?;
    Ok(config)
}
