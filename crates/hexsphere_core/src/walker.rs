//! SphereWalkPlugin - builds a sphere at startup and random-walks a cursor on it.
//!
//! The walk advances one step per frame. Each step turns the cursor by a random
//! sixth (left, none or right) and then lets the [`Navigator`] resolve the move,
//! so the walk keeps crossing seams. When the configured number of steps is
//! reached the app exits successfully; a construction or navigation failure
//! exits with code 1. If [`WalkConfig::snapshot_path`] is set, the sphere and
//! the final pose are written there as JSON before exiting.
//!
//! # Example
//!
//! ```ignore
//! App::new()
//!     .add_plugins(MinimalPlugins)
//!     .insert_resource(GeodesicConfig::new(8))
//!     .insert_resource(WalkConfig { steps_to_walk: 10_000, seed: 42, ..default() })
//!     .add_plugins(SphereWalkPlugin)
//!     .run();
//! ```

use bevy::app::AppExit;
use bevy::log::{debug, error, info};
use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::config::GeodesicConfig;
use crate::cursor::CursorPose;
use crate::navigate::{NavResult, Navigator};
use crate::snapshot_io::save_snapshot_json;
use crate::sphere::HexSphere;

/// How long the demo walk runs and how it is seeded.
#[derive(Resource, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalkConfig {
    pub steps_to_walk: usize,
    pub seed: u64,
    /// Where to write a JSON snapshot of the sphere and final pose, if anywhere.
    #[serde(default)]
    pub snapshot_path: Option<String>,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            steps_to_walk: 1000,
            seed: 0,
            snapshot_path: None,
        }
    }
}

/// State of a seeded random walk.
#[derive(Resource, Debug, Clone)]
pub struct SphereWalker {
    pose: CursorPose,
    rng: StdRng,
    steps_taken: usize,
    seam_crossings: usize,
    visited: HashSet<(i32, i32)>,
    finished: bool,
}

impl SphereWalker {
    pub fn new(start: CursorPose, seed: u64) -> Self {
        let mut visited = HashSet::new();
        visited.insert((start.x, start.y));
        Self {
            pose: start,
            rng: StdRng::seed_from_u64(seed),
            steps_taken: 0,
            seam_crossings: 0,
            visited,
            finished: false,
        }
    }

    pub fn pose(&self) -> CursorPose {
        self.pose
    }

    pub fn steps_taken(&self) -> usize {
        self.steps_taken
    }

    /// Steps that did not land on the plain array neighbour.
    pub fn seam_crossings(&self) -> usize {
        self.seam_crossings
    }

    /// Distinct array cells visited, including the start.
    pub fn visited_cells(&self) -> usize {
        self.visited.len()
    }

    /// Turn randomly, then move one step.
    pub fn step(&mut self, navigator: &Navigator) -> NavResult<CursorPose> {
        let turn = self.rng.gen_range(-1..=1);
        let pose = CursorPose {
            facing: self.pose.facing.turned(turn),
            ..self.pose
        };
        let next = navigator.advance_pose(pose)?;
        if (next.x, next.y) != pose.ahead() {
            self.seam_crossings += 1;
        }
        self.pose = next;
        self.steps_taken += 1;
        self.visited.insert((next.x, next.y));
        Ok(next)
    }
}

/// Plugin that builds a [`HexSphere`] from [`GeodesicConfig`] and walks it.
pub struct SphereWalkPlugin;

impl Plugin for SphereWalkPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GeodesicConfig>()
            .init_resource::<WalkConfig>()
            .add_systems(Startup, build_sphere)
            .add_systems(Update, walk_sphere);
    }
}

#[allow(deprecated)]
fn build_sphere(
    mut commands: Commands,
    config: Res<GeodesicConfig>,
    walk: Res<WalkConfig>,
    mut exit: EventWriter<AppExit>,
) {
    match HexSphere::build(&config) {
        Ok(sphere) => {
            let start = sphere.origin_cursor().pose();
            info!(
                "Walking {} steps from [{}] with seed {}",
                walk.steps_to_walk, start, walk.seed
            );
            commands.insert_resource(SphereWalker::new(start, walk.seed));
            commands.insert_resource(sphere);
        }
        Err(e) => {
            error!("Failed to build sphere: {}", e);
            exit.write(AppExit::from_code(1));
        }
    }
}

#[allow(deprecated)]
fn walk_sphere(
    sphere: Option<Res<HexSphere>>,
    walker: Option<ResMut<SphereWalker>>,
    walk: Res<WalkConfig>,
    mut exit: EventWriter<AppExit>,
) {
    let (Some(sphere), Some(mut walker)) = (sphere, walker) else {
        return;
    };
    if walker.finished {
        return;
    }

    if walker.steps_taken >= walk.steps_to_walk {
        info!(
            "Walk complete: {} steps, {} seam crossings, {} distinct cells, ended at [{}]",
            walker.steps_taken,
            walker.seam_crossings,
            walker.visited_cells(),
            walker.pose
        );
        walker.finished = true;
        if let Some(path) = &walk.snapshot_path {
            if let Err(e) = save_snapshot_json(&sphere.snapshot(Some(walker.pose)), path) {
                error!("Failed to write snapshot to {}: {}", path, e);
                exit.write(AppExit::from_code(1));
                return;
            }
            info!("Snapshot written to {}", path);
        }
        exit.write(AppExit::Success);
        return;
    }

    let navigator = Navigator::new(&sphere);
    match walker.step(&navigator) {
        Ok(pose) => debug!("step {}: [{}]", walker.steps_taken, pose),
        Err(e) => {
            error!("Walk stopped after {} steps: {}", walker.steps_taken, e);
            walker.finished = true;
            exit.write(AppExit::from_code(1));
        }
    }
}
