use bevy::log::LogPlugin;
use bevy::prelude::*;
use hexsphere_core::{load_config_json, GeodesicConfig, SphereWalkPlugin, WalkConfig};

/// Usage: `hexsphere_studio [config.json] [steps_to_walk] [seed] [snapshot.json]`
fn main() -> AppExit {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let config = match args.first() {
        Some(path) => match load_config_json(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to read {}: {}", path, e);
                return AppExit::from_code(2);
            }
        },
        None => GeodesicConfig::default(),
    };

    let mut walk = WalkConfig::default();
    if let Some(steps) = args.get(1).and_then(|s| s.parse().ok()) {
        walk.steps_to_walk = steps;
    }
    if let Some(seed) = args.get(2).and_then(|s| s.parse().ok()) {
        walk.seed = seed;
    }
    walk.snapshot_path = args.get(3).cloned();

    App::new()
        .add_plugins(MinimalPlugins)
        .add_plugins(LogPlugin::default())
        .insert_resource(config)
        .insert_resource(walk)
        .add_plugins(SphereWalkPlugin)
        .run()
}
