//! # Voxel Explorer Demo Entry Point
//!
//! A headless demonstration run: build the engine (from an optional
//! JSON configuration file passed as the first argument), walk the
//! player around for a few simulated seconds, scatter some placed
//! nodes, compose a frame, and write the minimap to `minimap.png`.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run --release [config.json]
//! ```

use std::process::ExitCode;

use cgmath::Point3;
use log::{error, info};

use voxel_explorer::player::intent::Intent;
use voxel_explorer::render::ScreenPoint;
use voxel_explorer::world::node::node_kind::NodeKind;
use voxel_explorer::{Engine, EngineConfig};

fn main() -> ExitCode {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            let text = match std::fs::read_to_string(&path) {
                Ok(text) => text,
                Err(err) => {
                    error!("cannot read {path}: {err}");
                    return ExitCode::FAILURE;
                }
            };
            match EngineConfig::from_json(&text) {
                Ok(config) => config,
                Err(err) => {
                    error!("cannot parse {path}: {err}");
                    return ExitCode::FAILURE;
                }
            }
        }
        None => EngineConfig::default(),
    };

    let mut engine = Engine::new(config);

    // Let the body settle onto the terrain, then take a short walk with
    // a slow turn so the run crosses chunk boundaries.
    for _ in 0..30 {
        engine.tick_with_elapsed(&Intent::idle(), 1.0 / 60.0);
    }
    let walk = Intent {
        move_forward: true,
        turn_left: true,
        ..Intent::default()
    };
    for _ in 0..600 {
        engine.tick_with_elapsed(&walk, 1.0 / 60.0);
    }

    // Scatter a handful of placed nodes near the player, skipping any
    // position that would trap the body.
    let feet = engine.player().position;
    let mut placed = 0;
    for _ in 0..16 {
        let position = Point3::new(
            feet.x.floor() as i32 + fastrand::i32(-4..=4),
            feet.y.floor() as i32 + fastrand::i32(0..=3),
            feet.z.floor() as i32 + fastrand::i32(-4..=4),
        );
        if engine.place_node(position, NodeKind::random_solid()) {
            placed += 1;
        }
    }

    let frame = match engine.render_frame(Some(ScreenPoint { x: 0.0, y: 0.0 })) {
        Ok(frame) => frame,
        Err(err) => {
            error!("frame composition failed: {err}");
            return ExitCode::FAILURE;
        }
    };
    info!(
        "placed {} nodes; frame has {} nodes, {} faces, {} chunk proxies, {} fog bands",
        placed,
        frame.stats.node_count,
        frame.stats.face_count,
        frame.stats.chunk_count,
        frame.fog.len()
    );
    if let Some(picked) = frame.picked {
        info!(
            "crosshair rests on node ({}, {}, {}) face {:?}",
            picked.node.x, picked.node.y, picked.node.z, picked.side
        );
    }

    let minimap = engine.minimap();
    if let Err(err) = minimap.save("minimap.png") {
        error!("cannot write minimap.png: {err}");
        return ExitCode::FAILURE;
    }
    info!("wrote minimap.png");

    ExitCode::SUCCESS
}
