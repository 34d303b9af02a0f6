//! # Voxel Explorer
//!
//! A headless spatial engine for an interactive voxel-world explorer:
//! deterministic heightmap terrain with sparse chunk streaming, a
//! first-person player with per-axis collision resolution, and a
//! camera-relative visibility engine that composes per-frame render
//! lists (with face picking) for an external presentation layer.
//!
//! ## Layers
//!
//! - [`terrain`]: seeded, cache-backed height generation.
//! - [`world`]: the sparse voxel store with atomic edit operations.
//! - [`player`]: movement, gravity, and collision.
//! - [`render`]: culling, projection, picking, fog, minimap.
//! - [`engine`]: the facade wiring the layers together.

#![warn(missing_docs)]

pub mod config;
pub mod engine;
pub mod error;
pub mod player;
pub mod render;
pub mod terrain;
pub mod world;

pub use config::EngineConfig;
pub use engine::Engine;
pub use error::EngineError;
