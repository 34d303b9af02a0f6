//! # Configuration Module
//!
//! Engine construction parameters. The defaults are the engine's
//! canonical constants (movement speeds, render distances, focal
//! length), so `EngineConfig::default()` yields the standard world
//! behavior. Configurations can also be loaded from JSON, with missing
//! fields falling back to the defaults.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Top-level engine configuration.
///
/// # Examples
///
/// ```
/// use voxel_explorer::EngineConfig;
///
/// let config = EngineConfig::from_json(r#"{ "seed": 42 }"#).unwrap();
/// assert_eq!(config.seed, 42);
/// assert_eq!(config.player.speed, 5.0);
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// World seed; the sole input (with coordinates) to terrain noise.
    pub seed: i32,
    /// Terrain generator settings.
    pub terrain: TerrainConfig,
    /// Player body and movement settings.
    pub player: PlayerConfig,
    /// Visibility and projection settings.
    pub render: RenderConfig,
}

/// Terrain generator settings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Capacity of the heightmap chunk cache, in 16x16 chunks.
    ///
    /// Height generation is a pure function of seed and coordinates, so
    /// eviction never changes results; it only bounds memory.
    pub cache_chunks: usize,
}

/// Player body and movement settings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Body height in world units; the camera eye sits at this offset.
    pub height: f32,
    /// Horizontal collision radius in world units.
    pub size: f32,
    /// Walk speed in units per second.
    pub speed: f32,
    /// Turn rate for key-driven rotation, in radians per second.
    pub turn_speed: f32,
    /// Terminal fall speed in units per second.
    pub fall_speed: f32,
    /// Initial upward velocity of a jump, in units per second.
    pub jump_speed: f32,
    /// Gravity acceleration in units per second squared.
    pub acceleration: f32,
}

/// Visibility and projection settings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Viewport width in pixels.
    pub viewport_width: u32,
    /// Viewport height in pixels.
    pub viewport_height: u32,
    /// Perspective focal length in pixels.
    pub focal_length: f32,
    /// High-detail node cutoff, compared against squared distances.
    pub node_render_dist: f32,
    /// Chunk triage cutoff, compared against squared planar distances.
    pub chunk_render_dist: f32,
}

impl EngineConfig {
    /// Loads a configuration from a JSON string.
    ///
    /// Fields absent from the JSON keep their default values.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Config`] when the JSON is malformed.
    pub fn from_json(text: &str) -> Result<Self, EngineError> {
        Ok(serde_json::from_str(text)?)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            seed: 1,
            terrain: TerrainConfig::default(),
            player: PlayerConfig::default(),
            render: RenderConfig::default(),
        }
    }
}

impl Default for TerrainConfig {
    fn default() -> Self {
        TerrainConfig { cache_chunks: 1024 }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        PlayerConfig {
            height: 1.7,
            size: 0.3,
            speed: 5.0,
            turn_speed: 2.5,
            fall_speed: 8.0,
            jump_speed: 8.0,
            acceleration: 21.0,
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            viewport_width: 800,
            viewport_height: 600,
            focal_length: 500.0,
            node_render_dist: 150.0,
            chunk_render_dist: 500.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_canonical_constants() {
        let config = EngineConfig::default();
        assert_eq!(config.seed, 1);
        assert_eq!(config.player.height, 1.7);
        assert_eq!(config.player.size, 0.3);
        assert_eq!(config.player.acceleration, 21.0);
        assert_eq!(config.render.focal_length, 500.0);
        assert_eq!(config.render.node_render_dist, 150.0);
        assert_eq!(config.render.chunk_render_dist, 500.0);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config =
            EngineConfig::from_json(r#"{ "seed": 9, "player": { "speed": 7.5 } }"#).unwrap();
        assert_eq!(config.seed, 9);
        assert_eq!(config.player.speed, 7.5);
        assert_eq!(config.player.jump_speed, 8.0);
        assert_eq!(config.render.viewport_width, 800);
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        assert!(EngineConfig::from_json("{ seed: }").is_err());
    }
}
