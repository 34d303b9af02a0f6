//! # Engine Module
//!
//! The top-level facade wiring world, player, and renderer together.
//! Embedders drive the engine with an [`Intent`] per tick and consume
//! the [`Frame`] it composes; everything else (chunk streaming around
//! the player, spawn placement, edit safety checks) happens inside.

use cgmath::Point3;
use log::info;

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::player::intent::Intent;
use crate::player::Player;
use crate::render::camera::CameraPose;
use crate::render::{minimap, Frame, Renderer, ScreenPoint};
use crate::world::node::node_kind::NodeKind;
use crate::world::World;

/// The assembled voxel explorer engine.
pub struct Engine {
    world: World,
    player: Player,
    renderer: Renderer,
}

impl Engine {
    /// Builds an engine from a configuration: the spawn neighborhood is
    /// loaded and the player is placed on the surface of column (8, 8).
    pub fn new(config: EngineConfig) -> Self {
        let mut world = World::with_config(config.seed, &config.terrain);
        let spawn = world.spawn_point();
        let player = Player::new(spawn, config.player);
        let chunk = player.current_chunk();
        world.ensure_grid9(chunk.x, chunk.y);
        info!(
            "world seed {}: spawned at ({}, {}, {})",
            config.seed, spawn.x, spawn.y, spawn.z
        );
        Engine {
            world,
            player,
            renderer: Renderer::new(&config.render),
        }
    }

    /// Builds an engine from a JSON configuration string.
    ///
    /// # Errors
    /// [`EngineError::Config`] when the JSON is malformed.
    pub fn from_json(text: &str) -> Result<Self, EngineError> {
        Ok(Self::new(EngineConfig::from_json(text)?))
    }

    /// The voxel world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// The player body.
    pub fn player(&self) -> &Player {
        &self.player
    }

    /// The player body, mutably (to toggle gravity or collision, or to
    /// reposition for tests and tooling).
    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    /// Adjusts the visibility engine's render distance.
    pub fn set_render_distance(&mut self, value: f32) {
        self.renderer.set_render_distance(value);
    }

    /// Resizes the projection viewport.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.renderer.resize(width, height);
    }

    /// Advances the simulation by the real time elapsed since the last
    /// tick, then streams in the 3x3 chunk grid if the player crossed a
    /// chunk boundary.
    pub fn tick(&mut self, intent: &Intent) {
        self.player.update(intent, &self.world);
        self.stream_chunks();
    }

    /// Advances the simulation by an explicit elapsed time in seconds.
    pub fn tick_with_elapsed(&mut self, intent: &Intent, elapsed: f32) {
        self.player.update_with_elapsed(intent, &self.world, elapsed);
        self.stream_chunks();
    }

    fn stream_chunks(&mut self) {
        if self.player.refresh_chunk() {
            let chunk = self.player.chunk();
            self.world.ensure_grid9(chunk.x, chunk.y);
        }
    }

    /// Composes the render lists for the current player pose.
    ///
    /// # Arguments
    /// * `click` - Optional viewport-center-relative click to pick
    ///   against.
    ///
    /// # Errors
    /// [`EngineError::InconsistentStore`] when the world's chunk lists
    /// disagree with its node lookup.
    pub fn render_frame(&mut self, click: Option<ScreenPoint>) -> Result<Frame, EngineError> {
        let camera = CameraPose::from_player(&self.player);
        self.renderer.compose_frame(&camera, &self.world, click)
    }

    /// Places a node, refusing positions already occupied or inside the
    /// player's body.
    pub fn place_node(&mut self, position: Point3<i32>, kind: NodeKind) -> bool {
        if self.player.intersects_node(position) {
            return false;
        }
        self.world.add_node(position, kind)
    }

    /// Removes the node at a position.
    ///
    /// # Returns
    /// The kind of the removed node, or `None` when the position was
    /// empty.
    pub fn remove_node(&mut self, position: Point3<i32>) -> Option<NodeKind> {
        self.world.remove_node(position).map(|node| node.kind)
    }

    /// Returns the player to the spawn point with cleared motion.
    pub fn respawn(&mut self) {
        let spawn = self.world.spawn_point();
        self.player.respawn(spawn);
        let chunk = self.player.chunk();
        self.world.ensure_grid9(chunk.x, chunk.y);
    }

    /// Renders the overhead minimap for the current player position.
    pub fn minimap(&self) -> image::GrayImage {
        let camera = CameraPose::from_player(&self.player);
        minimap::minimap(self.world.height_map(), &camera)
    }
}
