//! # Player Module
//!
//! The first-person body: frame-rate-independent movement and rotation
//! integration, gravity with a terminal velocity, jumping, and the
//! per-tick collision resolution against the voxel store.
//!
//! The player is the sole moving collider and is not itself solid. It
//! measures its own elapsed real time between updates, so the engine
//! stays correct at arbitrary, variable tick rates; tests drive the
//! deterministic [`Player::update_with_elapsed`] entry point directly.

use std::f32::consts::FRAC_PI_2;

use cgmath::{Point2, Point3, Rad, Vector3};
use web_time::Instant;

use crate::config::PlayerConfig;
use crate::terrain::CHUNK_DIMENSION;
use crate::world::VoxelStore;
use intent::Intent;

mod collision;
pub mod intent;

/// Raw look deltas divide by this factor to become radians.
const LOOK_DELTA_SCALE: f32 = 100.0;

/// The player's body and simulation state.
#[derive(Debug)]
pub struct Player {
    /// Feet position in world space.
    pub position: Point3<f32>,
    /// Horizontal rotation (around Y) in radians.
    pub yaw: Rad<f32>,
    /// Vertical rotation in radians, clamped to straight up/down.
    pub pitch: Rad<f32>,
    /// Whether gravity pulls the body down.
    pub gravity: bool,
    /// Whether collision resolution runs; disabled means free flight
    /// through geometry.
    pub collision: bool,
    /// Displacement applied on the previous tick, after resolution.
    delta: Vector3<f32>,
    /// Vertical velocity in units per second.
    velocity: f32,
    /// First-tick grace: the initial update applies no vertical motion
    /// so a freshly spawned body does not inherit a large first dt.
    first_update: bool,
    /// Timestamp of the previous self-clocked update.
    last_update: Option<Instant>,
    /// Chunk the body was last seen in.
    chunk: Point2<i32>,
    /// Body and movement constants.
    config: PlayerConfig,
}

impl Player {
    /// Creates a player standing at `spawn`, facing yaw 0 with a level
    /// view.
    pub fn new(spawn: Point3<f32>, config: PlayerConfig) -> Self {
        let mut player = Player {
            position: spawn,
            yaw: Rad(0.0),
            pitch: Rad(0.0),
            gravity: true,
            collision: true,
            delta: Vector3::new(0.0, 0.0, 0.0),
            velocity: 0.0,
            first_update: true,
            last_update: None,
            chunk: Point2::new(0, 0),
            config,
        };
        player.chunk = player.current_chunk();
        player
    }

    /// Resets the body to a spawn point, clearing rotation and motion.
    pub fn respawn(&mut self, spawn: Point3<f32>) {
        self.position = spawn;
        self.yaw = Rad(0.0);
        self.pitch = Rad(0.0);
        self.delta = Vector3::new(0.0, 0.0, 0.0);
        self.velocity = 0.0;
        self.first_update = true;
        self.chunk = self.current_chunk();
    }

    /// Body height in world units.
    pub fn height(&self) -> f32 {
        self.config.height
    }

    /// Horizontal body radius in world units.
    pub fn size(&self) -> f32 {
        self.config.size
    }

    /// Current vertical velocity in units per second.
    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    /// Whether the previous tick resolved to no vertical displacement,
    /// which is the grounded condition gating jumps.
    pub fn grounded(&self) -> bool {
        self.delta.y == 0.0
    }

    /// The camera eye: feet position raised by the body height.
    pub fn eye_position(&self) -> Point3<f32> {
        Point3::new(
            self.position.x,
            self.position.y + self.config.height,
            self.position.z,
        )
    }

    /// The chunk currently containing the body.
    pub fn current_chunk(&self) -> Point2<i32> {
        Point2::new(
            (self.position.x / CHUNK_DIMENSION as f32).floor() as i32,
            (self.position.z / CHUNK_DIMENSION as f32).floor() as i32,
        )
    }

    /// Records the current chunk and reports whether it changed since
    /// the last call. The engine loads the surrounding 3x3 grid when
    /// this returns true.
    pub fn refresh_chunk(&mut self) -> bool {
        let current = self.current_chunk();
        if current != self.chunk {
            self.chunk = current;
            true
        } else {
            false
        }
    }

    /// The chunk recorded by the last [`Player::refresh_chunk`].
    pub fn chunk(&self) -> Point2<i32> {
        self.chunk
    }

    /// Advances the simulation by the real time elapsed since the
    /// previous call, measured on the monotonic clock.
    pub fn update<S: VoxelStore>(&mut self, intent: &Intent, store: &S) {
        let now = Instant::now();
        let elapsed = match self.last_update {
            Some(previous) => (now - previous).as_secs_f32(),
            None => 0.0,
        };
        self.last_update = Some(now);
        self.update_with_elapsed(intent, store, elapsed);
    }

    /// Advances the simulation by an explicit elapsed time in seconds.
    ///
    /// One tick: rotation, movement intents, jump gating, gravity
    /// integration, collision resolution, then the (possibly clamped)
    /// displacement is applied to the position.
    pub fn update_with_elapsed<S: VoxelStore>(
        &mut self,
        intent: &Intent,
        store: &S,
        elapsed: f32,
    ) {
        // Key-driven rotation scales with elapsed time.
        if intent.turn_left {
            self.yaw += Rad(self.config.turn_speed * elapsed);
        }
        if intent.turn_right {
            self.yaw -= Rad(self.config.turn_speed * elapsed);
        }
        if intent.look_up || intent.look_down {
            let direction = if intent.look_up { 1.0 } else { -1.0 };
            self.pitch += Rad(direction * self.config.turn_speed * elapsed);
        }
        // Raw look deltas apply directly, unscaled by time.
        if let Some((dx, dy)) = intent.rotate_view {
            self.yaw -= Rad(dx as f32 / LOOK_DELTA_SCALE);
            self.pitch -= Rad(dy as f32 / LOOK_DELTA_SCALE);
        }
        self.pitch = Rad(self.pitch.0.clamp(-FRAC_PI_2, FRAC_PI_2));

        let (sin_yaw, cos_yaw) = self.yaw.0.sin_cos();
        let step_x = self.config.speed * elapsed * sin_yaw;
        let step_z = self.config.speed * elapsed * cos_yaw;
        let step_y = self.config.speed * elapsed;

        self.delta.x = 0.0;
        self.delta.z = 0.0;
        if !self.gravity {
            self.delta.y = 0.0;
            self.velocity = 0.0;
        }

        if intent.move_forward {
            self.delta.x -= step_x;
            self.delta.z += step_z;
        }
        if intent.move_backward {
            self.delta.x += step_x;
            self.delta.z -= step_z;
        }
        if intent.move_right {
            self.delta.x += step_z;
            self.delta.z += step_x;
        }
        if intent.move_left {
            self.delta.x -= step_z;
            self.delta.z -= step_x;
        }

        // Jump gating reads the previous tick's resolved vertical
        // displacement: grounded bodies have it snapped to zero.
        if intent.jump && self.gravity && self.delta.y == 0.0 {
            self.velocity = self.config.jump_speed;
        }

        if intent.move_up && !self.gravity {
            self.delta.y += step_y;
        }
        if intent.move_down && !self.gravity {
            self.delta.y -= step_y;
        }

        if self.gravity {
            self.velocity =
                (self.velocity - self.config.acceleration * elapsed).max(-self.config.fall_speed);
            self.delta.y = self.velocity * elapsed;
        }

        if self.first_update {
            self.delta.y = 0.0;
            self.first_update = false;
        }

        if self.collision {
            collision::resolve(
                &mut self.position,
                &mut self.delta,
                &mut self.velocity,
                self.config.size,
                self.config.height,
                store,
            );
        }

        self.position += self.delta;
    }

    /// Whether the body's bounding volume overlaps a node's unit cube.
    ///
    /// The external edit flow uses this to refuse placing a node inside
    /// the player.
    pub fn intersects_node(&self, node: Point3<i32>) -> bool {
        let nx = node.x as f32;
        let ny = node.y as f32;
        let nz = node.z as f32;
        self.position.x + self.config.size > nx
            && self.position.x - self.config.size < nx + 1.0
            && self.position.z + self.config.size > nz
            && self.position.z - self.config.size < nz + 1.0
            && self.position.y + collision::HEADROOM > ny
            && self.position.y < ny + 1.0
    }
}
