//! # Render Module
//!
//! Camera-relative visibility determination: the per-frame pass that
//! decides *what* to draw and *where* on screen. Pixel-fill mechanics
//! belong to an external presentation layer; this module produces
//! ordered render lists, a fog schedule, and the optional picked face.
//!
//! ## Frame anatomy
//!
//! 1. Rebuild the four-plane frustum approximation from the camera.
//! 2. Triage chunks: drop chunks behind the rear margin, queue distant
//!    chunks as low-detail proxies, test near chunks per node.
//! 3. Reject nodes by squared distance, forward cone, and side planes.
//! 4. Sort survivors back-to-front and emit their exposed, outward
//!    faces with projected screen quads, picking against the click
//!    point along the way (later-drawn, nearer faces win).
//!
//! The rejection thresholds are empirical: they were tuned against the
//! default viewport and render distances, and the culling results are
//! part of the engine's observable contract.

use cgmath::{InnerSpace, Point2, Point3, Vector2, Vector3};
use log::trace;

use crate::config::RenderConfig;
use crate::error::EngineError;
use crate::world::node::node_kind::NodeKind;
use crate::world::node::node_side::NodeSide;
use crate::world::node::FaceMask;
use crate::world::VoxelStore;
use camera::CameraPose;
use frustum::Frustum;
use projection::ProjectionCache;

pub mod camera;
pub mod frustum;
pub mod minimap;
mod projection;

pub use projection::ScreenPoint;

/// Rear-margin threshold for chunk triage: chunks whose horizontal
/// offset dots below this against the facing direction are skipped
/// entirely. A generous margin rather than a hard 90-degree cutoff, so
/// geometry straddling the camera plane still draws.
pub const REAR_MARGIN: f32 = -13.0;

/// Forward-cone threshold for per-node rejection (roughly a 150-degree
/// cone around the view direction).
pub const FORWARD_CONE_COS: f32 = -0.866;

/// Distance of the first fog band.
const FOG_START: f32 = 50.0;
/// Distance step between fog bands.
const FOG_STEP: f32 = 20.0;
/// No fog bands are emitted at or beyond this distance.
const FOG_CAP: f32 = 80.0;
/// Opacity of each fog band wash.
const FOG_ALPHA: f32 = 0.5;

/// One drawable face of a visible node, with its projected screen quad.
#[derive(Debug, Clone, Copy)]
pub struct VisibleFace {
    /// Which face of the node this is.
    pub side: NodeSide,
    /// The face's four corners on screen, counter-clockwise as seen
    /// from outside the node.
    pub quad: [ScreenPoint; 4],
}

/// A node that survived culling, with its drawable faces.
#[derive(Debug, Clone)]
pub struct VisibleNode {
    /// World position of the node.
    pub position: Point3<i32>,
    /// Material kind, for texture/color lookup downstream.
    pub kind: NodeKind,
    /// Squared distance from the camera to the node center.
    pub distance_sq: f32,
    /// Exposed faces with the camera on their outward side.
    pub faces: Vec<VisibleFace>,
}

/// A distant chunk reduced to a single proxy point.
#[derive(Debug, Clone, Copy)]
pub struct LowDetailChunk {
    /// Chunk coordinates of the proxied chunk.
    pub chunk: Point2<i32>,
    /// Proxy anchor: horizontal chunk center at the mean node height.
    pub center: Point3<f32>,
    /// True (unsquared) planar distance from the camera.
    pub distance: f32,
}

/// One translucent full-screen fog wash.
#[derive(Debug, Clone, Copy)]
pub struct FogBand {
    /// Distance at which this band applies.
    pub distance: f32,
    /// Opacity of the wash.
    pub alpha: f32,
}

/// The node and face under the click point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickedFace {
    /// World position of the picked node.
    pub node: Point3<i32>,
    /// The picked face.
    pub side: NodeSide,
}

/// Counters accumulated while composing a frame.
#[derive(Debug, Default, Clone, Copy)]
pub struct FrameStats {
    /// Low-detail chunk proxies emitted.
    pub chunk_count: usize,
    /// Nodes surviving culling.
    pub node_count: usize,
    /// Faces emitted for drawing.
    pub face_count: usize,
    /// Distinct vertices projected.
    pub vertex_count: usize,
}

/// Everything the presentation layer needs to draw one frame.
#[derive(Debug)]
pub struct Frame {
    /// High-detail nodes, sorted back-to-front by descending distance.
    pub nodes: Vec<VisibleNode>,
    /// Low-detail chunk proxies, sorted back-to-front.
    pub low_detail: Vec<LowDetailChunk>,
    /// Fog washes, outermost band first.
    pub fog: Vec<FogBand>,
    /// The face under the supplied click point, if any.
    pub picked: Option<PickedFace>,
    /// The frame's frustum planes, for debugging overlays.
    pub frustum: Frustum,
    /// Work counters for HUD display.
    pub stats: FrameStats,
}

/// Per-frame visibility and picking engine.
pub struct Renderer {
    focal_length: f32,
    half_width: f32,
    half_height: f32,
    node_render_dist: f32,
    chunk_render_dist: f32,
    projection: ProjectionCache,
}

impl Renderer {
    /// Creates a renderer for a viewport and culling configuration.
    pub fn new(config: &RenderConfig) -> Self {
        Renderer {
            focal_length: config.focal_length,
            half_width: (config.viewport_width / 2) as f32,
            half_height: (config.viewport_height / 2) as f32,
            node_render_dist: config.node_render_dist,
            chunk_render_dist: config.chunk_render_dist,
            projection: ProjectionCache::default(),
        }
    }

    /// Current high-detail cutoff (squared-distance semantics).
    pub fn node_render_dist(&self) -> f32 {
        self.node_render_dist
    }

    /// Adjusts the render distance; the chunk cutoff keeps its fixed
    /// offset above the node cutoff.
    pub fn set_render_distance(&mut self, value: f32) {
        self.node_render_dist = value;
        self.chunk_render_dist = value + 350.0;
    }

    /// Resizes the projection viewport.
    pub fn resize(&mut self, viewport_width: u32, viewport_height: u32) {
        self.half_width = (viewport_width / 2) as f32;
        self.half_height = (viewport_height / 2) as f32;
    }

    /// Composes the render lists for one frame.
    ///
    /// # Arguments
    /// * `camera` - The frame's camera pose.
    /// * `store` - The voxel store collaborator.
    /// * `click` - Optional screen-space click to pick against.
    ///
    /// # Errors
    /// [`EngineError::InconsistentStore`] when a chunk lists a node the
    /// store lookup cannot find (a collaborator precondition violation).
    pub fn compose_frame<S: VoxelStore>(
        &mut self,
        camera: &CameraPose,
        store: &S,
        click: Option<ScreenPoint>,
    ) -> Result<Frame, EngineError> {
        let frustum = Frustum::new(
            camera,
            self.focal_length,
            self.half_width,
            self.half_height,
        );
        self.projection.begin_frame();
        let mut stats = FrameStats::default();

        let camera_chunk_x = (camera.position.x / 16.0).floor() as i32;
        let camera_chunk_z = (camera.position.z / 16.0).floor() as i32;

        // Chunk triage plus per-node culling for near chunks.
        let mut survivors: Vec<(Point3<i32>, NodeKind, FaceMask, f32)> = Vec::new();
        let mut far_chunks: Vec<(Point2<i32>, Point2<f32>, f32, f32)> = Vec::new();
        for chunk in store.chunks_near(camera_chunk_x, camera_chunk_z) {
            let center = chunk.center();
            let planar = Vector2::new(
                center.x - camera.position.x,
                center.y - camera.position.z,
            );
            if camera.n2d.dot(planar) < REAR_MARGIN {
                continue;
            }
            let planar_sq = planar.magnitude2();
            if planar_sq > self.chunk_render_dist {
                far_chunks.push((chunk.position, center, planar_sq, chunk.mean_node_height()));
                continue;
            }

            for node in chunk.nodes.values() {
                if store.node_at(node.position).is_none() {
                    return Err(EngineError::InconsistentStore {
                        chunk_x: chunk.position.x,
                        chunk_z: chunk.position.y,
                        x: node.position.x,
                        y: node.position.y,
                        z: node.position.z,
                    });
                }

                let offset = Vector3::new(
                    node.position.x as f32 + 0.5 - camera.position.x,
                    node.position.y as f32 + 0.5 - camera.position.y,
                    node.position.z as f32 + 0.5 - camera.position.z,
                );
                let distance_sq = offset.magnitude2();
                if distance_sq > self.node_render_dist {
                    continue;
                }
                if camera.n3d.dot(offset) < FORWARD_CONE_COS {
                    continue;
                }
                if frustum.rejects(offset) {
                    continue;
                }
                survivors.push((node.position, node.kind, node.faces, distance_sq));
            }
        }
        stats.node_count = survivors.len();

        // Low-detail pass: farthest first, advancing the fog schedule
        // per chunk whether or not its proxy survives the re-check.
        far_chunks.sort_by(|a, b| b.2.total_cmp(&a.2));
        let mut low_detail = Vec::new();
        let mut fog = Vec::new();
        let mut fog_distance = FOG_START;
        for (position, center, planar_sq, mean_height) in &far_chunks {
            let dx = center.x - camera.position.x;
            let dz = center.y - camera.position.z;
            let distance = (dx * dx + dz * dz).sqrt();
            if distance <= self.chunk_render_dist
                && camera.n2d.x * dx + camera.n2d.y * dz >= REAR_MARGIN
            {
                low_detail.push(LowDetailChunk {
                    chunk: *position,
                    center: Point3::new(center.x, *mean_height, center.y),
                    distance,
                });
                stats.chunk_count += 1;
            }

            if fog_distance < FOG_CAP && *planar_sq < self.node_render_dist - fog_distance {
                fog.push(FogBand {
                    distance: fog_distance,
                    alpha: FOG_ALPHA,
                });
                fog_distance += FOG_STEP;
            }
        }

        // High-detail pass, back to front; picking overwrites earlier
        // matches so the nearest drawn face wins.
        survivors.sort_by(|a, b| b.3.total_cmp(&a.3));
        let mut picked = None;
        let mut nodes = Vec::with_capacity(survivors.len());
        for (position, kind, mask, distance_sq) in survivors {
            let mut faces = Vec::new();
            for side in NodeSide::all() {
                if !mask.contains(side) || !side.faces_camera(position, camera.position) {
                    continue;
                }

                let mut quad = [ScreenPoint::default(); 4];
                let mut renderable = true;
                for (slot, corner) in side.corner_offsets().into_iter().enumerate() {
                    match self
                        .projection
                        .project(position + corner, camera, self.focal_length)
                    {
                        Some(point) => quad[slot] = point,
                        None => {
                            renderable = false;
                            break;
                        }
                    }
                }
                if !renderable {
                    continue;
                }

                stats.face_count += 1;
                if let Some(click) = click {
                    if projection::quad_contains(&quad, click) {
                        picked = Some(PickedFace { node: position, side });
                    }
                }
                faces.push(VisibleFace { side, quad });
            }
            nodes.push(VisibleNode {
                position,
                kind,
                distance_sq,
                faces,
            });
        }
        stats.vertex_count = self.projection.len();

        trace!(
            "frame: {} nodes, {} faces, {} proxies, {} vertices",
            stats.node_count,
            stats.face_count,
            stats.chunk_count,
            stats.vertex_count
        );

        Ok(Frame {
            nodes,
            low_detail,
            fog,
            picked,
            frustum,
            stats,
        })
    }
}
