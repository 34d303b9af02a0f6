//! # Render Chunk Module
//!
//! A render chunk groups the solid node instances of one 16x16 column
//! partition - the same `(chunk_x, chunk_z)` key the heightmap cache
//! uses, but a distinct collection: one holds heights, the other holds
//! voxel instances for rendering and collision.
//!
//! Chunks are sparse maps over unbounded Y; terrain population fills a
//! thin crust per column (surface block plus a few filler blocks
//! beneath), and edits can place nodes at any height.

use std::collections::HashMap;

use cgmath::{Point2, Point3};

use super::node::node_kind::NodeKind;
use super::node::Node;
use crate::terrain::{HeightMap, CHUNK_DIMENSION};

/// Number of filler layers generated below each surface block.
const CRUST_DEPTH: i32 = 3;

/// A 16x16-column group of voxel nodes.
pub struct Chunk {
    /// Position of this chunk in chunk coordinates.
    pub position: Point2<i32>,
    /// The nodes of this chunk, keyed by world position.
    pub nodes: HashMap<Point3<i32>, Node>,
    /// Whether the terrain crust has been populated into this chunk.
    ///
    /// Edit-created chunks start without terrain; the world fills the
    /// crust in around their nodes once the player streams them in.
    pub generated: bool,
}

impl Chunk {
    /// Creates a chunk with no nodes and no terrain.
    ///
    /// Used when an edit targets a chunk that terrain generation has
    /// not touched yet.
    pub fn empty(position: Point2<i32>) -> Self {
        Chunk {
            position,
            nodes: HashMap::new(),
            generated: false,
        }
    }

    /// Generates the terrain crust of a chunk from the heightmap.
    ///
    /// Each column gets a grass surface node at its absolute height,
    /// dirt for the two layers beneath, and stone below that. Exposure
    /// masks are left empty; the world store recomputes them once the
    /// chunk is registered, so cross-chunk adjacency is respected.
    pub fn from_heightmap(position: Point2<i32>, map: &HeightMap) -> Self {
        let mut nodes = HashMap::new();
        let base_x = position.x * CHUNK_DIMENSION;
        let base_z = position.y * CHUNK_DIMENSION;

        for local_x in 0..CHUNK_DIMENSION {
            for local_z in 0..CHUNK_DIMENSION {
                let x = base_x + local_x;
                let z = base_z + local_z;
                let surface = map.absolute_height(x, z);
                for y in (surface - CRUST_DEPTH)..=surface {
                    let kind = if y == surface {
                        NodeKind::Grass
                    } else if y >= surface - 2 {
                        NodeKind::Dirt
                    } else {
                        NodeKind::Stone
                    };
                    let node_position = Point3::new(x, y, z);
                    nodes.insert(node_position, Node::new(node_position, kind));
                }
            }
        }

        Chunk {
            position,
            nodes,
            generated: true,
        }
    }

    /// Returns the horizontal center of this chunk in world units.
    pub fn center(&self) -> Point2<f32> {
        Point2::new(
            (self.position.x * CHUNK_DIMENSION + CHUNK_DIMENSION / 2) as f32,
            (self.position.y * CHUNK_DIMENSION + CHUNK_DIMENSION / 2) as f32,
        )
    }

    /// Returns the mean height of this chunk's nodes, used as the
    /// vertical anchor of its low-detail proxy. Zero when empty.
    pub fn mean_node_height(&self) -> f32 {
        let sum: f32 = self.nodes.values().map(|n| n.position.y as f32).sum();
        sum / (self.nodes.len().max(1)) as f32
    }

    /// Number of nodes in this chunk.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}
