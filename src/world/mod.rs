//! # World Module
//!
//! The sparse voxel store: a hash map of render chunks keyed by chunk
//! coordinates, with on-demand terrain population from the heightmap.
//!
//! ## Architecture
//!
//! Only chunks that have been walked near or edited exist in memory,
//! which keeps effectively infinite worlds cheap. The store exposes the
//! collaborator interface the collision and visibility engines consume
//! (the [`VoxelStore`] trait) plus the explicit edit operations
//! (`add_node` / `remove_node`) that atomically keep face-exposure
//! masks correct for the edited node and its six neighbors.

use std::collections::HashMap;

use cgmath::{Point2, Point3};
use log::debug;

use crate::config::TerrainConfig;
use crate::terrain::{HeightMap, CHUNK_DIMENSION};
use chunk::Chunk;
use node::node_kind::NodeKind;
use node::node_side::NodeSide;
use node::{FaceMask, Node};

pub mod chunk;
pub mod node;

/// The voxel-lookup capability consumed by the collision resolver and
/// the visibility engine.
///
/// Implementations must keep `node_at` and `chunks_near` consistent:
/// every node offered through a chunk must also be reachable through
/// `node_at`. The renderer treats a divergence as a precondition
/// violation and surfaces it as an error.
pub trait VoxelStore {
    /// Returns the node at a world position, if any.
    fn node_at(&self, position: Point3<i32>) -> Option<&Node>;

    /// Whether a solid node occupies a world position.
    fn solid_at(&self, position: Point3<i32>) -> bool {
        self.node_at(position).is_some_and(|node| node.kind.solid())
    }

    /// Returns the render chunks relevant to a camera in the given
    /// chunk. Distance triage is the visibility engine's job, so
    /// returning more chunks than strictly needed is always correct.
    fn chunks_near(&self, chunk_x: i32, chunk_z: i32) -> Vec<&Chunk>;
}

/// Represents a voxel world composed of sparse chunks plus the
/// heightmap generator that seeds them.
pub struct World {
    /// Loaded render chunks keyed by chunk coordinates.
    chunks: HashMap<Point2<i32>, Chunk>,
    /// Deterministic terrain height source.
    height_map: HeightMap,
}

impl World {
    /// Creates an empty world for the given seed with default terrain
    /// settings. No chunks are loaded until [`World::ensure_chunk`] or
    /// an edit touches them.
    pub fn new(seed: i32) -> Self {
        Self::with_config(seed, &TerrainConfig::default())
    }

    /// Creates an empty world with explicit terrain settings.
    pub fn with_config(seed: i32, terrain: &TerrainConfig) -> Self {
        World {
            chunks: HashMap::new(),
            height_map: HeightMap::new(seed, terrain.cache_chunks),
        }
    }

    /// Returns the heightmap generator backing this world.
    pub fn height_map(&self) -> &HeightMap {
        &self.height_map
    }

    /// Returns the chunk key containing a world column.
    pub fn chunk_key(x: i32, z: i32) -> Point2<i32> {
        Point2::new(x.div_euclid(CHUNK_DIMENSION), z.div_euclid(CHUNK_DIMENSION))
    }

    /// Number of loaded chunks.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Returns a loaded chunk by key, if present.
    pub fn chunk_at(&self, key: Point2<i32>) -> Option<&Chunk> {
        self.chunks.get(&key)
    }

    /// Generates the terrain crust of the chunk at `key` if it does not
    /// have one yet.
    ///
    /// A chunk that only exists because an edit created it gets the
    /// terrain filled in around its edited nodes, which always win over
    /// the generated column. Freshly populated chunks get their face
    /// masks computed against the final store state, and the four
    /// planar neighbor chunks are refreshed as well so faces across the
    /// boundary seal correctly.
    pub fn ensure_chunk(&mut self, key: Point2<i32>) {
        if self.chunks.get(&key).is_some_and(|chunk| chunk.generated) {
            return;
        }

        let generated = Chunk::from_heightmap(key, &self.height_map);
        debug!(
            "generated chunk ({}, {}) with {} nodes",
            key.x,
            key.y,
            generated.node_count()
        );
        match self.chunks.get_mut(&key) {
            Some(edited) => {
                for (position, node) in generated.nodes {
                    edited.nodes.entry(position).or_insert(node);
                }
                edited.generated = true;
            }
            None => {
                self.chunks.insert(key, generated);
            }
        }

        self.refresh_chunk_masks(key);
        for neighbor in [
            Point2::new(key.x - 1, key.y),
            Point2::new(key.x + 1, key.y),
            Point2::new(key.x, key.y - 1),
            Point2::new(key.x, key.y + 1),
        ] {
            self.refresh_chunk_masks(neighbor);
        }
    }

    /// Ensures the 3x3 grid of chunks centered on `(chunk_x, chunk_z)`
    /// is loaded. Called whenever the player crosses into a new chunk.
    pub fn ensure_grid9(&mut self, chunk_x: i32, chunk_z: i32) {
        for dx in -1..=1 {
            for dz in -1..=1 {
                self.ensure_chunk(Point2::new(chunk_x + dx, chunk_z + dz));
            }
        }
    }

    /// Returns the spawn point: the player's feet on top of the surface
    /// node of column (8, 8).
    pub fn spawn_point(&self) -> Point3<f32> {
        let surface = self.height_map.absolute_height(8, 8);
        Point3::new(8.5, (surface + 1) as f32, 8.5)
    }

    /// Adds a node, creating its containing chunk if needed.
    ///
    /// The exposure masks of the new node and its six neighbors are
    /// recomputed in the same operation.
    ///
    /// # Returns
    /// `false` when the position is already occupied (the world is
    /// unchanged), `true` otherwise.
    pub fn add_node(&mut self, position: Point3<i32>, kind: NodeKind) -> bool {
        let key = Self::chunk_key(position.x, position.z);
        let chunk = self
            .chunks
            .entry(key)
            .or_insert_with(|| Chunk::empty(key));
        if chunk.nodes.contains_key(&position) {
            return false;
        }
        chunk.nodes.insert(position, Node::new(position, kind));
        self.refresh_neighborhood(position);
        true
    }

    /// Removes the node at a position, patching the masks of its six
    /// neighbors.
    ///
    /// # Returns
    /// The removed node, or `None` when the position was empty.
    pub fn remove_node(&mut self, position: Point3<i32>) -> Option<Node> {
        let key = Self::chunk_key(position.x, position.z);
        let removed = self.chunks.get_mut(&key)?.nodes.remove(&position)?;
        self.refresh_neighborhood(position);
        Some(removed)
    }

    /// Computes the exposure mask a node at `position` should have:
    /// one bit per face whose neighbor is absent or non-solid.
    fn computed_mask(&self, position: Point3<i32>) -> FaceMask {
        let mut mask = FaceMask::EMPTY;
        for side in NodeSide::all() {
            mask.set(side, !self.solid_at(position + side.offset()));
        }
        mask
    }

    /// Recomputes the masks of the node at `position` (if any) and its
    /// six neighbors, as one atomic patch.
    fn refresh_neighborhood(&mut self, position: Point3<i32>) {
        let mut updates = Vec::with_capacity(7);
        for target in std::iter::once(position)
            .chain(NodeSide::all().into_iter().map(|side| position + side.offset()))
        {
            if self.node_at(target).is_some() {
                updates.push((target, self.computed_mask(target)));
            }
        }
        for (target, mask) in updates {
            self.set_mask(target, mask);
        }
    }

    /// Recomputes the masks of every node in a chunk against the
    /// current store state. No-op for unloaded chunks.
    fn refresh_chunk_masks(&mut self, key: Point2<i32>) {
        let updates: Vec<(Point3<i32>, FaceMask)> = match self.chunks.get(&key) {
            Some(chunk) => chunk
                .nodes
                .keys()
                .map(|&position| (position, self.computed_mask(position)))
                .collect(),
            None => return,
        };
        for (position, mask) in updates {
            self.set_mask(position, mask);
        }
    }

    fn set_mask(&mut self, position: Point3<i32>, mask: FaceMask) {
        let key = Self::chunk_key(position.x, position.z);
        if let Some(node) = self
            .chunks
            .get_mut(&key)
            .and_then(|chunk| chunk.nodes.get_mut(&position))
        {
            node.faces = mask;
        }
    }
}

impl VoxelStore for World {
    fn node_at(&self, position: Point3<i32>) -> Option<&Node> {
        let key = Self::chunk_key(position.x, position.z);
        self.chunks.get(&key)?.nodes.get(&position)
    }

    fn chunks_near(&self, _chunk_x: i32, _chunk_z: i32) -> Vec<&Chunk> {
        // Every loaded chunk stays in play; the renderer's rear-margin
        // and distance triage do the pruning.
        self.chunks.values().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_keys_wrap_negative_coordinates() {
        assert_eq!(World::chunk_key(0, 0), Point2::new(0, 0));
        assert_eq!(World::chunk_key(15, 15), Point2::new(0, 0));
        assert_eq!(World::chunk_key(16, 0), Point2::new(1, 0));
        assert_eq!(World::chunk_key(-1, -16), Point2::new(-1, -1));
        assert_eq!(World::chunk_key(-17, 31), Point2::new(-2, 1));
    }

    #[test]
    fn ensure_chunk_is_idempotent() {
        let mut world = World::new(1);
        world.ensure_chunk(Point2::new(0, 0));
        let count = world
            .chunk_at(Point2::new(0, 0))
            .map(Chunk::node_count)
            .unwrap();
        world.ensure_chunk(Point2::new(0, 0));
        assert_eq!(world.chunk_count(), 1);
        assert_eq!(
            world.chunk_at(Point2::new(0, 0)).map(Chunk::node_count),
            Some(count)
        );
    }

    #[test]
    fn grid9_loads_nine_chunks() {
        let mut world = World::new(1);
        world.ensure_grid9(0, 0);
        assert_eq!(world.chunk_count(), 9);
        assert!(world.chunk_at(Point2::new(-1, 1)).is_some());
    }

    #[test]
    fn edits_create_chunks_on_demand() {
        let mut world = World::new(1);
        let position = Point3::new(100, 7, -40);
        assert!(world.add_node(position, NodeKind::Wood));
        assert!(!world.add_node(position, NodeKind::Stone));
        assert_eq!(world.node_at(position).unwrap().kind, NodeKind::Wood);
        assert_eq!(world.remove_node(position).unwrap().kind, NodeKind::Wood);
        assert!(world.node_at(position).is_none());
        assert!(world.remove_node(position).is_none());
    }

    #[test]
    fn terrain_fills_in_around_earlier_edits() {
        let mut world = World::new(1);
        let position = Point3::new(100, 7, -40);
        world.add_node(position, NodeKind::Wood);
        let key = World::chunk_key(100, -40);
        assert_eq!(key, Point2::new(6, -3));
        assert_eq!(world.chunk_at(key).map(Chunk::node_count), Some(1));

        // Streaming the neighborhood later must still populate the
        // crust, keeping the edited node.
        world.ensure_grid9(6, -3);
        let count = world.chunk_at(key).map(Chunk::node_count).unwrap();
        assert!(count >= 16 * 16 * 4, "chunk (6, -3) holds {count} nodes");
        assert_eq!(world.node_at(position).unwrap().kind, NodeKind::Wood);

        // Population is one-shot; re-ensuring does not regenerate.
        world.remove_node(position);
        world.ensure_chunk(key);
        assert!(world.node_at(position).is_none());
    }

    #[test]
    fn isolated_node_exposes_all_faces() {
        let mut world = World::new(1);
        let position = Point3::new(0, 50, 0);
        world.add_node(position, NodeKind::Stone);
        assert_eq!(world.node_at(position).unwrap().faces, FaceMask::ALL);
    }

    #[test]
    fn masks_patch_across_chunk_boundaries() {
        let mut world = World::new(1);
        let west = Point3::new(15, 50, 0);
        let east = Point3::new(16, 50, 0);
        world.add_node(west, NodeKind::Stone);
        assert_eq!(world.node_at(west).unwrap().faces, FaceMask::ALL);

        // The neighbor lives in chunk (1, 0); both masks must seal.
        world.add_node(east, NodeKind::Stone);
        assert_eq!(world.chunk_count(), 2);
        assert!(!world.node_at(west).unwrap().faces.contains(NodeSide::Right));
        assert!(!world.node_at(east).unwrap().faces.contains(NodeSide::Left));

        world.remove_node(east);
        assert!(world.node_at(west).unwrap().faces.contains(NodeSide::Right));
    }

    #[test]
    fn non_solid_neighbors_do_not_occlude() {
        let mut world = World::new(1);
        let position = Point3::new(0, 50, 0);
        world.add_node(position, NodeKind::Stone);
        world.add_node(Point3::new(0, 51, 0), NodeKind::Water);
        let mask = world.node_at(position).unwrap().faces;
        // Water is non-solid, so the top face stays exposed.
        assert!(mask.contains(NodeSide::Top));
        world.add_node(Point3::new(1, 50, 0), NodeKind::Glass);
        let mask = world.node_at(position).unwrap().faces;
        // Glass is solid (though transparent), so the +X face seals.
        assert!(!mask.contains(NodeSide::Right));
    }
}
