//! # Node Kind Module
//!
//! The material types a node can take, with their capability set:
//! solidity, transparency, base color, and per-face texture indices.
//! Kinds can be resolved from their compact integer id or from their
//! registry name.

use num_derive::FromPrimitive;

use super::NodeKindId;

/// Enumerates the material types of the voxel world.
///
/// The discriminant doubles as the compact on-disk/id representation;
/// `FromPrimitive` provides the reverse conversion.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive)]
pub enum NodeKind {
    /// Surface block with a green top.
    Grass,
    /// Common filler block below the surface.
    Dirt,
    /// Deep terrain block.
    Stone,
    /// Loose light-colored block.
    Sand,
    /// Bark-textured building block.
    Wood,
    /// Non-solid, translucent liquid block.
    Water,
    /// Solid but fully transparent block.
    Glass,
}

/// Registry of node kinds by their lowercase name, used when an
/// external collaborator addresses kinds symbolically (edit commands,
/// saved worlds).
pub static NODE_KINDS_BY_NAME: phf::Map<&'static str, NodeKind> = phf::phf_map! {
    "grass" => NodeKind::Grass,
    "dirt" => NodeKind::Dirt,
    "stone" => NodeKind::Stone,
    "sand" => NodeKind::Sand,
    "wood" => NodeKind::Wood,
    "water" => NodeKind::Water,
    "glass" => NodeKind::Glass,
};

/// Maps each node kind to its texture indices per face.
///
/// The outer array is indexed by `NodeKind` as a `usize`; the inner
/// array holds one texture index per face in `NodeSide` order:
/// [Front, Back, Bottom, Top, Left, Right].
pub static NODE_KIND_TEXTURE_INDICES: [[usize; 6]; 7] = [
    [2, 2, 1, 3, 2, 2], // Grass (top: 3, bottom: dirt, sides: 2)
    [1, 1, 1, 1, 1, 1], // Dirt
    [4, 4, 4, 4, 4, 4], // Stone
    [5, 5, 5, 5, 5, 5], // Sand
    [0, 0, 0, 0, 0, 0], // Wood
    [6, 6, 6, 6, 6, 6], // Water
    [7, 7, 7, 7, 7, 7], // Glass
];

/// Base color of each node kind, indexed by `NodeKind` as a `usize`.
static NODE_KIND_COLORS: [[u8; 3]; 7] = [
    [96, 160, 64],   // Grass
    [134, 96, 67],   // Dirt
    [128, 128, 128], // Stone
    [218, 210, 158], // Sand
    [104, 78, 47],   // Wood
    [64, 110, 220],  // Water
    [230, 240, 250], // Glass
];

impl NodeKind {
    /// Converts a compact id back to a kind.
    ///
    /// # Returns
    /// `None` when the id does not correspond to any kind.
    pub fn from_id(id: NodeKindId) -> Option<Self> {
        num::FromPrimitive::from_u8(id)
    }

    /// Looks up a kind by its lowercase registry name.
    pub fn from_name(name: &str) -> Option<Self> {
        NODE_KINDS_BY_NAME.get(name).copied()
    }

    /// Returns the compact id of this kind.
    pub fn id(self) -> NodeKindId {
        self as NodeKindId
    }

    /// Returns the registry name of this kind.
    pub fn name(self) -> &'static str {
        match self {
            NodeKind::Grass => "grass",
            NodeKind::Dirt => "dirt",
            NodeKind::Stone => "stone",
            NodeKind::Sand => "sand",
            NodeKind::Wood => "wood",
            NodeKind::Water => "water",
            NodeKind::Glass => "glass",
        }
    }

    /// Whether bodies collide with this kind and whether it occludes
    /// the faces of its neighbors.
    pub fn solid(self) -> bool {
        !matches!(self, NodeKind::Water)
    }

    /// Whether geometry behind this kind remains visible.
    pub fn transparent(self) -> bool {
        matches!(self, NodeKind::Water | NodeKind::Glass)
    }

    /// Returns the base color of this kind as `[r, g, b]`.
    pub fn color(self) -> [u8; 3] {
        NODE_KIND_COLORS[self as usize]
    }

    /// Returns the texture index of each face, in `NodeSide` order.
    pub fn texture_indices(self) -> [usize; 6] {
        NODE_KIND_TEXTURE_INDICES[self as usize]
    }

    /// Picks a random solid, opaque kind.
    ///
    /// Used by test worlds and demo scatter, never by terrain
    /// generation, which stays hash-deterministic.
    pub fn random_solid() -> Self {
        Self::from_id(fastrand::u8(0..5)).unwrap_or(NodeKind::Dirt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip() {
        for kind in [
            NodeKind::Grass,
            NodeKind::Dirt,
            NodeKind::Stone,
            NodeKind::Sand,
            NodeKind::Wood,
            NodeKind::Water,
            NodeKind::Glass,
        ] {
            assert_eq!(NodeKind::from_id(kind.id()), Some(kind));
            assert_eq!(NodeKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(NodeKind::from_id(200), None);
        assert_eq!(NodeKind::from_name("lava"), None);
    }

    #[test]
    fn capability_table() {
        assert!(NodeKind::Grass.solid());
        assert!(!NodeKind::Water.solid());
        assert!(NodeKind::Glass.solid());
        assert!(NodeKind::Glass.transparent());
        assert!(!NodeKind::Stone.transparent());
    }

    #[test]
    fn random_solid_is_solid_and_opaque() {
        for _ in 0..64 {
            let kind = NodeKind::random_solid();
            assert!(kind.solid());
            assert!(!kind.transparent());
        }
    }
}
