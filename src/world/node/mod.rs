//! # Node Module
//!
//! The atomic unit of the voxel world: a unit cube at integer
//! coordinates with a material kind and a derived face-exposure mask.
//!
//! The exposure mask is never authoritative - it is recomputed by the
//! world store whenever the node or one of its six neighbors changes.
//! A face is eligible for drawing iff its exposure bit is set and the
//! camera is on the outward side of that face's plane.

use cgmath::Point3;

use node_kind::NodeKind;
use node_side::NodeSide;

pub mod node_kind;
pub mod node_side;

/// The underlying integer type used to represent node kinds compactly.
pub type NodeKindId = u8;

/// Per-node bitmask marking which of the 6 faces border empty or
/// non-solid space and are therefore drawable.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct FaceMask(u8);

impl FaceMask {
    /// Mask with no exposed faces.
    pub const EMPTY: FaceMask = FaceMask(0);
    /// Mask with all six faces exposed.
    pub const ALL: FaceMask = FaceMask(0b0011_1111);

    /// Whether the face toward `side` is exposed.
    pub fn contains(self, side: NodeSide) -> bool {
        self.0 & (1 << side as u8) != 0
    }

    /// Sets or clears the exposure bit toward `side`.
    pub fn set(&mut self, side: NodeSide, exposed: bool) {
        if exposed {
            self.0 |= 1 << side as u8;
        } else {
            self.0 &= !(1 << side as u8);
        }
    }

    /// Number of exposed faces.
    pub fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Whether no face is exposed.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// A single voxel node: integer position, material kind, and the
/// derived exposure mask.
#[derive(Copy, Clone, Debug)]
pub struct Node {
    /// World position of the node's minimum corner.
    pub position: Point3<i32>,
    /// Material kind of the node.
    pub kind: NodeKind,
    /// Derived face-exposure mask; maintained by the world store.
    pub faces: FaceMask,
}

impl Node {
    /// Creates a node with an empty exposure mask.
    ///
    /// The store computes the real mask when the node is inserted.
    pub fn new(position: Point3<i32>, kind: NodeKind) -> Self {
        Node {
            position,
            kind,
            faces: FaceMask::EMPTY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_set_and_clear() {
        let mut mask = FaceMask::EMPTY;
        assert!(mask.is_empty());
        mask.set(NodeSide::Top, true);
        mask.set(NodeSide::Left, true);
        assert!(mask.contains(NodeSide::Top));
        assert!(mask.contains(NodeSide::Left));
        assert!(!mask.contains(NodeSide::Front));
        assert_eq!(mask.count(), 2);
        mask.set(NodeSide::Top, false);
        assert!(!mask.contains(NodeSide::Top));
        assert_eq!(mask.count(), 1);
    }

    #[test]
    fn full_mask_covers_every_side() {
        for side in NodeSide::all() {
            assert!(FaceMask::ALL.contains(side));
        }
        assert_eq!(FaceMask::ALL.count(), 6);
    }
}
