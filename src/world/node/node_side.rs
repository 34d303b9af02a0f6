//! # Node Side Module
//!
//! The six axis-aligned faces of a voxel node, with the direction
//! arithmetic the collision, visibility, and edit paths all share.

use cgmath::{Point3, Vector3};

/// Represents the six faces of a voxel node.
///
/// Each variant carries a fixed discriminant used to index per-face
/// tables (texture indices, exposure bits). The order is:
/// [Front, Back, Bottom, Top, Left, Right].
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum NodeSide {
    /// The +Z face.
    Front = 0,
    /// The -Z face.
    Back = 1,
    /// The -Y face.
    Bottom = 2,
    /// The +Y face.
    Top = 3,
    /// The -X face.
    Left = 4,
    /// The +X face.
    Right = 5,
}

impl NodeSide {
    /// Returns all six faces in discriminant order.
    pub fn all() -> [NodeSide; 6] {
        [
            NodeSide::Front,
            NodeSide::Back,
            NodeSide::Bottom,
            NodeSide::Top,
            NodeSide::Left,
            NodeSide::Right,
        ]
    }

    /// Returns the unit offset from a node to its neighbor across this
    /// face.
    pub fn offset(self) -> Vector3<i32> {
        match self {
            NodeSide::Front => Vector3::new(0, 0, 1),
            NodeSide::Back => Vector3::new(0, 0, -1),
            NodeSide::Bottom => Vector3::new(0, -1, 0),
            NodeSide::Top => Vector3::new(0, 1, 0),
            NodeSide::Left => Vector3::new(-1, 0, 0),
            NodeSide::Right => Vector3::new(1, 0, 0),
        }
    }

    /// Returns the face on the opposite side of the node.
    pub fn opposite(self) -> NodeSide {
        match self {
            NodeSide::Front => NodeSide::Back,
            NodeSide::Back => NodeSide::Front,
            NodeSide::Bottom => NodeSide::Top,
            NodeSide::Top => NodeSide::Bottom,
            NodeSide::Left => NodeSide::Right,
            NodeSide::Right => NodeSide::Left,
        }
    }

    /// Whether the camera lies on the outward side of this face's
    /// plane, for a node anchored at `node` (its minimum corner).
    ///
    /// Voxel faces are axis-aligned unit squares, so this single plane
    /// comparison is exact backface culling: the +Z face is drawable
    /// only when `camera.z > node.z + 1`, and so on.
    pub fn faces_camera(self, node: Point3<i32>, camera: Point3<f32>) -> bool {
        match self {
            NodeSide::Front => camera.z > (node.z + 1) as f32,
            NodeSide::Back => camera.z < node.z as f32,
            NodeSide::Bottom => camera.y < node.y as f32,
            NodeSide::Top => camera.y > (node.y + 1) as f32,
            NodeSide::Left => camera.x < node.x as f32,
            NodeSide::Right => camera.x > (node.x + 1) as f32,
        }
    }

    /// Returns the four corner offsets of this face on the unit cube,
    /// counter-clockwise as seen from outside the node.
    pub fn corner_offsets(self) -> [Vector3<i32>; 4] {
        match self {
            NodeSide::Front => [
                Vector3::new(0, 0, 1),
                Vector3::new(1, 0, 1),
                Vector3::new(1, 1, 1),
                Vector3::new(0, 1, 1),
            ],
            NodeSide::Back => [
                Vector3::new(1, 0, 0),
                Vector3::new(0, 0, 0),
                Vector3::new(0, 1, 0),
                Vector3::new(1, 1, 0),
            ],
            NodeSide::Bottom => [
                Vector3::new(0, 0, 0),
                Vector3::new(1, 0, 0),
                Vector3::new(1, 0, 1),
                Vector3::new(0, 0, 1),
            ],
            NodeSide::Top => [
                Vector3::new(0, 1, 1),
                Vector3::new(1, 1, 1),
                Vector3::new(1, 1, 0),
                Vector3::new(0, 1, 0),
            ],
            NodeSide::Left => [
                Vector3::new(0, 0, 0),
                Vector3::new(0, 0, 1),
                Vector3::new(0, 1, 1),
                Vector3::new(0, 1, 0),
            ],
            NodeSide::Right => [
                Vector3::new(1, 0, 1),
                Vector3::new(1, 0, 0),
                Vector3::new(1, 1, 0),
                Vector3::new(1, 1, 1),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposites_are_involutions() {
        for side in NodeSide::all() {
            assert_eq!(side.opposite().opposite(), side);
            assert_eq!(side.offset() + side.opposite().offset(), Vector3::new(0, 0, 0));
        }
    }

    #[test]
    fn corners_lie_on_the_face_plane() {
        for side in NodeSide::all() {
            let offset = side.offset();
            for corner in side.corner_offsets() {
                // The corner's coordinate along the face axis matches
                // the face: 1 for positive faces, 0 for negative ones.
                let along = corner.x * offset.x.abs()
                    + corner.y * offset.y.abs()
                    + corner.z * offset.z.abs();
                let expected = if offset.x + offset.y + offset.z > 0 { 1 } else { 0 };
                assert_eq!(along, expected, "{side:?} corner {corner:?}");
            }
        }
    }

    #[test]
    fn outward_test_matches_face_plane() {
        let node = Point3::new(0, 0, 0);
        assert!(NodeSide::Front.faces_camera(node, Point3::new(0.5, 0.5, 2.0)));
        assert!(!NodeSide::Front.faces_camera(node, Point3::new(0.5, 0.5, 0.5)));
        assert!(NodeSide::Back.faces_camera(node, Point3::new(0.5, 0.5, -1.0)));
        assert!(NodeSide::Top.faces_camera(node, Point3::new(0.5, 3.0, 0.5)));
        assert!(!NodeSide::Bottom.faces_camera(node, Point3::new(0.5, 3.0, 0.5)));
    }
}
