//! # Camera Pose Module
//!
//! The per-frame camera derivation: eye position plus yaw/pitch, with
//! the forward vectors and cached trigonometry every visibility and
//! projection step consumes.

use cgmath::{Point3, Rad, Vector2, Vector3};

use crate::player::Player;

/// A camera pose for one frame.
///
/// # Fields
/// - `n3d`: forward unit vector in 3D.
/// - `n2d`: horizontal forward unit vector, used by the chunk-level
///   rear-margin test where pitch should not matter.
#[derive(Debug, Clone, Copy)]
pub struct CameraPose {
    /// Eye position in world space.
    pub position: Point3<f32>,
    /// Horizontal rotation in radians.
    pub yaw: Rad<f32>,
    /// Vertical rotation in radians.
    pub pitch: Rad<f32>,
    /// Forward unit vector.
    pub n3d: Vector3<f32>,
    /// Horizontal forward unit vector (x, z).
    pub n2d: Vector2<f32>,
    pub(crate) sin_yaw: f32,
    pub(crate) cos_yaw: f32,
    pub(crate) sin_pitch: f32,
    pub(crate) cos_pitch: f32,
}

impl CameraPose {
    /// Derives a pose from an eye position and orientation.
    pub fn new(position: Point3<f32>, yaw: Rad<f32>, pitch: Rad<f32>) -> Self {
        let (sin_yaw, cos_yaw) = yaw.0.sin_cos();
        let (sin_pitch, cos_pitch) = pitch.0.sin_cos();
        CameraPose {
            position,
            yaw,
            pitch,
            n3d: Vector3::new(-cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw),
            n2d: Vector2::new(-sin_yaw, cos_yaw),
            sin_yaw,
            cos_yaw,
            sin_pitch,
            cos_pitch,
        }
    }

    /// Derives the frame pose from the player: the eye sits one body
    /// height above the feet.
    pub fn from_player(player: &Player) -> Self {
        Self::new(player.eye_position(), player.yaw, player.pitch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::InnerSpace;

    #[test]
    fn level_pose_faces_positive_z() {
        let pose = CameraPose::new(Point3::new(0.0, 0.0, 0.0), Rad(0.0), Rad(0.0));
        assert!((pose.n3d - Vector3::new(0.0, 0.0, 1.0)).magnitude() < 1e-6);
        assert!((pose.n2d - Vector2::new(0.0, 1.0)).magnitude() < 1e-6);
    }

    #[test]
    fn forward_vectors_are_unit_length() {
        for (yaw, pitch) in [(0.3, 0.0), (-2.1, 0.8), (3.0, -1.2)] {
            let pose = CameraPose::new(Point3::new(1.0, 2.0, 3.0), Rad(yaw), Rad(pitch));
            assert!((pose.n3d.magnitude() - 1.0).abs() < 1e-6);
            assert!((pose.n2d.magnitude() - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn pitch_tilts_the_forward_vector_up() {
        let pose = CameraPose::new(Point3::new(0.0, 0.0, 0.0), Rad(0.0), Rad(0.5));
        assert!(pose.n3d.y > 0.0);
        // The horizontal forward direction ignores pitch entirely.
        assert!((pose.n2d - Vector2::new(0.0, 1.0)).magnitude() < 1e-6);
    }
}
