//! # Frustum Module
//!
//! The four-plane frustum approximation used to reject off-screen
//! geometry. Corner direction vectors are built from the camera's
//! forward vector, the focal length, and the half-viewport extents;
//! crossing consecutive corners yields four inward-facing side planes.
//!
//! This is deliberately an approximation, not a 6-plane perspective
//! frustum: near/far rejection is handled by the distance and
//! rear-margin tests, and the plane comparison uses an empirical
//! margin rather than an exact half-space test. Cheap, and tuned to
//! never cull geometry the projection step could still place on screen.

use cgmath::{InnerSpace, Vector3};

use super::camera::CameraPose;

/// Margin for the side-plane rejection test: a node is rejected when
/// its offset's dot product with any plane normal exceeds this value.
pub const FRUSTUM_PLANE_MARGIN: f32 = 0.866;

/// The four side planes of the camera's visible volume.
#[derive(Debug, Clone, Copy)]
pub struct Frustum {
    /// Inward-facing plane normals, one per viewport edge.
    pub planes: [Vector3<f32>; 4],
}

impl Frustum {
    /// Builds the side planes for a camera pose and viewport.
    ///
    /// Every plane is scaled by the first plane's inverse magnitude, so
    /// the margin test keeps one fixed threshold across all four
    /// planes. A degenerate magnitude yields zero planes, which reject
    /// nothing.
    pub fn new(camera: &CameraPose, focal_length: f32, half_width: f32, half_height: f32) -> Self {
        // Side vector in the horizontal plane, perpendicular to the
        // facing direction.
        let vx = Vector3::new(camera.n2d.y, 0.0, -camera.n2d.x);
        // Screen-up vector, perpendicular to both forward and side.
        let vy = Vector3::new(
            camera.n3d.y * vx.z,
            camera.n3d.z * vx.x - camera.n3d.x * vx.z,
            -camera.n3d.y * vx.x,
        );

        let forward = camera.n3d * focal_length;
        let corners = [
            forward - vx * half_width + vy * half_height,
            forward + vx * half_width + vy * half_height,
            forward + vx * half_width - vy * half_height,
            forward - vx * half_width - vy * half_height,
        ];

        let mut planes = [Vector3::new(0.0, 0.0, 0.0); 4];
        let mut scale: Option<f32> = None;
        for (index, plane) in planes.iter_mut().enumerate() {
            let raw = corners[index].cross(corners[(index + 1) % 4]);
            let factor = *scale.get_or_insert_with(|| {
                let magnitude = raw.magnitude();
                if magnitude > f32::EPSILON {
                    1.0 / magnitude
                } else {
                    0.0
                }
            });
            *plane = raw * factor;
        }

        Frustum { planes }
    }

    /// Whether an offset from the camera lies outside any side plane.
    pub fn rejects(&self, offset: Vector3<f32>) -> bool {
        self.planes
            .iter()
            .any(|plane| plane.dot(offset) > FRUSTUM_PLANE_MARGIN)
    }
}
