//! # Projection Module
//!
//! Screen-space projection of world vertices, with the per-frame
//! cache that lets the up-to-four faces sharing a vertex reuse one
//! camera transform and perspective divide.
//!
//! Screen coordinates are viewport-center-relative: x grows to the
//! right, y grows downward, and the screen origin is the crosshair.
//! A vertex behind the camera (or with a near-zero depth) is cached as
//! "unrenderable" so dependent faces skip it without recomputing.

use std::collections::HashMap;

use cgmath::Point3;

use super::camera::CameraPose;

/// Depth below which a projection is discarded as unrenderable rather
/// than risking division blowup near the camera plane.
const MIN_DEPTH: f32 = 1e-4;

/// A projected vertex in viewport-center-relative pixels.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    /// Horizontal offset from the viewport center, in pixels.
    pub x: f32,
    /// Vertical offset from the viewport center, positive downward.
    pub y: f32,
}

/// Per-frame memoization of vertex projections, keyed by integer world
/// coordinates.
#[derive(Debug, Default)]
pub(crate) struct ProjectionCache {
    entries: HashMap<Point3<i32>, Option<ScreenPoint>>,
}

impl ProjectionCache {
    /// Discards the previous frame's entries. Must run once per frame
    /// before any projection; entries are only valid for a single
    /// camera pose.
    pub fn begin_frame(&mut self) {
        self.entries.clear();
    }

    /// Number of distinct vertices transformed this frame.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Projects a world vertex for the current camera pose.
    ///
    /// # Returns
    /// The cached or freshly computed screen point, or `None` when the
    /// vertex is behind the camera or too close to the eye plane.
    pub fn project(
        &mut self,
        vertex: Point3<i32>,
        camera: &CameraPose,
        focal_length: f32,
    ) -> Option<ScreenPoint> {
        if let Some(&hit) = self.entries.get(&vertex) {
            return hit;
        }

        let dx = vertex.x as f32 - camera.position.x;
        let dy = vertex.y as f32 - camera.position.y;
        let dz = vertex.z as f32 - camera.position.z;

        // Yaw first: split the offset into right and horizontal-forward
        // components; then pitch mixes forward with height into the
        // camera-space depth.
        let right = dx * camera.cos_yaw + dz * camera.sin_yaw;
        let ahead = -dx * camera.sin_yaw + dz * camera.cos_yaw;
        let depth = ahead * camera.cos_pitch + dy * camera.sin_pitch;
        let raised = dy * camera.cos_pitch - ahead * camera.sin_pitch;

        let projected = if depth > MIN_DEPTH {
            Some(ScreenPoint {
                x: right * focal_length / depth,
                y: -raised * focal_length / depth,
            })
        } else {
            None
        };

        self.entries.insert(vertex, projected);
        projected
    }
}

/// Whether a convex screen quad contains a point, by sign agreement of
/// the four edge cross products. Points exactly on an edge count as
/// inside.
pub(crate) fn quad_contains(quad: &[ScreenPoint; 4], point: ScreenPoint) -> bool {
    let mut positive = false;
    let mut negative = false;
    for index in 0..4 {
        let a = quad[index];
        let b = quad[(index + 1) % 4];
        let cross = (b.x - a.x) * (point.y - a.y) - (b.y - a.y) * (point.x - a.x);
        if cross > 0.0 {
            positive = true;
        } else if cross < 0.0 {
            negative = true;
        }
    }
    !(positive && negative)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Rad;

    fn level_camera() -> CameraPose {
        CameraPose::new(Point3::new(0.0, 0.0, 0.0), Rad(0.0), Rad(0.0))
    }

    #[test]
    fn vertex_ahead_projects_onto_the_screen() {
        let camera = level_camera();
        let mut cache = ProjectionCache::default();
        let point = cache
            .project(Point3::new(0, 0, 5), &camera, 500.0)
            .expect("vertex ahead must project");
        assert_eq!(point, ScreenPoint { x: 0.0, y: 0.0 });

        let offset = cache
            .project(Point3::new(1, 1, 5), &camera, 500.0)
            .expect("vertex ahead must project");
        assert_eq!(offset.x, 100.0);
        assert_eq!(offset.y, -100.0);
    }

    #[test]
    fn vertex_behind_the_camera_is_unrenderable() {
        let camera = level_camera();
        let mut cache = ProjectionCache::default();
        assert!(cache.project(Point3::new(0, 0, -5), &camera, 500.0).is_none());
        // Degenerate depth right on the eye plane is discarded too.
        assert!(cache.project(Point3::new(3, 0, 0), &camera, 500.0).is_none());
    }

    #[test]
    fn projections_are_cached_per_frame() {
        let camera = level_camera();
        let mut cache = ProjectionCache::default();
        let _ = cache.project(Point3::new(0, 0, 5), &camera, 500.0);
        let _ = cache.project(Point3::new(0, 0, 5), &camera, 500.0);
        let _ = cache.project(Point3::new(0, 0, -5), &camera, 500.0);
        assert_eq!(cache.len(), 2);
        cache.begin_frame();
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn quad_containment_by_sign_agreement() {
        let quad = [
            ScreenPoint { x: -50.0, y: -50.0 },
            ScreenPoint { x: 50.0, y: -50.0 },
            ScreenPoint { x: 50.0, y: 50.0 },
            ScreenPoint { x: -50.0, y: 50.0 },
        ];
        assert!(quad_contains(&quad, ScreenPoint { x: 0.0, y: 0.0 }));
        assert!(quad_contains(&quad, ScreenPoint { x: 50.0, y: 0.0 }));
        assert!(!quad_contains(&quad, ScreenPoint { x: 51.0, y: 0.0 }));
        assert!(!quad_contains(&quad, ScreenPoint { x: 0.0, y: -80.0 }));

        // Winding direction must not matter.
        let reversed = [quad[3], quad[2], quad[1], quad[0]];
        assert!(quad_contains(&reversed, ScreenPoint { x: 0.0, y: 0.0 }));
        assert!(!quad_contains(&reversed, ScreenPoint { x: 51.0, y: 0.0 }));
    }
}
