//! # Collision Module
//!
//! Discrete voxel-grid collision resolution for the player body.
//!
//! The resolver scans a 3x4x3 candidate box around the player's integer
//! position and resolves each axis sequentially - X, then Z, then Y,
//! never combined. Sequential resolution keeps each axis independent of
//! the others' outcome within the same tick and avoids tunneling
//! through diagonal corners at these speeds. The candidate list is
//! rebuilt from scratch every tick; there is no persistent collision
//! state.

use cgmath::{Point3, Vector3};

use crate::world::VoxelStore;

/// Clearance kept between the top of the head and a ceiling.
pub(crate) const HEADROOM: f32 = 0.2;

/// Residual downward displacement after a ceiling hit.
///
/// A small negative value rather than zero, so the very next tick does
/// not re-trigger the ceiling case and jitter against it.
pub(crate) const CEILING_EPSILON: f32 = -0.01;

/// Resolves a tentative per-axis displacement against the solid nodes
/// around the body.
///
/// # Arguments
/// * `position` - Current feet position; snapped in place on contact.
/// * `delta` - Tentative displacement for this tick; blocked axes are
///   zeroed (or set to the ceiling epsilon).
/// * `velocity` - Vertical velocity; zeroed on vertical contact.
/// * `size` - Horizontal body radius.
/// * `height` - Body height.
///
/// After the call, applying `delta` to `position` leaves no residual
/// interpenetration beyond the configured margins.
pub(crate) fn resolve<S: VoxelStore>(
    position: &mut Point3<f32>,
    delta: &mut Vector3<f32>,
    velocity: &mut f32,
    size: f32,
    height: f32,
    store: &S,
) {
    let base = Point3::new(
        position.x.floor() as i32,
        position.y.floor() as i32,
        position.z.floor() as i32,
    );

    let mut candidates = Vec::new();
    for x in (base.x - 1)..=(base.x + 1) {
        for y in (base.y - 2)..=(base.y + 1) {
            for z in (base.z - 1)..=(base.z + 1) {
                let probe = Point3::new(x, y, z);
                if let Some(node) = store.node_at(probe) {
                    if node.kind.solid() {
                        candidates.push(probe);
                    }
                }
            }
        }
    }

    for node in candidates {
        let nx = node.x as f32;
        let ny = node.y as f32;
        let nz = node.z as f32;

        // X axis: only when moving along X and the body's Z/Y extents
        // overlap the node's unit cube.
        if delta.x != 0.0
            && position.z + size > nz
            && position.z - size - 1.0 < nz
            && position.y + height + HEADROOM > ny
            && position.y - 1.0 < ny
        {
            if position.x + size + delta.x >= nx && position.x < nx + 0.5 {
                delta.x = 0.0;
                position.x = nx - size;
            } else if position.x - size + delta.x <= nx + 1.0 && position.x > nx + 0.5 {
                delta.x = 0.0;
                position.x = nx + 1.0 + size;
            }
        }

        // Z axis: symmetric to X with the roles swapped.
        if delta.z != 0.0
            && position.x + size > nx
            && position.x - size - 1.0 < nx
            && position.y + height + HEADROOM > ny
            && position.y - 1.0 < ny
        {
            if position.z + size + delta.z >= nz && position.z < nz + 0.5 {
                delta.z = 0.0;
                position.z = nz - size;
            } else if position.z - size + delta.z <= nz + 1.0 && position.z > nz + 0.5 {
                delta.z = 0.0;
                position.z = nz + 1.0 + size;
            }
        }

        // Y axis: when the horizontal extents overlap, the displacement
        // may cross the node's bottom face (rising into a ceiling) or
        // its top face (falling onto a floor).
        if position.x + size > nx
            && position.x - size - 1.0 < nx
            && position.z + size > nz
            && position.z - size - 1.0 < nz
        {
            if position.y < ny && position.y + height + HEADROOM + delta.y >= ny {
                delta.y = CEILING_EPSILON;
                *velocity = 0.0;
                position.y = ny - height - HEADROOM;
            }

            if position.y > ny && position.y + delta.y <= ny + 1.0 {
                delta.y = 0.0;
                *velocity = 0.0;
                position.y = ny + 1.0;
            }
        }
    }
}
