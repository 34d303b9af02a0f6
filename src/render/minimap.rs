//! # Minimap Module
//!
//! A small grayscale overhead view sampled straight from the heightmap
//! generator - purely a consumer of `height`, no new algorithm. The
//! bitmap covers the 4x4 block of chunks centered on the camera's
//! chunk, one pixel per world column.

use image::{GrayImage, Luma};

use super::camera::CameraPose;
use crate::terrain::{HeightMap, CHUNK_DIMENSION};

/// Edge length of the minimap bitmap in pixels.
pub const MINIMAP_SIZE: u32 = 64;

/// Chunks sampled along each minimap axis.
const MINIMAP_CHUNKS: i32 = 4;

/// Renders the minimap bitmap for a camera pose.
///
/// Shades sample the normalized height directly, quantized to 16 gray
/// levels (`16 * floor(16 * h)`). Sampling the block surface height
/// instead would collapse the relief into its ten possible levels, so
/// the finer normalized banding is kept even though block height is
/// what the rest of the engine consumes. North (-Z) is at the top of
/// the image.
pub fn minimap(map: &HeightMap, camera: &CameraPose) -> GrayImage {
    let camera_chunk_x = (camera.position.x / CHUNK_DIMENSION as f32).floor() as i32;
    let camera_chunk_z = (camera.position.z / CHUNK_DIMENSION as f32).floor() as i32;

    let mut image = GrayImage::new(MINIMAP_SIZE, MINIMAP_SIZE);
    for map_z in 0..MINIMAP_CHUNKS {
        for map_x in 0..MINIMAP_CHUNKS {
            let chunk_x = camera_chunk_x + map_x - MINIMAP_CHUNKS / 2;
            let chunk_z = camera_chunk_z + map_z - MINIMAP_CHUNKS / 2;
            for z in 0..CHUNK_DIMENSION {
                for x in 0..CHUNK_DIMENSION {
                    let height = map.height(
                        CHUNK_DIMENSION * chunk_x + x,
                        CHUNK_DIMENSION * chunk_z + z,
                    );
                    let shade = (16.0 * (height * 16.0).floor()) as u8;
                    let pixel_x = (CHUNK_DIMENSION * map_x + x) as u32;
                    let pixel_y = (CHUNK_DIMENSION * (MINIMAP_CHUNKS - 1 - map_z)
                        + (CHUNK_DIMENSION - 1 - z)) as u32;
                    image.put_pixel(pixel_x, pixel_y, Luma([shade]));
                }
            }
        }
    }
    image
}
