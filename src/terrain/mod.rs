//! # Terrain Module
//!
//! Deterministic, cache-backed procedural terrain heights.
//!
//! Heights are generated per 16x16 chunk: the four absolute chunk
//! corners are hashed to noise values, and the interior is filled by
//! cosine-smoothed bilinear interpolation. Adjacent chunks share their
//! absolute corner coordinates, so the surface is continuous across
//! chunk boundaries with no seams.
//!
//! ## Determinism
//!
//! `height(seed, x, z)` is a pure function: identical inputs always
//! yield identical outputs, cache-cold or cache-warm. The chunk cache
//! is plain memoization behind a bounded LRU, so eviction can only cost
//! recomputation, never change a value.

use std::cell::RefCell;
use std::num::NonZeroUsize;

use cgmath::Point2;
use lru::LruCache;

/// The dimension of a chunk along each horizontal axis, in columns.
pub const CHUNK_DIMENSION: i32 = 16;

/// A fully interpolated 16x16 grid of normalized heights, indexed
/// `[local_x][local_z]`.
pub type HeightChunk = [[f64; CHUNK_DIMENSION as usize]; CHUNK_DIMENSION as usize];

/// Scale applied to normalized heights when deriving block heights.
const HEIGHT_SCALE: f64 = 10.0;
/// Offset applied to scaled heights when deriving block heights.
const HEIGHT_OFFSET: f64 = 5.0;

/// Seeded terrain height generator with a bounded per-chunk cache.
///
/// # Examples
///
/// ```
/// use voxel_explorer::terrain::HeightMap;
///
/// let map = HeightMap::new(1, 64);
/// let h = map.height(0, 0);
/// assert!((0.0..1.0).contains(&h));
/// assert_eq!(map.absolute_height(0, 0), (10.0 * h + 5.0).floor() as i32);
/// ```
pub struct HeightMap {
    /// World seed feeding the corner hash.
    seed: i32,
    /// Memoized height grids keyed by chunk coordinates.
    ///
    /// Interior mutability keeps `height` callable through `&self`; the
    /// engine is single-threaded, so a `RefCell` is sufficient.
    cache: RefCell<LruCache<Point2<i32>, Box<HeightChunk>>>,
}

impl HeightMap {
    /// Creates a generator for the given seed.
    ///
    /// # Arguments
    /// * `seed` - World seed.
    /// * `cache_chunks` - Cache capacity in chunks; values below 1 are
    ///   raised to 1.
    pub fn new(seed: i32, cache_chunks: usize) -> Self {
        let capacity = NonZeroUsize::new(cache_chunks.max(1)).expect("capacity is at least 1");
        HeightMap {
            seed,
            cache: RefCell::new(LruCache::new(capacity)),
        }
    }

    /// Returns the world seed.
    pub fn seed(&self) -> i32 {
        self.seed
    }

    /// Returns the normalized terrain height of a world column.
    ///
    /// # Returns
    /// A value in `[0, 1)`. Total over all integer inputs; no error
    /// states.
    pub fn height(&self, x: i32, z: i32) -> f64 {
        let key = Point2::new(x.div_euclid(CHUNK_DIMENSION), z.div_euclid(CHUNK_DIMENSION));
        let local_x = x.rem_euclid(CHUNK_DIMENSION) as usize;
        let local_z = z.rem_euclid(CHUNK_DIMENSION) as usize;

        let mut cache = self.cache.borrow_mut();
        if let Some(grid) = cache.get(&key) {
            return grid[local_x][local_z];
        }

        let grid = self.generate_chunk(key);
        let value = grid[local_x][local_z];
        cache.put(key, grid);
        value
    }

    /// Returns the terrain surface height of a world column in blocks.
    ///
    /// Defined as `floor(10 * height + 5)`, which lands in `[5, 15]`
    /// for normalized heights in `[0, 1)`.
    pub fn absolute_height(&self, x: i32, z: i32) -> i32 {
        (HEIGHT_SCALE * self.height(x, z) + HEIGHT_OFFSET).floor() as i32
    }

    /// Interpolates the full 16x16 grid of a chunk from its corner
    /// noise values.
    ///
    /// Column interpolation runs along X between the two corner pairs,
    /// then each cell blends those column values along Z.
    fn generate_chunk(&self, key: Point2<i32>) -> Box<HeightChunk> {
        // Wrapping like the corner hash itself, so columns at the far
        // ends of the i32 range still generate instead of overflowing.
        let x0 = key.x.wrapping_mul(CHUNK_DIMENSION);
        let z0 = key.y.wrapping_mul(CHUNK_DIMENSION);
        let x1 = x0.wrapping_add(CHUNK_DIMENSION);
        let z1 = z0.wrapping_add(CHUNK_DIMENSION);
        let corners = [
            self.corner_noise(x0, z0),
            self.corner_noise(x1, z0),
            self.corner_noise(x0, z1),
            self.corner_noise(x1, z1),
        ];

        let mut grid: Box<HeightChunk> = Box::new([[0.0; 16]; 16]);
        for (local_x, column) in grid.iter_mut().enumerate() {
            let t = local_x as f64 / CHUNK_DIMENSION as f64;
            let a = interpolate(corners[0], corners[1], t);
            let b = interpolate(corners[2], corners[3], t);
            for (local_z, cell) in column.iter_mut().enumerate() {
                *cell = interpolate(a, b, local_z as f64 / CHUNK_DIMENSION as f64);
            }
        }
        grid
    }

    /// Hashes an absolute corner coordinate to a noise value in `[0, 1)`.
    ///
    /// All arithmetic wraps in `i32`, so the hash is identical on every
    /// platform and across sessions.
    fn corner_noise(&self, x: i32, z: i32) -> f64 {
        let k = x.wrapping_add(z.wrapping_mul(self.seed));
        let n = (k << 13) ^ k;
        let mixed = n
            .wrapping_mul(n)
            .wrapping_mul(60493)
            .wrapping_add(19990303)
            .wrapping_mul(n)
            .wrapping_add(1376312589)
            & 0x7fff_ffff;
        mixed as f64 / 2147483648.0
    }
}

/// Cosine-smoothed interpolation between two values.
///
/// Cosine smoothing (rather than linear) keeps the surface gradient
/// continuous at chunk edges, avoiding visible creases.
fn interpolate(a: f64, b: f64, t: f64) -> f64 {
    let f = (1.0 - (t * std::f64::consts::PI).cos()) * 0.5;
    a * (1.0 - f) + b * f
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interpolation_hits_endpoints_and_midpoint() {
        assert_eq!(interpolate(0.25, 0.75, 0.0), 0.25);
        assert_eq!(interpolate(0.25, 0.75, 1.0), 0.75);
        let mid = interpolate(0.0, 1.0, 0.5);
        assert!((mid - 0.5).abs() < 1e-12);
    }

    #[test]
    fn interpolation_stays_within_bounds() {
        for i in 0..=16 {
            let v = interpolate(0.2, 0.9, i as f64 / 16.0);
            assert!((0.2..=0.9).contains(&v));
        }
    }

    #[test]
    fn corner_noise_is_normalized_and_deterministic() {
        let map = HeightMap::new(1, 4);
        for (x, z) in [(0, 0), (16, 0), (-16, 48), (1024, -4096)] {
            let v = map.corner_noise(x, z);
            assert!((0.0..1.0).contains(&v), "noise({x}, {z}) = {v}");
            assert_eq!(v, map.corner_noise(x, z));
        }
    }

    #[test]
    fn extreme_coordinates_stay_total() {
        let map = HeightMap::new(1, 4);
        for (x, z) in [
            (i32::MAX, i32::MAX),
            (i32::MIN, i32::MIN),
            (i32::MAX, i32::MIN),
            (i32::MIN, 0),
        ] {
            let v = map.height(x, z);
            assert!((0.0..1.0).contains(&v), "height({x}, {z}) = {v}");
            assert_eq!(map.height(x, z), v);
        }
    }

    #[test]
    fn eviction_does_not_change_values() {
        // Capacity of one chunk forces eviction on every new chunk key.
        let map = HeightMap::new(1, 1);
        let first = map.height(3, 3);
        let _ = map.height(100, 100);
        let _ = map.height(-100, -100);
        assert_eq!(map.height(3, 3), first);
    }
}
