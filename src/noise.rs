use crate::rng::{hash2, noise_seed};

#[inline]
fn smootherstep(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Clamp to `[0, 1]`. NaN collapses to 0 so it never leaks past a clamp.
#[inline]
pub fn clamp01(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

#[inline]
fn grad(hash: u32, dx: f64, dy: f64) -> f64 {
    // 16 evenly-spaced unit gradients (every 22.5°).
    match hash & 15 {
        0 => dx,
        1 => 0.924 * dx + 0.383 * dy,
        2 => 0.707 * (dx + dy),
        3 => 0.383 * dx + 0.924 * dy,
        4 => dy,
        5 => -0.383 * dx + 0.924 * dy,
        6 => 0.707 * (-dx + dy),
        7 => -0.924 * dx + 0.383 * dy,
        8 => -dx,
        9 => -0.924 * dx - 0.383 * dy,
        10 => 0.707 * (-dx - dy),
        11 => -0.383 * dx - 0.924 * dy,
        12 => -dy,
        13 => 0.383 * dx - 0.924 * dy,
        14 => 0.707 * (dx - dy),
        _ => 0.924 * dx - 0.383 * dy,
    }
}

/// 2D gradient noise (Perlin-style) over a hashed lattice.
///
/// Every integer lattice point evaluates to exactly 0. Output is clamped to
/// `[-1, 1]`; the raw range is about `[-0.707, 0.707]` before rescaling.
#[inline]
pub fn gradient_noise(x: f64, y: f64, seed: u32) -> f64 {
    let fx0 = x.floor();
    let fy0 = y.floor();
    // Lattice indices wrap; the fractional part comes from the float floor so
    // far-away coordinates keep their precision.
    let ix = fx0 as i64 as i32;
    let iy = fy0 as i64 as i32;
    let fx = x - fx0;
    let fy = y - fy0;
    let sx = smootherstep(fx);
    let sy = smootherstep(fy);

    let v00 = grad(hash2(ix, iy, seed), fx, fy);
    let v10 = grad(hash2(ix.wrapping_add(1), iy, seed), fx - 1.0, fy);
    let v01 = grad(hash2(ix, iy.wrapping_add(1), seed), fx, fy - 1.0);
    let v11 = grad(hash2(ix.wrapping_add(1), iy.wrapping_add(1), seed), fx - 1.0, fy - 1.0);

    let a = lerp(v00, v10, sx);
    let b = lerp(v01, v11, sx);
    let v = lerp(a, b, sy) * std::f64::consts::SQRT_2;
    if v.is_nan() { 0.0 } else { v.clamp(-1.0, 1.0) }
}

/// A seeded, immutable coherent noise function. Construct once per seed and
/// share by reference; sampling never mutates it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NoiseSource {
    seed: u32,
}

impl NoiseSource {
    pub fn new(seed: i32) -> Self {
        Self {
            seed: noise_seed(seed),
        }
    }

    /// Coherent noise in `[-1, 1]`.
    #[inline]
    pub fn noise2(&self, x: f64, z: f64) -> f64 {
        gradient_noise(x, z, self.seed)
    }
}

/// The three decorrelated sources a landform samples from: `main` drives the
/// octaves, `warp_x`/`warp_z` drive domain warp and plateau jitter.
#[derive(Clone, Copy, Debug)]
pub struct NoiseSet {
    seed: i32,
    pub main: NoiseSource,
    pub warp_x: NoiseSource,
    pub warp_z: NoiseSource,
}

impl NoiseSet {
    pub fn new(seed: i32) -> Self {
        Self {
            seed,
            main: NoiseSource::new(seed),
            warp_x: NoiseSource::new(seed.wrapping_add(1)),
            warp_z: NoiseSource::new(seed.wrapping_add(2)),
        }
    }

    pub fn seed(&self) -> i32 {
        self.seed
    }
}
