//! Domain warp: nudge query coordinates with two auxiliary noise fields so
//! terrain features stop lining up with the noise lattice.

use crate::noise::NoiseSet;

pub const WARP_SCALE: f64 = 0.01;
pub const WARP_AMPLITUDE: f64 = 20.0;
/// Shifts the z-warp lookup into an unrelated region of its source.
const WARP_Z_OFFSET: f64 = 1000.0;

/// Warp displacement `(warp_x, warp_z)` at a world coordinate.
#[inline]
pub fn warp_offset(noise: &NoiseSet, x: f64, z: f64) -> (f64, f64) {
    let wx = noise.warp_x.noise2(x * WARP_SCALE, z * WARP_SCALE) * WARP_AMPLITUDE;
    let wz = noise
        .warp_z
        .noise2(x * WARP_SCALE + WARP_Z_OFFSET, z * WARP_SCALE + WARP_Z_OFFSET)
        * WARP_AMPLITUDE;
    (wx, wz)
}

/// The warped coordinate fed to the main noise.
#[inline]
pub fn warp(noise: &NoiseSet, x: f64, z: f64) -> (f64, f64) {
    let (wx, wz) = warp_offset(noise, x, z);
    (x + wx, z + wz)
}
