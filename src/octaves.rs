use crate::config::Octave;
use crate::noise::NoiseSource;

/// Cubic ease `3n² − 2n³`.
#[inline]
pub fn smoothstep(n: f64) -> f64 {
    n * n * (3.0 - 2.0 * n)
}

/// Sums thresholded, eased octaves of the main noise at a warped coordinate.
///
/// Octave `i` samples at frequency `2^i` relative to `noise_scale`. The result
/// is unbounded; callers clamp before treating it as a fraction.
#[derive(Clone, Copy, Debug)]
pub struct OctaveCombiner<'a> {
    octaves: &'a [Octave],
    scale: f64,
}

impl<'a> OctaveCombiner<'a> {
    pub fn new(octaves: &'a [Octave], scale: f64) -> Self {
        Self { octaves, scale }
    }

    pub fn total(&self, main: &NoiseSource, warped_x: f64, warped_z: f64) -> f64 {
        let mut total = 0.0;
        let mut freq = 1.0;
        for octave in self.octaves {
            let raw = main.noise2(warped_x * self.scale * freq, warped_z * self.scale * freq);
            let n = (raw + 1.0) * 0.5;
            let n = (n - octave.threshold).max(0.0);
            total += octave.amplitude * smoothstep(n);
            freq *= 2.0;
        }
        total
    }
}
