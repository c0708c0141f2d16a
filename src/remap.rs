use crate::config::RemapKey;
use crate::noise::clamp01;

/// Piecewise-linear lookup through ordered `(position, threshold)` keys.
#[derive(Clone, Copy, Debug)]
pub struct VerticalRemapTable<'a> {
    keys: &'a [RemapKey],
}

impl<'a> VerticalRemapTable<'a> {
    pub fn new(keys: &'a [RemapKey]) -> Self {
        Self { keys }
    }

    /// Remap factor in `[0, 1]`; `1.0` when the table is empty.
    ///
    /// The first segment whose upper key is `>= v` wins. Queries past the last
    /// key take the last threshold instead of extrapolating, and a segment with
    /// duplicate positions interpolates with ratio 0.
    pub fn factor(&self, v: f64) -> f64 {
        let Some(last) = self.keys.last() else {
            return 1.0;
        };
        let mut factor = last.threshold;
        for pair in self.keys.windows(2) {
            let (lo, hi) = (pair[0], pair[1]);
            if v <= hi.position {
                let span = hi.position - lo.position;
                let ratio = if span == 0.0 { 0.0 } else { (v - lo.position) / span };
                factor = lo.threshold + (hi.threshold - lo.threshold) * ratio;
                break;
            }
        }
        clamp01(factor)
    }
}
