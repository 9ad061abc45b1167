//! Running per-sensor calibration bounds.

/// Lowest and highest raw reading seen per sensor since the last reset.
///
/// Bounds only ever widen. A fresh set starts at the sentinels
/// (`min = u16::MAX`, `max = 0`) so the first sample becomes both bounds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CalibrationBounds<const N: usize> {
    min: [u16; N],
    max: [u16; N],
    samples: u32,
}

impl<const N: usize> CalibrationBounds<N> {
    /// Bounds at their sentinels, no samples yet.
    pub const fn new() -> Self {
        Self {
            min: [u16::MAX; N],
            max: [0; N],
            samples: 0,
        }
    }

    /// Fold one snapshot into the bounds.
    pub fn widen(&mut self, snapshot: &[u16; N]) {
        for ((min, max), &value) in self.min.iter_mut().zip(self.max.iter_mut()).zip(snapshot) {
            *min = (*min).min(value);
            *max = (*max).max(value);
        }
        self.samples = self.samples.saturating_add(1);
    }

    /// Forget everything seen so far.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Lowest raw reading per sensor.
    pub fn min(&self) -> &[u16; N] {
        &self.min
    }

    /// Highest raw reading per sensor.
    pub fn max(&self) -> &[u16; N] {
        &self.max
    }

    /// Number of snapshots folded in since the last reset.
    pub fn samples(&self) -> u32 {
        self.samples
    }

    /// At least one snapshot has been folded in.
    pub fn is_calibrated(&self) -> bool {
        self.samples > 0
    }
}

impl<const N: usize> Default for CalibrationBounds<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_snapshot_sets_both_bounds() {
        let mut bounds = CalibrationBounds::<3>::new();
        assert!(!bounds.is_calibrated());

        bounds.widen(&[10, 500, 1023]);
        assert_eq!(bounds.min(), &[10, 500, 1023]);
        assert_eq!(bounds.max(), &[10, 500, 1023]);
        assert_eq!(bounds.samples(), 1);
    }

    #[test]
    fn bounds_never_narrow() {
        let mut bounds = CalibrationBounds::<2>::new();
        bounds.widen(&[100, 900]);
        bounds.widen(&[50, 950]);
        bounds.widen(&[70, 920]);

        assert_eq!(bounds.min(), &[50, 900]);
        assert_eq!(bounds.max(), &[100, 950]);
    }

    #[test]
    fn reset_restores_sentinels() {
        let mut bounds = CalibrationBounds::<2>::new();
        bounds.widen(&[100, 900]);
        bounds.reset();

        assert_eq!(bounds.min(), &[u16::MAX; 2]);
        assert_eq!(bounds.max(), &[0; 2]);
        assert_eq!(bounds.samples(), 0);
    }
}
