//! Two-stage normalization.
//!
//! Stage A maps every raw reading into `0..=resolution` using that sensor's
//! own calibration bounds. Stage B stretches the Stage A snapshot again so the
//! weakest and strongest sensor of this cycle sit at `0` and `resolution`.

/// Integer linear map of `value` from `[in_min, in_max]` onto `[0, out_max]`.
///
/// A flat input range maps to 0. Values outside the input range are clamped.
pub fn map_range(value: u16, in_min: u16, in_max: u16, out_max: u16) -> u16 {
    if in_max <= in_min {
        return 0;
    }
    let value = value.clamp(in_min, in_max);
    let scaled = u32::from(value - in_min) * u32::from(out_max) / u32::from(in_max - in_min);
    // scaled <= out_max by construction
    scaled as u16
}

/// Run both stages over `current`, writing into `out`.
///
/// Each sensor's range is widened by its current reading, so a sample outside
/// the calibrated bounds still lands inside `0..=resolution`.
pub fn normalize<const N: usize>(
    current: &[u16; N],
    min_seen: &[u16; N],
    max_seen: &[u16; N],
    resolution: u16,
    out: &mut [u16; N],
) {
    for i in 0..N {
        let lo = current[i].min(min_seen[i]);
        let hi = current[i].max(max_seen[i]);
        out[i] = map_range(current[i], lo, hi, resolution);
    }

    let min_actual = out.iter().copied().min().unwrap_or(0);
    let max_actual = out.iter().copied().max().unwrap_or(0);

    for value in out.iter_mut() {
        *value = map_range(*value, min_actual, max_actual, resolution);
    }
}
