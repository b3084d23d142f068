//! Outlier-tolerant data ranges.
//!
//! A handful of extreme values should not dictate the color scale of a whole
//! mesh, so the data range of a scalar quantity is taken as an approximate
//! `[eps, 1 - eps]` quantile range rather than the raw min/max.

/// Default trim fraction used when building scalar quantities.
pub const DEFAULT_TRIM_FRACTION: f64 = 1e-5;

/// Returns a robust `(low, high)` range of `values`.
///
/// The lowest and highest `trim_fraction` of the sorted values are excluded.
/// With `trim_fraction == 0.0` the result is the exact `(min, max)`.
///
/// Non-finite values are ignored. If no finite value remains the result is
/// `(0.0, 0.0)`. The result always satisfies `low <= high`, with equality
/// when every value is the same.
pub fn robust_min_max(values: &[f64], trim_fraction: f64) -> (f64, f64) {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if sorted.is_empty() {
        return (0.0, 0.0);
    }
    sorted.sort_by(f64::total_cmp);

    let eps = if trim_fraction.is_nan() {
        0.0
    } else {
        trim_fraction.clamp(0.0, 0.5)
    };
    let last = (sorted.len() - 1) as f64;
    let low_ind = (eps * last).floor() as usize;
    let high_ind = ((1.0 - eps) * last).ceil() as usize;

    let low = sorted[low_ind];
    let high = sorted[high_ind.max(low_ind)];
    (low, high)
}
