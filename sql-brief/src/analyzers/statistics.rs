//! Descriptive statistics over finite `f64` samples.

/// Arithmetic mean. Returns NaN for an empty slice.
pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n - 1 denominator).
///
/// Undefined below two observations.
pub(crate) fn sample_std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values);
    let sum_sq: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    Some((sum_sq / (values.len() - 1) as f64).sqrt())
}

/// Quantile of an ascending-sorted slice with linear interpolation between
/// the closest ranks. Returns NaN for an empty slice.
pub(crate) fn quantile(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let position = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let weight = position - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * weight
}

/// Integer counterpart of [`quantile`]: the interpolated value truncated
/// toward zero, computed without losing precision on large magnitudes.
/// Returns `None` for an empty slice.
pub(crate) fn quantile_i64(sorted: &[i64], q: f64) -> Option<i64> {
    if sorted.is_empty() {
        return None;
    }
    let position = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = sorted[position.floor() as usize];
    let upper = sorted[position.ceil() as usize];
    let weight = position - position.floor();

    let delta = (upper as i128 - lower as i128) as f64 * weight;
    let mut value = lower as i128 + delta.floor() as i128;
    if delta.fract() > 0.0 && value < 0 {
        value += 1;
    }
    Some(value.clamp(lower as i128, upper as i128) as i64)
}

/// Integer mean truncated toward zero. Returns `None` for an empty slice.
pub(crate) fn mean_i64(values: &[i64]) -> Option<i64> {
    if values.is_empty() {
        return None;
    }
    let sum: i128 = values.iter().map(|v| *v as i128).sum();
    Some((sum / values.len() as i128) as i64)
}
