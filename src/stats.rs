//! Order statistics backing the robust scaler.

use std::cmp::Ordering;

/// Linear-interpolation quantile over a non-empty slice.
///
/// Matches the "linear" method used by common numeric libraries: the value at
/// fractional rank `q * (n - 1)` is interpolated between its two neighbors.
///
/// # Arguments
///
/// * `values` - The sample; does not need to be sorted.
/// * `q` - The quantile to compute, in `[0, 1]`.
pub fn quantile(values: &[f32], q: f32) -> f32 {
    assert!(!values.is_empty(), "quantile requires a non-empty slice");
    assert!((0.0..=1.0).contains(&q), "quantile fraction must be in [0, 1]");

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

    let rank = q as f64 * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        let weight = (rank - lo as f64) as f32;
        sorted[lo] + (sorted[hi] - sorted[lo]) * weight
    }
}

/// Median (0.5 quantile).
pub fn median(values: &[f32]) -> f32 {
    quantile(values, 0.5)
}

/// Interquartile range: 75th minus 25th percentile.
pub fn iqr(values: &[f32]) -> f32 {
    quantile(values, 0.75) - quantile(values, 0.25)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantile_interpolates() {
        let values = vec![1.0f32, 2.0, 3.0, 4.0];
        assert!((quantile(&values, 0.5) - 2.5).abs() < 1e-6);
        assert!((quantile(&values, 0.0) - 1.0).abs() < 1e-6);
        assert!((quantile(&values, 1.0) - 4.0).abs() < 1e-6);
    }

    #[test]
    fn quantile_unsorted_input() {
        let values = vec![4.0f32, 1.0, 3.0, 2.0];
        assert!((median(&values) - 2.5).abs() < 1e-6);
    }

    #[test]
    fn iqr_of_constant_is_zero() {
        let values = vec![7.0f32; 5];
        assert!(iqr(&values).abs() < 1e-6);
    }
}
