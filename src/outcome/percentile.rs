/// Percentile of an ascending-sorted slice, inclusive linear interpolation.
///
/// rank = p/100 * (n - 1); the result interpolates between the two
/// neighbouring order statistics. Matches numpy's default `linear` method.
/// `p` is clamped to [0, 100]. Returns NaN for an empty slice.
#[inline]
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return f64::NAN;
    }
    if n == 1 {
        return sorted[0];
    }

    let rank = (p.clamp(0.0, 100.0) / 100.0) * (n - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = (lo + 1).min(n - 1);
    let frac = rank - lo as f64;

    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_endpoints() {
        let v = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(percentile(&v, 0.0), 1.0);
        assert_eq!(percentile(&v, 100.0), 5.0);
        assert_eq!(percentile(&v, 50.0), 3.0);
    }

    #[test]
    fn test_linear_interpolation() {
        // numpy.percentile([10, 20, 30, 40], [2.5, 97.5]) -> [10.75, 39.25]
        let v = [10.0, 20.0, 30.0, 40.0];
        assert_relative_eq!(percentile(&v, 2.5), 10.75, epsilon = 1e-12);
        assert_relative_eq!(percentile(&v, 97.5), 39.25, epsilon = 1e-12);
        assert_relative_eq!(percentile(&v, 25.0), 17.5, epsilon = 1e-12);
    }

    #[test]
    fn test_degenerate_inputs() {
        assert!(percentile(&[], 50.0).is_nan());
        assert_eq!(percentile(&[42.0], 2.5), 42.0);
        assert_eq!(percentile(&[7.0, 7.0, 7.0], 97.5), 7.0);
    }
}
