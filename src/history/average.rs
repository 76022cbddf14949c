//! Latency aggregation over a window.

/// Mean of the strictly positive samples.
///
/// Zero samples mean "down" or "no data" and are left out of both the sum and
/// the count. Returns `0.0` when no sample is positive.
pub fn up_average(samples: &[u64]) -> f64 {
    let (total, count) = samples
        .iter()
        .filter(|&&sample| sample > 0)
        .fold((0u128, 0u64), |(total, count), &sample| {
            (total + sample as u128, count + 1)
        });

    if count > 0 {
        total as f64 / count as f64
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn all_zero_window_averages_to_zero() {
        assert_eq!(up_average(&[0, 0, 0, 0, 0]), 0.0);
    }

    #[test]
    fn zeros_are_excluded() {
        let avg = up_average(&[10, 0, 0, 0, 10]);
        assert!((avg - 10.0).abs() < 1e-6, "expected 10, got {avg}");
    }

    #[test]
    fn empty_window_averages_to_zero() {
        assert_eq!(up_average(&[]), 0.0);
    }

    #[test]
    fn mixed_samples() {
        let avg = up_average(&[0, 100, 200, 0, 300]);
        assert!((avg - 200.0).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn average_matches_positive_samples(samples in proptest::collection::vec(0u64..100_000, 0..100)) {
            let avg = up_average(&samples);
            let positive: Vec<u64> = samples.iter().copied().filter(|&s| s > 0).collect();

            prop_assert!(avg.is_finite());
            if positive.is_empty() {
                prop_assert_eq!(avg, 0.0);
            } else {
                let expected = positive.iter().sum::<u64>() as f64 / positive.len() as f64;
                prop_assert!((avg - expected).abs() < 1e-6);
                let min = *positive.iter().min().unwrap() as f64;
                let max = *positive.iter().max().unwrap() as f64;
                prop_assert!(avg >= min - 1e-6 && avg <= max + 1e-6);
            }
        }
    }
}
