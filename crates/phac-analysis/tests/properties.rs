//! Property-based tests for phac-analysis.
//!
//! Tests metric ranges, phase binning and the overlap-add window using
//! proptest for randomized inputs.

use phac_analysis::phase::wrap_phase;
use phac_analysis::{
    indices_of_binned_phase, modulation_index, normalize, phase_difference, shannon_entropy, trapezoid,
};
use proptest::prelude::*;
use std::f64::consts::{PI, TAU};

fn phases(max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-20.0f64..20.0, 1..max_len).prop_map(|v| v.into_iter().map(wrap_phase).collect())
}

fn amplitudes() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(0.01f64..10.0, 2..40)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn normalized_values_sum_to_one(values in amplitudes()) {
        let p = normalize(&values).unwrap();
        prop_assert!((p.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        prop_assert!(p.iter().all(|&x| x > 0.0 && x <= 1.0));
    }

    /// Entropy lies in [0, ln N] up to the log offset.
    #[test]
    fn entropy_is_bounded(values in amplitudes()) {
        let p = normalize(&values).unwrap();
        let h = shannon_entropy(&p).unwrap();
        prop_assert!(h >= -1e-8, "h={}", h);
        prop_assert!(h <= (p.len() as f64).ln() + 1e-8, "h={}", h);
    }

    #[test]
    fn modulation_index_is_bounded(values in amplitudes()) {
        let mi = modulation_index(&values).unwrap();
        prop_assert!((-1e-8..=1.0 + 1e-8).contains(&mi), "mi={}", mi);
    }

    /// Scaling all amplitudes leaves the index unchanged.
    #[test]
    fn modulation_index_is_scale_invariant(values in amplitudes(), scale in 0.1f64..100.0) {
        let scaled: Vec<f64> = values.iter().map(|v| v * scale).collect();
        let a = modulation_index(&values).unwrap();
        let b = modulation_index(&scaled).unwrap();
        prop_assert!((a - b).abs() < 1e-9);
    }

    /// Bins partition the indices, and each bin holds only phases within its range.
    #[test]
    fn binning_partitions_indices(phase in phases(300), num_bins in 1usize..30) {
        let bins = indices_of_binned_phase(&phase, num_bins).unwrap();
        prop_assert_eq!(bins.len(), num_bins);

        let mut seen: Vec<usize> = bins.iter().flatten().copied().collect();
        seen.sort_unstable();
        prop_assert_eq!(seen, (0..phase.len()).collect::<Vec<_>>());

        let width = TAU / num_bins as f64;
        for (k, bin) in bins.iter().enumerate() {
            for &i in bin {
                let lo = k as f64 * width;
                prop_assert!(phase[i] >= lo - 1e-12 && phase[i] < lo + width + 1e-12);
            }
            for pair in bin.windows(2) {
                prop_assert!(phase[pair[0]] <= phase[pair[1]]);
            }
        }
    }

    /// Overlapping trapezoid windows at hop `n - m` sum to one.
    #[test]
    fn trapezoid_overlaps_sum_to_one(m in 1usize..64, extra in 1usize..64) {
        let n = 2 * m + extra;
        let w = trapezoid(n, m).unwrap();
        prop_assert_eq!(w.len(), n);
        let hop = n - m;
        for k in 0..m {
            prop_assert!((w[hop + k] + w[k] - 1.0).abs() < 1e-12);
        }
        prop_assert!(w[m..hop].iter().all(|&v| v == 1.0));
    }

    #[test]
    fn phase_difference_stays_in_range(a in phases(100), shift in -10.0f64..10.0) {
        let b: Vec<f64> = a.iter().map(|&p| wrap_phase(p + shift)).collect();
        let d = phase_difference(&a, &b).unwrap();
        prop_assert!(d.iter().all(|&x| (-PI..PI).contains(&x)));
    }
}
