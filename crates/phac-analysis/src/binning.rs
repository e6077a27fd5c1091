//! Grouping of samples by phase.
//!
//! [`indices_of_binned_phase`] splits [0, 2π) into equal half-open bins and
//! returns, for each bin, the indices of the samples whose phase falls into
//! it. [`bin_medians`] then reduces any per-sample quantity to one value per
//! bin.

use crate::error::{PacError, Result};
use std::f64::consts::TAU;

/// Default number of phase bins.
pub const DEFAULT_NUM_BINS: usize = 18;

/// Number of phase bins used by the coupling pipeline.
pub const PAC_NUM_BINS: usize = 12;

/// Indices of `phase` grouped into `num_bins` equal bins over [0, 2π).
///
/// Within a bin, indices are ordered by increasing phase. Every index appears
/// in exactly one bin. Bins may be empty and need not be equally populated.
///
/// # Errors
///
/// `InvalidPhase` for any value outside [0, 2π) (including NaN),
/// `InvalidConfiguration` when `num_bins` is zero.
///
/// # Example
///
/// ```rust
/// use phac_analysis::binning::indices_of_binned_phase;
///
/// let bins = indices_of_binned_phase(&[4.0, 0.5, 3.5, 1.0], 2).unwrap();
/// assert_eq!(bins, vec![vec![1, 3], vec![2, 0]]);
/// ```
pub fn indices_of_binned_phase(phase: &[f64], num_bins: usize) -> Result<Vec<Vec<usize>>> {
    if num_bins == 0 {
        return Err(PacError::InvalidConfiguration(
            "number of phase bins must be positive".to_string(),
        ));
    }
    if let Some((index, &value)) = phase
        .iter()
        .enumerate()
        .find(|&(_, &p)| !(0.0..TAU).contains(&p))
    {
        return Err(PacError::InvalidPhase { index, value });
    }

    let mut sorting: Vec<usize> = (0..phase.len()).collect();
    sorting.sort_by(|&a, &b| phase[a].total_cmp(&phase[b]));

    // Rank of each bin edge: the number of sorted phases strictly below it.
    let step = TAU / num_bins as f64;
    let ranks: Vec<usize> = (0..=num_bins)
        .map(|k| {
            let edge = if k == num_bins { TAU } else { k as f64 * step };
            sorting.partition_point(|&i| phase[i] < edge)
        })
        .collect();

    Ok(ranks
        .windows(2)
        .map(|pair| sorting[pair[0]..pair[1]].to_vec())
        .collect())
}

/// Median of `values`, averaging the two middle entries for even lengths.
///
/// Returns `None` for an empty slice.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some(0.5 * (sorted[mid - 1] + sorted[mid]))
    } else {
        Some(sorted[mid])
    }
}

/// Median of `values` over each bin of indices.
///
/// # Errors
///
/// `EmptyPhaseBin` naming the first bin without samples.
pub fn bin_medians(values: &[f64], bins: &[Vec<usize>]) -> Result<Vec<f64>> {
    bins.iter()
        .enumerate()
        .map(|(bin, indices)| {
            let selected: Vec<f64> = indices.iter().map(|&i| values[i]).collect();
            median(&selected).ok_or(PacError::EmptyPhaseBin(bin))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_every_index_in_one_bin() {
        let phase: Vec<f64> = (0..100).map(|i| (i as f64 * 0.731).rem_euclid(TAU)).collect();
        let bins = indices_of_binned_phase(&phase, DEFAULT_NUM_BINS).unwrap();
        assert_eq!(bins.len(), 18);

        let mut seen: Vec<usize> = bins.iter().flatten().copied().collect();
        seen.sort_unstable();
        assert_eq!(seen, (0..100).collect::<Vec<_>>());

        let width = TAU / 18.0;
        for (k, bin) in bins.iter().enumerate() {
            for &i in bin {
                assert!(phase[i] >= k as f64 * width - 1e-12);
                assert!(phase[i] < (k + 1) as f64 * width + 1e-12);
            }
        }
    }

    #[test]
    fn test_one_value_per_bin() {
        let bins = indices_of_binned_phase(&[PI, 0.0, TAU - 0.1], 3).unwrap();
        assert_eq!(bins, vec![vec![1], vec![0], vec![2]]);
    }

    #[test]
    fn test_bins_sorted_by_phase() {
        let phase = [3.0, 0.2, 0.1, 3.1, 0.3];
        let bins = indices_of_binned_phase(&phase, 2).unwrap();
        assert_eq!(bins[0], vec![2, 1, 4, 0, 3]);
        assert!(bins[1].is_empty());
    }

    #[test]
    fn test_edge_value_goes_to_upper_bin() {
        let bins = indices_of_binned_phase(&[PI], 2).unwrap();
        assert!(bins[0].is_empty());
        assert_eq!(bins[1], vec![0]);
    }

    #[test]
    fn test_rejects_out_of_range_phase() {
        for bad in [-0.1, TAU, 7.0, f64::NAN] {
            let result = indices_of_binned_phase(&[1.0, bad], 12);
            assert!(
                matches!(result, Err(PacError::InvalidPhase { index: 1, .. })),
                "{bad} accepted"
            );
        }
    }

    #[test]
    fn test_rejects_zero_bins() {
        assert!(matches!(
            indices_of_binned_phase(&[1.0], 0),
            Err(PacError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_empty_phase_gives_empty_bins() {
        let bins = indices_of_binned_phase(&[], PAC_NUM_BINS).unwrap();
        assert_eq!(bins.len(), 12);
        assert!(bins.iter().all(Vec::is_empty));
    }

    #[test]
    fn test_median() {
        assert_eq!(median(&[]), None);
        assert_eq!(median(&[3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
    }

    #[test]
    fn test_bin_medians() {
        let values = [1.0, 5.0, 2.0, 8.0];
        let bins = vec![vec![0, 2], vec![1, 3, 0]];
        assert_eq!(bin_medians(&values, &bins).unwrap(), vec![1.5, 5.0]);

        let bins = vec![vec![0], vec![]];
        assert!(matches!(
            bin_medians(&values, &bins),
            Err(PacError::EmptyPhaseBin(1))
        ));
    }
}
