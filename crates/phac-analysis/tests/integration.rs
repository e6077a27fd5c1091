//! Integration tests for phac-analysis crate.
//!
//! Tests drive the public API end to end: synthetic signals with known
//! coupling go through filtering, phase binning and the coupling metrics.

use std::f64::consts::{FRAC_PI_2, PI, TAU};
use std::sync::Arc;

use phac_analysis::models::{SinWithNoise, sin_with_noise};
use phac_analysis::{
    AnalysisConfig, EnvelopeMethod, FilterSeries, FrequencyBand, PacAnalyzer, SegmentedHilbert, binned_modulation_index,
    downsample, phase_amplitude_coupling, phase_difference,
};
use phac_core::{CoefficientCache, PassBand};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn band(low: f64, high: f64) -> FrequencyBand {
    FrequencyBand::new(low, high).unwrap()
}

fn time_axis(sampling_rate: f64, seconds: f64) -> Vec<f64> {
    (0..(sampling_rate * seconds) as usize)
        .map(|i| i as f64 / sampling_rate)
        .collect()
}

/// Slow sine plus a fast carrier whose amplitude is `1 + depth * cos(phase - preferred)`.
fn coupled(sampling_rate: f64, seconds: f64, slow_hz: f64, fast_hz: f64, depth: f64, preferred: f64) -> Vec<f64> {
    time_axis(sampling_rate, seconds)
        .iter()
        .map(|&t| {
            let phase = TAU * slow_hz * t;
            let amplitude = 1.0 + depth * (phase - preferred).cos();
            phase.sin() + 0.5 * amplitude * (TAU * fast_hz * t).sin()
        })
        .collect()
}

/// Signed angular distance in (-π, π].
fn angle_between(a: f64, b: f64) -> f64 {
    let d = (a - b).rem_euclid(TAU);
    if d > PI { d - TAU } else { d }
}

// ===========================================================================
// 1. Coupling strength
// ===========================================================================

#[test]
fn modulation_index_grows_with_coupling() {
    let sr = 256.0;
    let t = time_axis(sr, 10.0);
    let mi = |coupling: f64| {
        let params = SinWithNoise {
            frequency: 20.0,
            dphi: 3.0,
            band: PassBand::from((40.0, 100.0)),
            amplitude: 0.5,
            coupling,
        };
        // Same seed: only the coupling differs between runs.
        let mut rng = StdRng::seed_from_u64(42);
        let x = sin_with_noise(&t, &params, &mut rng).unwrap();
        phase_amplitude_coupling(&x, sr, band(15.0, 25.0), band(55.0, 85.0))
            .unwrap()
            .modulation_index
    };

    let weak = mi(0.1);
    let medium = mi(0.5);
    let strong = mi(0.9);
    assert!(weak > 0.0);
    assert!(strong > medium, "{strong} <= {medium}");
    assert!(strong > 2.0 * weak, "{strong} vs {weak}");
}

#[test]
fn preferred_phase_of_sinus_example() {
    // Fast amplitude A0 + dA * (sin(phi - dphi) + 1)^4 peaks at phi = pi/2 + dphi.
    let sr = 128.0;
    let dphi = -128f64.to_radians();
    let mut rng = StdRng::seed_from_u64(7);
    let noise = Normal::new(0.0, 0.2).unwrap();

    let x: Vec<f64> = time_axis(sr, 20.0)
        .iter()
        .map(|&t| {
            let phi = TAU * 2.0 * t;
            let slow = phi.sin() + noise.sample(&mut rng);
            let amplitude = 0.1 + 0.2 * ((phi - dphi).sin() + 1.0).powi(4) + noise.sample(&mut rng);
            let fast = amplitude * (TAU * 25.0 * t).sin() + noise.sample(&mut rng);
            slow + fast
        })
        .collect();

    let result = phase_amplitude_coupling(&x, sr, band(1.5, 4.0), band(10.0, 30.0)).unwrap();
    let expected = FRAC_PI_2 + dphi;
    let error = angle_between(result.preferred_phase(), expected);
    assert!(
        error.abs() < 20f64.to_radians(),
        "preferred phase {:.1}° vs {:.1}°",
        result.preferred_phase_degrees(),
        expected.to_degrees()
    );
    assert!(result.is_significant(0.01));
}

#[test]
fn analyzer_index_matches_binned_index() {
    let sr = 256.0;
    let x = coupled(sr, 10.0, 6.0, 60.0, 0.6, 1.0);
    let analyzer = PacAnalyzer::new();
    let signal = analyzer.signal(x, sr).unwrap();
    let slow = band(4.0, 8.0);
    let fast = band(50.0, 70.0);

    let result = analyzer.analyze(&signal, slow, fast).unwrap();
    let phase = signal.phase(slow).unwrap();
    let envelope = signal.envelope(fast, EnvelopeMethod::Hilbert).unwrap();
    let direct = binned_modulation_index(&phase, &envelope).unwrap();
    assert!((result.modulation_index - direct).abs() < 1e-12);
}

// ===========================================================================
// 2. Long recordings and resampling
// ===========================================================================

#[test]
fn segmented_and_direct_transforms_agree_on_long_recording() {
    let sr = 1000.0;
    let x = coupled(sr, 20.0, 6.0, 60.0, 0.7, 0.0);
    assert!(x.len() > 8192, "default segmentation must kick in");

    let segmented = PacAnalyzer::new();
    let direct = PacAnalyzer::from_config(&AnalysisConfig {
        segment_len: 32768,
        overlap_len: 1024,
        ..AnalysisConfig::default()
    })
    .unwrap();

    let slow = band(4.0, 8.0);
    let fast = band(50.0, 70.0);
    let a = segmented.analyze(&segmented.signal(x.clone(), sr).unwrap(), slow, fast).unwrap();
    let b = direct.analyze(&direct.signal(x, sr).unwrap(), slow, fast).unwrap();
    let relative = (a.modulation_index - b.modulation_index).abs() / b.modulation_index;
    assert!(relative < 0.1, "{} vs {}", a.modulation_index, b.modulation_index);
}

#[test]
fn coupling_survives_downsampling() {
    let sr = 1000.0;
    let x = coupled(sr, 10.0, 6.0, 60.0, 0.8, 0.0);
    let y = downsample(&x, sr, 250.0, 100.0).unwrap();
    assert_eq!(y.len(), 2500);

    let result = phase_amplitude_coupling(&y, 250.0, band(4.0, 8.0), band(50.0, 70.0)).unwrap();
    assert!(result.modulation_index > 0.01);
}

// ===========================================================================
// 3. Configuration and shared state
// ===========================================================================

#[test]
fn analyzer_from_toml_config() {
    let config = AnalysisConfig::from_toml("num_bins = 18\nenvelope = \"max\"\n").unwrap();
    let analyzer = PacAnalyzer::from_config(&config).unwrap();
    assert_eq!(analyzer.num_bins(), 18);
    assert_eq!(analyzer.envelope_method(), EnvelopeMethod::Max);

    let sr = 1000.0;
    let signal = analyzer.signal(coupled(sr, 5.0, 6.0, 60.0, 0.8, 0.0), sr).unwrap();
    let result = analyzer.analyze(&signal, band(4.0, 8.0), band(50.0, 70.0)).unwrap();
    assert_eq!(result.phase_medians.len(), 18);
    assert_eq!(result.envelope_medians.len(), 18);
}

#[test]
fn analyzers_share_a_cache() {
    let cache = Arc::new(CoefficientCache::new(16));
    let first = PacAnalyzer::new().with_cache(Arc::clone(&cache));
    let second = PacAnalyzer::new().with_cache(Arc::clone(&cache));

    let sr = 256.0;
    let x = coupled(sr, 4.0, 6.0, 60.0, 0.5, 0.0);
    let slow = band(4.0, 8.0);
    let fast = band(50.0, 70.0);
    first.analyze(&first.signal(x.clone(), sr).unwrap(), slow, fast).unwrap();
    second.analyze(&second.signal(x, sr).unwrap(), slow, fast).unwrap();

    let stats = cache.stats();
    assert_eq!(stats.misses, 2);
    assert_eq!(stats.hits, 2);
}

// ===========================================================================
// 4. Comodulogram and phase utilities
// ===========================================================================

#[test]
fn comodulogram_from_equidistant_lists() {
    let sr = 500.0;
    let x = coupled(sr, 6.0, 6.0, 50.0, 0.9, 0.0);
    let slow = FilterSeries::from_equidistant_list(&[4.0, 6.0, 8.0]).unwrap();
    let fast = FilterSeries::from_equidistant_list(&[40.0, 50.0, 60.0]).unwrap();

    let analyzer = PacAnalyzer::new();
    let signal = analyzer.signal(x, sr).unwrap();
    let como = analyzer.comodulogram(&signal, &slow, &fast).unwrap();
    assert_eq!(como.dimensions(), (slow.len(), fast.len()));
    assert_eq!(como.slow_frequencies, slow.centers());

    let csv = como.to_csv();
    assert!(csv.starts_with("slow_hz,40.00,45.00"));
    assert_eq!(csv.lines().count(), slow.len() + 1);
}

#[test]
fn phase_difference_of_sine_and_cosine() {
    let sr = 256.0;
    let t = time_axis(sr, 8.0);
    let sine = phac_analysis::Signal::new(t.iter().map(|&t| (TAU * 10.0 * t).sin()).collect::<Vec<_>>(), sr).unwrap();
    let cosine = phac_analysis::Signal::new(t.iter().map(|&t| (TAU * 10.0 * t).cos()).collect::<Vec<_>>(), sr).unwrap();

    let b = band(8.0, 12.0);
    let d = phase_difference(&sine.phase(b).unwrap(), &cosine.phase(b).unwrap()).unwrap();
    let n = d.len();
    for &v in &d[n / 10..n * 9 / 10] {
        assert!((v + FRAC_PI_2).abs() < 1e-2, "{v}");
    }
}

#[test]
fn custom_segmentation_on_signal() {
    let sr = 256.0;
    let x = coupled(sr, 10.0, 6.0, 60.0, 0.5, 0.0);
    let signal = phac_analysis::Signal::new(x, sr)
        .unwrap()
        .with_segmentation(SegmentedHilbert::new(1024, 128).unwrap());
    let envelope = signal.envelope(band(50.0, 70.0), EnvelopeMethod::Hilbert).unwrap();
    assert_eq!(envelope.len(), signal.len());
    assert!(envelope.iter().all(|e| e.is_finite() && *e >= 0.0));
}
