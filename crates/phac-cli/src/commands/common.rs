//! Shared CLI helpers used across multiple commands.

use anyhow::Context;
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use phac_analysis::{AnalysisConfig, EnvelopeMethod, FilterSeries, FrequencyBand, PacAnalyzer};
use phac_core::{FilterError, PassBand};
use std::path::Path;

/// Parse a `LOW-HIGH` band in Hz for clap's `value_parser`.
pub fn parse_band(s: &str) -> Result<FrequencyBand, String> {
    let (low, high) = s
        .split_once('-')
        .ok_or_else(|| format!("Invalid band '{}' (expected LOW-HIGH, e.g. 4-8)", s))?;
    let low = parse_hz(low)?;
    let high = parse_hz(high)?;
    FrequencyBand::new(low, high).map_err(|e| e.to_string())
}

/// Parse a filter band in Hz for clap's `value_parser`.
///
/// `LOW-HIGH` is a band-pass, `LOW-` a high-pass and `-HIGH` a low-pass.
pub fn parse_pass_band(s: &str) -> Result<PassBand, String> {
    let (low, high) = s
        .split_once('-')
        .ok_or_else(|| format!("Invalid band '{}' (expected LOW-HIGH, LOW- or -HIGH)", s))?;
    let edge = |text: &str| -> Result<Option<f64>, String> {
        if text.trim().is_empty() {
            Ok(None)
        } else {
            parse_hz(text).map(Some)
        }
    };
    let band = PassBand::from_edges(edge(low)?, edge(high)?).map_err(|e| e.to_string())?;
    match band.edges() {
        (Some(low), Some(high)) if low >= high => Err(FilterError::UnorderedEdges { low, high }.to_string()),
        _ => Ok(band),
    }
}

/// Parse a `MIN:MAX:WIDTH` band series in Hz for clap's `value_parser`.
pub fn parse_series(s: &str) -> Result<FilterSeries, String> {
    let parts: Vec<&str> = s.split(':').collect();
    let [min, max, width] = parts.as_slice() else {
        return Err(format!(
            "Invalid series '{}' (expected MIN:MAX:WIDTH, e.g. 4:12:2)",
            s
        ));
    };
    FilterSeries::new(parse_hz(min)?, parse_hz(max)?, parse_hz(width)?).map_err(|e| e.to_string())
}

fn parse_hz(s: &str) -> Result<f64, String> {
    s.trim()
        .parse()
        .map_err(|_| format!("Invalid frequency '{}'", s))
}

/// Build an analyzer from an optional config file and envelope override.
pub fn load_analyzer(config: Option<&Path>, envelope: Option<EnvelopeMethod>) -> anyhow::Result<PacAnalyzer> {
    let config = match config {
        Some(path) => AnalysisConfig::load(path).with_context(|| format!("loading config {}", path.display()))?,
        None => AnalysisConfig::default(),
    };
    let mut analyzer = PacAnalyzer::from_config(&config)?;
    if let Some(method) = envelope {
        analyzer.set_envelope_method(method);
    }
    tracing::debug!(
        num_bins = analyzer.num_bins(),
        envelope = %analyzer.envelope_method(),
        "analyzer ready"
    );
    Ok(analyzer)
}

/// Read the first channel of a WAV file as `f64` samples in [-1, 1].
///
/// Returns the samples and the sampling rate in Hz.
pub fn read_wav(path: &Path) -> anyhow::Result<(Vec<f64>, f64)> {
    let reader = WavReader::open(path).with_context(|| format!("opening {}", path.display()))?;
    let spec = reader.spec();
    let channels = usize::from(spec.channels.max(1));

    let samples: Vec<f64> = match spec.sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .step_by(channels)
            .map(|s| s.map(f64::from))
            .collect::<Result<_, _>>()?,
        SampleFormat::Int => {
            let max_val = f64::from(1u32 << (spec.bits_per_sample - 1));
            reader
                .into_samples::<i32>()
                .step_by(channels)
                .map(|s| s.map(|v| f64::from(v) / max_val))
                .collect::<Result<_, _>>()?
        }
    };

    if channels > 1 {
        tracing::info!(channels, "analysing first channel only");
    }
    Ok((samples, f64::from(spec.sample_rate)))
}

/// Write mono 32-bit float samples.
pub fn write_wav(path: &Path, samples: &[f64], sample_rate: u32) -> anyhow::Result<()> {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };
    let mut writer = WavWriter::create(path, spec).with_context(|| format!("creating {}", path.display()))?;
    for &sample in samples {
        writer.write_sample(sample as f32)?;
    }
    writer.finalize()?;
    Ok(())
}
