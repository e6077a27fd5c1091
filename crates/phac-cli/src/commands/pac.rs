//! Phase-amplitude coupling between one pair of bands.

use super::common::{load_analyzer, parse_band, read_wav};
use clap::Args;
use phac_analysis::{EnvelopeMethod, FrequencyBand};
use std::path::{Path, PathBuf};

#[derive(Args)]
pub struct PacArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Phase band in Hz (LOW-HIGH)
    #[arg(long, value_parser = parse_band)]
    slow: FrequencyBand,

    /// Amplitude band in Hz (LOW-HIGH)
    #[arg(long, value_parser = parse_band)]
    fast: FrequencyBand,

    /// Envelope method (hilbert or max), overrides the config file
    #[arg(long)]
    envelope: Option<EnvelopeMethod>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: PacArgs, config: Option<&Path>) -> anyhow::Result<()> {
    let analyzer = load_analyzer(config, args.envelope)?;
    let (samples, sample_rate) = read_wav(&args.input)?;
    tracing::info!(
        file = %args.input.display(),
        samples = samples.len(),
        sample_rate,
        "loaded recording"
    );

    let signal = analyzer.signal(samples, sample_rate)?;
    let result = analyzer.analyze(&signal, args.slow, args.fast)?;

    if args.json {
        let json = serde_json::json!({
            "input": args.input,
            "sample_rate": sample_rate,
            "slow": [args.slow.left(), args.slow.right()],
            "fast": [args.fast.left(), args.fast.right()],
            "envelope": analyzer.envelope_method().as_str(),
            "modulation_index": result.modulation_index,
            "coherence": result.coherence(),
            "preferred_phase_deg": result.preferred_phase_degrees(),
            "phase_medians": result.phase_medians,
            "envelope_medians": result.envelope_medians,
        });
        println!("{}", serde_json::to_string_pretty(&json)?);
        return Ok(());
    }

    println!("Phase-amplitude coupling of {}", args.input.display());
    println!(
        "  {} samples, {} Hz, {:.2}s",
        signal.len(),
        sample_rate,
        signal.duration()
    );
    println!("  Phase band:      {}", args.slow);
    println!("  Amplitude band:  {}", args.fast);
    println!("  Envelope:        {}", analyzer.envelope_method());
    println!();
    println!("  Modulation index: {:.6}", result.modulation_index);
    println!("  Coherence:        {:.6}", result.coherence());
    println!("  Preferred phase:  {:.1}°", result.preferred_phase_degrees());

    println!("\n  {:>10}  {:>12}", "Phase (°)", "Envelope");
    println!("  {:>10}  {:>12}", "---------", "--------");
    for (phase, envelope) in result.phase_medians.iter().zip(&result.envelope_medians) {
        println!("  {:>10.1}  {:>12.6}", phase.to_degrees(), envelope);
    }

    Ok(())
}
