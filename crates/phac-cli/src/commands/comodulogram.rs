//! Coupling table over two band series.

use super::common::{load_analyzer, parse_series, read_wav};
use clap::Args;
use phac_analysis::{EnvelopeMethod, FilterSeries};
use std::path::{Path, PathBuf};

#[derive(Args)]
pub struct ComodulogramArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Phase band series in Hz (MIN:MAX:WIDTH)
    #[arg(long, value_parser = parse_series)]
    slow: FilterSeries,

    /// Amplitude band series in Hz (MIN:MAX:WIDTH)
    #[arg(long, value_parser = parse_series)]
    fast: FilterSeries,

    /// Envelope method (hilbert or max), overrides the config file
    #[arg(long)]
    envelope: Option<EnvelopeMethod>,

    /// Output CSV file (stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub fn run(args: ComodulogramArgs, config: Option<&Path>) -> anyhow::Result<()> {
    let analyzer = load_analyzer(config, args.envelope)?;
    let (samples, sample_rate) = read_wav(&args.input)?;
    tracing::info!(
        file = %args.input.display(),
        slow_bands = args.slow.len(),
        fast_bands = args.fast.len(),
        "computing comodulogram"
    );

    let signal = analyzer.signal(samples, sample_rate)?;
    let como = analyzer.comodulogram(&signal, &args.slow, &args.fast)?;
    let csv = como.to_csv();

    match args.output {
        Some(path) => {
            std::fs::write(&path, csv)?;
            if let Some((slow_hz, fast_hz, mi)) = como.peak_coupling() {
                println!(
                    "Peak coupling {:.6} at {:.2} Hz phase / {:.2} Hz amplitude",
                    mi, slow_hz, fast_hz
                );
            }
            println!("Wrote {}x{} comodulogram to {}", args.slow.len(), args.fast.len(), path.display());
        }
        None => print!("{csv}"),
    }

    Ok(())
}
