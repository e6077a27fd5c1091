//! Synthetic recording generation command.

use super::common::{parse_pass_band, write_wav};
use clap::{Args, Subcommand};
use phac_analysis::models::{SinWithNoise, sin_with_noise, triangle_wave};
use phac_core::PassBand;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::PathBuf;

#[derive(Args)]
pub struct GenerateArgs {
    #[command(subcommand)]
    command: GenerateCommand,
}

#[derive(Subcommand)]
enum GenerateCommand {
    /// Generate a sinusoid plus band-limited noise modulated by its phase
    Coupled {
        /// Output WAV file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Frequency of the slow sinusoid in Hz
        #[arg(long, default_value = "20.0")]
        frequency: f64,

        /// Phase walk strength (frequency jitter)
        #[arg(long, default_value = "3.0")]
        dphi: f64,

        /// Noise band in Hz (LOW-HIGH, or LOW- for high-pass noise)
        #[arg(long, value_parser = parse_pass_band, default_value = "50-90", allow_hyphen_values = true)]
        noise_band: PassBand,

        /// Noise amplitude
        #[arg(long, default_value = "0.5")]
        amplitude: f64,

        /// Coupling strength (0-1)
        #[arg(long, default_value = "0.5")]
        coupling: f64,

        /// Duration in seconds
        #[arg(long, default_value = "10.0")]
        duration: f64,

        /// Sample rate
        #[arg(long, default_value = "256")]
        sample_rate: u32,

        /// Random seed
        #[arg(long, default_value = "42")]
        seed: u64,
    },

    /// Generate a jittered triangle wave
    Triangle {
        /// Output WAV file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Frequency in Hz
        #[arg(long, default_value = "10.0")]
        frequency: f64,

        /// Onset jitter as a fraction of the period
        #[arg(long, default_value = "0.05")]
        jitter: f64,

        /// Pulse length as a fraction of the period (0-1)
        #[arg(long, default_value = "0.5")]
        tilt: f64,

        /// Duration in seconds
        #[arg(long, default_value = "10.0")]
        duration: f64,

        /// Sample rate
        #[arg(long, default_value = "256")]
        sample_rate: u32,

        /// Random seed
        #[arg(long, default_value = "42")]
        seed: u64,
    },
}

fn time_axis(duration: f64, sample_rate: u32) -> Vec<f64> {
    let sr = f64::from(sample_rate);
    let n = (duration * sr).round() as usize;
    (0..n).map(|i| i as f64 / sr).collect()
}

fn describe_band(band: PassBand) -> String {
    match band {
        PassBand::Lowpass { cutoff_hz } => format!("below {cutoff_hz} Hz"),
        PassBand::Highpass { cutoff_hz } => format!("above {cutoff_hz} Hz"),
        PassBand::Bandpass { low_hz, high_hz } => format!("{low_hz}-{high_hz} Hz"),
    }
}

pub fn run(args: GenerateArgs) -> anyhow::Result<()> {
    match args.command {
        GenerateCommand::Coupled {
            output,
            frequency,
            dphi,
            noise_band,
            amplitude,
            coupling,
            duration,
            sample_rate,
            seed,
        } => {
            println!("Generating coupled signal...");
            println!(
                "  {} Hz sinusoid, noise {} with coupling {:.2}, {:.2}s at {} Hz",
                frequency,
                describe_band(noise_band),
                coupling,
                duration,
                sample_rate
            );

            let params = SinWithNoise {
                frequency,
                dphi,
                band: noise_band,
                amplitude,
                coupling,
            };
            let mut rng = StdRng::seed_from_u64(seed);
            let samples = sin_with_noise(&time_axis(duration, sample_rate), &params, &mut rng)?;

            write_wav(&output, &samples, sample_rate)?;
            println!("Wrote {} samples to {}", samples.len(), output.display());
        }

        GenerateCommand::Triangle {
            output,
            frequency,
            jitter,
            tilt,
            duration,
            sample_rate,
            seed,
        } => {
            println!("Generating triangle wave...");
            println!("  {} Hz, {:.2}s at {} Hz", frequency, duration, sample_rate);

            let mut rng = StdRng::seed_from_u64(seed);
            let mut samples = triangle_wave(&time_axis(duration, sample_rate), frequency, jitter, tilt, &mut rng)?;

            // Scale into [-1, 1]
            let peak = samples.iter().map(|s| s.abs()).fold(0.0, f64::max);
            if peak > 0.0 {
                for s in &mut samples {
                    *s /= peak;
                }
            }

            write_wav(&output, &samples, sample_rate)?;
            println!("Wrote {} samples to {}", samples.len(), output.display());
        }
    }

    Ok(())
}
