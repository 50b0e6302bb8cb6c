//! photolum command-line interface.
//!
//! Run temperature sweeps from TOML configuration files:
//! ```sh
//! photolum-cli run job.toml
//! photolum-cli validate job.toml
//! photolum-cli materials
//! photolum-cli bandgap --material GaAs -t 4 77 300
//! ```

mod config;
mod runner;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use photolum_core::types::BandgapGuard;
use photolum_materials::provider::MaterialProvider;

#[derive(Parser)]
#[command(name = "photolum-cli")]
#[command(about = "photolum: temperature-dependent photoluminescence simulator")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a temperature sweep from a TOML configuration file.
    Run {
        /// Path to the job configuration file.
        config: PathBuf,
        /// Output directory (overrides config file setting).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate a configuration file without running the sweep.
    Validate {
        /// Path to the job configuration file.
        config: PathBuf,
    },
    /// List the built-in materials and their Varshni parameters.
    Materials,
    /// Print the Varshni bandgap of a built-in material.
    Bandgap {
        /// Material identifier (see `materials`).
        #[arg(short, long)]
        material: String,
        /// Temperatures in kelvin.
        #[arg(short, long = "temperature", num_args = 1.., required = true)]
        temperatures: Vec<f64>,
        /// Fail on T = -beta or non-finite input instead of printing inf/NaN.
        #[arg(long)]
        strict: bool,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { config, output } => {
            println!("photolum PL Sweep");
            println!("=================");
            let job = config::load_config(&config)?;
            config::validate_job(&job)?;
            println!("Configuration: {}", config.display());

            let result = runner::run_simulation(&job)?;

            let out_dir = output.unwrap_or_else(|| PathBuf::from(&job.output.directory));

            if job.output.save_spectra {
                runner::write_spectra_csv(&result, &out_dir.join("spectra.csv"))?;
            }
            if job.output.save_bandgap {
                runner::write_bandgap_csv(&result.spectra, &out_dir.join("bandgap.csv"))?;
            }
            if job.output.save_json {
                runner::write_spectra_json(&result.spectra, &out_dir.join("spectra.json"))?;
            }
            if job.output.save_compact {
                runner::write_compact(&result.spectra, &out_dir.join("spectra_compact.csv"))?;
            }

            println!("Sweep complete.");
            Ok(())
        }
        Commands::Validate { config } => {
            let job = config::load_config(&config)?;
            config::validate_job(&job)?;
            println!("Configuration is valid: {}", config.display());
            Ok(())
        }
        Commands::Materials => {
            println!("Available materials:");
            println!();
            println!(
                "  {:<11} {:>8} {:>12} {:>8}   {}",
                "id", "Eg0 (eV)", "alpha (eV/K)", "beta (K)", "source"
            );
            for m in photolum_materials::catalogue() {
                let p = m.varshni();
                println!(
                    "  {:<11} {:>8.4} {:>12.4e} {:>8.0}   {}",
                    m.id(),
                    p.eg0,
                    p.alpha,
                    p.beta,
                    m.reference()
                );
            }
            Ok(())
        }
        Commands::Bandgap {
            material,
            temperatures,
            strict,
        } => {
            let material = photolum_materials::lookup(&material)?;
            let guard = if strict {
                BandgapGuard::Strict
            } else {
                BandgapGuard::Permissive
            };
            runner::render_bandgap_table(&material, &temperatures, guard, &mut std::io::stdout())
        }
    }
}
