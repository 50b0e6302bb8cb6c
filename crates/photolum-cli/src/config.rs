//! TOML configuration deserialisation for sweep jobs.

use anyhow::Context;
use serde::Deserialize;

use photolum_core::types::{
    BandgapGuard, EnergyWindow, InstrumentBroadening, MaterialParams, SimulationConfig,
};
use photolum_materials::provider::MaterialProvider;

/// Top-level job configuration.
#[derive(Debug, Deserialize)]
pub struct JobConfig {
    pub material: MaterialSpec,
    pub simulation: SweepConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Material specification: either a built-in preset or explicit parameters.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum MaterialSpec {
    Preset {
        preset: String,
    },
    Custom {
        eg0: f64,
        alpha: f64,
        beta: f64,
    },
}

impl MaterialSpec {
    /// Resolve to a display label and Varshni parameters.
    pub fn resolve(&self) -> anyhow::Result<(String, MaterialParams)> {
        match self {
            MaterialSpec::Preset { preset } => {
                let material = photolum_materials::lookup(preset)
                    .with_context(|| "Run `photolum-cli materials` for valid identifiers")?;
                Ok((material.id().to_string(), material.varshni()))
            }
            MaterialSpec::Custom { eg0, alpha, beta } => {
                Ok(("custom".into(), MaterialParams::new(*eg0, *alpha, *beta)))
            }
        }
    }
}

/// Sweep parameters from TOML.
#[derive(Debug, Deserialize)]
pub struct SweepConfig {
    pub t_min: f64,
    pub t_max: f64,
    pub steps: usize,
    pub peak_fwhm: f64,
    #[serde(default = "default_amplitude")]
    pub amplitude: f64,
    #[serde(default)]
    pub instrument_resolution: f64,
    /// "ignore" (default) or "quadrature".
    #[serde(default)]
    pub broadening: InstrumentBroadening,
    #[serde(default = "default_half_width")]
    pub window_half_width: f64,
    #[serde(default = "default_resolution")]
    pub resolution: usize,
    /// Reject temperatures at the Varshni pole instead of emitting infinities.
    #[serde(default)]
    pub strict_bandgap: bool,
    /// Compute backend: "serial" or "cpu". Default: "serial".
    #[serde(default = "default_backend")]
    pub backend: String,
    /// Worker threads for the "cpu" backend. Default: Rayon's global pool.
    #[serde(default)]
    pub threads: Option<usize>,
}

fn default_amplitude() -> f64 {
    1.0
}
fn default_half_width() -> f64 {
    0.5
}
fn default_resolution() -> usize {
    400
}
fn default_backend() -> String {
    "serial".into()
}

/// Compute backend named by a job file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendChoice {
    Serial,
    Cpu { threads: Option<usize> },
}

impl SweepConfig {
    /// Parse `backend` and `threads` into a [`BackendChoice`].
    pub fn backend_choice(&self) -> anyhow::Result<BackendChoice> {
        match (self.backend.as_str(), self.threads) {
            ("serial", threads) => {
                if threads.is_some() {
                    log::warn!("'threads' is ignored by the serial backend");
                }
                Ok(BackendChoice::Serial)
            }
            ("cpu", threads) => Ok(BackendChoice::Cpu { threads }),
            (other, _) => anyhow::bail!(
                "Unsupported backend '{}'. Valid backends: serial, cpu",
                other
            ),
        }
    }

    /// Convert to the core configuration.
    pub fn to_simulation_config(&self) -> SimulationConfig {
        SimulationConfig {
            t_min: self.t_min,
            t_max: self.t_max,
            steps: self.steps,
            peak_fwhm: self.peak_fwhm,
            amplitude: self.amplitude,
            instrument_resolution: self.instrument_resolution,
            window: EnergyWindow {
                half_width: self.window_half_width,
                resolution: self.resolution,
            },
            broadening: self.broadening,
            guard: if self.strict_bandgap {
                BandgapGuard::Strict
            } else {
                BandgapGuard::Permissive
            },
        }
    }
}

/// Output configuration.
#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    /// Output directory (default: "./output").
    #[serde(default = "default_output_dir")]
    pub directory: String,
    /// Whether to save spectra as long-format CSV (default: true).
    #[serde(default = "default_true")]
    pub save_spectra: bool,
    /// Whether to save the Eg(T) table as CSV (default: true).
    #[serde(default = "default_true")]
    pub save_bandgap: bool,
    /// Whether to also save spectra as JSON (default: false).
    #[serde(default)]
    pub save_json: bool,
    /// Whether to save one `T=...,E:I,...` row per spectrum (default: false).
    #[serde(default)]
    pub save_compact: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_dir(),
            save_spectra: true,
            save_bandgap: true,
            save_json: false,
            save_compact: false,
        }
    }
}

fn default_output_dir() -> String {
    "./output".into()
}
fn default_true() -> bool {
    true
}

/// Parse a TOML job configuration from a string.
pub fn parse_config(content: &str) -> anyhow::Result<JobConfig> {
    let config: JobConfig = toml::from_str(content)?;
    Ok(config)
}

/// Load and parse a TOML job configuration file.
pub fn load_config(path: &std::path::Path) -> anyhow::Result<JobConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse_config(&content).with_context(|| format!("Invalid job file {}", path.display()))
}

/// Check everything a run would reject, without simulating.
pub fn validate_job(job: &JobConfig) -> anyhow::Result<()> {
    job.material.resolve()?;
    job.simulation.to_simulation_config().validate()?;
    job.simulation.backend_choice()?;
    Ok(())
}
