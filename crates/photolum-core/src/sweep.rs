//! Temperature sweeps.
//!
//! A sweep evaluates the Varshni bandgap at `steps` evenly spaced
//! temperatures and builds one spectrum per temperature. The whole
//! configuration is validated before the first sample, and the first
//! failing temperature aborts the sweep.
//!
//! [`run_temperature_sweep`] runs on the calling thread. [`TemperatureSweep`]
//! hands the intensity grid to a [`ComputeBackend`]; both paths evaluate the
//! same per-sample function and produce bit-identical spectra.

use std::sync::Arc;

use photolum_compute::{ComputeBackend, SerialBackend};

use crate::error::{DomainError, SimulationError};
use crate::spectrum::{energy_axis, SpectrumGenerator};
use crate::types::{MaterialParams, SimulationConfig, Spectrum};

/// Sweep `material` across the temperatures of `config`.
pub fn run_temperature_sweep(
    material: &MaterialParams,
    config: &SimulationConfig,
) -> Result<Vec<Spectrum>, DomainError> {
    config.validate()?;
    let generator = SpectrumGenerator::new(config)?;
    let temperatures = config.temperatures();
    log::debug!(
        "Sweeping {} temperatures from {} K to {} K ({} samples each)",
        temperatures.len(),
        config.t_min,
        config.t_max,
        config.window.resolution
    );

    temperatures
        .iter()
        .map(|&t| {
            log::trace!("Generating spectrum at T = {t} K");
            generator.generate(t, material)
        })
        .collect()
}

/// Backend-driven sweep.
pub struct TemperatureSweep {
    pub backend: Arc<dyn ComputeBackend>,
}

impl Default for TemperatureSweep {
    fn default() -> Self {
        Self {
            backend: Arc::new(SerialBackend),
        }
    }
}

impl TemperatureSweep {
    pub fn new(backend: Arc<dyn ComputeBackend>) -> Self {
        Self { backend }
    }

    /// Run the sweep, filling the `steps x resolution` intensity grid on the backend.
    pub fn run(
        &self,
        material: &MaterialParams,
        config: &SimulationConfig,
    ) -> Result<Vec<Spectrum>, SimulationError> {
        config.validate()?;
        let generator = SpectrumGenerator::new(config)?;
        let temperatures = config.temperatures();

        // Bandgaps first so that a guard failure aborts before any sampling.
        let bandgaps = temperatures
            .iter()
            .map(|&t| generator.bandgap(t, material))
            .collect::<Result<Vec<_>, _>>()?;

        let cols = generator.window().resolution;
        log::debug!(
            "Sweeping {} temperatures on {}",
            temperatures.len(),
            self.backend.device_info().name
        );
        let grid = self.backend.parallel_matrix_fill(temperatures.len(), cols, &|i, j| {
            generator.sample(bandgaps[i], j)
        })?;

        let spectra = temperatures
            .iter()
            .zip(&bandgaps)
            .zip(grid.chunks_exact(cols))
            .map(|((&temperature, &eg), row)| Spectrum {
                temperature,
                eg,
                energies: energy_axis(eg, generator.window()),
                intensities: row.to_vec(),
            })
            .collect();
        Ok(spectra)
    }
}
