//! Synthetic PL spectrum generation.
//!
//! A spectrum is the Gaussian line of [`crate::lineshape`] sampled on an
//! evenly spaced energy axis centred on the Varshni bandgap.

use crate::bandgap::BandgapModel;
use crate::error::DomainError;
use crate::lineshape::GaussianLine;
use crate::types::{EnergyWindow, MaterialParams, SimulationConfig, Spectrum};

/// Energy of sample `i` of a `window` centred on `eg` (eV).
///
/// Both window edges are sampled exactly at `i = 0` and `i = resolution - 1`.
pub fn axis_point(eg: f64, window: &EnergyWindow, i: usize) -> f64 {
    let e_min = eg - window.half_width;
    let e_max = eg + window.half_width;
    e_min + (i as f64 / (window.resolution - 1) as f64) * (e_max - e_min)
}

/// The full energy axis of a `window` centred on `eg`.
pub fn energy_axis(eg: f64, window: &EnergyWindow) -> Vec<f64> {
    (0..window.resolution)
        .map(|i| axis_point(eg, window, i))
        .collect()
}

/// Builds spectra for a validated configuration.
///
/// Construction performs every lineshape check up front, so
/// [`SpectrumGenerator::generate`] can only fail on the bandgap guard.
#[derive(Debug, Clone, Copy)]
pub struct SpectrumGenerator {
    model: BandgapModel,
    line: GaussianLine,
    window: EnergyWindow,
}

impl SpectrumGenerator {
    pub fn new(config: &SimulationConfig) -> Result<Self, DomainError> {
        config.validate_lineshape()?;
        Ok(Self {
            model: BandgapModel::new(config.guard),
            line: GaussianLine::new(config.amplitude, config.effective_fwhm()),
            window: config.window,
        })
    }

    pub fn window(&self) -> &EnergyWindow {
        &self.window
    }

    /// Bandgap at `t` under the configured guard (eV).
    pub fn bandgap(&self, t: f64, material: &MaterialParams) -> Result<f64, DomainError> {
        self.model.evaluate(t, material)
    }

    /// Intensity of sample `i` for a line centred on `eg`.
    pub fn sample(&self, eg: f64, i: usize) -> f64 {
        self.line.intensity(axis_point(eg, &self.window, i), eg)
    }

    /// Spectrum at temperature `t`.
    pub fn generate(&self, t: f64, material: &MaterialParams) -> Result<Spectrum, DomainError> {
        let eg = self.bandgap(t, material)?;
        let energies = energy_axis(eg, &self.window);
        let intensities = energies.iter().map(|&e| self.line.intensity(e, eg)).collect();
        Ok(Spectrum {
            temperature: t,
            eg,
            energies,
            intensities,
        })
    }
}

/// Spectrum of `material` at temperature `t` (K).
///
/// Fails with a [`DomainError`] if `config.peak_fwhm` is not positive, the
/// energy window is invalid, or the strict bandgap guard rejects `t`.
pub fn generate_spectrum(
    t: f64,
    material: &MaterialParams,
    config: &SimulationConfig,
) -> Result<Spectrum, DomainError> {
    SpectrumGenerator::new(config)?.generate(t, material)
}
