//! Core types shared across photolum.
//!
//! This module defines the value types that flow through the simulation
//! pipeline: material parameters, the sweep configuration, and the resulting
//! spectra. All of them are plain data, built per call and never mutated by
//! the core.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Varshni parameters of a semiconductor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialParams {
    /// Bandgap at T = 0 (eV).
    pub eg0: f64,
    /// Varshni coefficient (eV/K).
    pub alpha: f64,
    /// Varshni characteristic temperature (K). Must differ from `-T` at every
    /// sampled temperature.
    pub beta: f64,
}

impl MaterialParams {
    pub fn new(eg0: f64, alpha: f64, beta: f64) -> Self {
        Self { eg0, alpha, beta }
    }
}

/// Energy window sampled around the bandgap of each spectrum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnergyWindow {
    /// Half-width of the symmetric window around Eg (eV).
    pub half_width: f64,
    /// Number of evenly spaced samples, endpoints included.
    pub resolution: usize,
}

impl Default for EnergyWindow {
    fn default() -> Self {
        Self {
            half_width: 0.5,
            resolution: 400,
        }
    }
}

impl EnergyWindow {
    /// Spacing between adjacent energy samples (eV).
    pub fn spacing(&self) -> f64 {
        2.0 * self.half_width / (self.resolution.saturating_sub(1)).max(1) as f64
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if !self.half_width.is_finite() || self.half_width <= 0.0 {
            return Err(DomainError::InvalidWindow {
                half_width: self.half_width,
            });
        }
        if self.resolution < 2 {
            return Err(DomainError::InvalidResolution {
                resolution: self.resolution,
            });
        }
        Ok(())
    }
}

/// How the instrument resolution enters the lineshape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstrumentBroadening {
    /// The instrument resolution is carried but not applied.
    #[default]
    Ignore,
    /// Line and instrument widths combine in quadrature.
    Quadrature,
}

/// Guarding policy for the Varshni denominator `T + beta`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BandgapGuard {
    /// Return whatever IEEE-754 arithmetic yields, including infinities and NaN.
    #[default]
    Permissive,
    /// Reject singular or non-finite inputs with a [`DomainError`].
    Strict,
}

/// Parameters of a temperature sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// First temperature of the sweep (K).
    pub t_min: f64,
    /// Last temperature of the sweep (K). May equal or be below `t_min`.
    pub t_max: f64,
    /// Number of temperatures, endpoints included. At least 2.
    pub steps: usize,
    /// Full width at half maximum of the emission line (eV).
    pub peak_fwhm: f64,
    /// Peak intensity (a.u.).
    pub amplitude: f64,
    /// Instrument resolution (eV). Only used with [`InstrumentBroadening::Quadrature`].
    pub instrument_resolution: f64,
    pub window: EnergyWindow,
    pub broadening: InstrumentBroadening,
    pub guard: BandgapGuard,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            t_min: 100.0,
            t_max: 400.0,
            steps: 50,
            peak_fwhm: 0.05,
            amplitude: 1.0,
            instrument_resolution: 0.01,
            window: EnergyWindow::default(),
            broadening: InstrumentBroadening::default(),
            guard: BandgapGuard::default(),
        }
    }
}

impl SimulationConfig {
    /// Check the fields a single spectrum depends on.
    pub fn validate_lineshape(&self) -> Result<(), DomainError> {
        if self.peak_fwhm.is_nan() || self.peak_fwhm <= 0.0 {
            return Err(DomainError::NonPositiveFwhm {
                fwhm: self.peak_fwhm,
            });
        }
        if self.broadening == InstrumentBroadening::Quadrature
            && (!self.instrument_resolution.is_finite() || self.instrument_resolution < 0.0)
        {
            return Err(DomainError::InvalidInstrumentResolution {
                value: self.instrument_resolution,
            });
        }
        self.window.validate()
    }

    /// Check every field a sweep depends on.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.steps < 2 {
            return Err(DomainError::TooFewSteps { steps: self.steps });
        }
        self.validate_lineshape()
    }

    /// FWHM of the sampled Gaussian after instrument broadening (eV).
    pub fn effective_fwhm(&self) -> f64 {
        match self.broadening {
            InstrumentBroadening::Ignore => self.peak_fwhm,
            InstrumentBroadening::Quadrature => self.peak_fwhm.hypot(self.instrument_resolution),
        }
    }

    /// The sweep temperatures `t_min + i * dT` for `i in 0..steps`.
    ///
    /// The last value lands on `t_max` up to floating-point rounding.
    pub fn temperatures(&self) -> Vec<f64> {
        if self.steps == 0 {
            return Vec::new();
        }
        if self.steps == 1 {
            return vec![self.t_min];
        }
        let dt = (self.t_max - self.t_min) / (self.steps - 1) as f64;
        (0..self.steps).map(|i| self.t_min + i as f64 * dt).collect()
    }
}

/// A simulated PL spectrum at one temperature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spectrum {
    /// Temperature (K).
    pub temperature: f64,
    /// Bandgap at this temperature (eV); the line centre.
    pub eg: f64,
    /// Energy axis (eV), ascending and evenly spaced.
    pub energies: Vec<f64>,
    /// Intensity at each energy (a.u.), same length as `energies`.
    pub intensities: Vec<f64>,
}

impl Spectrum {
    pub fn len(&self) -> usize {
        self.energies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.energies.is_empty()
    }

    /// Energy and intensity of the brightest sample. NaN samples are skipped.
    pub fn peak(&self) -> Option<(f64, f64)> {
        self.peak_index()
            .map(|i| (self.energies[i], self.intensities[i]))
    }

    fn peak_index(&self) -> Option<usize> {
        let mut best: Option<usize> = None;
        for (i, &v) in self.intensities.iter().enumerate() {
            if v.is_nan() {
                continue;
            }
            match best {
                Some(b) if self.intensities[b] >= v => {}
                _ => best = Some(i),
            }
        }
        best
    }

    /// Width between the half-maximum crossings either side of the peak (eV).
    ///
    /// Crossings are located by linear interpolation between the bracketing
    /// samples. Returns `None` if the line is not fully inside the window.
    pub fn measured_fwhm(&self) -> Option<f64> {
        let p = self.peak_index()?;
        let half = self.intensities[p] / 2.0;
        if half.is_nan() || half <= 0.0 {
            return None;
        }

        let left = (0..p).rev().find(|&i| self.intensities[i] <= half)?;
        let right = (p + 1..self.len()).find(|&i| self.intensities[i] <= half)?;

        let cross = |lo: usize, hi: usize| {
            let (e0, e1) = (self.energies[lo], self.energies[hi]);
            let (i0, i1) = (self.intensities[lo], self.intensities[hi]);
            e0 + (half - i0) * (e1 - e0) / (i1 - i0)
        };
        Some(cross(right - 1, right) - cross(left, left + 1))
    }
}
