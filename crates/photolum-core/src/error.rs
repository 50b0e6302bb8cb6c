//! Errors raised by the simulation core.

use photolum_compute::ComputeError;
use thiserror::Error;

/// Invalid physical or numeric configuration.
///
/// Raised before any sampling happens; a failed call never yields a partial
/// spectrum or a partial sweep.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    #[error("steps must be at least 2 (got {steps})")]
    TooFewSteps { steps: usize },

    #[error("peak_fwhm must be positive (got {fwhm})")]
    NonPositiveFwhm { fwhm: f64 },

    #[error("window half_width must be positive and finite (got {half_width})")]
    InvalidWindow { half_width: f64 },

    #[error("window resolution must be at least 2 (got {resolution})")]
    InvalidResolution { resolution: usize },

    #[error("instrument_resolution must be finite and non-negative (got {value})")]
    InvalidInstrumentResolution { value: f64 },

    #[error("T + beta is zero at T = {temperature} K (beta = {beta} K)")]
    SingularBandgap { temperature: f64, beta: f64 },

    #[error("{field} must be finite")]
    NonFinite { field: &'static str },
}

/// Errors from a backend-driven sweep.
#[derive(Debug, Error)]
pub enum SimulationError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Compute backend error: {0}")]
    Compute(#[from] ComputeError),
}
