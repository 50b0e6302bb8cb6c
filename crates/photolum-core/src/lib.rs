//! # photolum Core
//!
//! Forward simulation of temperature-dependent photoluminescence (PL)
//! spectra. The bandgap follows the Varshni relation, each emission line is a
//! Gaussian centred on the bandgap, and a sweep produces one spectrum per
//! temperature.
//!
//! ## Entry points
//!
//! - [`bandgap::bandgap_varshni`]: Eg(T) for a set of [`types::MaterialParams`].
//! - [`spectrum::generate_spectrum`]: one [`types::Spectrum`] at a temperature.
//! - [`sweep::run_temperature_sweep`]: spectra across a temperature range.
//!
//! Everything is a pure function of its inputs. Invalid configurations are
//! reported as [`error::DomainError`] before any sampling; other non-finite
//! values propagate into the output arrays untouched.
//!
//! ## Modules
//!
//! - [`types`]: Material parameters, sweep configuration, spectra.
//! - [`bandgap`]: Varshni model and its singularity guard.
//! - [`lineshape`]: Peak-normalised Gaussian line.
//! - [`spectrum`]: Energy axis sampling.
//! - [`sweep`]: Sequential and backend-driven temperature sweeps.
//! - [`error`]: Domain and simulation errors.

pub mod bandgap;
pub mod error;
pub mod lineshape;
pub mod spectrum;
pub mod sweep;
pub mod types;

pub use bandgap::{bandgap_varshni, BandgapModel};
pub use error::{DomainError, SimulationError};
pub use spectrum::{generate_spectrum, SpectrumGenerator};
pub use sweep::{run_temperature_sweep, TemperatureSweep};
pub use types::{
    BandgapGuard, EnergyWindow, InstrumentBroadening, MaterialParams, SimulationConfig, Spectrum,
};
