//! Material provider trait.
//!
//! All material data sources implement [`MaterialProvider`], which returns
//! the Varshni parameters consumed by `photolum-core`.

use photolum_core::types::MaterialParams;
use thiserror::Error;

/// Errors from material providers.
#[derive(Debug, Error)]
pub enum MaterialError {
    #[error("Material not found: '{0}'")]
    NotFound(String),
}

/// Provides the temperature dependence of a semiconductor's bandgap.
pub trait MaterialProvider: Send + Sync {
    /// Short identifier used in job files (e.g. "GaAs").
    fn id(&self) -> &str;

    /// Human-readable name of this material.
    fn name(&self) -> &str;

    /// Literature source of the parameters.
    fn reference(&self) -> &str;

    /// Varshni parameters.
    fn varshni(&self) -> MaterialParams;

    /// Bandgap at `t` kelvin (eV).
    ///
    /// Default implementation evaluates the permissive Varshni relation.
    fn bandgap(&self, t: f64) -> f64 {
        photolum_core::bandgap_varshni(t, &self.varshni())
    }
}
