//! Varshni temperature dependence of the bandgap.
//!
//! $E_g(T) = E_{g0} - \frac{\alpha T^2}{T + \beta}$
//!
//! # Reference
//! Y. P. Varshni, *Physica* **34**, 149 (1967).

use crate::error::DomainError;
use crate::types::{BandgapGuard, MaterialParams};

/// Distance from the pole `T = -beta` (K) below which the strict guard fails.
pub const SINGULARITY_EPSILON: f64 = 1e-9;

/// Bandgap (eV) at temperature `t` (K).
///
/// No clamping and no guard: `t = -beta` yields an infinity or NaN, and NaN
/// inputs propagate.
pub fn bandgap_varshni(t: f64, material: &MaterialParams) -> f64 {
    material.eg0 - material.alpha * t * t / (t + material.beta)
}

/// Varshni model with a configurable guard on the denominator.
#[derive(Debug, Clone, Copy, Default)]
pub struct BandgapModel {
    pub guard: BandgapGuard,
}

impl BandgapModel {
    pub fn new(guard: BandgapGuard) -> Self {
        Self { guard }
    }

    pub fn strict() -> Self {
        Self::new(BandgapGuard::Strict)
    }

    /// Evaluate Eg at `t`, applying the guard first.
    pub fn evaluate(&self, t: f64, material: &MaterialParams) -> Result<f64, DomainError> {
        if self.guard == BandgapGuard::Strict {
            check_finite(t, "temperature")?;
            check_finite(material.eg0, "eg0")?;
            check_finite(material.alpha, "alpha")?;
            check_finite(material.beta, "beta")?;
            if (t + material.beta).abs() < SINGULARITY_EPSILON {
                return Err(DomainError::SingularBandgap {
                    temperature: t,
                    beta: material.beta,
                });
            }
        }
        Ok(bandgap_varshni(t, material))
    }
}

fn check_finite(value: f64, field: &'static str) -> Result<(), DomainError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(DomainError::NonFinite { field })
    }
}
