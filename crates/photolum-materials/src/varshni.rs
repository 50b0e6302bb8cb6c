//! Tabulated Varshni parameters.
//!
//! III-V values are the recommended set of:
//! I. Vurgaftman, J. R. Meyer and L. R. Ram-Mohan, *J. Appl. Phys.* **89**, 5815 (2001).
//!
//! Si and Ge are Varshni's own fits:
//! Y. P. Varshni, *Physica* **34**, 149 (1967).
//!
//! ## Available materials
//!
//! | Identifier | Eg0 (eV) | alpha (meV/K) | beta (K) | Gap |
//! |-----------|----------|---------------|----------|-----|
//! | `GaAs` | 1.519 | 0.5405 | 204 | direct |
//! | `InP` | 1.4236 | 0.363 | 162 | direct |
//! | `InAs` | 0.417 | 0.276 | 93 | direct |
//! | `GaP` | 2.35 | 0.5771 | 372 | indirect (X) |
//! | `GaN` | 3.510 | 0.909 | 830 | direct (wurtzite) |
//! | `Si` | 1.1557 | 0.7021 | 1108 | indirect |
//! | `Ge` | 0.7412 | 0.4561 | 210 | indirect |
//! | `Perovskite` | 2.3 | 0.5 | 200 | demo values |

use photolum_core::types::MaterialParams;

use crate::provider::{MaterialError, MaterialProvider};

/// A material described by a fixed set of Varshni parameters.
#[derive(Debug, Clone)]
pub struct VarshniMaterial {
    id: String,
    name: String,
    reference: String,
    params: MaterialParams,
}

impl VarshniMaterial {
    /// Construct from explicit parameters.
    ///
    /// # Arguments
    /// * `id` - Identifier used for lookup.
    /// * `name` - Display name.
    /// * `reference` - Source of the parameters.
    /// * `params` - Varshni parameters (eV, eV/K, K).
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        reference: impl Into<String>,
        params: MaterialParams,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            reference: reference.into(),
            params,
        }
    }

    fn vurgaftman(id: &str, name: &str, eg0: f64, alpha_mev: f64, beta: f64) -> Self {
        Self::new(
            id,
            name,
            "Vurgaftman et al., J. Appl. Phys. 89, 5815 (2001)",
            MaterialParams::new(eg0, alpha_mev * 1e-3, beta),
        )
    }

    fn varshni_1967(id: &str, name: &str, eg0: f64, alpha: f64, beta: f64) -> Self {
        Self::new(
            id,
            name,
            "Varshni, Physica 34, 149 (1967)",
            MaterialParams::new(eg0, alpha, beta),
        )
    }

    /// Gallium arsenide, Γ-valley gap.
    pub fn gaas() -> Self {
        Self::vurgaftman("GaAs", "Gallium arsenide", 1.519, 0.5405, 204.0)
    }

    /// Indium phosphide, Γ-valley gap.
    pub fn inp() -> Self {
        Self::vurgaftman("InP", "Indium phosphide", 1.4236, 0.363, 162.0)
    }

    /// Indium arsenide, Γ-valley gap.
    pub fn inas() -> Self {
        Self::vurgaftman("InAs", "Indium arsenide", 0.417, 0.276, 93.0)
    }

    /// Gallium phosphide, indirect X-valley gap.
    pub fn gap() -> Self {
        Self::vurgaftman("GaP", "Gallium phosphide", 2.35, 0.5771, 372.0)
    }

    /// Wurtzite gallium nitride.
    pub fn gan() -> Self {
        Self::vurgaftman("GaN", "Gallium nitride (wurtzite)", 3.510, 0.909, 830.0)
    }

    /// Silicon, indirect gap.
    pub fn si() -> Self {
        Self::varshni_1967("Si", "Silicon", 1.1557, 7.021e-4, 1108.0)
    }

    /// Germanium, indirect gap.
    pub fn ge() -> Self {
        Self::varshni_1967("Ge", "Germanium", 0.7412, 4.561e-4, 210.0)
    }

    /// Default parameters of the perovskite demo page.
    pub fn perovskite_demo() -> Self {
        Self::new(
            "Perovskite",
            "Perovskite (demo)",
            "Illustrative values",
            MaterialParams::new(2.3, 5e-4, 200.0),
        )
    }
}

impl MaterialProvider for VarshniMaterial {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn reference(&self) -> &str {
        &self.reference
    }

    fn varshni(&self) -> MaterialParams {
        self.params
    }
}

/// Every built-in material, in display order.
pub fn catalogue() -> Vec<VarshniMaterial> {
    vec![
        VarshniMaterial::gaas(),
        VarshniMaterial::inp(),
        VarshniMaterial::inas(),
        VarshniMaterial::gap(),
        VarshniMaterial::gan(),
        VarshniMaterial::si(),
        VarshniMaterial::ge(),
        VarshniMaterial::perovskite_demo(),
    ]
}

/// Resolve a material identifier, ignoring ASCII case.
pub fn lookup(id: &str) -> Result<VarshniMaterial, MaterialError> {
    catalogue()
        .into_iter()
        .find(|m| m.id.eq_ignore_ascii_case(id.trim()))
        .ok_or_else(|| MaterialError::NotFound(id.to_string()))
}
