//! Gaussian emission lineshape.
//!
//! A single PL line is modelled as a Gaussian normalised to its peak:
//! $I(E) = A \exp\left(-\tfrac{1}{2}\left(\tfrac{E - E_g}{\sigma}\right)^2\right)$,
//! with $\sigma = \mathrm{FWHM} / (2\sqrt{2\ln 2})$.

/// Ratio FWHM / sigma of a Gaussian, $2\sqrt{2\ln 2}$.
pub fn fwhm_per_sigma() -> f64 {
    (8.0 * std::f64::consts::LN_2).sqrt()
}

/// Convert a full width at half maximum to the Gaussian standard deviation.
pub fn fwhm_to_sigma(fwhm: f64) -> f64 {
    fwhm / fwhm_per_sigma()
}

/// Peak-normalised Gaussian: 1 at `center`, 0.5 at `center ± fwhm / 2`.
pub fn gaussian(x: f64, center: f64, fwhm: f64) -> f64 {
    let z = (x - center) / fwhm_to_sigma(fwhm);
    (-0.5 * z * z).exp()
}

/// A Gaussian line with fixed width and amplitude.
#[derive(Debug, Clone, Copy)]
pub struct GaussianLine {
    pub amplitude: f64,
    pub fwhm: f64,
}

impl GaussianLine {
    pub fn new(amplitude: f64, fwhm: f64) -> Self {
        Self { amplitude, fwhm }
    }

    /// Intensity at `energy` for a line centred on `center`.
    pub fn intensity(&self, energy: f64, center: f64) -> f64 {
        self.amplitude * gaussian(energy, center, self.fwhm)
    }
}
