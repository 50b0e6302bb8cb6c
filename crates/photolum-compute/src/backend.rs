//! Compute backend trait and device abstraction.
//!
//! The [`ComputeBackend`] trait abstracts over execution environments so that
//! the spectrum code in `photolum-core` stays device-agnostic. A backend only
//! has to know how to evaluate a pure per-element function over a dense grid.

use thiserror::Error;

/// Errors originating from compute backends.
#[derive(Debug, Error)]
pub enum ComputeError {
    #[error("Backend not available: {0}")]
    Unavailable(String),

    #[error("Device error: {0}")]
    DeviceError(String),
}

/// Describes the capabilities of a compute backend.
#[derive(Debug, Clone)]
pub struct DeviceInfo {
    pub name: String,
    pub compute_units: Option<usize>,
}

/// Abstraction over compute backends.
///
/// Callers hand the backend a pure `fill_fn(row, col)`; the backend decides
/// how the grid is split across workers. Implementations must return the
/// values in row-major order and must not reorder or combine them, so the
/// output is identical to a serial loop over the same function.
pub trait ComputeBackend: Send + Sync {
    /// Return information about the device.
    fn device_info(&self) -> DeviceInfo;

    /// Evaluate `fill_fn` for every `(row, col)` of a `rows x cols` grid.
    ///
    /// The temperature sweep uses one row per temperature and one column per
    /// energy sample.
    fn parallel_matrix_fill(
        &self,
        rows: usize,
        cols: usize,
        fill_fn: &(dyn Fn(usize, usize) -> f64 + Send + Sync),
    ) -> Result<Vec<f64>, ComputeError>;
}

/// Backend that evaluates the grid on the calling thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct SerialBackend;

impl ComputeBackend for SerialBackend {
    fn device_info(&self) -> DeviceInfo {
        DeviceInfo {
            name: "Serial (calling thread)".into(),
            compute_units: Some(1),
        }
    }

    fn parallel_matrix_fill(
        &self,
        rows: usize,
        cols: usize,
        fill_fn: &(dyn Fn(usize, usize) -> f64 + Send + Sync),
    ) -> Result<Vec<f64>, ComputeError> {
        let mut data = Vec::with_capacity(rows * cols);
        for i in 0..rows {
            for j in 0..cols {
                data.push(fill_fn(i, j));
            }
        }
        Ok(data)
    }
}
