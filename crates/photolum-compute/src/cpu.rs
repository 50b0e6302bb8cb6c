//! CPU compute backend using Rayon for shared-memory parallelism.

use rayon::prelude::*;
use rayon::ThreadPool;

use crate::backend::{ComputeBackend, ComputeError, DeviceInfo};

/// CPU backend that parallelises work across threads via Rayon.
///
/// [`CpuBackend::new`] runs on Rayon's global pool; [`CpuBackend::with_threads`]
/// owns a dedicated pool so that a sweep can be limited without touching the
/// global configuration.
pub struct CpuBackend {
    num_threads: usize,
    pool: Option<ThreadPool>,
}

impl CpuBackend {
    /// Create a new CPU backend using all available threads.
    pub fn new() -> Self {
        Self {
            num_threads: rayon::current_num_threads(),
            pool: None,
        }
    }

    /// Create a CPU backend with a dedicated pool of `num_threads` workers.
    pub fn with_threads(num_threads: usize) -> Result<Self, ComputeError> {
        if num_threads == 0 {
            return Err(ComputeError::Unavailable(
                "CPU backend needs at least one thread".into(),
            ));
        }
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .thread_name(|i| format!("photolum-cpu-{i}"))
            .build()
            .map_err(|e| ComputeError::DeviceError(e.to_string()))?;
        log::debug!("Built dedicated Rayon pool with {num_threads} threads");
        Ok(Self {
            num_threads,
            pool: Some(pool),
        })
    }

    fn fill(
        rows: usize,
        cols: usize,
        fill_fn: &(dyn Fn(usize, usize) -> f64 + Send + Sync),
    ) -> Vec<f64> {
        // Indexed collect keeps row-major order regardless of scheduling.
        (0..rows * cols)
            .into_par_iter()
            .map(|idx| fill_fn(idx / cols, idx % cols))
            .collect()
    }
}

impl Default for CpuBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl ComputeBackend for CpuBackend {
    fn device_info(&self) -> DeviceInfo {
        DeviceInfo {
            name: format!("CPU ({} threads)", self.num_threads),
            compute_units: Some(self.num_threads),
        }
    }

    fn parallel_matrix_fill(
        &self,
        rows: usize,
        cols: usize,
        fill_fn: &(dyn Fn(usize, usize) -> f64 + Send + Sync),
    ) -> Result<Vec<f64>, ComputeError> {
        if cols == 0 {
            return Ok(Vec::new());
        }
        let data = match &self.pool {
            Some(pool) => pool.install(|| Self::fill(rows, cols, fill_fn)),
            None => Self::fill(rows, cols, fill_fn),
        };
        Ok(data)
    }
}
