//! # photolum Compute
//!
//! Compute backend abstraction for photolum. This crate provides a
//! [`ComputeBackend`](backend::ComputeBackend) trait that isolates the
//! spectrum code from how a sweep is scheduled.
//!
//! ## Available backends
//!
//! | Backend | Feature flag | Status |
//! |---------|-------------|--------|
//! | Serial (calling thread) | always | Implemented |
//! | CPU (Rayon) | `cpu` (default) | Implemented |

pub mod backend;

#[cfg(feature = "cpu")]
pub mod cpu;

pub use backend::{ComputeBackend, ComputeError, DeviceInfo, SerialBackend};

#[cfg(feature = "cpu")]
pub use cpu::CpuBackend;
