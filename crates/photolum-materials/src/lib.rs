//! # photolum Materials
//!
//! Material property providers for photolum. All materials implement the
//! [`MaterialProvider`](provider::MaterialProvider) trait, which supplies the
//! Varshni parameters of the bandgap.
//!
//! ## Available data sources
//!
//! | Source | Module | Status |
//! |--------|--------|--------|
//! | Vurgaftman et al. (III-V) | [`varshni`] | Implemented |
//! | Varshni (Si, Ge) | [`varshni`] | Implemented |
//!
//! Identifiers are resolved with [`varshni::lookup`].

pub mod provider;
pub mod varshni;

pub use provider::{MaterialError, MaterialProvider};
pub use varshni::{catalogue, lookup, VarshniMaterial};
