//! Compares the performance of a baseline and a changed language runtime.
//!
//! Benchmarks live in a [`registry::Registry`]; [`bench::Bench`] runs each
//! of them against both runtimes and collects a [`compare::Outcome`] per
//! benchmark, which [`format`] renders into the final report.

pub mod bench;
pub mod benchmarks;
pub mod compare;
pub mod error;
pub mod ext;
pub mod format;
pub mod measure;
pub mod options;
pub mod registry;
pub mod scope;
pub mod stats;

#[cfg(test)]
mod testing;

pub use error::{Error, Result};
