//! Infrastructure adapters for Strata.
//!
//! This crate implements the ports defined in `strata-core::application::ports`
//! and the environment bootstrap around a generated project. It contains all
//! external dependencies and I/O operations.

pub mod bootstrap;
pub mod filesystem;

// Re-export commonly used adapters
pub use bootstrap::{BootstrapConfig, BootstrapError, BootstrapPlan, Bootstrapper, ProcessRunner};
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
