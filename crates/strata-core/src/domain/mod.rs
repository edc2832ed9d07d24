//! Core domain layer for Strata.
//!
//! Pure layout logic: the compiled-in [`ScaffoldSpec`], the value objects it
//! is resolved with, and the [`ScaffoldTree`] it resolves to. No I/O happens
//! here; materializing a tree goes through the ports of the application
//! layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No I/O**: No filesystem, network, or process calls
//! - **Static data**: The specification is immutable and shared
//! - **Immutable entities**: All domain objects are Clone + PartialEq

pub mod entities;
pub mod error;
pub mod specification;
pub mod value_objects;

mod validation;

pub use entities::{
    GeneratedFilesystemState, PackageNode, ScaffoldTree, common::RelativePath,
};
pub use error::{DomainError, ErrorCategory};
pub use specification::{
    DESCRIPTIONS, DescriptionEntry, FALLBACK_DESCRIPTION, LayoutEntry, MAIN_LAYOUT, ROOT_LAYERS,
    ScaffoldSpec, SectionLayout, SpecEntry, TESTS_LAYOUT,
};
pub use validation::DomainValidator;
pub use value_objects::{MarkerFile, ProjectName, Section};
