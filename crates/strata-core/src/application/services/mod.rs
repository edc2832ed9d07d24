//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "scaffold a project" or "list the layout".

pub mod layout_service;
pub mod scaffold_service;

pub use layout_service::{LayoutService, PackageInfo};
pub use scaffold_service::ScaffoldService;
