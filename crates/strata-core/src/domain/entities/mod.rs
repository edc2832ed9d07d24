pub mod common;
pub mod generated_state;
pub mod package_node;
pub mod scaffold_tree;

pub use crate::domain::DomainError;
pub use generated_state::GeneratedFilesystemState;
pub use package_node::PackageNode;
pub use scaffold_tree::ScaffoldTree;
