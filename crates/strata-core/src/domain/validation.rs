use std::collections::HashSet;

use crate::domain::{
    entities::ScaffoldTree,
    error::DomainError,
    specification::ScaffoldSpec,
    value_objects::Section,
};

/// Centralized domain validation.
///
/// All validation logic lives here, not scattered across entities.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_spec(spec: &ScaffoldSpec) -> Result<(), DomainError> {
        spec.validate()
    }

    /// Structural checks on a resolved tree.
    ///
    /// Node identities and resolved paths are unique, every node lies under
    /// its section root, and every parent precedes its children.
    pub fn validate_tree(tree: &ScaffoldTree) -> Result<(), DomainError> {
        let mut keys = HashSet::new();
        let mut paths = HashSet::new();

        for node in tree.nodes() {
            let key = format!("{}:{}", node.section, node.relative_path);

            if !paths.insert(node.path.as_path()) {
                return Err(DomainError::DuplicatePath {
                    path: node.path.display().to_string(),
                });
            }

            let root = node.section.root(tree.output_root(), tree.project());
            if !node.path.starts_with(&root) {
                return Err(DomainError::AbsolutePathNotAllowed {
                    path: node.path.display().to_string(),
                });
            }

            if let Some(parent) = node.relative_path.parent() {
                let parent_key = format!("{}:{}", node.section, parent);
                if !keys.contains(&parent_key) {
                    return Err(DomainError::MissingChildReference {
                        section: node.section.to_string(),
                        path: node.relative_path.to_string(),
                    });
                }
            }

            if !keys.insert(key.clone()) {
                return Err(DomainError::DuplicatePath { path: key });
            }
        }

        for section in Section::ALL {
            if tree.section(section).next().is_none() {
                return Err(DomainError::MissingRoot {
                    section: section.to_string(),
                });
            }
        }

        Ok(())
    }
}
