//! The compiled-in scaffold specification.
//!
//! Two static tables describe the whole layout:
//!
//! - [`MAIN_LAYOUT`] / [`TESTS_LAYOUT`]: for each package path, the names of
//!   its immediate children. A child without its own entry is a leaf.
//! - [`DESCRIPTIONS`]: the text bound to a package, keyed by the package path
//!   relative to the project root.
//!
//! Nothing here touches the filesystem. [`ScaffoldSpec::resolve`] turns the
//! tables into a [`ScaffoldTree`] for a concrete project name and output
//! root; [`ScaffoldSpec::validate`] is the integrity self-check run once at
//! startup.

use std::collections::{HashSet, VecDeque};
use std::path::Path;

use tracing::{debug, instrument};

use crate::domain::{
    entities::{PackageNode, ScaffoldTree, common::RelativePath},
    error::DomainError,
    value_objects::{ProjectName, Section},
};

// ── Table types ──────────────────────────────────────────────────────────────

/// One package of a section and the names of its immediate children.
#[derive(Debug, Clone, Copy)]
pub struct LayoutEntry {
    /// `/`-separated path from the section root; `""` is the root itself.
    pub path: &'static str,
    pub children: &'static [&'static str],
}

/// The layout of one section.
#[derive(Debug, Clone, Copy)]
pub struct SectionLayout {
    pub section: Section,
    pub entries: &'static [LayoutEntry],
}

/// Text bound to the package at `key` (relative to the project root).
#[derive(Debug, Clone, Copy)]
pub struct DescriptionEntry {
    pub key: &'static str,
    pub text: &'static str,
}

// ── Tables ───────────────────────────────────────────────────────────────────

/// The four layers the project root always expands to.
pub const ROOT_LAYERS: [&str; 4] = ["application", "domain", "infrastructure", "interfaces"];

/// Marker text for packages without a bound description.
pub const FALLBACK_DESCRIPTION: &str = "# No specific description for this package.\n";

pub static MAIN_LAYOUT: &[LayoutEntry] = &[
    LayoutEntry {
        path: "",
        children: &ROOT_LAYERS,
    },
    LayoutEntry {
        path: "domain",
        children: &["models", "exceptions", "repositories", "services"],
    },
    LayoutEntry {
        path: "infrastructure",
        children: &["adapters", "cache", "db", "repositories", "services"],
    },
    LayoutEntry {
        path: "interfaces",
        children: &["api_rest", "graphql", "cli"],
    },
    LayoutEntry {
        path: "interfaces/api_rest",
        children: &["models", "routes"],
    },
];

/// Only `domain` and `interfaces` are mirrored; they are the layers expected
/// to carry unit tests.
pub static TESTS_LAYOUT: &[LayoutEntry] = &[LayoutEntry {
    path: "",
    children: &["domain", "interfaces"],
}];

static BUILTIN_SECTIONS: &[SectionLayout] = &[
    SectionLayout {
        section: Section::Main,
        entries: MAIN_LAYOUT,
    },
    SectionLayout {
        section: Section::Tests,
        entries: TESTS_LAYOUT,
    },
];

pub static DESCRIPTIONS: &[DescriptionEntry] = &[
    DescriptionEntry {
        key: "application",
        text: "# This application layer acts as the orchestrator for the flow of data between the \
               domain and infrastructure layers. It contains application logic and business rules \
               that coordinate tasks using the domain models. For example, it might include a \
               module for processing new user registrations, where it would use domain services \
               to verify user data and infrastructure services to store the user.",
    },
    DescriptionEntry {
        key: "domain",
        text: "# The domain layer is the heart of the business logic. It encapsulates the business \
               rules, models, and exceptions that define the operations and constraints of the \
               business domain. For instance, a 'User' model would be defined here with methods \
               for verifying passwords and updating user details.",
    },
    DescriptionEntry {
        key: "domain/models",
        text: "# Domain models represent the core business objects within the application. They \
               include classes that model the business concepts, their data, and behavior. For \
               example, in an e-commerce application, you would have models like 'Product', \
               'Cart', and 'Order' defined here with their respective properties and methods.",
    },
    DescriptionEntry {
        key: "domain/exceptions",
        text: "# This package contains custom exceptions that are specific to the domain logic. \
               These exceptions handle cases that are outside the normal flow of the application, \
               such as 'ProductNotFoundException' or 'PaymentDeclinedException', which are thrown \
               when a product cannot be found in the catalog or when a user's payment method is declined.",
    },
    DescriptionEntry {
        key: "domain/repositories",
        text: "# Repositories within the domain layer are interfaces that abstract the retrieval \
               of domain objects from data stores. They define the methods needed to query and \
               persist domain entities. For example, an 'OrderRepository' might declare methods \
               like 'find_by_id' and 'save' which would be implemented in the infrastructure layer.",
    },
    DescriptionEntry {
        key: "domain/services",
        text: "# Domain services contain additional logic that doesn\u{2019}t fit within a domain model. \
               This includes complex business rules or processes that span multiple domain models. \
               For example, a 'PaymentProcessingService' could coordinate between 'Order', 'Payment', \
               and 'Notification' models to process a user's payment.",
    },
    DescriptionEntry {
        key: "infrastructure",
        text: "# The infrastructure layer provides implementations for the interfaces defined in the \
               domain layer. It typically includes data access logic, file storage logic, and external \
               API clients. For example, this is where you would implement 'SQLUserRepository' which \
               handles database operations for 'User' entities using SQL.",
    },
    DescriptionEntry {
        key: "infrastructure/adapters",
        text: "# Adapters in the infrastructure layer serve as the bridge between the application and \
               the external services or databases. They implement the interfaces defined in the domain \
               layer to provide concrete functionality. For instance, an adapter could implement the \
               'IEmailService' interface using a third-party email service provider.",
    },
    DescriptionEntry {
        key: "infrastructure/cache",
        text: "# The cache package includes classes and configurations for caching mechanisms to improve \
               performance. For example, it might contain a 'RedisCacheAdapter' that uses Redis to cache \
               common queries or results.",
    },
    DescriptionEntry {
        key: "infrastructure/db",
        text: "# This package is dedicated to database configurations, connection management, and migrations. \
               It contains the setup needed to connect to a SQL or NoSQL database and might include scripts \
               or tools like Alembic to handle database versioning and migrations.",
    },
    DescriptionEntry {
        key: "infrastructure/repositories",
        text: "# Here you'll find the concrete implementations of the repository interfaces defined in the \
               domain layer. These implementations are specific to the data storage solutions being used, \
               such as a 'MongoDBOrderRepository' for storing orders in MongoDB.",
    },
    DescriptionEntry {
        key: "infrastructure/services",
        text: "# The services package within the infrastructure layer contains implementations of services \
               like message queuing, file storage, and third-party clients. For example, an 'S3StorageService' \
               would provide methods to save and retrieve files from AWS S3.",
    },
    DescriptionEntry {
        key: "interfaces",
        text: "# The interfaces layer defines the contracts for how external entities interact with the \
               application. This includes RESTful APIs, GraphQL endpoints, and CLI interfaces. They are \
               adapters that translate between the application's internal domain models and the external \
               representation of data.",
    },
    DescriptionEntry {
        key: "interfaces/api_rest",
        text: "# This package contains all the components needed to build a RESTful API interface. It defines \
               route handlers, request/response schemas, and the necessary configuration to expose the API to clients.",
    },
    DescriptionEntry {
        key: "interfaces/api_rest/models",
        text: "# API REST Models are the schemas that represent how data is sent and received over the API. \
               They define the structure of request bodies and response payloads. For example, a 'UserRequestModel' \
               might define the expected fields when creating a new user.",
    },
    DescriptionEntry {
        key: "interfaces/api_rest/routes",
        text: "# Routes within the API REST package define the endpoints available to clients and handle the incoming \
               requests. They call upon the application services to perform actions and return responses. A route such \
               as '/users/{id}' would be defined here to handle user-related operations.",
    },
];

// ── ScaffoldSpec ─────────────────────────────────────────────────────────────

/// A walked specification entry, before resolution against a root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecEntry {
    pub section: Section,
    pub relative_path: RelativePath,
    pub children: &'static [&'static str],
    pub description: Option<&'static str>,
    pub is_package: bool,
}

/// Immutable scaffold specification: layout tables plus description table.
#[derive(Debug, Clone, Copy)]
pub struct ScaffoldSpec {
    sections: &'static [SectionLayout],
    descriptions: &'static [DescriptionEntry],
}

impl Default for ScaffoldSpec {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ScaffoldSpec {
    /// The layered layout compiled into the program.
    pub const fn builtin() -> Self {
        Self {
            sections: BUILTIN_SECTIONS,
            descriptions: DESCRIPTIONS,
        }
    }

    /// Build a specification from other static tables.
    pub const fn from_tables(
        sections: &'static [SectionLayout],
        descriptions: &'static [DescriptionEntry],
    ) -> Self {
        Self {
            sections,
            descriptions,
        }
    }

    pub fn sections(&self) -> &'static [SectionLayout] {
        self.sections
    }

    pub fn descriptions(&self) -> &'static [DescriptionEntry] {
        self.descriptions
    }

    /// Text bound to `key`, if any.
    pub fn description_for(&self, key: &str) -> Option<&'static str> {
        self.descriptions
            .iter()
            .find(|d| d.key == key)
            .map(|d| d.text)
    }

    /// Text bound to `key`, or [`FALLBACK_DESCRIPTION`].
    pub fn describe(&self, key: &str) -> &'static str {
        self.description_for(key).unwrap_or(FALLBACK_DESCRIPTION)
    }

    /// Walk every section breadth-first in declaration order.
    pub fn entries(&self) -> Vec<SpecEntry> {
        let mut out = Vec::new();

        for layout in self.sections {
            let mut queue = VecDeque::from([RelativePath::root()]);

            while let Some(relative_path) = queue.pop_front() {
                let children = children_of(layout, &relative_path);
                for child in children {
                    queue.push_back(relative_path.child(child));
                }

                // Keys are relative to the project root; a section living
                // outside it can never match one.
                let description = if layout.section.under_project_root() {
                    self.description_for(&relative_path.to_string())
                } else {
                    None
                };

                let is_package = !relative_path.is_root() || layout.section.root_is_package();

                out.push(SpecEntry {
                    section: layout.section,
                    relative_path,
                    children,
                    description,
                    is_package,
                });
            }
        }

        out
    }

    /// Resolve the specification under `output_root` for `project`.
    ///
    /// Pure; the main section lands in `output_root/project`, the tests
    /// section in `output_root/tests/project`.
    #[instrument(skip(self, output_root), fields(project = %project))]
    pub fn resolve(&self, project: &ProjectName, output_root: impl AsRef<Path>) -> ScaffoldTree {
        let output_root = output_root.as_ref();

        let nodes: Vec<PackageNode> = self
            .entries()
            .into_iter()
            .map(|entry| {
                let section_root = entry.section.root(output_root, project);
                let path = if entry.relative_path.is_root() {
                    section_root
                } else {
                    section_root.join(entry.relative_path.to_path_buf())
                };

                PackageNode {
                    section: entry.section,
                    path,
                    children: entry.children.iter().map(|c| c.to_string()).collect(),
                    description: entry.description,
                    is_package: entry.is_package,
                    relative_path: entry.relative_path,
                }
            })
            .collect();

        debug!(directories = nodes.len(), "scaffold resolved");
        ScaffoldTree::new(project.clone(), output_root.to_path_buf(), nodes)
    }

    /// Integrity self-check of the tables.
    ///
    /// Checks, per section: a root entry exists, entry paths are unique and
    /// well formed, every entry is listed as a child of its parent, no entry
    /// lists a child twice. Globally: the main root expands to exactly
    /// [`ROOT_LAYERS`], description keys are unique and each names a package
    /// of the main section.
    pub fn validate(&self) -> Result<(), DomainError> {
        for layout in self.sections {
            validate_section(layout)?;
        }

        let main = self
            .sections
            .iter()
            .find(|l| l.section == Section::Main)
            .ok_or_else(|| DomainError::MissingRoot {
                section: Section::Main.to_string(),
            })?;
        let root_children = children_of(main, &RelativePath::root());
        if root_children != ROOT_LAYERS {
            return Err(DomainError::InvalidRootLayers {
                found: root_children.join(", "),
            });
        }

        let packages: HashSet<String> = self
            .entries()
            .into_iter()
            .filter(|e| e.section == Section::Main && e.is_package)
            .map(|e| e.relative_path.to_string())
            .collect();

        let mut seen = HashSet::new();
        for entry in self.descriptions {
            if !seen.insert(entry.key) {
                return Err(DomainError::DuplicatePath {
                    path: entry.key.into(),
                });
            }
            if !packages.contains(entry.key) {
                return Err(DomainError::UnboundDescription {
                    key: entry.key.into(),
                });
            }
        }

        Ok(())
    }
}

fn children_of(layout: &SectionLayout, path: &RelativePath) -> &'static [&'static str] {
    let key = path.to_string();
    layout
        .entries
        .iter()
        .find(|e| e.path == key)
        .map(|e| e.children)
        .unwrap_or(&[])
}

fn validate_section(layout: &SectionLayout) -> Result<(), DomainError> {
    let section = layout.section.to_string();

    if !layout.entries.iter().any(|e| e.path.is_empty()) {
        return Err(DomainError::MissingRoot { section });
    }

    let mut seen = HashSet::new();
    for entry in layout.entries {
        if !seen.insert(entry.path) {
            return Err(DomainError::DuplicatePath {
                path: format!("{}:{}", section, entry.path),
            });
        }

        let path = RelativePath::parse(entry.path)?;

        let mut children = HashSet::new();
        for child in entry.children {
            path.try_child(child)?;
            if !children.insert(*child) {
                return Err(DomainError::DuplicateChild {
                    section: section.clone(),
                    parent: entry.path.into(),
                    child: (*child).into(),
                });
            }
        }

        if let (Some(parent), Some(name)) = (path.parent(), path.name()) {
            if !children_of(layout, &parent).contains(&name) {
                return Err(DomainError::MissingChildReference {
                    section: section.clone(),
                    path: entry.path.into(),
                });
            }
        }
    }

    Ok(())
}
