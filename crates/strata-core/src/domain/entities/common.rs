use std::fmt;
use std::path::PathBuf;

use serde::{Serialize, Serializer};

use super::DomainError;

/// A package path relative to its section root, stored as segments.
///
/// Invariant: every segment is a single, normal path component (no
/// separators, no `.`/`..`, never empty). The empty sequence is the section
/// root. Enforced at construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RelativePath(Vec<String>);

impl RelativePath {
    /// The section root (no segments).
    pub const fn root() -> Self {
        Self(Vec::new())
    }

    /// Parse a `/`-separated key such as `domain/models`.
    ///
    /// The empty string parses to [`RelativePath::root`].
    pub fn parse(key: &str) -> Result<Self, DomainError> {
        if key.is_empty() {
            return Ok(Self::root());
        }
        if key.starts_with('/') {
            return Err(DomainError::AbsolutePathNotAllowed { path: key.into() });
        }

        let mut segments = Vec::new();
        for segment in key.split('/') {
            check_segment(segment)?;
            segments.push(segment.to_string());
        }
        Ok(Self(segments))
    }

    /// Append one segment.
    ///
    /// # Panics
    /// Panics if `segment` is not a single normal path component. Use
    /// [`RelativePath::try_child`] for untrusted input.
    pub fn child(&self, segment: &str) -> Self {
        match self.try_child(segment) {
            Ok(path) => path,
            Err(e) => panic!("invalid path segment {segment:?}: {e}"),
        }
    }

    /// Fallible variant of [`RelativePath::child`].
    pub fn try_child(&self, segment: &str) -> Result<Self, DomainError> {
        check_segment(segment)?;
        let mut segments = self.0.clone();
        segments.push(segment.to_string());
        Ok(Self(segments))
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.0.len()
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Last segment, `None` for the root.
    pub fn name(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    /// Parent path, `None` for the root.
    pub fn parent(&self) -> Option<Self> {
        if self.is_root() {
            return None;
        }
        Some(Self(self.0[..self.0.len() - 1].to_vec()))
    }

    /// Platform path built from the segments (empty for the root).
    pub fn to_path_buf(&self) -> PathBuf {
        self.0.iter().collect()
    }
}

/// Validate a single path segment.
pub(crate) fn check_segment(segment: &str) -> Result<(), DomainError> {
    let reason = if segment.is_empty() {
        "segment cannot be empty"
    } else if segment == "." || segment == ".." {
        "segment cannot be '.' or '..'"
    } else if segment.contains(['/', '\\']) {
        "segment cannot contain path separators"
    } else if segment.contains('\0') {
        "segment cannot contain NUL bytes"
    } else {
        return Ok(());
    };

    Err(DomainError::InvalidSegment {
        segment: segment.into(),
        reason: reason.into(),
    })
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("/"))
    }
}

impl Serialize for RelativePath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn parse_splits_segments() {
        let p = RelativePath::parse("interfaces/api_rest/routes").unwrap();
        assert_eq!(p.depth(), 3);
        assert_eq!(p.name(), Some("routes"));
        assert_eq!(p.to_string(), "interfaces/api_rest/routes");
    }

    #[test]
    fn empty_key_is_root() {
        let p = RelativePath::parse("").unwrap();
        assert!(p.is_root());
        assert_eq!(p.to_string(), "");
        assert_eq!(p.parent(), None);
        assert_eq!(p.to_path_buf(), PathBuf::new());
    }

    #[test]
    fn parse_rejects_absolute() {
        assert!(matches!(
            RelativePath::parse("/etc"),
            Err(DomainError::AbsolutePathNotAllowed { .. })
        ));
    }

    #[test]
    fn parse_rejects_traversal_and_empty_segments() {
        assert!(RelativePath::parse("domain/../etc").is_err());
        assert!(RelativePath::parse("domain//models").is_err());
        assert!(RelativePath::parse("./domain").is_err());
    }

    #[test]
    fn child_and_parent_round_trip() {
        let domain = RelativePath::root().child("domain");
        let models = domain.child("models");
        assert_eq!(models.parent(), Some(domain));
        assert_eq!(models.to_path_buf(), Path::new("domain").join("models"));
    }

    #[test]
    #[should_panic]
    fn child_rejects_separator() {
        RelativePath::root().child("a/b");
    }

    #[test]
    fn try_child_rejects_backslash() {
        assert!(RelativePath::root().try_child("a\\b").is_err());
    }

    #[test]
    fn ordering_is_lexicographic_by_segment() {
        let a = RelativePath::parse("domain").unwrap();
        let b = RelativePath::parse("domain/models").unwrap();
        let c = RelativePath::parse("infrastructure").unwrap();
        assert!(a < b && b < c);
    }
}
