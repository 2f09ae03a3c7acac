//! Error types for snapshot loading and component lookup.
//!
//! Two kinds cover the whole surface: `LoadError` for everything that can go
//! wrong between opening a snapshot file and holding a validated in-memory
//! catalog, and `NotFoundError` for lookups that name an absent category or
//! component. Every operation is local and synchronous, so neither kind has a
//! transient mode worth retrying; loads either fully succeed or fully fail.

use crate::catalog::Category;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// A snapshot file could not be turned into a loaded catalog.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The snapshot file is missing or unreadable.
    #[error("failed to read catalog {path}: {source}")]
    Io {
        /// Path to the snapshot file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not well-formed JSON, or a record does not match its
    /// category's attribute schema.
    #[error("failed to parse catalog {path}: {source}")]
    Parse {
        /// Path to the snapshot file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: serde_json::Error,
    },

    /// The document parsed but does not have the category-keyed top-level
    /// shape required of snapshots.
    #[error("catalog {path} failed shape validation:\n{details}")]
    Shape {
        /// Path to the snapshot file.
        path: PathBuf,
        /// Schema violations, one per line.
        details: String,
    },

    /// A record violated a catalog invariant.
    #[error("catalog {path} is invalid: {message}")]
    Invalid {
        /// Path to the snapshot file.
        path: PathBuf,
        /// Description of the violated invariant.
        message: String,
    },
}

impl LoadError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn parse(path: &Path, source: serde_json::Error) -> Self {
        Self::Parse {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn shape(path: &Path, details: String) -> Self {
        Self::Shape {
            path: path.to_path_buf(),
            details,
        }
    }

    pub(crate) fn invalid(path: &Path, message: impl Into<String>) -> Self {
        Self::Invalid {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }
}

/// A lookup named a category entry that is not present in the snapshot.
///
/// Absent categories and absent component names surface identically; callers
/// that only want to enumerate should use `list`, which treats an absent
/// category as empty instead of failing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("no {category} component named '{name}'")]
pub struct NotFoundError {
    /// Category the lookup targeted.
    pub category: Category,
    /// Component name that could not be resolved.
    pub name: String,
}

impl NotFoundError {
    pub(crate) fn new(category: Category, name: impl Into<String>) -> Self {
        Self {
            category,
            name: name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_display_names_category_and_component() {
        let err = NotFoundError::new(Category::Battery, "Tattu_6S_16000");
        assert_eq!(
            err.to_string(),
            "no Battery component named 'Tattu_6S_16000'"
        );
    }

    #[test]
    fn load_error_display_includes_path() {
        let err = LoadError::invalid(Path::new("/tmp/db.json"), "duplicate name");
        assert!(err.to_string().contains("/tmp/db.json"));
        assert!(err.to_string().contains("duplicate name"));
    }
}
