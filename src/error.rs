//! Error types for stencil operations.
//!
//! This module defines [`StencilError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Exit Codes
//!
//! Every error class maps to a stable process exit code via
//! [`StencilError::exit_code`]:
//!
//! - `2` — invalid input (bad catalog name, duplicate, invalid identifier,
//!   missing property, mapping mismatch)
//! - `3` — something was not found (catalog, nested catalog, template)
//! - `4` — I/O or network failure
//! - `5` — manifest parse failure
//! - `6` — cyclic catalog reference
//! - `7` — refusing to overwrite an existing target
//! - `1` — anything else

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for stencil operations.
#[derive(Debug, Error)]
pub enum StencilError {
    /// Catalog name does not match the allowed pattern.
    #[error("Invalid catalog name '{name}': it should start with a letter followed by 0 or more letters, digits, underscores, hyphens or dots")]
    InvalidName { name: String },

    /// A catalog with that name is already registered.
    #[error("A catalog named '{name}' already exists")]
    DuplicateName { name: String },

    /// No registered catalog with that name.
    #[error("A catalog named '{name}' does not exist")]
    CatalogNotFound { name: String },

    /// A manifest does not declare the nested catalog addressed by `name@sub`.
    #[error("Catalog '{catalog}' does not declare a nested catalog '{sub}'")]
    NestedCatalogNotFound { catalog: String, sub: String },

    /// No catalog offers a template with that name.
    #[error("No template named '{name}' found in any catalog")]
    TemplateNotFound { name: String },

    /// Failed to fetch or read a catalog or template source.
    #[error("Unable to fetch '{reference}': {message}")]
    Fetch { reference: String, message: String },

    /// Malformed manifest content.
    #[error("Error parsing catalog '{reference}': {message}")]
    Parse { reference: String, message: String },

    /// A catalog, directly or transitively, points back to itself.
    #[error("Cyclic catalog reference: {cycle}")]
    CyclicCatalogReference { cycle: String },

    /// A destination-name placeholder has no value.
    #[error("No value for property '{name}' while expanding '{pattern}'")]
    MissingProperty { name: String, pattern: String },

    /// The primary output base name is not a valid identifier.
    #[error("'{name}' is not a valid class name in java")]
    InvalidIdentifier { name: String },

    /// No file mapping in the template produces the requested output name.
    #[error("Template '{template}' has no file mapping that produces '{requested}'")]
    MappingMismatch { template: String, requested: String },

    /// The primary output file already exists and --force was not given.
    #[error("Target file already exists: {path} (use --force to overwrite)")]
    TargetExists { path: PathBuf },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StencilError {
    /// Stable process exit code for this error class.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidName { .. }
            | Self::DuplicateName { .. }
            | Self::MissingProperty { .. }
            | Self::InvalidIdentifier { .. }
            | Self::MappingMismatch { .. } => 2,
            Self::CatalogNotFound { .. }
            | Self::NestedCatalogNotFound { .. }
            | Self::TemplateNotFound { .. } => 3,
            Self::Fetch { .. } | Self::Io(_) => 4,
            Self::Parse { .. } => 5,
            Self::CyclicCatalogReference { .. } => 6,
            Self::TargetExists { .. } => 7,
            Self::Other(_) => 1,
        }
    }
}

/// Result type alias for stencil operations.
pub type Result<T> = std::result::Result<T, StencilError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_name_displays_name() {
        let err = StencilError::InvalidName {
            name: "9bad".into(),
        };
        assert!(err.to_string().contains("9bad"));
    }

    #[test]
    fn duplicate_name_displays_name() {
        let err = StencilError::DuplicateName {
            name: "team".into(),
        };
        assert!(err.to_string().contains("team"));
    }

    #[test]
    fn fetch_displays_reference_and_message() {
        let err = StencilError::Fetch {
            reference: "https://example.com/cat.json".into(),
            message: "connection refused".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("https://example.com/cat.json"));
        assert!(msg.contains("connection refused"));
    }

    #[test]
    fn cyclic_reference_displays_cycle() {
        let err = StencilError::CyclicCatalogReference {
            cycle: "a.json -> b.json -> a.json".into(),
        };
        assert!(err.to_string().contains("a.json -> b.json -> a.json"));
    }

    #[test]
    fn missing_property_names_variable_and_pattern() {
        let err = StencilError::MissingProperty {
            name: "basename".into(),
            pattern: "{basename}.java".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("basename"));
        assert!(msg.contains("{basename}.java"));
    }

    #[test]
    fn target_exists_displays_path() {
        let err = StencilError::TargetExists {
            path: PathBuf::from("/work/App.java"),
        };
        assert!(err.to_string().contains("/work/App.java"));
    }

    #[test]
    fn exit_codes_are_stable() {
        assert_eq!(
            StencilError::InvalidName { name: "x!".into() }.exit_code(),
            2
        );
        assert_eq!(
            StencilError::TemplateNotFound { name: "x".into() }.exit_code(),
            3
        );
        assert_eq!(
            StencilError::Fetch {
                reference: "r".into(),
                message: "m".into()
            }
            .exit_code(),
            4
        );
        assert_eq!(
            StencilError::Parse {
                reference: "r".into(),
                message: "m".into()
            }
            .exit_code(),
            5
        );
        assert_eq!(
            StencilError::CyclicCatalogReference { cycle: "c".into() }.exit_code(),
            6
        );
        assert_eq!(
            StencilError::TargetExists {
                path: PathBuf::from("f")
            }
            .exit_code(),
            7
        );
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: StencilError = io_err.into();
        assert!(matches!(err, StencilError::Io(_)));
        assert_eq!(err.exit_code(), 4);
    }
}
