//! Stencil - catalog-driven script scaffolding.
//!
//! Stencil maintains a named registry of *catalogs* — pointers to remote or
//! local JSON manifests declaring aliases and templates — and instantiates a
//! named *template* into a target location, substituting variables into file
//! names and contents.
//!
//! # Modules
//!
//! - [`catalog`] - Manifest model, fetching, and catalog reference resolution
//! - [`cli`] - Command-line interface and argument parsing
//! - [`error`] - Error types, result alias, and exit-code mapping
//! - [`settings`] - Persisted catalog registry
//! - [`template`] - Template lookup, placeholder substitution, and rendering
//! - [`ui`] - Terminal output
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//! use stencil::template::substitute;
//!
//! let mut vars = HashMap::new();
//! vars.insert("basename".to_string(), "App".to_string());
//! assert_eq!(substitute("class {basename}", &vars), "class App");
//! ```

pub mod catalog;
pub mod cli;
pub mod error;
pub mod settings;
pub mod template;
pub mod ui;

pub use error::{Result, StencilError};
