//! Catalog manifests and their resolution.
//!
//! A *catalog* is a named, registered pointer to a manifest source (a URL or a
//! file). A *manifest* is the parsed contents of that source: aliases,
//! templates, and references to further nested catalogs. Manifests are
//! transient; they are re-fetched on demand and never persisted.

pub mod builtin;
pub mod fetch;
pub mod manifest;
pub mod resolver;

pub use fetch::Fetcher;
pub use manifest::{AliasEntry, CatalogBase, CatalogRef, FileMapping, Manifest, TemplateEntry};
pub use resolver::CatalogResolver;
