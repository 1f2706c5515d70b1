//! Catalog reference resolution.
//!
//! A reference is a URL, a local file path, or the shorthand `name` /
//! `name@sub` against the registered catalogs, where `sub` addresses a nested
//! catalog declared by `name`'s manifest. Nested catalog references are
//! resolved through the same entry point, so they may themselves be shorthand
//! — resolution is a graph walk over untrusted data and carries an explicit
//! visited set for cycle detection.
//!
//! Within one resolver instance each reference is fetched at most once; the
//! cache does not outlive the process.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::Path;

use crate::catalog::fetch::Fetcher;
use crate::catalog::manifest::{CatalogBase, Manifest};
use crate::error::{Result, StencilError};
use crate::settings::SettingsStore;

/// Upper bound on nested catalog hops, independent of cycle detection.
const MAX_DEPTH: usize = 10;

/// Resolves catalog references to manifests.
pub struct CatalogResolver<'a> {
    settings: &'a SettingsStore,
    fetcher: &'a Fetcher,
    cache: RefCell<HashMap<String, Manifest>>,
}

impl<'a> CatalogResolver<'a> {
    /// Create a resolver over the given registry and fetcher.
    pub fn new(settings: &'a SettingsStore, fetcher: &'a Fetcher) -> Self {
        Self {
            settings,
            fetcher,
            cache: RefCell::new(HashMap::new()),
        }
    }

    /// Resolve a reference (URL, file path, `name`, or `name@sub`) to its
    /// manifest.
    pub fn resolve(&self, reference: &str) -> Result<Manifest> {
        let mut visited = Vec::new();
        self.resolve_inner(reference, &mut visited)
    }

    fn resolve_inner(&self, reference: &str, visited: &mut Vec<String>) -> Result<Manifest> {
        if visited.len() >= MAX_DEPTH {
            return Err(StencilError::CyclicCatalogReference {
                cycle: format!("{} -> {reference}", visited.join(" -> ")),
            });
        }

        // `name@sub` shorthand against a registered catalog.
        if let Some((name, sub)) = reference.split_once('@') {
            if let Some(entry) = self.settings.get(name) {
                let manifest = self.fetch_manifest(&entry.catalog_ref, visited)?;
                let nested = manifest.catalogs.get(sub).ok_or_else(|| {
                    StencilError::NestedCatalogNotFound {
                        catalog: name.to_string(),
                        sub: sub.to_string(),
                    }
                })?;
                return self.resolve_nested(&nested.catalog_ref, &manifest.base, visited);
            }
        }

        // Bare registered name.
        if let Some(entry) = self.settings.get(reference) {
            let catalog_ref = entry.catalog_ref.clone();
            return self.fetch_manifest(&catalog_ref, visited);
        }

        // Direct URL or file path.
        self.fetch_manifest(reference, visited)
    }

    /// Resolve a nested catalog reference. Shorthand forms re-enter the full
    /// resolution; plain refs resolve relative to the enclosing manifest.
    fn resolve_nested(
        &self,
        reference: &str,
        base: &CatalogBase,
        visited: &mut Vec<String>,
    ) -> Result<Manifest> {
        let name = reference.split('@').next().unwrap_or(reference);
        if self.settings.get(name).is_some() {
            return self.resolve_inner(reference, visited);
        }
        self.fetch_manifest(&base.join(reference), visited)
    }

    fn fetch_manifest(&self, target: &str, visited: &mut Vec<String>) -> Result<Manifest> {
        let canonical = canonicalize_reference(target);

        if visited.iter().any(|seen| *seen == canonical) {
            return Err(StencilError::CyclicCatalogReference {
                cycle: format!("{} -> {canonical}", visited.join(" -> ")),
            });
        }
        visited.push(canonical.clone());

        if let Some(manifest) = self.cache.borrow().get(&canonical) {
            return Ok(manifest.clone());
        }

        tracing::debug!(reference = %target, "fetching catalog");
        let content = self.fetcher.fetch_text(target)?;
        let manifest = Manifest::parse(&content, target)?;

        self.cache
            .borrow_mut()
            .insert(canonical, manifest.clone());
        Ok(manifest)
    }
}

/// Normalize a reference for cycle detection, so `./a.json` and `a.json`
/// name the same node.
fn canonicalize_reference(reference: &str) -> String {
    if Fetcher::is_url(reference) {
        return reference.to_string();
    }
    Path::new(reference)
        .canonicalize()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| reference.to_string())
}
