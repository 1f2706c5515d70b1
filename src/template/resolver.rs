//! Template lookup across catalogs.
//!
//! Consults every registered catalog's manifest in registry (insertion)
//! order, first match wins; the builtin catalog is consulted last. A catalog
//! added earlier therefore shadows a later one that defines the same template
//! name — precedence is a property of registry order, not an accident.

use crate::catalog::builtin;
use crate::catalog::manifest::{CatalogBase, TemplateEntry};
use crate::catalog::resolver::CatalogResolver;
use crate::error::{Result, StencilError};
use crate::settings::SettingsStore;

/// A template found in some catalog, with everything needed to render it.
#[derive(Debug, Clone)]
pub struct ResolvedTemplate {
    /// Template name as looked up.
    pub name: String,

    /// Registry name of the catalog that provided it (`builtin` for the
    /// embedded catalog).
    pub catalog: String,

    /// The template definition.
    pub entry: TemplateEntry,

    /// Base of the providing manifest, for resolving relative sources.
    pub base: CatalogBase,
}

/// Resolves template names against the registry.
pub struct TemplateResolver<'a> {
    settings: &'a SettingsStore,
    catalogs: &'a CatalogResolver<'a>,
}

impl<'a> TemplateResolver<'a> {
    /// Create a resolver over the given registry and catalog resolver.
    pub fn new(settings: &'a SettingsStore, catalogs: &'a CatalogResolver<'a>) -> Self {
        Self { settings, catalogs }
    }

    /// Find a template by name. A catalog that fails to fetch or parse is
    /// skipped (and logged) so one broken catalog cannot mask the others.
    pub fn resolve(&self, name: &str) -> Result<ResolvedTemplate> {
        for entry in self.settings.catalogs() {
            let manifest = match self.catalogs.resolve(&entry.catalog_ref) {
                Ok(manifest) => manifest,
                Err(e) => {
                    tracing::warn!(catalog = %entry.name, error = %e, "skipping catalog");
                    continue;
                }
            };
            if let Some(template) = manifest.templates.get(name) {
                return Ok(ResolvedTemplate {
                    name: name.to_string(),
                    catalog: entry.name.clone(),
                    entry: template.clone(),
                    base: manifest.base,
                });
            }
        }

        let builtin_manifest = builtin::load_manifest()?;
        if let Some(template) = builtin_manifest.templates.get(name) {
            return Ok(ResolvedTemplate {
                name: name.to_string(),
                catalog: "builtin".to_string(),
                entry: template.clone(),
                base: CatalogBase::Builtin,
            });
        }

        Err(StencilError::TemplateNotFound {
            name: name.to_string(),
        })
    }
}
