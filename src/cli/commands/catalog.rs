//! Catalog command implementation.
//!
//! `stencil catalog add|update|list|remove` manage the persisted registry of
//! catalogs and re-validate their manifests.

use std::path::{Path, PathBuf};

use crate::catalog::{CatalogResolver, Fetcher, Manifest};
use crate::cli::args::CatalogCommands;
use crate::error::{Result, StencilError};
use crate::settings::store::is_valid_name;
use crate::settings::SettingsStore;
use crate::ui::Output;

use super::dispatcher::{Command, CommandResult};

/// The catalog command implementation.
pub struct CatalogCommand {
    config_dir: PathBuf,
    args: CatalogCommands,
}

impl CatalogCommand {
    /// Create a new catalog command.
    pub fn new(config_dir: &Path, args: CatalogCommands) -> Self {
        Self {
            config_dir: config_dir.to_path_buf(),
            args,
        }
    }

    fn add(
        &self,
        out: &Output,
        name: &str,
        url_or_file: &str,
        description: Option<String>,
    ) -> Result<CommandResult> {
        if !is_valid_name(name) {
            return Err(StencilError::InvalidName {
                name: name.to_string(),
            });
        }

        let mut store = SettingsStore::load(&self.config_dir)?;
        if store.get(name).is_some() {
            return Err(StencilError::DuplicateName {
                name: name.to_string(),
            });
        }

        // Best-effort validation: a fetch or parse failure is reported but
        // does not prevent the entry from being written, so catalogs can be
        // added offline and refreshed later with `catalog update`.
        let fetcher = Fetcher::new();
        let resolver = CatalogResolver::new(&store, &fetcher);
        let description = match resolver.resolve(url_or_file) {
            Ok(manifest) => description.or(manifest.description),
            Err(e) => {
                out.warning(&format!("Unable to validate catalog: {e}"));
                description
            }
        };

        store.add(name, url_or_file, description)?;
        out.success(&format!("Added catalog '{name}'"));
        Ok(CommandResult::success())
    }

    fn update(&self, out: &Output) -> Result<CommandResult> {
        let store = SettingsStore::load(&self.config_dir)?;
        let fetcher = Fetcher::new();
        let resolver = CatalogResolver::new(&store, &fetcher);

        let mut failures = 0;
        for entry in store.catalogs() {
            out.println(&format!(
                "Updating catalog '{}' from {}...",
                entry.name, entry.catalog_ref
            ));
            if let Err(e) = resolver.resolve(&entry.catalog_ref) {
                out.error(&e.to_string());
                failures += 1;
            }
        }

        if failures > 0 {
            Ok(CommandResult::failure(4))
        } else {
            Ok(CommandResult::success())
        }
    }

    fn list(&self, out: &Output, name: Option<&str>) -> Result<CommandResult> {
        let store = SettingsStore::load(&self.config_dir)?;

        match name {
            None => {
                let mut entries: Vec<_> = store.catalogs().to_vec();
                entries.sort_by(|a, b| a.name.cmp(&b.name));
                for entry in entries {
                    match &entry.description {
                        Some(description) => {
                            out.println(&format!("{} = {description}", entry.name));
                            out.println(&format!(
                                "{}   ({})",
                                " ".repeat(entry.name.len()),
                                entry.catalog_ref
                            ));
                        }
                        None => out.println(&format!("{} = {}", entry.name, entry.catalog_ref)),
                    }
                }
            }
            Some(name) => {
                let fetcher = Fetcher::new();
                let resolver = CatalogResolver::new(&store, &fetcher);
                let manifest = resolver.resolve(name)?;
                print_manifest(out, &manifest);
            }
        }
        Ok(CommandResult::success())
    }

    fn remove(&self, out: &Output, name: &str) -> Result<CommandResult> {
        let mut store = SettingsStore::load(&self.config_dir)?;
        store.remove(name)?;
        out.success(&format!("Removed catalog '{name}'"));
        Ok(CommandResult::success())
    }
}

fn print_manifest(out: &Output, manifest: &Manifest) {
    if let Some(description) = &manifest.description {
        out.println(description);
    }
    if !manifest.aliases.is_empty() {
        out.println("Aliases:");
        for (name, alias) in &manifest.aliases {
            match &alias.description {
                Some(description) => {
                    out.println(&format!("  {name} = {description} ({})", alias.script_ref))
                }
                None => out.println(&format!("  {name} = {}", alias.script_ref)),
            }
        }
    }
    if !manifest.templates.is_empty() {
        out.println("Templates:");
        for (name, template) in &manifest.templates {
            match &template.description {
                Some(description) => out.println(&format!("  {name} = {description}")),
                None => out.println(&format!("  {name}")),
            }
        }
    }
    if !manifest.catalogs.is_empty() {
        out.println("Catalogs:");
        for (name, nested) in &manifest.catalogs {
            out.println(&format!("  {name} = {}", nested.catalog_ref));
        }
    }
}

impl Command for CatalogCommand {
    fn execute(&self, out: &Output) -> Result<CommandResult> {
        match &self.args {
            CatalogCommands::Add {
                description,
                name,
                url_or_file,
            } => self.add(out, name, url_or_file, description.clone()),
            CatalogCommands::Update => self.update(out),
            CatalogCommands::List { name } => self.list(out, name.as_deref()),
            CatalogCommands::Remove { name } => self.remove(out, name),
        }
    }
}
