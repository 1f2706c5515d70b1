//! Init command implementation.
//!
//! `stencil init` instantiates a template into a target file, substituting
//! derived and user-supplied variables into file names and contents.

use std::path::{Path, PathBuf};

use crate::catalog::{CatalogResolver, Fetcher};
use crate::cli::args::InitArgs;
use crate::error::Result;
use crate::settings::SettingsStore;
use crate::template::{RenderContext, TemplateRenderer, TemplateResolver};
use crate::ui::Output;

use super::dispatcher::{Command, CommandResult};

/// The init command implementation.
pub struct InitCommand {
    config_dir: PathBuf,
    args: InitArgs,
}

impl InitCommand {
    /// Create a new init command.
    pub fn new(config_dir: &Path, args: InitArgs) -> Self {
        Self {
            config_dir: config_dir.to_path_buf(),
            args,
        }
    }
}

impl Command for InitCommand {
    fn execute(&self, out: &Output) -> Result<CommandResult> {
        let store = SettingsStore::load(&self.config_dir)?;
        let fetcher = Fetcher::new();
        let catalogs = CatalogResolver::new(&store, &fetcher);
        let templates = TemplateResolver::new(&store, &catalogs);

        let template = templates.resolve(&self.args.template)?;
        out.verbose(&format!(
            "Using template '{}' from catalog '{}'",
            template.name, template.catalog
        ));

        let ctx = RenderContext::new(&self.args.output, &self.args.property)?;
        let renderer = TemplateRenderer::new(&fetcher);
        let written = renderer.render(&template, &ctx, self.args.force)?;

        out.success(&format!("Generated {}", written[0].display()));
        for path in &written[1..] {
            out.println(&format!("  + {}", path.display()));
        }

        Ok(CommandResult::success())
    }
}
