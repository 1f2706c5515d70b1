//! Multi-file template rendering.
//!
//! One render instantiates every file mapping of a resolved template into the
//! destination directory. The mapping whose expanded destination name equals
//! the requested output file name is the *primary*; all others are
//! *secondary* and land relative to the primary's directory.
//!
//! The primary is never silently overwritten; secondaries are. A failure
//! after writing has begun removes the files written so far — a partial
//! scaffold is worse than none.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::catalog::builtin;
use crate::catalog::fetch::Fetcher;
use crate::catalog::manifest::CatalogBase;
use crate::error::{Result, StencilError};
use crate::template::placeholder::{substitute, substitute_path};
use crate::template::resolver::ResolvedTemplate;

/// Reserved words that may not be used as the primary base name.
const JAVA_KEYWORDS: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "final", "finally", "float",
    "for", "goto", "if", "implements", "import", "instanceof", "int", "interface", "long",
    "native", "new", "package", "private", "protected", "public", "return", "short", "static",
    "strictfp", "super", "switch", "synchronized", "this", "throw", "throws", "transient", "try",
    "void", "volatile", "while",
];

/// Turn a kebab-case name into a CamelCase identifier (`xyz-plug` ->
/// `XyzPlug`). Names without hyphens pass through unchanged.
fn camelize_kebab(name: &str) -> String {
    if !name.contains('-') {
        return name.to_string();
    }
    name.split('-')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

/// Validate a base name as a Java identifier: letters, digits and
/// underscores, no leading digit, not a reserved word.
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let valid_shape = match chars.next() {
        Some(first) => {
            (first.is_ascii_alphabetic() || first == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    };
    valid_shape && !JAVA_KEYWORDS.contains(&name)
}

/// Per-invocation render state: destination, explicit properties, and the
/// variables derived from them.
#[derive(Debug)]
pub struct RenderContext {
    /// Output path exactly as the caller passed it.
    pub destination: PathBuf,

    /// Destination file name with extension.
    pub filename: String,

    /// Destination file name without extension.
    pub basename: String,

    /// Merged variable map: derived variables, overridden by explicit
    /// properties on key collision.
    pub vars: HashMap<String, String>,
}

impl RenderContext {
    /// Build the context for a destination path and `-D` properties.
    ///
    /// Derived variables: `basename`, `filename`, and `scriptref` (the
    /// destination string as passed, so generated companions can
    /// cross-reference the primary file). An extensionless kebab-case
    /// destination (`xyz-plug`) gets a CamelCase `basename` (`XyzPlug`),
    /// since the raw name could never pass identifier validation.
    pub fn new(destination: &str, properties: &[(String, String)]) -> Result<Self> {
        let path = PathBuf::from(destination);
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| {
                StencilError::Other(anyhow::anyhow!("'{destination}' has no file name"))
            })?;
        let basename = if filename.contains('.') {
            path.file_stem()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| filename.clone())
        } else {
            camelize_kebab(&filename)
        };

        let mut vars = HashMap::new();
        vars.insert("basename".to_string(), basename.clone());
        vars.insert("filename".to_string(), filename.clone());
        vars.insert("scriptref".to_string(), destination.to_string());
        for (key, value) in properties {
            vars.insert(key.clone(), value.clone());
        }

        Ok(Self {
            destination: path,
            filename,
            basename,
            vars,
        })
    }
}

/// Renders a resolved template into its destination.
pub struct TemplateRenderer<'a> {
    fetcher: &'a Fetcher,
}

impl<'a> TemplateRenderer<'a> {
    /// Create a renderer using the given fetcher for template sources.
    pub fn new(fetcher: &'a Fetcher) -> Self {
        Self { fetcher }
    }

    /// Render every file mapping of `template` for `ctx`.
    ///
    /// Returns the paths written, primary first. Fails before any output on
    /// an invalid primary name or an existing primary without `force`; fails
    /// mid-sequence with best-effort cleanup on any later error.
    pub fn render(
        &self,
        template: &ResolvedTemplate,
        ctx: &RenderContext,
        force: bool,
    ) -> Result<Vec<PathBuf>> {
        let expanded: Vec<String> = template
            .entry
            .files
            .iter()
            .map(|mapping| substitute_path(&mapping.dest_pattern(), &ctx.vars))
            .collect::<Result<_>>()?;

        // The primary is the mapping expanding to the requested file name.
        // An extensionless request also accepts the requested name plus an
        // extension, written as a sibling of the requested path.
        let exact = expanded.iter().position(|dest| *dest == ctx.filename);
        let (primary, primary_path) = match exact {
            Some(index) => (index, ctx.destination.clone()),
            None if !ctx.filename.contains('.') => {
                let prefix = format!("{}.", ctx.filename);
                let index = expanded
                    .iter()
                    .position(|dest| dest.starts_with(&prefix))
                    .ok_or_else(|| StencilError::MappingMismatch {
                        template: template.name.clone(),
                        requested: ctx.filename.clone(),
                    })?;
                (index, ctx.destination.with_file_name(&expanded[index]))
            }
            None => {
                return Err(StencilError::MappingMismatch {
                    template: template.name.clone(),
                    requested: ctx.filename.clone(),
                })
            }
        };

        if !is_valid_identifier(&ctx.basename) {
            return Err(StencilError::InvalidIdentifier {
                name: ctx.basename.clone(),
            });
        }

        if primary_path.exists() && !force {
            return Err(StencilError::TargetExists { path: primary_path });
        }

        let out_dir = match primary_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&out_dir)?;

        // Primary first, then the rest in declaration order.
        let order = std::iter::once(primary)
            .chain((0..template.entry.files.len()).filter(|i| *i != primary));

        let mut written = Vec::new();
        for index in order {
            let mapping = &template.entry.files[index];
            let dest = out_dir.join(&expanded[index]);

            if let Err(e) = self.render_one(template, ctx, mapping, &dest) {
                tracing::debug!(file = %dest.display(), "render failed, removing partial output");
                for path in &written {
                    let _ = fs::remove_file(path);
                }
                return Err(e);
            }
            written.push(dest);
        }

        Ok(written)
    }

    fn render_one(
        &self,
        template: &ResolvedTemplate,
        ctx: &RenderContext,
        mapping: &crate::catalog::manifest::FileMapping,
        dest: &Path,
    ) -> Result<()> {
        let bytes = self.read_source(&template.base, &mapping.source)?;

        if let Some(parent) = dest.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        if mapping.is_content_template() {
            let text = String::from_utf8(bytes).map_err(|_| StencilError::Fetch {
                reference: mapping.source.clone(),
                message: "template source is not valid UTF-8".to_string(),
            })?;
            fs::write(dest, substitute(&text, &ctx.vars))?;
        } else {
            fs::write(dest, bytes)?;
        }

        tracing::debug!(source = %mapping.source, dest = %dest.display(), "rendered");
        Ok(())
    }

    fn read_source(&self, base: &CatalogBase, spec: &str) -> Result<Vec<u8>> {
        match base {
            CatalogBase::Builtin => builtin::read_source(spec),
            _ => self.fetcher.fetch(&base.join(spec)),
        }
    }
}
