//! Catalog manifest definitions.
//!
//! Manifests are JSON documents declaring aliases, templates and nested
//! catalog references:
//!
//! ```json
//! {
//!   "description": "Team tooling",
//!   "aliases": {
//!     "fmt": { "script-ref": "fmt.java", "description": "Formatter" }
//!   },
//!   "templates": {
//!     "cli": {
//!       "description": "Command line app",
//!       "files": ["{filename}=cli/main.java.tmpl", "cli/README.md"]
//!     }
//!   },
//!   "catalogs": {
//!     "tools": { "catalog-ref": "tools/catalog.json" }
//!   }
//! }
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, StencilError};

/// Suffix marking a template source as a content template. Sources without it
/// are copied verbatim.
pub const TEMPLATE_SUFFIX: &str = ".tmpl";

/// Where a manifest was loaded from; relative source specs resolve against it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogBase {
    /// A URL prefix ending in `/`.
    Url(String),
    /// A local directory.
    Dir(PathBuf),
    /// The catalog embedded in the binary.
    Builtin,
}

impl Default for CatalogBase {
    fn default() -> Self {
        CatalogBase::Dir(PathBuf::from("."))
    }
}

impl CatalogBase {
    /// Derive the base from the reference a manifest was fetched from.
    pub fn for_reference(reference: &str) -> Self {
        if reference.starts_with("http://") || reference.starts_with("https://") {
            let prefix = match reference.rfind('/') {
                Some(idx) => &reference[..=idx],
                None => reference,
            };
            CatalogBase::Url(prefix.to_string())
        } else {
            let parent = Path::new(reference)
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."));
            CatalogBase::Dir(parent)
        }
    }

    /// Resolve a source spec against this base. Absolute paths and URLs pass
    /// through untouched.
    pub fn join(&self, spec: &str) -> String {
        if spec.starts_with("http://") || spec.starts_with("https://") || Path::new(spec).is_absolute()
        {
            return spec.to_string();
        }
        match self {
            CatalogBase::Url(prefix) => format!("{prefix}{spec}"),
            CatalogBase::Dir(dir) => dir.join(spec).display().to_string(),
            CatalogBase::Builtin => spec.to_string(),
        }
    }
}

/// A named alias for a script reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AliasEntry {
    /// The script this alias points at.
    #[serde(rename = "script-ref")]
    pub script_ref: String,

    /// Human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A nested catalog reference inside a manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogRef {
    /// URL or file path of the nested catalog, possibly relative to the
    /// enclosing manifest's base.
    #[serde(rename = "catalog-ref")]
    pub catalog_ref: String,

    /// Human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// One file produced by a template.
///
/// Parsed from the string form `dest=source` or bare `source`. When `dest` is
/// absent the destination name derives from the source file name (with any
/// `.tmpl` suffix stripped); when present it may contain placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FileMapping {
    /// Path of the template source, relative to the catalog base or absolute.
    pub source: String,

    /// Destination name pattern, if given explicitly.
    pub dest: Option<String>,
}

impl FileMapping {
    /// Whether the source is a content template rather than a verbatim copy.
    pub fn is_content_template(&self) -> bool {
        self.source.ends_with(TEMPLATE_SUFFIX)
    }

    /// The destination name pattern: the explicit `dest` if present, otherwise
    /// the source file name with any `.tmpl` suffix stripped.
    pub fn dest_pattern(&self) -> String {
        if let Some(dest) = &self.dest {
            return dest.clone();
        }
        let file_name = Path::new(&self.source)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.source.clone());
        file_name
            .strip_suffix(TEMPLATE_SUFFIX)
            .map(str::to_string)
            .unwrap_or(file_name)
    }
}

impl TryFrom<String> for FileMapping {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        let (dest, source) = match value.split_once('=') {
            Some((dest, source)) => (Some(dest.to_string()), source.to_string()),
            None => (None, value),
        };
        if source.is_empty() {
            return Err("file mapping has an empty source".to_string());
        }
        Ok(FileMapping { source, dest })
    }
}

impl From<FileMapping> for String {
    fn from(mapping: FileMapping) -> Self {
        match mapping.dest {
            Some(dest) => format!("{dest}={}", mapping.source),
            None => mapping.source,
        }
    }
}

/// A named set of file mappings used to scaffold new files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateEntry {
    /// Human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Ordered file mappings. Declaration order matters: it is the render
    /// order, and the primary mapping is searched in it.
    pub files: Vec<FileMapping>,
}

/// Parsed contents of a catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    /// Description of the catalog as a whole.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Named script aliases.
    #[serde(default)]
    pub aliases: BTreeMap<String, AliasEntry>,

    /// Named templates.
    #[serde(default)]
    pub templates: BTreeMap<String, TemplateEntry>,

    /// Nested catalogs addressable via `name@sub`.
    #[serde(default)]
    pub catalogs: BTreeMap<String, CatalogRef>,

    /// Where this manifest was loaded from. Attached after parsing.
    #[serde(skip)]
    pub base: CatalogBase,
}

impl Manifest {
    /// Parse manifest content fetched from `reference` and attach its base.
    pub fn parse(content: &str, reference: &str) -> Result<Self> {
        let mut manifest: Manifest =
            serde_json::from_str(content).map_err(|e| StencilError::Parse {
                reference: reference.to_string(),
                message: e.to_string(),
            })?;
        manifest.base = CatalogBase::for_reference(reference);
        Ok(manifest)
    }
}
