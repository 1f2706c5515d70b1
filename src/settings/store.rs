//! Catalog registry persistence.
//!
//! The registry is an *ordered* sequence of [`CatalogEntry`] values: insertion
//! order determines template resolution precedence, so entries are stored as a
//! list rather than a map. Names are still unique within the registry.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Result, StencilError};

/// Pattern a catalog name must match: a letter followed by letters, digits,
/// underscores, hyphens or dots.
fn name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z][-.\w]*$").expect("valid name pattern"))
}

/// Check whether `name` is a valid catalog name.
pub fn is_valid_name(name: &str) -> bool {
    name_pattern().is_match(name)
}

/// A registered catalog: a named pointer to a manifest source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Registry name of the catalog.
    pub name: String,

    /// URL or file path of the catalog manifest.
    #[serde(rename = "catalog-ref")]
    pub catalog_ref: String,

    /// Human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// On-disk shape of the settings file.
#[derive(Debug, Default, Serialize, Deserialize)]
struct SettingsFile {
    #[serde(default)]
    catalogs: Vec<CatalogEntry>,
}

/// Persisted catalog registry.
#[derive(Debug)]
pub struct SettingsStore {
    path: PathBuf,
    catalogs: Vec<CatalogEntry>,
}

impl SettingsStore {
    const FILE_NAME: &'static str = "catalogs.json";

    /// Load the registry from `config_dir`, or start empty if the file does
    /// not exist yet.
    pub fn load(config_dir: &Path) -> Result<Self> {
        let path = config_dir.join(Self::FILE_NAME);

        let catalogs = if path.exists() {
            let content = fs::read_to_string(&path)?;
            let file: SettingsFile =
                serde_json::from_str(&content).map_err(|e| StencilError::Parse {
                    reference: path.display().to_string(),
                    message: e.to_string(),
                })?;
            file.catalogs
        } else {
            Vec::new()
        };

        Ok(Self { path, catalogs })
    }

    /// All entries in insertion order.
    pub fn catalogs(&self) -> &[CatalogEntry] {
        &self.catalogs
    }

    /// Look up an entry by name.
    pub fn get(&self, name: &str) -> Option<&CatalogEntry> {
        self.catalogs.iter().find(|c| c.name == name)
    }

    /// Register a catalog. Fails with `InvalidName` or `DuplicateName`;
    /// persists on success.
    pub fn add(
        &mut self,
        name: &str,
        catalog_ref: &str,
        description: Option<String>,
    ) -> Result<()> {
        if !is_valid_name(name) {
            return Err(StencilError::InvalidName {
                name: name.to_string(),
            });
        }
        if self.get(name).is_some() {
            return Err(StencilError::DuplicateName {
                name: name.to_string(),
            });
        }

        self.catalogs.push(CatalogEntry {
            name: name.to_string(),
            catalog_ref: catalog_ref.to_string(),
            description,
        });
        self.save()
    }

    /// Remove a catalog by name. Fails with `CatalogNotFound` if absent.
    pub fn remove(&mut self, name: &str) -> Result<()> {
        let index = self.catalogs.iter().position(|c| c.name == name).ok_or(
            StencilError::CatalogNotFound {
                name: name.to_string(),
            },
        )?;
        self.catalogs.remove(index);
        self.save()
    }

    /// Save using atomic write (write to temp file, then rename).
    fn save(&self) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }

        let file = SettingsFile {
            catalogs: self.catalogs.clone(),
        };
        let content = serde_json::to_string_pretty(&file)
            .map_err(|e| StencilError::Other(anyhow::anyhow!("serializing settings: {e}")))?;

        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, content)?;
        fs::rename(&temp_path, &self.path)?;

        Ok(())
    }
}
