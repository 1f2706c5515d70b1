//! Persistent settings for stencil.
//!
//! The only persisted state is the catalog registry, kept as a JSON file in
//! the user's config directory (overridable via `--config-dir` or the
//! `STENCIL_CONFIG_DIR` environment variable).

pub mod store;

pub use store::{CatalogEntry, SettingsStore};

/// Default settings directory (`~/.config/stencil` on Linux).
pub fn default_config_dir() -> std::path::PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join("stencil")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_dir_valid() {
        let path = default_config_dir();
        assert!(path.ends_with("stencil"));
    }
}
