//! Builtin catalog embedded at compile time.
//!
//! Ships a small set of templates (`hello`, `cli`) so `stencil init` works
//! with an empty registry. Consulted last during template resolution, after
//! every registered catalog.

use include_dir::{include_dir, Dir};

use crate::catalog::manifest::{CatalogBase, Manifest};
use crate::error::{Result, StencilError};

static BUILTIN_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/templates");

const MANIFEST_FILE: &str = "catalog.json";

/// Load the builtin catalog manifest.
pub fn load_manifest() -> Result<Manifest> {
    let file = BUILTIN_DIR
        .get_file(MANIFEST_FILE)
        .ok_or_else(|| StencilError::Other(anyhow::anyhow!("builtin catalog.json missing")))?;

    let content = file.contents_utf8().ok_or_else(|| StencilError::Parse {
        reference: MANIFEST_FILE.to_string(),
        message: "Invalid UTF-8".to_string(),
    })?;

    let mut manifest = Manifest::parse(content, MANIFEST_FILE)?;
    manifest.base = CatalogBase::Builtin;
    Ok(manifest)
}

/// Read an embedded template source.
pub fn read_source(spec: &str) -> Result<Vec<u8>> {
    BUILTIN_DIR
        .get_file(spec)
        .map(|f| f.contents().to_vec())
        .ok_or_else(|| StencilError::Fetch {
            reference: spec.to_string(),
            message: "no such builtin template source".to_string(),
        })
}
