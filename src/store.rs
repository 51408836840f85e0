//! Manifest persistence.
//!
//! `prepare` writes the manifest as pretty JSON to `<dest>/content.json`
//! (name configurable via `fnames.content`). `list` and `gallery` read it
//! back. The JSON file is a cache, not the source of truth: when it is
//! missing, empty, or unparsable, the manifest is rebuilt by walking the
//! output tree itself with a [`PassthroughLeaf`]. A rebuilt manifest knows
//! only the sanitized names, so pages render with those as labels.
//!
//! ```text
//! load(dest)
//!   ├── content.json ok    → Loaded { origin: Cache }
//!   └── missing/empty/bad  → mirror(dest, dest, PassthroughLeaf)
//!                             → Loaded { origin: Rebuilt(reason) }
//! ```

use crate::config::SiteConfig;
use crate::mirror::{MirrorError, MirrorOptions, mirror};
use crate::transform::PassthroughLeaf;
use crate::types::Manifest;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Why the cached manifest could not be used. Never fatal.
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{0} is empty")]
    Empty(PathBuf),
    #[error("cannot parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Where a loaded manifest came from.
#[derive(Debug)]
pub enum Origin {
    Cache,
    Rebuilt(CacheError),
}

#[derive(Debug)]
pub struct Loaded {
    pub manifest: Manifest,
    pub origin: Origin,
}

/// Write `manifest` to `dest_root/file_name`, creating `dest_root` if needed.
pub fn save<'a>(
    manifest: &'a Manifest,
    dest_root: &Path,
    file_name: &str,
) -> Result<&'a Manifest, StoreError> {
    std::fs::create_dir_all(dest_root)?;
    let json = serde_json::to_string_pretty(manifest)?;
    std::fs::write(dest_root.join(file_name), json)?;
    Ok(manifest)
}

/// Read the cached manifest without any fallback.
pub fn read_cached(path: &Path) -> Result<Manifest, CacheError> {
    let content = std::fs::read_to_string(path).map_err(|source| CacheError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    if content.trim().is_empty() {
        return Err(CacheError::Empty(path.to_path_buf()));
    }
    serde_json::from_str(&content).map_err(|source| CacheError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load the manifest of `dest_root`, rebuilding it from the tree when the
/// cache is unusable.
///
/// Only a failure to walk the output tree is an error.
pub fn load(dest_root: &Path, config: &SiteConfig) -> Result<Loaded, MirrorError> {
    match read_cached(&dest_root.join(&config.fnames.content)) {
        Ok(manifest) => Ok(Loaded {
            manifest,
            origin: Origin::Cache,
        }),
        Err(reason) => {
            let options = MirrorOptions::from_config(config, false);
            let manifest = mirror(dest_root, dest_root, &PassthroughLeaf, &options)?;
            Ok(Loaded {
                manifest,
                origin: Origin::Rebuilt(reason),
            })
        }
    }
}
