//! Tree mirroring.
//!
//! Reproduces a source directory tree under a destination root with every
//! name [sanitized](crate::naming::sanitize), handing each file to a
//! [`LeafTransform`] and collecting the results into a [`Manifest`].
//!
//! ## Per-level algorithm
//!
//! ```text
//! photos/                     photos.web/
//! ├── 2020 Trip/         →    ├── 2020_Trip/
//! │   └── Beach.JPG           │   └── Beach.jpg     (transform_leaf)
//! ├── empty/                  │                     (no directory created)
//! └── notes.txt               └── notes.txt         (transform_leaf)
//! ```
//!
//! 1. List the directory and sort entries by name.
//! 2. Drop entries whose sanitized name is ignored.
//! 3. If anything is left, create the destination directory.
//! 4. Reverse the order when `sort_desc` is set.
//! 5. Process siblings in parallel: recurse into directories, transform files.
//!
//! Siblings run on the rayon pool; their results are collected in input order,
//! so the manifest is deterministic no matter which sibling finishes first.
//! The first fatal error of a level short-circuits its remaining siblings and
//! is returned to the caller. Leaf problems are never fatal (see
//! [`transform`](crate::transform)).
//!
//! Symlinks are followed. A directory link that resolves to a directory
//! already on the current walk path is reported as
//! [`MirrorError::SymlinkLoop`] instead of being descended into.
//!
//! Names that are not valid UTF-8 are labelled and sanitized in their lossy
//! form, but the file itself is always read through the path the listing
//! returned.

use crate::config::SiteConfig;
use crate::naming::sanitize;
use crate::transform::LeafTransform;
use crate::types::{DirEntry, Manifest, ManifestEntry};
use rayon::prelude::*;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MirrorError {
    #[error("Failed to read directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to read metadata of {path}: {source}")]
    Stat {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Symlink {path} points back into its own ancestor {target}")]
    SymlinkLoop { path: PathBuf, target: PathBuf },
}

/// Walk settings shared by every level of one mirror run.
#[derive(Debug, Clone)]
pub struct MirrorOptions {
    /// Sanitized names left out of the walk.
    pub ignored: HashSet<String>,
    /// Reverse the name order at each level.
    pub sort_desc: bool,
    /// Create destination directories. Off when rebuilding from an existing tree.
    pub create_dirs: bool,
}

impl MirrorOptions {
    pub fn from_config(config: &SiteConfig, create_dirs: bool) -> Self {
        Self {
            ignored: config.ignored_set(),
            sort_desc: config.sort_desc,
            create_dirs,
        }
    }
}

/// Mirror `source_root` into `dest_root`.
///
/// The returned manifest's `dir` is the destination basename and its `name`
/// the source basename.
pub fn mirror<T: LeafTransform + ?Sized>(
    source_root: &Path,
    dest_root: &Path,
    transform: &T,
    options: &MirrorOptions,
) -> Result<Manifest, MirrorError> {
    let real_root = fs::canonicalize(source_root).map_err(|source| MirrorError::ReadDir {
        path: source_root.to_path_buf(),
        source,
    })?;
    let children = mirror_level(source_root, dest_root, &[real_root], transform, options)?;
    Ok(DirEntry {
        dir: base_name(dest_root),
        name: base_name(source_root),
        children,
    })
}

fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// A listed entry, classified before any work is scheduled.
struct Listed {
    /// Label for the manifest. Lossy when the file name is not UTF-8.
    name: String,
    /// Path as returned by the listing; used for all file access.
    path: PathBuf,
    kind: Kind,
}

enum Kind {
    File,
    /// Directory, with its canonical path for loop detection.
    Dir(PathBuf),
}

/// List, filter and classify one directory.
///
/// `ancestors` holds the canonical paths from the root down to `dir` itself.
fn list_entries(
    dir: &Path,
    ancestors: &[PathBuf],
    ignored: &HashSet<String>,
) -> Result<Vec<Listed>, MirrorError> {
    let read_err = |source| MirrorError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut found = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_err)? {
        let entry = entry.map_err(read_err)?;
        let name = entry.file_name().to_string_lossy().to_string();
        if !ignored.contains(&sanitize(&name)) {
            found.push((name, entry));
        }
    }
    found.sort_by(|(a, a_entry), (b, b_entry)| {
        a.cmp(b).then_with(|| a_entry.file_name().cmp(&b_entry.file_name()))
    });

    let real_dir = ancestors.last().map_or(dir, PathBuf::as_path);
    found
        .into_iter()
        .map(|(name, entry)| {
            let path = entry.path();
            let kind = classify(&entry, &path, real_dir, ancestors)?;
            Ok(Listed { name, path, kind })
        })
        .collect()
}

/// Symlinks are followed, except a directory link that resolves to one of
/// the directories currently being walked.
fn classify(
    entry: &fs::DirEntry,
    path: &Path,
    real_dir: &Path,
    ancestors: &[PathBuf],
) -> Result<Kind, MirrorError> {
    let stat_err = |source| MirrorError::Stat {
        path: path.to_path_buf(),
        source,
    };

    let file_type = entry.file_type().map_err(stat_err)?;
    if !file_type.is_symlink() {
        return Ok(if file_type.is_dir() {
            Kind::Dir(real_dir.join(entry.file_name()))
        } else {
            Kind::File
        });
    }

    if !fs::metadata(path).map_err(stat_err)?.is_dir() {
        return Ok(Kind::File);
    }
    let target = fs::canonicalize(path).map_err(stat_err)?;
    if ancestors.contains(&target) {
        return Err(MirrorError::SymlinkLoop {
            path: path.to_path_buf(),
            target,
        });
    }
    Ok(Kind::Dir(target))
}

fn mirror_level<T: LeafTransform + ?Sized>(
    source_dir: &Path,
    dest_dir: &Path,
    ancestors: &[PathBuf],
    transform: &T,
    options: &MirrorOptions,
) -> Result<Vec<ManifestEntry>, MirrorError> {
    let mut entries = list_entries(source_dir, ancestors, &options.ignored)?;

    if !entries.is_empty() && options.create_dirs {
        fs::create_dir_all(dest_dir).map_err(|source| MirrorError::CreateDir {
            path: dest_dir.to_path_buf(),
            source,
        })?;
    }

    if options.sort_desc {
        entries.reverse();
    }

    entries
        .par_iter()
        .map(|entry| match &entry.kind {
            Kind::Dir(real) => {
                let dir = sanitize(&entry.name);
                let mut chain = ancestors.to_vec();
                chain.push(real.clone());
                let children =
                    mirror_level(&entry.path, &dest_dir.join(&dir), &chain, transform, options)?;
                Ok(ManifestEntry::Dir(DirEntry {
                    dir,
                    name: entry.name.clone(),
                    children,
                }))
            }
            Kind::File => Ok(ManifestEntry::File(transform.transform_leaf(
                &entry.path,
                &entry.name,
                dest_dir,
            ))),
        })
        .collect()
}
