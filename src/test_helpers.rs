//! Shared test utilities for the gallerytool test suite.
//!
//! Provides source-tree fixtures, manifest builders, and lookup helpers that
//! panic with a readable message on a miss.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let src = source_tree(&["2020 Trip/beach.jpg", "notes.txt", "empty/"]);
//! let manifest = mirror(src.path(), out.path(), &PassthroughLeaf, &options).unwrap();
//!
//! let trip = find_dir(&manifest, "2020_Trip");
//! assert_eq!(child_labels(trip), vec!["beach.jpg"]);
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::types::{DirEntry, FileEntry, Manifest, ManifestEntry, Outcome};

// =========================================================================
// Fixture setup
// =========================================================================

/// Write a small RGB JPEG with a gradient so it decodes as a real image.
pub fn create_test_jpeg(path: &Path, width: u32, height: u32) {
    use image::ImageEncoder;

    let img = image::RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    let file = std::fs::File::create(path).unwrap();
    let writer = std::io::BufWriter::new(file);
    image::codecs::jpeg::JpegEncoder::new(writer)
        .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
        .unwrap();
}

/// Build a source tree under `root`.
///
/// Paths ending in `/` become (possibly empty) directories. Paths ending in
/// `.jpg` get a real 64x48 JPEG; anything else gets its own path as text.
pub fn write_tree(root: &Path, paths: &[&str]) {
    for rel in paths {
        let path = root.join(rel.trim_end_matches('/'));
        if rel.ends_with('/') {
            std::fs::create_dir_all(&path).unwrap();
            continue;
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        if rel.ends_with(".jpg") {
            create_test_jpeg(&path, 64, 48);
        } else {
            std::fs::write(&path, rel).unwrap();
        }
    }
}

/// Fresh temp directory holding a source tree (see [`write_tree`]).
pub fn source_tree(paths: &[&str]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    write_tree(tmp.path(), paths);
    tmp
}

// =========================================================================
// Manifest builders
// =========================================================================

/// A reconstructed-style file entry: sanitized name only.
pub fn bare_file(file: &str) -> ManifestEntry {
    ManifestEntry::File(FileEntry {
        file: file.to_string(),
        name: None,
        ext: None,
        outcome: None,
    })
}

/// A file entry as `prepare` records it after a successful transcode.
pub fn ok_file(file: &str, name: &str, ext: &str) -> ManifestEntry {
    ManifestEntry::File(FileEntry {
        file: file.to_string(),
        name: Some(name.to_string()),
        ext: Some(ext.to_string()),
        outcome: Some(Outcome::Ok),
    })
}

/// A file entry for which nothing was written.
pub fn failed_file(name: &str, ext: &str) -> ManifestEntry {
    ManifestEntry::File(FileEntry {
        file: String::new(),
        name: Some(name.to_string()),
        ext: Some(ext.to_string()),
        outcome: Some(Outcome::Fail("copy failed".to_string())),
    })
}

pub fn dir(dir: &str, name: &str, children: Vec<ManifestEntry>) -> ManifestEntry {
    ManifestEntry::Dir(root(dir, name, children))
}

pub fn root(dir: &str, name: &str, children: Vec<ManifestEntry>) -> Manifest {
    DirEntry {
        dir: dir.to_string(),
        name: name.to_string(),
        children,
    }
}

// =========================================================================
// Manifest lookups: panics with a clear message on miss
// =========================================================================

/// Find a direct subdirectory by sanitized name. Panics if not found.
pub fn find_dir<'a>(parent: &'a DirEntry, name: &str) -> &'a DirEntry {
    parent
        .children
        .iter()
        .find_map(|c| match c {
            ManifestEntry::Dir(d) if d.dir == name => Some(d),
            _ => None,
        })
        .unwrap_or_else(|| {
            let labels = child_labels(parent);
            panic!("dir '{name}' not found in '{}'. Available: {labels:?}", parent.dir)
        })
}

/// Find a direct file child by label. Panics if not found.
pub fn find_file<'a>(parent: &'a DirEntry, label: &str) -> &'a FileEntry {
    parent
        .children
        .iter()
        .find_map(|c| match c {
            ManifestEntry::File(f) if f.label() == label => Some(f),
            _ => None,
        })
        .unwrap_or_else(|| {
            let labels = child_labels(parent);
            panic!("file '{label}' not found in '{}'. Available: {labels:?}", parent.dir)
        })
}

/// Labels of the direct children in manifest order.
pub fn child_labels(parent: &DirEntry) -> Vec<&str> {
    parent.children.iter().map(|c| c.label()).collect()
}
