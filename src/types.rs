//! Manifest types shared by the mirror, the store and both renderers.
//!
//! A manifest is a tree of [`ManifestEntry`] values rooted at a [`DirEntry`].
//! It is written to `content.json` by `prepare` and read back unchanged by
//! `list` and `gallery`:
//!
//! ```json
//! {
//!   "dir": "photos.web",
//!   "name": "photos",
//!   "children": [
//!     { "dir": "2020_Trip", "name": "2020 Trip", "children": [
//!       { "file": "beach.jpg", "name": "Beach", "ext": "jpg",
//!         "outcome": { "status": "ok" } }
//!     ] },
//!     { "file": "notes.txt", "name": "notes", "ext": "txt",
//!       "outcome": { "status": "warn", "message": "Unsupported input format: txt" } }
//!   ]
//! }
//! ```
//!
//! Reconstructed manifests (see [`store`](crate::store)) only carry `file` on
//! file entries.

use serde::{Deserialize, Serialize};

/// A manifest is the root directory entry of the mirrored output.
pub type Manifest = DirEntry;

/// One node of the manifest tree: a directory or a file, never both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ManifestEntry {
    Dir(DirEntry),
    File(FileEntry),
}

/// A mirrored directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DirEntry {
    /// Sanitized directory name in the output tree.
    pub dir: String,
    /// Original directory name.
    pub name: String,
    /// Entries in walk order.
    pub children: Vec<ManifestEntry>,
}

/// A mirrored file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileEntry {
    /// Sanitized file name in the output tree. Empty when the file could not
    /// be written at all.
    pub file: String,
    /// Original file name without its extension.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Lowercased original extension.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ext: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<Outcome>,
}

/// What happened to a file during `prepare`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "message", rename_all = "lowercase")]
pub enum Outcome {
    /// Transcoded.
    Ok,
    /// Transcoding failed, the original bytes were copied instead.
    Warn(String),
    /// Nothing was written.
    Fail(String),
}

impl DirEntry {
    /// Label shown to readers: the original name, or the sanitized one.
    pub fn label(&self) -> &str {
        if self.name.is_empty() {
            &self.dir
        } else {
            &self.name
        }
    }

    /// Iterate over all file entries of the subtree, depth first, together
    /// with their path relative to this directory.
    pub fn files(&self) -> Vec<(String, &FileEntry)> {
        let mut out = Vec::new();
        collect_files(&self.children, "", &mut out);
        out
    }
}

fn collect_files<'a>(
    children: &'a [ManifestEntry],
    prefix: &str,
    out: &mut Vec<(String, &'a FileEntry)>,
) {
    for child in children {
        match child {
            ManifestEntry::Dir(d) => collect_files(&d.children, &join_rel(prefix, &d.dir), out),
            ManifestEntry::File(f) => out.push((join_rel(prefix, &f.file), f)),
        }
    }
}

impl FileEntry {
    /// Label shown to readers: the original name, or the sanitized file name.
    pub fn label(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => &self.file,
        }
    }

    /// Extension used for classification: the recorded original extension,
    /// else the extension of the sanitized file name.
    pub fn extension(&self) -> Option<String> {
        self.ext.clone().or_else(|| {
            self.file
                .rfind('.')
                .map(|dot| self.file[dot + 1..].to_lowercase())
        })
    }

    /// Whether a destination artifact exists for this entry.
    pub fn is_written(&self) -> bool {
        !self.file.is_empty() && !matches!(self.outcome, Some(Outcome::Fail(_)))
    }
}

impl ManifestEntry {
    pub fn is_file(&self) -> bool {
        matches!(self, ManifestEntry::File(_))
    }

    /// Display label of either variant.
    pub fn label(&self) -> &str {
        match self {
            ManifestEntry::Dir(d) => d.label(),
            ManifestEntry::File(f) => f.label(),
        }
    }
}

/// Join a relative URL prefix and a name with `/`.
pub fn join_rel(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", prefix, name)
    }
}
