//! The four commands of the CLI, as library functions.
//!
//! | Command | Steps |
//! |---|---|
//! | `prepare` | mirror source → dest with transcoding, save `content.json`, copy `common` assets |
//! | `list` | load manifest, render list, wrap in template, write `list.html` |
//! | `gallery` | load manifest, make thumbnails, render gallery, write `gallery.html`, copy `gallery` assets |
//! | `all` | `prepare`, then `list` and `gallery` from the fresh manifest |
//!
//! Commands return reports; printing them is left to the caller (see
//! [`output`](crate::output)).

use crate::assets::{AssetError, copy_assets, load_template};
use crate::config::SiteConfig;
use crate::gallery::render_gallery;
use crate::html::{TemplateError, assemble_page};
use crate::imaging::{ImageBackend, TranscodeConfig};
use crate::list::render_list;
use crate::mirror::{MirrorError, MirrorOptions, mirror};
use crate::naming::sanitize;
use crate::store::{self, Origin, StoreError};
use crate::thumbs::{ThumbResult, create_thumbnails};
use crate::transform::TranscodeLeaf;
use crate::types::Manifest;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Output name when the source path has no usable final component.
const DEFAULT_SITE_NAME: &str = "site";

#[derive(Error, Debug)]
pub enum CommandError {
    #[error(transparent)]
    Mirror(#[from] MirrorError),
    #[error("Failed to write manifest: {0}")]
    Store(#[from] StoreError),
    #[error(transparent)]
    Template(#[from] TemplateError),
    #[error(transparent)]
    Asset(#[from] AssetError),
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Result of `prepare`.
#[derive(Debug)]
pub struct PrepareReport {
    pub manifest: Manifest,
    pub assets: Vec<String>,
}

/// Result of `list` or `gallery`.
#[derive(Debug)]
pub struct PageReport {
    /// The written page.
    pub page: PathBuf,
    /// Where the manifest came from; `None` when the caller passed it in.
    pub origin: Option<Origin>,
    /// Thumbnail results (gallery only).
    pub thumbs: Vec<ThumbResult>,
    pub assets: Vec<String>,
}

/// Result of `all`.
#[derive(Debug)]
pub struct AllReport {
    pub prepare: PrepareReport,
    pub list: PageReport,
    pub gallery: PageReport,
}

/// Output directory used when none is given: `<source>.web`, next to the
/// source, with a sanitized name.
///
/// ```
/// # use gallerytool::commands::default_dest;
/// # use std::path::{Path, PathBuf};
/// assert_eq!(default_dest(Path::new("albums/My Photos")), PathBuf::from("albums/My_Photos.web"));
/// ```
pub fn default_dest(source: &Path) -> PathBuf {
    let absolute;
    let named = match source.file_name() {
        Some(_) => source,
        None => {
            absolute = std::path::absolute(source).unwrap_or_else(|_| source.to_path_buf());
            absolute.as_path()
        }
    };
    let name = named
        .file_name()
        .map(|n| sanitize(&n.to_string_lossy()))
        .unwrap_or_else(|| DEFAULT_SITE_NAME.to_string());
    named.with_file_name(format!("{}.web", name))
}

/// Mirror `source` into `dest`, transcoding every file, and record the result.
pub fn prepare<B: ImageBackend + ?Sized>(
    source: &Path,
    dest: &Path,
    config: &SiteConfig,
    backend: &B,
) -> Result<PrepareReport, CommandError> {
    let leaf = TranscodeLeaf::new(backend, TranscodeConfig::new(config.width, config.quality));
    let options = MirrorOptions::from_config(config, true);
    let manifest = mirror(source, dest, &leaf, &options)?;
    store::save(&manifest, dest, &config.fnames.content)?;
    let assets = copy_assets("common", config, dest)?;
    Ok(PrepareReport { manifest, assets })
}

/// Write the list page of `dest`.
///
/// Uses `manifest` when given, otherwise loads it from `dest`.
pub fn list(
    dest: &Path,
    config: &SiteConfig,
    manifest: Option<&Manifest>,
) -> Result<PageReport, CommandError> {
    let (manifest, origin) = resolve_manifest(dest, config, manifest)?;
    let fragment = render_list(&manifest.children, "", 0, config);
    let page = write_page(dest, &config.fnames.list, &fragment, config)?;
    Ok(PageReport {
        page,
        origin,
        thumbs: Vec::new(),
        assets: Vec::new(),
    })
}

/// Write the gallery page of `dest`, with thumbnails and lightbox assets.
///
/// Uses `manifest` when given, otherwise loads it from `dest`.
pub fn gallery<B: ImageBackend + ?Sized>(
    dest: &Path,
    config: &SiteConfig,
    backend: &B,
    manifest: Option<&Manifest>,
) -> Result<PageReport, CommandError> {
    let (manifest, origin) = resolve_manifest(dest, config, manifest)?;
    let thumbs = create_thumbnails(&manifest, dest, config, backend);
    let fragment = render_gallery(&manifest.children, "", 0, config);
    let page = write_page(dest, &config.fnames.gallery, &fragment, config)?;
    let assets = copy_assets("gallery", config, dest)?;
    Ok(PageReport {
        page,
        origin,
        thumbs,
        assets,
    })
}

/// `prepare`, then both pages from the fresh manifest.
pub fn all<B: ImageBackend + ?Sized>(
    source: &Path,
    dest: &Path,
    config: &SiteConfig,
    backend: &B,
) -> Result<AllReport, CommandError> {
    let prepare = prepare(source, dest, config, backend)?;
    let list = list(dest, config, Some(&prepare.manifest))?;
    let gallery = gallery(dest, config, backend, Some(&prepare.manifest))?;
    Ok(AllReport {
        prepare,
        list,
        gallery,
    })
}

fn resolve_manifest<'a>(
    dest: &Path,
    config: &SiteConfig,
    manifest: Option<&'a Manifest>,
) -> Result<(Cow<'a, Manifest>, Option<Origin>), CommandError> {
    match manifest {
        Some(m) => Ok((Cow::Borrowed(m), None)),
        None => {
            let loaded = store::load(dest, config)?;
            Ok((Cow::Owned(loaded.manifest), Some(loaded.origin)))
        }
    }
}

fn write_page(
    dest: &Path,
    file_name: &str,
    fragment: &str,
    config: &SiteConfig,
) -> Result<PathBuf, CommandError> {
    let template = load_template(config)?;
    let html = assemble_page(fragment, &template)?;
    let path = dest.join(file_name);
    std::fs::write(&path, html).map_err(|source| CommandError::Write {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}
