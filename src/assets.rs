//! Static client files and the page template.
//!
//! The default template, stylesheets and scripts are compiled into the
//! binary from `static/`, so a bare `gallerytool all photos` produces a
//! working site. Any of them can be replaced from disk: the template through
//! `templates.dir`, assets through `src_dir` on their [`AssetSpec`].
//!
//! | File | Group | Role |
//! |---|---|---|
//! | `index.html` | template | page shell, both pages |
//! | `index.css`, `index.js` | `common` | layout, collapsible list |
//! | `lightbox.css`, `lightbox.js` | `gallery` | image viewer |

use crate::config::{AssetSpec, SiteConfig};
use crate::html::TemplateError;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const BUNDLED: &[(&str, &str)] = &[
    ("index.html", include_str!("../static/index.html")),
    ("index.css", include_str!("../static/index.css")),
    ("index.js", include_str!("../static/index.js")),
    ("lightbox.css", include_str!("../static/lightbox.css")),
    ("lightbox.js", include_str!("../static/lightbox.js")),
];

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("No bundled asset named {0}")]
    NotBundled(String),
    #[error("Failed to copy asset {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Contents of a bundled file, if there is one by that name.
pub fn bundled(name: &str) -> Option<&'static str> {
    BUNDLED
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, content)| *content)
}

/// Load the page template named by `templates.index`.
pub fn load_template(config: &SiteConfig) -> Result<String, TemplateError> {
    let name = &config.templates.index;
    let template = match &config.templates.dir {
        Some(dir) => {
            let path = dir.join(name);
            fs::read_to_string(&path).map_err(|source| TemplateError::Io { path, source })?
        }
        None => bundled(name)
            .ok_or_else(|| TemplateError::NotFound(name.clone()))?
            .to_string(),
    };
    if template.is_empty() {
        return Err(TemplateError::Empty);
    }
    Ok(template)
}

/// Copy every asset of `group` into `dest_root`.
///
/// Returns the written paths relative to `dest_root`. An unknown group copies
/// nothing.
pub fn copy_assets(
    group: &str,
    config: &SiteConfig,
    dest_root: &Path,
) -> Result<Vec<String>, AssetError> {
    let Some(specs) = config.assets.get(group) else {
        return Ok(Vec::new());
    };
    specs.iter().map(|spec| copy_asset(spec, dest_root)).collect()
}

fn copy_asset(spec: &AssetSpec, dest_root: &Path) -> Result<String, AssetError> {
    let rel = match spec.dest_dir.as_deref().map(|d| d.trim_matches('/')) {
        Some(dir) if !dir.is_empty() => format!("{}/{}", dir, spec.name),
        _ => spec.name.clone(),
    };
    let target = dest_root.join(&rel);

    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(io_err(parent))?;
    }
    match &spec.src_dir {
        Some(dir) => {
            let source = dir.join(&spec.name);
            fs::copy(&source, &target).map_err(io_err(&source))?;
        }
        None => {
            let content =
                bundled(&spec.name).ok_or_else(|| AssetError::NotBundled(spec.name.clone()))?;
            fs::write(&target, content).map_err(io_err(&target))?;
        }
    }
    Ok(rel)
}

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> AssetError {
    let path = path.to_path_buf();
    move |source| AssetError::Io { path, source }
}
