//! Tool configuration.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults are
//! overridden by a user file, which is looked up in the source directory or
//! passed explicitly with `--config`.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! width = 700               # Transcode target width in pixels
//! quality = 80              # Transcode quality (1-100)
//! thumb_width = 240         # Gallery thumbnail width
//! thumb_quality = 70        # Gallery thumbnail quality
//! sort_desc = true          # Walk each directory in reverse listing order
//! ignored_files = []        # Names (after sanitizing) left out of the mirror
//! image_extensions = ["jpg", "jpeg", "png", "gif", "webp", "tif", "tiff"]
//! eol = "\n"                # Line terminator of rendered HTML
//! indent = "    "           # Indentation unit of rendered HTML
//! html_init_depth = 2       # Indentation depth of the outermost rendered element
//! debug = true              # Print the full mirrored tree
//!
//! [list]
//! sort_desc = true          # false reverses siblings once more when rendering
//!
//! [gallery]
//! years_desc = true         # "2020 ..." entries first, newest first
//! files_first = false       # Files before directories at every level
//! thumbs_dir = "thumbs"     # Thumbnail subdirectory of the output
//!
//! [fnames]
//! list = "list.html"
//! gallery = "gallery.html"
//! content = "content.json"
//!
//! [templates]
//! index = "index.html"      # Page template; bundled unless `dir` is set
//! # dir = "my-templates"
//!
//! [assets]
//! common = [{ name = "index.js" }, { name = "index.css" }]
//! gallery = [{ name = "lightbox.js" }, { name = "lightbox.css" }]
//!
//! [processing]
//! max_processes = 4         # Max parallel workers (omit for auto = CPU cores)
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::naming::sanitize;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the config file looked up in the source directory.
pub const CONFIG_FILENAME: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Tool configuration loaded from `config.toml`.
///
/// All fields have defaults; user files only specify overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Transcode target width in pixels.
    pub width: u32,
    /// Transcode encoding quality (1-100).
    pub quality: u32,
    /// Gallery thumbnail width in pixels.
    pub thumb_width: u32,
    /// Gallery thumbnail quality (1-100).
    pub thumb_quality: u32,
    /// Walk directories in reverse listing order.
    pub sort_desc: bool,
    /// Sanitized names excluded from mirroring.
    pub ignored_files: Vec<String>,
    /// Extensions the gallery renders as images (compared case-insensitively).
    pub image_extensions: Vec<String>,
    /// Line terminator of rendered HTML.
    pub eol: String,
    /// Indentation unit of rendered HTML.
    pub indent: String,
    /// Indentation depth of the outermost rendered element.
    pub html_init_depth: usize,
    /// Verbose run output.
    pub debug: bool,
    pub list: ListConfig,
    pub gallery: GalleryConfig,
    pub fnames: FileNames,
    pub templates: TemplatesConfig,
    /// Static files to copy, by group (`common`, `gallery`, ...).
    pub assets: BTreeMap<String, Vec<AssetSpec>>,
    pub processing: ProcessingConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            width: 700,
            quality: 80,
            thumb_width: 240,
            thumb_quality: 70,
            sort_desc: true,
            ignored_files: Vec::new(),
            image_extensions: ["jpg", "jpeg", "png", "gif", "webp", "tif", "tiff"]
                .iter()
                .map(|e| e.to_string())
                .collect(),
            eol: "\n".to_string(),
            indent: "    ".to_string(),
            html_init_depth: 2,
            debug: true,
            list: ListConfig::default(),
            gallery: GalleryConfig::default(),
            fnames: FileNames::default(),
            templates: TemplatesConfig::default(),
            assets: default_assets(),
            processing: ProcessingConfig::default(),
        }
    }
}

fn default_assets() -> BTreeMap<String, Vec<AssetSpec>> {
    let group = |names: &[&str]| -> Vec<AssetSpec> {
        names.iter().map(|n| AssetSpec::bundled(n)).collect()
    };
    BTreeMap::from([
        ("common".to_string(), group(&["index.js", "index.css"])),
        ("gallery".to_string(), group(&["lightbox.js", "lightbox.css"])),
    ])
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=100).contains(&self.quality) {
            return Err(ConfigError::Validation("quality must be 1-100".into()));
        }
        if !(1..=100).contains(&self.thumb_quality) {
            return Err(ConfigError::Validation(
                "thumb_quality must be 1-100".into(),
            ));
        }
        if self.width == 0 || self.thumb_width == 0 {
            return Err(ConfigError::Validation(
                "width and thumb_width must be non-zero".into(),
            ));
        }
        if self.eol.is_empty() {
            return Err(ConfigError::Validation("eol must not be empty".into()));
        }
        if self.fnames.list.is_empty()
            || self.fnames.gallery.is_empty()
            || self.fnames.content.is_empty()
        {
            return Err(ConfigError::Validation(
                "fnames entries must not be empty".into(),
            ));
        }
        if self.gallery.thumbs_dir.is_empty() {
            return Err(ConfigError::Validation(
                "gallery.thumbs_dir must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Names the mirror skips: user entries plus every file the tool itself
    /// writes into the output root.
    ///
    /// Pages, the manifest, assets (and their first `dest_dir` segment), the
    /// thumbnail directory and `config.toml` are always part of the set.
    /// Every name is stored sanitized, the form the mirror compares against.
    pub fn ignored_set(&self) -> HashSet<String> {
        let mut set: HashSet<String> = self.ignored_files.iter().cloned().collect();
        for spec in self.assets.values().flatten() {
            set.insert(spec.name.clone());
            if let Some(first) = spec
                .dest_dir
                .as_deref()
                .and_then(|d| d.split('/').find(|s| !s.is_empty()))
            {
                set.insert(first.to_string());
            }
        }
        set.insert(self.fnames.list.clone());
        set.insert(self.fnames.gallery.clone());
        set.insert(self.fnames.content.clone());
        set.insert(self.gallery.thumbs_dir.clone());
        set.insert(CONFIG_FILENAME.to_string());
        set.into_iter().map(|name| sanitize(&name)).collect()
    }

    /// Whether an extension belongs to the configured image set.
    pub fn is_image_extension(&self, ext: &str) -> bool {
        self.image_extensions
            .iter()
            .any(|e| e.eq_ignore_ascii_case(ext))
    }
}

/// List page settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ListConfig {
    /// Keep the manifest order; `false` reverses siblings at render time.
    pub sort_desc: bool,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self { sort_desc: true }
    }
}

/// Gallery page settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryConfig {
    /// Year-prefixed entries first, in manifest order.
    pub years_desc: bool,
    /// Files before directories at every level.
    pub files_first: bool,
    /// Thumbnail subdirectory of the output root.
    pub thumbs_dir: String,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            years_desc: true,
            files_first: false,
            thumbs_dir: "thumbs".to_string(),
        }
    }
}

/// Output file names, all relative to the output root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileNames {
    pub list: String,
    pub gallery: String,
    /// Manifest cache.
    pub content: String,
}

impl Default for FileNames {
    fn default() -> Self {
        Self {
            list: "list.html".to_string(),
            gallery: "gallery.html".to_string(),
            content: "content.json".to_string(),
        }
    }
}

/// Page template lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TemplatesConfig {
    /// Template file name.
    pub index: String,
    /// Directory holding `index`. When absent the bundled template is used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

impl Default for TemplatesConfig {
    fn default() -> Self {
        Self {
            index: "index.html".to_string(),
            dir: None,
        }
    }
}

/// A static file copied into the output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AssetSpec {
    /// File name, both at the source and at the destination.
    pub name: String,
    /// Directory to copy from. When absent the bundled file is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src_dir: Option<PathBuf>,
    /// Directory under the output root to copy into.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dest_dir: Option<String>,
}

impl AssetSpec {
    /// A bundled asset copied to the output root.
    pub fn bundled(name: &str) -> Self {
        Self {
            name: name.to_string(),
            src_dir: None,
            dest_dir: None,
        }
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel workers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_processes
        .map(|n| n.clamp(1, cores))
        .unwrap_or(cores)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Read a config file as a raw TOML value.
pub fn load_raw_file(path: &Path) -> Result<toml::Value, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory, or stock defaults
/// when there is none.
pub fn load_config(dir: &Path) -> Result<SiteConfig, ConfigError> {
    let config_path = dir.join(CONFIG_FILENAME);
    let overlay = if config_path.is_file() {
        Some(load_raw_file(&config_path)?)
    } else {
        None
    };
    resolve_config(stock_defaults_value(), overlay)
}

/// Load config from an explicit file. The file must exist.
pub fn load_config_file(path: &Path) -> Result<SiteConfig, ConfigError> {
    let overlay = load_raw_file(path)?;
    resolve_config(stock_defaults_value(), Some(overlay))
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Printed by `gallerytool --print-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# gallerytool configuration
# =========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys cause an error.

# Transcoded image width in pixels and encoding quality (1-100).
width = 700
quality = 80

# Gallery thumbnail width in pixels and encoding quality (1-100).
thumb_width = 240
thumb_quality = 70

# Walk every directory in reverse listing order.
sort_desc = true

# File or directory names (after sanitizing) left out of the output.
# Output pages, assets, thumbnails and config.toml are always ignored.
ignored_files = []

# Extensions rendered as images on the gallery page.
image_extensions = ["jpg", "jpeg", "png", "gif", "webp", "tif", "tiff"]

# Rendered HTML layout.
eol = "\n"
indent = "    "
html_init_depth = 2

# Print the full mirrored tree while preparing.
debug = true

# ---------------------------------------------------------------------------
# List page
# ---------------------------------------------------------------------------
[list]
# false reverses the siblings of every level once more when rendering.
sort_desc = true

# ---------------------------------------------------------------------------
# Gallery page
# ---------------------------------------------------------------------------
[gallery]
# Year-prefixed entries ("2020 Trip") first, in walk order.
years_desc = true
# Files before directories at every level.
files_first = false
# Thumbnail subdirectory of the output.
thumbs_dir = "thumbs"

# ---------------------------------------------------------------------------
# Output file names
# ---------------------------------------------------------------------------
[fnames]
list = "list.html"
gallery = "gallery.html"
content = "content.json"

# ---------------------------------------------------------------------------
# Page template (bundled unless dir is set)
# ---------------------------------------------------------------------------
[templates]
index = "index.html"
# dir = "templates"

# ---------------------------------------------------------------------------
# Static assets: name, optional src_dir (bundled when absent), optional dest_dir
# ---------------------------------------------------------------------------
[assets]
common = [{ name = "index.js" }, { name = "index.css" }]
gallery = [{ name = "lightbox.js" }, { name = "lightbox.css" }]

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel workers.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_values() {
        let config = SiteConfig::default();
        assert_eq!(config.width, 700);
        assert_eq!(config.quality, 80);
        assert!(config.sort_desc);
        assert!(config.list.sort_desc);
        assert!(config.gallery.years_desc);
        assert!(!config.gallery.files_first);
        assert_eq!(config.fnames.content, "content.json");
        assert_eq!(config.html_init_depth, 2);
    }

    #[test]
    fn parse_partial_config() {
        let toml = r#"
width = 1024

[gallery]
files_first = true
"#;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.width, 1024);
        assert!(config.gallery.files_first);
        // Defaults preserved
        assert!(config.gallery.years_desc);
        assert_eq!(config.quality, 80);
    }

    #[test]
    fn parse_asset_specs() {
        let toml = r#"
[assets]
common = [{ name = "site.css", src_dir = "client", dest_dir = "static" }]
"#;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        let common = &config.assets["common"];
        assert_eq!(common.len(), 1);
        assert_eq!(common[0].src_dir, Some(PathBuf::from("client")));
        assert_eq!(common[0].dest_dir.as_deref(), Some("static"));
    }

    // =========================================================================
    // ignored_set
    // =========================================================================

    #[test]
    fn ignored_set_includes_outputs_and_assets() {
        let mut config = SiteConfig::default();
        config.ignored_files = vec!["Thumbs.db".to_string()];
        let set = config.ignored_set();
        for name in [
            "Thumbs.db",
            "index.js",
            "index.css",
            "lightbox.js",
            "lightbox.css",
            "list.html",
            "gallery.html",
            "content.json",
            "thumbs",
            "config.toml",
        ] {
            assert!(set.contains(name), "{name} should be ignored");
        }
    }

    #[test]
    fn ignored_set_stores_sanitized_names() {
        let mut config = SiteConfig::default();
        config.ignored_files = vec![".DS_Store".to_string(), "Desktop.INI".to_string()];
        let set = config.ignored_set();
        assert!(set.contains(".ds_store"));
        assert!(set.contains("Desktop.ini"));
        assert!(!set.contains(".DS_Store"));
    }

    #[test]
    fn ignored_set_includes_asset_dest_dir() {
        let mut config = SiteConfig::default();
        config.assets.insert(
            "extra".to_string(),
            vec![AssetSpec {
                name: "font.woff2".to_string(),
                src_dir: None,
                dest_dir: Some("static/fonts".to_string()),
            }],
        );
        let set = config.ignored_set();
        assert!(set.contains("static"));
        assert!(set.contains("font.woff2"));
    }

    #[test]
    fn image_extension_check_is_case_insensitive() {
        let config = SiteConfig::default();
        assert!(config.is_image_extension("JPG"));
        assert!(config.is_image_extension("webp"));
        assert!(!config.is_image_extension("txt"));
    }

    // =========================================================================
    // Loading
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config, SiteConfig::default());
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r#"
quality = 65
ignored_files = ["Thumbs.db"]

[list]
sort_desc = false
"#,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.quality, 65);
        assert_eq!(config.ignored_files, vec!["Thumbs.db"]);
        assert!(!config.list.sort_desc);
        // Untouched sections keep their defaults
        assert_eq!(config.assets["common"].len(), 2);
    }

    #[test]
    fn load_config_file_requires_existing_file() {
        let tmp = TempDir::new().unwrap();
        let result = load_config_file(&tmp.path().join("missing.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "this is not valid toml [[[").unwrap();
        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn unknown_key_rejected() {
        let result: Result<SiteConfig, _> = toml::from_str("qualty = 90");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("unknown field"));
    }

    #[test]
    fn unknown_nested_key_rejected() {
        let result: Result<SiteConfig, _> = toml::from_str("[gallery]\nyears = true\n");
        assert!(result.is_err());
    }

    // =========================================================================
    // Validation
    // =========================================================================

    #[test]
    fn validate_default_config_passes() {
        assert!(SiteConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_quality_too_high() {
        let mut config = SiteConfig::default();
        config.quality = 101;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("quality"));
    }

    #[test]
    fn validate_zero_quality() {
        let mut config = SiteConfig::default();
        config.thumb_quality = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("thumb_quality must be 1-100"));
    }

    #[test]
    fn validate_zero_width() {
        let mut config = SiteConfig::default();
        config.thumb_width = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_empty_eol() {
        let mut config = SiteConfig::default();
        config.eol = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_config_validates_values() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "thumb_quality = 200\n").unwrap();
        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    // =========================================================================
    // merge_toml
    // =========================================================================

    #[test]
    fn merge_toml_table_merge() {
        let base: toml::Value =
            toml::from_str("[gallery]\nyears_desc = true\nfiles_first = false\n").unwrap();
        let overlay: toml::Value = toml::from_str("[gallery]\nfiles_first = true\n").unwrap();
        let merged = merge_toml(base, overlay);
        let gallery = merged.get("gallery").unwrap();
        assert_eq!(gallery.get("files_first").unwrap().as_bool(), Some(true));
        assert_eq!(gallery.get("years_desc").unwrap().as_bool(), Some(true));
    }

    #[test]
    fn merge_toml_arrays_are_replaced() {
        let base: toml::Value = toml::from_str(r#"ignored_files = ["a", "b"]"#).unwrap();
        let overlay: toml::Value = toml::from_str(r#"ignored_files = ["c"]"#).unwrap();
        let merged = merge_toml(base, overlay);
        let ignored = merged.get("ignored_files").unwrap().as_array().unwrap();
        assert_eq!(ignored.len(), 1);
    }

    // =========================================================================
    // Stock config
    // =========================================================================

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let config: SiteConfig = toml::from_str(stock_config_toml()).unwrap();
        assert_eq!(config, SiteConfig::default());
    }

    #[test]
    fn stock_defaults_value_has_all_sections() {
        let val = stock_defaults_value();
        for key in ["list", "gallery", "fnames", "templates", "assets", "processing"] {
            assert!(val.get(key).is_some(), "missing section {key}");
        }
    }

    // =========================================================================
    // Processing
    // =========================================================================

    #[test]
    fn effective_threads_user_constrains_down() {
        let config = ProcessingConfig {
            max_processes: Some(1),
        };
        assert_eq!(effective_threads(&config), 1);
    }

    #[test]
    fn effective_threads_clamped_to_cores() {
        let config = ProcessingConfig {
            max_processes: Some(99999),
        };
        let cores = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        assert_eq!(effective_threads(&config), cores);
    }
}
