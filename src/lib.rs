//! # gallerytool
//!
//! Turns a directory of images into a static, browsable gallery site. The
//! source tree is mirrored into an output tree with sanitized names, images
//! are resized on the way, and two pages are rendered from a record of what
//! was written: a collapsible file list and a thumbnail gallery with a
//! lightbox.
//!
//! # Architecture: Mirror, Record, Render
//!
//! ```text
//! 1. prepare   photos/      →  photos.web/ + content.json   (mirror + transcode)
//! 2. list      content.json →  list.html                    (outline)
//! 3. gallery   content.json →  gallery.html + thumbs/        (thumbnails + lightbox)
//! ```
//!
//! `content.json` is the manifest: a tree of directory and file entries in
//! walk order, with original names, extensions and per-file outcomes. The
//! page commands read it back; when it is missing or unreadable they rebuild
//! a plainer manifest from the output tree itself, so pages can always be
//! regenerated from a published directory.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`naming`] | Name sanitizing shared by every stage |
//! | [`mirror`] | Parallel tree walker producing the manifest |
//! | [`transform`] | Per-file work done by the mirror: transcode or record |
//! | [`imaging`] | Pure-Rust resize and re-encode behind the [`imaging::ImageBackend`] trait |
//! | [`store`] | `content.json` save, load and rebuild |
//! | [`list`] | File-list page rendering |
//! | [`gallery`] | Gallery page rendering and ordering rules |
//! | [`html`] | Indentation layout and template splicing |
//! | [`assets`] | Bundled template, CSS and JS; asset copying |
//! | [`thumbs`] | Gallery thumbnails |
//! | [`commands`] | `prepare`, `list`, `gallery`, `all` |
//! | [`config`] | `config.toml` loading, defaults, validation |
//! | [`types`] | Manifest types |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Problems Are Data
//!
//! A file that cannot be resized is copied as is; a file that cannot even be
//! copied is recorded with an empty output name. Both end up in the manifest
//! as an outcome and are shown on the console, but neither stops the run.
//! Only failures to read or create directories, write the manifest, load the
//! template or copy assets are fatal.
//!
//! ## Deterministic Output Under Parallelism
//!
//! Siblings are processed on the rayon pool, but results are collected in
//! input order. Two runs over the same tree produce the same manifest and
//! byte-identical pages.
//!
//! ## Maud For Leaf Markup
//!
//! The page layout is line-oriented (one element per line, configurable
//! indentation), which a template engine would fight. Lines are assembled
//! with `format!`; everything interpolated into them goes through
//! [maud](https://maud.lambda.xyz/) and is escaped.

pub mod assets;
pub mod commands;
pub mod config;
pub mod gallery;
pub mod html;
pub mod imaging;
pub mod list;
pub mod mirror;
pub mod naming;
pub mod output;
pub mod store;
pub mod thumbs;
pub mod transform;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
