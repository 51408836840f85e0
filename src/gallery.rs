//! Gallery page rendering.
//!
//! Directories become headed sections, images become thumbnail links wired
//! to the lightbox, and other files become plain links tagged with their
//! extension:
//!
//! ```html
//!         <div class="dir" data-level="0">
//!             <h1 class="name">2020 Trip</h1>
//!             <div class="file image" data-level="1">
//!                 <a class="thumb" href="2020_Trip/beach.jpg" data-lightbox="2020_Trip" data-title="beach"><img src="thumbs/2020_Trip/beach.jpg" alt="beach"></a>
//!             </div>
//!         </div>
//!         <div class="file" data-level="0">
//!             <a href="notes.txt">notes <span class="ext">[txt]</span></a>
//!         </div>
//! ```
//!
//! ## Ordering
//!
//! Each level is reordered before rendering:
//!
//! 1. Entries whose label starts with a four digit year are split from the
//!    rest. With `gallery.years_desc` the year entries come first in manifest
//!    order, followed by the others reversed; otherwise the others (reversed)
//!    come first, followed by the year entries reversed.
//! 2. With `gallery.files_first`, files move in front of directories. The
//!    relative order inside each kind is kept.
//!
//! Images sharing a directory share a lightbox group (the directory's URL
//! path, or `gallery` at the output root).

use crate::config::SiteConfig;
use crate::html::{Layout, escape};
use crate::naming::has_year_prefix;
use crate::types::{FileEntry, ManifestEntry, join_rel};
use maud::{Markup, html};

/// Lightbox group of images at the output root.
const ROOT_GROUP: &str = "gallery";

/// Deepest level rendered as a real `<hN>` heading.
const MAX_HEADING: usize = 6;

/// Render `children` (and everything below) as gallery HTML.
///
/// `prefix` is the URL path of the directory holding `children`, empty at the
/// output root; `depth` is its nesting level.
pub fn render_gallery(
    children: &[ManifestEntry],
    prefix: &str,
    depth: usize,
    config: &SiteConfig,
) -> String {
    let layout = Layout::from_config(config);
    let mut out = String::new();
    render_level(&mut out, children, prefix, depth, &layout, config);
    out
}

/// Apply the year grouping and files-first rules to one level.
pub fn order_entries<'a>(children: &'a [ManifestEntry], config: &SiteConfig) -> Vec<&'a ManifestEntry> {
    let (years, others): (Vec<&ManifestEntry>, Vec<&ManifestEntry>) =
        children.iter().partition(|c| has_year_prefix(c.label()));

    let mut ordered: Vec<&ManifestEntry> = if config.gallery.years_desc {
        years.into_iter().chain(others.into_iter().rev()).collect()
    } else {
        others.into_iter().rev().chain(years.into_iter().rev()).collect()
    };

    if config.gallery.files_first {
        ordered.sort_by_key(|c| !c.is_file());
    }
    ordered
}

fn render_level(
    out: &mut String,
    children: &[ManifestEntry],
    prefix: &str,
    depth: usize,
    layout: &Layout,
    config: &SiteConfig,
) {
    for child in order_entries(children, config) {
        match child {
            ManifestEntry::Dir(dir) => {
                out.push_str(&layout.open_div(depth, "dir"));
                out.push_str(&layout.line(depth + 1, &heading(depth + 1, dir.label())));
                render_level(
                    out,
                    &dir.children,
                    &join_rel(prefix, &dir.dir),
                    depth + 1,
                    layout,
                    config,
                );
            }
            ManifestEntry::File(file) if is_image(file, config) => {
                out.push_str(&layout.open_div(depth, "file image"));
                let thumb = image_link(file, prefix, &config.gallery.thumbs_dir);
                out.push_str(&layout.line(depth + 1, &thumb.into_string()));
            }
            ManifestEntry::File(file) => {
                out.push_str(&layout.open_div(depth, "file"));
                out.push_str(&layout.line(depth + 1, &file_link(file, prefix).into_string()));
            }
        }
        out.push_str(&layout.close_div(depth));
    }
}

/// Whether a file renders as a thumbnail: written, with an image extension.
///
/// Rebuilt manifests carry no `ext`; the output file name decides then.
pub fn is_image(file: &FileEntry, config: &SiteConfig) -> bool {
    file.is_written()
        && file
            .extension()
            .is_some_and(|ext| config.is_image_extension(&ext))
}

fn heading(level: usize, label: &str) -> String {
    if level <= MAX_HEADING {
        format!("<h{level} class=\"name\">{}</h{level}>", escape(label))
    } else {
        html! { div class="name heading" { (label) } }.into_string()
    }
}

fn image_link(file: &FileEntry, prefix: &str, thumbs_dir: &str) -> Markup {
    let path = join_rel(prefix, &file.file);
    let group = if prefix.is_empty() { ROOT_GROUP } else { prefix };
    html! {
        a.thumb href=(path) data-lightbox=(group) data-title=(file.label()) {
            img src=(join_rel(thumbs_dir, &path)) alt=(file.label());
        }
    }
}

fn file_link(file: &FileEntry, prefix: &str) -> Markup {
    let ext = file.extension();
    let body = html! {
        (file.label())
        @if let Some(ext) = &ext {
            " " span.ext { "[" (ext) "]" }
        }
    };
    if file.is_written() {
        html! { a href=(join_rel(prefix, &file.file)) { (body) } }
    } else {
        html! { span.missing { (body) } }
    }
}
