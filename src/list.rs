//! File-list page rendering.
//!
//! Renders a manifest as a nested outline: every entry is a `<div>` carrying
//! its nesting level, directories hold a name line followed by their
//! children, files are links into the output tree.
//!
//! ```html
//!         <div class="dir" data-level="0">
//!             <div class="name">2020 Trip</div>
//!             <div class="file" data-level="1">
//!                 <a href="2020_Trip/beach.jpg">beach</a>
//!             </div>
//!         </div>
//! ```
//!
//! The page script collapses directories by `data-level`.

use crate::config::SiteConfig;
use crate::html::Layout;
use crate::types::{FileEntry, ManifestEntry, join_rel};
use maud::html;

/// Render `children` (and everything below) as list HTML.
///
/// `prefix` is the URL path of the directory holding `children`, empty at the
/// output root. With `list.sort_desc = false` every level is rendered in
/// reverse manifest order.
pub fn render_list(
    children: &[ManifestEntry],
    prefix: &str,
    depth: usize,
    config: &SiteConfig,
) -> String {
    let layout = Layout::from_config(config);
    let mut out = String::new();
    render_level(&mut out, children, prefix, depth, &layout, config.list.sort_desc);
    out
}

fn render_level(
    out: &mut String,
    children: &[ManifestEntry],
    prefix: &str,
    depth: usize,
    layout: &Layout,
    keep_order: bool,
) {
    let ordered: Box<dyn Iterator<Item = &ManifestEntry>> = if keep_order {
        Box::new(children.iter())
    } else {
        Box::new(children.iter().rev())
    };

    for child in ordered {
        match child {
            ManifestEntry::Dir(dir) => {
                out.push_str(&layout.open_div(depth, "dir"));
                let name = html! { div.name { (dir.label()) } };
                out.push_str(&layout.line(depth + 1, &name.into_string()));
                render_level(
                    out,
                    &dir.children,
                    &join_rel(prefix, &dir.dir),
                    depth + 1,
                    layout,
                    keep_order,
                );
            }
            ManifestEntry::File(file) => {
                out.push_str(&layout.open_div(depth, "file"));
                out.push_str(&layout.line(depth + 1, &file_link(file, prefix)));
            }
        }
        out.push_str(&layout.close_div(depth));
    }
}

fn file_link(file: &FileEntry, prefix: &str) -> String {
    let markup = if file.is_written() {
        html! { a href=(join_rel(prefix, &file.file)) { (file.label()) } }
    } else {
        html! { span.missing { (file.label()) } }
    };
    markup.into_string()
}
