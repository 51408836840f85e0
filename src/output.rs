//! CLI output formatting for all commands.
//!
//! # Output Format
//!
//! ## Prepare
//!
//! With `debug` (the default) the whole mirrored tree is shown, 4 spaces per
//! level, original name first and output path second:
//!
//! ```text
//! [dir] 2020 Trip → 2020_Trip/
//!     [file] Beach Day → 2020_Trip/Beach_Day.jpg
//! [warn] notes → notes.txt: Unsupported input format: txt
//! [error] broken.png: Permission denied (os error 13)
//! Prepared 3 files in 1 directory (1 warning, 1 error)
//! ```
//!
//! Without `debug` only the `[warn]` / `[error]` lines and the summary are
//! printed, with full output paths and no indentation.
//!
//! ## List / Gallery
//!
//! ```text
//! Content cache reading failed: cannot read photos.web/content.json: ...; re-reading directory tree
//! [thumb] 2020_Trip/Beach_Day.jpg
//! Copied gallery assets: lightbox.js, lightbox.css
//! Wrote photos.web/gallery.html (1 thumbnail)
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::commands::{AllReport, PageReport, PrepareReport};
use crate::store::{CacheError, Origin};
use crate::thumbs::ThumbResult;
use crate::types::{DirEntry, FileEntry, ManifestEntry, Outcome, join_rel};

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// `1 file`, `2 files`.
fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{} {}", n, word)
    } else {
        format!("{} {}s", n, word)
    }
}

/// Original file name, as far as the manifest knows it.
fn original_file_name(file: &FileEntry) -> String {
    match (&file.name, &file.ext) {
        (Some(name), Some(ext)) => format!("{}.{}", name, ext),
        (Some(name), None) => name.clone(),
        _ => file.file.clone(),
    }
}

// ============================================================================
// Tree walker
// ============================================================================

#[derive(Default)]
struct Tally {
    files: usize,
    dirs: usize,
    warnings: usize,
    errors: usize,
}

fn walk(
    children: &[ManifestEntry],
    prefix: &str,
    depth: usize,
    debug: bool,
    lines: &mut Vec<String>,
    tally: &mut Tally,
) {
    for child in children {
        match child {
            ManifestEntry::Dir(dir) => {
                tally.dirs += 1;
                let path = join_rel(prefix, &dir.dir);
                if debug {
                    lines.push(format!("{}[dir] {} → {}/", indent(depth), dir.label(), path));
                }
                walk(&dir.children, &path, depth + 1, debug, lines, tally);
            }
            ManifestEntry::File(file) => {
                tally.files += 1;
                if let Some(line) = file_line(file, prefix, depth, debug, tally) {
                    lines.push(line);
                }
            }
        }
    }
}

fn file_line(
    file: &FileEntry,
    prefix: &str,
    depth: usize,
    debug: bool,
    tally: &mut Tally,
) -> Option<String> {
    let path = join_rel(prefix, &file.file);
    let (ind, label) = if debug {
        (indent(depth), format!("{} → {}", file.label(), path))
    } else {
        (String::new(), path.clone())
    };
    match &file.outcome {
        Some(Outcome::Warn(msg)) => {
            tally.warnings += 1;
            Some(format!("{}[warn] {}: {}", ind, label, msg))
        }
        Some(Outcome::Fail(msg)) => {
            tally.errors += 1;
            let source = join_rel(prefix, &original_file_name(file));
            Some(format!("{}[error] {}: {}", ind, source, msg))
        }
        Some(Outcome::Ok) | None => debug.then(|| format!("{}[file] {}", ind, label)),
    }
}

// ============================================================================
// Prepare
// ============================================================================

/// Format the mirrored tree and the summary line.
pub fn format_prepare_output(manifest: &DirEntry, debug: bool) -> Vec<String> {
    let mut lines = Vec::new();
    let mut tally = Tally::default();
    walk(&manifest.children, "", 0, debug, &mut lines, &mut tally);

    let dirs = if tally.dirs == 1 {
        "1 directory".to_string()
    } else {
        format!("{} directories", tally.dirs)
    };
    lines.push(format!(
        "Prepared {} in {} ({}, {})",
        plural(tally.files, "file"),
        dirs,
        plural(tally.warnings, "warning"),
        plural(tally.errors, "error"),
    ));
    lines
}

pub fn print_prepare_output(report: &PrepareReport, debug: bool) {
    for line in format_prepare_output(&report.manifest, debug) {
        println!("{}", line);
    }
    for line in format_assets_output("common", &report.assets) {
        println!("{}", line);
    }
}

// ============================================================================
// List / Gallery
// ============================================================================

/// Message shown when `content.json` could not be used.
pub fn format_cache_fallback(reason: &CacheError) -> String {
    format!(
        "Content cache reading failed: {}; re-reading directory tree",
        reason
    )
}

/// Thumbnail lines: every thumbnail with `debug`, otherwise only problems.
pub fn format_thumbs_output(results: &[ThumbResult], debug: bool) -> Vec<String> {
    results
        .iter()
        .filter_map(|r| match &r.outcome {
            Outcome::Ok => debug.then(|| format!("[thumb] {}", r.path)),
            Outcome::Warn(msg) => Some(format!("[warn] thumbnail {}: {}", r.path, msg)),
            Outcome::Fail(msg) => Some(format!("[error] thumbnail {}: {}", r.path, msg)),
        })
        .collect()
}

pub fn format_assets_output(group: &str, written: &[String]) -> Vec<String> {
    if written.is_empty() {
        return Vec::new();
    }
    vec![format!("Copied {} assets: {}", group, written.join(", "))]
}

/// Format the result of `list` or `gallery`.
pub fn format_page_output(report: &PageReport, group: &str, debug: bool) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(Origin::Rebuilt(reason)) = &report.origin {
        lines.push(format_cache_fallback(reason));
    }
    lines.extend(format_thumbs_output(&report.thumbs, debug));
    lines.extend(format_assets_output(group, &report.assets));

    let page = report.page.display();
    if report.thumbs.is_empty() {
        lines.push(format!("Wrote {}", page));
    } else {
        lines.push(format!(
            "Wrote {} ({})",
            page,
            plural(report.thumbs.len(), "thumbnail")
        ));
    }
    lines
}

pub fn print_page_output(report: &PageReport, group: &str, debug: bool) {
    for line in format_page_output(report, group, debug) {
        println!("{}", line);
    }
}

pub fn print_all_output(report: &AllReport, debug: bool) {
    print_prepare_output(&report.prepare, debug);
    print_page_output(&report.list, "list", debug);
    print_page_output(&report.gallery, "gallery", debug);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use std::path::PathBuf;

    fn manifest() -> DirEntry {
        root(
            "site",
            "photos",
            vec![
                dir(
                    "2020_Trip",
                    "2020 Trip",
                    vec![ok_file("Beach_Day.jpg", "Beach Day", "jpg")],
                ),
                ManifestEntry::File(FileEntry {
                    file: "notes.txt".to_string(),
                    name: Some("notes".to_string()),
                    ext: Some("txt".to_string()),
                    outcome: Some(Outcome::Warn("Unsupported input format: txt".to_string())),
                }),
                failed_file("broken", "png"),
            ],
        )
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    #[test]
    fn indent_levels() {
        assert_eq!(indent(0), "");
        assert_eq!(indent(2), "        ");
    }

    #[test]
    fn plural_forms() {
        assert_eq!(plural(1, "file"), "1 file");
        assert_eq!(plural(0, "error"), "0 errors");
    }

    // =========================================================================
    // Prepare
    // =========================================================================

    #[test]
    fn debug_prepare_shows_whole_tree() {
        let lines = format_prepare_output(&manifest(), true);
        assert_eq!(
            lines,
            vec![
                "[dir] 2020 Trip → 2020_Trip/",
                "    [file] Beach Day → 2020_Trip/Beach_Day.jpg",
                "[warn] notes → notes.txt: Unsupported input format: txt",
                "[error] broken.png: copy failed",
                "Prepared 3 files in 1 directory (1 warning, 1 error)",
            ]
        );
    }

    #[test]
    fn quiet_prepare_shows_problems_and_summary() {
        let lines = format_prepare_output(&manifest(), false);
        assert_eq!(
            lines,
            vec![
                "[warn] notes.txt: Unsupported input format: txt",
                "[error] broken.png: copy failed",
                "Prepared 3 files in 1 directory (1 warning, 1 error)",
            ]
        );
    }

    #[test]
    fn rebuilt_entries_show_as_files() {
        let m = root("site", "site", vec![bare_file("a.jpg")]);
        let lines = format_prepare_output(&m, true);
        assert_eq!(lines[0], "[file] a.jpg → a.jpg");
        assert_eq!(lines[1], "Prepared 1 file in 0 directories (0 warnings, 0 errors)");
    }

    // =========================================================================
    // Pages
    // =========================================================================

    #[test]
    fn cache_fallback_message() {
        let reason = CacheError::Empty(PathBuf::from("out/content.json"));
        assert_eq!(
            format_cache_fallback(&reason),
            "Content cache reading failed: out/content.json is empty; re-reading directory tree"
        );
    }

    #[test]
    fn thumbs_output_hides_ok_without_debug() {
        let results = vec![
            ThumbResult {
                path: "a.jpg".to_string(),
                outcome: Outcome::Ok,
            },
            ThumbResult {
                path: "b.jpg".to_string(),
                outcome: Outcome::Fail("disk full".to_string()),
            },
        ];
        assert_eq!(
            format_thumbs_output(&results, false),
            vec!["[error] thumbnail b.jpg: disk full"]
        );
        assert_eq!(format_thumbs_output(&results, true).len(), 2);
    }

    #[test]
    fn page_output_reports_rebuild_and_assets() {
        let report = PageReport {
            page: PathBuf::from("out/gallery.html"),
            origin: Some(Origin::Rebuilt(CacheError::Empty(PathBuf::from(
                "out/content.json",
            )))),
            thumbs: vec![ThumbResult {
                path: "a.jpg".to_string(),
                outcome: Outcome::Ok,
            }],
            assets: vec!["lightbox.js".to_string(), "lightbox.css".to_string()],
        };

        let lines = format_page_output(&report, "gallery", true);
        assert_eq!(
            lines,
            vec![
                "Content cache reading failed: out/content.json is empty; re-reading directory tree",
                "[thumb] a.jpg",
                "Copied gallery assets: lightbox.js, lightbox.css",
                "Wrote out/gallery.html (1 thumbnail)",
            ]
        );
    }

    #[test]
    fn list_page_output_is_one_line() {
        let report = PageReport {
            page: PathBuf::from("out/list.html"),
            origin: Some(Origin::Cache),
            thumbs: vec![],
            assets: vec![],
        };
        assert_eq!(
            format_page_output(&report, "list", false),
            vec!["Wrote out/list.html"]
        );
    }
}
