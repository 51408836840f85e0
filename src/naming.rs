//! Name sanitizing and filename parsing.
//!
//! Every file and directory that lands in the output tree goes through
//! [`sanitize`], so the output is safe to serve over HTTP and to reference from
//! HTML without further escaping of path characters:
//!
//! - `café Déjà.JPG` → `cafe_deja.jpg`
//! - `2020 Trip` → `2020_Trip`
//! - `Notes.TXT` → `Notes.txt` (only the extension is lowercased)
//!
//! The original, unsanitized label is kept in the manifest as `name` and is
//! what readers see on the rendered pages.

use unicode_normalization::UnicodeNormalization;

/// Sanitize a single file or directory name.
///
/// Steps, in order:
/// 1. strip diacritics (`é` → `e`)
/// 2. replace spaces with underscores
/// 3. lowercase the final extension (from the last `.` to the end)
///
/// The function is idempotent: `sanitize(&sanitize(x)) == sanitize(x)`.
pub fn sanitize(name: &str) -> String {
    let stripped: String = name
        .nfd()
        .filter(|c| !unicode_normalization::char::is_combining_mark(*c))
        .collect::<String>()
        .replace(' ', "_");

    match stripped.rfind('.') {
        Some(dot) => {
            let (stem, ext) = stripped.split_at(dot);
            format!("{}{}", stem, ext.to_lowercase())
        }
        None => stripped,
    }
}

/// Split a file name into its base name and lowercased extension.
///
/// - `"IMG 01.JPG"` → `("IMG 01", Some("jpg"))`
/// - `"archive.tar.gz"` → `("archive.tar", Some("gz"))`
/// - `"README"` → `("README", None)`
/// - `".hidden"` → `("", Some("hidden"))`
pub fn split_name(file: &str) -> (String, Option<String>) {
    match file.rfind('.') {
        Some(dot) => (
            file[..dot].to_string(),
            Some(file[dot + 1..].to_lowercase()),
        ),
        None => (file.to_string(), None),
    }
}

/// Whether a display name starts with a four digit year (`"2020 Trip"`).
pub fn has_year_prefix(name: &str) -> bool {
    let bytes = name.as_bytes();
    bytes.len() >= 4 && bytes[..4].iter().all(u8::is_ascii_digit)
}
