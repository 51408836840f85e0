//! Shared HTML plumbing for the list and gallery pages.
//!
//! Both renderers emit one element per line, indented by a configurable unit
//! on top of a base depth so the fragment lines up with the surrounding
//! template. [`Layout`] carries those settings. Leaf content (links, labels,
//! images) is built with maud so every interpolated value is escaped.
//!
//! [`assemble_page`] splices a rendered fragment into the page template.

use crate::config::SiteConfig;
use maud::html;
use thiserror::Error;

/// Closing tag the fragment is inserted in front of.
const BODY_END: &str = "</body>";

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Failed to read template {path}: {source}")]
    Io {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
    #[error("No bundled template named {0}")]
    NotFound(String),
    #[error("Template is empty")]
    Empty,
    #[error("Template has no </body> tag")]
    MissingBody,
}

/// Indentation and line-ending settings of rendered HTML.
#[derive(Debug, Clone, Copy)]
pub struct Layout<'a> {
    pub indent: &'a str,
    pub eol: &'a str,
    pub init_depth: usize,
}

impl<'a> Layout<'a> {
    pub fn from_config(config: &'a SiteConfig) -> Self {
        Self {
            indent: &config.indent,
            eol: &config.eol,
            init_depth: config.html_init_depth,
        }
    }

    /// Indentation for an element at nesting `depth`.
    pub fn ind(&self, depth: usize) -> String {
        self.indent.repeat(self.init_depth + depth)
    }

    /// One indented line, terminated.
    pub fn line(&self, depth: usize, content: &str) -> String {
        format!("{}{}{}", self.ind(depth), content, self.eol)
    }

    /// Opening `<div class=".." data-level="..">` line of an entry.
    pub fn open_div(&self, depth: usize, class: &str) -> String {
        self.line(
            depth,
            &format!("<div class=\"{}\" data-level=\"{}\">", escape(class), depth),
        )
    }

    pub fn close_div(&self, depth: usize) -> String {
        self.line(depth, "</div>")
    }
}

/// Escape text for use as HTML content or attribute value.
pub fn escape(text: &str) -> String {
    html! { (text) }.into_string()
}

/// Insert `fragment` into `template` just before the first `</body>`.
///
/// Spaces directly in front of the tag stay after the fragment, so the
/// closing tag keeps its indentation.
///
/// ```
/// # use gallerytool::html::assemble_page;
/// let page = assemble_page("<p>hi</p>\n", "<body>\n  </body>").unwrap();
/// assert_eq!(page, "<body>\n<p>hi</p>\n  </body>");
/// ```
pub fn assemble_page(fragment: &str, template: &str) -> Result<String, TemplateError> {
    if template.is_empty() {
        return Err(TemplateError::Empty);
    }
    let marker = template.find(BODY_END).ok_or(TemplateError::MissingBody)?;
    let at = template[..marker].trim_end_matches(' ').len();

    let mut page = String::with_capacity(template.len() + fragment.len());
    page.push_str(&template[..at]);
    page.push_str(fragment);
    page.push_str(&template[at..]);
    Ok(page)
}
