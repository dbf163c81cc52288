//! In-memory page records.
//!
//! A [`Page`] is created by the content compiler, gains backlinks during
//! link resolution and is consumed by the renderer.
//!
//! ```text
//! content/blog/post.md ──► Page {
//!                              source:   content/blog/post.md
//!                              output:   public/blog/post.html
//!                              name:     "post"
//!                              kind:     Markdown
//!                              body:     "<p><a href=\"/blog\">home</a></p>"
//!                              backlinks {}
//!                          }
//! ```

use crate::utils::slug::{HTML_EXT, MARKDOWN_EXT, has_extension};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// File stem marking a directory's landing page (compared case-insensitively).
pub const INDEX_STEM: &str = "index";

/// Referencing page URL → referencing page display name.
pub type Backlinks = BTreeMap<String, String>;

/// How a content file is turned into output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PageKind {
    /// Markdown converted to HTML and wrapped in the shared markdown layout.
    #[serde(rename = "markdown")]
    Markdown,
    /// Hand-written HTML expanded as a template at render time.
    #[serde(rename = "html")]
    TemplatedHtml,
    /// Any other file, copied byte for byte. Never registered as a page.
    #[serde(rename = "opaque")]
    Opaque,
}

impl PageKind {
    /// Classify a content file by its extension.
    pub fn classify(path: &Path) -> Self {
        if has_extension(path, MARKDOWN_EXT) {
            Self::Markdown
        } else if has_extension(path, HTML_EXT) {
            Self::TemplatedHtml
        } else {
            Self::Opaque
        }
    }
}

/// One compiled unit of content.
#[derive(Debug, Clone)]
pub struct Page {
    source: PathBuf,
    output: PathBuf,
    name: String,
    kind: PageKind,
    body: String,
    backlinks: Backlinks,
}

impl Page {
    pub fn new(source: PathBuf, output: PathBuf, name: String, kind: PageKind) -> Self {
        Self {
            source,
            output,
            name,
            kind,
            body: String::new(),
            backlinks: Backlinks::new(),
        }
    }

    /// Set the compiled body. Builder-style, used once by the content compiler.
    pub fn with_body(mut self, body: String) -> Self {
        self.body = body;
        self
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> PageKind {
        self.kind
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn backlinks(&self) -> &Backlinks {
        &self.backlinks
    }

    /// Only the backlink resolver records backlinks.
    pub(super) fn add_backlink(&mut self, url: String, name: String) {
        self.backlinks.insert(url, name);
    }
}

/// Whether a file stem names an index document.
pub fn is_index_stem(stem: &str) -> bool {
    stem.eq_ignore_ascii_case(INDEX_STEM)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(PageKind::classify(Path::new("a/post.md")), PageKind::Markdown);
        assert_eq!(PageKind::classify(Path::new("a/POST.MD")), PageKind::Markdown);
        assert_eq!(PageKind::classify(Path::new("about.html")), PageKind::TemplatedHtml);
        assert_eq!(PageKind::classify(Path::new("readme.txt")), PageKind::Opaque);
        assert_eq!(PageKind::classify(Path::new("Makefile")), PageKind::Opaque);
        assert_eq!(PageKind::classify(Path::new("page.htm")), PageKind::Opaque);
    }

    #[test]
    fn test_is_index_stem() {
        assert!(is_index_stem("index"));
        assert!(is_index_stem("INDEX"));
        assert!(is_index_stem("Index"));
        assert!(!is_index_stem("indexes"));
    }

    #[test]
    fn test_new_page_has_no_backlinks() {
        let page = Page::new(
            "content/post.md".into(),
            "public/post.html".into(),
            "post".into(),
            PageKind::Markdown,
        )
        .with_body("<p>hi</p>".into());

        assert!(page.backlinks().is_empty());
        assert_eq!(page.body(), "<p>hi</p>");
        assert_eq!(page.name(), "post");
    }

    #[test]
    fn test_add_backlink_dedupes_by_url() {
        let mut page = Page::new(
            "content/index.md".into(),
            "public/index.html".into(),
            "Home".into(),
            PageKind::Markdown,
        );
        page.add_backlink("/post.html".into(), "post".into());
        page.add_backlink("/post.html".into(), "post".into());

        assert_eq!(page.backlinks().len(), 1);
    }
}
