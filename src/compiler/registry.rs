//! Page registry: output path → page.
//!
//! The registry moves through the pipeline by value, and its type records
//! how far it got:
//!
//! ```text
//! ContentCompiler::compile() ──► PageRegistry ──► resolve_backlinks() ──► LinkedRegistry ──► render_site()
//!                                (pages only)                            (pages + backlinks)
//! ```
//!
//! Backlinks can only be recorded on a complete `PageRegistry`, and only a
//! `LinkedRegistry` can be rendered.

use super::page::Page;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Pages produced by the content compiler, keyed by output path.
#[derive(Debug, Default)]
pub struct PageRegistry {
    pages: BTreeMap<PathBuf, Page>,
}

impl PageRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a page under its output path.
    ///
    /// Last writer wins: the displaced page, if any, is returned so the
    /// caller can report the collision.
    pub fn insert(&mut self, page: Page) -> Option<Page> {
        self.pages.insert(page.output().to_path_buf(), page)
    }

    #[cfg(test)]
    pub fn get(&self, output: &Path) -> Option<&Page> {
        self.pages.get(output)
    }

    pub fn contains(&self, output: &Path) -> bool {
        self.pages.contains_key(output)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Pages in output path order.
    pub fn iter(&self) -> impl Iterator<Item = &Page> {
        self.pages.values()
    }

    pub(super) fn get_mut(&mut self, output: &Path) -> Option<&mut Page> {
        self.pages.get_mut(output)
    }
}

/// Counters collected while resolving links.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LinkStats {
    /// Links that produced a backlink entry.
    pub resolved: usize,
    /// Links with no matching page.
    pub unresolved: usize,
}

/// Pages with their backlinks resolved. Read-only from here on.
#[derive(Debug)]
pub struct LinkedRegistry {
    pages: PageRegistry,
    stats: LinkStats,
}

impl LinkedRegistry {
    pub(super) fn new(pages: PageRegistry, stats: LinkStats) -> Self {
        Self { pages, stats }
    }

    #[cfg(test)]
    pub fn get(&self, output: &Path) -> Option<&Page> {
        self.pages.get(output)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Page> {
        self.pages.iter()
    }

    pub fn stats(&self) -> LinkStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::page::PageKind;

    fn page(source: &str, output: &str, name: &str) -> Page {
        Page::new(source.into(), output.into(), name.into(), PageKind::Markdown)
    }

    #[test]
    fn test_insert_and_get() {
        let mut registry = PageRegistry::new();
        assert!(registry.is_empty());

        let displaced = registry.insert(page("content/a.md", "public/a.html", "a"));
        assert!(displaced.is_none());
        assert_eq!(registry.len(), 1);
        assert!(registry.contains(Path::new("public/a.html")));
        assert_eq!(registry.get(Path::new("public/a.html")).unwrap().name(), "a");
    }

    #[test]
    fn test_insert_last_writer_wins() {
        let mut registry = PageRegistry::new();
        registry.insert(page("content/A b.md", "public/a_b.html", "A b"));
        let displaced = registry.insert(page("content/a_b.md", "public/a_b.html", "a_b"));

        assert_eq!(displaced.unwrap().name(), "A b");
        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.get(Path::new("public/a_b.html")).unwrap().source(),
            Path::new("content/a_b.md")
        );
    }

    #[test]
    fn test_iter_in_output_order() {
        let mut registry = PageRegistry::new();
        registry.insert(page("content/z.md", "public/z.html", "z"));
        registry.insert(page("content/a.md", "public/a.html", "a"));

        let names: Vec<_> = registry.iter().map(Page::name).collect();
        assert_eq!(names, ["a", "z"]);
    }
}
