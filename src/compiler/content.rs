//! Content tree walk: source files → page registry.
//!
//! Directories are mirrored into the output tree as they are visited.
//! Markdown is converted right away, hand-written HTML is kept for
//! render-time expansion and everything else is copied verbatim without
//! becoming a page.
//!
//! # Display names
//!
//! A page is named after its file stem. Index documents take the name
//! handed down by the walk instead: the site title for the content root and
//! its direct subdirectories, the parent directory's name further down.
//!
//! | Source                        | Name     |
//! |-------------------------------|----------|
//! | `content/blog/post.md`        | `post`   |
//! | `content/index.md`            | site     |
//! | `content/blog/index.md`       | site     |
//! | `content/blog/2024/index.md`  | `blog`   |

use super::error::BuildError;
use super::page::{Page, PageKind, is_index_stem};
use super::registry::PageRegistry;
use crate::log;
use crate::utils::markdown::markdown_to_html;
use crate::utils::slug::PathMapper;
use std::fs;
use std::path::Path;
use walkdir::{DirEntry, WalkDir};

/// Files to ignore during directory traversal
const IGNORED_FILES: &[&str] = &[".DS_Store"];

/// Counters reported once the walk finishes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CompileStats {
    pub pages: usize,
    pub copied: usize,
    pub skipped: usize,
    pub overwritten: usize,
}

/// First pass: walk the content tree and build the page registry.
pub struct ContentCompiler<'a> {
    mapper: &'a PathMapper,
    site_name: &'a str,
    stats: CompileStats,
}

impl<'a> ContentCompiler<'a> {
    pub fn new(mapper: &'a PathMapper, site_name: &'a str) -> Self {
        Self {
            mapper,
            site_name,
            stats: CompileStats::default(),
        }
    }

    /// Compile the whole content tree.
    ///
    /// Fails only when a directory cannot be listed or the output root
    /// cannot be created; per-file problems are logged and skipped.
    pub fn compile(mut self) -> Result<(PageRegistry, CompileStats), BuildError> {
        let output = self.mapper.output_root();
        fs::create_dir_all(output).map_err(|e| BuildError::CreateOutput(output.to_path_buf(), e))?;

        let mut registry = PageRegistry::new();
        let root = self.mapper.content_root().to_path_buf();
        let site_name = self.site_name;
        self.compile_dir(&root, site_name, &mut registry)?;

        self.stats.pages = registry.len();
        Ok((registry, self.stats))
    }

    fn compile_dir(
        &mut self,
        dir: &Path,
        inherited_name: &str,
        registry: &mut PageRegistry,
    ) -> Result<(), BuildError> {
        for entry in list_dir(dir)? {
            let path = entry.path();

            if entry.file_type().is_dir() {
                let out_dir = self.mapper.map_dir(path);
                if let Err(e) = fs::create_dir_all(&out_dir) {
                    log!("error"; "unable to create directory {}: {}", out_dir.display(), e);
                    continue;
                }

                let child_name = if dir == self.mapper.content_root() {
                    inherited_name.to_owned()
                } else {
                    display_name(dir)
                };
                self.compile_dir(path, &child_name, registry)?;
            } else {
                self.compile_file(path, inherited_name, registry);
            }
        }
        Ok(())
    }

    fn compile_file(&mut self, path: &Path, inherited_name: &str, registry: &mut PageRegistry) {
        let output = self.mapper.map_file(path);

        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                log!("error"; "unable to read source {}: {}", path.display(), e);
                self.stats.skipped += 1;
                return;
            }
        };

        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let name = if is_index_stem(&stem) {
            inherited_name.to_owned()
        } else {
            stem
        };

        let kind = PageKind::classify(path);
        let page = Page::new(path.to_path_buf(), output, name, kind);

        let page = match kind {
            PageKind::Markdown => page.with_body(markdown_to_html(&String::from_utf8_lossy(&bytes))),
            PageKind::TemplatedHtml => page,
            PageKind::Opaque => {
                self.copy_opaque(path, page.output(), &bytes);
                return;
            }
        };

        if let Some(displaced) = registry.insert(page) {
            self.stats.overwritten += 1;
            log!(
                "warn";
                "{} replaces {} at {}",
                path.display(),
                displaced.source().display(),
                displaced.output().display()
            );
        }
    }

    fn copy_opaque(&mut self, source: &Path, output: &Path, bytes: &[u8]) {
        match fs::write(output, bytes) {
            Ok(()) => {
                self.stats.copied += 1;
                log!("copy"; "{}", source.display());
            }
            Err(e) => {
                self.stats.skipped += 1;
                log!("error"; "unable to copy {} to {}: {}", source.display(), output.display(), e);
            }
        }
    }
}

/// List a directory's direct children in file name order.
fn list_dir(dir: &Path) -> Result<Vec<DirEntry>, BuildError> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            let name = e.file_name().to_str().unwrap_or_default();
            !IGNORED_FILES.contains(&name)
        })
        .map(|entry| entry.map_err(|e| BuildError::ReadDir(dir.to_path_buf(), e)))
        .collect()
}

fn display_name(dir: &Path) -> String {
    dir.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}
