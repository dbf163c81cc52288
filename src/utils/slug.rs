//! Content path to output path mapping.
//!
//! Every content file lands at a canonical location in the output tree:
//!
//! | Source                      | Output                        |
//! |-----------------------------|-------------------------------|
//! | `content/Blog/My Post.md`   | `public/blog/my_post.html`    |
//! | `content/about.html`        | `public/about.html`           |
//! | `content/img/Cat Photo.PNG` | `public/img/cat_photo.png`    |
//!
//! The mapping is not guaranteed injective (`A b.md` and `a_b.md` collide).

use std::path::{Component, Path, PathBuf};

/// Extension recognized as markdown source.
pub const MARKDOWN_EXT: &str = "md";
/// Extension markdown pages are written with.
pub const HTML_EXT: &str = "html";

/// Maps content-tree paths to output-tree paths.
#[derive(Debug, Clone)]
pub struct PathMapper {
    content: PathBuf,
    output: PathBuf,
}

impl PathMapper {
    pub fn new(content: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            content: content.into(),
            output: output.into(),
        }
    }

    pub fn content_root(&self) -> &Path {
        &self.content
    }

    pub fn output_root(&self) -> &Path {
        &self.output
    }

    /// Output path of a content file.
    ///
    /// Paths outside the content root are mapped as if they were relative to it.
    pub fn map_file(&self, path: &Path) -> PathBuf {
        self.output.join(normalize(self.relative(path), true))
    }

    /// Output path of a content directory (no extension substitution).
    pub fn map_dir(&self, path: &Path) -> PathBuf {
        self.output.join(normalize(self.relative(path), false))
    }

    /// Registry key an absolute site link (`/blog/post.html`) points at.
    pub fn link_target(&self, link: &str) -> PathBuf {
        self.output.join(link.trim_start_matches('/'))
    }

    /// Site URL of an output path: the output root stripped, `/`-separated.
    ///
    /// `public/blog/post.html` → `/blog/post.html`
    pub fn url_path(&self, output_path: &Path) -> String {
        let relative = output_path.strip_prefix(&self.output).unwrap_or(output_path);
        let mut url = String::new();
        for component in relative.components() {
            if let Component::Normal(part) = component {
                url.push('/');
                url.push_str(&part.to_string_lossy());
            }
        }
        if url.is_empty() {
            url.push('/');
        }
        url
    }

    fn relative<'a>(&self, path: &'a Path) -> &'a Path {
        path.strip_prefix(&self.content).unwrap_or(path)
    }
}

/// Lower-case every component, replace spaces with underscores and, for
/// files, swap the markdown extension for the HTML one.
///
/// Idempotent: `normalize(normalize(p)) == normalize(p)`.
pub fn normalize(relative: &Path, is_file: bool) -> PathBuf {
    let mut normalized: PathBuf = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(sanitize_component(&part.to_string_lossy())),
            _ => None,
        })
        .collect();

    if is_file && has_extension(&normalized, MARKDOWN_EXT) {
        normalized.set_extension(HTML_EXT);
    }
    normalized
}

/// Case-insensitive extension check.
pub fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(ext))
}

fn sanitize_component(part: &str) -> String {
    part.to_lowercase().replace(' ', "_")
}
