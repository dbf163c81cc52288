//! Shared layout fragments, loaded once per build.
//!
//! | File              | Kind           | Used as                          |
//! |-------------------|----------------|----------------------------------|
//! | `navigation.html` | raw HTML       | `navigation` on every page       |
//! | `static.html`     | raw HTML       | `static_imports` on every page   |
//! | `footer.html`     | tera template  | `footer`, rendered per page      |
//! | `markdown.html`   | tera template  | layout wrapping markdown pages   |
//!
//! Tera auto-escapes `.html` templates, so HTML-valued fields have to be
//! printed with the `safe` filter: `{{ content | safe }}`.

use super::error::BuildError;
use std::fs;
use std::path::Path;
use tera::{Context, Tera};

pub const NAVIGATION: &str = "navigation.html";
pub const STATIC_IMPORTS: &str = "static.html";
pub const FOOTER: &str = "footer.html";
pub const MARKDOWN_LAYOUT: &str = "markdown.html";

pub struct Templates {
    tera: Tera,
    navigation: String,
    static_imports: String,
}

impl Templates {
    /// Load all four fragments from `dir`. Any missing or unparsable one is fatal.
    pub fn load(dir: &Path) -> Result<Self, BuildError> {
        let navigation = read_fragment(dir, NAVIGATION)?;
        let static_imports = read_fragment(dir, STATIC_IMPORTS)?;

        let mut tera = Tera::default();
        for name in [FOOTER, MARKDOWN_LAYOUT] {
            let source = read_fragment(dir, name)?;
            tera.add_raw_template(name, &source)
                .map_err(|e| BuildError::Template(name.to_owned(), e))?;
        }

        Ok(Self {
            tera,
            navigation,
            static_imports,
        })
    }

    pub fn navigation(&self) -> &str {
        &self.navigation
    }

    pub fn static_imports(&self) -> &str {
        &self.static_imports
    }

    pub fn render_footer(&self, context: &Context) -> tera::Result<String> {
        self.tera.render(FOOTER, context)
    }

    pub fn render_markdown(&self, context: &Context) -> tera::Result<String> {
        self.tera.render(MARKDOWN_LAYOUT, context)
    }
}

fn read_fragment(dir: &Path, name: &str) -> Result<String, BuildError> {
    let path = dir.join(name);
    fs::read_to_string(&path).map_err(|e| BuildError::MissingTemplate(path, e))
}
