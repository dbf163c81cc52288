//! Final pass: expand every page into its output file.
//!
//! Each page first gets its footer rendered with its backlinks, then:
//!
//! - **Markdown** pages are wrapped in the shared `markdown.html` layout.
//! - **Templated HTML** pages use their own source file as the template.
//!
//! A failing page is logged and skipped; its siblings are still written.

use super::page::{Backlinks, Page, PageKind};
use super::registry::LinkedRegistry;
use super::templates::Templates;
use crate::config::SiteConfig;
use crate::log;
use crate::utils::minify::minify_page;
use crate::utils::slug::PathMapper;
use anyhow::{Context as _, Result, bail};
use serde::Serialize;
use std::fs;
use std::path::Path;
use tera::{Context, Tera};

/// Data exposed to templates for one page.
#[derive(Debug, Serialize)]
struct PageContext<'a> {
    name: &'a str,
    path: &'a Path,
    out_path: &'a Path,
    url: String,
    kind: PageKind,
    backlinks: &'a Backlinks,
    content: &'a str,
    navigation: &'a str,
    static_imports: &'a str,
    footer: String,
}

impl<'a> PageContext<'a> {
    fn new(page: &'a Page, templates: &'a Templates, mapper: &PathMapper) -> Self {
        Self {
            name: page.name(),
            path: page.source(),
            out_path: page.output(),
            url: mapper.url_path(page.output()),
            kind: page.kind(),
            backlinks: page.backlinks(),
            content: page.body(),
            navigation: templates.navigation(),
            static_imports: templates.static_imports(),
            footer: String::new(),
        }
    }
}

/// Outcome of the render pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RenderSummary {
    pub rendered: usize,
    pub failed: usize,
}

/// Render every page of a resolved registry.
pub fn render_site(
    site: &LinkedRegistry,
    templates: &Templates,
    mapper: &PathMapper,
    config: &SiteConfig,
) -> RenderSummary {
    let mut summary = RenderSummary::default();

    for page in site.iter() {
        match render_page(page, templates, mapper, config) {
            Ok(()) => {
                summary.rendered += 1;
                log!("render"; "{}", mapper.url_path(page.output()));
            }
            Err(e) => {
                summary.failed += 1;
                log!("error"; "unable to render {}: {:#}", page.source().display(), e);
            }
        }
    }

    summary
}

/// Render one page and write it to its output path.
pub fn render_page(
    page: &Page,
    templates: &Templates,
    mapper: &PathMapper,
    config: &SiteConfig,
) -> Result<()> {
    let mut data = PageContext::new(page, templates, mapper);
    data.footer = templates
        .render_footer(&Context::from_serialize(&data)?)
        .context("footer template failed")?;
    let context = Context::from_serialize(&data)?;

    let html = match page.kind() {
        PageKind::Markdown => templates
            .render_markdown(&context)
            .context("markdown layout failed")?,
        PageKind::TemplatedHtml => {
            let source = fs::read_to_string(page.source())
                .with_context(|| format!("unable to open source {}", page.source().display()))?;
            Tera::one_off(&source, &context, true).context("page template failed")?
        }
        PageKind::Opaque => bail!("opaque files are copied, not rendered"),
    };

    let html = minify_page(html.as_bytes(), config);
    fs::write(page.output(), &*html)
        .with_context(|| format!("unable to create file {}", page.output().display()))?;

    Ok(())
}
