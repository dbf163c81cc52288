//! Site building orchestration.
//!
//! # Architecture
//!
//! ```text
//! build_site()
//!     │
//!     ├── Templates::load()          shared fragments, fatal if missing
//!     │
//!     ├── ContentCompiler::compile() walk content/, convert markdown,
//!     │                              copy opaque files → PageRegistry
//!     │
//!     ├── resolve_backlinks()        scan bodies for /links, fill
//!     │                              backlinks → LinkedRegistry
//!     │
//!     └── render_site()              footer + layout per page → public/
//! ```

use crate::{
    compiler::{
        ContentCompiler, LinkedRegistry, Templates, content::CompileStats,
        render::RenderSummary, render_site, resolve_backlinks,
    },
    config::SiteConfig,
    log,
    utils::slug::PathMapper,
};
use anyhow::{Context, Result};
use std::{fs, path::Path};

/// What a build produced.
#[derive(Debug)]
pub struct BuildReport {
    /// Every page with its resolved backlinks.
    pub site: LinkedRegistry,
    pub compiled: CompileStats,
    pub rendered: RenderSummary,
}

/// Build the entire site.
///
/// Fails on fatal errors only (missing templates, unlistable directories).
/// Pages that fail to read or render are reported and counted in the
/// returned [`BuildReport`].
pub fn build_site(config: &SiteConfig) -> Result<BuildReport> {
    let output = &config.build.output;

    let templates = Templates::load(&config.build.templates)?;
    log!("build"; "templates loaded from {}", config.build.templates.display());

    if config.build.clean {
        clean_output(output)?;
    }

    let mapper = PathMapper::new(&config.build.content, output);

    log!("compile"; "collecting...");
    let (registry, compiled) = ContentCompiler::new(&mapper, &config.base.title)
        .compile()?;
    log!(
        "compile";
        "{} pages, {} files copied, {} skipped",
        compiled.pages,
        compiled.copied,
        compiled.skipped
    );
    if compiled.overwritten > 0 {
        log!("warn"; "{} pages lost to output path collisions", compiled.overwritten);
    }
    if registry.is_empty() {
        log!("warn"; "no pages in {}", config.build.content.display());
    }

    let site = resolve_backlinks(registry, &mapper);
    let links = site.stats();
    log!(
        "links";
        "{} pages, {} backlinks, {} unresolved",
        site.len(),
        links.resolved,
        links.unresolved
    );

    let rendered = render_site(&site, &templates, &mapper, config);

    Ok(BuildReport {
        site,
        compiled,
        rendered,
    })
}

/// Remove the output directory before a clean build.
fn clean_output(output: &Path) -> Result<()> {
    if output.exists() {
        fs::remove_dir_all(output).with_context(|| {
            format!("Failed to clear output directory: {}", output.display())
        })?;
    }
    Ok(())
}

/// Log the closing summary of a finished build.
pub fn log_build_result(report: &BuildReport) {
    let copied = report.compiled.copied;
    match (report.rendered.rendered, report.rendered.failed) {
        (0, 0) if copied == 0 => {
            log!("warn"; "output is empty, check if content has .md or .html files")
        }
        (ok, 0) => log!(
            "build";
            "done, {} pages ({} linked), {} files copied",
            ok,
            report.site.len(),
            copied
        ),
        (ok, failed) => log!(
            "warn";
            "done, {} pages, {} failed, {} files copied",
            ok,
            failed,
            copied
        ),
    }
}
