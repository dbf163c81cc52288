//! Internal link extraction and backlink resolution.
//!
//! Runs between compilation and rendering, once every page is in the
//! registry:
//!
//! ```text
//! page body ──► extract_links() ──► "/blog" ──► public/blog            (miss)
//!                                          └──► public/blog/index.html (hit)
//!                                                      │
//!                                                      ▼
//!                               target.backlinks["/blog/post.html"] = "post"
//! ```

use super::registry::{LinkStats, LinkedRegistry, PageRegistry};
use crate::log;
use crate::utils::slug::PathMapper;
use regex::Regex;
use std::borrow::Cow;
use std::path::PathBuf;
use std::sync::LazyLock;

/// Output file name of an index document.
const INDEX_HTML: &str = "index.html";

/// `<a ... href="/...">` with a site-absolute target.
static HREF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<a\s+(?:[^>]*?\s+)?href="(/[^"]*)""#).unwrap());

/// Site-absolute link targets in an HTML body, in document order.
///
/// External (`https://...`), protocol-relative (`//host/...`) and relative
/// links are skipped. Duplicates are kept. Attribute entities are decoded,
/// so `/a&amp;b.html` yields `/a&b.html`.
pub fn extract_links(body: &str) -> impl Iterator<Item = Cow<'_, str>> {
    HREF_RE
        .captures_iter(body)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|link| !link.starts_with("//"))
        .map(decode_entities)
}

/// Undo the entity escaping markdown applies to `href` values.
fn decode_entities(link: &str) -> Cow<'_, str> {
    if !link.contains('&') {
        return Cow::Borrowed(link);
    }
    Cow::Owned(
        link.replace("&#x27;", "'")
            .replace("&#39;", "'")
            .replace("&quot;", "\"")
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&amp;", "&"),
    )
}

/// Second pass: record a backlink on every page another page links to.
///
/// A link to `/section` that matches no page falls back to
/// `/section/index.html`. Links that still match nothing are logged and
/// dropped.
pub fn resolve_backlinks(mut registry: PageRegistry, mapper: &PathMapper) -> LinkedRegistry {
    let mut stats = LinkStats::default();

    // Collect edges first: sources are read while targets are mutated.
    let mut edges: Vec<(PathBuf, String, String)> = Vec::new();
    for page in registry.iter().filter(|p| !p.body().is_empty()) {
        let source_url = mapper.url_path(page.output());
        for link in extract_links(page.body()) {
            match lookup(&registry, mapper, &link) {
                Some(target) => edges.push((target, source_url.clone(), page.name().to_owned())),
                None => {
                    stats.unresolved += 1;
                    log!("links"; "unresolved link in {}: {}", source_url, link);
                }
            }
        }
    }

    for (target, url, name) in edges {
        if let Some(page) = registry.get_mut(&target) {
            page.add_backlink(url, name);
            stats.resolved += 1;
        }
    }

    LinkedRegistry::new(registry, stats)
}

/// Registry key a link resolves to, if any.
fn lookup(registry: &PageRegistry, mapper: &PathMapper, link: &str) -> Option<PathBuf> {
    let candidate = mapper.link_target(strip_suffixes(link));
    if registry.contains(&candidate) {
        return Some(candidate);
    }

    let index = candidate.join(INDEX_HTML);
    registry.contains(&index).then_some(index)
}

/// Drop `#fragment` and `?query` from a link.
fn strip_suffixes(link: &str) -> &str {
    link.split(['#', '?']).next().unwrap_or(link)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::page::{Page, PageKind};
    use crate::utils::markdown::markdown_to_html;
    use std::path::Path;

    fn mapper() -> PathMapper {
        PathMapper::new("content", "public")
    }

    fn md(output: &str, name: &str, body: &str) -> Page {
        Page::new(
            format!("content/{name}.md").into(),
            PathBuf::from("public").join(output),
            name.into(),
            PageKind::Markdown,
        )
        .with_body(body.into())
    }

    fn backlinks_of<'r>(linked: &'r LinkedRegistry, output: &str) -> Vec<(&'r str, &'r str)> {
        linked
            .get(&Path::new("public").join(output))
            .unwrap()
            .backlinks()
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect()
    }

    #[test]
    fn test_extract_internal_links_in_order() {
        let body = r#"<p><a href="/b">b</a> <a href="/a">a</a> <a href="/b">b again</a></p>"#;
        let links: Vec<_> = extract_links(body).collect();
        assert_eq!(links, ["/b", "/a", "/b"]);
    }

    #[test]
    fn test_extract_skips_external_and_relative() {
        let body = r##"
            <a href="https://example.com/x" target="_blank">ext</a>
            <a href="notes.html">rel</a>
            <a href="//cdn.example.com/lib.js">proto</a>
            <a href="#top">frag</a>
            <a href="/kept">kept</a>
        "##;
        let links: Vec<_> = extract_links(body).collect();
        assert_eq!(links, ["/kept"]);
    }

    #[test]
    fn test_extract_with_other_attributes() {
        let body = r#"<a class="nav" title="x" href="/with/attrs">y</a>"#;
        assert_eq!(extract_links(body).collect::<Vec<_>>(), ["/with/attrs"]);
    }

    #[test]
    fn test_extract_ignores_non_anchor_href() {
        let body = r#"<link rel="stylesheet" href="/style.css"><area href="/map">"#;
        assert_eq!(extract_links(body).count(), 0);
    }

    #[test]
    fn test_extract_is_restartable() {
        let body = r#"<a href="/one">1</a>"#;
        assert_eq!(extract_links(body).count(), 1);
        assert_eq!(extract_links(body).count(), 1);
    }

    #[test]
    fn test_direct_match() {
        let mut registry = PageRegistry::new();
        registry.insert(md("a.html", "a", r#"<a href="/b.html">b</a>"#));
        registry.insert(md("b.html", "b", ""));

        let linked = resolve_backlinks(registry, &mapper());

        assert_eq!(backlinks_of(&linked, "b.html"), [("/a.html", "a")]);
        assert!(backlinks_of(&linked, "a.html").is_empty());
        assert_eq!(linked.stats().resolved, 1);
    }

    #[test]
    fn test_directory_index_fallback() {
        let mut registry = PageRegistry::new();
        registry.insert(md("section/index.html", "Section", ""));
        registry.insert(md("post.html", "post", r#"<a href="/section">s</a>"#));

        let linked = resolve_backlinks(registry, &mapper());

        assert_eq!(backlinks_of(&linked, "section/index.html"), [("/post.html", "post")]);
    }

    #[test]
    fn test_trailing_slash_and_fragment() {
        let mut registry = PageRegistry::new();
        registry.insert(md("section/index.html", "Section", ""));
        registry.insert(md("b.html", "b", ""));
        registry.insert(md(
            "a.html",
            "a",
            r#"<a href="/section/">s</a><a href="/b.html#part">b</a><a href="/b.html?x=1">b</a>"#,
        ));

        let linked = resolve_backlinks(registry, &mapper());

        assert_eq!(backlinks_of(&linked, "section/index.html"), [("/a.html", "a")]);
        assert_eq!(backlinks_of(&linked, "b.html"), [("/a.html", "a")]);
    }

    #[test]
    fn test_self_link() {
        let mut registry = PageRegistry::new();
        registry.insert(md("me.html", "me", r#"<a href="/me.html">me</a>"#));

        let linked = resolve_backlinks(registry, &mapper());

        assert_eq!(backlinks_of(&linked, "me.html"), [("/me.html", "me")]);
    }

    #[test]
    fn test_unresolved_link() {
        let mut registry = PageRegistry::new();
        registry.insert(md("a.html", "a", r#"<a href="/nowhere">x</a>"#));
        registry.insert(md("b.html", "b", ""));

        let linked = resolve_backlinks(registry, &mapper());

        assert!(linked.iter().all(|p| p.backlinks().is_empty()));
        assert_eq!(linked.stats().unresolved, 1);
        assert_eq!(linked.stats().resolved, 0);
    }

    #[test]
    fn test_duplicate_links_single_entry() {
        let mut registry = PageRegistry::new();
        registry.insert(md("a.html", "a", r#"<a href="/b.html">1</a><a href="/b.html">2</a>"#));
        registry.insert(md("b.html", "b", ""));

        let linked = resolve_backlinks(registry, &mapper());

        assert_eq!(backlinks_of(&linked, "b.html"), [("/a.html", "a")]);
    }

    #[test]
    fn test_templated_html_is_never_a_source() {
        let mut registry = PageRegistry::new();
        registry.insert(Page::new(
            "content/about.html".into(),
            "public/about.html".into(),
            "about".into(),
            PageKind::TemplatedHtml,
        ));
        registry.insert(md("a.html", "a", r#"<a href="/about.html">about</a>"#));

        let linked = resolve_backlinks(registry, &mapper());

        assert_eq!(backlinks_of(&linked, "about.html"), [("/a.html", "a")]);
        assert!(backlinks_of(&linked, "a.html").is_empty());
    }

    #[test]
    fn test_result_independent_of_insertion_order() {
        let pages = || {
            vec![
                md("a.html", "a", r#"<a href="/b.html">b</a><a href="/c">c</a>"#),
                md("b.html", "b", r#"<a href="/a.html">a</a>"#),
                md("c/index.html", "c", r#"<a href="/b.html">b</a>"#),
            ]
        };

        let mut forward = PageRegistry::new();
        pages().into_iter().for_each(|p| {
            forward.insert(p);
        });
        let mut backward = PageRegistry::new();
        pages().into_iter().rev().for_each(|p| {
            backward.insert(p);
        });

        let forward = resolve_backlinks(forward, &mapper());
        let backward = resolve_backlinks(backward, &mapper());

        for page in forward.iter() {
            let other = backward.get(page.output()).unwrap();
            assert_eq!(page.backlinks(), other.backlinks());
        }
        assert_eq!(
            backlinks_of(&forward, "b.html"),
            [("/a.html", "a"), ("/c/index.html", "c")]
        );
    }

    #[test]
    fn test_extract_decodes_entities() {
        let body = r#"<a href="/a&amp;b.html">x</a><a href="/it&#x27;s.html">y</a>"#;
        let links: Vec<_> = extract_links(body).collect();
        assert_eq!(links, ["/a&b.html", "/it's.html"]);
        assert!(matches!(decode_entities("/plain"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_ampersand_in_markdown_link_resolves() {
        let mut registry = PageRegistry::new();
        registry.insert(md("a&b.html", "a&b", ""));
        registry.insert(md("src.html", "src", &markdown_to_html("[x](/a&b.html)")));

        let linked = resolve_backlinks(registry, &mapper());

        assert_eq!(backlinks_of(&linked, "a&b.html"), [("/src.html", "src")]);
        assert_eq!(linked.stats().unresolved, 0);
    }

    #[test]
    fn test_strip_suffixes() {
        assert_eq!(strip_suffixes("/a#b"), "/a");
        assert_eq!(strip_suffixes("/a?b=c#d"), "/a");
        assert_eq!(strip_suffixes("/a"), "/a");
    }
}
