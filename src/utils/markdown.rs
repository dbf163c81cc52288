//! Markdown to HTML conversion.

use crate::utils::is_external_link;
use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, html};

/// Parser extensions enabled for content pages.
pub fn parser_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_HEADING_ATTRIBUTES
        | Options::ENABLE_DEFINITION_LIST
}

/// Convert markdown source to an HTML fragment.
///
/// Links with a scheme (`https:`, `mailto:` ...) open in a new browsing
/// context; site-internal links are left untouched so backlinks can find them.
pub fn markdown_to_html(source: &str) -> String {
    let parser = Parser::new_ext(source, parser_options());
    let events = parser.map(|event| match event {
        Event::Start(Tag::Link {
            dest_url, title, ..
        }) if is_external_link(&dest_url) => Event::Html(external_anchor(&dest_url, &title)),
        other => other,
    });

    let mut output = String::with_capacity(source.len() * 3 / 2);
    html::push_html(&mut output, events);
    output
}

fn external_anchor(url: &str, title: &str) -> CowStr<'static> {
    let mut tag = format!("<a href=\"{}\"", escape_attr(url));
    if !title.is_empty() {
        tag.push_str(&format!(" title=\"{}\"", escape_attr(title)));
    }
    tag.push_str(" target=\"_blank\">");
    CowStr::from(tag)
}

fn escape_attr(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
