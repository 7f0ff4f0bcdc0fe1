// src/render/markdown.rs
// =============================================================================
// Turns markdown text into a traversable HTML document.
//
// We use the `pulldown-cmark` crate to render CommonMark (plus the usual GFM
// extensions: tables, footnotes, strikethrough, task lists) into an HTML
// string, and `scraper` to parse that string back into a DOM we can query
// with CSS selectors.
//
// Why render first instead of walking markdown events?
// - Links also come from raw HTML blocks inside the markdown
//   (<a href="...">, <img src="...">), which only show up as opaque HTML
//   events in the markdown stream
// - After rendering, [text](url), ![alt](src) and inline HTML all look the
//   same: plain <a> and <img> elements
// =============================================================================

use pulldown_cmark::{html, Options, Parser};
use scraper::Html;
use std::path::PathBuf;

// A rendered page, tagged with the markdown file it came from
pub struct RenderedDocument {
    pub source: PathBuf,
    pub html: Html,
}

impl RenderedDocument {
    pub fn new(source: impl Into<PathBuf>, markdown: &str) -> Self {
        Self {
            source: source.into(),
            html: Html::parse_document(&render_markdown(markdown)),
        }
    }
}

// Renders markdown to an HTML string
//
// Example:
//   "See [docs](page.html)" -> "<p>See <a href=\"page.html\">docs</a></p>\n"
pub fn render_markdown(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(markdown, options);
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}
