//! Static HTML page of the rendered index.
//!
//! `HtmlSurface` records rows like [`MemorySurface`] and can serialize the
//! container as a standalone page: the `search` input, the `data` container
//! and one element per row, with a `hidden` attribute on rows the current
//! query filters out. A small inline script re-runs the filter in the
//! browser on every input event: a row is shown when its entry name
//! contains the query, and only the first row carrying a given id is
//! addressed.

use crate::config::PageConfig;
use crate::surface::{MemorySurface, NodeId, RenderSurface, RowSpec};
use std::fmt;

/// Element id of the search box.
pub const SEARCH_INPUT_ID: &str = "search";

/// Element id of the result container.
pub const CONTAINER_ID: &str = "data";

/// Live filter run by the browser on every edit of the search box.
const FILTER_SCRIPT: &str = r##"<script>
const search = document.getElementById("search");
function update() {
    const needle = search.value;
    for (const row of document.querySelectorAll("#data > .g")) {
        if (document.getElementById(row.id) !== row) continue;
        row.hidden = !row.dataset.name.includes(needle);
    }
}
search.addEventListener("input", update);
</script>"##;

/// A rendering surface that can be written out as HTML.
#[derive(Debug)]
pub struct HtmlSurface {
    inner: MemorySurface,
    page: PageConfig,
}

impl HtmlSurface {
    pub fn new(page: PageConfig) -> Self {
        HtmlSurface {
            inner: MemorySurface::new(),
            page,
        }
    }

    pub fn rows(&self) -> &MemorySurface {
        &self.inner
    }

    /// Page title, with the documented branch as `[branch]` when set.
    pub fn title(&self) -> String {
        if self.page.branch.is_empty() {
            self.page.title.clone()
        } else {
            format!("{} [{}]", self.page.title, self.page.branch)
        }
    }

    /// The whole page, with `query` pre-filled in the search box.
    pub fn page<'a>(&'a self, query: &'a str) -> HtmlPage<'a> {
        HtmlPage {
            surface: self,
            query,
        }
    }

    pub fn to_html(&self, query: &str) -> String {
        self.page(query).to_string()
    }
}

/// Displays as a complete HTML document.
pub struct HtmlPage<'a> {
    surface: &'a HtmlSurface,
    query: &'a str,
}

impl fmt::Display for HtmlPage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = escape(&self.surface.title());

        f.write_str("<!doctype html>")?;
        f.write_str(r#"<html lang="en"><head><meta charset="UTF-8" />"#)?;
        f.write_str(r#"<meta name="viewport" content="width=device-width, initial-scale=1.0" />"#)?;
        write!(f, "<title>{}</title>", title)?;
        f.write_str("</head><body>")?;
        write!(f, "<h1>{}</h1>", title)?;
        write!(
            f,
            r#"<input id="{}" type="text" value="{}" autofocus />"#,
            SEARCH_INPUT_ID,
            escape(self.query)
        )?;
        write!(f, r#"<div id="{}">"#, CONTAINER_ID)?;
        for row in self.surface.inner.rows() {
            write_row(f, row)?;
        }
        f.write_str("</div>")?;
        f.write_str(FILTER_SCRIPT)?;
        f.write_str("</body></html>\n")
    }
}

impl RenderSurface for HtmlSurface {
    type Handle = NodeId;

    fn create_row(&mut self, row: &RowSpec) -> NodeId {
        self.inner.create_row(row)
    }

    fn append(&mut self, handle: NodeId) {
        self.inner.append(handle)
    }

    fn set_visible(&mut self, handle: NodeId, visible: bool) {
        self.inner.set_visible(handle, visible)
    }

    fn is_visible(&self, handle: NodeId) -> bool {
        self.inner.is_visible(handle)
    }
}

fn write_row(f: &mut fmt::Formatter<'_>, row: &RowSpec) -> fmt::Result {
    write!(
        f,
        r#"<{} id="{}" class="{}" data-name="{}""#,
        row.tag,
        escape(&row.id),
        row.class,
        escape(&row.link.text)
    )?;
    if !row.visible {
        f.write_str(" hidden")?;
    }
    write!(
        f,
        r#">{}<a href="{}" target="{}">{}</a>{}"#,
        escape(&row.prefix),
        escape(&row.link.href),
        escape(&row.link.target),
        escape(&row.link.text),
        escape(&row.suffix)
    )?;
    if row.line_break {
        f.write_str("<br />")?;
    }
    write!(f, "</{}>", row.tag)
}

/// Escape text for use in element content and double-quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::FilterEngine;
    use crate::index::IndexModel;
    use crate::render::LinkBuilder;
    use std::sync::Arc;

    fn page(branch: &str) -> PageConfig {
        PageConfig {
            title: "odocgen".to_string(),
            branch: branch.to_string(),
        }
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape(r#"<a href="x">&'"#), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn test_title_with_branch() {
        assert_eq!(HtmlSurface::new(page("")).title(), "odocgen");
        assert_eq!(HtmlSurface::new(page("17.0")).title(), "odocgen [17.0]");
    }

    #[test]
    fn test_snapshot_marks_hidden_rows() {
        let index = Arc::new(
            IndexModel::builder()
                .class("Dog")
                .method("bark", "Dog", true)
                .field("name", "Dog", false)
                .build(),
        );
        let engine = FilterEngine::render(
            index,
            HtmlSurface::new(page("main")),
            &LinkBuilder::default(),
            "ar",
        );
        let html = engine.surface().to_html(engine.query());

        assert!(html.contains(r#"<input id="search" type="text" value="ar" autofocus />"#));
        assert!(html.contains(r#"<p id="c-Dog" class="g" data-name="Dog" hidden>[class] <a href="class/Dog.html" target="_blank">Dog</a></p>"#));
        assert!(html.contains(r#"<li id="m-bark-c-Dog" class="g" data-name="bark">[method] <a href="class/Dog.html#m-bark" target="_blank">bark</a> of Dog</li>"#));
        assert!(html.contains(r#"<li id="f-name-c-Dog" class="g" data-name="name" hidden>[field] <a href="class/Dog.html#f-name" target="_blank">name</a> of Dog (inherited)<br /></li>"#));
        assert!(html.contains("<title>odocgen [main]</title>"));
    }

    #[test]
    fn test_snapshot_escapes_names() {
        let index = Arc::new(IndexModel::builder().class("A<B>").build());
        let engine =
            FilterEngine::render(index, HtmlSurface::new(page("")), &LinkBuilder::default(), "");
        let html = engine.surface().to_html("\"q\"");

        assert!(html.contains(r#"data-name="A&lt;B&gt;""#));
        assert!(!html.contains("A<B>"));
        assert!(html.contains(r#"value="&quot;q&quot;""#));
    }

    #[test]
    fn test_page_carries_live_filter() {
        let index = Arc::new(
            IndexModel::builder()
                .class("Dog")
                .method("bark", "Dog", true)
                .build(),
        );
        let engine =
            FilterEngine::render(index, HtmlSurface::new(page("")), &LinkBuilder::default(), "");
        let html = engine.surface().to_html("");

        let script_at = html.find("<script>").unwrap();
        assert!(script_at > html.find(r#"<div id="data">"#).unwrap());
        assert!(html.contains(r#"search.addEventListener("input", update);"#));
        assert!(html.contains("row.dataset.name.includes(needle)"));
        assert!(html.contains("document.getElementById(row.id) !== row"));
        assert!(html.ends_with("</script></body></html>\n"));
    }

    #[test]
    fn test_page_display_matches_to_html() {
        let surface = HtmlSurface::new(page("main"));
        assert_eq!(surface.page("q").to_string(), surface.to_html("q"));
    }
}
