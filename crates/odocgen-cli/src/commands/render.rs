//! Render command - write the index page as standalone HTML.

use crate::app::App;
use odocgen_core::{Config, HtmlSurface};
use std::fs;
use std::path::Path;
use std::time::Instant;

/// Run the render command.
pub fn run(
    config: Config,
    index: &Path,
    output: &Path,
    query: &str,
    branch: Option<String>,
) -> anyhow::Result<()> {
    let app = App::new(config, index)?;

    let mut page = app.config.page.clone();
    if let Some(branch) = branch {
        page.branch = branch;
    }

    let start = Instant::now();
    let engine = app.render(HtmlSurface::new(page), query);
    let html = engine.surface().to_html(engine.query());

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(output, html)?;

    let rows = engine.surface().rows();
    println!(
        "Wrote {} ({} rows, {} visible) in {:.2}ms",
        output.display(),
        rows.len(),
        rows.visible_count(),
        start.elapsed().as_secs_f64() * 1000.0
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_render_writes_page() {
        let temp_dir = TempDir::new().unwrap();
        let index = temp_dir.path().join("db.js");
        fs::write(
            &index,
            "const globalIndex={classes:[\"Dog\",],methods:{\"bark\":{o:true,c:\"Dog\"},},fields:{}};",
        )
        .unwrap();
        let output = temp_dir.path().join("site").join("index.html");

        run(Config::default(), &index, &output, "ar", Some("17.0".to_string())).unwrap();

        let html = fs::read_to_string(&output).unwrap();
        assert!(html.contains("<title>odocgen [17.0]</title>"));
        assert!(html.contains(r#"<p id="c-Dog" class="g" data-name="Dog" hidden>"#));
        assert!(html.contains(r#"<li id="m-bark-c-Dog" class="g" data-name="bark">"#));
        assert!(html.contains(r#"search.addEventListener("input", update);"#));
    }
}
