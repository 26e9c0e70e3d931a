//! Query command - print the entries a pattern leaves visible.

use crate::app::App;
use crate::OutputFormat;
use odocgen_core::{Config, MemorySurface, RowSpec};
use std::path::Path;
use std::time::Instant;

/// Run the query command.
pub fn run(config: Config, index: &Path, pattern: &str, output: OutputFormat) -> anyhow::Result<()> {
    let app = App::new(config, index)?;

    if app.index.is_empty() {
        eprintln!("Index is empty. Regenerate the documentation first.");
        return Ok(());
    }

    let start = Instant::now();
    let engine = app.render(MemorySurface::with_capacity(app.index.len()), pattern);
    let elapsed = start.elapsed();

    let rows: Vec<&RowSpec> = engine.surface().visible_rows().collect();

    match output {
        OutputFormat::Text => {
            for row in &rows {
                println!("{}  ->  {}", row.label(), row.link.href);
            }

            eprintln!();
            eprintln!(
                "{} of {} entries match in {:.3}ms",
                rows.len(),
                engine.surface().len(),
                elapsed.as_secs_f64() * 1000.0
            );
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&rows_to_json(&rows))?);
        }
    }

    Ok(())
}

/// JSON shape of the visible rows.
fn rows_to_json(rows: &[&RowSpec]) -> Vec<serde_json::Value> {
    rows.iter()
        .map(|row| {
            serde_json::json!({
                "kind": row.kind,
                "id": row.id,
                "label": row.label(),
                "href": row.link.href,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use odocgen_core::{FilterEngine, IndexModel, LinkBuilder};
    use std::sync::Arc;

    #[test]
    fn test_rows_to_json() {
        let index = Arc::new(
            IndexModel::builder()
                .class("Dog")
                .method("eat", "Dog", false)
                .build(),
        );
        let engine =
            FilterEngine::render(index, MemorySurface::new(), &LinkBuilder::default(), "eat");
        let rows: Vec<&RowSpec> = engine.surface().visible_rows().collect();

        let json = rows_to_json(&rows);
        assert_eq!(json.len(), 1);
        assert_eq!(json[0]["kind"], "method");
        assert_eq!(json[0]["id"], "m-eat-c-Dog");
        assert_eq!(json[0]["label"], "[method] eat of Dog (inherited)");
        assert_eq!(json[0]["href"], "class/Dog.html#m-eat");
    }
}
