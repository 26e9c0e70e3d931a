//! Status command - show index statistics and validation issues.

use crate::app::App;
use odocgen_core::{Config, EntryKind};
use std::path::Path;

/// How many validation issues to print before summarizing.
const MAX_ISSUES_SHOWN: usize = 20;

/// Run the status command.
pub fn run(config: Config, index: &Path) -> anyhow::Result<()> {
    let app = App::new(config, index)?;
    let stats = app.index.stats();

    println!("odocgen Index Status");
    println!("====================");
    println!();
    println!("Source: {}", app.source.display());
    println!();

    if app.index.is_empty() {
        println!("Index is empty.");
        return Ok(());
    }

    println!("Summary:");
    println!("  Classes:          {}", stats.classes);
    println!("  Methods:          {}", stats.methods);
    println!("  Fields:           {}", stats.fields);
    println!("  Inherited:        {}", stats.inherited);
    println!("  Total rows:       {}", stats.total_entries());
    println!("  Quotes:           {}", app.quotes.len());

    for kind in [EntryKind::Method, EntryKind::Field] {
        let counts = app.index.owner_counts(kind);
        if let Some((name, owners)) = counts.iter().max_by(|a, b| a.1.cmp(b.1).then(b.0.cmp(a.0)))
        {
            println!("  Most shared {}: {} ({} classes)", kind, name, owners);
        }
    }

    let issues = app.index.validate();
    println!();
    if issues.is_empty() {
        println!("Validation: ✓ no issues");
    } else {
        println!("Validation: ⚠ {} issue(s)", issues.len());
        for issue in issues.iter().take(MAX_ISSUES_SHOWN) {
            println!("  - {}", issue);
        }
        if issues.len() > MAX_ISSUES_SHOWN {
            println!("  ... and {} more", issues.len() - MAX_ISSUES_SHOWN);
        }
    }

    Ok(())
}
