//! Application state management.

use odocgen_core::{Config, FilterEngine, IndexLoader, IndexModel, LinkBuilder, RenderSurface};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// Shared application state.
pub struct App {
    /// Configuration
    pub config: Config,

    /// The loaded documentation index
    pub index: Arc<IndexModel>,

    /// Quote lines shipped with the index
    pub quotes: Vec<String>,

    /// Where the index was read from
    pub source: PathBuf,

    /// Link layout derived from the configuration
    pub links: LinkBuilder,
}

impl App {
    /// Load the index file and create a new application instance.
    pub fn new(config: Config, index_path: &Path) -> anyhow::Result<Self> {
        let document = IndexLoader::load(index_path)?;
        let links = LinkBuilder::new(&config.links);

        info!(
            source = %index_path.display(),
            entries = document.index.len(),
            "Application initialized"
        );

        Ok(App {
            config,
            index: Arc::new(document.index),
            quotes: document.quotes,
            source: index_path.to_path_buf(),
            links,
        })
    }

    /// Render the index into `surface` with `query` as the load-time query.
    pub fn render<S: RenderSurface>(&self, surface: S, query: &str) -> FilterEngine<S> {
        FilterEngine::render(Arc::clone(&self.index), surface, &self.links, query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use odocgen_core::MemorySurface;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_app_renders_loaded_index() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("index.json");
        fs::write(
            &path,
            r#"{"classes": ["Dog"], "methods": {"bark": {"c": "Dog", "o": true}}}"#,
        )
        .unwrap();

        let app = App::new(Config::default(), &path).unwrap();
        assert_eq!(app.index.len(), 2);

        let engine = app.render(MemorySurface::new(), "bark");
        assert_eq!(engine.surface().visible_count(), 1);
    }

    #[test]
    fn test_app_missing_index() {
        let temp_dir = TempDir::new().unwrap();
        assert!(App::new(Config::default(), &temp_dir.path().join("db.js")).is_err());
    }
}
