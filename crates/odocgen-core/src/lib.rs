//! # odocgen Core Library
//!
//! This crate provides the index model and the live filter/render engine
//! behind the searchable index page of a generated documentation site. It is
//! host-agnostic: rows are created through the [`RenderSurface`] trait and
//! the host calls [`FilterEngine::on_query_changed`] on every edit of the
//! search box.
//!
//! ## Architecture
//!
//! - **Types** (`types`): entry kinds, member entries and typed row keys
//! - **Index** (`index`): immutable classes/methods/fields collections
//! - **Search** (`search`): the case-sensitive substring predicate
//! - **Surface** (`surface`): rendering substrate trait and in-memory rows
//! - **Render** (`render`): row labels and documentation links
//! - **Engine** (`engine`): initial render and live filter passes
//! - **Html** (`html`): static page snapshot of the rendered rows
//! - **Loader** (`loader`, `script`): reading the generator's output
//! - **Config** (`config`): Configuration management
//!
//! ## Example
//!
//! ```rust
//! use odocgen_core::{FilterEngine, IndexModel, LinkBuilder, MemorySurface};
//! use std::sync::Arc;
//!
//! let index = Arc::new(
//!     IndexModel::builder()
//!         .class("Dog")
//!         .method("bark", "Dog", true)
//!         .build(),
//! );
//! let mut engine =
//!     FilterEngine::render(index, MemorySurface::new(), &LinkBuilder::default(), "");
//!
//! engine.on_query_changed("ar");
//! let rows: Vec<String> = engine.surface().visible_rows().map(|r| r.label()).collect();
//! assert_eq!(rows, vec!["[method] bark of Dog"]);
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod html;
pub mod index;
pub mod loader;
pub mod render;
pub mod script;
pub mod search;
pub mod surface;
pub mod types;

// Re-export commonly used types
pub use config::Config;
pub use engine::{FilterEngine, FilterOutcome};
pub use error::{OdocError, Result};
pub use html::{HtmlPage, HtmlSurface};
pub use index::{IndexBuilder, IndexIssue, IndexModel};
pub use loader::{IndexDocument, IndexFormat, IndexLoader};
pub use render::LinkBuilder;
pub use search::SearchQuery;
pub use surface::{Link, MemorySurface, NodeId, RenderSurface, RowSpec};
pub use types::{EntryKey, EntryKind, IndexEntry, IndexStats, MemberEntry};
