//! The filter/render engine.
//!
//! [`FilterEngine::render`] materializes one row per index entry into a
//! [`RenderSurface`] and remembers the handle under the entry's typed key.
//! [`FilterEngine::on_query_changed`] then re-evaluates every entry against
//! the new query and addresses rows directly through that key map; it never
//! scans or reads the rendered rows.
//!
//! The engine is synchronous and takes `&mut self` for every pass, so a
//! host that dispatches input events one at a time gets complete,
//! non-overlapping passes.

use crate::index::IndexModel;
use crate::render::LinkBuilder;
use crate::search::SearchQuery;
use crate::surface::RenderSurface;
use crate::types::{EntryKey, IndexEntry};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Summary of one filter pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterOutcome {
    /// Rows visible after the pass
    pub visible: usize,

    /// Rows hidden after the pass
    pub hidden: usize,

    /// Rows whose visibility flipped during the pass
    pub changed: usize,
}

impl FilterOutcome {
    pub fn total(&self) -> usize {
        self.visible + self.hidden
    }
}

/// Owns the rendering surface and the key → handle map for one page view.
pub struct FilterEngine<S: RenderSurface> {
    index: Arc<IndexModel>,
    surface: S,
    handles: HashMap<EntryKey, S::Handle>,
    query: SearchQuery,
}

impl<S: RenderSurface> FilterEngine<S> {
    /// Run the initial render.
    ///
    /// Rows are appended classes first, then methods, then fields, each in
    /// index order. Initial visibility uses the same predicate as the live
    /// filter, evaluated against `initial_query`.
    #[instrument(skip_all, fields(entries = index.len()))]
    pub fn render(
        index: Arc<IndexModel>,
        mut surface: S,
        links: &LinkBuilder,
        initial_query: &str,
    ) -> Self {
        let query = SearchQuery::substring(initial_query);
        let mut handles = HashMap::with_capacity(index.len());
        let mut visible = 0usize;

        for entry in index.entries() {
            let shown = query.matches(&entry);
            let handle = surface.create_row(&links.row(&entry, shown));
            surface.append(handle);
            if shown {
                visible += 1;
            }

            match handles.entry(entry.key()) {
                Entry::Vacant(slot) => {
                    slot.insert(handle);
                }
                Entry::Occupied(slot) => {
                    // The first row registered under a key is the one the
                    // filter addresses.
                    warn!(key = %slot.key(), "Duplicate index entry, later row is not filtered");
                }
            }
        }

        info!(
            rows = index.len(),
            visible = visible,
            query = %query.pattern(),
            "Index rendered"
        );

        FilterEngine {
            index,
            surface,
            handles,
            query,
        }
    }

    /// Re-filter every row against `query`.
    ///
    /// Each entry's row becomes visible iff its own name contains `query`
    /// (case-sensitive). The owner class, the inherited flag and the row's
    /// label text do not take part.
    #[instrument(skip(self))]
    pub fn on_query_changed(&mut self, query: &str) -> FilterOutcome {
        self.query = SearchQuery::substring(query);

        let mut outcome = FilterOutcome::default();
        for entry in self.index.entries() {
            let shown = self.query.matches(&entry);
            if shown {
                outcome.visible += 1;
            } else {
                outcome.hidden += 1;
            }

            let key = entry.key();
            let handle = self.handles.get(&key).copied();
            debug_assert!(handle.is_some(), "no rendered row for {}", key);
            let Some(handle) = handle else {
                warn!(key = %key, "No rendered row for index entry");
                continue;
            };

            if self.surface.is_visible(handle) != shown {
                outcome.changed += 1;
            }
            self.surface.set_visible(handle, shown);
        }

        debug!(
            visible = outcome.visible,
            hidden = outcome.hidden,
            changed = outcome.changed,
            "Filter pass complete"
        );
        outcome
    }

    /// The query of the last pass (or of the initial render).
    pub fn query(&self) -> &str {
        self.query.pattern()
    }

    pub fn index(&self) -> &Arc<IndexModel> {
        &self.index
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Handle of the row registered under `key`.
    pub fn handle(&self, key: &EntryKey) -> Option<S::Handle> {
        self.handles.get(key).copied()
    }

    /// Visibility of the row registered under `key`.
    pub fn is_visible(&self, key: &EntryKey) -> Option<bool> {
        self.handle(key).map(|h| self.surface.is_visible(h))
    }

    /// Entries whose rows are currently visible, in render order.
    pub fn visible_entries(&self) -> Vec<IndexEntry<'_>> {
        self.index
            .entries()
            .filter(|entry| self.is_visible(&entry.key()).unwrap_or(false))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{MemorySurface, NodeId, RowSpec};
    use crate::types::EntryKind;

    fn animals() -> Arc<IndexModel> {
        Arc::new(
            IndexModel::builder()
                .class("Animal")
                .class("Dog")
                .method("bark", "Dog", true)
                .method("eat", "Dog", false)
                .build(),
        )
    }

    fn odoo_like() -> Arc<IndexModel> {
        Arc::new(
            IndexModel::builder()
                .class("res.partner")
                .class("res.users")
                .method("write", "res.partner", true)
                .method("write", "res.users", false)
                .method("_compute_display_name", "res.partner", true)
                .field("name", "res.partner", true)
                .field("name", "res.users", false)
                .field("login", "res.users", true)
                .build(),
        )
    }

    fn render(index: Arc<IndexModel>, query: &str) -> FilterEngine<MemorySurface> {
        FilterEngine::render(index, MemorySurface::new(), &LinkBuilder::default(), query)
    }

    fn assert_predicate_holds(engine: &FilterEngine<MemorySurface>, query: &str) {
        for entry in engine.index().entries() {
            assert_eq!(
                engine.is_visible(&entry.key()),
                Some(entry.name().contains(query)),
                "entry {} under query {:?}",
                entry.key(),
                query
            );
        }
    }

    #[test]
    fn test_end_to_end_scenario() {
        let mut engine = render(animals(), "");
        engine.on_query_changed("ar");

        let visible: Vec<String> = engine.surface().visible_rows().map(RowSpec::label).collect();
        assert_eq!(visible, vec!["[method] bark of Dog"]);
    }

    #[test]
    fn test_initial_render_order_and_labels() {
        let engine = render(odoo_like(), "");
        let labels: Vec<String> = engine.surface().rows().map(RowSpec::label).collect();
        assert_eq!(
            labels,
            vec![
                "[class] res.partner",
                "[class] res.users",
                "[method] write of res.partner",
                "[method] write of res.users (inherited)",
                "[method] _compute_display_name of res.partner",
                "[field] name of res.partner",
                "[field] name of res.users (inherited)",
                "[field] login of res.users",
            ]
        );
    }

    #[test]
    fn test_empty_query_shows_everything() {
        let mut engine = render(odoo_like(), "");
        assert_eq!(engine.surface().visible_count(), 8);

        engine.on_query_changed("zzz");
        assert_eq!(engine.surface().visible_count(), 0);

        let outcome = engine.on_query_changed("");
        assert_eq!(outcome.visible, 8);
        assert_eq!(outcome.hidden, 0);
        assert_eq!(engine.surface().visible_count(), 8);
    }

    #[test]
    fn test_initial_query_applied_at_render() {
        let engine = render(animals(), "Dog");
        assert_eq!(engine.query(), "Dog");
        assert_eq!(engine.is_visible(&EntryKey::class("Dog")), Some(true));
        assert_eq!(engine.is_visible(&EntryKey::class("Animal")), Some(false));
        assert_eq!(engine.is_visible(&EntryKey::method("bark", "Dog")), Some(false));
    }

    #[test]
    fn test_predicate_holds_after_every_pass() {
        let mut engine = render(odoo_like(), "");
        for query in ["", "w", "write", "res", "name", "_", "Name", "login", "x"] {
            engine.on_query_changed(query);
            assert_predicate_holds(&engine, query);
        }
    }

    #[test]
    fn test_filter_is_idempotent() {
        let mut engine = render(odoo_like(), "");
        let first = engine.on_query_changed("na");
        let after_first: Vec<bool> = engine.surface().rows().map(|r| r.visible).collect();

        let second = engine.on_query_changed("na");
        let after_second: Vec<bool> = engine.surface().rows().map(|r| r.visible).collect();

        assert_eq!(after_first, after_second);
        assert_eq!(first.visible, second.visible);
        assert_eq!(second.changed, 0);
    }

    #[test]
    fn test_full_name_query_shows_entry() {
        let mut engine = render(odoo_like(), "");
        for entry in odoo_like().entries() {
            engine.on_query_changed(entry.name());
            assert_eq!(engine.is_visible(&entry.key()), Some(true));
        }
    }

    #[test]
    fn test_inherited_flag_does_not_affect_visibility() {
        // Same name and owner, differing only in declared_here: rendered into
        // separate engines so both keys resolve.
        let declared = Arc::new(
            IndexModel::builder()
                .class("A")
                .method("run", "A", true)
                .build(),
        );
        let inherited = Arc::new(
            IndexModel::builder()
                .class("A")
                .method("run", "A", false)
                .build(),
        );

        let mut d = render(declared, "");
        let mut i = render(inherited, "");
        let key = EntryKey::method("run", "A");

        for query in ["", "r", "run", "un", "inherited", "A", "x"] {
            d.on_query_changed(query);
            i.on_query_changed(query);
            assert_eq!(d.is_visible(&key), i.is_visible(&key), "query {:?}", query);
        }

        let labels: Vec<String> = i.surface().rows().map(RowSpec::label).collect();
        assert_eq!(labels[1], "[method] run of A (inherited)");
    }

    #[test]
    fn test_owner_name_not_matched() {
        let mut engine = render(odoo_like(), "");
        engine.on_query_changed("partner");

        let visible: Vec<EntryKind> = engine.visible_entries().iter().map(|e| e.kind()).collect();
        assert_eq!(visible, vec![EntryKind::Class]);
    }

    #[test]
    fn test_composite_keys_addressable() {
        let index = Arc::new(
            IndexModel::builder()
                .class("A")
                .method("run", "A", true)
                .field("run", "A", true)
                .build(),
        );
        let engine = render(index, "");

        let method = engine.handle(&EntryKey::method("run", "A")).unwrap();
        let field = engine.handle(&EntryKey::field("run", "A")).unwrap();
        assert_ne!(method, field);

        let surface = engine.surface();
        assert_eq!(surface.row(method).unwrap().id, "m-run-c-A");
        assert_eq!(surface.row(field).unwrap().id, "f-run-c-A");
        assert_eq!(EntryKey::method("run", "A").to_string(), "m-run-c-A");
    }

    #[test]
    fn test_same_name_across_owners_filtered_together() {
        let mut engine = render(odoo_like(), "");
        engine.on_query_changed("write");
        assert_eq!(
            engine.is_visible(&EntryKey::method("write", "res.partner")),
            Some(true)
        );
        assert_eq!(
            engine.is_visible(&EntryKey::method("write", "res.users")),
            Some(true)
        );
        assert_eq!(engine.surface().visible_count(), 2);
    }

    #[test]
    fn test_outcome_counts_changes() {
        let mut engine = render(animals(), "");
        let outcome = engine.on_query_changed("a");
        // Animal, bark and eat contain "a"; only Dog is hidden.
        assert_eq!(outcome.visible, 3);
        assert_eq!(outcome.hidden, 1);
        assert_eq!(outcome.changed, 1);
        assert_eq!(outcome.total(), 4);

        let outcome = engine.on_query_changed("D");
        assert_eq!(outcome.visible, 1);
        assert_eq!(outcome.changed, 4);
    }

    #[test]
    fn test_duplicate_key_first_row_wins() {
        let index = Arc::new(
            IndexModel::builder()
                .class("A")
                .method("run", "A", true)
                .method("run", "A", false)
                .build(),
        );
        let mut engine = render(index, "");
        assert_eq!(engine.surface().len(), 3);
        assert_eq!(engine.handle(&EntryKey::method("run", "A")), Some(NodeId(1)));

        engine.on_query_changed("zzz");
        // Second row kept its initial visibility.
        assert!(!engine.surface().is_visible(NodeId(1)));
        assert!(engine.surface().is_visible(NodeId(2)));
    }

    #[test]
    fn test_unknown_key() {
        let engine = render(animals(), "");
        assert_eq!(engine.handle(&EntryKey::class("Cat")), None);
        assert_eq!(engine.is_visible(&EntryKey::field("bark", "Dog")), None);
    }
}
