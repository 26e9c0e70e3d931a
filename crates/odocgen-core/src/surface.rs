//! Rendering substrate abstraction.
//!
//! The filter/render engine never touches a concrete UI. It talks to a
//! [`RenderSurface`], which owns the rendered rows and exposes the few
//! primitives a DOM-like host offers: create an element, append it to the
//! single result container, and toggle its visibility.
//!
//! [`MemorySurface`] is the in-process implementation used by the terminal
//! front-ends and by tests.

use crate::types::EntryKind;
use serde::Serialize;
use std::fmt::Debug;
use std::hash::Hash;

/// A hyperlink inside a row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    /// Target documentation page, e.g. `class/Dog.html#m-bark`
    pub href: String,

    /// Browsing context, e.g. `_blank`
    pub target: String,

    /// Link text (the entry name)
    pub text: String,
}

/// Everything needed to create one row element.
///
/// A row reads `<prefix><link><suffix>`, e.g.
/// `[method] ` + `bark` + ` of Dog (inherited)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowSpec {
    pub kind: EntryKind,

    /// Element tag (`p` for classes, `li` for members)
    pub tag: &'static str,

    /// Element id, the display form of the row's entry key
    pub id: String,

    /// Style class shared by all rows
    pub class: &'static str,

    pub prefix: String,
    pub link: Link,
    pub suffix: String,

    /// Whether the row ends with a line break
    pub line_break: bool,

    /// Visibility at creation time
    pub visible: bool,
}

impl RowSpec {
    /// Plain-text label as a reader sees it, e.g. `[method] bark of Dog`.
    pub fn label(&self) -> String {
        format!("{}{}{}", self.prefix, self.link.text, self.suffix)
    }
}

/// Host primitives the engine renders through.
///
/// The surface owns every row. Callers keep only the returned handles.
pub trait RenderSurface {
    /// Opaque address of a created row.
    type Handle: Copy + Eq + Hash + Debug;

    /// Create a detached row element.
    fn create_row(&mut self, row: &RowSpec) -> Self::Handle;

    /// Append a created row to the end of the container.
    fn append(&mut self, handle: Self::Handle);

    /// Show or hide a row.
    fn set_visible(&mut self, handle: Self::Handle, visible: bool);

    /// Current visibility of a row.
    fn is_visible(&self, handle: Self::Handle) -> bool;
}

/// Handle into a [`MemorySurface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// In-memory row storage with a single ordered container.
#[derive(Debug, Default)]
pub struct MemorySurface {
    /// Every created row, indexed by `NodeId`
    nodes: Vec<RowSpec>,

    /// Appended rows in container order
    container: Vec<NodeId>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        MemorySurface {
            nodes: Vec::with_capacity(capacity),
            container: Vec::with_capacity(capacity),
        }
    }

    /// Look up a row by handle.
    pub fn row(&self, handle: NodeId) -> Option<&RowSpec> {
        self.nodes.get(handle.0)
    }

    /// Rows in container order.
    pub fn rows(&self) -> impl Iterator<Item = &RowSpec> + '_ {
        self.container.iter().filter_map(|id| self.nodes.get(id.0))
    }

    /// Visible rows in container order.
    pub fn visible_rows(&self) -> impl Iterator<Item = &RowSpec> + '_ {
        self.rows().filter(|row| row.visible)
    }

    /// Number of appended rows.
    pub fn len(&self) -> usize {
        self.container.len()
    }

    pub fn is_empty(&self) -> bool {
        self.container.is_empty()
    }

    pub fn visible_count(&self) -> usize {
        self.visible_rows().count()
    }
}

impl RenderSurface for MemorySurface {
    type Handle = NodeId;

    fn create_row(&mut self, row: &RowSpec) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(row.clone());
        id
    }

    fn append(&mut self, handle: NodeId) {
        self.container.push(handle);
    }

    fn set_visible(&mut self, handle: NodeId, visible: bool) {
        if let Some(row) = self.nodes.get_mut(handle.0) {
            row.visible = visible;
        }
    }

    fn is_visible(&self, handle: NodeId) -> bool {
        self.nodes.get(handle.0).map_or(false, |row| row.visible)
    }
}
