//! Core data types for odocgen.
//!
//! This module defines the entries of the documentation index and the typed
//! composite key that identifies each rendered row:
//!
//! - **EntryKind**: class, method or field
//! - **MemberEntry**: a method or field attributed to its owner class
//! - **IndexEntry**: a borrowed view over any of the three kinds
//! - **EntryKey**: the `(name, owner)` identity shared by render and filter

use serde::{Deserialize, Serialize};
use std::fmt;

/// The three kinds of documented items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Class,
    Method,
    Field,
}

impl EntryKind {
    /// Label prefix used on rendered rows, e.g. `[method]`.
    pub fn label(&self) -> &'static str {
        match self {
            EntryKind::Class => "[class]",
            EntryKind::Method => "[method]",
            EntryKind::Field => "[field]",
        }
    }

    /// One-letter id namespace used in anchors and legacy element ids.
    pub fn prefix(&self) -> char {
        match self {
            EntryKind::Class => 'c',
            EntryKind::Method => 'm',
            EntryKind::Field => 'f',
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKind::Class => write!(f, "class"),
            EntryKind::Method => write!(f, "method"),
            EntryKind::Field => write!(f, "field"),
        }
    }
}

/// A method or field together with its ownership metadata.
///
/// The same `name` may appear under several owners; `(name, owner)` is unique
/// within one collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberEntry {
    /// Member name as written in the source class
    pub name: String,

    /// Class the member is declared on or inherited into
    pub owner: String,

    /// True if defined directly on `owner`, false if inherited
    pub declared_here: bool,
}

impl MemberEntry {
    pub fn new(name: impl Into<String>, owner: impl Into<String>, declared_here: bool) -> Self {
        MemberEntry {
            name: name.into(),
            owner: owner.into(),
            declared_here,
        }
    }

    /// Shorthand for an entry defined directly on its owner.
    pub fn declared(name: impl Into<String>, owner: impl Into<String>) -> Self {
        Self::new(name, owner, true)
    }

    /// Shorthand for an entry inherited into its owner.
    pub fn inherited(name: impl Into<String>, owner: impl Into<String>) -> Self {
        Self::new(name, owner, false)
    }

    /// The `(name, owner, declared_here)` triple exposed by the index views.
    pub fn as_tuple(&self) -> (&str, &str, bool) {
        (&self.name, &self.owner, self.declared_here)
    }
}

/// Borrowed view over one entry of any kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexEntry<'a> {
    Class(&'a str),
    Method(&'a MemberEntry),
    Field(&'a MemberEntry),
}

impl<'a> IndexEntry<'a> {
    pub fn kind(&self) -> EntryKind {
        match self {
            IndexEntry::Class(_) => EntryKind::Class,
            IndexEntry::Method(_) => EntryKind::Method,
            IndexEntry::Field(_) => EntryKind::Field,
        }
    }

    /// The entry's own name, the only text the filter predicate looks at.
    pub fn name(&self) -> &'a str {
        match self {
            IndexEntry::Class(name) => name,
            IndexEntry::Method(m) | IndexEntry::Field(m) => &m.name,
        }
    }

    /// Owning class. A class owns itself.
    pub fn owner(&self) -> &'a str {
        match self {
            IndexEntry::Class(name) => name,
            IndexEntry::Method(m) | IndexEntry::Field(m) => &m.owner,
        }
    }

    /// False only for members inherited from an ancestor.
    pub fn declared_here(&self) -> bool {
        match self {
            IndexEntry::Class(_) => true,
            IndexEntry::Method(m) | IndexEntry::Field(m) => m.declared_here,
        }
    }

    pub fn key(&self) -> EntryKey {
        match self {
            IndexEntry::Class(name) => EntryKey::class(*name),
            IndexEntry::Method(m) => EntryKey::method(&m.name, &m.owner),
            IndexEntry::Field(m) => EntryKey::field(&m.name, &m.owner),
        }
    }
}

/// Typed identity of a rendered row.
///
/// Render and filter both derive the key from the same index data, so the
/// filter pass can address a row directly instead of scanning the container.
/// `Display` yields the element id the page uses (`c-Dog`, `m-bark-c-Dog`,
/// `f-name-c-Dog`); lookups never parse that string back.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntryKey {
    Class { name: String },
    Method { name: String, owner: String },
    Field { name: String, owner: String },
}

impl EntryKey {
    pub fn class(name: impl Into<String>) -> Self {
        EntryKey::Class { name: name.into() }
    }

    pub fn method(name: impl Into<String>, owner: impl Into<String>) -> Self {
        EntryKey::Method {
            name: name.into(),
            owner: owner.into(),
        }
    }

    pub fn field(name: impl Into<String>, owner: impl Into<String>) -> Self {
        EntryKey::Field {
            name: name.into(),
            owner: owner.into(),
        }
    }

    pub fn kind(&self) -> EntryKind {
        match self {
            EntryKey::Class { .. } => EntryKind::Class,
            EntryKey::Method { .. } => EntryKind::Method,
            EntryKey::Field { .. } => EntryKind::Field,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            EntryKey::Class { name }
            | EntryKey::Method { name, .. }
            | EntryKey::Field { name, .. } => name,
        }
    }
}

impl fmt::Display for EntryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKey::Class { name } => write!(f, "c-{}", name),
            EntryKey::Method { name, owner } => write!(f, "m-{}-c-{}", name, owner),
            EntryKey::Field { name, owner } => write!(f, "f-{}-c-{}", name, owner),
        }
    }
}

/// Statistics about the index
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
    /// Number of documented classes
    pub classes: usize,

    /// Number of method entries (one per owner)
    pub methods: usize,

    /// Number of field entries (one per owner)
    pub fields: usize,

    /// Methods and fields attributed to an owner through inheritance
    pub inherited: usize,
}

impl IndexStats {
    /// Total number of rows the index renders to.
    pub fn total_entries(&self) -> usize {
        self.classes + self.methods + self.fields
    }
}
