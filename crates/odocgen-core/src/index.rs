//! The read-only documentation index.
//!
//! `IndexModel` holds the three collections produced by the documentation
//! generator: class names, methods and fields. It is built once, wrapped in
//! an `Arc`, and never mutated afterwards.
//!
//! ## Architecture
//!
//! - `classes: Vec<String>` in generator order
//! - `methods` / `fields`: `Vec<MemberEntry>` in generator order
//!
//! Members are kept as sequences rather than maps keyed by name, since one
//! method name usually appears under many owner classes. Order is the
//! insertion order of the input; nothing here sorts.

use crate::error::{OdocError, Result};
use crate::types::{EntryKey, EntryKind, IndexEntry, IndexStats, MemberEntry};
use std::collections::{HashMap, HashSet};
use std::fmt;
use tracing::debug;

/// Immutable index of documented classes, methods and fields.
///
/// ## Example
///
/// ```rust
/// use odocgen_core::IndexModel;
///
/// let index = IndexModel::builder()
///     .class("Animal")
///     .class("Dog")
///     .method("bark", "Dog", true)
///     .method("eat", "Dog", false)
///     .build();
///
/// assert_eq!(index.list_classes(), vec!["Animal", "Dog"]);
/// assert_eq!(index.list_methods()[1], ("eat", "Dog", false));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexModel {
    classes: Vec<String>,
    methods: Vec<MemberEntry>,
    fields: Vec<MemberEntry>,
}

impl IndexModel {
    /// Create an index from already-ordered collections.
    pub fn new(classes: Vec<String>, methods: Vec<MemberEntry>, fields: Vec<MemberEntry>) -> Self {
        IndexModel {
            classes,
            methods,
            fields,
        }
    }

    /// Start building an index entry by entry.
    pub fn builder() -> IndexBuilder {
        IndexBuilder::default()
    }

    /// Class names in generator order.
    pub fn list_classes(&self) -> Vec<&str> {
        self.classes.iter().map(String::as_str).collect()
    }

    /// `(name, owner, declared_here)` for every method, in generator order.
    pub fn list_methods(&self) -> Vec<(&str, &str, bool)> {
        self.methods.iter().map(MemberEntry::as_tuple).collect()
    }

    /// `(name, owner, declared_here)` for every field, in generator order.
    pub fn list_fields(&self) -> Vec<(&str, &str, bool)> {
        self.fields.iter().map(MemberEntry::as_tuple).collect()
    }

    /// Every entry in render order: classes, then methods, then fields.
    pub fn entries(&self) -> impl Iterator<Item = IndexEntry<'_>> {
        self.classes
            .iter()
            .map(|c| IndexEntry::Class(c.as_str()))
            .chain(self.methods.iter().map(IndexEntry::Method))
            .chain(self.fields.iter().map(IndexEntry::Field))
    }

    /// Total number of entries (one rendered row each).
    pub fn len(&self) -> usize {
        self.classes.len() + self.methods.len() + self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            classes: self.classes.len(),
            methods: self.methods.len(),
            fields: self.fields.len(),
            inherited: self
                .methods
                .iter()
                .chain(self.fields.iter())
                .filter(|m| !m.declared_here)
                .count(),
        }
    }

    /// Check the generator's invariants.
    ///
    /// Nothing in rendering or filtering depends on this; a broken index
    /// still renders, with dead or shadowed links.
    pub fn validate(&self) -> Vec<IndexIssue> {
        let mut issues = Vec::new();

        let mut classes = HashSet::with_capacity(self.classes.len());
        for class in &self.classes {
            if !classes.insert(class.as_str()) {
                issues.push(IndexIssue::DuplicateKey {
                    key: EntryKey::class(class.as_str()),
                });
            }
        }

        for (kind, members) in [
            (EntryKind::Method, &self.methods),
            (EntryKind::Field, &self.fields),
        ] {
            let mut seen = HashSet::with_capacity(members.len());
            for member in members {
                if !classes.contains(member.owner.as_str()) {
                    issues.push(IndexIssue::UnknownOwner {
                        kind,
                        name: member.name.clone(),
                        owner: member.owner.clone(),
                    });
                }
                if !seen.insert((member.name.as_str(), member.owner.as_str())) {
                    let key = match kind {
                        EntryKind::Field => EntryKey::field(&member.name, &member.owner),
                        _ => EntryKey::method(&member.name, &member.owner),
                    };
                    issues.push(IndexIssue::DuplicateKey { key });
                }
            }
        }

        debug!(issues = issues.len(), "Index validated");
        issues
    }

    /// Like [`validate`](Self::validate), but fails on the first report.
    pub fn validate_strict(&self) -> Result<()> {
        match self.validate().into_iter().next() {
            None => Ok(()),
            Some(issue) => Err(OdocError::InvalidIndex {
                reason: issue.to_string(),
            }),
        }
    }

    /// Number of distinct owners per member name, for status output.
    pub fn owner_counts(&self, kind: EntryKind) -> HashMap<&str, usize> {
        let members = match kind {
            EntryKind::Class => return HashMap::new(),
            EntryKind::Method => &self.methods,
            EntryKind::Field => &self.fields,
        };
        let mut counts = HashMap::new();
        for member in members {
            *counts.entry(member.name.as_str()).or_insert(0) += 1;
        }
        counts
    }
}

/// A broken generator invariant found by [`IndexModel::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexIssue {
    /// A member references a class missing from the class list
    UnknownOwner {
        kind: EntryKind,
        name: String,
        owner: String,
    },

    /// Two entries of one collection share a composite key
    DuplicateKey { key: EntryKey },
}

impl fmt::Display for IndexIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexIssue::UnknownOwner { kind, name, owner } => {
                write!(f, "{} '{}' is owned by unknown class '{}'", kind, name, owner)
            }
            IndexIssue::DuplicateKey { key } => write!(f, "duplicate entry '{}'", key),
        }
    }
}

/// Incremental constructor for [`IndexModel`].
#[derive(Debug, Default)]
pub struct IndexBuilder {
    classes: Vec<String>,
    methods: Vec<MemberEntry>,
    fields: Vec<MemberEntry>,
}

impl IndexBuilder {
    pub fn class(mut self, name: impl Into<String>) -> Self {
        self.classes.push(name.into());
        self
    }

    pub fn method(
        mut self,
        name: impl Into<String>,
        owner: impl Into<String>,
        declared_here: bool,
    ) -> Self {
        self.methods
            .push(MemberEntry::new(name, owner, declared_here));
        self
    }

    pub fn field(
        mut self,
        name: impl Into<String>,
        owner: impl Into<String>,
        declared_here: bool,
    ) -> Self {
        self.fields.push(MemberEntry::new(name, owner, declared_here));
        self
    }

    pub fn build(self) -> IndexModel {
        IndexModel::new(self.classes, self.methods, self.fields)
    }
}
