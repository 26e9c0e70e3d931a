//! Loading the generator's index output.
//!
//! Two on-disk forms are accepted:
//!
//! - **JSON** (`*.json`): `{"classes": [...], "methods": {...}, "fields": {...}}`
//!   with an optional `"quotes"` array.
//! - **Script** (`*.js`, usually `db.js`): `const globalIndex={...}` and an
//!   optional `const globalQuoteList=[...]`. [`crate::script`] finds the
//!   bindings and each initializer is decoded as JSON5.
//!
//! Members map a name to `{c: owner, o: declared_here}`. In both forms the
//! members are read in document order and a name repeated under several
//! owners yields one entry per occurrence.

use crate::error::{OdocError, Result};
use crate::index::IndexModel;
use crate::script::{self, Binding};
use crate::types::MemberEntry;
use serde::de::{MapAccess, Visitor};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Binding holding the index in the script form
pub const INDEX_BINDING: &str = "globalIndex";
/// Binding holding the quote list in the script form
pub const QUOTES_BINDING: &str = "globalQuoteList";

/// Everything read from one index file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexDocument {
    pub index: IndexModel,

    /// Free-form lines the generator ships alongside the index
    pub quotes: Vec<String>,
}

/// Input format of an index file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexFormat {
    Json,
    Script,
}

impl IndexFormat {
    /// Pick a format from the file extension, falling back to the content.
    pub fn detect(path: &Path, contents: &str) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => IndexFormat::Json,
            Some(ext) if ext.eq_ignore_ascii_case("js") => IndexFormat::Script,
            _ if contents.trim_start().starts_with('{') => IndexFormat::Json,
            _ => IndexFormat::Script,
        }
    }
}

/// Reads index files from disk.
pub struct IndexLoader;

impl IndexLoader {
    /// Load and parse an index file.
    pub fn load(path: &Path) -> Result<IndexDocument> {
        if !path.exists() {
            return Err(OdocError::IndexNotFound {
                path: path.to_path_buf(),
            });
        }

        let contents = fs::read_to_string(path)?;
        let format = IndexFormat::detect(path, &contents);
        debug!(path = %path.display(), format = ?format, "Reading index");

        let document = Self::parse(&contents, format)?;
        let stats = document.index.stats();
        info!(
            path = %path.display(),
            classes = stats.classes,
            methods = stats.methods,
            fields = stats.fields,
            "Index loaded"
        );
        Ok(document)
    }

    /// Parse index contents in the given format.
    pub fn parse(contents: &str, format: IndexFormat) -> Result<IndexDocument> {
        match format {
            IndexFormat::Json => Self::parse_json(contents),
            IndexFormat::Script => Self::parse_script(contents),
        }
    }

    pub fn parse_json(contents: &str) -> Result<IndexDocument> {
        let raw: RawIndex = serde_json::from_str(contents).map_err(|e| {
            let offset = line_col_offset(contents, e.line(), e.column());
            OdocError::parse(e.to_string(), offset)
        })?;
        Ok(raw.into_document())
    }

    pub fn parse_script(contents: &str) -> Result<IndexDocument> {
        let bindings = script::split_bindings(contents)?;
        let binding = |name: &str| bindings.iter().find(|b| b.name == name);

        let index = binding(INDEX_BINDING).ok_or_else(|| {
            OdocError::parse(format!("no '{}' binding found", INDEX_BINDING), 0)
        })?;
        let raw: RawIndex = parse_initializer(index)?;

        let quotes = match binding(QUOTES_BINDING) {
            Some(quotes) => parse_initializer(quotes)?,
            None => Vec::new(),
        };

        Ok(IndexDocument {
            index: IndexModel::new(raw.classes, raw.methods.0, raw.fields.0),
            quotes,
        })
    }
}

/// Decode one binding's JSON5 initializer.
fn parse_initializer<T: DeserializeOwned>(binding: &Binding<'_>) -> Result<T> {
    let text = script::normalize_escapes(binding.initializer);
    serde_json5::from_str(&text).map_err(|e| {
        OdocError::parse(format!("'{}': {}", binding.name, e), binding.offset)
    })
}

/// Byte offset of a 1-based line/column pair as reported by serde_json.
fn line_col_offset(contents: &str, line: usize, column: usize) -> usize {
    let line_start: usize = contents
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum();
    (line_start + column.saturating_sub(1)).min(contents.len())
}

// === JSON form ===

#[derive(Deserialize)]
struct RawIndex {
    #[serde(default)]
    classes: Vec<String>,
    #[serde(default)]
    methods: RawMembers,
    #[serde(default)]
    fields: RawMembers,
    #[serde(default)]
    quotes: Vec<String>,
}

impl RawIndex {
    fn into_document(self) -> IndexDocument {
        IndexDocument {
            index: IndexModel::new(self.classes, self.methods.0, self.fields.0),
            quotes: self.quotes,
        }
    }
}

#[derive(Deserialize)]
struct RawMeta {
    c: String,
    o: bool,
}

/// Member map read entry by entry, so order and repeated names survive.
#[derive(Default)]
struct RawMembers(Vec<MemberEntry>);

impl<'de> Deserialize<'de> for RawMembers {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct MembersVisitor;

        impl<'de> Visitor<'de> for MembersVisitor {
            type Value = RawMembers;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of member name to {c, o}")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut map: A,
            ) -> std::result::Result<RawMembers, A::Error> {
                let mut members = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((name, meta)) = map.next_entry::<String, RawMeta>()? {
                    members.push(MemberEntry::new(name, meta.c, meta.o));
                }
                Ok(RawMembers(members))
            }
        }

        deserializer.deserialize_map(MembersVisitor)
    }
}
