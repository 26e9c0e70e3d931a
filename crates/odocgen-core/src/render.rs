//! Row construction: labels, links and element attributes for each entry.

use crate::config::LinksConfig;
use crate::surface::{Link, RowSpec};
use crate::types::{EntryKind, IndexEntry};

/// Style class carried by every index row.
pub const ROW_CLASS: &str = "g";

/// Suffix appended to members attributed through inheritance.
pub const INHERITED_SUFFIX: &str = " (inherited)";

/// Builds hrefs into the per-class documentation pages.
///
/// With the default configuration:
/// - class: `class/Dog.html`
/// - method: `class/Dog.html#m-bark`
/// - field: `class/Dog.html#f-name`
#[derive(Debug, Clone)]
pub struct LinkBuilder {
    class_dir: String,
    extension: String,
    target: String,
}

impl Default for LinkBuilder {
    fn default() -> Self {
        LinkBuilder::new(&LinksConfig::default())
    }
}

impl LinkBuilder {
    pub fn new(config: &LinksConfig) -> Self {
        LinkBuilder {
            class_dir: config.class_dir.trim_end_matches('/').to_string(),
            extension: config.extension.trim_start_matches('.').to_string(),
            target: config.target.clone(),
        }
    }

    /// Page of a class.
    pub fn class_page(&self, class: &str) -> String {
        if self.class_dir.is_empty() {
            format!("{}.{}", class, self.extension)
        } else {
            format!("{}/{}.{}", self.class_dir, class, self.extension)
        }
    }

    /// In-page anchor of a member on its owner's page.
    pub fn member_anchor(&self, kind: EntryKind, owner: &str, name: &str) -> String {
        format!("{}#{}-{}", self.class_page(owner), kind.prefix(), name)
    }

    /// Link for any entry.
    pub fn link(&self, entry: &IndexEntry<'_>) -> Link {
        let href = match entry {
            IndexEntry::Class(name) => self.class_page(name),
            IndexEntry::Method(m) | IndexEntry::Field(m) => {
                self.member_anchor(entry.kind(), &m.owner, &m.name)
            }
        };
        Link {
            href,
            target: self.target.clone(),
            text: entry.name().to_string(),
        }
    }

    /// Describe the row for `entry` with the given initial visibility.
    pub fn row(&self, entry: &IndexEntry<'_>, visible: bool) -> RowSpec {
        let kind = entry.kind();
        let (tag, suffix) = match entry {
            IndexEntry::Class(_) => ("p", String::new()),
            IndexEntry::Method(m) | IndexEntry::Field(m) => {
                let mut suffix = format!(" of {}", m.owner);
                if !m.declared_here {
                    suffix.push_str(INHERITED_SUFFIX);
                }
                ("li", suffix)
            }
        };

        RowSpec {
            kind,
            tag,
            id: entry.key().to_string(),
            class: ROW_CLASS,
            prefix: format!("{} ", kind.label()),
            link: self.link(entry),
            suffix,
            line_break: kind == EntryKind::Field,
            visible,
        }
    }
}
