//! Query matching for the live filter.
//!
//! Matching is deliberately narrow: a single case-sensitive substring test
//! against an entry's own name. An empty query matches everything. Owner
//! class, inheritance and rendered label text never take part.

use crate::types::IndexEntry;

/// A search query as typed into the search box.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pattern: String,
}

impl SearchQuery {
    /// Create a substring search query (case-sensitive).
    ///
    /// # Example
    /// ```
    /// use odocgen_core::SearchQuery;
    /// let query = SearchQuery::substring("ar");
    /// assert!(query.matches_name("bark"));
    /// assert!(!query.matches_name("BARK"));
    /// ```
    pub fn substring(pattern: impl Into<String>) -> Self {
        SearchQuery {
            pattern: pattern.into(),
        }
    }

    /// The raw query text.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Check a bare name against the query.
    pub fn matches_name(&self, name: &str) -> bool {
        contains(name, &self.pattern)
    }

    /// Check if an index entry is visible under this query.
    pub fn matches(&self, entry: &IndexEntry<'_>) -> bool {
        self.matches_name(entry.name())
    }
}

/// Case-sensitive substring test. The empty needle matches any haystack.
pub fn contains(haystack: &str, needle: &str) -> bool {
    haystack.contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MemberEntry;

    #[test]
    fn test_substring_search() {
        let query = SearchQuery::substring("ar");

        assert!(query.matches_name("bark"));
        assert!(query.matches_name("arity"));
        assert!(!query.matches_name("eat"));
        assert!(!query.matches_name("Animal"));
    }

    #[test]
    fn test_case_sensitive() {
        let query = SearchQuery::substring("Dog");
        assert!(query.matches_name("Dog"));
        assert!(query.matches_name("HotDog"));
        assert!(!query.matches_name("dog"));
    }

    #[test]
    fn test_empty_substring() {
        let query = SearchQuery::substring("");
        assert!(query.pattern().is_empty());
        assert!(query.matches_name("anything"));
        assert!(query.matches_name(""));
    }

    #[test]
    fn test_full_name_matches_itself() {
        for name in ["read_group", "_compute_display_name", "x"] {
            assert!(SearchQuery::substring(name).matches_name(name));
        }
    }

    #[test]
    fn test_matches_ignores_owner() {
        let member = MemberEntry::declared("write", "res.partner");
        let query = SearchQuery::substring("partner");
        assert!(!query.matches(&IndexEntry::Method(&member)));
        assert!(query.matches(&IndexEntry::Class("res.partner")));
    }
}
