//! Saved bookmark filters.

use serde::{Deserialize, Serialize};

use crate::types::Tag;

/// A user-defined combination of a search term and tags.
///
/// Equality is structural: the same term and the same tags in the same
/// order. Filters with the same tags in a different order are distinct.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedFilter {
    /// Free-text search term, may be empty.
    pub search_term: String,

    /// Tags to match, in the order the user picked them.
    #[serde(default)]
    pub tags: Vec<Tag>,
}

impl SavedFilter {
    /// Creates a new saved filter.
    pub fn new(search_term: impl Into<String>, tags: Vec<Tag>) -> Self {
        Self {
            search_term: search_term.into(),
            tags,
        }
    }

    /// Returns true if the filter has neither a term nor tags.
    pub fn is_empty(&self) -> bool {
        self.search_term.is_empty() && self.tags.is_empty()
    }
}

/// Flat storage form of a [`SavedFilter`].
///
/// Tags are joined with `,`. The pair (term, tags) identifies a record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SavedFilterRecord {
    pub term: String,
    pub tags: String,
}

impl From<&SavedFilter> for SavedFilterRecord {
    fn from(filter: &SavedFilter) -> Self {
        Self {
            term: filter.search_term.clone(),
            tags: filter
                .tags
                .iter()
                .map(Tag::name)
                .collect::<Vec<_>>()
                .join(","),
        }
    }
}

impl From<&SavedFilterRecord> for SavedFilter {
    fn from(record: &SavedFilterRecord) -> Self {
        Self {
            search_term: record.term.clone(),
            tags: record
                .tags
                .split(',')
                .map(Tag::new)
                .filter(|tag| !tag.is_blank())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(names: &[&str]) -> Vec<Tag> {
        names.iter().copied().map(Tag::from).collect()
    }

    #[test]
    fn test_structural_equality() {
        let a = SavedFilter::new("rust", tags(&["lang", "systems"]));
        let b = SavedFilter::new("rust", tags(&["lang", "systems"]));
        assert_eq!(a, b);
    }

    #[test]
    fn test_tag_order_matters() {
        let a = SavedFilter::new("rust", tags(&["lang", "systems"]));
        let b = SavedFilter::new("rust", tags(&["systems", "lang"]));
        assert_ne!(a, b);
    }

    #[test]
    fn test_record_mapping() {
        let filter = SavedFilter::new("term", tags(&["tag1", "tag2"]));
        let record = SavedFilterRecord::from(&filter);

        assert_eq!(record.term, "term");
        assert_eq!(record.tags, "tag1,tag2");
        assert_eq!(SavedFilter::from(&record), filter);
    }

    #[test]
    fn test_record_without_tags() {
        let record = SavedFilterRecord {
            term: "only term".to_string(),
            tags: String::new(),
        };

        let filter = SavedFilter::from(&record);
        assert!(filter.tags.is_empty());
        assert_eq!(filter.search_term, "only term");
    }

    #[test]
    fn test_record_drops_blank_tags() {
        let record = SavedFilterRecord {
            term: String::new(),
            tags: "a,, ,b".to_string(),
        };

        assert_eq!(SavedFilter::from(&record).tags, tags(&["a", "b"]));
    }

    #[test]
    fn test_serialization() {
        let filter = SavedFilter::new("term", tags(&["x"]));
        let json = serde_json::to_string(&filter).unwrap();
        assert!(json.contains("\"searchTerm\":\"term\""));
    }
}
