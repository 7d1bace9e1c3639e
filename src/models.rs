use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

/// A single diary entry. `tag_ids` is kept in the order the user attached the
/// tags; entries may reference tags that have since been deleted, and those
/// ids stay in place until the entry itself is edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Journal {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub tag_ids: Vec<Uuid>,
}

impl Journal {
    pub fn new(title: &str, content: &str, tag_ids: Vec<Uuid>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: title.to_string(),
            content: content.to_string(),
            created_at: now,
            updated_at: now,
            tag_ids,
        }
    }
}

/// A user-named label, unique by case-insensitive name among current tags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub id: Uuid,
    pub name: String,
}

impl Tag {
    pub fn new(name: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
        }
    }
}

/// The currently active view criteria. An empty `search_text` and an empty
/// `selected_tag_ids` deactivate their passes; the date pass is active only
/// when both bounds are set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    pub search_text: String,
    pub selected_tag_ids: BTreeSet<Uuid>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

impl FilterCriteria {
    pub fn is_active(&self) -> bool {
        !self.search_text.is_empty()
            || !self.selected_tag_ids.is_empty()
            || (self.start_date.is_some() && self.end_date.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::{FilterCriteria, Journal};
    use chrono::{Duration, Utc};

    #[test]
    fn new_journal_starts_with_matching_timestamps() {
        let journal = Journal::new("Morning pages", "Slept well.", Vec::new());
        assert_eq!(journal.created_at, journal.updated_at);
        assert!(Utc::now() - journal.created_at < Duration::seconds(5));
    }

    #[test]
    fn default_criteria_are_inactive() {
        let criteria = FilterCriteria::default();
        assert!(!criteria.is_active());
    }

    #[test]
    fn half_open_date_range_is_inactive() {
        let criteria = FilterCriteria {
            start_date: Some(Utc::now()),
            ..FilterCriteria::default()
        };
        assert!(!criteria.is_active());
    }
}
