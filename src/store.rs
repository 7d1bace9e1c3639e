use crate::errors::{AppError, AppResult};
use crate::events::{EventBus, EventEnvelope};
use crate::filter::filter_journals;
use crate::models::{FilterCriteria, Journal, Tag};
use chrono::{DateTime, Utc};
use serde_json::json;
use std::collections::BTreeSet;
use uuid::Uuid;

/// Single in-memory source of truth for journals, tags, and the active filter
/// criteria. Reads hand out snapshots (clones), never references into the
/// collections, and every successful mutation is announced on the event bus
/// before the call returns. Failed operations leave the store untouched and
/// emit nothing.
#[derive(Default)]
pub struct JournalStore {
    journals: Vec<Journal>,
    tags: Vec<Tag>,
    criteria: FilterCriteria,
    events: EventBus,
}

impl JournalStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_journal(&mut self, title: &str, content: &str, tag_ids: Vec<Uuid>) -> AppResult<Journal> {
        validate_journal_fields(title, content)?;

        let journal = Journal::new(title, content, tag_ids);
        self.journals.push(journal.clone());
        tracing::debug!(journal_id = %journal.id, "journal added");
        self.events
            .emit("journal.added", json!({ "journalId": journal.id }));
        Ok(journal)
    }

    /// Replaces the journal matched by `updated.id`. The stored `created_at`
    /// survives whatever the caller passed in, and `updated_at` is stamped
    /// here rather than trusted from the caller.
    pub fn update_journal(&mut self, updated: Journal) -> AppResult<Journal> {
        validate_journal_fields(&updated.title, &updated.content)?;

        let Some(existing) = self.journals.iter_mut().find(|journal| journal.id == updated.id)
        else {
            tracing::warn!(journal_id = %updated.id, "update targeted a missing journal");
            return Err(AppError::NotFound(format!(
                "No journal with id {}",
                updated.id
            )));
        };

        let mut replacement = updated;
        replacement.created_at = existing.created_at;
        replacement.updated_at = Utc::now();
        *existing = replacement.clone();

        tracing::debug!(journal_id = %replacement.id, "journal updated");
        self.events
            .emit("journal.updated", json!({ "journalId": replacement.id }));
        Ok(replacement)
    }

    /// Removes every journal with the given id. Missing ids are a documented
    /// no-op; the return value reports whether anything was removed.
    pub fn delete_journal(&mut self, id: Uuid) -> bool {
        let before = self.journals.len();
        self.journals.retain(|journal| journal.id != id);
        let removed = self.journals.len() != before;
        if removed {
            tracing::debug!(journal_id = %id, "journal deleted");
            self.events.emit("journal.deleted", json!({ "journalId": id }));
        }
        removed
    }

    pub fn add_tag(&mut self, name: &str) -> AppResult<Tag> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            tracing::warn!("rejected tag with empty name");
            return Err(AppError::Validation("Tag name cannot be empty".to_string()));
        }
        if self.tag_name_taken(trimmed, None) {
            tracing::warn!(name = %trimmed, "rejected duplicate tag name");
            return Err(AppError::DuplicateName(format!(
                "A tag named '{}' already exists",
                trimmed
            )));
        }

        let tag = Tag::new(trimmed);
        self.tags.push(tag.clone());
        tracing::debug!(tag_id = %tag.id, name = %tag.name, "tag added");
        self.events.emit("tag.added", json!({ "tagId": tag.id }));
        Ok(tag)
    }

    pub fn update_tag(&mut self, updated: Tag) -> AppResult<Tag> {
        let trimmed = updated.name.trim();
        if trimmed.is_empty() {
            tracing::warn!(tag_id = %updated.id, "rejected tag rename to empty name");
            return Err(AppError::Validation("Tag name cannot be empty".to_string()));
        }
        if self.tag_name_taken(trimmed, Some(updated.id)) {
            tracing::warn!(tag_id = %updated.id, name = %trimmed, "rejected duplicate tag name");
            return Err(AppError::DuplicateName(format!(
                "A tag named '{}' already exists",
                trimmed
            )));
        }

        let trimmed = trimmed.to_string();
        let Some(existing) = self.tags.iter_mut().find(|tag| tag.id == updated.id) else {
            tracing::warn!(tag_id = %updated.id, "update targeted a missing tag");
            return Err(AppError::NotFound(format!("No tag with id {}", updated.id)));
        };

        existing.name = trimmed;
        let tag = existing.clone();
        tracing::debug!(tag_id = %tag.id, name = %tag.name, "tag updated");
        self.events.emit("tag.updated", json!({ "tagId": tag.id }));
        Ok(tag)
    }

    /// Removes the tag but leaves every journal's `tag_ids` alone: dangling
    /// references are tolerated until the journals themselves are edited.
    pub fn delete_tag(&mut self, id: Uuid) -> bool {
        let before = self.tags.len();
        self.tags.retain(|tag| tag.id != id);
        let removed = self.tags.len() != before;
        if removed {
            tracing::debug!(tag_id = %id, "tag deleted");
            self.events.emit("tag.deleted", json!({ "tagId": id }));
        }
        removed
    }

    pub fn set_search_text(&mut self, text: &str) {
        self.criteria.search_text = text.to_string();
        self.events.emit("filter.changed", json!({}));
    }

    pub fn set_selected_filter_tags(&mut self, tag_ids: BTreeSet<Uuid>) {
        self.criteria.selected_tag_ids = tag_ids;
        self.events.emit("filter.changed", json!({}));
    }

    pub fn set_date_range(&mut self, start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) {
        self.criteria.start_date = start;
        self.criteria.end_date = end;
        self.events.emit("filter.changed", json!({}));
    }

    /// Resets all four criteria together; observers see one event covering
    /// the whole reset, never a partial state.
    pub fn clear_filter(&mut self) {
        self.criteria = FilterCriteria::default();
        self.events.emit("filter.changed", json!({}));
    }

    pub fn journals(&self) -> Vec<Journal> {
        self.journals.clone()
    }

    pub fn tags(&self) -> Vec<Tag> {
        self.tags.clone()
    }

    pub fn criteria(&self) -> FilterCriteria {
        self.criteria.clone()
    }

    /// Recomputed on every call so it always reflects the latest journals and
    /// the latest criteria.
    pub fn filtered_journals(&self) -> Vec<Journal> {
        filter_journals(&self.journals, &self.criteria)
    }

    pub fn journal(&self, id: Uuid) -> Option<Journal> {
        self.journals.iter().find(|journal| journal.id == id).cloned()
    }

    pub fn tag(&self, id: Uuid) -> Option<Tag> {
        self.tags.iter().find(|tag| tag.id == id).cloned()
    }

    /// Resolves a journal's tag references in `tag_ids` order, skipping ids
    /// that no longer resolve to a live tag.
    pub fn tags_for(&self, journal: &Journal) -> Vec<Tag> {
        journal.tag_ids.iter().filter_map(|id| self.tag(*id)).collect()
    }

    pub fn subscribe(&mut self, callback: impl Fn(&EventEnvelope) + 'static) -> u64 {
        self.events.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, subscription: u64) -> bool {
        self.events.unsubscribe(subscription)
    }

    fn tag_name_taken(&self, candidate: &str, exclude: Option<Uuid>) -> bool {
        let folded = candidate.to_lowercase();
        self.tags.iter().any(|tag| {
            exclude.map_or(true, |id| tag.id != id) && tag.name.to_lowercase() == folded
        })
    }
}

fn validate_journal_fields(title: &str, content: &str) -> AppResult<()> {
    if title.trim().is_empty() {
        return Err(AppError::Validation(
            "Journal title cannot be empty".to_string(),
        ));
    }
    if content.trim().is_empty() {
        return Err(AppError::Validation(
            "Journal content cannot be empty".to_string(),
        ));
    }
    Ok(())
}
