use crate::models::{FilterCriteria, Journal};
use chrono::NaiveDate;
use std::collections::BTreeSet;
use uuid::Uuid;

/// Derives the visible journal list from the full collection and the current
/// criteria. Each pass narrows the previous pass's output, so active filters
/// always intersect. Insertion order is preserved; the input is never mutated.
pub fn filter_journals(journals: &[Journal], criteria: &FilterCriteria) -> Vec<Journal> {
    let needle = if criteria.search_text.is_empty() {
        None
    } else {
        Some(criteria.search_text.to_lowercase())
    };
    let window = day_window(criteria);

    journals
        .iter()
        .filter(|journal| {
            needle
                .as_deref()
                .map_or(true, |needle| matches_search(journal, needle))
        })
        .filter(|journal| {
            criteria.selected_tag_ids.is_empty()
                || carries_selected_tag(journal, &criteria.selected_tag_ids)
        })
        .filter(|journal| {
            window.map_or(true, |(start, end)| {
                let day = journal.created_at.date_naive();
                start <= day && day <= end
            })
        })
        .cloned()
        .collect()
}

fn matches_search(journal: &Journal, needle: &str) -> bool {
    journal.title.to_lowercase().contains(needle) || journal.content.to_lowercase().contains(needle)
}

fn carries_selected_tag(journal: &Journal, selected: &BTreeSet<Uuid>) -> bool {
    journal.tag_ids.iter().any(|id| selected.contains(id))
}

// Bounds compare by UTC calendar day; time-of-day never affects membership.
fn day_window(criteria: &FilterCriteria) -> Option<(NaiveDate, NaiveDate)> {
    match (criteria.start_date, criteria.end_date) {
        (Some(start), Some(end)) => Some((start.date_naive(), end.date_naive())),
        _ => None,
    }
}
