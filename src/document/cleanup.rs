//! Post-processing and cleanup utilities
//!
//! Helpers applied to document elements after initial parsing.

use super::models::*;

pub(crate) fn is_likely_sentence(text: &str) -> bool {
    let text = text.trim();

    if text.matches(". ").count() > 1 {
        return true;
    }

    if text.len() > 80 && text.ends_with(['.', '!', '?']) {
        return true;
    }

    text.contains(" and ")
        || text.contains(" but ")
        || text.contains(" however ")
        || text.contains(" therefore ")
}

pub(crate) fn estimate_page_count(word_count: usize) -> usize {
    // Rough estimate: 250 words per page
    word_count.div_ceil(250)
}

/// Merge consecutive list elements of the same kind into one list
pub(crate) fn merge_adjacent_lists(elements: Vec<DocumentElement>) -> Vec<DocumentElement> {
    let mut merged: Vec<DocumentElement> = Vec::with_capacity(elements.len());

    for element in elements {
        if let DocumentElement::List { items, ordered } = element {
            if let Some(DocumentElement::List {
                items: previous,
                ordered: previous_ordered,
            }) = merged.last_mut()
            {
                if *previous_ordered == ordered {
                    previous.extend(items);
                    continue;
                }
            }
            merged.push(DocumentElement::List { items, ordered });
        } else {
            merged.push(element);
        }
    }

    merged
}
