//! List processing and detection
//!
//! Word numbered paragraphs (`w:numPr`) become list items directly. Typed
//! bullets ("• ", "- ", "1. ") are only grouped when structure inference is on.

use super::super::models::*;
use super::numbering::NumberingDefinitions;

/// Word list information read from a paragraph's numbering properties
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ListInfo {
    pub(crate) level: u8,
    pub(crate) ordered: bool,
}

/// Detect list properties from paragraph numbering metadata
///
/// The list kind comes from the document's numbering definitions. Only a
/// `numId` the document never defines falls back to `guess_ordered`.
pub(crate) fn detect_list_from_paragraph_numbering(
    para: &docx_rs::Paragraph,
    numbering: &NumberingDefinitions,
) -> Option<ListInfo> {
    let num_pr = para.property.numbering_property.as_ref()?;
    let level = num_pr.level.as_ref().map_or(0, |l| l.val);
    let num_id = num_pr.id.as_ref().map(|id| id.id);

    // numId 0 means "numbering removed" in OOXML
    let ordered = match num_id {
        None | Some(0) => return None,
        Some(id) => numbering
            .is_ordered(id, level)
            .unwrap_or_else(|| guess_ordered(id)),
    };

    Some(ListInfo {
        level: level.min(u8::MAX as usize) as u8,
        ordered,
    })
}

/// Word assigns numId 1 to the first list created in a document, which in
/// resume templates is the bullet list
fn guess_ordered(num_id: usize) -> bool {
    num_id != 1
}

pub(crate) fn is_likely_list_item(text: &str) -> bool {
    let text = text.trim();

    if text.starts_with("• ") || text.starts_with("- ") || text.starts_with("* ") {
        return true;
    }

    numbered_prefix_len(text).is_some()
}

/// Length in bytes of a leading "12. " style prefix
fn numbered_prefix_len(text: &str) -> Option<usize> {
    let digits = text.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 || digits > 3 {
        return None;
    }
    let rest = &text[digits..];
    if rest.starts_with(". ") || rest.starts_with(") ") {
        Some(digits + 2)
    } else {
        None
    }
}

/// Group paragraphs that start with typed bullets into list elements
pub(crate) fn group_list_items(elements: Vec<DocumentElement>) -> Vec<DocumentElement> {
    let mut result = Vec::new();

    for element in elements {
        match element {
            DocumentElement::Paragraph { runs } => {
                let text = runs_text(&runs);
                if is_likely_list_item(&text) {
                    let ordered = numbered_prefix_len(text.trim()).is_some();
                    let level = calculate_list_level(&text);
                    result.push(DocumentElement::List {
                        items: vec![ListItem {
                            runs: clean_list_item_runs(runs),
                            level,
                        }],
                        ordered,
                    });
                } else {
                    result.push(DocumentElement::Paragraph { runs });
                }
            }
            other => result.push(other),
        }
    }

    result
}

fn calculate_list_level(text: &str) -> u8 {
    // Two spaces (or one tab) per level
    let indent: usize = text
        .chars()
        .take_while(|c| c.is_whitespace())
        .map(|c| if c == '\t' { 2 } else { 1 })
        .sum();
    (indent / 2).min(u8::MAX as usize) as u8
}

/// Remove the bullet or number prefix from the runs while preserving formatting
fn clean_list_item_runs(runs: Vec<FormattedRun>) -> Vec<FormattedRun> {
    let combined = runs_text(&runs);
    let leading = combined.len() - combined.trim_start().len();
    let trimmed = combined.trim_start();

    let prefix_len = if let Some(len) = numbered_prefix_len(trimmed) {
        len
    } else if let Some(first) = trimmed.chars().next() {
        first.len_utf8() + 1
    } else {
        return runs;
    };

    let mut to_remove = combined[..leading + prefix_len].chars().count();
    let mut result = Vec::new();

    for run in runs {
        if to_remove == 0 {
            result.push(run);
            continue;
        }

        let run_chars = run.text.chars().count();
        if run_chars <= to_remove {
            to_remove -= run_chars;
        } else {
            let keep: String = run.text.chars().skip(to_remove).collect();
            to_remove = 0;
            let keep = keep.trim_start();
            if !keep.is_empty() {
                result.push(FormattedRun {
                    text: keep.to_string(),
                    formatting: run.formatting,
                });
            }
        }
    }

    result
}
