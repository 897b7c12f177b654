//! Heading detection and classification
//!
//! Headings come from Word paragraph styles. When structure inference is
//! enabled, short bold or all-caps lines are promoted as well.

use super::super::cleanup::is_likely_sentence;
use super::super::models::*;
use super::list::is_likely_list_item;

/// Detect heading level from Word paragraph style
pub(crate) fn detect_heading_from_paragraph_style(para: &docx_rs::Paragraph) -> Option<u8> {
    let style = para.property.style.as_ref()?;
    heading_level_for_style(&style.val)
}

/// Map a style id ("Heading2", "heading 3", "Title") to a heading level
pub(crate) fn heading_level_for_style(style: &str) -> Option<u8> {
    let lower = style.to_ascii_lowercase();

    if lower == "title" {
        return Some(1);
    }

    let rest = lower.strip_prefix("heading")?.trim_start();
    match rest.parse::<u8>() {
        Ok(level) if level >= 1 => Some(level.min(6)),
        // Unnumbered heading styles default to level 1
        _ if rest.is_empty() => Some(1),
        _ => None,
    }
}

/// Detect headings based on text content and formatting heuristics
pub(crate) fn detect_heading_from_text(text: &str, formatting: &TextFormatting) -> Option<u8> {
    let text = text.trim();

    if text.len() >= 100 || text.contains('\n') {
        return None;
    }

    if is_likely_list_item(text) || is_likely_sentence(text) {
        return None;
    }

    if text.contains(" the ") || text.contains(" with ") || text.contains(" for ") {
        return None;
    }

    // Short bold lines without trailing punctuation
    if formatting.bold
        && text.len() > 3
        && text.len() < 60
        && !text.ends_with(['.', ',', ';', ':'])
    {
        return Some(determine_heading_level_from_text(text));
    }

    // All caps section titles such as "EXPERIENCE" or "CORE SKILLS"
    let letters = text.chars().filter(|c| c.is_alphabetic()).count();
    if letters >= 4
        && text.len() < 50
        && text.chars().all(|c| {
            c.is_uppercase() || c.is_whitespace() || c.is_numeric() || c.is_ascii_punctuation()
        })
    {
        return Some(2);
    }

    None
}

/// Determine heading level from text length heuristic
pub(crate) fn determine_heading_level_from_text(text: &str) -> u8 {
    if text.len() < 20 {
        1
    } else if text.len() < 40 {
        2
    } else {
        3
    }
}
