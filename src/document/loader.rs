//! Document loading and orchestration
//!
//! `load_document()` reads a .docx from disk and coordinates the parsing
//! modules to turn it into our internal `Document` representation.

use anyhow::Result;
use log::{debug, info};
use std::path::Path;

use super::cleanup::{estimate_page_count, merge_adjacent_lists};
use super::io::{read_document_bytes, validate_docx_bytes};
use super::models::*;
use super::parsing::formatting::{extract_paragraph_runs, HyperlinkTargets};
use super::parsing::heading::{detect_heading_from_paragraph_style, detect_heading_from_text};
use super::parsing::list::{detect_list_from_paragraph_numbering, group_list_items};
use super::parsing::numbering::NumberingDefinitions;
use super::parsing::table::extract_table_data;
use crate::error::ResumeKitError;

/// Load and parse a .docx document
///
/// A missing file fails with `ResumeKitError::DocumentNotFound`, anything
/// that is not a Word package with `ResumeKitError::InvalidDocument`.
pub async fn load_document(file_path: &Path, options: LoadOptions) -> Result<Document> {
    let bytes = read_document_bytes(file_path).await?;
    info!("Loaded {} ({} bytes)", file_path.display(), bytes.len());
    parse_document(file_path, &bytes, &options)
}

/// Parse document bytes already in memory; `file_path` names the source
pub fn parse_document(file_path: &Path, bytes: &[u8], options: &LoadOptions) -> Result<Document> {
    validate_docx_bytes(file_path, bytes)?;

    let docx = docx_rs::read_docx(bytes).map_err(|err| ResumeKitError::InvalidDocument {
        path: file_path.to_path_buf(),
        reason: err.to_string(),
    })?;

    let title = file_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Untitled Document")
        .to_string();

    let links = HyperlinkTargets::from_docx(&docx);
    let numbering = NumberingDefinitions::from_numberings(&docx.numberings);

    let mut elements = Vec::new();
    let mut word_count = 0;

    for child in &docx.document.children {
        match child {
            docx_rs::DocumentChild::Paragraph(para) => {
                let runs = extract_paragraph_runs(para, &links);
                let total_text = runs_text(&runs);

                if total_text.trim().is_empty() {
                    continue;
                }
                word_count += total_text.split_whitespace().count();

                // Priority: list numbering > heading style > text heuristics
                if let Some(list_info) = detect_list_from_paragraph_numbering(para, &numbering) {
                    elements.push(DocumentElement::List {
                        items: vec![ListItem {
                            runs: FormattedRun::consolidate_runs(runs),
                            level: list_info.level,
                        }],
                        ordered: list_info.ordered,
                    });
                } else if let Some(level) = detect_heading_from_paragraph_style(para).or_else(|| {
                    options
                        .infer_structure
                        .then(|| detect_heading_from_text(&total_text, &runs[0].formatting))
                        .flatten()
                }) {
                    elements.push(DocumentElement::Heading {
                        level,
                        runs: FormattedRun::consolidate_runs(runs),
                    });
                } else {
                    elements.push(DocumentElement::Paragraph {
                        runs: FormattedRun::consolidate_runs(runs),
                    });
                }
            }
            docx_rs::DocumentChild::Table(table) => {
                if let Some(table_element) = extract_table_data(table, &links) {
                    word_count += table_element.plain_text().split_whitespace().count();
                    elements.push(table_element);
                }
            }
            _ => {
                // Section properties, bookmarks and structured tags carry no preview text
            }
        }
    }

    if options.infer_structure {
        elements = group_list_items(elements);
    }
    let elements = merge_adjacent_lists(elements);

    debug!(
        "Parsed {} elements, {} words from {}",
        elements.len(),
        word_count,
        file_path.display()
    );

    let metadata = DocumentMetadata {
        file_path: file_path.to_string_lossy().to_string(),
        file_size: bytes.len() as u64,
        word_count,
        page_count: estimate_page_count(word_count),
    };

    Ok(Document {
        title,
        metadata,
        elements,
    })
}
