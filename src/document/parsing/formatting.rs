//! Text extraction and formatting utilities
//!
//! This module handles extraction of text and formatting information
//! from docx-rs paragraph and run elements.

use std::collections::HashMap;

use super::super::models::*;

/// Hyperlink relationship ids (`r:id`) mapped to their targets
///
/// A document read from disk only carries the relationship id on each
/// `w:hyperlink`; the URL lives in `word/_rels/document.xml.rels`.
#[derive(Debug, Default)]
pub(crate) struct HyperlinkTargets(HashMap<String, String>);

impl HyperlinkTargets {
    pub(crate) fn from_docx(docx: &docx_rs::Docx) -> Self {
        Self(
            docx.hyperlinks
                .iter()
                .map(|(rid, target, _mode)| (rid.clone(), target.clone()))
                .collect(),
        )
    }

    /// Target of an external hyperlink; internal anchors have none
    fn resolve<'a>(&'a self, link: &'a docx_rs::HyperlinkData) -> Option<&'a str> {
        let docx_rs::HyperlinkData::External { rid, path } = link else {
            return None;
        };
        if !path.is_empty() {
            return Some(path.as_str());
        }
        self.0
            .get(rid)
            .map(String::as_str)
            .filter(|target| !target.is_empty())
    }
}

/// Extract formatted runs from a paragraph, including runs nested in
/// hyperlinks and tracked insertions
pub(crate) fn extract_paragraph_runs(
    para: &docx_rs::Paragraph,
    links: &HyperlinkTargets,
) -> Vec<FormattedRun> {
    let mut runs = Vec::new();
    collect_runs(&para.children, links, None, &mut runs);
    runs
}

fn collect_runs(
    children: &[docx_rs::ParagraphChild],
    links: &HyperlinkTargets,
    link: Option<&str>,
    runs: &mut Vec<FormattedRun>,
) {
    for child in children {
        match child {
            docx_rs::ParagraphChild::Run(run) => push_run(run, link, runs),
            docx_rs::ParagraphChild::Insert(insert) => {
                for child in &insert.children {
                    if let docx_rs::InsertChild::Run(run) = child {
                        push_run(run, link, runs);
                    }
                }
            }
            docx_rs::ParagraphChild::Hyperlink(hyperlink) => {
                let target = links.resolve(&hyperlink.link);
                collect_runs(&hyperlink.children, links, target.or(link), runs);
            }
            // Deletions (tracked changes) and bookmarks carry no visible text
            _ => {}
        }
    }
}

fn push_run(run: &docx_rs::Run, link: Option<&str>, runs: &mut Vec<FormattedRun>) {
    let text = extract_run_text(run);
    if text.is_empty() {
        return;
    }

    let mut formatting = extract_run_formatting(run);
    formatting.link = link.map(str::to_string);
    runs.push(FormattedRun { text, formatting });
}

/// Extract text from a run using docx-rs features
pub(crate) fn extract_run_text(run: &docx_rs::Run) -> String {
    let mut text = String::new();

    for child in &run.children {
        match child {
            docx_rs::RunChild::Text(text_elem) => {
                text.push_str(&text_elem.text);
            }
            docx_rs::RunChild::Tab(_) => {
                text.push('\t');
            }
            docx_rs::RunChild::Break(_) => {
                // Break types are private, so every break becomes a line break
                text.push('\n');
            }
            // Drawings and other binary payloads are never emitted as text
            _ => {}
        }
    }

    text
}

/// Extract formatting information from a run
pub(crate) fn extract_run_formatting(run: &docx_rs::Run) -> TextFormatting {
    let props = &run.run_property;

    TextFormatting {
        bold: props.bold.is_some(),
        italic: props.italic.is_some(),
        underline: props.underline.is_some(),
        strikethrough: props.strike.is_some() || props.dstrike.is_some(),
        link: None,
    }
}
