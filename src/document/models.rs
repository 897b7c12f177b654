//! Core data structures for document representation
//!
//! This module defines the public types used to represent a parsed resume
//! document: elements, run formatting, tables, and metadata.

pub type TableRows = Vec<Vec<TableCell>>;

/// Options controlling how much structure the loader infers from plain text
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Promote short bold / all-caps lines to headings and group typed
    /// bullets ("• ", "- ", "1. ") into lists
    pub infer_structure: bool,
}

#[derive(Debug, Clone)]
pub struct Document {
    pub title: String,
    pub metadata: DocumentMetadata,
    pub elements: Vec<DocumentElement>,
}

#[derive(Debug, Clone)]
pub struct DocumentMetadata {
    pub file_path: String,
    pub file_size: u64,
    pub word_count: usize,
    pub page_count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DocumentElement {
    Heading { level: u8, runs: Vec<FormattedRun> },
    Paragraph { runs: Vec<FormattedRun> },
    List { items: Vec<ListItem>, ordered: bool },
    Table { table: TableData },
}

impl DocumentElement {
    /// Concatenated plain text of the element
    pub fn plain_text(&self) -> String {
        match self {
            DocumentElement::Heading { runs, .. } | DocumentElement::Paragraph { runs } => {
                runs_text(runs)
            }
            DocumentElement::List { items, .. } => items
                .iter()
                .map(|item| runs_text(&item.runs))
                .collect::<Vec<_>>()
                .join("\n"),
            DocumentElement::Table { table } => table
                .headers
                .iter()
                .chain(table.rows.iter().flatten())
                .map(|cell| cell.content.as_str())
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}

pub(crate) fn runs_text(runs: &[FormattedRun]) -> String {
    runs.iter().map(|run| run.text.as_str()).collect()
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextFormatting {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikethrough: bool,
    /// Hyperlink target, when the run sits inside a `w:hyperlink`
    pub link: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormattedRun {
    pub text: String,
    pub formatting: TextFormatting,
}

impl FormattedRun {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            formatting: TextFormatting::default(),
        }
    }

    /// Consolidate adjacent runs with identical formatting into single runs
    pub fn consolidate_runs(runs: Vec<FormattedRun>) -> Vec<FormattedRun> {
        let mut consolidated: Vec<FormattedRun> = Vec::with_capacity(runs.len());

        for run in runs {
            match consolidated.last_mut() {
                Some(last) if last.formatting == run.formatting => last.text.push_str(&run.text),
                _ => consolidated.push(run),
            }
        }

        consolidated
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListItem {
    pub runs: Vec<FormattedRun>,
    pub level: u8,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableData {
    pub headers: Vec<TableCell>,
    pub rows: TableRows,
    pub metadata: TableMetadata,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableCell {
    pub content: String,
    pub alignment: TextAlignment,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableMetadata {
    pub column_count: usize,
    pub column_alignments: Vec<TextAlignment>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TextAlignment {
    #[default]
    Left,
    Center,
    Right,
}
