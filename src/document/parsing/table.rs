//! Table extraction and processing
//!
//! This module handles extraction of table data from Word documents. The
//! first non-empty row is always the header row, matching pipe-table output.

use super::super::models::*;
use super::formatting::{extract_paragraph_runs, HyperlinkTargets};

/// Extract table data from a docx-rs Table
pub(crate) fn extract_table_data(
    table: &docx_rs::Table,
    links: &HyperlinkTargets,
) -> Option<DocumentElement> {
    let mut rows: TableRows = Vec::new();

    for table_child in &table.rows {
        let docx_rs::TableChild::TableRow(row) = table_child;
        let mut row_cells = Vec::new();

        for row_child in &row.cells {
            let docx_rs::TableRowChild::TableCell(cell) = row_child;
            row_cells.push(extract_cell(cell, links));
        }

        if row_cells.iter().any(|cell| !cell.content.is_empty()) {
            rows.push(row_cells);
        }
    }

    if rows.is_empty() {
        return None;
    }

    let headers = rows.remove(0);
    Some(DocumentElement::Table {
        table: TableData::new(headers, rows),
    })
}

fn extract_cell(cell: &docx_rs::TableCell, links: &HyperlinkTargets) -> TableCell {
    let mut paragraphs = Vec::new();

    for content in &cell.children {
        if let docx_rs::TableCellContent::Paragraph(para) = content {
            let text = runs_text(&extract_paragraph_runs(para, links));
            let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
            if !text.is_empty() {
                paragraphs.push(text);
            }
        }
    }

    TableCell::new(paragraphs.join(" "))
}

impl TableData {
    pub fn new(headers: Vec<TableCell>, rows: TableRows) -> Self {
        let column_count = rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(headers.len()))
            .max()
            .unwrap_or(0);

        let metadata = TableMetadata {
            column_count,
            column_alignments: determine_column_alignments(column_count, &rows),
        };

        Self {
            headers,
            rows,
            metadata,
        }
    }

    pub fn column_alignment(&self, column_index: usize) -> TextAlignment {
        self.metadata
            .column_alignments
            .get(column_index)
            .copied()
            .unwrap_or_default()
    }
}

impl TableCell {
    pub fn new(content: impl Into<String>) -> Self {
        let content = content.into();
        let alignment = if is_numeric_content(&content) {
            TextAlignment::Right
        } else {
            TextAlignment::Left
        };

        Self { content, alignment }
    }
}

/// Right-align columns where more than 70% of the body cells are numeric
fn determine_column_alignments(column_count: usize, rows: &TableRows) -> Vec<TextAlignment> {
    (0..column_count)
        .map(|col| {
            let cells: Vec<&TableCell> = rows
                .iter()
                .filter_map(|row| row.get(col))
                .filter(|cell| !cell.content.is_empty())
                .collect();
            let numeric = cells
                .iter()
                .filter(|cell| cell.alignment == TextAlignment::Right)
                .count();

            if !cells.is_empty() && numeric as f32 / cells.len() as f32 > 0.7 {
                TextAlignment::Right
            } else {
                TextAlignment::Left
            }
        })
        .collect()
}

/// Numbers, currency amounts and percentages
fn is_numeric_content(content: &str) -> bool {
    let trimmed = content.trim();
    let trimmed = trimmed
        .strip_prefix(['$', '\u{20AC}', '\u{00A3}'])
        .unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix('%').unwrap_or(trimmed);

    !trimmed.is_empty() && trimmed.replace(',', "").parse::<f64>().is_ok()
}
