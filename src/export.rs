//! Markdown export
//!
//! Renders a parsed `Document` as markdown: `#` headings, `__bold__`,
//! `*italic*`, `~~strikethrough~~`, tab-indented lists and pipe tables.
//! Images and other binary content never reach the output.

use anyhow::Result;
use std::fmt::Write;

use crate::document::*;

/// Characters that carry meaning in markdown and are backslash-escaped
const MARKDOWN_SPECIAL_CHARS: &[char] = &[
    '`', '*', '_', '{', '}', '[', ']', '(', ')', '#', '+', '-', '.', '!',
];

#[derive(Debug, Clone)]
pub struct MarkdownOptions {
    /// Backslash-escape markdown special characters in document text
    pub escape_special_chars: bool,
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        Self {
            escape_special_chars: true,
        }
    }
}

pub fn export_to_markdown(document: &Document) -> Result<String> {
    export_to_markdown_with_options(document, &MarkdownOptions::default())
}

pub fn export_to_markdown_with_options(
    document: &Document,
    options: &MarkdownOptions,
) -> Result<String> {
    let mut blocks = Vec::with_capacity(document.elements.len());

    for element in &document.elements {
        let mut block = String::new();
        match element {
            DocumentElement::Heading { level, runs } => {
                let level = (*level).clamp(1, 6) as usize;
                write!(block, "{} {}", "#".repeat(level), render_runs(runs, options).trim())?;
            }
            DocumentElement::Paragraph { runs } => {
                block.push_str(render_runs(runs, options).trim_end());
            }
            DocumentElement::List { items, ordered } => {
                write_list(&mut block, items, *ordered, options)?;
            }
            DocumentElement::Table { table } => {
                write_table(&mut block, table, options)?;
            }
        }

        if !block.trim().is_empty() {
            blocks.push(block);
        }
    }

    if blocks.is_empty() {
        return Ok(String::new());
    }

    let mut output = blocks.join("\n\n");
    output.push('\n');
    Ok(output)
}

fn write_list(
    output: &mut String,
    items: &[ListItem],
    ordered: bool,
    options: &MarkdownOptions,
) -> Result<()> {
    let marker = if ordered { "1." } else { "-" };

    for (index, item) in items.iter().enumerate() {
        if index > 0 {
            output.push('\n');
        }
        let indent = "\t".repeat(item.level as usize);
        write!(
            output,
            "{indent}{marker} {}",
            render_runs(&item.runs, options).trim()
        )?;
    }

    Ok(())
}

fn write_table(output: &mut String, table: &TableData, options: &MarkdownOptions) -> Result<()> {
    let columns = table.metadata.column_count;
    if columns == 0 {
        return Ok(());
    }

    write_table_row(output, &table.headers, columns, options)?;

    output.push_str("\n|");
    for col in 0..columns {
        let rule = match table.column_alignment(col) {
            TextAlignment::Right => " ---: |",
            TextAlignment::Center => " :---: |",
            TextAlignment::Left => " --- |",
        };
        output.push_str(rule);
    }

    for row in &table.rows {
        output.push('\n');
        write_table_row(output, row, columns, options)?;
    }

    Ok(())
}

fn write_table_row(
    output: &mut String,
    cells: &[TableCell],
    columns: usize,
    options: &MarkdownOptions,
) -> Result<()> {
    output.push('|');
    for col in 0..columns {
        let content = cells
            .get(col)
            .map(|cell| escape_text(&cell.content, options).replace('|', "\\|"))
            .unwrap_or_default();
        write!(output, " {content} |")?;
    }
    Ok(())
}

/// Render runs with inline markup, keeping surrounding whitespace outside
/// the emphasis markers so `__ bold __` never appears
fn render_runs(runs: &[FormattedRun], options: &MarkdownOptions) -> String {
    let mut output = String::new();

    for run in runs {
        let text = escape_text(&run.text, options);
        let core = text.trim();

        if core.is_empty() {
            output.push_str(&hard_breaks(&text));
            continue;
        }

        let start = text.len() - text.trim_start().len();
        let end = start + core.len();

        let mut wrapped = hard_breaks(core);
        if let Some(link) = &run.formatting.link {
            wrapped = format!("[{wrapped}]({link})");
        }
        if run.formatting.strikethrough {
            wrapped = format!("~~{wrapped}~~");
        }
        if run.formatting.italic {
            wrapped = format!("*{wrapped}*");
        }
        if run.formatting.bold {
            wrapped = format!("__{wrapped}__");
        }

        output.push_str(&hard_breaks(&text[..start]));
        output.push_str(&wrapped);
        output.push_str(&hard_breaks(&text[end..]));
    }

    output
}

fn hard_breaks(text: &str) -> String {
    text.replace('\n', "  \n")
}

fn escape_text(text: &str, options: &MarkdownOptions) -> String {
    if !options.escape_special_chars {
        return text.to_string();
    }
    escape_markdown(text)
}

/// Backslash-escape markdown special characters
pub fn escape_markdown(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if c == '\\' || MARKDOWN_SPECIAL_CHARS.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
