use docx_rs::{
    AbstractNumbering, Docx, Hyperlink, HyperlinkType, IndentLevel, Level, LevelJc, LevelText,
    NumberFormat, Numbering, NumberingId, Paragraph, Run, Start, Table, TableCell, TableRow,
};
use resume_kit::document::{load_document, DocumentElement, LoadOptions};
use resume_kit::error::ResumeKitError;
use resume_kit::export::{export_to_markdown, export_to_markdown_with_options, MarkdownOptions};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn text_paragraph(text: &str) -> Paragraph {
    Paragraph::new().add_run(Run::new().add_text(text))
}

fn cell(text: &str) -> TableCell {
    TableCell::new().add_paragraph(text_paragraph(text))
}

/// Bullet list definition; the writer always reserves numId 1 for a decimal list
const BULLET_NUM_ID: usize = 2;

fn bullet_level(level: usize) -> Level {
    Level::new(
        level,
        Start::new(1),
        NumberFormat::new("bullet"),
        LevelText::new("\u{2022}"),
        LevelJc::new("left"),
    )
}

fn with_bullet_numbering(docx: Docx) -> Docx {
    docx.add_abstract_numbering(
        AbstractNumbering::new(BULLET_NUM_ID)
            .add_level(bullet_level(0))
            .add_level(bullet_level(1)),
    )
    .add_numbering(Numbering::new(BULLET_NUM_ID, BULLET_NUM_ID))
}

fn save(docx: Docx, dir: &Path) -> PathBuf {
    let path = dir.join("resume.docx");
    let file = std::fs::File::create(&path).unwrap();
    docx.build().pack(file).unwrap();
    path
}

fn write_resume_docx(dir: &Path) -> PathBuf {
    let docx = with_bullet_numbering(Docx::new())
        .add_paragraph(text_paragraph("Jane Doe").style("Heading1"))
        .add_paragraph(
            Paragraph::new()
                .add_run(Run::new().add_text("Senior").bold())
                .add_run(Run::new().add_text(" engineer.")),
        )
        .add_paragraph(text_paragraph("Skills").style("Heading2"))
        .add_paragraph(
            text_paragraph("Rust")
                .numbering(NumberingId::new(BULLET_NUM_ID), IndentLevel::new(0)),
        )
        .add_paragraph(
            text_paragraph("Go").numbering(NumberingId::new(BULLET_NUM_ID), IndentLevel::new(1)),
        )
        .add_table(Table::new(vec![
            TableRow::new(vec![cell("Skill"), cell("Years")]),
            TableRow::new(vec![cell("Rust"), cell("7")]),
        ]));

    save(docx, dir)
}

#[tokio::test]
async fn test_preview_of_generated_document() {
    let dir = TempDir::new().unwrap();
    let path = write_resume_docx(dir.path());

    let document = load_document(&path, LoadOptions::default()).await.unwrap();
    let markdown = export_to_markdown(&document).unwrap();

    assert!(!markdown.trim().is_empty());
    assert!(markdown.starts_with("# Jane Doe\n\n"));
    assert!(markdown.contains("__Senior__ engineer\\."));
    assert!(markdown.contains("## Skills"));
    assert!(markdown.contains("- Rust\n\t- Go"));
    assert!(markdown.contains("| Skill | Years |"));
    assert!(markdown.contains("| Rust | 7 |"));
    assert!(markdown.ends_with('\n'));
}

#[tokio::test]
async fn test_preview_contains_no_binary_markup() {
    let dir = TempDir::new().unwrap();
    let path = write_resume_docx(dir.path());

    let document = load_document(&path, LoadOptions::default()).await.unwrap();
    let markdown = export_to_markdown(&document).unwrap();

    assert!(!markdown.contains('\0'));
    assert!(!markdown.contains("<w:"));
    assert!(!markdown.contains("PK\u{3}\u{4}"));
}

#[tokio::test]
async fn test_unescaped_preview() {
    let dir = TempDir::new().unwrap();
    let path = write_resume_docx(dir.path());

    let document = load_document(&path, LoadOptions::default()).await.unwrap();
    let options = MarkdownOptions {
        escape_special_chars: false,
    };
    let markdown = export_to_markdown_with_options(&document, &options).unwrap();

    assert!(markdown.contains("__Senior__ engineer."));
    assert!(!markdown.contains('\\'));
}

#[tokio::test]
async fn test_document_structure() {
    let dir = TempDir::new().unwrap();
    let path = write_resume_docx(dir.path());

    let document = load_document(&path, LoadOptions::default()).await.unwrap();

    assert_eq!(document.title, "resume");
    assert!(document.metadata.word_count >= 8);
    assert!(matches!(
        &document.elements[0],
        DocumentElement::Heading { level: 1, .. }
    ));
    assert_eq!(document.elements[0].plain_text(), "Jane Doe");
    assert!(document
        .elements
        .iter()
        .any(|element| matches!(element, DocumentElement::List { ordered: false, items } if items.len() == 2)));
    assert!(document
        .elements
        .iter()
        .any(|element| matches!(element, DocumentElement::Table { .. })));
}

#[tokio::test]
async fn test_missing_file_is_not_found() {
    let dir = TempDir::new().unwrap();
    let err = load_document(&dir.path().join("resume.docx"), LoadOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<ResumeKitError>(),
        Some(ResumeKitError::DocumentNotFound(_))
    ));
}

#[tokio::test]
async fn test_non_docx_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("resume.docx");
    std::fs::write(&path, "plain text, not a package").unwrap();

    let err = load_document(&path, LoadOptions::default()).await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ResumeKitError>(),
        Some(ResumeKitError::InvalidDocument { .. })
    ));
}

#[tokio::test]
async fn test_hyperlink_target_survives_packing() {
    let dir = TempDir::new().unwrap();
    let docx = Docx::new().add_paragraph(
        Paragraph::new()
            .add_run(Run::new().add_text("Portfolio: "))
            .add_hyperlink(
                Hyperlink::new("https://jane.dev", HyperlinkType::External)
                    .add_run(Run::new().add_text("site")),
            ),
    );
    let path = save(docx, dir.path());

    let document = load_document(&path, LoadOptions::default()).await.unwrap();
    let options = MarkdownOptions {
        escape_special_chars: false,
    };
    let markdown = export_to_markdown_with_options(&document, &options).unwrap();
    assert_eq!(markdown, "Portfolio: [site](https://jane.dev)\n");

    // Escaping touches the link text only, never the target
    let escaped = export_to_markdown(&document).unwrap();
    assert!(escaped.contains("[site](https://jane.dev)"));
}

#[tokio::test]
async fn test_list_kind_follows_numbering_definitions() {
    let dir = TempDir::new().unwrap();
    let docx = with_bullet_numbering(Docx::new())
        .add_paragraph(
            text_paragraph("Shipped v2")
                .numbering(NumberingId::new(BULLET_NUM_ID), IndentLevel::new(0)),
        )
        .add_paragraph(text_paragraph("Education").style("Heading2"))
        .add_paragraph(text_paragraph("First").numbering(NumberingId::new(1), IndentLevel::new(0)))
        .add_paragraph(
            text_paragraph("Second").numbering(NumberingId::new(1), IndentLevel::new(0)),
        );
    let path = save(docx, dir.path());

    let document = load_document(&path, LoadOptions::default()).await.unwrap();
    let markdown = export_to_markdown(&document).unwrap();

    assert!(markdown.starts_with("- Shipped v2\n\n"));
    assert!(markdown.ends_with("1. First\n1. Second\n"));
    assert!(matches!(
        &document.elements[0],
        DocumentElement::List { ordered: false, .. }
    ));
    assert!(matches!(
        document.elements.last(),
        Some(DocumentElement::List { ordered: true, items }) if items.len() == 2
    ));
}

#[tokio::test]
async fn test_heading_keeps_bold_and_link_runs() {
    let dir = TempDir::new().unwrap();
    let docx = Docx::new().add_paragraph(
        Paragraph::new()
            .style("Heading2")
            .add_run(Run::new().add_text("Lead").bold())
            .add_run(Run::new().add_text(" at "))
            .add_hyperlink(
                Hyperlink::new("https://acme.example", HyperlinkType::External)
                    .add_run(Run::new().add_text("Acme")),
            ),
    );
    let path = save(docx, dir.path());

    let document = load_document(&path, LoadOptions::default()).await.unwrap();
    let markdown = export_to_markdown(&document).unwrap();
    assert_eq!(markdown, "## __Lead__ at [Acme](https://acme.example)\n");
}
