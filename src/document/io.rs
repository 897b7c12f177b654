//! File I/O operations and validation
//!
//! This module reads document bytes from disk and checks that they form a
//! real .docx package before any parsing happens.

use anyhow::{Context, Result};
use std::io::Cursor;
use std::path::Path;
use zip::ZipArchive;

use crate::error::ResumeKitError;

/// Read the raw document bytes, reporting a missing file as `DocumentNotFound`
pub(crate) async fn read_document_bytes(file_path: &Path) -> Result<Vec<u8>> {
    match tokio::fs::read(file_path).await {
        Ok(bytes) => Ok(bytes),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            Err(ResumeKitError::DocumentNotFound(file_path.to_path_buf()).into())
        }
        Err(err) => Err(err).with_context(|| format!("Failed to read {}", file_path.display())),
    }
}

/// Validates that the bytes are a legitimate .docx file
pub(crate) fn validate_docx_bytes(file_path: &Path, bytes: &[u8]) -> Result<()> {
    let invalid = |reason: &str| ResumeKitError::InvalidDocument {
        path: file_path.to_path_buf(),
        reason: reason.to_string(),
    };

    let extension = file_path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("");

    if !extension.eq_ignore_ascii_case("docx") {
        return Err(invalid(&format!(
            "expected a .docx file, got .{extension} (only Word .docx is supported, not .doc, .xlsx, .zip)"
        ))
        .into());
    }

    let mut archive =
        ZipArchive::new(Cursor::new(bytes)).map_err(|_| invalid("not a ZIP package"))?;

    if archive.by_name("word/document.xml").is_err() {
        if archive.by_name("xl/workbook.xml").is_ok() {
            return Err(invalid("this appears to be an Excel workbook (.xlsx)").into());
        }
        return Err(invalid("missing word/document.xml; the file may be corrupted").into());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn zip_with(entry: &str) -> Vec<u8> {
        let mut buffer = Cursor::new(Vec::new());
        {
            let mut writer = zip::ZipWriter::new(&mut buffer);
            writer
                .start_file(entry, zip::write::SimpleFileOptions::default())
                .unwrap();
            writer.write_all(b"<xml/>").unwrap();
            writer.finish().unwrap();
        }
        buffer.into_inner()
    }

    fn reason(err: anyhow::Error) -> String {
        match err.downcast_ref::<ResumeKitError>() {
            Some(ResumeKitError::InvalidDocument { reason, .. }) => reason.clone(),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_rejects_wrong_extension() {
        let err = validate_docx_bytes(Path::new("resume.pdf"), b"%PDF").unwrap_err();
        assert!(reason(err).contains(".pdf"));
    }

    #[test]
    fn test_rejects_non_zip() {
        let err = validate_docx_bytes(Path::new("resume.docx"), b"plain text").unwrap_err();
        assert_eq!(reason(err), "not a ZIP package");
    }

    #[test]
    fn test_detects_spreadsheet() {
        let bytes = zip_with("xl/workbook.xml");
        let err = validate_docx_bytes(Path::new("resume.docx"), &bytes).unwrap_err();
        assert!(reason(err).contains("Excel"));
    }

    #[test]
    fn test_accepts_word_package() {
        let bytes = zip_with("word/document.xml");
        assert!(validate_docx_bytes(Path::new("Resume.DOCX"), &bytes).is_ok());
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let err = read_document_bytes(Path::new("does/not/exist.docx"))
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ResumeKitError>(),
            Some(ResumeKitError::DocumentNotFound(_))
        ));
    }
}
