//! Best-effort plain-text extraction from uploaded resume documents.
//!
//! The format is chosen from the file extension. Only running text is recovered:
//! no layout, tables or styling.

mod docx;

use thiserror::Error;

/// Printable runs shorter than this are dropped when scraping legacy `.doc` files.
const LEGACY_DOC_MIN_RUN: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Doc,
    Txt,
}

impl DocumentFormat {
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let (_, extension) = file_name.rsplit_once('.')?;
        match extension.to_ascii_lowercase().as_str() {
            "pdf" => Some(DocumentFormat::Pdf),
            "docx" => Some(DocumentFormat::Docx),
            "doc" => Some(DocumentFormat::Doc),
            "txt" => Some(DocumentFormat::Txt),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Docx => "docx",
            DocumentFormat::Doc => "doc",
            DocumentFormat::Txt => "txt",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "application/pdf",
            DocumentFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            DocumentFormat::Doc => "application/msword",
            DocumentFormat::Txt => "text/plain",
        }
    }
}

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Unsupported file type for '{0}'. Upload a PDF, DOC, DOCX or TXT file.")]
    UnsupportedFormat(String),

    #[error("Failed to read PDF: {0}")]
    Pdf(String),

    #[error("Failed to read DOCX: {0}")]
    Docx(String),

    #[error("Could not extract text from the uploaded file")]
    NoText,
}

/// Extracts the text of an uploaded document. Blocking; run it off the async runtime.
pub fn extract_text(file_name: &str, bytes: &[u8]) -> Result<String, ExtractError> {
    let format = DocumentFormat::from_file_name(file_name)
        .ok_or_else(|| ExtractError::UnsupportedFormat(file_name.to_string()))?;

    let text = match format {
        DocumentFormat::Pdf => {
            pdf_extract::extract_text_from_mem(bytes).map_err(|e| ExtractError::Pdf(e.to_string()))?
        }
        DocumentFormat::Docx => docx::extract_docx_text(bytes)?,
        DocumentFormat::Doc => extract_legacy_doc_text(bytes),
        DocumentFormat::Txt => String::from_utf8_lossy(bytes).into_owned(),
    };

    let text = text.trim();
    if text.is_empty() {
        return Err(ExtractError::NoText);
    }
    Ok(text.to_string())
}

/// Scrapes printable runs out of a binary Word 97-2003 file. Unreliable: formatting
/// tables and embedded strings come through alongside the body text.
fn extract_legacy_doc_text(bytes: &[u8]) -> String {
    let decoded = String::from_utf8_lossy(bytes);
    let mut runs: Vec<String> = Vec::new();
    let mut current = String::new();

    for ch in decoded.chars() {
        if ch.is_alphanumeric() || ch.is_ascii_punctuation() || ch == ' ' {
            current.push(ch);
        } else {
            flush_run(&mut current, &mut runs);
        }
    }
    flush_run(&mut current, &mut runs);

    runs.join("\n")
}

fn flush_run(current: &mut String, runs: &mut Vec<String>) {
    let run = current.trim();
    if run.chars().count() >= LEGACY_DOC_MIN_RUN {
        runs.push(run.to_string());
    }
    current.clear();
}
