//! Document-to-text conversion.
//!
//! The pipeline only depends on [`TextExtractor`]; [`PdfTextExtractor`] is
//! the production implementation backed by `pdf_extract`.

use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use crate::error::{Result, ScanError};

/// Converts one document into plain text, keeping blank-line paragraph
/// breaks and single line breaks inside paragraphs.
pub trait TextExtractor {
    fn extract(&self, path: &Path) -> Result<String>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct PdfTextExtractor;

impl PdfTextExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl TextExtractor for PdfTextExtractor {
    fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).map_err(|source| ScanError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        // pdf_extract panics on some malformed files instead of returning an error.
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text_from_mem(&bytes)));
        match outcome {
            Ok(Ok(text)) => Ok(text),
            Ok(Err(e)) => Err(ScanError::Extraction {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
            Err(_) => Err(ScanError::Extraction {
                path: path.to_path_buf(),
                message: "PDF decoder panicked on malformed document".to_string(),
            }),
        }
    }
}
