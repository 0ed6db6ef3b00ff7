use serde::Serialize;

pub const METADATA_COLUMNS: [&str; 7] = [
    "who_wrote_the_piece",
    "subject",
    "relevant_text",
    "paragraphs",
    "words",
    "keywords",
    "path",
];

pub const FILENAME_COLUMNS: [&str; 4] = ["identifier", "headline", "date", "source"];

/// One metadata-table row. Field order is column order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractionRecord {
    pub who_wrote_the_piece: String,
    pub subject: String,
    pub relevant_text: String,
    pub paragraphs: String,
    pub words: String,
    pub keywords: String,
    pub path: String,
}

impl ExtractionRecord {
    pub fn has_matches(&self) -> bool {
        !self.keywords.is_empty()
    }
}

/// One filename-table row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilenameRecord {
    pub identifier: String,
    pub headline: String,
    pub date: String,
    pub source: String,
}

/// Both rows for one document, as printed by the single-document inspector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentReport {
    pub filename: FilenameRecord,
    pub malformed_filename: bool,
    pub extraction: ExtractionRecord,
}
