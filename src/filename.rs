use crate::model::FilenameRecord;

const FIELD_DELIMITER: char = '-';
const EXPECTED_COMPONENTS: usize = 6;

/// Result of parsing `identifier - headline - day - month - year - source.ext`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFilename {
    pub record: FilenameRecord,
    /// Set when the name had fewer than six components and some fields
    /// were left empty.
    pub malformed: bool,
}

pub fn parse_filename(name: &str) -> ParsedFilename {
    let parts: Vec<&str> = name.split(FIELD_DELIMITER).map(str::trim).collect();
    let part = |index: usize| parts.get(index).copied().unwrap_or("");

    // day, month and year; a short name keeps only the components it has
    let date = parts.get(2..parts.len().min(5)).unwrap_or(&[]).join("-");

    let source = part(5).split('.').next().unwrap_or("").trim();

    ParsedFilename {
        record: FilenameRecord {
            identifier: part(0).to_string(),
            headline: part(1).to_string(),
            date,
            source: source.to_string(),
        },
        malformed: parts.len() < EXPECTED_COMPONENTS,
    }
}
