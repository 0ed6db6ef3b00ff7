//! Heuristic attribution and topic lookup over extracted text.

use crate::matcher::{collapse, split_paragraphs};

const SOURCE_MARKERS: [&str; 2] = ["SOURCE ", "Source: "];
const SUBJECTS_MARKER: &str = "Subjects: ";

/// Returns the text following the first source marker, up to the end of
/// that line. Paragraphs are scanned in document order; within a paragraph
/// `SOURCE ` is tried before `Source: `. Empty when neither appears.
pub fn extract_source(text: &str) -> String {
    for paragraph in split_paragraphs(text) {
        for marker in SOURCE_MARKERS {
            if let Some((_, rest)) = paragraph.split_once(marker) {
                let line = rest.split_once('\n').map_or(rest, |(line, _)| line);
                return line.trim().to_string();
            }
        }
    }
    String::new()
}

/// Returns everything after `Subjects: ` to the end of its paragraph, with
/// line breaks collapsed. Empty when the marker never appears.
pub fn extract_subjects(text: &str) -> String {
    split_paragraphs(text)
        .find_map(|paragraph| paragraph.split_once(SUBJECTS_MARKER))
        .map(|(_, rest)| collapse(rest).trim().to_string())
        .unwrap_or_default()
}
