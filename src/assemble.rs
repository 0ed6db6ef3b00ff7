use crate::fields::{extract_source, extract_subjects};
use crate::keywords::KeywordSet;
use crate::matcher::match_keywords;
use crate::model::ExtractionRecord;

const MATCH_SEPARATOR: &str = " | ";
const LIST_SEPARATOR: &str = ", ";

/// Builds the metadata row for one document.
pub fn assemble(text: &str, path: &str, keywords: &KeywordSet) -> ExtractionRecord {
    let matched = match_keywords(text, keywords);
    let relevant_text = matched.joined().trim().to_string();

    // Paragraph boundaries come from re-splitting the joined text, so an
    // empty match still yields one (empty) paragraph.
    let paragraphs: Vec<&str> = relevant_text.split(MATCH_SEPARATOR).collect();
    let words = render_word_counts(&paragraphs);

    let (paragraph_count, keyword_list) = if matched.keywords.is_empty() {
        (String::new(), String::new())
    } else {
        let list: Vec<&str> = matched.keywords.iter().map(String::as_str).collect();
        (paragraphs.len().to_string(), list.join(LIST_SEPARATOR))
    };

    ExtractionRecord {
        who_wrote_the_piece: extract_source(text),
        subject: extract_subjects(text),
        relevant_text,
        paragraphs: paragraph_count,
        words,
        keywords: keyword_list,
        path: path.to_string(),
    }
}

/// Renders whitespace-token counts joined by ", ". Only the first entry is
/// blanked when its paragraph is empty; later entries are always numeric.
fn render_word_counts(paragraphs: &[&str]) -> String {
    let mut words = String::new();
    for (index, paragraph) in paragraphs.iter().enumerate() {
        let count = paragraph.split_whitespace().count();
        if index == 0 {
            if !paragraph.is_empty() {
                words.push_str(&count.to_string());
            }
        } else {
            words.push_str(LIST_SEPARATOR);
            words.push_str(&count.to_string());
        }
    }
    words
}
