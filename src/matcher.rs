use indexmap::IndexSet;

use crate::keywords::KeywordSet;

pub const PARAGRAPH_DELIMITER: &str = "\n\n";

/// Splits extracted text on blank lines. Empty paragraphs are kept.
pub fn split_paragraphs(text: &str) -> impl Iterator<Item = &str> {
    text.split(PARAGRAPH_DELIMITER)
}

/// Replaces every line break inside a paragraph with a single space.
pub fn collapse(paragraph: &str) -> String {
    paragraph.replace('\n', " ")
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MatchResult {
    /// Distinct collapsed paragraphs, in discovery order.
    pub paragraphs: Vec<String>,
    /// Distinct keywords found, in discovery order.
    pub keywords: IndexSet<String>,
}

impl MatchResult {
    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }

    pub fn joined(&self) -> String {
        self.paragraphs.join(" | ")
    }
}

/// Finds every paragraph that contains a keyword, case-insensitively.
///
/// Traversal is keyword-outer, paragraph-inner: all paragraphs hit by the
/// first keyword come before any paragraph first hit by the second one, so
/// the result follows vocabulary order rather than document order.
/// Paragraphs are deduplicated by their collapsed text, and a keyword is
/// only reported when it contributes a paragraph not already recorded.
pub fn match_keywords(text: &str, keywords: &KeywordSet) -> MatchResult {
    let paragraphs: Vec<(String, String)> = split_paragraphs(text)
        .map(|p| {
            let collapsed = collapse(p);
            let lowered = collapsed.to_lowercase();
            (collapsed, lowered)
        })
        .collect();

    let mut result = MatchResult::default();
    for keyword in keywords.iter() {
        let needle = keyword.to_lowercase();
        for (collapsed, lowered) in &paragraphs {
            if lowered.contains(&needle) && !result.paragraphs.contains(collapsed) {
                result.keywords.insert(keyword.to_string());
                result.paragraphs.push(collapsed.clone());
            }
        }
    }

    result
}
