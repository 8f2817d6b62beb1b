//! Per-field analysis result.
use serde::{Deserialize, Serialize};

use super::classify::{classify, Accumulator};
use super::document::AnnotatedDocument;

/// Characters removed by [trim].
const WHITESPACE: [char; 6] = [' ', '\t', '\n', '\u{0B}', '\u{0C}', '\r'];

/// Trim ASCII whitespace (space, tab, newline, vertical tab, form feed, carriage return)
/// from both ends.
///
/// Unlike [str::trim], other unicode whitespace (non-breaking spaces...) is kept.
pub fn trim(s: &str) -> &str {
    s.trim_matches(|c: char| WHITESPACE.contains(&c))
}

/// Structured analysis of one text field.
///
/// Field order is the serialization order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub raw_text: String,
    pub lemmatized_text: String,
    pub lemmatized_text_reduced: String,
    pub persons: Vec<String>,
    pub locations: Vec<String>,
    pub organizations: Vec<String>,
    pub others: Vec<String>,
    pub dates: Vec<String>,
    pub numbers: Vec<String>,
}

impl AnalysisResult {
    /// Fold every token of `doc` through [classify] and build the result.
    ///
    /// Buckets keep document order and duplicates.
    pub fn analyze(doc: &AnnotatedDocument, raw_text: &str) -> Self {
        let acc = doc.tokens().fold(Accumulator::default(), classify);
        Self::from_accumulator(acc, raw_text)
    }

    fn from_accumulator(acc: Accumulator, raw_text: &str) -> Self {
        Self {
            raw_text: trim(raw_text).to_string(),
            lemmatized_text: trim(&acc.lemmatized_text).to_string(),
            lemmatized_text_reduced: trim(&acc.lemmatized_text_reduced).to_string(),
            persons: acc.persons,
            locations: acc.locations,
            organizations: acc.organizations,
            others: acc.others,
            dates: acc.dates,
            numbers: acc.numbers,
        }
    }
}
