//! Parser for FreeLing's `tagged` output level.
//!
//! One token per line (`form lemma tag [probability]`), sentences separated by
//! blank lines. The output carries no paragraph boundary, so every sentence
//! ends up in a single paragraph.
use log::warn;

use crate::analysis::{AnnotatedDocument, AnnotatedToken, Paragraph, Sentence};

pub fn parse_tagged(output: &str) -> AnnotatedDocument {
    let mut sentences = Vec::new();
    let mut current = Vec::new();

    for line in output.lines() {
        let line = line.trim();
        if line.is_empty() {
            if !current.is_empty() {
                sentences.push(Sentence::new(std::mem::take(&mut current)));
            }
            continue;
        }

        let mut columns = line.split_whitespace();
        match (columns.next(), columns.next(), columns.next()) {
            (Some(form), Some(lemma), Some(tag)) => {
                current.push(AnnotatedToken::new(form, lemma, tag))
            }
            _ => warn!("skipping malformed engine output line: {:?}", line),
        }
    }

    if !current.is_empty() {
        sentences.push(Sentence::new(current));
    }

    if sentences.is_empty() {
        AnnotatedDocument::default()
    } else {
        AnnotatedDocument::new(vec![Paragraph::new(sentences)])
    }
}
