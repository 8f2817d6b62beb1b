//! Lemma frequency tables over an annotated corpus.
//!
//! Counts occurrences of each lemma of the `title`, `lead` and `body` fields and
//! writes a `word;count` CSV, most frequent first.
use std::collections::{HashMap, HashSet};
use std::path::Path;

use itertools::Itertools;
use log::{error, info};
use rayon::prelude::*;
use serde::Serialize;

use crate::error::Error;
use crate::io::OutputRecord;

/// Which lemmatized text gets counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Text {
    Full,
    Reduced,
}

#[derive(Debug, Serialize)]
struct WordCount<'a> {
    word: &'a str,
    count: u64,
}

/// Lemma counter.
#[derive(Debug, Default)]
pub struct LemmaCounts {
    counts: HashMap<String, u64>,
}

impl LemmaCounts {
    #[inline]
    fn add_in_counts(&mut self, word: &str) {
        self.counts
            .entry(word.to_string())
            .and_modify(|count| *count += 1)
            .or_insert(1);
    }

    /// Add space separated lemmas, ignoring stopwords.
    pub fn add_text(&mut self, text: &str, stopwords: &HashSet<String>) {
        text.split(' ')
            .filter(|word| !word.is_empty() && !stopwords.contains(*word))
            .for_each(|word| self.add_in_counts(word));
    }

    pub fn add_record(&mut self, record: &OutputRecord, text: Text, stopwords: &HashSet<String>) {
        for (_, analysis) in record.analyses() {
            let lemmas = match text {
                Text::Full => &analysis.lemmatized_text,
                Text::Reduced => &analysis.lemmatized_text_reduced,
            };
            self.add_text(lemmas, stopwords);
        }
    }

    pub fn merge(mut self, other: Self) -> Self {
        for (word, count) in other.counts {
            *self.counts.entry(word).or_insert(0) += count;
        }
        self
    }

    pub fn get(&self, word: &str) -> Option<u64> {
        self.counts.get(word).copied()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Counts by descending count, ties by word.
    pub fn sorted(&self) -> Vec<(&str, u64)> {
        self.counts
            .iter()
            .sorted_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)))
            .map(|(word, count)| (word.as_str(), *count))
            .collect()
    }
}

/// One stopword per line.
pub fn load_stopwords(path: &Path) -> Result<HashSet<String>, Error> {
    let content = std::fs::read_to_string(path)?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect())
}

fn count_file(path: &Path) -> Result<OutputRecord, Error> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Count lemmas of every annotated file under `src` and write the table to `dst`.
pub fn count(src: &Path, dst: &Path, text: Text, stopwords: Option<&Path>) -> Result<(), Error> {
    let stopwords = match stopwords {
        Some(p) => load_stopwords(p)?,
        None => HashSet::new(),
    };

    let src = src
        .to_str()
        .ok_or_else(|| Error::Config(format!("source {:?} is not valid UTF-8", src)))?;
    let pattern = format!("{}/**/*", glob::Pattern::escape(src));
    let files: Vec<_> = glob::glob(&pattern)?
        .filter_map(Result::ok)
        .filter(|p| p.is_file())
        .collect();
    info!("counting lemmas over {} files", files.len());

    let counts = files
        .par_iter()
        .fold(LemmaCounts::default, |mut counts, path| {
            match count_file(path) {
                Ok(record) => counts.add_record(&record, text, &stopwords),
                Err(e) => error!("skipping {:?}: {}", path, e),
            }
            counts
        })
        .reduce(LemmaCounts::default, LemmaCounts::merge);

    let mut out = csv::WriterBuilder::new().delimiter(b';').from_path(dst)?;
    for (word, count) in counts.sorted() {
        out.serialize(WordCount { word, count })?;
    }
    out.flush()?;

    info!("{} distinct words written to {:?}", counts.len(), dst);
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::{count, LemmaCounts, Text};
    use crate::analysis::AnalysisResult;
    use crate::io::OutputRecord;

    fn record(title: &str, reduced: &str) -> OutputRecord {
        OutputRecord {
            province: "Alicante".to_string(),
            date: "2020-01-01".to_string(),
            url: "http://x".to_string(),
            title: AnalysisResult {
                lemmatized_text: title.to_string(),
                lemmatized_text_reduced: reduced.to_string(),
                ..Default::default()
            },
            lead: AnalysisResult::default(),
            body: AnalysisResult {
                lemmatized_text: "el perro".to_string(),
                ..Default::default()
            },
        }
    }

    #[test]
    fn counts() {
        let mut c = LemmaCounts::default();
        c.add_record(&record("el perro correr", "perro correr"), Text::Full, &HashSet::new());

        assert_eq!(c.get("el"), Some(2));
        assert_eq!(c.get("perro"), Some(2));
        assert_eq!(c.get("correr"), Some(1));
        assert_eq!(c.get(""), None);
    }

    #[test]
    fn reduced_with_stopwords() {
        let stopwords: HashSet<String> = ["correr".to_string()].into_iter().collect();
        let mut c = LemmaCounts::default();
        c.add_record(&record("el perro correr", "perro correr"), Text::Reduced, &stopwords);

        assert_eq!(c.get("perro"), Some(1));
        assert_eq!(c.get("correr"), None);
        assert_eq!(c.get("el"), None);
    }

    #[test]
    fn merge_and_sort() {
        let mut a = LemmaCounts::default();
        a.add_text("b a a", &HashSet::new());
        let mut b = LemmaCounts::default();
        b.add_text("c b", &HashSet::new());

        let merged = a.merge(b);
        assert_eq!(merged.sorted(), vec![("a", 2), ("b", 2), ("c", 1)]);
    }

    #[test]
    fn csv_output() {
        let dir = tempfile::tempdir().unwrap();
        let corpus = dir.path().join("corpus");
        std::fs::create_dir(&corpus).unwrap();
        std::fs::write(
            corpus.join("a.json"),
            record("casa casa", "").to_pretty_json().unwrap(),
        )
        .unwrap();
        std::fs::write(corpus.join("not-annotated.json"), r#"{"title": "x"}"#).unwrap();

        let dst = dir.path().join("counts.csv");
        count(&corpus, &dst, Text::Full, None).unwrap();

        let content = std::fs::read_to_string(dst).unwrap();
        assert_eq!(content, "word;count\ncasa;2\nel;1\nperro;1\n");
    }
}
