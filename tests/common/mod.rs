use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use news_annotator::analysis::{AnnotatedDocument, AnnotatedToken};
use news_annotator::engine::Analyze;
use news_annotator::error::Error;

/// Text containing this word makes [WordTable] fail.
pub const ENGINE_FAILURE: &str = "FALLO";

/// Dictionary backed engine.
///
/// Words are split on whitespace, trailing `.` and `,` become punctuation
/// tokens, unknown words are tagged as common nouns.
pub struct WordTable {
    words: HashMap<&'static str, (&'static str, &'static str)>,
    calls: AtomicUsize,
}

impl WordTable {
    pub fn spanish() -> Self {
        let words = [
            ("Pedro", ("pedro", "NP00SP0")),
            ("corrió", ("correr", "VMIS3S0")),
            ("rápidamente", ("rápidamente", "RG")),
            ("muy", ("muy", "RG")),
            ("en", ("en", "SP")),
            ("el", ("el", "DA0MS0")),
            ("Alicante", ("alicante", "NP00G00")),
            ("Hércules", ("hércules", "NP00O00")),
            ("maratón", ("maratón", "NCMS000")),
            ("largo", ("largo", "AQ0MS00")),
            ("42", ("42", "Z")),
            ("2020", ("2020", "W")),
        ]
        .into_iter()
        .collect();

        Self {
            words,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn token(&self, word: &str) -> AnnotatedToken {
        match self.words.get(word) {
            Some((lemma, tag)) => AnnotatedToken::new(word, *lemma, *tag),
            None => AnnotatedToken::new(word, word.to_lowercase(), "NCMS000"),
        }
    }
}

impl Analyze for WordTable {
    fn analyze(&self, text: &str) -> Result<AnnotatedDocument, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if text.contains(ENGINE_FAILURE) {
            return Err(Error::Engine("engine failure".to_string()));
        }

        let mut tokens = Vec::new();
        for word in text.split_whitespace() {
            let stripped = word.trim_end_matches(|c: char| c == '.' || c == ',');
            if !stripped.is_empty() {
                tokens.push(self.token(stripped));
            }
            for punct in word[stripped.len()..].chars() {
                let tag = if punct == '.' { "Fp" } else { "Fc" };
                tokens.push(AnnotatedToken::new(punct.to_string(), punct.to_string(), tag));
            }
        }
        Ok(tokens.into())
    }
}

pub fn article(title: &str, lead: &str, body: &str) -> String {
    serde_json::json!({
        "province": "Alicante",
        "date": "2020-01-01",
        "url": "http://x",
        "title": title,
        "lead": lead,
        "body": body,
    })
    .to_string()
}

pub fn write(path: &Path, content: &str) -> PathBuf {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
    path.canonicalize().unwrap()
}

pub fn ledger_lines(path: &Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .unwrap_or_default()
        .lines()
        .map(String::from)
        .collect()
}
