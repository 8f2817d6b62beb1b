//! Annotated document hierarchy, as returned by an analysis engine.
use super::token::AnnotatedToken;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sentence(Vec<AnnotatedToken>);

impl Sentence {
    pub fn new(tokens: Vec<AnnotatedToken>) -> Self {
        Self(tokens)
    }

    pub fn tokens(&self) -> &[AnnotatedToken] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Paragraph(Vec<Sentence>);

impl Paragraph {
    pub fn new(sentences: Vec<Sentence>) -> Self {
        Self(sentences)
    }

    pub fn sentences(&self) -> &[Sentence] {
        &self.0
    }
}

/// Paragraphs containing sentences containing tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnotatedDocument {
    paragraphs: Vec<Paragraph>,
}

impl AnnotatedDocument {
    pub fn new(paragraphs: Vec<Paragraph>) -> Self {
        Self { paragraphs }
    }

    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    /// Every token, in document order.
    pub fn tokens(&self) -> impl Iterator<Item = &AnnotatedToken> {
        self.paragraphs
            .iter()
            .flat_map(|p| p.sentences().iter())
            .flat_map(|s| s.tokens().iter())
    }
}

impl From<Vec<AnnotatedToken>> for AnnotatedDocument {
    /// Single paragraph, single sentence document.
    fn from(tokens: Vec<AnnotatedToken>) -> Self {
        Self::new(vec![Paragraph::new(vec![Sentence::new(tokens)])])
    }
}
