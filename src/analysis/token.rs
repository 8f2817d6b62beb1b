//! Annotated tokens and their grammatical tags.
//!
//! Tags follow the EAGLES positional scheme: position 0 holds the major
//! category, and for nouns position 4 holds the named entity class.
use std::fmt;

/// Major grammatical category, read from position 0 of a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Punctuation,
    Adjective,
    Noun,
    Verb,
    Adverb,
    Number,
    Date,
    Other,
}

impl From<char> for Category {
    fn from(c: char) -> Self {
        match c {
            'F' => Category::Punctuation,
            'A' => Category::Adjective,
            'N' => Category::Noun,
            'V' => Category::Verb,
            'R' => Category::Adverb,
            'Z' => Category::Number,
            'W' => Category::Date,
            _ => Category::Other,
        }
    }
}

/// Named entity class of a noun, read from position 4 of a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityClass {
    Person,
    Location,
    Organization,
    Other,
}

impl EntityClass {
    fn from_char(c: char) -> Option<Self> {
        match c {
            'S' => Some(EntityClass::Person),
            'G' => Some(EntityClass::Location),
            'O' => Some(EntityClass::Organization),
            'V' => Some(EntityClass::Other),
            _ => None,
        }
    }
}

/// A positional grammatical tag, e.g. `NP00SP0` or `VMIS3S0`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tag(String);

impl Tag {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// An empty tag has no category and falls into [Category::Other].
    pub fn category(&self) -> Category {
        self.0.chars().next().map_or(Category::Other, Category::from)
    }

    /// Entity class for nouns. Short tags and unknown codes yield `None`.
    pub fn entity_class(&self) -> Option<EntityClass> {
        if self.category() != Category::Noun {
            return None;
        }
        self.0.chars().nth(4).and_then(EntityClass::from_char)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One word occurrence, as produced by the analysis engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedToken {
    form: String,
    lemma: String,
    tag: Tag,
}

impl AnnotatedToken {
    pub fn new(form: impl Into<String>, lemma: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            form: form.into(),
            lemma: lemma.into(),
            tag: Tag::new(tag),
        }
    }

    pub fn form(&self) -> &str {
        &self.form
    }

    pub fn lemma(&self) -> &str {
        &self.lemma
    }

    pub fn tag(&self) -> &Tag {
        &self.tag
    }
}
