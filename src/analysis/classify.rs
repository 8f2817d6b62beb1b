//! Token classification.
//!
//! Routes each annotated token into the typed buckets of an [Accumulator]
//! and extends the two lemmatized texts, depending on the token's tag.
use super::token::{AnnotatedToken, Category, EntityClass};

/// Manner adverbs are the only adverbs kept in the reduced text.
const MANNER_ADVERB_SUFFIX: &str = "mente";

/// Fold state built while walking a document's tokens.
///
/// Lemmatized texts are accumulated with a trailing space after each lemma,
/// they are trimmed once the whole document has been seen.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Accumulator {
    pub lemmatized_text: String,
    pub lemmatized_text_reduced: String,
    pub persons: Vec<String>,
    pub locations: Vec<String>,
    pub organizations: Vec<String>,
    pub others: Vec<String>,
    pub numbers: Vec<String>,
    pub dates: Vec<String>,
}

impl Accumulator {
    fn push_reduced(&mut self, lemma: &str) {
        self.lemmatized_text_reduced.push_str(lemma);
        self.lemmatized_text_reduced.push(' ');
    }

    fn push_entity(&mut self, class: EntityClass, form: &str) {
        let bucket = match class {
            EntityClass::Person => &mut self.persons,
            EntityClass::Location => &mut self.locations,
            EntityClass::Organization => &mut self.organizations,
            EntityClass::Other => &mut self.others,
        };
        bucket.push(form.to_string());
    }
}

/// Classify a single token, returning the updated accumulator.
///
/// Punctuation leaves the accumulator untouched. Every other token gets its
/// lemma appended to the full lemmatized text, whatever its category.
pub fn classify(mut acc: Accumulator, token: &AnnotatedToken) -> Accumulator {
    let lemma = token.lemma();
    match token.tag().category() {
        Category::Punctuation => return acc,
        Category::Adjective | Category::Verb => acc.push_reduced(lemma),
        Category::Noun => {
            acc.push_reduced(lemma);
            if let Some(class) = token.tag().entity_class() {
                acc.push_entity(class, token.form());
            }
        }
        Category::Adverb => {
            if lemma.ends_with(MANNER_ADVERB_SUFFIX) {
                acc.push_reduced(lemma);
            }
        }
        Category::Number => acc.numbers.push(token.form().to_string()),
        Category::Date => acc.dates.push(token.form().to_string()),
        Category::Other => (),
    }

    acc.lemmatized_text.push_str(lemma);
    acc.lemmatized_text.push(' ');
    acc
}
