/*! Token classification and per-field analysis.

An [AnnotatedDocument] produced by an analysis engine is folded, token by token,
through [classify] into an [AnalysisResult].
!*/
mod classify;
mod document;
mod result;
mod token;

pub use classify::{classify, Accumulator};
pub use document::{AnnotatedDocument, Paragraph, Sentence};
pub use result::{trim, AnalysisResult};
pub use token::{AnnotatedToken, Category, EntityClass, Tag};
