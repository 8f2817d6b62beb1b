/*! Analysis engines.

All engines should implement [Analyze] to be usable in pipelines.
!*/
mod freeling;
mod tagged;

pub use freeling::{Freeling, FreelingBuilder};
pub use tagged::parse_tagged;

use crate::analysis::AnnotatedDocument;
use crate::error::Error;

/// Analysis of raw text into annotated tokens.
///
/// One engine instance is shared between every worker.
pub trait Analyze: Sync {
    fn analyze(&self, text: &str) -> Result<AnnotatedDocument, Error>;
}

impl<A: Analyze + ?Sized> Analyze for &A {
    fn analyze(&self, text: &str) -> Result<AnnotatedDocument, Error> {
        (**self).analyze(text)
    }
}
