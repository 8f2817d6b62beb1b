/*! Content processing

Aggregations over already annotated corpora.
!*/
pub mod count;
