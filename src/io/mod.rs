/*!
# IO utilities

Article records loading/saving and the processed files ledger.
!*/
mod ledger;
mod record;

pub use ledger::Ledger;
pub use record::{is_temporary, InputRecord, OutputRecord, TEMP_PREFIX, TEXT_FIELDS};
