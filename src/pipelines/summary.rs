//! End of run report.
use std::path::PathBuf;
use std::time::Duration;

use log::{error, info, warn};

use crate::error::Error;

#[derive(Debug, Default)]
pub struct RunSummary {
    /// Files analyzed, rewritten and recorded in the ledger.
    pub processed: usize,
    /// Files already present in the ledger.
    pub skipped: usize,
    /// Files left untouched because the run was cancelled.
    pub cancelled: usize,
    pub failures: Vec<(PathBuf, Error)>,
    pub elapsed: Duration,
}

impl RunSummary {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Files that were rewritten but could not be recorded in the ledger.
    pub fn ledger_failures(&self) -> usize {
        self.failures
            .iter()
            .filter(|(_, e)| matches!(e, Error::Ledger(_)))
            .count()
    }

    pub fn log(&self) {
        for (path, e) in &self.failures {
            error!("{:?}: {}", path, e);
        }

        let ledger_failures = self.ledger_failures();
        if ledger_failures > 0 {
            warn!(
                "{} files were rewritten but not recorded in the ledger, they will be analyzed again on next run",
                ledger_failures
            );
        }

        info!(
            "processed: {}, skipped: {}, cancelled: {}, failed: {}",
            self.processed,
            self.skipped,
            self.cancelled,
            self.failures.len()
        );
        info!("Time: {} ms", self.elapsed.as_millis());
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::RunSummary;
    use crate::error::Error;

    #[test]
    fn ledger_failures() {
        let summary = RunSummary {
            processed: 3,
            failures: vec![
                (
                    PathBuf::from("a.json"),
                    Error::Ledger(std::io::Error::from(std::io::ErrorKind::Other)),
                ),
                (PathBuf::from("b.json"), Error::MissingField("url")),
            ],
            ..Default::default()
        };

        assert!(!summary.is_success());
        assert_eq!(summary.ledger_failures(), 1);
    }
}
