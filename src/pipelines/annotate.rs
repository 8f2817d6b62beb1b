//! Corpus annotation pipeline.
//!
//! Every regular file under the corpus root is a JSON news article.
//! Each one not yet present in the ledger is analyzed and rewritten in place.
//!
//! # Processing
//! 1. The ledger is loaded, the corpus tree is listed (eagerly, before any file is touched).
//! 1. Directories, the ledger itself, leftover temporary files and files already
//!    in the ledger are filtered out.
//! 1. Remaining files are processed concurrently. For each file:
//!     1. the record is read and checked for required fields (an already
//!        analyzed record is read back from its `raw_text` fields),
//!     1. `title`, `lead` and `body` are analyzed, in this order,
//!     1. the analyzed record atomically replaces the file,
//!     1. the file path is appended to the ledger.
//!
//! A failure on a file never stops the others: failed files are reported in
//! the [RunSummary] and left out of the ledger, so they are retried on next run.
use std::path::{Path, PathBuf};
use std::time::Instant;

use log::{debug, error, info, warn};
use rayon::prelude::*;

use crate::analysis::AnalysisResult;
use crate::engine::Analyze;
use crate::error::Error;
use crate::io::{is_temporary, InputRecord, Ledger, OutputRecord};

use super::{Cancel, Pipeline, RunSummary};

enum Outcome {
    Processed,
    Cancelled,
    Failed(Error),
}

pub struct AnnotatePipeline<A: Analyze> {
    src: PathBuf,
    ledger_path: PathBuf,
    engine: A,
    threads: Option<usize>,
    cancel: Cancel,
}

impl<A: Analyze> AnnotatePipeline<A> {
    pub fn new(src: PathBuf, ledger_path: PathBuf, engine: A) -> Self {
        Self {
            src,
            ledger_path,
            engine,
            threads: None,
            cancel: Cancel::default(),
        }
    }

    /// Use a dedicated pool of `threads` workers. `None` uses rayon's global pool.
    pub fn threads(mut self, threads: Option<usize>) -> Self {
        self.threads = threads;
        self
    }

    pub fn cancel(mut self, cancel: Cancel) -> Self {
        self.cancel = cancel;
        self
    }

    /// List every entry under `root`, recursively.
    ///
    /// Unreadable entries are logged and discarded.
    fn get_paths(root: &Path) -> Result<Vec<PathBuf>, Error> {
        let root = root
            .to_str()
            .ok_or_else(|| Error::Config(format!("corpus root {:?} is not valid UTF-8", root)))?;
        let pattern = format!("{}/**/*", glob::Pattern::escape(root));

        let paths = glob::glob(&pattern)?
            .filter_map(|entry| {
                entry.map_or_else(
                    |e| {
                        error!("error reading corpus entry: {}", e);
                        None
                    },
                    Some,
                )
            })
            .collect();
        Ok(paths)
    }

    /// Analyze the three text fields of `input`, in order.
    fn annotate(engine: &A, input: InputRecord) -> Result<OutputRecord, Error> {
        let analyze = |text: &str| -> Result<AnalysisResult, Error> {
            let doc = engine.analyze(text)?;
            Ok(AnalysisResult::analyze(&doc, text))
        };

        let title = analyze(&input.title)?;
        let lead = analyze(&input.lead)?;
        let body = analyze(&input.body)?;
        Ok(OutputRecord::new(input, title, lead, body))
    }

    fn process_file(&self, path: &Path, ledger: &Ledger) -> Result<(), Error> {
        let id = path.to_string_lossy();
        info!("Analyzing {}", id);

        let input = InputRecord::from_path(path)?;
        let output = Self::annotate(&self.engine, input)?;
        output.write_atomic(path)?;
        ledger.mark_processed(&id)?;
        Ok(())
    }

    fn process_all(&self, files: &[PathBuf], ledger: &Ledger) -> Vec<(PathBuf, Outcome)> {
        files
            .par_iter()
            .map(|path| {
                if self.cancel.is_cancelled() {
                    return (path.clone(), Outcome::Cancelled);
                }
                let outcome = match self.process_file(path, ledger) {
                    Ok(()) => Outcome::Processed,
                    Err(e) => {
                        debug!("{:?} failed: {}", path, e);
                        Outcome::Failed(e)
                    }
                };
                (path.clone(), outcome)
            })
            .collect()
    }
}

impl<A: Analyze> Pipeline<RunSummary> for AnnotatePipeline<A> {
    fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    fn run(&self) -> Result<RunSummary, Error> {
        let start = Instant::now();

        let src = self.src.canonicalize().map_err(|e| {
            Error::Config(format!("corpus root {:?} is not accessible: {}", self.src, e))
        })?;
        if !src.is_dir() {
            return Err(Error::Config(format!(
                "corpus root {:?} is not a directory",
                src
            )));
        }

        let ledger = Ledger::load(&self.ledger_path)?;
        let ledger_file = ledger.path().canonicalize().ok();

        // listing is done before any processing: ledger growth must not change it.
        let entries = Self::get_paths(&src)?;
        info!("{} entries found under {:?}", entries.len(), src);

        let mut summary = RunSummary::default();
        let mut files = Vec::with_capacity(entries.len());
        for path in entries {
            if !path.is_file() || ledger_file.as_deref() == Some(path.as_path()) {
                continue;
            }
            if is_temporary(&path) {
                warn!("ignoring leftover temporary file {:?}", path);
                continue;
            }
            if ledger.contains(&path.to_string_lossy()) {
                debug!("skipping already processed {:?}", path);
                summary.skipped += 1;
                continue;
            }
            files.push(path);
        }
        info!(
            "{} files to analyze, {} already processed",
            files.len(),
            summary.skipped
        );

        let outcomes = match self.threads {
            Some(n) => {
                let pool = rayon::ThreadPoolBuilder::new().num_threads(n).build()?;
                pool.install(|| self.process_all(&files, &ledger))
            }
            None => self.process_all(&files, &ledger),
        };

        for (path, outcome) in outcomes {
            match outcome {
                Outcome::Processed => summary.processed += 1,
                Outcome::Cancelled => summary.cancelled += 1,
                Outcome::Failed(e) => summary.failures.push((path, e)),
            }
        }

        if summary.cancelled > 0 {
            warn!("run cancelled, {} files left for next run", summary.cancelled);
        }

        summary.elapsed = start.elapsed();
        Ok(summary)
    }
}
