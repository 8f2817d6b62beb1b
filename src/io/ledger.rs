/*! Processed files ledger.

Plain text file holding one processed file identifier per line. It is opened
once in read + append mode: existing lines are loaded at startup, completions
are appended one line at a time as files are done.

Appends from every worker go through a single [Mutex], so lines are never
interleaved. The ledger only ever grows during a run.
!*/
use std::collections::HashSet;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use log::{debug, info};

use crate::error::Error;

struct Inner {
    file: File,
    processed: HashSet<String>,
}

pub struct Ledger {
    path: PathBuf,
    inner: Mutex<Inner>,
}

impl Ledger {
    /// Open (creating it if absent) the ledger at `path` and load its entries.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let file = OpenOptions::new()
            .read(true)
            .append(true)
            .create(true)
            .open(path)?;

        let mut processed = HashSet::new();
        for line in BufReader::new(&file).lines() {
            let line = line?;
            let id = line.trim_end_matches('\r');
            if !id.is_empty() {
                processed.insert(id.to_string());
            }
        }

        info!("loaded {} processed entries from {:?}", processed.len(), path);
        Ok(Self {
            path: path.to_path_buf(),
            inner: Mutex::new(Inner { file, processed }),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn contains(&self, id: &str) -> bool {
        self.lock().processed.contains(id)
    }

    pub fn len(&self) -> usize {
        self.lock().processed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Durably record `id` as processed.
    ///
    /// The line is written and flushed before the in-memory set is updated.
    pub fn mark_processed(&self, id: &str) -> Result<(), Error> {
        let mut inner = self.lock();
        writeln!(inner.file, "{}", id).map_err(Error::Ledger)?;
        inner.file.flush().map_err(Error::Ledger)?;
        inner.processed.insert(id.to_string());
        debug!("marked {} as processed", id);
        Ok(())
    }

    // A worker panicking while holding the lock can't leave a partial
    // in-memory state behind, so a poisoned lock is still usable.
    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
