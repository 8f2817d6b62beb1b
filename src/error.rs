//! Error enum
use std::fmt;
use std::time::Duration;

#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    Serde(serde_json::Error),
    Glob(glob::GlobError),
    GlobPattern(glob::PatternError),
    Persist(tempfile::PersistError),
    ThreadPool(rayon::ThreadPoolBuildError),
    Csv(csv::Error),
    /// Missing engine resources, unusable corpus root...
    Config(String),
    /// A required field is absent from an input record.
    MissingField(&'static str),
    Engine(String),
    Timeout(Duration),
    /// The ledger could not be appended to. The file content may already be rewritten.
    Ledger(std::io::Error),
    Custom(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "io error: {e}"),
            Error::Serde(e) => write!(f, "json error: {e}"),
            Error::Glob(e) => write!(f, "glob error: {e}"),
            Error::GlobPattern(e) => write!(f, "glob pattern error: {e}"),
            Error::Persist(e) => write!(f, "could not replace file: {e}"),
            Error::ThreadPool(e) => write!(f, "thread pool error: {e}"),
            Error::Csv(e) => write!(f, "csv error: {e}"),
            Error::Config(msg) => write!(f, "configuration error: {msg}"),
            Error::MissingField(field) => write!(f, "malformed record: missing field `{field}`"),
            Error::Engine(msg) => write!(f, "analysis engine error: {msg}"),
            Error::Timeout(d) => write!(f, "analysis engine timed out after {d:?}"),
            Error::Ledger(e) => write!(f, "ledger append failed: {e}"),
            Error::Custom(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Error {
        Error::Io(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Error {
        Error::Serde(e)
    }
}

impl From<glob::GlobError> for Error {
    fn from(e: glob::GlobError) -> Error {
        Error::Glob(e)
    }
}

impl From<glob::PatternError> for Error {
    fn from(e: glob::PatternError) -> Error {
        Error::GlobPattern(e)
    }
}

impl From<tempfile::PersistError> for Error {
    fn from(e: tempfile::PersistError) -> Error {
        Error::Persist(e)
    }
}

impl From<rayon::ThreadPoolBuildError> for Error {
    fn from(e: rayon::ThreadPoolBuildError) -> Error {
        Error::ThreadPool(e)
    }
}

impl From<csv::Error> for Error {
    fn from(e: csv::Error) -> Error {
        Error::Csv(e)
    }
}

impl From<String> for Error {
    fn from(s: String) -> Error {
        Error::Custom(s)
    }
}
