//! News article records, before and after analysis.
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::analysis::AnalysisResult;
use crate::error::Error;

/// Text fields that get analyzed, in processing and output order.
pub const TEXT_FIELDS: [&str; 3] = ["title", "lead", "body"];

/// Name prefix of the temporary files used by [OutputRecord::write_atomic].
pub const TEMP_PREFIX: &str = ".news-annotator-";

/// Whether `path` names a leftover of [OutputRecord::write_atomic].
pub fn is_temporary(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map_or(false, |name| name.starts_with(TEMP_PREFIX))
}

/// Article as scraped. Fields other than these six are dropped on rewrite.
///
/// Every field must be a JSON string: a number or an object in `date` or
/// `url` makes the record malformed rather than being copied as is.
///
/// A text field may also be an already computed analysis. Its `raw_text` is
/// then used, so an article rewritten but never recorded in the ledger is
/// analyzed again instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputRecord {
    pub province: String,
    pub date: String,
    pub url: String,
    pub title: String,
    pub lead: String,
    pub body: String,
}

impl InputRecord {
    /// Parse a record, reporting the first missing required field by name.
    pub fn from_json(content: &str) -> Result<Self, Error> {
        let value: Value = serde_json::from_str(content)?;
        let obj = value
            .as_object()
            .ok_or_else(|| Error::Custom("record is not a JSON object".to_string()))?;

        Ok(Self {
            province: Self::field(obj, "province")?,
            date: Self::field(obj, "date")?,
            url: Self::field(obj, "url")?,
            title: Self::text_field(obj, "title")?,
            lead: Self::text_field(obj, "lead")?,
            body: Self::text_field(obj, "body")?,
        })
    }

    pub fn from_path(path: &Path) -> Result<Self, Error> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    fn field(obj: &Map<String, Value>, name: &'static str) -> Result<String, Error> {
        match obj.get(name) {
            None | Some(Value::Null) => Err(Error::MissingField(name)),
            Some(Value::String(s)) => Ok(s.clone()),
            Some(other) => Err(Error::Custom(format!(
                "field `{}` is not a string: {}",
                name, other
            ))),
        }
    }

    /// Like [InputRecord::field], also accepting an analysis object.
    fn text_field(obj: &Map<String, Value>, name: &'static str) -> Result<String, Error> {
        match obj.get(name) {
            Some(Value::Object(analysis)) => match analysis.get("raw_text") {
                Some(Value::String(s)) => Ok(s.clone()),
                _ => Err(Error::Custom(format!(
                    "field `{}` has no `raw_text` string",
                    name
                ))),
            },
            _ => Self::field(obj, name),
        }
    }
}

/// Analyzed article. Field order is the serialization order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRecord {
    pub province: String,
    pub date: String,
    pub url: String,
    pub title: AnalysisResult,
    pub lead: AnalysisResult,
    pub body: AnalysisResult,
}

impl OutputRecord {
    /// Keep pass-through fields of `input` and attach analyses.
    pub fn new(
        input: InputRecord,
        title: AnalysisResult,
        lead: AnalysisResult,
        body: AnalysisResult,
    ) -> Self {
        Self {
            province: input.province,
            date: input.date,
            url: input.url,
            title,
            lead,
            body,
        }
    }

    /// Analyses paired with their field name, in [TEXT_FIELDS] order.
    pub fn analyses(&self) -> [(&'static str, &AnalysisResult); 3] {
        [
            (TEXT_FIELDS[0], &self.title),
            (TEXT_FIELDS[1], &self.lead),
            (TEXT_FIELDS[2], &self.body),
        ]
    }

    /// Pretty JSON, four spaces indent, trailing newline.
    pub fn to_pretty_json(&self) -> Result<Vec<u8>, Error> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        buf.push(b'\n');
        Ok(buf)
    }

    /// Replace the content at `path`.
    ///
    /// Content is written to a temporary file in the same directory and then
    /// renamed over `path`, so a crash leaves either the old or the new content.
    /// A crash may leave the temporary file behind, see [is_temporary].
    pub fn write_atomic(&self, path: &Path) -> Result<(), Error> {
        let content = self.to_pretty_json()?;
        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };

        let mut tmp = tempfile::Builder::new()
            .prefix(TEMP_PREFIX)
            .suffix(".tmp")
            .tempfile_in(dir)?;
        tmp.write_all(&content)?;
        // temporary files are created 0600
        if let Ok(meta) = std::fs::metadata(path) {
            tmp.as_file().set_permissions(meta.permissions())?;
        }
        tmp.as_file().sync_all()?;
        tmp.persist(path)?;
        Ok(())
    }
}
