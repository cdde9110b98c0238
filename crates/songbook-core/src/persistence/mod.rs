//! Serializer contract and its XML, JSON and YAML codecs.
//!
//! Every codec writes the whole ordered collection to one file, replacing
//! whatever was there, and tags the document with the record kind so that a
//! songs document read as artists is reported as corrupt instead of being
//! half-decoded.

mod json;
mod xml;
mod yaml;

pub use json::JsonSerializer;
pub use xml::XmlSerializer;
pub use yaml::YamlSerializer;

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::Record;

/// Reads and writes a whole collection of one record type.
///
/// Implementations are interchangeable: a repository behaves the same
/// whichever one it holds.
pub trait Serializer<R: Record>: fmt::Debug {
    fn format(&self) -> Format;

    fn path(&self) -> &Path;

    /// Decode the document. An empty document yields an empty collection;
    /// a missing, unreadable or mistyped one is [`Error::CorruptDocument`].
    fn read(&self) -> Result<Vec<R>>;

    /// Replace the document with `records`, in order.
    fn write(&self, records: &[R]) -> Result<()>;
}

/// On-disk document format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Xml,
    Json,
    Yaml,
}

impl Format {
    pub const ALL: [Self; 3] = [Self::Xml, Self::Json, Self::Yaml];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Xml => "xml",
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }

    pub const fn extension(self) -> &'static str {
        self.name()
    }

    /// `<dir>/<collection>.<ext>`, e.g. `songs.yaml`.
    pub fn document_path<R: Record>(self, dir: &Path) -> PathBuf {
        dir.join(format!("{}.{}", R::COLLECTION, self.extension()))
    }

    /// A boxed codec for this format bound to `path`.
    pub fn serializer<R: Record + 'static>(
        self,
        path: impl Into<PathBuf>,
    ) -> Box<dyn Serializer<R>> {
        let path = path.into();
        match self {
            Self::Xml => Box::new(XmlSerializer::new(path)),
            Self::Json => Box::new(JsonSerializer::new(path)),
            Self::Yaml => Box::new(YamlSerializer::new(path)),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "xml" => Ok(Self::Xml),
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => Err(Error::UnknownFormat(s.to_string())),
        }
    }
}

/// Envelope shared by the JSON and YAML codecs.
#[derive(Serialize)]
struct DocumentRef<'a, R> {
    kind: &'a str,
    records: &'a [R],
}

#[derive(Deserialize)]
struct Document<R> {
    kind: String,
    #[serde(default = "Vec::new")]
    records: Vec<R>,
}

impl<'a, R: Record> DocumentRef<'a, R> {
    fn new(records: &'a [R]) -> Self {
        Self {
            kind: R::KIND,
            records,
        }
    }
}

impl<R: Record> Document<R> {
    fn into_records(self, path: &Path) -> Result<Vec<R>> {
        accept(&self.kind, self.records, path)
    }
}

fn check_kind<R: Record>(kind: &str, path: &Path) -> Result<()> {
    if kind == R::KIND {
        Ok(())
    } else {
        Err(Error::corrupt(
            path,
            format!("expected {} records, found {kind:?}", R::KIND),
        ))
    }
}

fn first_invalid<R: Record>(records: &[R]) -> std::result::Result<(), String> {
    records
        .iter()
        .enumerate()
        .try_for_each(|(i, record)| record.validate().map_err(|e| format!("record {i}: {e}")))
}

/// Final check on a decoded document: right kind, and every record valid.
fn accept<R: Record>(kind: &str, records: Vec<R>, path: &Path) -> Result<Vec<R>> {
    check_kind::<R>(kind, path)?;
    first_invalid(&records).map_err(|message| Error::corrupt(path, message))?;
    Ok(records)
}

/// Refuse to write a document that could not be read back.
fn ensure_encodable<R: Record>(format: Format, records: &[R]) -> Result<()> {
    first_invalid(records).map_err(|message| Error::Encode {
        format: format.name(),
        message,
    })
}
