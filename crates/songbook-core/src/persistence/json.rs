use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::model::Record;
use crate::persistence::{ensure_encodable, Document, DocumentRef, Format, Serializer};

/// Pretty-printed JSON: `{"kind": "song", "records": [...]}`.
#[derive(Debug, Clone)]
pub struct JsonSerializer {
    path: PathBuf,
}

impl JsonSerializer {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl<R: Record> Serializer<R> for JsonSerializer {
    fn format(&self) -> Format {
        Format::Json
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Vec<R>> {
        let file = File::open(&self.path).map_err(|e| Error::corrupt(&self.path, e))?;
        let document: Document<R> = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| Error::corrupt(&self.path, e))?;
        document.into_records(&self.path)
    }

    fn write(&self, records: &[R]) -> Result<()> {
        ensure_encodable(Format::Json, records)?;
        let mut writer = BufWriter::new(File::create(&self.path)?);
        serde_json::to_writer_pretty(&mut writer, &DocumentRef::new(records)).map_err(|e| {
            Error::Encode {
                format: "json",
                message: e.to_string(),
            }
        })?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }
}
