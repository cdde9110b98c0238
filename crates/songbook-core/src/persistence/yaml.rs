use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::model::Record;
use crate::persistence::{ensure_encodable, Document, DocumentRef, Format, Serializer};

/// YAML mapping with a `kind` key and a `records` sequence.
#[derive(Debug, Clone)]
pub struct YamlSerializer {
    path: PathBuf,
}

impl YamlSerializer {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl<R: Record> Serializer<R> for YamlSerializer {
    fn format(&self) -> Format {
        Format::Yaml
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Vec<R>> {
        let file = File::open(&self.path).map_err(|e| Error::corrupt(&self.path, e))?;
        let document: Document<R> = serde_yaml::from_reader(BufReader::new(file))
            .map_err(|e| Error::corrupt(&self.path, e))?;
        document.into_records(&self.path)
    }

    fn write(&self, records: &[R]) -> Result<()> {
        ensure_encodable(Format::Yaml, records)?;
        let mut writer = BufWriter::new(File::create(&self.path)?);
        serde_yaml::to_writer(&mut writer, &DocumentRef::new(records)).map_err(|e| {
            Error::Encode {
                format: "yaml",
                message: e.to_string(),
            }
        })?;
        writer.flush()?;
        Ok(())
    }
}
