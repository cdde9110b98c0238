use std::fs;
use std::path::{Path, PathBuf};

use quick_xml::events::{BytesText, Event};
use quick_xml::{Reader, Writer};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::Record;
use crate::persistence::{accept, ensure_encodable, Format, Serializer};

const DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// XML rooted at the collection name, one `<record>` element per entry:
///
/// ```xml
/// <songs kind="song">
///   <record><title>Smooth</title>...</record>
/// </songs>
/// ```
#[derive(Debug, Clone)]
pub struct XmlSerializer {
    path: PathBuf,
}

impl XmlSerializer {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[derive(Serialize)]
struct XmlDocumentRef<'a, R> {
    #[serde(rename = "@kind")]
    kind: &'a str,
    #[serde(rename = "record")]
    records: &'a [R],
}

#[derive(Deserialize)]
struct XmlDocument<R> {
    #[serde(rename = "@kind")]
    kind: String,
    #[serde(rename = "record", default = "Vec::new")]
    records: Vec<R>,
}

fn encode_error(e: impl ToString) -> Error {
    Error::Encode {
        format: "xml",
        message: e.to_string(),
    }
}

impl<R: Record> Serializer<R> for XmlSerializer {
    fn format(&self) -> Format {
        Format::Xml
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Vec<R>> {
        let text = fs::read_to_string(&self.path).map_err(|e| Error::corrupt(&self.path, e))?;
        let document: XmlDocument<R> =
            quick_xml::de::from_str(&text).map_err(|e| Error::corrupt(&self.path, e))?;
        accept(&document.kind, document.records, &self.path)
    }

    fn write(&self, records: &[R]) -> Result<()> {
        ensure_encodable(Format::Xml, records)?;
        let document = XmlDocumentRef {
            kind: R::KIND,
            records,
        };

        let mut body = String::new();
        let mut serializer = quick_xml::se::Serializer::with_root(&mut body, Some(R::COLLECTION))
            .map_err(encode_error)?;
        serializer.indent(' ', 2);
        document.serialize(serializer).map_err(encode_error)?;
        let body = protect_outer_whitespace(&body)?;

        fs::write(&self.path, format!("{DECLARATION}\n{body}\n"))?;
        Ok(())
    }
}

/// The deserializer trims literal whitespace at both ends of element text,
/// so leaf text keeps its outer whitespace as character references.
/// Indentation between elements is copied unchanged.
fn protect_outer_whitespace(body: &str) -> Result<String> {
    let mut reader = Reader::from_str(body);
    let mut writer = Writer::new(Vec::new());
    let mut after_start = false;
    let mut pending: Option<BytesText<'_>> = None;

    loop {
        let event = reader.read_event().map_err(encode_error)?;

        if let Some(text) = pending.take() {
            let text = if matches!(event, Event::End(_)) {
                let raw = std::str::from_utf8(&text).map_err(encode_error)?;
                BytesText::from_escaped(escape_outer(raw))
            } else {
                text
            };
            writer.write_event(Event::Text(text)).map_err(encode_error)?;
        }

        match event {
            Event::Eof => break,
            Event::Text(text) if after_start => {
                after_start = false;
                pending = Some(text);
            }
            other => {
                after_start = matches!(other, Event::Start(_));
                writer.write_event(other).map_err(encode_error)?;
            }
        }
    }

    String::from_utf8(writer.into_inner()).map_err(encode_error)
}

fn is_xml_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

fn escape_outer(raw: &str) -> String {
    let rest = raw.trim_start_matches(is_xml_space);
    let lead = &raw[..raw.len() - rest.len()];
    let core = rest.trim_end_matches(is_xml_space);
    let trail = &rest[core.len()..];

    let mut out: String = lead.chars().map(char_ref).collect();
    out.push_str(core);
    out.extend(trail.chars().map(char_ref));
    out
}

fn char_ref(c: char) -> String {
    format!("&#x{:X};", u32::from(c))
}
