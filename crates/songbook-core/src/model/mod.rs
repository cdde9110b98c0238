pub mod artist;
pub mod song;

pub use artist::Artist;
pub use song::Song;

use std::fmt::Debug;

use chrono::{Local, NaiveDateTime};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Canonical textual form of a timestamp, used for prompts and for the
/// "keep previous value" substitution.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Accepted input layouts, tried in order. Seconds are optional.
const TIMESTAMP_LAYOUTS: &[&str] = &[TIMESTAMP_FORMAT, "%Y-%m-%dT%H:%M"];

/// A catalog entity that can live in a [`Repository`](crate::Repository)
/// and be written by any [`Serializer`](crate::Serializer).
///
/// The associated constants are the schema descriptor each codec uses to
/// tag a document, so a songs document is never silently read as artists.
pub trait Record: Clone + PartialEq + Debug + Serialize + DeserializeOwned {
    /// Element kind recorded in every document, e.g. `"song"`.
    const KIND: &'static str;

    /// Collection name, used as the XML root tag and the document file stem.
    const COLLECTION: &'static str;

    /// Overwrite the user-editable fields of `self` with those of `other`.
    fn apply_update(&mut self, other: &Self, now: NaiveDateTime);

    /// Check the field constraints the input pipeline enforces, so a record
    /// read from disk can always be edited with "keep previous value".
    fn validate(&self) -> Result<(), String>;
}

/// Non-blank after trimming.
pub(crate) fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

/// The current local instant, at full precision.
#[must_use]
pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Parse a timestamp in `YYYY-MM-DDTHH:MM[:SS[.fff]]` form.
#[must_use]
pub fn parse_timestamp(input: &str) -> Option<NaiveDateTime> {
    TIMESTAMP_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(input, layout).ok())
}

/// Render a timestamp in the canonical form accepted by [`parse_timestamp`].
#[must_use]
pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}
