//! Rounded-border text tables for menus and record listings.

use chrono::NaiveDateTime;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{ContentArrangement, Table};
use songbook_core::{Artist, Record, Song};

const DISPLAY_TIME: &str = "%Y-%m-%d %H:%M";

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Disabled);
    table
}

/// Render `table` under its title, centred over the box.
fn with_title(title: &str, table: &Table) -> String {
    let body = table.to_string();
    let width = body.lines().map(|l| l.chars().count()).max().unwrap_or(0);
    format!("{title:^width$}\n{body}")
}

fn when(ts: &NaiveDateTime) -> String {
    ts.format(DISPLAY_TIME).to_string()
}

/// A record that knows how to lay itself out as one table row.
pub trait Tabular: Record {
    /// Singular noun used in menu text, e.g. "song".
    const NOUN: &'static str;
    const PLURAL: &'static str;
    /// Registry property used when choosing a record by index.
    const INDEX_PROPERTY: &'static str;

    fn headers() -> &'static [&'static str];

    fn cells(&self) -> Vec<String>;
}

impl Tabular for Song {
    const NOUN: &'static str = "song";
    const PLURAL: &'static str = "songs";
    const INDEX_PROPERTY: &'static str = "songIndex";

    fn headers() -> &'static [&'static str] {
        &["Title", "Rating", "Category", "Explicit", "Updated At", "Created At"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.title.clone(),
            self.rating.to_string(),
            self.category.clone(),
            if self.explicit { "Yes" } else { "No" }.to_string(),
            when(&self.updated_at),
            when(&self.created_at),
        ]
    }
}

impl Tabular for Artist {
    const NOUN: &'static str = "artist";
    const PLURAL: &'static str = "artists";
    const INDEX_PROPERTY: &'static str = "artistIndex";

    fn headers() -> &'static [&'static str] {
        &["Name", "Founded", "Genres"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            when(&self.founded_date),
            self.genres.join(", "),
        ]
    }
}

/// Render records, optionally prefixed with their position in `records`.
pub fn records_table<T: Tabular>(title: &str, records: &[T], indexed: bool) -> String {
    indexed_table(title, records.iter().enumerate(), indexed)
}

/// Render records paired with caller-supplied indices.
pub fn indexed_table<'a, T, I>(title: &str, records: I, indexed: bool) -> String
where
    T: Tabular + 'a,
    I: IntoIterator<Item = (usize, &'a T)>,
{
    let headers = T::headers().iter().map(|h| (*h).to_string());
    let mut table = new_table();
    if indexed {
        table.set_header(std::iter::once("Index".to_string()).chain(headers));
    } else {
        table.set_header(headers);
    }

    for (index, record) in records {
        let cells = record.cells();
        if indexed {
            table.add_row(std::iter::once(index.to_string()).chain(cells));
        } else {
            table.add_row(cells);
        }
    }
    with_title(title, &table)
}

/// A listing, or `empty` when there is nothing to show.
pub fn listing<T: Tabular>(title: &str, records: &[T], empty: &str) -> String {
    if records.is_empty() {
        empty.to_string()
    } else {
        records_table(title, records, false)
    }
}

/// A two-column numbered menu; blank entries render as spacer rows.
pub fn menu(title: &str, entries: &[(&str, &str)]) -> String {
    let mut table = new_table();
    for (key, label) in entries {
        table.add_row([*key, *label]);
    }
    with_title(title, &table)
}
