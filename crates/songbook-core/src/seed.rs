//! Fixed bootstrap catalog for demos and tests.

use std::fs;
use std::path::Path;

use chrono::NaiveDateTime;

use crate::error::Result;
use crate::model::{parse_timestamp, Artist, Song};
use crate::persistence::Format;
use crate::repository::Repository;

/// Literal timestamps below are well-formed; an unparsable one falls back
/// to the epoch rather than panicking.
fn at(s: &str) -> NaiveDateTime {
    parse_timestamp(s).unwrap_or_default()
}

fn song(
    title: &str,
    rating: u8,
    category: &str,
    explicit: bool,
    updated: &str,
    created: &str,
) -> Song {
    Song::new(title, rating, category, explicit).with_timestamps(at(updated), at(created))
}

pub fn songs() -> Vec<Song> {
    vec![
        song("Smooth", 3, "Latin", false, "2023-03-10T10:00", "2023-03-10T10:00"),
        song("Lose Yourself", 1, "Hip Hop", false, "2023-03-12T15:30", "2023-03-11T13:00"),
        song(
            "Ain't No Mountain High Enough",
            2,
            "Soul",
            false,
            "2023-03-14T18:45",
            "2023-03-14T17:30",
        ),
        song("Highway to Hell", 4, "Rock", false, "2023-03-09T11:30", "2023-03-09T11:00"),
        song("Sweet Child o' Mine", 5, "Rock", true, "2023-03-08T12:15", "2023-03-08T12:00"),
        song("Livin' on a Prayer", 1, "Rock", false, "2023-03-10T20:00", "2023-03-10T19:30"),
        song("Billie Jean", 3, "Pop", true, "2023-03-11T14:00", "2023-03-11T13:45"),
        song("The Power of Love", 1, "Pop", false, "2023-03-15T16:00", "2023-03-15T14:30"),
        song("Sweet Home Alabama", 2, "Country", false, "2023-03-12T17:15", "2023-03-12T16:45"),
        song("Enter Sandman", 4, "Metal", false, "2023-03-14T10:30", "2023-03-14T10:00"),
        song("Beat It", 3, "Rock", false, "2023-02-14T10:30", "2023-02-14T10:00"),
    ]
}

pub fn artists() -> Vec<Artist> {
    vec![
        Artist::new("Michael Jackson", at("1964-02-14T10:30")).with_genres(["Pop", "Rock", "Funk"]),
        Artist::new("AC/DC", at("1973-02-14T10:30")).with_genres(["Rock", "Metal"]),
        Artist::new("Eminem", at("1988-02-14T10:30")).with_genres(["Hip Hop", "Rap"]),
        Artist::new("Guns N' Roses", at("1985-02-14T10:30")).with_genres(["Rock", "Metal"]),
        Artist::new("The Beatles", at("1960-02-14T10:30")).with_genres(["Rock", "Pop"]),
        Artist::new("Ariana Grande", at("2008-02-14T10:30")).with_genres(["Pop", "R&B"]),
        Artist::new("Kendrick Lamar", at("2004-02-14T10:30")).with_genres(["Hip Hop", "Rap"]),
        Artist::new("Taylor Swift", at("2004-02-14T10:30")).with_genres(["Pop", "Country"]),
    ]
}

/// Write the seed catalog to `dir` in every format, six documents in all.
pub fn write_seed_files(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)?;

    for format in Format::ALL {
        let path = format.document_path::<Song>(dir);
        let mut songs = Repository::<Song>::new(format.serializer(path));
        songs.seed();
        songs.store()?;

        let mut artists =
            Repository::<Artist>::new(format.serializer(format.document_path::<Artist>(dir)));
        artists.seed();
        artists.store()?;
    }

    log::info!("Wrote seed documents to {}", dir.display());
    Ok(())
}
