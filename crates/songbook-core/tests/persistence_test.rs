//! Round-trip tests for every codec through the repository.
//!
//! Each test writes into its own temporary directory.

use std::fs;
use std::path::Path;

use songbook_core::model::parse_timestamp;
use songbook_core::{seed, Artist, ArtistApi, Error, Format, Record, Repository, Song, SongApi};
use tempfile::TempDir;

fn songs_api(format: Format, dir: &Path) -> SongApi {
    Repository::new(format.serializer(format.document_path::<Song>(dir)))
}

fn artists_api(format: Format, dir: &Path) -> ArtistApi {
    Repository::new(format.serializer(format.document_path::<Artist>(dir)))
}

fn precise_song() -> Song {
    let updated = parse_timestamp("2023-03-09T11:30:15.123456789").unwrap();
    let created = parse_timestamp("2023-03-09T11:30:00").unwrap();
    Song::new("Guns & <Roses> \"live\"", 5, "Rock", true).with_timestamps(updated, created)
}

fn padded_song() -> Song {
    let at = parse_timestamp("2023-03-09T11:30").unwrap();
    Song::new("  padded  ", 2, " Rock", false).with_timestamps(at, at)
}

fn padded_artist() -> Artist {
    let founded = parse_timestamp("1999-01-01T00:00").unwrap();
    Artist::new(" Spaced Out\t", founded).with_genres([" Rock", "Hip Hop ", "\nJazz"])
}

#[test]
fn test_empty_collection_round_trips_in_every_format() {
    for format in Format::ALL {
        let dir = TempDir::new().unwrap();

        let storing = songs_api(format, dir.path());
        storing.store().unwrap();

        let mut loaded = songs_api(format, dir.path());
        loaded.seed();
        loaded.load().unwrap();

        assert_eq!(loaded.len(), 0, "{format} empty songs");

        let storing = artists_api(format, dir.path());
        storing.store().unwrap();
        let mut loaded = artists_api(format, dir.path());
        loaded.load().unwrap();
        assert_eq!(loaded.len(), 0, "{format} empty artists");
    }
}

#[test]
fn test_seeded_songs_round_trip_in_every_format() {
    for format in Format::ALL {
        let dir = TempDir::new().unwrap();

        let mut storing = songs_api(format, dir.path());
        storing.seed();
        storing.add(precise_song());
        storing.add(padded_song());
        storing.store().unwrap();

        let mut loaded = songs_api(format, dir.path());
        loaded.load().unwrap();

        assert_eq!(loaded.len(), storing.len(), "{format}");
        assert_eq!(loaded.find_all(), storing.find_all(), "{format}");
    }
}

#[test]
fn test_seeded_artists_round_trip_in_every_format() {
    for format in Format::ALL {
        let dir = TempDir::new().unwrap();

        let mut storing = artists_api(format, dir.path());
        storing.seed();
        storing.store().unwrap();

        let mut loaded = artists_api(format, dir.path());
        loaded.load().unwrap();

        assert_eq!(loaded.find_all(), seed::artists(), "{format}");
        assert_eq!(
            loaded.find(0).unwrap().genres,
            vec!["Pop", "Rock", "Funk"],
            "{format} genre order"
        );
    }
}

#[test]
fn test_sub_second_precision_survives() {
    for format in Format::ALL {
        let dir = TempDir::new().unwrap();
        let song = precise_song();

        let mut storing = songs_api(format, dir.path());
        storing.add(song.clone());
        storing.store().unwrap();

        let mut loaded = songs_api(format, dir.path());
        loaded.load().unwrap();

        assert_eq!(loaded.find(0).unwrap().updated_at, song.updated_at, "{format}");
    }
}

#[test]
fn test_store_is_idempotent() {
    for format in Format::ALL {
        let dir = TempDir::new().unwrap();
        let path = format.document_path::<Song>(dir.path());

        let mut api = songs_api(format, dir.path());
        api.seed();

        api.store().unwrap();
        let first = fs::read(&path).unwrap();
        api.store().unwrap();
        let second = fs::read(&path).unwrap();

        assert_eq!(first, second, "{format}");
    }
}

#[test]
fn test_store_overwrites_previous_document() {
    for format in Format::ALL {
        let dir = TempDir::new().unwrap();

        let mut api = songs_api(format, dir.path());
        api.seed();
        api.store().unwrap();

        let mut smaller = songs_api(format, dir.path());
        smaller.add(precise_song());
        smaller.store().unwrap();

        let mut loaded = songs_api(format, dir.path());
        loaded.load().unwrap();
        assert_eq!(loaded.find_all(), vec![precise_song()], "{format}");
    }
}

#[test]
fn test_reading_songs_document_as_artists_is_corrupt() {
    for format in Format::ALL {
        let dir = TempDir::new().unwrap();
        let songs_path = format.document_path::<Song>(dir.path());

        let mut songs = songs_api(format, dir.path());
        songs.seed();
        songs.store().unwrap();

        let mut artists: ArtistApi = Repository::new(format.serializer(&songs_path));
        artists.seed();
        let result = artists.load();

        assert!(
            matches!(result, Err(Error::CorruptDocument { .. })),
            "{format}: {result:?}"
        );
        assert_eq!(artists.len(), 8, "{format}: state must be untouched");
    }
}

#[test]
fn test_missing_document_is_corrupt() {
    for format in Format::ALL {
        let dir = TempDir::new().unwrap();
        let mut api = songs_api(format, dir.path());

        assert!(matches!(api.load(), Err(Error::CorruptDocument { .. })), "{format}");
        assert!(api.is_empty());
    }
}

#[test]
fn test_garbage_document_is_corrupt() {
    for format in Format::ALL {
        let dir = TempDir::new().unwrap();
        let path = format.document_path::<Song>(dir.path());
        fs::write(&path, "{{{ <not a document").unwrap();

        let mut api = songs_api(format, dir.path());
        assert!(matches!(api.load(), Err(Error::CorruptDocument { .. })), "{format}");
    }
}

#[test]
fn test_store_into_missing_directory_fails() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope");

    for format in Format::ALL {
        let api = songs_api(format, &missing);
        assert!(matches!(api.store(), Err(Error::Io(_))), "{format}");
    }
}

#[test]
fn test_documents_are_tagged_with_record_kind() {
    let dir = TempDir::new().unwrap();
    let mut api = songs_api(Format::Json, dir.path());
    api.seed();
    api.store().unwrap();

    let text = fs::read_to_string(Format::Json.document_path::<Song>(dir.path())).unwrap();
    assert!(text.contains(&format!("\"kind\": \"{}\"", Song::KIND)));

    let xml_api = songs_api(Format::Xml, dir.path());
    xml_api.store().unwrap();
    let xml = fs::read_to_string(Format::Xml.document_path::<Song>(dir.path())).unwrap();
    assert!(xml.contains("<songs kind=\"song\""));
}

#[test]
fn test_outer_whitespace_survives_every_format() {
    for format in Format::ALL {
        let dir = TempDir::new().unwrap();

        let mut storing = artists_api(format, dir.path());
        storing.add(padded_artist());
        storing.store().unwrap();

        let mut loaded = artists_api(format, dir.path());
        loaded.load().unwrap();
        assert_eq!(loaded.find_all(), vec![padded_artist()], "{format}");
    }
}

#[test]
fn test_records_breaking_field_rules_are_corrupt_in_every_format() {
    let cases = [
        (
            Format::Json,
            r#"{"kind":"song","records":[{"title":"Smooth","rating":9,"category":"Latin","explicit":false,"updatedAt":"2023-03-10T10:00:00","createdAt":"2023-03-10T10:00:00"}]}"#,
        ),
        (
            Format::Yaml,
            "kind: song\nrecords:\n- title: ''\n  rating: 3\n  category: Latin\n  explicit: false\n  updatedAt: 2023-03-10T10:00:00\n  createdAt: 2023-03-10T10:00:00\n",
        ),
        (
            Format::Xml,
            r#"<songs kind="song"><record><title>Smooth</title><rating>3</rating><category> </category><explicit>false</explicit><updatedAt>2023-03-10T10:00:00</updatedAt><createdAt>2023-03-10T10:00:00</createdAt></record></songs>"#,
        ),
    ];

    for (format, text) in cases {
        let dir = TempDir::new().unwrap();
        fs::write(format.document_path::<Song>(dir.path()), text).unwrap();

        let mut api = songs_api(format, dir.path());
        api.seed();
        let result = api.load();

        assert!(matches!(result, Err(Error::CorruptDocument { .. })), "{format}: {result:?}");
        assert_eq!(api.len(), 11, "{format}");
    }
}

#[test]
fn test_genre_with_comma_is_refused_on_store_and_load() {
    let dir = TempDir::new().unwrap();
    let founded = parse_timestamp("1973-02-14T10:30").unwrap();

    let mut api = artists_api(Format::Json, dir.path());
    api.add(Artist::new("AC/DC", founded).with_genre("Rock, Metal"));
    assert!(matches!(api.store(), Err(Error::Encode { .. })));

    fs::write(
        Format::Json.document_path::<Artist>(dir.path()),
        r#"{"kind":"artist","records":[{"name":"AC/DC","foundedDate":"1973-02-14T10:30:00","genres":["Rock, Metal"]}]}"#,
    )
    .unwrap();
    assert!(matches!(api.load(), Err(Error::CorruptDocument { .. })));
}

