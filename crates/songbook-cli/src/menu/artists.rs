//! The artist menu.

use std::io::{BufRead, Write};

use chrono::NaiveDateTime;
use songbook_core::query::{ArtistFilter, ArtistSort};
use songbook_core::{Artist, Result};

use super::{Flow, Session};
use crate::table;

pub type ArtistSession<R, W> = Session<Artist, R, W>;

const MAIN_MENU: &[(&str, &str)] = &[
    ("1", "Add an artist"),
    ("2", "View an artist"),
    ("3", "Update an artist"),
    ("4", "Delete an artist"),
    ("6", "Search artists"),
    ("7", "Remove multiple artists"),
    ("8", "List artists"),
    ("", ""),
    ("9", "Load artists"),
    ("10", "Save artists"),
    ("", ""),
    ("-98", "Write seed documents"),
    ("-99", "Seed artists"),
    ("0", "Exit"),
];

const LIST_MENU: &[(&str, &str)] = &[
    ("1", "All artists"),
    ("2", "Artists by genre"),
    ("0", "Back"),
];

const REFINE_MENU: &[(&str, &str)] = &[
    ("1", "Filter results"),
    ("2", "Sort results"),
    ("0", "Done"),
];

const FILTER_MENU: &[(&str, &str)] = &[
    ("1", "Name"),
    ("2", "Founded date"),
    ("3", "Genre"),
];

const SORT_MENU: &[(&str, &str)] = &[
    ("1", "Name"),
    ("2", "Founded date"),
    ("3", "Number of genres"),
];

/// Run the artist menu until the user exits or input ends.
pub fn run<R: BufRead, W: Write>(session: &mut ArtistSession<R, W>) -> Result<()> {
    match session.api.load() {
        Ok(()) => {}
        Err(e) if e.is_bug() => return Err(e),
        Err(e) => {
            log::warn!("Starting with an empty catalog: {e}");
            session.say(format!("Could not load artists: {e}"))?;
        }
    }

    loop {
        session.say(table::menu("Artist Menu", MAIN_MENU))?;
        let flow = session.guard(|s| {
            let choice = s.read_option("Enter option: ")?;
            dispatch(s, choice)
        })?;
        if flow == Flow::Exit {
            break;
        }
    }

    log::debug!("Exiting artist menu");
    Ok(())
}

fn dispatch<R: BufRead, W: Write>(
    session: &mut ArtistSession<R, W>,
    choice: Option<i64>,
) -> Result<Flow> {
    match choice {
        Some(1) => add(session)?,
        Some(2) => session.view()?,
        Some(3) => update(session)?,
        Some(4) => session.delete()?,
        Some(6) => search(session)?,
        Some(7) => session.remove_many()?,
        Some(8) => list(session)?,
        Some(9) => session.load()?,
        Some(10) => session.save()?,
        Some(-98) => session.write_seed_files()?,
        Some(-99) => {
            session.api.seed();
            session.say("Artists seeded")?;
            session.print_all()?;
        }
        Some(0) => return Ok(Flow::Exit),
        other => invalid(session, other)?,
    }
    Ok(Flow::Continue)
}

fn invalid<R: BufRead, W: Write>(
    session: &mut ArtistSession<R, W>,
    choice: Option<i64>,
) -> Result<()> {
    match choice {
        Some(n) => session.say(format!("Invalid option entered: {n}")),
        None => session.say("Invalid option entered"),
    }
}

fn add<R: BufRead, W: Write>(session: &mut ArtistSession<R, W>) -> Result<()> {
    log::debug!("add artist invoked");

    let name: String = session.input.read("artistName", None)?;
    let founded: NaiveDateTime = session.input.read("artistFoundedDate", None)?;
    let genres: Vec<String> = session.input.read("artistGenres", None)?;

    session.api.add(Artist::new(name, founded).with_genres(genres));
    session.say("Artist added successfully")
}

fn update<R: BufRead, W: Write>(session: &mut ArtistSession<R, W>) -> Result<()> {
    log::debug!("update artist invoked");

    let Some((index, old)) = session.select_record()? else {
        return Ok(());
    };

    session.say("Enter nothing to keep previous value")?;
    let name: String = session.input.read("artistName", Some(old.name.clone()))?;
    let founded: NaiveDateTime = session.input.read("artistFoundedDate", Some(old.founded_date))?;
    let genres: Vec<String> = session.input.read("artistGenres", Some(old.genres.clone()))?;

    let updated = Artist::new(name, founded).with_genres(genres);
    if session.api.update_at(index, &updated) {
        session.say("Artist updated successfully")
    } else {
        session.say("Artist NOT updated")
    }
}

fn search<R: BufRead, W: Write>(session: &mut ArtistSession<R, W>) -> Result<()> {
    log::debug!("search artists invoked");

    let Some(mut results) = session.select_many()? else {
        return Ok(());
    };

    loop {
        session.say(table::listing("Search Results", &results, "No artists match."))?;
        session.say(table::menu("Refine", REFINE_MENU))?;
        match session.read_option("Enter option: ")? {
            Some(1) => {
                session.say(table::menu("Filter By", FILTER_MENU))?;
                let filter = match session.read_option("Enter option: ")? {
                    Some(1) => ArtistFilter::NameContains(session.input.read("artistName", None)?),
                    Some(2) => {
                        ArtistFilter::FoundedDate(session.input.read("artistFoundedDate", None)?)
                    }
                    Some(3) => ArtistFilter::Genre(session.input.read("artistGenre", None)?),
                    other => {
                        invalid(session, other)?;
                        continue;
                    }
                };
                filter.apply(&mut results);
            }
            Some(2) => {
                session.say(table::menu("Sort By", SORT_MENU))?;
                let sort = match session.read_option("Enter option: ")? {
                    Some(1) => ArtistSort::Name,
                    Some(2) => ArtistSort::FoundedDate,
                    Some(3) => ArtistSort::GenreCount,
                    other => {
                        invalid(session, other)?;
                        continue;
                    }
                };
                sort.apply(&mut results);
            }
            Some(0) => return Ok(()),
            other => invalid(session, other)?,
        }
    }
}

fn list<R: BufRead, W: Write>(session: &mut ArtistSession<R, W>) -> Result<()> {
    log::debug!("list artists invoked");

    loop {
        session.say(table::menu("List Artists", LIST_MENU))?;
        let text = match session.read_option("Enter option: ")? {
            Some(1) => table::listing("All Artists", session.api.records(), "No artists found."),
            Some(2) => {
                let genre: String = session.input.read("artistGenre", None)?;
                let count = session.api.count_by_genre(&genre);
                let artists = session.api.artists_by_genre(&genre);
                table::listing(
                    &format!("{genre} Artists ({count})"),
                    &artists,
                    &format!("No {genre} artists found."),
                )
            }
            Some(0) => return Ok(()),
            other => {
                invalid(session, other)?;
                continue;
            }
        };
        session.say(text)?;
    }
}
