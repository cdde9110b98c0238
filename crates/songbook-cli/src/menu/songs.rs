//! The song menu.

use std::io::{BufRead, Write};

use chrono::NaiveDateTime;
use songbook_core::query::{SongFilter, SongSort};
use songbook_core::{Result, Song};

use super::{Flow, Session};
use crate::table;

pub type SongSession<R, W> = Session<Song, R, W>;

const MAIN_MENU: &[(&str, &str)] = &[
    ("1", "Add a song"),
    ("2", "View a song"),
    ("3", "Update a song"),
    ("4", "Delete a song"),
    ("5", "Set a song to explicit"),
    ("6", "Search songs"),
    ("7", "Remove multiple songs"),
    ("8", "List songs"),
    ("", ""),
    ("9", "Load songs"),
    ("10", "Save songs"),
    ("", ""),
    ("-98", "Write seed documents"),
    ("-99", "Seed songs"),
    ("0", "Exit"),
];

const LIST_MENU: &[(&str, &str)] = &[
    ("1", "All songs"),
    ("2", "Clean songs"),
    ("3", "Explicit songs"),
    ("4", "Songs by rating"),
    ("5", "Stale songs"),
    ("6", "Important songs"),
    ("0", "Back"),
];

const REFINE_MENU: &[(&str, &str)] = &[
    ("1", "Filter results"),
    ("2", "Sort results"),
    ("0", "Done"),
];

const FIELD_MENU: &[(&str, &str)] = &[
    ("1", "Title"),
    ("2", "Rating"),
    ("3", "Category"),
    ("4", "Explicit"),
    ("5", "Updated at"),
    ("6", "Created at"),
];

/// Run the song menu until the user exits or input ends.
pub fn run<R: BufRead, W: Write>(session: &mut SongSession<R, W>) -> Result<()> {
    match session.api.load() {
        Ok(()) => {}
        Err(e) if e.is_bug() => return Err(e),
        Err(e) => {
            log::warn!("Starting with an empty catalog: {e}");
            session.say(format!("Could not load songs: {e}"))?;
        }
    }

    loop {
        session.say(table::menu("Song Menu", MAIN_MENU))?;
        let flow = session.guard(|s| {
            let choice = s.read_option("Enter option: ")?;
            dispatch(s, choice)
        })?;
        if flow == Flow::Exit {
            break;
        }
    }

    log::debug!("Exiting song menu");
    Ok(())
}

fn dispatch<R: BufRead, W: Write>(
    session: &mut SongSession<R, W>,
    choice: Option<i64>,
) -> Result<Flow> {
    match choice {
        Some(1) => add(session)?,
        Some(2) => session.view()?,
        Some(3) => update(session)?,
        Some(4) => session.delete()?,
        Some(5) => explicitify(session)?,
        Some(6) => search(session)?,
        Some(7) => session.remove_many()?,
        Some(8) => list(session)?,
        Some(9) => session.load()?,
        Some(10) => session.save()?,
        Some(-98) => session.write_seed_files()?,
        Some(-99) => seed(session)?,
        Some(0) => return Ok(Flow::Exit),
        other => invalid(session, other)?,
    }
    Ok(Flow::Continue)
}

fn invalid<R: BufRead, W: Write>(
    session: &mut SongSession<R, W>,
    choice: Option<i64>,
) -> Result<()> {
    match choice {
        Some(n) => session.say(format!("Invalid option entered: {n}")),
        None => session.say("Invalid option entered"),
    }
}

fn add<R: BufRead, W: Write>(session: &mut SongSession<R, W>) -> Result<()> {
    log::debug!("add song invoked");

    let title: String = session.input.read("songTitle", None)?;
    let rating: u8 = session.input.read("songRating", None)?;
    let category: String = session.input.read("songCategory", None)?;
    let explicit: bool = session.input.read("isSongExplicit", None)?;

    session.api.add(Song::new(title, rating, category, explicit));
    session.say("Song added successfully")
}

fn update<R: BufRead, W: Write>(session: &mut SongSession<R, W>) -> Result<()> {
    log::debug!("update song invoked");

    let Some((index, old)) = session.select_record()? else {
        return Ok(());
    };

    session.say("Enter nothing to keep previous value")?;
    let title: String = session.input.read("songTitle", Some(old.title.clone()))?;
    let rating: u8 = session.input.read("songRating", Some(old.rating))?;
    let category: String = session.input.read("songCategory", Some(old.category.clone()))?;
    let explicit: bool = session.input.read("isSongExplicit", Some(old.explicit))?;

    let updated = Song::new(title, rating, category, explicit);
    if session.api.update_at(index, &updated) {
        session.say("Song updated successfully")
    } else {
        session.say("Song NOT updated")
    }
}

fn explicitify<R: BufRead, W: Write>(session: &mut SongSession<R, W>) -> Result<()> {
    log::debug!("explicitify song invoked");

    let Some(index) = session.select_index(Some("Enter index of song to make explicit: "))? else {
        return Ok(());
    };
    if session.api.explicitify(index) {
        session.say("Song is now explicit")
    } else {
        session.say("Song NOT updated")
    }
}

fn seed<R: BufRead, W: Write>(session: &mut SongSession<R, W>) -> Result<()> {
    session.api.seed();
    session.say("Songs seeded")?;
    session.print_all()
}

fn search<R: BufRead, W: Write>(session: &mut SongSession<R, W>) -> Result<()> {
    log::debug!("search songs invoked");

    let Some(mut results) = session.select_many()? else {
        return Ok(());
    };

    loop {
        session.say(table::listing("Search Results", &results, "No songs match."))?;
        session.say(table::menu("Refine", REFINE_MENU))?;
        match session.read_option("Enter option: ")? {
            Some(1) => {
                if let Some(filter) = choose_filter(session)? {
                    filter.apply(&mut results);
                }
            }
            Some(2) => {
                if let Some(sort) = choose_sort(session)? {
                    sort.apply(&mut results);
                }
            }
            Some(0) => return Ok(()),
            other => invalid(session, other)?,
        }
    }
}

fn choose_filter<R: BufRead, W: Write>(
    session: &mut SongSession<R, W>,
) -> Result<Option<SongFilter>> {
    session.say(table::menu("Filter By", FIELD_MENU))?;
    let filter = match session.read_option("Enter option: ")? {
        Some(1) => SongFilter::TitleContains(session.input.read("songTitle", None)?),
        Some(2) => SongFilter::Rating(session.input.read("songRating", None)?),
        Some(3) => SongFilter::Category(session.input.read("songCategory", None)?),
        Some(4) => SongFilter::Explicit(session.input.read("isSongExplicit", None)?),
        Some(5) => SongFilter::UpdatedAt(session.input.read::<NaiveDateTime>("updatedAt", None)?),
        Some(6) => SongFilter::CreatedAt(session.input.read::<NaiveDateTime>("createdAt", None)?),
        other => {
            invalid(session, other)?;
            return Ok(None);
        }
    };
    Ok(Some(filter))
}

fn choose_sort<R: BufRead, W: Write>(session: &mut SongSession<R, W>) -> Result<Option<SongSort>> {
    session.say(table::menu("Sort By", FIELD_MENU))?;
    let sort = match session.read_option("Enter option: ")? {
        Some(1) => SongSort::Title,
        Some(2) => SongSort::Rating,
        Some(3) => SongSort::Category,
        Some(4) => SongSort::Explicit,
        Some(5) => SongSort::UpdatedAt,
        Some(6) => SongSort::CreatedAt,
        other => {
            invalid(session, other)?;
            return Ok(None);
        }
    };
    Ok(Some(sort))
}

fn list<R: BufRead, W: Write>(session: &mut SongSession<R, W>) -> Result<()> {
    log::debug!("list songs invoked");

    loop {
        session.say(table::menu("List Songs", LIST_MENU))?;
        let text = match session.read_option("Enter option: ")? {
            Some(1) => table::listing("All Songs", session.api.records(), "No songs found."),
            Some(2) => {
                let count = session.api.count_clean();
                let songs = session.api.clean_songs();
                table::listing(&format!("Clean Songs ({count})"), &songs, "No clean songs found.")
            }
            Some(3) => {
                let count = session.api.count_explicit();
                let songs = session.api.explicit_songs();
                table::listing(
                    &format!("Explicit Songs ({count})"),
                    &songs,
                    "No explicit songs found.",
                )
            }
            Some(4) => {
                let rating: u8 = session.input.read("songRating", None)?;
                let songs = session.api.songs_by_rating(rating);
                table::listing(
                    &format!("Songs Rated {rating} ({})", songs.len()),
                    &songs,
                    &format!("No songs with rating {rating} found."),
                )
            }
            Some(5) => {
                let days: u32 = session.input.read("staleDays", None)?;
                let songs = session.api.stale_songs(days);
                table::listing(
                    &format!("Not Updated In {days} Days ({})", songs.len()),
                    &songs,
                    "No stale songs found.",
                )
            }
            Some(6) => {
                let count = session.api.count_important();
                let songs = session.api.important_songs();
                table::listing(
                    &format!("Important Songs ({count})"),
                    &songs,
                    "No important songs found.",
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
