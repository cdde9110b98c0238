//! Narrowing and ordering of record lists for search screens.
//!
//! Filters work on owned snapshots (see [`Repository::find_all`]) so the
//! repository itself is never reordered.
//!
//! [`Repository::find_all`]: crate::Repository::find_all

use std::cmp::Reverse;

use chrono::NaiveDateTime;

use crate::model::{Artist, Song};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SongFilter {
    /// Case-insensitive substring of the title.
    TitleContains(String),
    Rating(u8),
    Category(String),
    Explicit(bool),
    UpdatedAt(NaiveDateTime),
    CreatedAt(NaiveDateTime),
}

impl SongFilter {
    pub fn matches(&self, song: &Song) -> bool {
        match self {
            Self::TitleContains(needle) => {
                song.title.to_lowercase().contains(&needle.to_lowercase())
            }
            Self::Rating(rating) => song.rating == *rating,
            Self::Category(category) => song.category == *category,
            Self::Explicit(explicit) => song.explicit == *explicit,
            Self::UpdatedAt(ts) => song.updated_at == *ts,
            Self::CreatedAt(ts) => song.created_at == *ts,
        }
    }

    pub fn apply(&self, songs: &mut Vec<Song>) {
        songs.retain(|s| self.matches(s));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SongSort {
    Title,
    /// Highest rating first.
    Rating,
    Category,
    Explicit,
    UpdatedAt,
    CreatedAt,
}

impl SongSort {
    /// Stable sort, so equal keys keep their catalog order.
    pub fn apply(self, songs: &mut [Song]) {
        match self {
            Self::Title => songs.sort_by(|a, b| a.title.cmp(&b.title)),
            Self::Rating => songs.sort_by_key(|s| Reverse(s.rating)),
            Self::Category => songs.sort_by(|a, b| a.category.cmp(&b.category)),
            Self::Explicit => songs.sort_by_key(|s| s.explicit),
            Self::UpdatedAt => songs.sort_by_key(|s| s.updated_at),
            Self::CreatedAt => songs.sort_by_key(|s| s.created_at),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtistFilter {
    /// Case-insensitive substring of the name.
    NameContains(String),
    FoundedDate(NaiveDateTime),
    Genre(String),
}

impl ArtistFilter {
    pub fn matches(&self, artist: &Artist) -> bool {
        match self {
            Self::NameContains(needle) => {
                artist.name.to_lowercase().contains(&needle.to_lowercase())
            }
            Self::FoundedDate(ts) => artist.founded_date == *ts,
            Self::Genre(genre) => artist.has_genre(genre),
        }
    }

    pub fn apply(&self, artists: &mut Vec<Artist>) {
        artists.retain(|a| self.matches(a));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtistSort {
    Name,
    FoundedDate,
    /// Most genres first.
    GenreCount,
}

impl ArtistSort {
    pub fn apply(self, artists: &mut [Artist]) {
        match self {
            Self::Name => artists.sort_by(|a, b| a.name.cmp(&b.name)),
            Self::FoundedDate => artists.sort_by_key(|a| a.founded_date),
            Self::GenreCount => artists.sort_by_key(|a| Reverse(a.genres.len())),
        }
    }
}
