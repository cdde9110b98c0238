use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::model::{is_blank, Record};

/// A music artist or band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artist {
    pub name: String,
    pub founded_date: NaiveDateTime,

    /// Ordered, at least one entry once validated.
    #[serde(default)]
    pub genres: Vec<String>,
}

impl Artist {
    #[must_use]
    pub fn new(name: impl Into<String>, founded_date: NaiveDateTime) -> Self {
        Self {
            name: name.into(),
            founded_date,
            genres: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genres.push(genre.into());
        self
    }

    #[must_use]
    pub fn with_genres<I, S>(mut self, genres: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.genres.extend(genres.into_iter().map(Into::into));
        self
    }

    /// Case-insensitive genre membership.
    pub fn has_genre(&self, genre: &str) -> bool {
        self.genres.iter().any(|g| g.eq_ignore_ascii_case(genre))
    }
}

impl Record for Artist {
    const KIND: &'static str = "artist";
    const COLLECTION: &'static str = "artists";

    fn apply_update(&mut self, other: &Self, _now: NaiveDateTime) {
        self.name.clone_from(&other.name);
        self.founded_date = other.founded_date;
        self.genres.clone_from(&other.genres);
    }

    fn validate(&self) -> Result<(), String> {
        if is_blank(&self.name) {
            return Err(String::from("artist name is blank"));
        }
        if self.genres.is_empty() {
            return Err(format!("artist {:?} has no genres", self.name));
        }
        // genres are edited as one comma-separated line
        match self.genres.iter().find(|g| is_blank(g) || g.contains(',')) {
            Some(genre) => Err(format!("artist {:?} has invalid genre {genre:?}", self.name)),
            None => Ok(()),
        }
    }
}
