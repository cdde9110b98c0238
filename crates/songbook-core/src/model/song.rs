use chrono::{NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::model::{is_blank, now, Record};

/// Lowest and highest accepted rating, inclusive.
pub const RATING_RANGE: std::ops::RangeInclusive<u8> = 1..=5;

/// A song in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    pub title: String,

    /// 1 (lowest) to 5 (highest).
    pub rating: u8,

    pub category: String,
    pub explicit: bool,
    pub updated_at: NaiveDateTime,

    /// Set once; updates through the repository never change it.
    pub created_at: NaiveDateTime,
}

impl Song {
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        rating: u8,
        category: impl Into<String>,
        explicit: bool,
    ) -> Self {
        let now = now();
        Self {
            title: title.into(),
            rating,
            category: category.into(),
            explicit,
            updated_at: now,
            created_at: now,
        }
    }

    #[must_use]
    pub fn with_timestamps(mut self, updated_at: NaiveDateTime, created_at: NaiveDateTime) -> Self {
        self.updated_at = updated_at;
        self.created_at = created_at;
        self
    }

    /// A song is stale when it was last updated strictly before `now - days`.
    /// A cutoff before the earliest representable date makes nothing stale.
    pub fn is_stale(&self, days: u32, now: NaiveDateTime) -> bool {
        TimeDelta::try_days(i64::from(days))
            .and_then(|span| now.checked_sub_signed(span))
            .is_some_and(|cutoff| self.updated_at < cutoff)
    }

    /// Rating 1 marks a song as important.
    pub fn is_important(&self) -> bool {
        self.rating == *RATING_RANGE.start()
    }
}

impl Record for Song {
    const KIND: &'static str = "song";
    const COLLECTION: &'static str = "songs";

    fn apply_update(&mut self, other: &Self, now: NaiveDateTime) {
        self.title.clone_from(&other.title);
        self.rating = other.rating;
        self.category.clone_from(&other.category);
        self.explicit = other.explicit;
        self.updated_at = now;
    }

    fn validate(&self) -> Result<(), String> {
        if is_blank(&self.title) {
            return Err(String::from("song title is blank"));
        }
        if !RATING_RANGE.contains(&self.rating) {
            return Err(format!("song {:?} has rating {} outside 1..=5", self.title, self.rating));
        }
        if is_blank(&self.category) {
            return Err(format!("song {:?} has a blank category", self.title));
        }
        Ok(())
    }
}
