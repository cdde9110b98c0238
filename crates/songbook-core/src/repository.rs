//! In-memory catalog that mediates every mutation, query and persistence
//! call for one record type.

use chrono::NaiveDateTime;

use crate::error::Result;
use crate::model::{now, Artist, Record, Song};
use crate::persistence::Serializer;
use crate::seed;

/// Owns one ordered collection and the serializer it is persisted with.
///
/// Records are addressed by position; indices shift after a delete.
#[derive(Debug)]
pub struct Repository<R: Record> {
    records: Vec<R>,
    serializer: Box<dyn Serializer<R>>,
}

pub type SongApi = Repository<Song>;
pub type ArtistApi = Repository<Artist>;

impl<R: Record> Repository<R> {
    /// An empty repository persisted through `serializer`.
    pub fn new(serializer: Box<dyn Serializer<R>>) -> Self {
        Self {
            records: Vec::new(),
            serializer,
        }
    }

    pub fn serializer(&self) -> &dyn Serializer<R> {
        self.serializer.as_ref()
    }

    pub fn add(&mut self, record: R) -> bool {
        self.records.push(record);
        true
    }

    /// Remove and return the record at `index`, or `None` if out of bounds.
    pub fn delete_at(&mut self, index: usize) -> Option<R> {
        self.is_valid_index(index).then(|| self.records.remove(index))
    }

    /// Overwrite the record at `index` following [`Record::apply_update`].
    pub fn update_at(&mut self, index: usize, record: &R) -> bool {
        self.update_at_time(index, record, now())
    }

    pub fn update_at_time(&mut self, index: usize, record: &R, now: NaiveDateTime) -> bool {
        match self.records.get_mut(index) {
            Some(existing) => {
                existing.apply_update(record, now);
                true
            }
            None => false,
        }
    }

    /// Remove every record equal to any of `records`; absent ones are ignored.
    pub fn remove_many(&mut self, records: &[R]) {
        let before = self.records.len();
        self.records.retain(|r| !records.contains(r));
        log::debug!(
            "Removed {} {} records",
            before - self.records.len(),
            R::KIND
        );
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn find(&self, index: usize) -> Option<&R> {
        self.records.get(index)
    }

    pub fn find_using(&self, record: &R) -> Option<&R> {
        self.records.iter().find(|r| *r == record)
    }

    pub fn index_of(&self, record: &R) -> Option<usize> {
        self.records.iter().position(|r| r == record)
    }

    pub fn is_valid_index(&self, index: usize) -> bool {
        index < self.records.len()
    }

    /// Index validation for raw input, checked against the live size.
    pub fn is_valid_index_input(&self, input: Option<&str>) -> bool {
        crate::validation::index_is_valid(input, self.records.len())
    }

    /// An owned snapshot; changing it never touches the repository.
    pub fn find_all(&self) -> Vec<R> {
        self.records.clone()
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn count_where(&self, predicate: impl Fn(&R) -> bool) -> usize {
        self.records.iter().filter(|r| predicate(r)).count()
    }

    pub fn filter(&self, predicate: impl Fn(&R) -> bool) -> Vec<R> {
        self.records.iter().filter(|r| predicate(r)).cloned().collect()
    }

    /// Replace the collection with a decoded document.
    ///
    /// On error the current collection is left untouched.
    pub fn load(&mut self) -> Result<()> {
        let records = self.serializer.read()?;
        log::info!(
            "Loaded {} {} records from {}",
            records.len(),
            R::KIND,
            self.serializer.path().display()
        );
        self.records = records;
        Ok(())
    }

    /// Write the whole collection, replacing the previous document.
    pub fn store(&self) -> Result<()> {
        self.serializer.write(&self.records)?;
        log::info!(
            "Stored {} {} records to {}",
            self.records.len(),
            R::KIND,
            self.serializer.path().display()
        );
        Ok(())
    }
}

// Song queries
impl Repository<Song> {
    pub fn seed(&mut self) {
        self.records = seed::songs();
    }

    /// Mark the song at `index` explicit and refresh its update time.
    pub fn explicitify(&mut self, index: usize) -> bool {
        match self.records.get_mut(index) {
            Some(song) => {
                song.explicit = true;
                song.updated_at = now();
                true
            }
            None => false,
        }
    }

    pub fn count_explicit(&self) -> usize {
        self.count_where(|s| s.explicit)
    }

    pub fn count_clean(&self) -> usize {
        self.count_where(|s| !s.explicit)
    }

    pub fn count_by_rating(&self, rating: u8) -> usize {
        self.count_where(|s| s.rating == rating)
    }

    pub fn count_stale(&self, days: u32) -> usize {
        self.count_stale_at(days, now())
    }

    pub fn count_stale_at(&self, days: u32, now: NaiveDateTime) -> usize {
        self.count_where(|s| s.is_stale(days, now))
    }

    pub fn count_important(&self) -> usize {
        self.count_where(Song::is_important)
    }

    pub fn explicit_songs(&self) -> Vec<Song> {
        self.filter(|s| s.explicit)
    }

    pub fn clean_songs(&self) -> Vec<Song> {
        self.filter(|s| !s.explicit)
    }

    pub fn songs_by_rating(&self, rating: u8) -> Vec<Song> {
        self.filter(|s| s.rating == rating)
    }

    /// Stale songs, least recently updated first.
    pub fn stale_songs(&self, days: u32) -> Vec<Song> {
        self.stale_songs_at(days, now())
    }

    pub fn stale_songs_at(&self, days: u32, now: NaiveDateTime) -> Vec<Song> {
        let mut songs = self.filter(|s| s.is_stale(days, now));
        songs.sort_by_key(|s| s.updated_at);
        songs
    }

    pub fn important_songs(&self) -> Vec<Song> {
        self.filter(Song::is_important)
    }

    /// Case-insensitive title search, paired with each song's current index.
    pub fn search_by_title(&self, needle: &str) -> Vec<(usize, &Song)> {
        let needle = needle.to_lowercase();
        self.records
            .iter()
            .enumerate()
            .filter(|(_, s)| s.title.to_lowercase().contains(&needle))
            .collect()
    }
}

// Artist queries
impl Repository<Artist> {
    pub fn seed(&mut self) {
        self.records = seed::artists();
    }

    pub fn count_by_genre(&self, genre: &str) -> usize {
        self.count_where(|a| a.has_genre(genre))
    }

    pub fn artists_by_genre(&self, genre: &str) -> Vec<Artist> {
        self.filter(|a| a.has_genre(genre))
    }

    /// Case-insensitive name search, paired with each artist's current index.
    pub fn search_by_name(&self, needle: &str) -> Vec<(usize, &Artist)> {
        let needle = needle.to_lowercase();
        self.records
            .iter()
            .enumerate()
            .filter(|(_, a)| a.name.to_lowercase().contains(&needle))
            .collect()
    }
}
