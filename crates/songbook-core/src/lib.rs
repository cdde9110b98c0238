//! Core domain model for songbook.
//!
//! This crate defines the song and artist records, the validation registry
//! and interactive input pipeline used to build them, the serializer
//! contract with its XML, JSON and YAML codecs, and the repository that owns
//! an in-memory catalog.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod error;
pub mod input;
pub mod model;
pub mod persistence;
pub mod query;
pub mod repository;
pub mod seed;
pub mod validation;

pub use error::{Error, Result};
pub use input::{Ask, InputPipeline};
pub use model::{Artist, Record, Song};
pub use persistence::{Format, Serializer};
pub use repository::{ArtistApi, Repository, SongApi};
