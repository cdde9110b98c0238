pub mod config;
pub mod run;
pub mod seed;

pub use run::{run_artists, run_songs};
pub use seed::run_seed;
