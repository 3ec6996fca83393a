#![forbid(unsafe_code)]

pub mod curated;
pub mod distractors;
pub mod error;
pub mod formatter;
pub mod model;
pub mod random;
pub mod shuffle;

pub use curated::{CuratedEntry, curated_table};
pub use distractors::generate_distractors;
pub use error::Error;
pub use formatter::{format_percent, gcd};
pub use random::Entropy;
pub use shuffle::shuffled;
