#![forbid(unsafe_code)]

pub mod assembler;
pub mod error;
pub mod generative_source;
pub mod pair_source;

pub use percent_core::Entropy;

pub use assembler::{
    BatchMode, DEFAULT_CURATED_COUNT, DEFAULT_GENERATED_COUNT, QuestionAssembler,
    question_for_pair, synthesize_pairs,
};
pub use error::PairSourceError;
pub use generative_source::{GenerativePairSource, GenerativeSourceConfig};
pub use pair_source::{PairRejection, PairSource, RawPair};
