pub mod engine;
pub mod index;
pub mod lexicon;
pub mod query;
pub mod review;
pub mod tokenizer;

pub use engine::{RatingFilterEngine, SearchConfig, SearchEngine, SearchHit};
pub use index::{DocId, InvertedIndex};
pub use lexicon::{Lexicon, Polarity};
pub use query::{Mode, Query};
pub use review::Review;
