//! Search engineering: synonym expansion, query planning, relevance scoring
//!
//! The pipeline: query string -> planner (tokenize, expand, build filter)
//! -> bounded store fetch -> scorer (score, sort) -> page slice.

pub mod planner;
pub mod scorer;
pub mod synonyms;
pub mod variations;

pub use planner::{normalize_query, plan, QueryPlan, STOPWORDS};
pub use scorer::{rank, score_name};
pub use synonyms::{builtin_table, RawSynonyms, SynonymData, SynonymIndex};
pub use variations::expand;
