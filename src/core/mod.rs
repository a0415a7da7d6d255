// Core algorithm exports
pub mod matcher;
pub mod rules;
pub mod scoring;

pub use matcher::{EventMatcher, MatchQuery, MatchResult, MatcherError, ScoredEvent};
pub use rules::{CategorySynonyms, FieldWeights, MatchingConfig};
pub use scoring::{score_event, tokenize};
