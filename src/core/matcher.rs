use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use crate::core::{
    rules::MatchingConfig,
    scoring::{keyword_pattern, score_event, tokenize, PreparedQuery},
};
use crate::models::Event;

/// Errors raised while building a matcher from configuration
#[derive(Debug, Error)]
pub enum MatcherError {
    #[error("Invalid keyword pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("Invalid matching configuration: {0}")]
    InvalidConfig(String),
}

/// An event paired with its relevance score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredEvent {
    #[serde(flatten)]
    pub event: Event,
    pub score: u32,
}

/// Result of the matching process
#[derive(Debug, Clone, Default)]
pub struct MatchResult {
    /// Shortlist, best first
    pub matches: Vec<ScoredEvent>,
    pub total_candidates: usize,
}

impl MatchResult {
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn into_events(self) -> Vec<Event> {
        self.matches.into_iter().map(|m| m.event).collect()
    }
}

/// Free-text query with optional structured hints from a search form
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MatchQuery {
    pub text: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

impl MatchQuery {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }
}

#[derive(Debug, Clone)]
struct PricePatterns {
    free: Option<Regex>,
    budget: Option<Regex>,
}

/// Ranks a catalog of events against a user query
///
/// # Pipeline Stages
/// 1. Query preparation (tokenizing, price intent detection)
/// 2. Per-event scoring
/// 3. Dropping events that scored zero
/// 4. Stable ranking and truncation to the shortlist size
///
/// The matcher holds no mutable state and can be cloned into every worker.
#[derive(Debug, Clone)]
pub struct EventMatcher {
    config: MatchingConfig,
    patterns: PricePatterns,
}

impl EventMatcher {
    pub fn new(config: MatchingConfig) -> Result<Self, MatcherError> {
        let config = config.normalized();

        if config.shortlist_size == 0 {
            return Err(MatcherError::InvalidConfig(
                "shortlist_size must be at least 1".to_string(),
            ));
        }
        if !config.budget_threshold.is_finite() || config.budget_threshold < 0.0 {
            return Err(MatcherError::InvalidConfig(
                "budget_threshold must be a non-negative number".to_string(),
            ));
        }

        let patterns = PricePatterns {
            free: keyword_pattern(&config.free_keywords)?,
            budget: keyword_pattern(&config.budget_keywords)?,
        };

        Ok(Self { config, patterns })
    }

    /// Matcher with the built-in tables
    pub fn with_default_config() -> Self {
        Self::new(MatchingConfig::default())
            .expect("built-in matching tables are valid")
    }

    pub fn config(&self) -> &MatchingConfig {
        &self.config
    }

    /// Find the events most relevant to a free-text query
    ///
    /// An empty query or an empty catalog yields an empty result; callers
    /// decide what to show instead.
    pub fn find_matches(&self, query: &str, events: &[Event]) -> MatchResult {
        self.find_matches_with(&MatchQuery::new(query), events)
    }

    /// Find matches for a query carrying structured hints
    pub fn find_matches_with(&self, query: &MatchQuery, events: &[Event]) -> MatchResult {
        let total_candidates = events.len();
        let prepared = self.prepare(query);

        if prepared.is_empty() || events.is_empty() {
            return MatchResult {
                matches: Vec::new(),
                total_candidates,
            };
        }

        let mut scored: Vec<ScoredEvent> = events
            .iter()
            .filter_map(|event| {
                let score = score_event(&prepared, event, &self.config);
                (score > 0).then(|| ScoredEvent {
                    event: event.clone(),
                    score,
                })
            })
            .collect();

        // sort_by is stable: equal scores keep catalog order
        scored.sort_by(|a, b| b.score.cmp(&a.score));
        scored.truncate(self.config.shortlist_size);

        tracing::debug!(
            "Matched {} of {} events for query {:?} (tokens: {:?})",
            scored.len(),
            total_candidates,
            prepared.text,
            prepared.tokens
        );

        MatchResult {
            matches: scored,
            total_candidates,
        }
    }

    /// Score a single event; exposed for diagnostics and tests
    pub fn score(&self, query: &MatchQuery, event: &Event) -> u32 {
        let prepared = self.prepare(query);
        if prepared.is_empty() {
            return 0;
        }
        score_event(&prepared, event, &self.config)
    }

    fn prepare(&self, query: &MatchQuery) -> PreparedQuery {
        let mut text = query.text.trim().to_lowercase();

        if let Some(location) = query.location.as_deref().map(str::trim) {
            if !location.is_empty() {
                if !text.is_empty() {
                    text.push(' ');
                }
                text.push_str(&location.to_lowercase());
            }
        }

        let date_hint = query
            .date
            .as_deref()
            .map(|d| d.trim().to_lowercase())
            .filter(|d| !d.is_empty());

        let matches = |pattern: &Option<Regex>| {
            pattern.as_ref().map_or(false, |re| re.is_match(&text))
        };
        let wants_free = matches(&self.patterns.free);
        let wants_budget = matches(&self.patterns.budget);

        PreparedQuery {
            tokens: tokenize(&text, self.config.min_token_len),
            text,
            date_hint,
            wants_free,
            wants_budget,
        }
    }
}

impl Default for EventMatcher {
    fn default() -> Self {
        Self::with_default_config()
    }
}
