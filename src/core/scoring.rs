use regex::Regex;
use crate::core::rules::MatchingConfig;
use crate::models::Event;

/// Split a query into lowercase whitespace-separated words longer than
/// `min_len` characters. Short words ("in", "at") are noise.
pub fn tokenize(text: &str, min_len: usize) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .filter(|word| word.chars().count() > min_len)
        .map(str::to_string)
        .collect()
}

/// Whole-word alternation over a keyword list, e.g. `\b(?:free|no cost)\b`.
/// Keywords are escaped so the pattern is always well formed.
pub fn keyword_pattern(keywords: &[String]) -> Result<Option<Regex>, regex::Error> {
    if keywords.is_empty() {
        return Ok(None);
    }

    let alternation = keywords
        .iter()
        .map(|k| regex::escape(k))
        .collect::<Vec<_>>()
        .join("|");

    Regex::new(&format!(r"\b(?:{})\b", alternation)).map(Some)
}

/// Query text prepared once per request and reused for every event
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreparedQuery {
    /// Lowercased query text, including any location hint
    pub text: String,
    pub tokens: Vec<String>,
    pub date_hint: Option<String>,
    pub wants_free: bool,
    pub wants_budget: bool,
}

impl PreparedQuery {
    /// Nothing in the query can ever contribute to a score
    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.date_hint.is_none()
    }
}

/// Score a single event against a prepared query
///
/// Scoring rules:
/// - each token adds the field weight once per field containing it
///   (title, category, description, location)
/// - category synonyms in the query add a bonus to events in that category
/// - a known city named in both query and event location adds a bonus
/// - "free" queries favour zero-priced events, "budget" queries favour
///   events below the budget threshold
/// - a date hint found in the event date adds a bonus
pub fn score_event(query: &PreparedQuery, event: &Event, config: &MatchingConfig) -> u32 {
    let title = event.title.to_lowercase();
    let category = event.category.to_lowercase();
    let description = event.description.to_lowercase();
    let location = event.location.to_lowercase();
    let weights = &config.weights;

    let mut score = 0u32;

    for token in &query.tokens {
        let token = token.as_str();
        if title.contains(token) {
            score += weights.title;
        }
        if category.contains(token) {
            score += weights.category;
        }
        if description.contains(token) {
            score += weights.description;
        }
        if location.contains(token) {
            score += weights.location;
        }
    }

    for synonyms in &config.category_synonyms {
        let mentioned = synonyms
            .keywords
            .iter()
            .any(|keyword| query.text.contains(keyword.as_str()));
        if mentioned && category.contains(synonyms.category.as_str()) {
            score += config.category_bonus;
        }
    }

    for city in &config.cities {
        if query.text.contains(city.as_str()) && location.contains(city.as_str()) {
            score += config.city_bonus;
        }
    }

    if query.wants_free && event.price == 0.0 {
        score += config.free_bonus;
    }
    if query.wants_budget && event.price < config.budget_threshold {
        score += config.budget_bonus;
    }

    if let Some(date) = &query.date_hint {
        if event.date.to_lowercase().contains(date.as_str()) {
            score += config.date_bonus;
        }
    }

    score
}
