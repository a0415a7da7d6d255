//! Conversational event concierge
//!
//! Wraps the [`EventMatcher`] with intent detection and reply templating.
//! Everything here is plain string work; ranking lives in `core`.

pub mod format;
pub mod intent;

pub use format::{format_event_date, format_event_response, format_price_in_rupees};
pub use intent::{detect_intent, Intent};

use crate::core::EventMatcher;
use crate::models::Event;

const GREETINGS: [&str; 4] = [
    "Hello! I'm your AI Event Concierge. I can help you find the perfect events. What are you looking for?",
    "Hi there! I'm here to help you discover amazing events. What type of event interests you?",
    "Welcome! I can help you find events, answer questions, and make recommendations. How can I assist you today?",
    "Greetings! Ready to explore some fantastic events? Just tell me what you're interested in!",
];

const CAPABILITIES: &str = "I can help you:\n\n\
    - Find events based on your preferences\n\
    - Search by location\n\
    - Filter by price range\n\
    - Find events by date\n\
    - Get personalized recommendations\n\n\
    Just tell me what you're looking for!";

const HOW_IT_WORKS: &str = "Here's how I work:\n\n\
    1. You describe what you're looking for\n\
    2. I search through available events\n\
    3. I provide personalized recommendations\n\
    4. You can book directly through the platform\n\n\
    What kind of event are you interested in?";

const ABOUT: &str = "I'm an AI-powered event concierge designed to help you discover and book \
    premium events. I use intelligent matching to find events that match your preferences. \
    What would you like to know more about?";

const CLARIFY: &str = "I'm here to help you find the perfect events! Could you be more specific \
    about what you're looking for? For example, you could ask about events in a specific city, \
    type of event, or date range.";

const BOOKING_HELP: &str = "To book an event, you can:\n\n\
    1. Use the search form on the homepage\n\
    2. Click on any event card to view details\n\
    3. Fill out the booking form\n\
    4. Submit your request for admin approval\n\n\
    Would you like me to help you find a specific event to book?";

const NO_EVENTS: &str = "I don't have any events available right now. Please check back later \
    or contact our support team for assistance.";

/// A reply to one chat message
#[derive(Debug, Clone, PartialEq)]
pub struct ChatReply {
    pub intent: Intent,
    pub response: String,
    /// Events referenced by the reply, best first
    pub suggested_events: Vec<Event>,
}

impl ChatReply {
    fn text(intent: Intent, response: impl Into<String>) -> Self {
        Self {
            intent,
            response: response.into(),
            suggested_events: Vec::new(),
        }
    }
}

/// Chat surface over the event matcher
#[derive(Debug, Clone)]
pub struct Assistant {
    matcher: EventMatcher,
    fallback_size: usize,
}

impl Assistant {
    pub fn new(matcher: EventMatcher, fallback_size: usize) -> Self {
        Self {
            matcher,
            fallback_size,
        }
    }

    /// Answer a chat message against the current catalog
    pub fn reply(&self, message: &str, events: &[Event]) -> ChatReply {
        let intent = detect_intent(message);
        tracing::debug!("Chat message classified as {}", intent);

        match intent {
            Intent::Greeting => ChatReply::text(intent, greeting_for(message)),
            Intent::Question => ChatReply::text(intent, answer_question(message)),
            Intent::Booking => ChatReply::text(intent, BOOKING_HELP),
            Intent::Search | Intent::Location | Intent::Price | Intent::Date => {
                self.recommend(intent, message, events)
            }
        }
    }

    fn recommend(&self, intent: Intent, message: &str, events: &[Event]) -> ChatReply {
        let matched = self.matcher.find_matches(message, events).into_events();

        if !matched.is_empty() {
            return ChatReply {
                intent,
                response: format_event_response(&matched, message),
                suggested_events: matched,
            };
        }

        let popular = popular_events(events, self.fallback_size);
        if popular.is_empty() {
            return ChatReply::text(intent, NO_EVENTS);
        }

        tracing::debug!(
            "No matches for {:?}, falling back to {} popular events",
            message,
            popular.len()
        );

        ChatReply {
            intent,
            response: format!(
                "I couldn't find exact matches for \"{}\", but here are some popular events you might enjoy:\n\n{}",
                message,
                format_event_response(&popular, message)
            ),
            suggested_events: popular,
        }
    }
}

impl Default for Assistant {
    fn default() -> Self {
        Self::new(EventMatcher::with_default_config(), 3)
    }
}

/// Highest-priced events first; equal prices keep catalog order
pub fn popular_events(events: &[Event], limit: usize) -> Vec<Event> {
    let mut popular = events.to_vec();
    popular.sort_by(|a, b| b.price.total_cmp(&a.price));
    popular.truncate(limit);
    popular
}

/// Greeting picked from the message so replies are reproducible
fn greeting_for(message: &str) -> &'static str {
    GREETINGS[message.chars().count() % GREETINGS.len()]
}

fn answer_question(message: &str) -> &'static str {
    let message = message.to_lowercase();
    let contains_word = |words: &[&str]| {
        message
            .split(|c: char| !c.is_alphanumeric())
            .any(|w| words.contains(&w))
    };

    if message.contains("what can you") || message.contains("what do you") || contains_word(&["help", "assist"]) {
        CAPABILITIES
    } else if contains_word(&["how", "process", "work", "system"]) {
        HOW_IT_WORKS
    } else if message.contains("tell me about") || contains_word(&["who", "about"]) {
        ABOUT
    } else {
        CLARIFY
    }
}
