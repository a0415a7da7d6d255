use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;

/// What a chat message is asking for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Greeting,
    Question,
    Search,
    Booking,
    Location,
    Price,
    Date,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Greeting => "greeting",
            Intent::Question => "question",
            Intent::Search => "search",
            Intent::Booking => "booking",
            Intent::Location => "location",
            Intent::Price => "price",
            Intent::Date => "date",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn pattern(source: &str) -> Regex {
    Regex::new(source).expect("intent patterns are valid")
}

static GREETING: LazyLock<Regex> = LazyLock::new(|| {
    pattern(r"^(?:hi|hello|hey|greetings|good morning|good afternoon|good evening)\b")
});

static QUESTION: LazyLock<Regex> = LazyLock::new(|| {
    pattern(r"\b(?:what|how|who|when|where|why|can you|tell me|explain|help)\b")
});

static SEARCH: LazyLock<Regex> = LazyLock::new(|| {
    pattern(r"\b(?:show|find|search|look|event|festival|concert|wedding|corporate|conference|party|gala|meeting)\b")
});

static BOOKING: LazyLock<Regex> = LazyLock::new(|| {
    pattern(r"\b(?:book|booking|reserve|ticket|buy|purchase|register)\b")
});

static LOCATION: LazyLock<Regex> = LazyLock::new(|| {
    pattern(r"\b(?:in|at|near|around|location|place|city|chennai|coimbatore|madurai|tamil nadu)\b")
});

static PRICE: LazyLock<Regex> = LazyLock::new(|| {
    pattern(r"\b(?:price|cost|expensive|cheap|affordable|budget|free|paid)\b")
});

static DATE: LazyLock<Regex> = LazyLock::new(|| {
    pattern(r"\b(?:when|date|time|today|tomorrow|week|month|year|soon|upcoming)\b")
});

/// Classify a chat message. Rules are checked in order and the first hit
/// wins; anything unrecognised is treated as a search.
pub fn detect_intent(message: &str) -> Intent {
    let message = message.trim().to_lowercase();

    let rules: [(&LazyLock<Regex>, Intent); 7] = [
        (&GREETING, Intent::Greeting),
        (&QUESTION, Intent::Question),
        (&SEARCH, Intent::Search),
        (&BOOKING, Intent::Booking),
        (&LOCATION, Intent::Location),
        (&PRICE, Intent::Price),
        (&DATE, Intent::Date),
    ];

    rules
        .iter()
        .find(|(re, _)| re.is_match(&message))
        .map(|(_, intent)| *intent)
        .unwrap_or(Intent::Search)
}
