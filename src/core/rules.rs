use serde::Deserialize;

/// Score added when a query token is found inside an event field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct FieldWeights {
    pub title: u32,
    pub category: u32,
    pub description: u32,
    pub location: u32,
}

impl Default for FieldWeights {
    fn default() -> Self {
        Self {
            title: 5,
            category: 4,
            description: 3,
            location: 2,
        }
    }
}

/// Keywords that point at a canonical category
///
/// When any keyword occurs in the query and the event category contains
/// `category`, the event earns the category bonus.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CategorySynonyms {
    pub category: String,
    pub keywords: Vec<String>,
}

impl CategorySynonyms {
    pub fn new(category: &str, keywords: &[&str]) -> Self {
        Self {
            category: category.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }
}

/// Immutable tables and constants driving the event matcher
///
/// All strings are expected in lowercase; [`MatchingConfig::normalized`]
/// takes care of that for values loaded from configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchingConfig {
    pub weights: FieldWeights,
    /// Tokens must be strictly longer than this many characters
    pub min_token_len: usize,
    pub category_synonyms: Vec<CategorySynonyms>,
    pub category_bonus: u32,
    pub cities: Vec<String>,
    pub city_bonus: u32,
    pub free_keywords: Vec<String>,
    pub free_bonus: u32,
    pub budget_keywords: Vec<String>,
    /// Prices strictly below this count as budget friendly
    pub budget_threshold: f64,
    pub budget_bonus: u32,
    /// Bonus when a structured date hint occurs in the event date
    pub date_bonus: u32,
    pub shortlist_size: usize,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            weights: FieldWeights::default(),
            min_token_len: 2,
            category_synonyms: vec![
                CategorySynonyms::new("wedding", &["wedding", "marriage", "bridal", "reception"]),
                CategorySynonyms::new(
                    "corporate",
                    &["corporate", "business", "conference", "meeting", "seminar"],
                ),
                CategorySynonyms::new("festival", &["festival", "celebration", "carnival", "fair"]),
                CategorySynonyms::new("concert", &["concert", "music", "live", "performance", "show"]),
                CategorySynonyms::new("conference", &["conference", "summit", "convention", "workshop"]),
                CategorySynonyms::new("gala", &["gala", "dinner", "charity", "fundraiser"]),
            ],
            category_bonus: 3,
            cities: [
                "chennai",
                "coimbatore",
                "madurai",
                "tiruchirappalli",
                "salem",
                "tirunelveli",
                "erode",
                "vellore",
                "thoothukudi",
                "dindigul",
            ]
            .iter()
            .map(|c| c.to_string())
            .collect(),
            city_bonus: 4,
            free_keywords: vec!["free".into(), "no cost".into(), "complimentary".into()],
            free_bonus: 2,
            budget_keywords: vec![
                "budget".into(),
                "affordable".into(),
                "cheap".into(),
                "low cost".into(),
            ],
            budget_threshold: 1000.0,
            budget_bonus: 2,
            date_bonus: 2,
            shortlist_size: 5,
        }
    }
}

impl MatchingConfig {
    /// Lowercase every table entry and drop blanks
    pub fn normalized(mut self) -> Self {
        fn clean(words: Vec<String>) -> Vec<String> {
            words
                .into_iter()
                .map(|w| w.trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect()
        }

        self.category_synonyms = self
            .category_synonyms
            .into_iter()
            .map(|s| CategorySynonyms {
                category: s.category.trim().to_lowercase(),
                keywords: clean(s.keywords),
            })
            .filter(|s| !s.category.is_empty())
            .collect();
        self.cities = clean(self.cities);
        self.free_keywords = clean(self.free_keywords);
        self.budget_keywords = clean(self.budget_keywords);
        self
    }
}
