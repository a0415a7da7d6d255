use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use crate::core::{CategorySynonyms, FieldWeights, MatchingConfig};

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub auth: AuthSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
    /// Origin allowed by CORS; permissive when unset
    pub frontend_url: Option<String>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
            frontend_url: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 3001 }

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    #[serde(default = "default_token_ttl_secs")]
    pub token_ttl_secs: u64,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            token_ttl_secs: default_token_ttl_secs(),
        }
    }
}

fn default_jwt_secret() -> String { "change-me-in-production".to_string() }
fn default_token_ttl_secs() -> u64 { 24 * 60 * 60 }

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_shortlist_size")]
    pub shortlist_size: usize,
    /// Popular events shown by the assistant when nothing matches
    #[serde(default = "default_fallback_size")]
    pub fallback_size: usize,
    #[serde(default = "default_budget_threshold")]
    pub budget_threshold: f64,
    #[serde(default)]
    pub weights: WeightsConfig,
    #[serde(default)]
    pub bonuses: BonusConfig,
    /// Replaces the built-in city list when set
    pub cities: Option<Vec<String>>,
    /// Replaces the built-in category synonym table when set
    pub category_synonyms: Option<Vec<CategorySynonyms>>,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            shortlist_size: default_shortlist_size(),
            fallback_size: default_fallback_size(),
            budget_threshold: default_budget_threshold(),
            weights: WeightsConfig::default(),
            bonuses: BonusConfig::default(),
            cities: None,
            category_synonyms: None,
        }
    }
}

fn default_shortlist_size() -> usize { 5 }
fn default_fallback_size() -> usize { 3 }
fn default_budget_threshold() -> f64 { 1000.0 }

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_title_weight")]
    pub title: u32,
    #[serde(default = "default_category_weight")]
    pub category: u32,
    #[serde(default = "default_description_weight")]
    pub description: u32,
    #[serde(default = "default_location_weight")]
    pub location: u32,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            title: default_title_weight(),
            category: default_category_weight(),
            description: default_description_weight(),
            location: default_location_weight(),
        }
    }
}

fn default_title_weight() -> u32 { 5 }
fn default_category_weight() -> u32 { 4 }
fn default_description_weight() -> u32 { 3 }
fn default_location_weight() -> u32 { 2 }

#[derive(Debug, Clone, Deserialize)]
pub struct BonusConfig {
    #[serde(default = "default_category_bonus")]
    pub category: u32,
    #[serde(default = "default_city_bonus")]
    pub city: u32,
    #[serde(default = "default_price_bonus")]
    pub free: u32,
    #[serde(default = "default_price_bonus")]
    pub budget: u32,
    #[serde(default = "default_date_bonus")]
    pub date: u32,
}

impl Default for BonusConfig {
    fn default() -> Self {
        Self {
            category: default_category_bonus(),
            city: default_city_bonus(),
            free: default_price_bonus(),
            budget: default_price_bonus(),
            date: default_date_bonus(),
        }
    }
}

fn default_category_bonus() -> u32 { 3 }
fn default_city_bonus() -> u32 { 4 }
fn default_price_bonus() -> u32 { 2 }
fn default_date_bonus() -> u32 { 2 }

impl MatchingSettings {
    /// Build the matcher tables, starting from the built-in defaults
    pub fn to_matching_config(&self) -> MatchingConfig {
        let defaults = MatchingConfig::default();

        MatchingConfig {
            weights: FieldWeights {
                title: self.weights.title,
                category: self.weights.category,
                description: self.weights.description,
                location: self.weights.location,
            },
            category_synonyms: self
                .category_synonyms
                .clone()
                .unwrap_or(defaults.category_synonyms),
            category_bonus: self.bonuses.category,
            cities: self.cities.clone().unwrap_or(defaults.cities),
            city_bonus: self.bonuses.city,
            free_bonus: self.bonuses.free,
            budget_threshold: self.budget_threshold,
            budget_bonus: self.bonuses.budget,
            date_bonus: self.bonuses.date,
            shortlist_size: self.shortlist_size,
            ..defaults
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the structs
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with CONCIERGE__)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., CONCIERGE__SERVER__PORT -> server.port
            .add_source(environment())
            .build()?;

        let settings = apply_plain_env_overrides(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?;

        settings.try_deserialize()
    }
}

fn environment() -> Environment {
    Environment::with_prefix("CONCIERGE")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

/// Honour the conventional un-prefixed variables used by deployment scripts
/// (PORT, FRONTEND_URL, JWT_SECRET) when the prefixed form is absent.
fn apply_plain_env_overrides(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    if env::var("CONCIERGE__SERVER__PORT").is_err() {
        if let Ok(port) = env::var("PORT") {
            builder = builder.set_override("server.port", port)?;
        }
    }
    if env::var("CONCIERGE__SERVER__FRONTEND_URL").is_err() {
        if let Ok(url) = env::var("FRONTEND_URL") {
            builder = builder.set_override("server.frontend_url", url)?;
        }
    }
    if env::var("CONCIERGE__AUTH__JWT_SECRET").is_err() {
        if let Ok(secret) = env::var("JWT_SECRET") {
            builder = builder.set_override("auth.jwt_secret", secret)?;
        }
    }

    builder.build()
}
