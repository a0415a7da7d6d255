use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use event_concierge::assistant::Assistant;
use event_concierge::config::Settings;
use event_concierge::core::EventMatcher;
use event_concierge::routes::{self, AppState};
use event_concierge::services::{AuthService, InMemoryStore};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn init_logging(level: &str, format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    match format {
        "pretty" => subscriber.pretty().init(),
        "compact" => subscriber.compact().init(),
        _ => subscriber.json().init(),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
        }
    };

    // LOG_LEVEL / LOG_FORMAT win over the config file
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| settings.logging.level.clone());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| settings.logging.format.clone());
    init_logging(&log_level, &log_format);

    info!("Starting Event Concierge service...");

    let matcher = match EventMatcher::new(settings.matching.to_matching_config()) {
        Ok(matcher) => matcher,
        Err(e) => {
            error!("Invalid matching configuration: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
        }
    };
    info!("Matcher initialized with weights: {:?}", matcher.config().weights);

    let assistant = Assistant::new(matcher.clone(), settings.matching.fallback_size);

    if settings.auth.jwt_secret == "change-me-in-production" {
        warn!("Using the default JWT secret; set CONCIERGE__AUTH__JWT_SECRET");
    }
    let auth = Arc::new(AuthService::new(
        &settings.auth.jwt_secret,
        settings.auth.token_ttl_secs,
    ));

    let store = Arc::new(InMemoryStore::seeded());
    info!("Store seeded with {} events", store.event_count().await);

    // Build application state
    let app_state = AppState {
        store,
        auth,
        matcher,
        assistant,
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);
    let frontend_url = settings.server.frontend_url.clone();

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = match &frontend_url {
            Some(origin) => Cors::default()
                .allowed_origin(origin)
                .allow_any_method()
                .allow_any_header()
                .supports_credentials(),
            None => Cors::permissive(),
        };

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(routes::json_config())
            .app_data(routes::query_config())
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
