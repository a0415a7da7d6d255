use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::models::{ChatRequest, ChatResponse, HealthResponse};
use super::{validation_error, AppState};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/chat", web::post().to(chat));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        events: state.store.event_count().await,
        timestamp: chrono::Utc::now(),
    })
}

/// Chat with the event concierge
///
/// POST /api/chat
///
/// Request body:
/// ```json
/// { "message": "any free events in chennai?" }
/// ```
async fn chat(state: web::Data<AppState>, req: web::Json<ChatRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_error(errors);
    }

    // Snapshot the catalog so the lock is not held while scoring
    let events = state.store.all_events().await;
    let reply = state.assistant.reply(&req.message, &events);

    tracing::info!(
        "Chat reply ({}) with {} suggested events from {} in catalog",
        reply.intent,
        reply.suggested_events.len(),
        events.len()
    );

    HttpResponse::Ok().json(ChatResponse {
        response: reply.response,
        intent: reply.intent.to_string(),
        suggested_events: reply.suggested_events,
    })
}
