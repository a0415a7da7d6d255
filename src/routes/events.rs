use actix_web::{web, HttpRequest, HttpResponse, Responder};
use validator::Validate;
use crate::core::MatchQuery;
use crate::models::{CreateEventRequest, EventFilter, SearchRequest, SearchResponse, UpdateEventRequest};
use super::{authenticate_admin, store_error, validation_error, AppState};

/// Configure all event-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        // Registered before /events/{id} so "search" is never taken for an id
        .route("/events/search", web::post().to(search_events))
        .route("/events", web::get().to(list_events))
        .route("/events", web::post().to(create_event))
        .route("/events/{id}", web::get().to(get_event))
        .route("/events/{id}", web::put().to(update_event))
        .route("/events/{id}", web::delete().to(delete_event));
}

/// List events
///
/// GET /api/events?category=Music&location=london&date=2024-09-05
async fn list_events(
    state: web::Data<AppState>,
    filter: web::Query<EventFilter>,
) -> impl Responder {
    let events = state.store.list_events(&filter).await;
    tracing::debug!("Listing {} events for filter {:?}", events.len(), filter);
    HttpResponse::Ok().json(events)
}

async fn get_event(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    match state.store.get_event(&path).await {
        Ok(event) => HttpResponse::Ok().json(event),
        Err(e) => store_error(e),
    }
}

/// Ranked "smart search" over the catalog
///
/// POST /api/events/search
///
/// Request body:
/// ```json
/// { "query": "budget wedding", "location": "Chennai", "date": "2024-12" }
/// ```
async fn search_events(
    state: web::Data<AppState>,
    req: web::Json<SearchRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_error(errors);
    }

    let req = req.into_inner();
    let query = MatchQuery {
        text: req.query,
        location: req.location,
        date: req.date,
    };

    let events = state.store.all_events().await;
    let result = state.matcher.find_matches_with(&query, &events);

    tracing::info!(
        "Search {:?} returned {} of {} events",
        query.text,
        result.len(),
        result.total_candidates
    );

    HttpResponse::Ok().json(SearchResponse {
        total_candidates: result.total_candidates,
        results: result.matches,
    })
}

async fn create_event(
    state: web::Data<AppState>,
    http_req: HttpRequest,
    req: web::Json<CreateEventRequest>,
) -> impl Responder {
    if let Err(response) = authenticate_admin(&state, &http_req) {
        return response;
    }
    if let Err(errors) = req.validate() {
        return validation_error(errors);
    }

    let event = state.store.create_event(req.into_inner()).await;
    HttpResponse::Created().json(event)
}

async fn update_event(
    state: web::Data<AppState>,
    http_req: HttpRequest,
    path: web::Path<String>,
    req: web::Json<UpdateEventRequest>,
) -> impl Responder {
    if let Err(response) = authenticate_admin(&state, &http_req) {
        return response;
    }
    if let Err(errors) = req.validate() {
        return validation_error(errors);
    }

    match state.store.update_event(&path, req.into_inner()).await {
        Ok(event) => HttpResponse::Ok().json(event),
        Err(e) => store_error(e),
    }
}

async fn delete_event(
    state: web::Data<AppState>,
    http_req: HttpRequest,
    path: web::Path<String>,
) -> impl Responder {
    if let Err(response) = authenticate_admin(&state, &http_req) {
        return response;
    }

    match state.store.delete_event(&path).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => store_error(e),
    }
}
