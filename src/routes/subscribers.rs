use actix_web::{web, HttpRequest, HttpResponse, Responder};
use crate::models::SubscribeRequest;
use super::{authenticate_admin, store_error, AppState};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/subscribers", web::post().to(subscribe))
        .route("/subscribers", web::get().to(list_subscribers))
        .route("/subscribers/{identifier}", web::delete().to(unsubscribe));
}

/// Newsletter sign-up by email and/or phone
async fn subscribe(
    state: web::Data<AppState>,
    req: web::Json<SubscribeRequest>,
) -> impl Responder {
    match state
        .store
        .add_subscriber(req.email.as_deref(), req.phone.as_deref())
        .await
    {
        Ok(subscriber) => HttpResponse::Created().json(subscriber),
        Err(e) => {
            tracing::debug!("Subscription rejected: {}", e);
            store_error(e)
        }
    }
}

async fn list_subscribers(state: web::Data<AppState>, http_req: HttpRequest) -> impl Responder {
    if let Err(response) = authenticate_admin(&state, &http_req) {
        return response;
    }
    HttpResponse::Ok().json(state.store.list_subscribers().await)
}

/// Remove a subscriber by email, id or phone
async fn unsubscribe(
    state: web::Data<AppState>,
    http_req: HttpRequest,
    path: web::Path<String>,
) -> impl Responder {
    if let Err(response) = authenticate_admin(&state, &http_req) {
        return response;
    }

    match state.store.remove_subscriber(&path).await {
        Ok(removed) => {
            tracing::info!("Removed {} subscriber(s) for {}", removed, path.as_str());
            HttpResponse::NoContent().finish()
        }
        Err(e) => store_error(e),
    }
}
