// Route exports
pub mod assistant;
pub mod auth;
pub mod bookings;
pub mod events;
pub mod subscribers;

use actix_web::{error, http::StatusCode, web, HttpRequest, HttpResponse};
use std::sync::Arc;
use crate::assistant::Assistant;
use crate::core::EventMatcher;
use crate::models::ErrorResponse;
use crate::services::{AuthError, AuthService, Claims, InMemoryStore, StoreError};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<InMemoryStore>,
    pub auth: Arc<AuthService>,
    pub matcher: EventMatcher,
    pub assistant: Assistant,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .configure(assistant::configure)
            .configure(auth::configure)
            .configure(events::configure)
            .configure(bookings::configure)
            .configure(subscribers::configure),
    );
}

/// JSON error response for payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST)
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self)
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("Query string error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_query".to_string(),
        message: format!("Invalid query: {}", err),
        status_code: 400,
    }
    .into()
}

pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(handle_json_payload_error)
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(handle_query_payload_error)
}

/// Build a JSON error body with the given status
pub(crate) fn error_response(status: StatusCode, error: &str, message: impl Into<String>) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse {
        error: error.to_string(),
        message: message.into(),
        status_code: status.as_u16(),
    })
}

pub(crate) fn validation_error(errors: validator::ValidationErrors) -> HttpResponse {
    error_response(StatusCode::BAD_REQUEST, "Validation failed", errors.to_string())
}

pub(crate) fn store_error(err: StoreError) -> HttpResponse {
    let status = match &err {
        StoreError::NotFound(_) => StatusCode::NOT_FOUND,
        StoreError::Conflict(_) => StatusCode::CONFLICT,
        StoreError::InvalidInput(_) => StatusCode::BAD_REQUEST,
    };
    let message = match &err {
        StoreError::Conflict(msg) | StoreError::InvalidInput(msg) => msg.clone(),
        StoreError::NotFound(what) => format!("{} not found", what),
    };
    error_response(status, status.canonical_reason().unwrap_or("Error"), message)
}

pub(crate) fn auth_error(err: AuthError) -> HttpResponse {
    let (status, label) = match &err {
        AuthError::MissingToken => (StatusCode::UNAUTHORIZED, "Authentication required"),
        AuthError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "Invalid credentials"),
        AuthError::InvalidToken(_) => (StatusCode::FORBIDDEN, "Invalid or expired token"),
        AuthError::Forbidden => (StatusCode::FORBIDDEN, "Admin access required"),
        AuthError::Signing(_) => {
            tracing::error!("Auth failure: {}", err);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to issue token")
        }
    };
    error_response(status, label, err.to_string())
}

/// Claims of the caller, from the `Authorization: Bearer` header
pub(crate) fn authenticate(state: &AppState, req: &HttpRequest) -> Result<Claims, HttpResponse> {
    let header = req
        .headers()
        .get(actix_web::http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    state.auth.verify_header(header).map_err(|e| {
        tracing::debug!("Rejected request to {}: {}", req.path(), e);
        auth_error(e)
    })
}

/// Claims of the caller, who must be an admin
pub(crate) fn authenticate_admin(state: &AppState, req: &HttpRequest) -> Result<Claims, HttpResponse> {
    let claims = authenticate(state, req)?;
    claims.require_admin().map_err(auth_error)?;
    Ok(claims)
}
