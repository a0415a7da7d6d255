use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use validator::Validate;
use crate::models::{LoginRequest, LoginResponse, MessageResponse, UserSummary};
use crate::services::AuthError;
use super::{auth_error, error_response, AppState};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/login", web::post().to(login))
        .route("/logout", web::post().to(logout));
}

/// Sign in and receive a bearer token
///
/// POST /api/login
///
/// Request body:
/// ```json
/// { "username": "string", "password": "string" }
/// ```
async fn login(state: web::Data<AppState>, req: web::Json<LoginRequest>) -> impl Responder {
    if req.validate().is_err() {
        return error_response(
            StatusCode::BAD_REQUEST,
            "Validation failed",
            "Username and password are required",
        );
    }

    let user = match state.store.find_user(&req.username, &req.password).await {
        Some(user) => user,
        None => {
            tracing::info!("Failed login attempt for {}", req.username);
            return auth_error(AuthError::InvalidCredentials);
        }
    };

    match state.auth.issue(&user) {
        Ok(token) => {
            tracing::info!("User {} signed in", user.username);
            HttpResponse::Ok().json(LoginResponse {
                token,
                user: UserSummary::from(&user),
            })
        }
        Err(e) => auth_error(e),
    }
}

/// Tokens are stateless; logging out is a client-side concern
async fn logout() -> impl Responder {
    HttpResponse::Ok().json(MessageResponse {
        message: "Logged out successfully".to_string(),
    })
}
