use actix_web::{http::StatusCode, web, HttpRequest, HttpResponse, Responder};
use validator::Validate;
use crate::models::{
    BookingCreatedResponse, BookingListQuery, BookingStatus, CreateBookingRequest,
    UpdateBookingRequest,
};
use super::{authenticate, authenticate_admin, error_response, store_error, validation_error, AppState};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/bookings", web::post().to(create_booking))
        .route("/bookings", web::get().to(list_bookings))
        .route("/bookings/{id}", web::put().to(update_booking));
}

/// Request a booking; it stays pending until an admin decides
///
/// POST /api/bookings
///
/// Request body:
/// ```json
/// {
///   "eventId": "1",
///   "userName": "string",
///   "userEmail": "string",
///   "guestCount": 2,
///   "phone": "string",
///   "message": "string",
///   "userId": "string"
/// }
/// ```
async fn create_booking(
    state: web::Data<AppState>,
    req: web::Json<CreateBookingRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_error(errors);
    }

    match state.store.create_booking(req.into_inner()).await {
        Ok(booking) => HttpResponse::Created().json(BookingCreatedResponse {
            message: "Booking requested. Awaiting admin approval.".to_string(),
            booking,
        }),
        Err(e) => store_error(e),
    }
}

/// List bookings
///
/// GET /api/bookings?role=admin returns every booking (admins only).
/// Otherwise returns the bookings of `userId`, defaulting to the caller.
async fn list_bookings(
    state: web::Data<AppState>,
    http_req: HttpRequest,
    query: web::Query<BookingListQuery>,
) -> impl Responder {
    let claims = match authenticate(&state, &http_req) {
        Ok(claims) => claims,
        Err(response) => return response,
    };

    if query.role.as_deref() == Some("admin") {
        if !claims.is_admin() {
            return error_response(
                StatusCode::FORBIDDEN,
                "Admin access required",
                "Only admins can list all bookings",
            );
        }
        return HttpResponse::Ok().json(state.store.list_bookings(None).await);
    }

    let target = query
        .user_id
        .as_deref()
        .filter(|id| !id.is_empty())
        .unwrap_or(&claims.sub);

    if target != claims.sub && !claims.is_admin() {
        return error_response(
            StatusCode::FORBIDDEN,
            "Forbidden",
            "Users can only list their own bookings",
        );
    }

    HttpResponse::Ok().json(state.store.list_bookings(Some(target)).await)
}

/// Approve or reject a booking
///
/// PUT /api/bookings/{id}
///
/// Request body:
/// ```json
/// { "status": "approved|rejected|pending", "adminNote": "string" }
/// ```
async fn update_booking(
    state: web::Data<AppState>,
    http_req: HttpRequest,
    path: web::Path<String>,
    req: web::Json<UpdateBookingRequest>,
) -> impl Responder {
    let claims = match authenticate_admin(&state, &http_req) {
        Ok(claims) => claims,
        Err(response) => return response,
    };

    let req = req.into_inner();
    let status = match req.status.as_deref().map(str::parse::<BookingStatus>) {
        None => None,
        Some(Ok(status)) => Some(status),
        Some(Err(message)) => {
            return error_response(StatusCode::BAD_REQUEST, "Invalid status", message);
        }
    };

    tracing::info!("Admin {} updating booking {}", claims.username, path.as_str());

    match state.store.update_booking(&path, status, req.admin_note).await {
        Ok(booking) => HttpResponse::Ok().json(booking),
        Err(e) => store_error(e),
    }
}
