use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

/// Credentials for `POST /api/login`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "username is required"))]
    #[serde(default)]
    pub username: String,
    #[validate(length(min = 1, message = "password is required"))]
    #[serde(default)]
    pub password: String,
}

/// Request to create an event
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    #[validate(length(min = 1, message = "title is required"))]
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[validate(length(min = 1, message = "date is required"))]
    #[serde(default)]
    pub date: String,
    #[validate(length(min = 1, message = "location is required"))]
    #[serde(default)]
    pub location: String,
    #[validate(length(min = 1, message = "category is required"))]
    #[serde(default)]
    pub category: String,
    #[validate(range(min = 0.0, message = "price must not be negative"))]
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[validate(length(min = 1, message = "organizer is required"))]
    #[serde(default)]
    pub organizer: String,
    #[serde(default)]
    pub featured: Option<bool>,
}

/// Partial update of an event; absent fields keep their current value
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub location: Option<String>,
    pub category: Option<String>,
    #[validate(range(min = 0.0, message = "price must not be negative"))]
    pub price: Option<f64>,
    pub image_url: Option<String>,
    pub organizer: Option<String>,
    pub featured: Option<bool>,
}

/// Query string filters for `GET /api/events`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventFilter {
    pub category: Option<String>,
    pub location: Option<String>,
    pub date: Option<String>,
}

/// Ranked search over the catalog
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SearchRequest {
    #[validate(length(max = 500))]
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

/// Message typed into the chat widget
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChatRequest {
    #[validate(length(min = 1, max = 1000))]
    #[serde(default)]
    pub message: String,
}

/// Request to book an event
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    #[validate(length(min = 1, message = "eventId is required"))]
    #[serde(default)]
    pub event_id: String,
    #[validate(length(min = 1, message = "userName is required"))]
    #[serde(default)]
    pub user_name: String,
    #[validate(email(message = "userEmail must be a valid email address"))]
    #[serde(default)]
    pub user_email: String,
    #[validate(range(min = 1, message = "guestCount must be at least 1"))]
    #[serde(default)]
    pub guest_count: u32,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Query string for `GET /api/bookings`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingListQuery {
    pub user_id: Option<String>,
    pub role: Option<String>,
}

/// Admin decision on a booking
///
/// `adminNote` distinguishes "absent" (keep) from `null` (clear).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookingRequest {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "present_field")]
    pub admin_note: Option<Option<String>>,
}

fn present_field<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// Newsletter sign-up
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubscribeRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}
