use serde::{Deserialize, Serialize};
use crate::core::ScoredEvent;
use crate::models::domain::{Booking, Event, UserSummary};

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub events: usize,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

/// Plain acknowledgement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Successful login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserSummary,
}

/// Booking accepted for admin review
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingCreatedResponse {
    pub message: String,
    #[serde(flatten)]
    pub booking: Booking,
}

/// Ranked search response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub results: Vec<ScoredEvent>,
    pub total_candidates: usize,
}

/// Assistant reply
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub response: String,
    pub intent: String,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub suggested_events: Vec<Event>,
}
