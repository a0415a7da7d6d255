//! Event Concierge - catalog, booking and recommendation service
//!
//! The heart of the crate is [`EventMatcher`], which ranks events against a
//! free-text query. Around it sit the chat [`assistant`], an in-memory store
//! and the actix-web routes that expose everything over HTTP.

pub mod assistant;
pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::assistant::{Assistant, ChatReply, Intent};
pub use crate::core::{EventMatcher, MatchQuery, MatchResult, MatchingConfig, ScoredEvent};
pub use crate::models::{Booking, BookingStatus, Event, Subscriber};
