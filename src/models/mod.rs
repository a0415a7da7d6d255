// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Booking, BookingStatus, Event, Role, Subscriber, User, UserSummary};
pub use requests::{
    BookingListQuery, ChatRequest, CreateBookingRequest, CreateEventRequest, EventFilter,
    LoginRequest, SearchRequest, SubscribeRequest, UpdateBookingRequest, UpdateEventRequest,
};
pub use responses::{
    BookingCreatedResponse, ChatResponse, ErrorResponse, HealthResponse, LoginResponse,
    MessageResponse, SearchResponse,
};
