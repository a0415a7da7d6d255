// Service exports
pub mod auth;
pub mod ids;
pub mod seed;
pub mod store;

pub use auth::{AuthError, AuthService, Claims};
pub use ids::IdGenerator;
pub use store::{InMemoryStore, StoreError};
