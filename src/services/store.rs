use chrono::Utc;
use thiserror::Error;
use tokio::sync::RwLock;
use crate::models::{
    Booking, BookingStatus, CreateBookingRequest, CreateEventRequest, Event, EventFilter,
    Subscriber, UpdateEventRequest, User,
};
use crate::services::{ids::IdGenerator, seed};

const DEFAULT_IMAGE_URL: &str = "https://picsum.photos/800/600";

/// Errors that can occur with store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

#[derive(Debug, Default)]
struct StoreData {
    events: Vec<Event>,
    bookings: Vec<Booking>,
    subscribers: Vec<Subscriber>,
    users: Vec<User>,
}

/// In-memory store for events, bookings, subscribers and accounts
///
/// Records live in insertion order, which is also the catalog order the
/// matcher uses to break ties. Nothing is persisted across restarts.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    data: RwLock<StoreData>,
    ids: IdGenerator,
}

impl InMemoryStore {
    /// Empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Store preloaded with the demo catalog and accounts
    pub fn seeded() -> Self {
        Self {
            data: RwLock::new(StoreData {
                events: seed::events(),
                bookings: seed::bookings(),
                subscribers: seed::subscribers(),
                users: seed::users(),
            }),
            ids: IdGenerator::new(),
        }
    }

    // ==================== EVENTS ====================

    /// Snapshot of the whole catalog, in catalog order
    pub async fn all_events(&self) -> Vec<Event> {
        self.data.read().await.events.clone()
    }

    pub async fn event_count(&self) -> usize {
        self.data.read().await.events.len()
    }

    /// Catalog filtered by exact category, location substring and exact date
    pub async fn list_events(&self, filter: &EventFilter) -> Vec<Event> {
        let category = non_empty(filter.category.as_deref()).map(str::to_lowercase);
        let location = non_empty(filter.location.as_deref()).map(str::to_lowercase);
        let date = non_empty(filter.date.as_deref());

        self.data
            .read()
            .await
            .events
            .iter()
            .filter(|e| category.as_ref().map_or(true, |c| e.category.to_lowercase() == *c))
            .filter(|e| location.as_ref().map_or(true, |l| e.location.to_lowercase().contains(l.as_str())))
            .filter(|e| date.map_or(true, |d| e.date == d))
            .cloned()
            .collect()
    }

    pub async fn get_event(&self, id: &str) -> Result<Event, StoreError> {
        self.data
            .read()
            .await
            .events
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("event {}", id)))
    }

    pub async fn create_event(&self, req: CreateEventRequest) -> Event {
        let event = Event {
            id: self.ids.next_id(),
            title: req.title,
            description: req.description.unwrap_or_default(),
            date: req.date,
            location: req.location,
            category: req.category,
            price: req.price.unwrap_or(0.0),
            image_url: req
                .image_url
                .filter(|url| !url.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_IMAGE_URL.to_string()),
            organizer: req.organizer,
            featured: req.featured.unwrap_or(false),
        };

        self.data.write().await.events.push(event.clone());
        tracing::info!("Created event {} ({})", event.id, event.title);
        event
    }

    /// Merge the provided fields into an existing event
    pub async fn update_event(&self, id: &str, req: UpdateEventRequest) -> Result<Event, StoreError> {
        let mut data = self.data.write().await;
        let event = data
            .events
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| StoreError::NotFound(format!("event {}", id)))?;

        if let Some(title) = req.title {
            event.title = title;
        }
        if let Some(description) = req.description {
            event.description = description;
        }
        if let Some(date) = req.date {
            event.date = date;
        }
        if let Some(location) = req.location {
            event.location = location;
        }
        if let Some(category) = req.category {
            event.category = category;
        }
        if let Some(price) = req.price {
            event.price = price;
        }
        if let Some(image_url) = req.image_url {
            event.image_url = image_url;
        }
        if let Some(organizer) = req.organizer {
            event.organizer = organizer;
        }
        if let Some(featured) = req.featured {
            event.featured = featured;
        }

        Ok(event.clone())
    }

    pub async fn delete_event(&self, id: &str) -> Result<(), StoreError> {
        let mut data = self.data.write().await;
        let index = data
            .events
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| StoreError::NotFound(format!("event {}", id)))?;
        let removed = data.events.remove(index);
        tracing::info!("Deleted event {} ({})", removed.id, removed.title);
        Ok(())
    }

    // ==================== BOOKINGS ====================

    /// Record a booking request for an existing event
    pub async fn create_booking(&self, req: CreateBookingRequest) -> Result<Booking, StoreError> {
        let mut data = self.data.write().await;
        let event_name = data
            .events
            .iter()
            .find(|e| e.id == req.event_id)
            .map(|e| e.title.clone())
            .ok_or_else(|| StoreError::NotFound(format!("event {}", req.event_id)))?;

        let booking = Booking {
            id: self.ids.next_id(),
            user_id: req
                .user_id
                .filter(|id| !id.is_empty())
                .unwrap_or_else(|| "guest".to_string()),
            event_id: req.event_id,
            event_name,
            user_name: req.user_name,
            user_email: req.user_email,
            phone: req.phone.filter(|p| !p.is_empty()),
            guest_count: req.guest_count,
            tickets: req.guest_count,
            message: req.message.filter(|m| !m.is_empty()),
            status: BookingStatus::Pending,
            created_at: Utc::now(),
            updated_at: None,
            admin_note: None,
        };

        data.bookings.push(booking.clone());
        tracing::info!(
            "Booking {} requested for event {} ({} guests)",
            booking.id,
            booking.event_id,
            booking.guest_count
        );
        Ok(booking)
    }

    /// All bookings, or only those belonging to `user_id`
    pub async fn list_bookings(&self, user_id: Option<&str>) -> Vec<Booking> {
        self.data
            .read()
            .await
            .bookings
            .iter()
            .filter(|b| user_id.map_or(true, |id| b.user_id == id))
            .cloned()
            .collect()
    }

    /// Apply an admin decision. `admin_note` of `Some(None)` clears the note.
    pub async fn update_booking(
        &self,
        id: &str,
        status: Option<BookingStatus>,
        admin_note: Option<Option<String>>,
    ) -> Result<Booking, StoreError> {
        let mut data = self.data.write().await;
        let booking = data
            .bookings
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| StoreError::NotFound(format!("booking {}", id)))?;

        if let Some(status) = status {
            booking.status = status;
        }
        if let Some(note) = admin_note {
            booking.admin_note = note;
        }
        booking.updated_at = Some(Utc::now());

        tracing::info!("Booking {} is now {}", booking.id, booking.status);
        Ok(booking.clone())
    }

    // ==================== SUBSCRIBERS ====================

    /// Add a subscriber by email and/or phone
    ///
    /// Emails are trimmed and compared case-insensitively; phones are reduced
    /// to their digits. Either one must remain non-empty.
    pub async fn add_subscriber(
        &self,
        email: Option<&str>,
        phone: Option<&str>,
    ) -> Result<Subscriber, StoreError> {
        let email = email.unwrap_or_default().trim().to_string();
        let phone = normalize_phone(phone.unwrap_or_default());

        if email.is_empty() && phone.is_empty() {
            return Err(StoreError::InvalidInput("Email or phone is required".to_string()));
        }

        let mut data = self.data.write().await;

        if !email.is_empty()
            && data
                .subscribers
                .iter()
                .any(|s| s.email.to_lowercase() == email.to_lowercase())
        {
            return Err(StoreError::Conflict("Email already subscribed".to_string()));
        }
        if !phone.is_empty() && data.subscribers.iter().any(|s| s.phone == phone) {
            return Err(StoreError::Conflict("Phone already subscribed".to_string()));
        }

        let subscriber = Subscriber {
            id: self.ids.next_id(),
            email,
            phone,
            subscribed_at: Utc::now(),
            status: "active".to_string(),
        };
        data.subscribers.push(subscriber.clone());
        tracing::info!("New subscriber {}", subscriber.id);
        Ok(subscriber)
    }

    pub async fn list_subscribers(&self) -> Vec<Subscriber> {
        self.data.read().await.subscribers.clone()
    }

    /// Remove every subscriber identified by email, id or phone
    pub async fn remove_subscriber(&self, identifier: &str) -> Result<usize, StoreError> {
        let mut data = self.data.write().await;
        let before = data.subscribers.len();
        data.subscribers.retain(|s| !s.is_identified_by(identifier));
        let removed = before - data.subscribers.len();

        if removed == 0 {
            return Err(StoreError::NotFound(format!("subscriber {}", identifier)));
        }
        Ok(removed)
    }

    // ==================== USERS ====================

    /// Look up an account by credentials
    pub async fn find_user(&self, username: &str, password: &str) -> Option<User> {
        self.data
            .read()
            .await
            .users
            .iter()
            .find(|u| u.username == username && u.password == password)
            .cloned()
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Keep only the digits of a phone number
pub fn normalize_phone(phone: &str) -> String {
    phone.chars().filter(|c| c.is_ascii_digit()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn booking_request(event_id: &str) -> CreateBookingRequest {
        CreateBookingRequest {
            event_id: event_id.to_string(),
            user_name: "Asha".to_string(),
            user_email: "asha@example.com".to_string(),
            guest_count: 4,
            phone: None,
            message: None,
            user_id: None,
        }
    }

    #[tokio::test]
    async fn test_list_events_filters() {
        let store = InMemoryStore::seeded();

        let music = store
            .list_events(&EventFilter {
                category: Some("music".to_string()),
                ..EventFilter::default()
            })
            .await;
        assert_eq!(music.len(), 1);
        assert_eq!(music[0].id, "1");

        let london = store
            .list_events(&EventFilter {
                location: Some("LONDON".to_string()),
                ..EventFilter::default()
            })
            .await;
        assert_eq!(london.len(), 1);

        let dated = store
            .list_events(&EventFilter {
                date: Some("2024-06-10".to_string()),
                ..EventFilter::default()
            })
            .await;
        assert_eq!(dated[0].title, "Gourmet Food Tour");

        assert_eq!(store.list_events(&EventFilter::default()).await.len(), 5);
    }

    #[tokio::test]
    async fn test_create_event_defaults() {
        let store = InMemoryStore::new();
        let event = store
            .create_event(CreateEventRequest {
                title: "Harbour Gala".to_string(),
                description: None,
                date: "2024-12-01".to_string(),
                location: "Chennai".to_string(),
                category: "Gala".to_string(),
                price: None,
                image_url: None,
                organizer: "Coastline".to_string(),
                featured: None,
            })
            .await;

        assert_eq!(event.description, "");
        assert_eq!(event.price, 0.0);
        assert_eq!(event.image_url, DEFAULT_IMAGE_URL);
        assert!(!event.featured);
        assert_eq!(store.get_event(&event.id).await.unwrap(), event);
    }

    #[tokio::test]
    async fn test_update_event_merges_fields() {
        let store = InMemoryStore::seeded();
        let updated = store
            .update_event(
                "4",
                UpdateEventRequest {
                    price: Some(60.0),
                    featured: Some(true),
                    ..UpdateEventRequest::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.title, "Contemporary Art Expo");
        assert_eq!(updated.price, 60.0);
        assert!(updated.featured);
    }

    #[tokio::test]
    async fn test_delete_missing_event() {
        let store = InMemoryStore::seeded();
        assert!(matches!(store.delete_event("404").await, Err(StoreError::NotFound(_))));
        assert!(store.delete_event("5").await.is_ok());
        assert_eq!(store.event_count().await, 4);
    }

    #[tokio::test]
    async fn test_booking_copies_event_title() {
        let store = InMemoryStore::seeded();
        let booking = store.create_booking(booking_request("3")).await.unwrap();

        assert_eq!(booking.event_name, "Gourmet Food Tour");
        assert_eq!(booking.user_id, "guest");
        assert_eq!(booking.tickets, 4);
        assert_eq!(booking.status, BookingStatus::Pending);
    }

    #[tokio::test]
    async fn test_booking_unknown_event() {
        let store = InMemoryStore::seeded();
        assert!(matches!(
            store.create_booking(booking_request("99")).await,
            Err(StoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_update_booking_note() {
        let store = InMemoryStore::seeded();

        let kept = store
            .update_booking("2", Some(BookingStatus::Rejected), None)
            .await
            .unwrap();
        assert_eq!(kept.status, BookingStatus::Rejected);
        assert!(kept.admin_note.is_some());
        assert!(kept.updated_at.is_some());

        let cleared = store.update_booking("2", None, Some(None)).await.unwrap();
        assert_eq!(cleared.status, BookingStatus::Rejected);
        assert!(cleared.admin_note.is_none());
    }

    #[tokio::test]
    async fn test_list_bookings_by_user() {
        let store = InMemoryStore::seeded();
        assert_eq!(store.list_bookings(Some("1")).await.len(), 2);
        assert!(store.list_bookings(Some("2")).await.is_empty());
        assert_eq!(store.list_bookings(None).await.len(), 2);
    }

    #[tokio::test]
    async fn test_subscriber_uniqueness() {
        let store = InMemoryStore::seeded();

        let err = store.add_subscriber(Some(" TEST@example.com "), None).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));

        let added = store
            .add_subscriber(None, Some("+91 98400-12345"))
            .await
            .unwrap();
        assert_eq!(added.phone, "919840012345");
        assert_eq!(added.email, "");

        let err = store.add_subscriber(None, Some("91 9840012345")).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));

        let err = store.add_subscriber(Some("  "), Some("abc")).await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_remove_subscriber_by_any_identifier() {
        let store = InMemoryStore::seeded();
        let added = store.add_subscriber(None, Some("5550001111")).await.unwrap();

        assert_eq!(store.remove_subscriber("5550001111").await.unwrap(), 1);
        assert_eq!(store.remove_subscriber("test@example.com").await.unwrap(), 1);
        assert!(store.remove_subscriber(&added.id).await.is_err());
        assert!(store.list_subscribers().await.is_empty());
    }

    #[tokio::test]
    async fn test_find_user() {
        let store = InMemoryStore::seeded();
        assert!(store.find_user("admin", "admin123").await.unwrap().is_admin());
        assert!(store.find_user("admin", "wrong").await.is_none());
    }

    #[test]
    fn test_normalize_phone() {
        assert_eq!(normalize_phone("+1 (234) 567-890"), "1234567890");
        assert_eq!(normalize_phone("n/a"), "");
    }
}
