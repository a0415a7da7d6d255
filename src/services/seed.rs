use chrono::Utc;
use crate::models::{Booking, BookingStatus, Event, Role, Subscriber, User};

/// Catalog the service starts with
pub fn events() -> Vec<Event> {
    vec![
        event(
            "1",
            "Summer Music Festival 2024",
            "The biggest outdoor music experience of the year featuring top international artists.",
            "2024-07-15",
            "Central Park, New York",
            "Music",
            120.0,
            "music",
            "Vibe Events",
            true,
        ),
        event(
            "2",
            "AI & Future Tech Summit",
            "Join industry leaders to discuss the next frontier of artificial intelligence and robotics.",
            "2024-08-22",
            "Convention Center, San Francisco",
            "Technology",
            499.0,
            "tech",
            "TechConnect",
            true,
        ),
        event(
            "3",
            "Gourmet Food Tour",
            "A curated journey through the city's hidden culinary gems and Michelin-starred bites.",
            "2024-06-10",
            "Downtown, Chicago",
            "Food & Drink",
            85.0,
            "food",
            "Taste Hunters",
            false,
        ),
        event(
            "4",
            "Contemporary Art Expo",
            "Explore breathtaking works from emerging artists across the globe.",
            "2024-09-05",
            "Modern Art Gallery, London",
            "Art",
            45.0,
            "art",
            "ArtScape",
            false,
        ),
        event(
            "5",
            "Startup Pitch Night",
            "Watch the hottest new startups pitch to elite venture capitalists.",
            "2024-10-12",
            "Innovation Hub, Austin",
            "Business",
            25.0,
            "business",
            "Ventures X",
            false,
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn event(
    id: &str,
    title: &str,
    description: &str,
    date: &str,
    location: &str,
    category: &str,
    price: f64,
    image_seed: &str,
    organizer: &str,
    featured: bool,
) -> Event {
    Event {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        date: date.to_string(),
        location: location.to_string(),
        category: category.to_string(),
        price,
        image_url: format!("https://picsum.photos/seed/{}/800/600", image_seed),
        organizer: organizer.to_string(),
        featured,
    }
}

/// Demo accounts
pub fn users() -> Vec<User> {
    vec![
        User {
            id: "1".to_string(),
            username: "user1".to_string(),
            password: "pass123".to_string(),
            role: Role::User,
        },
        User {
            id: "2".to_string(),
            username: "admin".to_string(),
            password: "admin123".to_string(),
            role: Role::Admin,
        },
    ]
}

pub fn bookings() -> Vec<Booking> {
    let now = Utc::now();
    vec![
        Booking {
            id: "1".to_string(),
            user_id: "1".to_string(),
            event_id: "1".to_string(),
            event_name: "Summer Music Festival 2024".to_string(),
            user_name: "John Doe".to_string(),
            user_email: "john@example.com".to_string(),
            phone: Some("+1234567890".to_string()),
            guest_count: 150,
            tickets: 150,
            message: Some(
                "Looking for a premium venue for our annual music festival. Need stage setup and catering."
                    .to_string(),
            ),
            status: BookingStatus::Pending,
            created_at: now,
            updated_at: None,
            admin_note: None,
        },
        Booking {
            id: "2".to_string(),
            user_id: "1".to_string(),
            event_id: "2".to_string(),
            event_name: "AI & Future Tech Summit".to_string(),
            user_name: "John Doe".to_string(),
            user_email: "john@example.com".to_string(),
            phone: Some("+1234567890".to_string()),
            guest_count: 200,
            tickets: 200,
            message: Some("Corporate conference with networking sessions".to_string()),
            status: BookingStatus::Approved,
            created_at: now,
            updated_at: None,
            admin_note: Some(
                "Venue confirmed for 200 guests. Catering and AV setup arranged.".to_string(),
            ),
        },
    ]
}

pub fn subscribers() -> Vec<Subscriber> {
    vec![Subscriber {
        id: "1".to_string(),
        email: "test@example.com".to_string(),
        phone: String::new(),
        subscribed_at: Utc::now(),
        status: "active".to_string(),
    }]
}
