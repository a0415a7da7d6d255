use chrono::{DateTime, NaiveDate};
use crate::models::Event;

/// Catalog prices are stored in USD and shown to users in rupees
pub const USD_TO_INR_RATE: f64 = 83.0;

/// Descriptions longer than this are cut in chat replies
pub const DESCRIPTION_PREVIEW_CHARS: usize = 80;

/// Convert a USD price to whole rupees
pub fn convert_to_rupees(price_usd: f64) -> i64 {
    if !price_usd.is_finite() || price_usd <= 0.0 {
        return 0;
    }
    (price_usd * USD_TO_INR_RATE).round() as i64
}

/// Format a USD price as rupees with Indian digit grouping, e.g. `₹1,00,000`.
/// Free or invalid prices render as `N/A`.
pub fn format_price_in_rupees(price_usd: f64) -> String {
    match convert_to_rupees(price_usd) {
        0 => "N/A".to_string(),
        inr => format!("₹{}", group_indian(inr)),
    }
}

/// Last three digits, then groups of two: 12345678 -> 1,23,45,678
fn group_indian(value: i64) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

/// Render an event date as `Mon, 15 Jul 2024`
///
/// Accepts ISO dates, RFC 3339 timestamps and long-form dates
/// ("July 15, 2024"); anything else is returned unchanged.
pub fn format_event_date(date: &str) -> String {
    let trimmed = date.trim();

    let parsed = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(trimmed).ok().map(|dt| dt.date_naive()))
        .or_else(|| NaiveDate::parse_from_str(trimmed, "%B %d, %Y").ok());

    match parsed {
        Some(day) => day.format("%a, %-d %b %Y").to_string(),
        None => trimmed.to_string(),
    }
}

/// Shorten a description to the preview length, marking the cut with `...`
pub fn truncate_description(description: &str) -> String {
    if description.chars().count() <= DESCRIPTION_PREVIEW_CHARS {
        return description.to_string();
    }
    let preview: String = description.chars().take(DESCRIPTION_PREVIEW_CHARS).collect();
    format!("{}...", preview)
}

/// Numbered list of events for a chat reply
pub fn format_event_response(events: &[Event], query: &str) -> String {
    if events.is_empty() {
        return format!(
            "I couldn't find any events matching \"{}\". However, I'd be happy to help you \
             browse our available events. Could you try a different search term or tell me \
             more about what you're looking for?",
            query
        );
    }

    let plural = if events.len() > 1 { "s" } else { "" };
    let mut response = format!(
        "Great! I found {} event{} that might interest you:\n\n",
        events.len(),
        plural
    );

    for (index, event) in events.iter().enumerate() {
        response.push_str(&format!("{}. **{}**\n", index + 1, event.title));
        response.push_str(&format!("   Location: {}\n", event.location));
        response.push_str(&format!("   Date: {}\n", format_event_date(&event.date)));
        response.push_str(&format!("   Price: {}\n", format_price_in_rupees(event.price)));
        if !event.description.is_empty() {
            response.push_str(&format!(
                "   About: {}\n",
                truncate_description(&event.description)
            ));
        }
        response.push_str(&format!("   Category: {}\n\n", event.category));
    }

    response.push_str(
        "Would you like more details about any of these events, or should I search for something else?",
    );
    response
}
