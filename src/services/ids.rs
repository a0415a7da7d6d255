use std::sync::atomic::{AtomicU64, Ordering};

/// Issues strictly increasing identifiers
///
/// Identifiers follow the wall clock in milliseconds so they sort by
/// creation time, and are bumped past the previous value when two records
/// are created within the same millisecond or the clock steps back.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: AtomicU64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&self) -> String {
        let now = chrono::Utc::now().timestamp_millis().max(0) as u64;
        self.next_after(now).to_string()
    }

    fn next_after(&self, now: u64) -> u64 {
        let previous = self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(now.max(last + 1))
            })
            .unwrap_or_else(|last| last);
        now.max(previous + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_strictly_increase() {
        let ids = IdGenerator::new();
        let mut previous = 0u64;
        for _ in 0..1000 {
            let id: u64 = ids.next_id().parse().unwrap();
            assert!(id > previous);
            previous = id;
        }
    }

    #[test]
    fn test_clock_going_backwards() {
        let ids = IdGenerator::new();
        assert_eq!(ids.next_after(500), 500);
        assert_eq!(ids.next_after(400), 501);
        assert_eq!(ids.next_after(501), 502);
        assert_eq!(ids.next_after(900), 900);
    }
}
