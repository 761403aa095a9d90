//! Cache entries and keys

use std::fmt;
use std::time::Duration;

use tokio::time::Instant;

/// Expiry used when `now + ttl` does not fit in an `Instant`
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

/// A stored value and its absolute expiry
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    pub value: V,
    pub expires_at: Instant,
}

impl<V> CacheEntry<V> {
    pub fn new(value: V, ttl: Duration) -> Self {
        let now = Instant::now();
        Self {
            value,
            expires_at: now.checked_add(ttl).unwrap_or(now + FAR_FUTURE),
        }
    }

    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    /// Time left before expiry, zero once expired
    pub fn ttl_remaining(&self) -> Duration {
        self.expires_at.saturating_duration_since(Instant::now())
    }
}

/// Composite key for search responses: data-type id plus normalized term
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    data_type: String,
    term: String,
}

impl CacheKey {
    /// Build the key for a search. The term is upper-cased to match how the
    /// query builder treats it; whitespace is kept.
    pub fn search(data_type: &str, term: &str) -> Self {
        Self {
            data_type: data_type.to_string(),
            term: term.to_uppercase(),
        }
    }

    pub fn data_type(&self) -> &str {
        &self.data_type
    }

    pub fn term(&self) -> &str {
        &self.term
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.data_type, self.term)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_key_normalizes_case() {
        assert_eq!(CacheKey::search("cc", "fin"), CacheKey::search("cc", "FIN"));
        assert_ne!(CacheKey::search("cc", "fin"), CacheKey::search("wbs", "fin"));
        assert_ne!(CacheKey::search("cc", "fin"), CacheKey::search("cc", " fin"));
    }

    #[test]
    fn test_key_parts_do_not_collide() {
        assert_ne!(CacheKey::search("a:b", "c"), CacheKey::search("a", "b:c"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_expiry() {
        let entry = CacheEntry::new(1, Duration::from_secs(10));
        assert!(!entry.is_expired());
        tokio::time::advance(Duration::from_secs(10)).await;
        assert!(entry.is_expired());
        assert_eq!(entry.ttl_remaining(), Duration::ZERO);
    }

    #[tokio::test]
    async fn test_unbounded_ttl_does_not_overflow() {
        let entry = CacheEntry::new(1, Duration::MAX);
        assert!(!entry.is_expired());
        assert!(entry.ttl_remaining() > Duration::from_secs(86_400 * 365));
    }
}
