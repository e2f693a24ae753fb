//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with expiry support.

use chrono::{DateTime, Duration, Utc};

// == Cache Entry ==
/// A stored value together with the instant it stops being visible.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry<V> {
    /// The stored value, never inspected by the cache
    pub value: V,
    /// Expiration instant, None = no expiration
    pub expires_at: Option<DateTime<Utc>>,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new entry expiring `timeout` after `now`.
    ///
    /// A timeout too large to represent as an instant is treated as
    /// "never expires".
    ///
    /// # Arguments
    /// * `value` - The value to store
    /// * `timeout` - Optional lifetime, None = no expiration
    /// * `now` - The instant the entry is created at
    pub fn new(value: V, timeout: Option<Duration>, now: DateTime<Utc>) -> Self {
        let expires_at = timeout.and_then(|timeout| now.checked_add_signed(timeout));

        Self { value, expires_at }
    }

    // == Is Live ==
    /// Checks whether the entry is still visible at `now`.
    ///
    /// Boundary condition: the entry stops being live the moment `now`
    /// reaches `expires_at`, so a 5 second entry is gone exactly 5 seconds
    /// after it was stored.
    pub fn is_live_at(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at {
            Some(expires) => now < expires,
            None => true,
        }
    }

    // == Time To Live ==
    /// Returns the remaining lifetime, or None if no expiration is set.
    ///
    /// # Returns
    /// - `Some(Duration::zero())` if the entry has expired
    /// - `Some(remaining)` if the entry has a TTL and is still live
    /// - `None` if the entry never expires
    pub fn ttl_remaining(&self, now: DateTime<Utc>) -> Option<Duration> {
        self.expires_at
            .map(|expires| (expires - now).max(Duration::zero()))
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn epoch() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_entry_creation_no_timeout() {
        let entry = CacheEntry::new("clark kent", None, epoch());

        assert_eq!(entry.value, "clark kent");
        assert!(entry.expires_at.is_none());
        assert!(entry.is_live_at(epoch()));
    }

    #[test]
    fn test_entry_creation_with_timeout() {
        let entry = CacheEntry::new(42, Some(Duration::seconds(60)), epoch());

        assert_eq!(entry.expires_at, Some(epoch() + Duration::seconds(60)));
        assert!(entry.is_live_at(epoch()));
    }

    #[test]
    fn test_no_timeout_never_expires() {
        let entry = CacheEntry::new(vec![1, 2, 3], None, epoch());

        assert!(entry.is_live_at(epoch() + Duration::days(10 * 365)));
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let entry = CacheEntry::new("x", Some(Duration::seconds(5)), epoch());

        assert!(entry.is_live_at(epoch() + Duration::milliseconds(4_999)));
        assert!(!entry.is_live_at(epoch() + Duration::seconds(5)));
        assert!(!entry.is_live_at(epoch() + Duration::seconds(6)));
    }

    #[test]
    fn test_non_positive_timeout_is_born_expired() {
        let zero = CacheEntry::new("a", Some(Duration::zero()), epoch());
        let negative = CacheEntry::new("b", Some(Duration::seconds(-10)), epoch());

        assert!(!zero.is_live_at(epoch()));
        assert!(!negative.is_live_at(epoch()));
    }

    #[test]
    fn test_ttl_remaining() {
        let entry = CacheEntry::new("x", Some(Duration::seconds(10)), epoch());

        assert_eq!(
            entry.ttl_remaining(epoch() + Duration::seconds(3)),
            Some(Duration::seconds(7))
        );
    }

    #[test]
    fn test_ttl_remaining_no_expiration() {
        let entry = CacheEntry::new("x", None, epoch());

        assert!(entry.ttl_remaining(epoch()).is_none());
    }

    #[test]
    fn test_ttl_remaining_expired() {
        let entry = CacheEntry::new("x", Some(Duration::seconds(1)), epoch());

        assert_eq!(
            entry.ttl_remaining(epoch() + Duration::minutes(1)),
            Some(Duration::zero())
        );
    }
}
