//! Stored cache entries

use tokio::time::Instant;

/// One cached value and the instant it stops being served.
///
/// The value is held as serialised JSON so that every read hands back an
/// independent copy and a damaged entry shows up as a decode failure.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub value: String,
    pub expires_at: Instant,
}

impl CacheEntry {
    #[must_use]
    pub fn new(value: String, expires_at: Instant) -> Self {
        Self { value, expires_at }
    }

    /// An entry is expired from its deadline onwards
    #[inline]
    #[must_use]
    pub fn is_expired_at(&self, now: Instant) -> bool {
        self.expires_at <= now
    }
}
