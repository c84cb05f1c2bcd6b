use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

/// TTL applied when a caller passes 0.
pub const DEFAULT_TTL_HOURS: u32 = 24;

/// One cached upstream payload, stored as `<key>.json`.
///
/// `data` is embedded verbatim; the cache never looks inside it.
#[derive(Debug, Serialize, Deserialize)]
pub struct CacheEntry {
    pub data: Box<RawValue>,
    pub timestamp: DateTime<Utc>,
    pub ttl_hours: u32,
}

impl CacheEntry {
    #[must_use]
    pub fn new(data: Box<RawValue>, timestamp: DateTime<Utc>, ttl_hours: u32) -> Self {
        Self {
            data,
            timestamp,
            ttl_hours: if ttl_hours == 0 {
                DEFAULT_TTL_HOURS
            } else {
                ttl_hours
            },
        }
    }

    /// `None` when the expiry lies beyond the representable date range.
    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        let ttl = TimeDelta::try_hours(i64::from(self.ttl_hours))?;
        self.timestamp.checked_add_signed(ttl)
    }

    /// An entry whose expiry cannot be represented never expires.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at().is_some_and(|expires_at| now > expires_at)
    }
}
