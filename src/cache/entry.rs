//! Cache entry bookkeeping

use crate::model::User;
use chrono::{DateTime, Utc};

/// A single cached user snapshot with freshness metadata
#[derive(Debug, Clone)]
pub(crate) struct CacheEntry {
    /// Latest known snapshot
    pub(crate) value: User,

    /// When the value was last written (fetch, optimistic write, or rollback)
    pub(crate) fetched_at: DateTime<Utc>,

    /// When the value was last read or written, for retention
    pub(crate) last_used: DateTime<Utc>,

    /// Explicitly invalidated: the next read must refetch
    pub(crate) stale: bool,
}

impl CacheEntry {
    pub(crate) fn new(value: User, now: DateTime<Utc>) -> Self {
        Self {
            value,
            fetched_at: now,
            last_used: now,
            stale: false,
        }
    }

    /// Record a use for retention accounting
    pub(crate) fn touch(&mut self, now: DateTime<Utc>) {
        self.last_used = now;
    }

    /// Fresh data is served without a refetch
    pub(crate) fn is_fresh(&self, stale_time: chrono::Duration, now: DateTime<Utc>) -> bool {
        !self.stale && now - self.fetched_at < stale_time
    }

    /// Unused entries past the retention window are evicted
    pub(crate) fn is_evictable(&self, cache_time: chrono::Duration, now: DateTime<Utc>) -> bool {
        now - self.last_used > cache_time
    }
}
