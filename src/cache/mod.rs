//! Client-side query cache
//!
//! Keyed snapshots of server data with a staleness window, a retention
//! window, and a central error hook. The cache is an explicit service
//! object: construct one with [`build_cache_client`] (or
//! [`CacheClient::new`] for bare policy) and share it by `Arc`.
//!
//! # Cache states
//!
//! | State | Read behavior |
//! |-------|---------------|
//! | Fresh | Served from cache, no fetch |
//! | Stale | Refetched on explicit reads; ambient reads obey policy flags |
//! | Evicted | Treated as a miss, fetched on demand |

mod client;
mod entry;
mod factory;

pub use client::{CacheClient, RefetchTrigger};
pub use factory::{build_cache_client, ERROR_NOTICE_ID};

/// Well-known cache keys
pub mod keys {
    /// The signed-in user's profile
    pub const USER: &str = "user";
}
