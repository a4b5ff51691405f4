//! Cache client factory
//!
//! Wires the default policy to a notifier-backed error handler. Repeated
//! fetch failures replace the previous error notice instead of stacking:
//! every notice carries the same fixed id and the old one is dismissed
//! before the next is pushed.

use super::client::CacheClient;
use crate::config::CacheConfig;
use crate::notify::{Notice, Notifier, Variant};
use std::sync::Arc;

/// Fixed id shared by every centrally reported error notice
pub const ERROR_NOTICE_ID: &str = "userlink-query-error";

/// Build a cache client with the given policy and a de-duplicated
/// error-to-notification handler.
///
/// The returned client carries no other state; callers hold the `Arc` and
/// pass it to every data-fetching call site.
pub fn build_cache_client(config: &CacheConfig, notifier: Arc<dyn Notifier>) -> Arc<CacheClient> {
    let client = CacheClient::with_error_hook(config.clone(), move |err| {
        notifier.dismiss(ERROR_NOTICE_ID);
        notifier.push(
            Notice::error(err.to_string())
                .with_id(ERROR_NOTICE_ID)
                .with_variant(Variant::Subtle)
                .closable(),
        );
    });
    Arc::new(client)
}
