//! Optimistic profile update flow
//!
//! Coordinates `submit_update` as an explicit three-phase protocol:
//!
//! 1. [`UpdateFlow::begin`] cancels in-flight fetches for the user key,
//!    snapshots the cache, and writes the candidate optimistically. The
//!    captured snapshot travels in a typed [`PendingUpdate`] context.
//! 2. The remote phase patches the server; its canonical record wins.
//! 3. [`UpdateFlow::commit`] stores the server record, or
//!    [`UpdateFlow::revert`] restores the snapshot on failure.
//!
//! Whatever the outcome, the user key is invalidated once so the next read
//! resynchronizes with the server.

use crate::api::UserApi;
use crate::cache::{keys, CacheClient};
use crate::error::{UserlinkError, UserlinkResult};
use crate::model::User;
use crate::notify::{Notice, Notifier};
use crate::session::Session;
use std::sync::Arc;
use tracing::{debug, warn};

/// Rollback context captured before the optimistic write
///
/// Threaded explicitly from [`UpdateFlow::begin`] to
/// [`UpdateFlow::revert`]; no closure captures mutable state.
#[derive(Debug)]
pub struct PendingUpdate {
    key: &'static str,
    previous: Option<User>,
}

impl PendingUpdate {
    /// The snapshot that will be restored on failure, if one existed
    pub fn previous(&self) -> Option<&User> {
        self.previous.as_ref()
    }
}

/// Orchestrates user profile updates with optimistic cache feedback
pub struct UpdateFlow {
    cache: Arc<CacheClient>,
    api: Arc<dyn UserApi>,
    session: Arc<Session>,
    notifier: Arc<dyn Notifier>,
}

impl UpdateFlow {
    pub fn new(
        cache: Arc<CacheClient>,
        api: Arc<dyn UserApi>,
        session: Arc<Session>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            cache,
            api,
            session,
            notifier,
        }
    }

    /// Submit a candidate profile for the signed-in user.
    ///
    /// Requires a cached user snapshot and a session credential; if either
    /// is missing the call resolves to `Ok(None)` without touching the
    /// cache or the network. Remote failures are absorbed: the cache rolls
    /// back, the user sees a warning, and the call still resolves `Ok`.
    pub async fn submit_update(&self, candidate: User) -> UserlinkResult<Option<User>> {
        let Some(original) = self.cache.get_user(keys::USER) else {
            debug!("no signed-in user, skipping update");
            return Ok(None);
        };
        let Some(token) = self.session.token() else {
            debug!("no session credential, skipping update");
            return Ok(None);
        };

        let ctx = self.begin(candidate.clone());

        let outcome = match self.api.patch_user(&token, &original, &candidate).await {
            Ok(updated) => self.commit(updated),
            Err(err) => {
                self.revert(ctx, &err);
                None
            }
        };

        // Settle: force the next read to resynchronize, success or not
        self.cache.invalidate(keys::USER);

        Ok(outcome)
    }

    /// Phase 1: cancel in-flight fetches, snapshot, and apply the candidate
    /// optimistically. Cancellation precedes the write so a late server
    /// response cannot overwrite the optimistic value.
    pub fn begin(&self, candidate: User) -> PendingUpdate {
        self.cache.cancel_queries(keys::USER);
        let previous = self.cache.get_user(keys::USER);
        self.cache.set_user(keys::USER, candidate);
        PendingUpdate {
            key: keys::USER,
            previous,
        }
    }

    /// Phase 3a: adopt the server's canonical record.
    ///
    /// The server may have normalized or enriched the submitted fields, so
    /// its record replaces the optimistic value. Skipped when the user has
    /// signed out mid-flight.
    pub fn commit(&self, updated: User) -> Option<User> {
        if self.cache.get_user(keys::USER).is_none() {
            debug!("user left scope before confirmation, not caching server record");
            return None;
        }
        self.cache.set_user(keys::USER, updated.clone());
        self.notifier.push(Notice::success("User updated!"));
        Some(updated)
    }

    /// Phase 3b: restore the pre-mutation snapshot and warn the user.
    ///
    /// With no captured snapshot there is nothing to restore and the cache
    /// is left as-is; whether that can happen outside a sign-out race is an
    /// open question inherited from the flow's origins, so it is logged
    /// rather than silently ignored.
    pub fn revert(&self, ctx: PendingUpdate, err: &UserlinkError) {
        warn!("profile update failed, rolling back: {err}");
        match ctx.previous {
            Some(previous) => self.cache.set_user(ctx.key, previous),
            None => warn!("no snapshot captured before optimistic write, cache left as-is"),
        }
        self.notifier
            .push(Notice::warning("Update failed; restoring previous values"));
    }
}
