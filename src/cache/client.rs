//! Query-cache service
//!
//! An explicit service object owning every cached user snapshot. Call sites
//! hold an `Arc<CacheClient>` and pass it by reference; there is no hidden
//! process-wide instance.
//!
//! Writes come from exactly four places: the query path (server fetch), the
//! mutation flow's optimistic write, its commit, and its rollback. A
//! per-key generation counter lets explicit writes supersede any fetch that
//! was already in flight, so a late server response cannot clobber a newer
//! optimistic value.

use super::entry::CacheEntry;
use crate::config::CacheConfig;
use crate::error::{UserlinkError, UserlinkResult};
use crate::model::User;
use chrono::Utc;
use dashmap::DashMap;
use std::future::Future;
use tokio::task::AbortHandle;
use tracing::{debug, warn};

/// What prompted a read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefetchTrigger {
    /// Deliberate read by application code; may always refetch
    Explicit,
    /// A view mounted
    Mount,
    /// Connectivity returned
    Reconnect,
    /// The window regained focus
    WindowFocus,
}

type ErrorHook = Box<dyn Fn(&UserlinkError) + Send + Sync>;

/// Keyed cache of user snapshots with staleness and retention policy
pub struct CacheClient {
    entries: DashMap<String, CacheEntry>,
    pending: DashMap<String, Vec<AbortHandle>>,
    generations: DashMap<String, u64>,
    policy: CacheConfig,
    on_error: Option<ErrorHook>,
}

impl CacheClient {
    /// Create a cache with the given policy and no error hook
    pub fn new(policy: CacheConfig) -> Self {
        Self {
            entries: DashMap::new(),
            pending: DashMap::new(),
            generations: DashMap::new(),
            policy,
            on_error: None,
        }
    }

    /// Create a cache that routes every fetch failure through `hook`
    pub fn with_error_hook(
        policy: CacheConfig,
        hook: impl Fn(&UserlinkError) + Send + Sync + 'static,
    ) -> Self {
        Self {
            on_error: Some(Box::new(hook)),
            ..Self::new(policy)
        }
    }

    /// Get the cached snapshot for `key`, if any.
    ///
    /// Snapshot access ignores staleness: a stale value is still the
    /// last-known-good state until a refetch replaces it.
    pub fn get_user(&self, key: &str) -> Option<User> {
        self.purge_expired();
        let mut entry = self.entries.get_mut(key)?;
        entry.touch(Utc::now());
        Some(entry.value.clone())
    }

    /// Write a snapshot for `key`, superseding any in-flight fetch
    pub fn set_user(&self, key: &str, user: User) {
        self.bump_generation(key);
        self.entries
            .insert(key.to_string(), CacheEntry::new(user, Utc::now()));
    }

    /// Drop the entry for `key`
    pub fn remove(&self, key: &str) {
        self.entries.remove(key);
    }

    /// Mark `key` stale so the next read refetches
    pub fn invalidate(&self, key: &str) {
        if let Some(mut entry) = self.entries.get_mut(key) {
            debug!("invalidating {key}");
            entry.stale = true;
        }
    }

    /// Whether a read of `key` would refetch (missing entries count as stale)
    pub fn is_stale(&self, key: &str) -> bool {
        match self.entries.get(key) {
            Some(entry) => !entry.is_fresh(self.policy.stale_time(), Utc::now()),
            None => true,
        }
    }

    /// Abort in-flight fetches for `key`.
    ///
    /// Issued by the mutation flow before its optimistic write. Best effort:
    /// a fetch that already completed is not undone.
    pub fn cancel_queries(&self, key: &str) {
        self.bump_generation(key);
        if let Some((_, handles)) = self.pending.remove(key) {
            debug!("cancelling {} pending fetch(es) for {key}", handles.len());
            for handle in handles {
                handle.abort();
            }
        }
    }

    /// Read `key`, fetching from the server when the cached value is absent
    /// or too old to serve.
    ///
    /// Fresh data (younger than `stale_time`, not invalidated) is returned
    /// without running `fetcher`. Stale data is refetched only when the
    /// trigger is explicit or the matching `refetch_on_*` policy flag is
    /// enabled; otherwise the stale value is served as-is. Fetch failures
    /// are routed through the error hook and returned to the caller;
    /// cancelled fetches yield [`UserlinkError::QueryCancelled`] and skip
    /// the hook.
    pub async fn query<F>(
        &self,
        key: &str,
        trigger: RefetchTrigger,
        fetcher: F,
    ) -> UserlinkResult<User>
    where
        F: Future<Output = UserlinkResult<User>> + Send + 'static,
    {
        self.purge_expired();

        let now = Utc::now();
        let cached = self.entries.get_mut(key).map(|mut entry| {
            entry.touch(now);
            let fresh = entry.is_fresh(self.policy.stale_time(), now);
            (entry.value.clone(), fresh)
        });

        if let Some((value, fresh)) = cached {
            if fresh {
                debug!("cache hit for {key}");
                return Ok(value);
            }
            if !self.refetch_allowed(trigger) {
                debug!("serving stale {key}, ambient refetch disabled");
                return Ok(value);
            }
        }

        self.run_fetch(key, fetcher).await
    }

    fn refetch_allowed(&self, trigger: RefetchTrigger) -> bool {
        match trigger {
            RefetchTrigger::Explicit => true,
            RefetchTrigger::Mount => self.policy.refetch_on_mount,
            RefetchTrigger::Reconnect => self.policy.refetch_on_reconnect,
            RefetchTrigger::WindowFocus => self.policy.refetch_on_window_focus,
        }
    }

    async fn run_fetch<F>(&self, key: &str, fetcher: F) -> UserlinkResult<User>
    where
        F: Future<Output = UserlinkResult<User>> + Send + 'static,
    {
        let generation = self.generation(key);
        debug!("fetching {key}");

        let task = tokio::spawn(fetcher);
        self.pending
            .entry(key.to_string())
            .or_default()
            .push(task.abort_handle());

        let result = task.await;

        if let Some(mut handles) = self.pending.get_mut(key) {
            handles.retain(|handle| !handle.is_finished());
        }

        match result {
            Ok(Ok(user)) => {
                if self.generation(key) == generation {
                    self.entries
                        .insert(key.to_string(), CacheEntry::new(user.clone(), Utc::now()));
                } else {
                    debug!("fetch for {key} superseded by a newer write, result not cached");
                }
                Ok(user)
            }
            Ok(Err(err)) => {
                self.report_error(&err);
                Err(err)
            }
            Err(join_err) if join_err.is_cancelled() => {
                debug!("fetch for {key} cancelled");
                Err(UserlinkError::QueryCancelled(key.to_string()))
            }
            Err(join_err) => Err(UserlinkError::Internal(format!(
                "fetch task for {key} failed: {join_err}"
            ))),
        }
    }

    fn generation(&self, key: &str) -> u64 {
        self.generations.get(key).map(|g| *g).unwrap_or(0)
    }

    fn bump_generation(&self, key: &str) {
        *self.generations.entry(key.to_string()).or_insert(0) += 1;
    }

    fn purge_expired(&self) {
        let now = Utc::now();
        let cache_time = self.policy.cache_time();
        self.entries.retain(|key, entry| {
            let keep = !entry.is_evictable(cache_time, now);
            if !keep {
                debug!("evicting {key}, unused past retention window");
            }
            keep
        });
    }

    fn report_error(&self, err: &UserlinkError) {
        match &self.on_error {
            Some(hook) => hook(err),
            None => warn!("query failed with no error hook installed: {err}"),
        }
    }
}
