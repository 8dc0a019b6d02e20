use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use chrono::TimeDelta;
use parking_lot::RwLock;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::util::time::{Clock, SystemClock};

use super::source::ChannelSource;
use super::types::{CacheSnapshot, ChannelList};

/// What a caller receives when a refresh fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StalePolicy {
    /// An empty channel list; stale data is never served.
    #[default]
    Empty,
    /// The last good snapshot's channels, if there is one.
    ServeStale,
}

/// Outcome of the most recent refresh attempt, guarded by the refresh lock.
#[derive(Default)]
struct RefreshState {
    attempt: u64,
    outcome: Option<ChannelList>,
}

/**
    Process-wide cache of the origin channel list.

    Holds at most one snapshot, served until it is older than the TTL.
    Staleness is checked lazily on access; there is no background timer.

    Refreshes are single-flight: concurrent callers that find the snapshot
    stale queue on one refresh lock, and those that were waiting while
    another caller refreshed take that refresh's outcome instead of hitting
    the origin again.
*/
pub struct ChannelCache<S, C = SystemClock> {
    source: S,
    clock: C,
    ttl: TimeDelta,
    stale_policy: StalePolicy,
    snapshot: RwLock<Option<Arc<CacheSnapshot>>>,
    refresh: Mutex<RefreshState>,
    attempts: AtomicU64,
}

impl<S: ChannelSource> ChannelCache<S> {
    pub fn new(source: S, ttl: Duration) -> Self {
        Self::with_clock(source, SystemClock, ttl)
    }
}

impl<S: ChannelSource, C: Clock> ChannelCache<S, C> {
    pub fn with_clock(source: S, clock: C, ttl: Duration) -> Self {
        Self {
            source,
            clock,
            ttl: TimeDelta::from_std(ttl).unwrap_or(TimeDelta::MAX),
            stale_policy: StalePolicy::default(),
            snapshot: RwLock::new(None),
            refresh: Mutex::new(RefreshState::default()),
            attempts: AtomicU64::new(0),
        }
    }

    pub fn with_stale_policy(mut self, policy: StalePolicy) -> Self {
        self.stale_policy = policy;
        self
    }

    /// The live snapshot, fresh or not.
    pub fn snapshot(&self) -> Option<Arc<CacheSnapshot>> {
        self.snapshot.read().clone()
    }

    /**
        Return the current channel list, refreshing from the origin when the
        snapshot is missing or expired.

        Never fails: an origin error is logged and the caller gets an empty
        list (or stale channels under [`StalePolicy::ServeStale`]).
    */
    pub async fn get_or_refresh(&self) -> ChannelList {
        if let Some(records) = self.fresh_records() {
            debug!(channels = records.len(), "serving channels from cache");
            return records;
        }

        let observed = self.attempts.load(Ordering::Acquire);
        let mut state = self.refresh.lock().await;

        // Someone else refreshed while we were waiting for the lock
        if state.attempt != observed {
            return match &state.outcome {
                Some(records) => Arc::clone(records),
                None => self.fallback_records(),
            };
        }

        if let Some(records) = self.fresh_records() {
            return records;
        }

        let outcome = self.refresh_from_origin().await;

        state.attempt += 1;
        state.outcome = outcome.clone();
        self.attempts.store(state.attempt, Ordering::Release);

        outcome.unwrap_or_else(|| self.fallback_records())
    }

    fn fresh_records(&self) -> Option<ChannelList> {
        let now = self.clock.now();
        self.snapshot
            .read()
            .as_ref()
            .filter(|snapshot| snapshot.is_fresh(now, self.ttl))
            .map(|snapshot| Arc::clone(&snapshot.records))
    }

    async fn refresh_from_origin(&self) -> Option<ChannelList> {
        info!("channel list missing or expired, fetching from origin");

        match self.source.fetch().await {
            Ok(records) => {
                let snapshot = Arc::new(CacheSnapshot::new(records, self.clock.now()));
                let records = Arc::clone(&snapshot.records);
                *self.snapshot.write() = Some(snapshot);
                info!(channels = records.len(), "loaded and cached channels");
                Some(records)
            }
            Err(e) => {
                warn!(error = %e, "failed to load channels from origin");
                None
            }
        }
    }

    fn fallback_records(&self) -> ChannelList {
        match self.stale_policy {
            StalePolicy::Empty => Arc::from(Vec::new()),
            StalePolicy::ServeStale => self
                .snapshot
                .read()
                .as_ref()
                .map(|snapshot| Arc::clone(&snapshot.records))
                .unwrap_or_else(|| Arc::from(Vec::new())),
        }
    }
}
