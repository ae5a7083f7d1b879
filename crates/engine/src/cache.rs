use std::collections::HashMap;
use std::time::Duration;

use relaunch_common::ids::{TickHandle, ToolPath};

use crate::host::TickHost;

/// Recently closed tools, each kept for a grace window before eviction.
///
/// Expiry is driven by host ticks rather than wall-clock time: every entry
/// owns one tick subscription, and the single tick handler routes deliveries
/// back to the entry through `subscriptions`.
#[derive(Debug)]
pub struct DelayedEvictionCache {
    entries: HashMap<ToolPath, TrackedEntry>,
    /// Insertion order, for the shutdown snapshot.
    order: Vec<ToolPath>,
    subscriptions: HashMap<TickHandle, ToolPath>,
    grace_window: Duration,
}

#[derive(Debug)]
struct TrackedEntry {
    elapsed: f64,
    handle: TickHandle,
}

/// What a tick did to the addressed entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing tracked under that key (never tracked, or already evicted).
    Untracked,
    /// Still inside the grace window.
    Pending,
    /// Grace window exceeded; entry removed and its subscription released.
    Evicted,
}

impl DelayedEvictionCache {
    pub fn new(grace_window: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            order: Vec::new(),
            subscriptions: HashMap::new(),
            grace_window,
        }
    }

    pub fn grace_window(&self) -> Duration {
        self.grace_window
    }

    /// Start tracking a closed tool. Returns false if it was already tracked.
    pub fn track(&mut self, identifier: ToolPath, host: &mut impl TickHost) -> bool {
        if self.entries.contains_key(&identifier) {
            tracing::debug!(tool = %identifier, "Tool already tracked, ignoring duplicate close");
            metrics::counter!("relaunch.cache.duplicate").increment(1);
            return false;
        }

        let handle = host.subscribe_tick();
        self.subscriptions.insert(handle, identifier.clone());
        self.order.push(identifier.clone());
        self.entries.insert(
            identifier.clone(),
            TrackedEntry {
                elapsed: 0.0,
                handle,
            },
        );

        tracing::info!(tool = %identifier, handle = %handle, "Begin tracking tool");
        metrics::counter!("relaunch.cache.tracked").increment(1);
        metrics::gauge!("relaunch.cache.size").set(self.entries.len() as f64);
        true
    }

    /// Advance an entry's timer, evicting it once past the grace window.
    ///
    /// Negative or non-finite deltas count as zero so `elapsed` never goes backwards.
    pub fn on_tick(
        &mut self,
        identifier: &ToolPath,
        delta: f64,
        host: &mut impl TickHost,
    ) -> TickOutcome {
        let Some(entry) = self.entries.get_mut(identifier) else {
            return TickOutcome::Untracked;
        };

        if delta.is_finite() && delta > 0.0 {
            entry.elapsed += delta;
        }

        if entry.elapsed > self.grace_window.as_secs_f64() {
            self.evict(identifier, host);
            TickOutcome::Evicted
        } else {
            TickOutcome::Pending
        }
    }

    /// Route a tick delivered for `handle` to the entry that owns it.
    pub fn dispatch(
        &mut self,
        handle: TickHandle,
        delta: f64,
        host: &mut impl TickHost,
    ) -> TickOutcome {
        let Some(identifier) = self.subscriptions.get(&handle).cloned() else {
            return TickOutcome::Untracked;
        };
        self.on_tick(&identifier, delta, host)
    }

    /// Identifiers still tracked, oldest first.
    pub fn snapshot_identifiers(&self) -> Vec<ToolPath> {
        self.order.clone()
    }

    /// Release every subscription and forget all entries.
    pub fn clear(&mut self, host: &mut impl TickHost) {
        let order = std::mem::take(&mut self.order);
        for identifier in &order {
            self.evict(identifier, host);
        }
        metrics::gauge!("relaunch.cache.size").set(0.0);
    }

    pub fn contains(&self, identifier: &ToolPath) -> bool {
        self.entries.contains_key(identifier)
    }

    /// Seconds accumulated by a tracked entry.
    pub fn elapsed(&self, identifier: &ToolPath) -> Option<f64> {
        self.entries.get(identifier).map(|entry| entry.elapsed)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn evict(&mut self, identifier: &ToolPath, host: &mut impl TickHost) {
        // Remove before releasing so a reentrant tick finds nothing to release.
        let Some(entry) = self.entries.remove(identifier) else {
            return;
        };
        self.subscriptions.remove(&entry.handle);
        self.order.retain(|tracked| tracked != identifier);

        host.unsubscribe_tick(entry.handle);

        tracing::info!(tool = %identifier, elapsed = entry.elapsed, "No longer tracking tool");
        metrics::counter!("relaunch.cache.evicted").increment(1);
        metrics::gauge!("relaunch.cache.size").set(self.entries.len() as f64);
    }
}
