//! Expiring, per-identity cart storage.
//!
//! Backed by a `moka` cache with time-to-idle expiry: every read or write of
//! an identity's cart resets its timer, and an entry left untouched for the
//! configured TTL is treated as absent. Expired entries are physically
//! removed by a background sweep task (see [`CartStore::spawn_sweeper`]).
//!
//! `moka` shards its map internally, so operations on different identities
//! don't contend on a single lock, and the sweep removes entries one at a
//! time without blocking foreground reads and writes.

use std::time::Duration;

use moka::future::Cache;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, instrument};

use minimart_core::Username;

use crate::models::Cart;

/// Default time an unused cart is kept.
pub const DEFAULT_CART_TTL: Duration = Duration::from_secs(60 * 60);

/// Default interval between expiry sweeps.
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(10 * 60);

/// Process-wide cart storage, keyed by username.
///
/// Cheap to clone; clones share the same underlying cache.
#[derive(Clone)]
pub struct CartStore {
    cache: Cache<Username, Cart>,
}

impl CartStore {
    /// Create an empty store whose entries expire after `ttl` without use.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        let cache = Cache::builder().time_to_idle(ttl).build();
        Self { cache }
    }

    /// The identity's cart, or an empty cart if there is none or it expired.
    pub async fn get(&self, identity: &Username) -> Cart {
        self.cache.get(identity).await.unwrap_or_default()
    }

    /// Replace the identity's cart and reset its expiry.
    pub async fn put(&self, identity: Username, cart: Cart) {
        self.cache.insert(identity, cart).await;
    }

    /// Drop the identity's cart immediately.
    pub async fn delete(&self, identity: &Username) {
        self.cache.invalidate(identity).await;
    }

    /// Approximate number of stored carts, exact right after a sweep.
    #[must_use]
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Remove expired carts now.
    #[instrument(skip(self))]
    pub async fn sweep(&self) {
        self.cache.run_pending_tasks().await;
        debug!(carts = self.cache.entry_count(), "Swept expired carts");
    }

    /// Start the background task that sweeps expired carts every `interval`.
    ///
    /// The task runs until the returned handle is aborted or the runtime
    /// shuts down.
    pub fn spawn_sweeper(&self, interval: Duration) -> JoinHandle<()> {
        let store = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately
            ticker.tick().await;

            loop {
                ticker.tick().await;
                store.sweep().await;
            }
        })
    }
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new(DEFAULT_CART_TTL)
    }
}
