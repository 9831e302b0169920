// ── Company snapshot store ──
//
// Holds the latest fetched collection and broadcasts replacements through
// a `watch` channel. Fetches are tagged with a monotonically increasing
// generation; a response older than the last applied one is discarded, so
// two overlapping fetches can never leave the store holding stale data.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;
use tracing::debug;

use crate::model::Company;

/// Shared snapshot of the fetched collection, replaced wholesale on every
/// applied fetch. Cheap to clone (`Arc` all the way down).
pub type Snapshot = Arc<Vec<Arc<Company>>>;

/// Reactive holder for the company collection.
pub struct CompanyStore {
    snapshot: watch::Sender<Snapshot>,
    /// Ticket dispenser for fetches.
    issued: AtomicU64,
    /// Generation of the last snapshot that was actually applied.
    applied: AtomicU64,
}

impl Default for CompanyStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CompanyStore {
    pub fn new() -> Self {
        let (snapshot, _) = watch::channel(Arc::new(Vec::new()));
        Self {
            snapshot,
            issued: AtomicU64::new(0),
            applied: AtomicU64::new(0),
        }
    }

    /// Take a generation ticket for a fetch that is about to start.
    pub fn begin_fetch(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Apply a fetched collection, unless a newer fetch already landed.
    ///
    /// Returns `true` if the snapshot was applied, `false` if it was
    /// discarded as stale.
    pub fn apply(&self, generation: u64, companies: Vec<Arc<Company>>) -> bool {
        let mut accepted = false;
        // fetch_update gives us compare-and-set over the applied marker.
        let _ = self
            .applied
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |applied| {
                if generation > applied {
                    accepted = true;
                    Some(generation)
                } else {
                    accepted = false;
                    None
                }
            });

        if accepted {
            // `send_modify` updates unconditionally, even with zero receivers.
            self.snapshot.send_modify(|snap| *snap = Arc::new(companies));
        } else {
            debug!(generation, "discarding stale fetch response");
        }
        accepted
    }

    /// Current snapshot (cheap `Arc` clone).
    pub fn snapshot(&self) -> Snapshot {
        self.snapshot.borrow().clone()
    }

    /// Subscribe to snapshot replacements.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.snapshot.subscribe()
    }

    pub fn len(&self) -> usize {
        self.snapshot.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot.borrow().is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::CompanyId;

    fn one(id: &str) -> Vec<Arc<Company>> {
        vec![Arc::new(Company {
            id: CompanyId::from(id),
            name: Some(id.to_owned()),
            description: None,
            address: None,
            email: None,
            website_url: None,
            logo: None,
            screenshot_url: None,
            phone_numbers: Vec::new(),
            facebook_url: None,
            twitter_url: None,
            linkedin_url: None,
            instagram_url: None,
            created_at: None,
            updated_at: None,
        })]
    }

    #[test]
    fn apply_in_order_replaces_snapshot() {
        let store = CompanyStore::new();
        let g1 = store.begin_fetch();

        assert!(store.apply(g1, one("a")));
        assert_eq!(store.len(), 1);
        assert_eq!(store.snapshot()[0].id.as_str(), "a");
    }

    #[test]
    fn stale_response_is_discarded() {
        let store = CompanyStore::new();
        let g1 = store.begin_fetch();
        let g2 = store.begin_fetch();

        // The second fetch resolves first; the first arrives late.
        assert!(store.apply(g2, one("fresh")));
        assert!(!store.apply(g1, one("stale")));

        assert_eq!(store.snapshot()[0].id.as_str(), "fresh");
    }

    #[test]
    fn duplicate_apply_is_rejected() {
        let store = CompanyStore::new();
        let g1 = store.begin_fetch();

        assert!(store.apply(g1, one("a")));
        assert!(!store.apply(g1, one("b")));
        assert_eq!(store.snapshot()[0].id.as_str(), "a");
    }

    #[tokio::test]
    async fn subscribers_see_replacements() {
        let store = CompanyStore::new();
        let mut rx = store.subscribe();

        let g1 = store.begin_fetch();
        store.apply(g1, one("a"));

        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update()[0].id.as_str(), "a");
    }
}
