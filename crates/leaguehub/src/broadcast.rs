//! Live standings fan-out.
//!
//! Each subscriber owns a bounded queue. Broadcasting copies the sender list
//! under the registry mutex and delivers after releasing it, so a slow
//! subscriber never blocks registration or other subscribers. A subscriber
//! whose queue is full or closed is dropped from the registry.
//!
//! Snapshots carry a revision taken before the table was computed. The
//! registry remembers the newest one it published: a late subscriber starts
//! from it when its own table predates it, and an older snapshot arriving
//! after a newer one is skipped.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::mpsc;

use leaguehub_core::league::StandingsMessage;

/// Subscriber identifier, unique for the broadcaster's lifetime.
pub type SubscriberId = u64;

/// Position of a snapshot in publish order. Zero means nothing published.
pub type Revision = u64;

type Outbox = mpsc::Sender<Arc<StandingsMessage>>;

#[derive(Default)]
struct Hub {
    subscribers: HashMap<SubscriberId, Outbox>,
    latest: Option<(Revision, Arc<StandingsMessage>)>,
}

impl Hub {
    fn latest_revision(&self) -> Revision {
        self.latest.as_ref().map_or(0, |(revision, _)| *revision)
    }
}

struct Registry {
    hub: Mutex<Hub>,
    next_id: AtomicU64,
    next_revision: AtomicU64,
    buffer: usize,
}

impl Registry {
    fn hub(&self) -> MutexGuard<'_, Hub> {
        // The hub stays consistent even if a holder panicked.
        self.hub.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Registry of live standings subscribers.
#[derive(Clone)]
pub struct StandingsBroadcaster {
    registry: Arc<Registry>,
}

/// An active subscription. Dropping it unsubscribes.
pub struct Subscription {
    id: SubscriberId,
    rx: mpsc::Receiver<Arc<StandingsMessage>>,
    registry: Arc<Registry>,
}

impl Subscription {
    pub fn id(&self) -> SubscriberId {
        self.id
    }

    /// Next message, or `None` once the broadcaster has dropped this
    /// subscriber.
    pub async fn recv(&mut self) -> Option<Arc<StandingsMessage>> {
        self.rx.recv().await
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if self.registry.hub().subscribers.remove(&self.id).is_some() {
            tracing::debug!(subscriber = self.id, "Standings subscriber removed");
        }
    }
}

impl StandingsBroadcaster {
    /// Creates a broadcaster whose subscribers each buffer up to `buffer`
    /// undelivered messages.
    pub fn new(buffer: usize) -> Self {
        Self {
            registry: Arc::new(Registry {
                hub: Mutex::new(Hub::default()),
                next_id: AtomicU64::new(1),
                next_revision: AtomicU64::new(1),
                buffer: buffer.max(1),
            }),
        }
    }

    /// Revision of the newest published snapshot.
    ///
    /// Read it before computing the table handed to [`subscribe`](Self::subscribe).
    pub fn revision(&self) -> Revision {
        self.registry.hub().latest_revision()
    }

    /// Issues the revision for a snapshot about to be computed.
    pub fn next_revision(&self) -> Revision {
        self.registry.next_revision.fetch_add(1, Ordering::Relaxed)
    }

    /// Registers a subscriber. `initial` is its first message unless a
    /// snapshot newer than `as_of` was published meanwhile, in which case
    /// that snapshot is sent instead.
    pub fn subscribe(&self, initial: StandingsMessage, as_of: Revision) -> Subscription {
        let id = self.registry.next_id.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = mpsc::channel(self.registry.buffer);

        let (active, replayed) = {
            let mut hub = self.registry.hub();
            let (first, replayed) = match &hub.latest {
                Some((revision, latest)) if *revision > as_of => (latest.clone(), true),
                _ => (Arc::new(initial), false),
            };
            // The queue is empty and sized at least 1, so this cannot fail.
            let _ = tx.try_send(first);
            hub.subscribers.insert(id, tx);
            (hub.subscribers.len(), replayed)
        };
        tracing::debug!(subscriber = id, active, replayed, "Standings subscriber added");

        Subscription {
            id,
            rx,
            registry: self.registry.clone(),
        }
    }

    /// Delivers `snapshot` to every subscriber. Returns how many accepted it.
    ///
    /// A snapshot whose revision is not newer than the last published one is
    /// skipped and reaches nobody.
    pub fn broadcast(&self, revision: Revision, snapshot: StandingsMessage) -> usize {
        let message = Arc::new(snapshot);

        let targets: Vec<(SubscriberId, Outbox)> = {
            let mut hub = self.registry.hub();
            let latest = hub.latest_revision();
            if revision <= latest {
                tracing::debug!(revision, latest, "Skipping superseded standings snapshot");
                return 0;
            }
            hub.latest = Some((revision, message.clone()));
            hub.subscribers
                .iter()
                .map(|(id, tx)| (*id, tx.clone()))
                .collect()
        };

        if targets.is_empty() {
            return 0;
        }

        let mut delivered = 0;
        let mut failed = Vec::new();

        for (id, tx) in targets {
            match tx.try_send(message.clone()) {
                Ok(()) => delivered += 1,
                Err(mpsc::error::TrySendError::Full(_)) => {
                    tracing::warn!(subscriber = id, "Standings subscriber lagging, dropping it");
                    failed.push(id);
                }
                Err(mpsc::error::TrySendError::Closed(_)) => failed.push(id),
            }
        }

        if !failed.is_empty() {
            let mut hub = self.registry.hub();
            for id in &failed {
                hub.subscribers.remove(id);
            }
        }

        tracing::debug!(revision, delivered, dropped = failed.len(), "Standings broadcast");
        delivered
    }

    pub fn subscriber_count(&self) -> usize {
        self.registry.hub().subscribers.len()
    }
}

#[cfg(test)]
mod tests {
    use leaguehub_core::league::TableRow;

    use super::*;

    fn snapshot(points: i64) -> StandingsMessage {
        StandingsMessage::new(vec![TableRow {
            team_id: 1,
            team: "Arsenal".into(),
            played: 1,
            points,
            gd: 1,
        }])
    }

    fn publish(broadcaster: &StandingsBroadcaster, points: i64) -> usize {
        broadcaster.broadcast(broadcaster.next_revision(), snapshot(points))
    }

    #[tokio::test]
    async fn test_subscriber_gets_exactly_one_initial_snapshot() {
        let broadcaster = StandingsBroadcaster::new(4);
        let mut sub = broadcaster.subscribe(snapshot(3), broadcaster.revision());

        assert_eq!(*sub.recv().await.unwrap(), snapshot(3));
        assert!(sub.rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_broadcast_reaches_every_subscriber() {
        let broadcaster = StandingsBroadcaster::new(4);
        let mut a = broadcaster.subscribe(snapshot(0), 0);
        let mut b = broadcaster.subscribe(snapshot(0), 0);
        a.recv().await.unwrap();
        b.recv().await.unwrap();

        assert_eq!(publish(&broadcaster, 6), 2);

        assert_eq!(*a.recv().await.unwrap(), snapshot(6));
        assert_eq!(*b.recv().await.unwrap(), snapshot(6));
    }

    #[tokio::test]
    async fn test_dropped_subscription_is_removed() {
        let broadcaster = StandingsBroadcaster::new(4);
        let a = broadcaster.subscribe(snapshot(0), 0);
        let mut b = broadcaster.subscribe(snapshot(0), 0);
        assert_eq!(broadcaster.subscriber_count(), 2);

        drop(a);
        assert_eq!(broadcaster.subscriber_count(), 1);

        assert_eq!(publish(&broadcaster, 9), 1);
        b.recv().await.unwrap();
        assert_eq!(*b.recv().await.unwrap(), snapshot(9));
    }

    #[tokio::test]
    async fn test_full_queue_drops_only_that_subscriber() {
        let broadcaster = StandingsBroadcaster::new(1);
        // Initial snapshot fills the single slot and is never read.
        let _stalled = broadcaster.subscribe(snapshot(0), 0);
        let mut healthy = broadcaster.subscribe(snapshot(0), 0);
        healthy.recv().await.unwrap();

        assert_eq!(publish(&broadcaster, 1), 1);
        assert_eq!(broadcaster.subscriber_count(), 1);
        assert_eq!(*healthy.recv().await.unwrap(), snapshot(1));
    }

    #[tokio::test]
    async fn test_removed_subscriber_sees_end_of_stream() {
        let broadcaster = StandingsBroadcaster::new(1);
        let mut stalled = broadcaster.subscribe(snapshot(0), 0);

        assert_eq!(publish(&broadcaster, 1), 0);
        assert_eq!(broadcaster.subscriber_count(), 0);

        assert_eq!(*stalled.recv().await.unwrap(), snapshot(0));
        assert!(stalled.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_broadcast_without_subscribers() {
        let broadcaster = StandingsBroadcaster::new(4);
        assert_eq!(publish(&broadcaster, 1), 0);
        assert_eq!(broadcaster.revision(), 1);
    }

    #[tokio::test]
    async fn test_ids_are_unique() {
        let broadcaster = StandingsBroadcaster::new(4);
        let a = broadcaster.subscribe(snapshot(0), 0);
        let b = broadcaster.subscribe(snapshot(0), 0);
        assert_ne!(a.id(), b.id());
    }

    #[tokio::test]
    async fn test_late_subscriber_starts_from_newer_broadcast() {
        let broadcaster = StandingsBroadcaster::new(4);

        // Table computed, then a write publishes before the subscriber joins.
        let as_of = broadcaster.revision();
        let computed = snapshot(0);
        assert_eq!(publish(&broadcaster, 3), 0);
        let mut sub = broadcaster.subscribe(computed, as_of);

        assert_eq!(*sub.recv().await.unwrap(), snapshot(3));
        assert!(sub.rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_subscriber_keeps_its_table_when_nothing_newer() {
        let broadcaster = StandingsBroadcaster::new(4);
        publish(&broadcaster, 3);

        let as_of = broadcaster.revision();
        let mut sub = broadcaster.subscribe(snapshot(4), as_of);

        assert_eq!(*sub.recv().await.unwrap(), snapshot(4));
    }

    #[tokio::test]
    async fn test_superseded_snapshot_is_skipped() {
        let broadcaster = StandingsBroadcaster::new(4);
        let mut sub = broadcaster.subscribe(snapshot(0), 0);
        sub.recv().await.unwrap();

        let older = broadcaster.next_revision();
        let newer = broadcaster.next_revision();

        assert_eq!(broadcaster.broadcast(newer, snapshot(6)), 1);
        assert_eq!(broadcaster.broadcast(older, snapshot(3)), 0);

        assert_eq!(*sub.recv().await.unwrap(), snapshot(6));
        assert!(sub.rx.try_recv().is_err());
        assert_eq!(broadcaster.revision(), newer);
    }
}
