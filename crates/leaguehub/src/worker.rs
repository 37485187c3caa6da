//! Background notification queue.
//!
//! Request handlers enqueue side-channel notifications without waiting; a
//! single worker task drains the queue and logs each one.

use std::fmt;

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

/// A side-channel event produced by request handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    UserRegistered { user_id: i64, name: String },
    ResultRecorded { match_id: i64, home: i64, away: i64 },
    StandingsPublished { delivered: usize },
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UserRegistered { name, .. } => write!(f, "New user: {name}"),
            Self::ResultRecorded {
                match_id,
                home,
                away,
            } => write!(f, "Result recorded for match {match_id}: {home}-{away}"),
            Self::StandingsPublished { delivered } => {
                write!(f, "Standings pushed to {delivered} subscriber(s)")
            }
        }
    }
}

/// Sending half of the notification queue.
#[derive(Clone)]
pub struct NotificationQueue {
    tx: mpsc::Sender<Notification>,
}

impl NotificationQueue {
    /// Creates a queue holding at most `capacity` pending notifications.
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<Notification>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self { tx }, rx)
    }

    /// Enqueues without waiting. Returns whether the notification was
    /// accepted; a full or closed queue is logged and otherwise ignored.
    pub fn enqueue(&self, notification: Notification) -> bool {
        match self.tx.try_send(notification) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(n)) => {
                tracing::warn!(notification = %n, "Notification queue full, dropping message");
                false
            }
            Err(mpsc::error::TrySendError::Closed(n)) => {
                tracing::warn!(notification = %n, "Notification worker stopped, dropping message");
                false
            }
        }
    }
}

/// Spawns the worker. It stops on shutdown or once every queue handle is
/// dropped, and resolves to the number of notifications it processed.
pub fn spawn_notification_worker(
    mut rx: mpsc::Receiver<Notification>,
    mut shutdown_rx: broadcast::Receiver<()>,
) -> JoinHandle<usize> {
    tokio::spawn(async move {
        let mut processed = 0usize;
        tracing::debug!("Notification worker started");

        loop {
            tokio::select! {
                next = rx.recv() => match next {
                    Some(notification) => {
                        processed += 1;
                        tracing::info!(%notification, "Processed notification");
                    }
                    None => {
                        tracing::debug!("Notification queue closed");
                        break;
                    }
                },
                _ = shutdown_rx.recv() => {
                    tracing::debug!("Notification worker shutting down");
                    break;
                }
            }
        }

        processed
    })
}
