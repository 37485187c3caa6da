//! In-process match discussion threads.
//!
//! Threads live only for the lifetime of the process; there is no
//! persistence and no moderation.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub user: String,
    pub message: String,
    /// RFC 3339, UTC.
    pub time: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Thread {
    pub id: i64,
    pub match_id: i64,
    pub title: String,
    pub comments: Vec<Comment>,
}

/// Shared thread list.
#[derive(Clone, Default)]
pub struct ThreadBoard {
    threads: Arc<Mutex<Vec<Thread>>>,
}

impl ThreadBoard {
    /// A board holding one opening match thread.
    pub fn seeded() -> Self {
        let opening = Thread {
            id: 1,
            match_id: 1,
            title: "Arsenal vs Chelsea Match Thread".to_string(),
            comments: vec![
                Comment {
                    user: "fan1".to_string(),
                    message: "What a goal!".to_string(),
                    time: "2026-02-10T18:10:00Z".to_string(),
                },
                Comment {
                    user: "fan2".to_string(),
                    message: "VAR check incoming...".to_string(),
                    time: "2026-02-10T18:12:00Z".to_string(),
                },
            ],
        };

        Self {
            threads: Arc::new(Mutex::new(vec![opening])),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Thread>> {
        self.threads
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn list(&self) -> Vec<Thread> {
        self.lock().clone()
    }

    /// Appends a comment, returning the updated thread, or `None` if the
    /// thread does not exist.
    pub fn add_comment(&self, thread_id: i64, user: &str, message: &str) -> Option<Thread> {
        let mut threads = self.lock();
        let thread = threads.iter_mut().find(|t| t.id == thread_id)?;

        thread.comments.push(Comment {
            user: user.to_string(),
            message: message.to_string(),
            time: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        });

        Some(thread.clone())
    }
}
