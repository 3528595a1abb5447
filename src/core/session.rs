//! Per-session interaction state.
//!
//! A session is identified by a random id carried in a cookie. An interaction
//! [`SessionStore::acquire`]s its session, holds it for the whole run and
//! hands it back with [`SessionStore::release`]. Holding a [`Session`] locks
//! that one session only, so a second request on the same cookie waits for
//! the first to finish. The store-wide map lock is only taken briefly.
//!
//! Only sessions whose state differs from the default are kept, and only ids
//! the server minted are ever stored. Idle sessions expire and the map is
//! capped at [`DEFAULT_MAX_SESSIONS`].

use std::collections::HashMap;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};
use tracing::debug;
use uuid::Uuid;

use super::models::Goal;

pub const SESSION_COOKIE: &str = "quote_summary_session";

pub const DEFAULT_MAX_SESSIONS: usize = 10_000;

pub const DEFAULT_SESSION_IDLE: Duration = Duration::from_secs(30 * 60);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub preview_visible: bool,
    pub client_name: String,
    pub goal: Goal,
}

#[derive(Debug)]
struct Entry {
    state: Arc<Mutex<SessionState>>,
    last_seen: Instant,
}

#[derive(Debug, Clone)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, Entry>>>,
    max_sessions: usize,
    idle: Duration,
}

/// Exclusive access to one session for the length of an interaction.
#[derive(Debug)]
pub struct Session {
    id: Uuid,
    slot: Arc<Mutex<SessionState>>,
    guard: OwnedMutexGuard<SessionState>,
}

impl Session {
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }
}

impl Deref for Session {
    type Target = SessionState;

    fn deref(&self) -> &SessionState {
        &self.guard
    }
}

impl DerefMut for Session {
    fn deref_mut(&mut self) -> &mut SessionState {
        &mut self.guard
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_limits(DEFAULT_MAX_SESSIONS, DEFAULT_SESSION_IDLE)
    }
}

impl SessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_limits(max_sessions: usize, idle: Duration) -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
            max_sessions: max_sessions.max(1),
            idle,
        }
    }

    /// Locks the session for `id`, waiting for any interaction already
    /// running on it.
    ///
    /// A missing, unknown or expired id gets a freshly minted id and default
    /// state. Nothing is stored until [`SessionStore::release`].
    pub async fn acquire(&self, id: Option<Uuid>) -> Session {
        let known = match id {
            Some(id) => {
                let mut sessions = self.inner.write().await;
                match sessions.get_mut(&id) {
                    Some(entry) if entry.last_seen.elapsed() <= self.idle => {
                        entry.last_seen = Instant::now();
                        Some((id, Arc::clone(&entry.state)))
                    }
                    Some(_) => {
                        sessions.remove(&id);
                        None
                    }
                    None => None,
                }
            }
            None => None,
        };

        let (id, slot) = known.unwrap_or_else(|| {
            (
                Uuid::new_v4(),
                Arc::new(Mutex::new(SessionState::default())),
            )
        });
        let guard = Arc::clone(&slot).lock_owned().await;
        Session { id, slot, guard }
    }

    /// Stores the session's state and unlocks it.
    ///
    /// A session back at the default state is dropped from the store.
    pub async fn release(&self, session: Session) {
        let Session { id, slot, guard } = session;
        let mut sessions = self.inner.write().await;

        if *guard == SessionState::default() {
            if sessions
                .get(&id)
                .is_some_and(|entry| Arc::ptr_eq(&entry.state, &slot))
            {
                sessions.remove(&id);
            }
        } else {
            sessions.insert(
                id,
                Entry {
                    state: slot,
                    last_seen: Instant::now(),
                },
            );
            self.evict(&mut sessions);
        }
        drop(guard);
    }

    /// Drops idle sessions, then the least recently seen ones over the cap.
    fn evict(&self, sessions: &mut HashMap<Uuid, Entry>) {
        let before = sessions.len();
        sessions.retain(|_, entry| entry.last_seen.elapsed() <= self.idle);

        if sessions.len() > self.max_sessions {
            let mut by_age: Vec<(Uuid, Instant)> = sessions
                .iter()
                .map(|(id, entry)| (*id, entry.last_seen))
                .collect();
            by_age.sort_by_key(|(_, last_seen)| *last_seen);
            let excess = sessions.len() - self.max_sessions;
            for (id, _) in by_age.into_iter().take(excess) {
                sessions.remove(&id);
            }
        }

        if sessions.len() < before {
            debug!(evicted = before - sessions.len(), "Evicted sessions");
        }
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}
