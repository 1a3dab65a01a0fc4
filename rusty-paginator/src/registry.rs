//! Keyed store of active pagination sessions.

use std::collections::HashMap;

use tokio::sync::Mutex;
use twilight_model::id::{Id, marker::MessageMarker};

use crate::{
    error::PaginationError,
    session::{Session, SessionView},
};

/// Message id to session map shared by the dispatcher and expiry timers.
///
/// The lock is only held for in-memory work, never across a transport call.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: Mutex<HashMap<Id<MessageMarker>, Session>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track `session` under `id`; an occupied id is an error.
    pub async fn put(&self, id: Id<MessageMarker>, session: Session) -> Result<(), PaginationError> {
        let mut sessions = self.sessions.lock().await;
        if sessions.contains_key(&id) {
            return Err(PaginationError::SessionExists(id));
        }

        sessions.insert(id, session);
        Ok(())
    }

    pub async fn get(&self, id: Id<MessageMarker>) -> Option<SessionView> {
        self.sessions.lock().await.get(&id).map(Session::view)
    }

    pub async fn contains(&self, id: Id<MessageMarker>) -> bool {
        self.sessions.lock().await.contains_key(&id)
    }

    /// Remove and return the session under `id`; absent ids yield `None`.
    pub async fn remove(&self, id: Id<MessageMarker>) -> Option<Session> {
        self.sessions.lock().await.remove(&id)
    }

    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.lock().await.is_empty()
    }

    /// Run `f` against the session under `id` while holding the lock.
    pub(crate) async fn update<R>(
        &self,
        id: Id<MessageMarker>,
        f: impl FnOnce(&mut Session) -> R,
    ) -> Option<R> {
        self.sessions.lock().await.get_mut(&id).map(f)
    }

    /// Run `f` under the lock and, when it returns `true` alongside its
    /// result, remove the session in the same critical section.
    pub(crate) async fn update_or_remove<R>(
        &self,
        id: Id<MessageMarker>,
        f: impl FnOnce(&mut Session) -> (R, bool),
    ) -> Option<(R, Option<Session>)> {
        let mut sessions = self.sessions.lock().await;
        let (result, remove) = f(sessions.get_mut(&id)?);
        let removed = if remove { sessions.remove(&id) } else { None };
        Some((result, removed))
    }

    /// Remove the session under `id` only if `predicate` accepts it.
    pub(crate) async fn remove_if(
        &self,
        id: Id<MessageMarker>,
        predicate: impl FnOnce(&Session) -> bool,
    ) -> Option<Session> {
        let mut sessions = self.sessions.lock().await;
        if !sessions.get(&id).is_some_and(predicate) {
            return None;
        }

        sessions.remove(&id)
    }
}
