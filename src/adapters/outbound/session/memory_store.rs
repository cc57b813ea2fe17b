use crate::entity_mediation::domain::{Credentials, Session};
use crate::ports::outbound::SessionStore;
use crate::shared::Result;
use async_trait::async_trait;
use chrono::{Duration, Utc};
use dashmap::DashMap;
use uuid::Uuid;

/// MemorySessionStore keeps sessions in a concurrent map.
///
/// Sessions are lost on restart. Expired entries are swept whenever a new
/// session is created and dropped individually when looked up.
pub struct MemorySessionStore {
    sessions: DashMap<String, Session>,
    cookie_age: Duration,
}

impl MemorySessionStore {
    pub fn new(cookie_age: Duration) -> Self {
        Self {
            sessions: DashMap::new(),
            cookie_age,
        }
    }

    /// Number of stored sessions, expired ones included
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    fn live_session(&self, id: &str) -> Option<Session> {
        let now = Utc::now();
        let session = self.sessions.get(id).map(|entry| entry.value().clone())?;
        if session.is_expired(now) {
            self.sessions.remove(id);
            return None;
        }
        Some(session)
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn create(&self, credentials: Credentials, timezone: Option<String>) -> Result<Session> {
        let now = Utc::now();
        self.sessions.retain(|_, session| !session.is_expired(now));

        let session = Session {
            id: Uuid::new_v4().to_string(),
            credentials,
            expires_at: now + self.cookie_age,
            timezone,
        };
        self.sessions.insert(session.id.clone(), session.clone());
        Ok(session)
    }

    async fn load(&self, id: &str) -> Result<Option<Session>> {
        Ok(self.live_session(id))
    }

    async fn renew(&self, id: &str) -> Result<Option<Session>> {
        let now = Utc::now();
        // Updated in place: a session removed meanwhile stays removed.
        let renewed = self.sessions.get_mut(id).and_then(|mut entry| {
            if entry.is_expired(now) {
                return None;
            }
            entry.expires_at = now + self.cookie_age;
            Some(entry.value().clone())
        });
        if renewed.is_none() {
            self.sessions.remove_if(id, |_, session| session.is_expired(now));
        }
        Ok(renewed)
    }

    async fn remove(&self, id: &str) -> Result<()> {
        self.sessions.remove(id);
        Ok(())
    }
}
