use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct SessionData {
    pub session_id: String,
    pub account_id: i64,
    pub expires_at: Instant,
}

impl SessionData {
    fn new(account_id: i64, expiry_hours: u64) -> Self {
        Self {
            session_id: Uuid::new_v4().to_string(),
            account_id,
            expires_at: Instant::now() + Duration::from_secs(expiry_hours * 3600),
        }
    }

    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// In-memory session registry. Multiple live sessions per account are
/// allowed; a session ends on logout or expiry.
#[derive(Clone)]
pub struct SessionManager {
    // session_id -> SessionData
    sessions: Arc<DashMap<String, SessionData>>,
    expiry_hours: u64,
}

impl SessionManager {
    pub fn new(expiry_hours: u64) -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
            expiry_hours,
        }
    }

    pub fn expiry_hours(&self) -> u64 {
        self.expiry_hours
    }

    pub fn create_session(&self, account_id: i64) -> SessionData {
        let session = SessionData::new(account_id, self.expiry_hours);
        self.sessions
            .insert(session.session_id.clone(), session.clone());

        log::info!(
            "Created session {} for account {}",
            session.session_id,
            account_id
        );

        session
    }

    pub fn validate_session(&self, session_id: &str) -> Option<SessionData> {
        let session = self.sessions.get(session_id)?;
        if session.is_expired() {
            drop(session);
            self.invalidate_session(session_id);
            return None;
        }

        Some(session.clone())
    }

    pub fn invalidate_session(&self, session_id: &str) {
        if self.sessions.remove(session_id).is_some() {
            log::info!("Invalidated session: {}", session_id);
        }
    }

    pub fn cleanup_expired(&self) -> usize {
        let mut removed = 0;

        self.sessions.retain(|session_id, session| {
            if session.is_expired() {
                log::debug!("Cleaned up expired session: {}", session_id);
                removed += 1;
                false
            } else {
                true
            }
        });

        if removed > 0 {
            log::info!("Cleaned up {} expired sessions", removed);
        }

        removed
    }

    pub fn active_session_count(&self) -> usize {
        self.sessions.len()
    }
}
