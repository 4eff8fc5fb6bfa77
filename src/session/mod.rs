//! Session module
//!
//! Per-client session state consumed by the auth gate: the logged-in flag
//! and the requested path remembered across the login round trip. Session
//! identity comes from the `wsid` cookie; requests without one share the
//! guest session.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Session id used when the request carries no `wsid` cookie
const GUEST_SESSION: &str = "guest";

/// Store contract the dispatch sequencer runs against
pub trait SessionStore: Send + Sync {
    fn is_logged_in(&self) -> bool;
    fn set_logged_in(&self, logged_in: bool);
    /// Remember the path the client asked for before being sent to login
    fn remember_requested_path(&self, path: &str);
    /// Hand back the remembered path; returns it exactly once
    fn consume_requested_path_after_login(&self) -> Option<String>;
}

#[derive(Debug, Default)]
struct SessionData {
    logged_in: bool,
    requested_path: Option<String>,
}

/// In-memory session for one client
#[derive(Debug, Default)]
pub struct Session {
    inner: Mutex<SessionData>,
}

impl SessionStore for Session {
    fn is_logged_in(&self) -> bool {
        self.inner.lock().map(|d| d.logged_in).unwrap_or(false)
    }

    fn set_logged_in(&self, logged_in: bool) {
        if let Ok(mut data) = self.inner.lock() {
            data.logged_in = logged_in;
        }
    }

    fn remember_requested_path(&self, path: &str) {
        if let Ok(mut data) = self.inner.lock() {
            data.requested_path = Some(path.to_string());
        }
    }

    fn consume_requested_path_after_login(&self) -> Option<String> {
        self.inner.lock().ok().and_then(|mut d| d.requested_path.take())
    }
}

/// Process-wide session table keyed by session id
pub struct SessionManager {
    sessions: Mutex<HashMap<String, Arc<Session>>>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Fetch or create the session for a client id
    pub fn session(&self, id: Option<&str>) -> Arc<Session> {
        let key = id.unwrap_or(GUEST_SESSION);
        let mut sessions = self
            .sessions
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        Arc::clone(sessions.entry(key.to_string()).or_default())
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract the `wsid` session id from a Cookie header value
pub fn session_id_from_cookie(cookie_header: Option<&str>) -> Option<String> {
    let header = cookie_header?;
    for pair in header.split(';') {
        let mut parts = pair.trim().splitn(2, '=');
        if parts.next() == Some("wsid") {
            return parts.next().map(ToString::to_string);
        }
    }
    None
}
