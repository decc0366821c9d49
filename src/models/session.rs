use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// One browser session. Lives only for the lifetime of the process.
#[derive(Debug, Clone)]
pub struct Session {
    /// The name the user submitted at login, stored verbatim.
    pub user: String,
    /// Set once the access gate has accepted the user's code.
    pub authenticated: bool,
}

impl Session {
    /// A session that just passed the access gate.
    pub fn authenticated(user: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            authenticated: true,
        }
    }
}

/// In-process registry of live sessions, keyed by the opaque id carried in
/// the session cookie. No persistence: a restart logs everyone out.
#[derive(Debug, Clone, Default)]
pub struct SessionRegistry {
    inner: Arc<Mutex<HashMap<String, Session>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a session and return its freshly minted id.
    pub fn insert(&self, session: Session) -> String {
        let id = uuid::Uuid::new_v4().to_string();
        self.inner
            .lock()
            .expect("session registry poisoned")
            .insert(id.clone(), session);
        id
    }

    /// Look up a session by cookie id.
    pub fn get(&self, id: &str) -> Option<Session> {
        self.inner
            .lock()
            .expect("session registry poisoned")
            .get(id)
            .cloned()
    }

    /// Drop a session (logout).
    pub fn remove(&self, id: &str) {
        self.inner
            .lock()
            .expect("session registry poisoned")
            .remove(id);
    }
}
