use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

/// Mutable per-operator bookkeeping shared by all of its sessions.
#[derive(Debug, Default)]
pub struct OperatorState {
    active_sessions: Mutex<HashSet<String>>,
    message_counter: AtomicU64,
    session_counter: AtomicU64,
}

impl OperatorState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment the message counter and return the new value. Every caller
    /// sees a distinct value.
    pub fn next_message_number(&self) -> u64 {
        self.message_counter.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Distinct suffix for session identifiers created in the same millisecond.
    pub fn next_session_number(&self) -> u64 {
        self.session_counter.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Returns false if the id was already registered.
    pub fn register_session(&self, session_id: &str) -> bool {
        self.sessions().insert(session_id.to_string())
    }

    /// Returns false if the id was not registered.
    pub fn unregister_session(&self, session_id: &str) -> bool {
        self.sessions().remove(session_id)
    }

    pub fn active_sessions(&self) -> usize {
        self.sessions().len()
    }

    fn sessions(&self) -> std::sync::MutexGuard<'_, HashSet<String>> {
        // the set stays consistent even if a holder panicked
        self.active_sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
