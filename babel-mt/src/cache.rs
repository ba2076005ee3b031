//! Per-translator session cache
//!
//! Each backend keeps the sessions it has set up (a verified model id, a
//! bound pair of language codes, ...) keyed by the resolved code pair.
//! Entries are created on first use and kept until the translator is
//! dropped; nothing is ever evicted.

use crate::error::MtResult;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Backend-specific `(source_code, target_code)` key
pub type PairKey = (String, String);

#[derive(Debug)]
pub struct SessionCache<S> {
    sessions: Mutex<HashMap<PairKey, Arc<S>>>,
}

impl<S> SessionCache<S> {
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Return the cached session for a pair, creating it if absent
    ///
    /// A failed `create` leaves the cache untouched, so a later call for the
    /// same pair tries again.
    pub async fn get_or_try_insert_with<F, Fut>(
        &self,
        source_code: &str,
        target_code: &str,
        create: F,
    ) -> MtResult<Arc<S>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = MtResult<S>>,
    {
        let key = (source_code.to_string(), target_code.to_string());
        // Held across `create` so two callers never build the same session.
        let mut sessions = self.sessions.lock().await;
        if let Some(session) = sessions.get(&key) {
            return Ok(Arc::clone(session));
        }

        let session = Arc::new(create().await?);
        sessions.insert(key, Arc::clone(&session));
        Ok(session)
    }

    pub async fn contains(&self, source_code: &str, target_code: &str) -> bool {
        self.sessions
            .lock()
            .await
            .contains_key(&(source_code.to_string(), target_code.to_string()))
    }

    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }
}

impl<S> Default for SessionCache<S> {
    fn default() -> Self {
        Self::new()
    }
}
