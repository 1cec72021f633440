//! Shared token store.
//!
//! DESIGN
//! ======
//! A single `watch` slot holds the current [`TokenRecord`]. Writers replace
//! the whole record in one assignment, so a reader sees either the old or
//! the new value and never a mix. Subscribers are the observer list: each
//! replacement wakes them, and back-to-back replacements coalesce so only
//! the latest record is delivered.
//!
//! The store is an explicit context object (see `context::AppContext`), not
//! a global. Cloning it yields another handle to the same slot.

pub mod token;


use std::sync::Arc;

use tokio::sync::watch;

pub use token::{AccessToken, TokenRecord};

/// Handle to the page-lifetime token slot.
#[derive(Clone, Debug)]
pub struct TokenStore {
    tx: Arc<watch::Sender<Arc<TokenRecord>>>,
}

impl TokenStore {
    /// Create a store holding the empty record.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(Arc::new(TokenRecord::default()));
        Self { tx: Arc::new(tx) }
    }

    /// Current record. Empty until the first [`TokenStore::set_token`].
    #[must_use]
    pub fn get_token(&self) -> Arc<TokenRecord> {
        self.tx.borrow().clone()
    }

    /// Replace the current record wholesale and notify subscribers.
    ///
    /// No shape, expiry or signature checks happen here.
    pub fn set_token(&self, record: TokenRecord) {
        tracing::info!(
            has_uid = record.uid.is_some(),
            has_token = !record.token.is_empty(),
            subscribers = self.tx.receiver_count(),
            "token replaced"
        );
        self.tx.send_replace(Arc::new(record));
    }

    /// Replace the current record with the empty one.
    pub fn clear(&self) {
        self.set_token(TokenRecord::default());
    }

    /// Register an observer. The record current at subscription time counts
    /// as already seen.
    #[must_use]
    pub fn subscribe(&self) -> TokenSubscription {
        TokenSubscription { rx: self.tx.subscribe() }
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for TokenStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Observer of token replacements.
#[derive(Debug)]
pub struct TokenSubscription {
    rx: watch::Receiver<Arc<TokenRecord>>,
}

impl TokenSubscription {
    /// Wait for the next replacement and return the latest record.
    ///
    /// Returns `None` once every [`TokenStore`] handle has been dropped.
    pub async fn changed(&mut self) -> Option<Arc<TokenRecord>> {
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }

    /// Whether a replacement happened since the last observed value.
    #[must_use]
    pub fn has_changed(&self) -> bool {
        self.rx.has_changed().unwrap_or(false)
    }

    /// Latest record without marking it as seen.
    #[must_use]
    pub fn current(&self) -> Arc<TokenRecord> {
        self.rx.borrow().clone()
    }
}
