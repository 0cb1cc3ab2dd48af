//! Generic whole-collection repository over a [`DurableStore`].

use super::Persisted;
use crate::codec;
use crate::store::SharedStore;
use log::{error, info};
use std::marker::PhantomData;
use std::time::Instant;

/// Result of a best-effort save. Failures are already logged when returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    Failed,
}

/// Loads and saves the full collection of one entity kind.
pub struct CollectionRepository<E> {
    store: SharedStore,
    _kind: PhantomData<fn() -> E>,
}

impl<E> Clone for CollectionRepository<E> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            _kind: PhantomData,
        }
    }
}

impl<E: Persisted> CollectionRepository<E> {
    pub fn new(store: SharedStore) -> Self {
        Self {
            store,
            _kind: PhantomData,
        }
    }

    pub fn storage_key(&self) -> &'static str {
        E::STORAGE_KEY
    }

    /// Reads the collection.
    ///
    /// An absent key, a store read failure and an undecodable blob all yield
    /// an empty collection; only the log records which one happened.
    pub async fn load(&self) -> Vec<E> {
        let started_at = Instant::now();
        match self.store.get(E::STORAGE_KEY).await {
            Ok(Some(text)) => {
                let items: Vec<E> = codec::decode(E::KIND, &text);
                info!(
                    "event=repo_load module=repo kind={} status=ok count={} duration_ms={}",
                    E::KIND,
                    items.len(),
                    started_at.elapsed().as_millis()
                );
                items
            }
            Ok(None) => {
                info!(
                    "event=repo_load module=repo kind={} status=empty duration_ms={}",
                    E::KIND,
                    started_at.elapsed().as_millis()
                );
                Vec::new()
            }
            Err(err) => {
                error!(
                    "event=repo_load module=repo kind={} status=error duration_ms={} error={err}",
                    E::KIND,
                    started_at.elapsed().as_millis()
                );
                Vec::new()
            }
        }
    }

    /// Writes the whole collection, replacing whatever was stored.
    ///
    /// Never returns an error; a failed write leaves the in-memory state as
    /// the session's source of truth.
    pub async fn save(&self, items: &[E]) -> SaveOutcome {
        let started_at = Instant::now();
        let text = match codec::encode(items) {
            Ok(text) => text,
            Err(err) => {
                error!(
                    "event=repo_save module=repo kind={} status=error stage=encode error={err}",
                    E::KIND
                );
                return SaveOutcome::Failed;
            }
        };

        match self.store.set(E::STORAGE_KEY, &text).await {
            Ok(()) => {
                info!(
                    "event=repo_save module=repo kind={} status=ok count={} duration_ms={}",
                    E::KIND,
                    items.len(),
                    started_at.elapsed().as_millis()
                );
                SaveOutcome::Saved
            }
            Err(err) => {
                error!(
                    "event=repo_save module=repo kind={} status=error stage=write duration_ms={} error={err}",
                    E::KIND,
                    started_at.elapsed().as_millis()
                );
                SaveOutcome::Failed
            }
        }
    }
}
