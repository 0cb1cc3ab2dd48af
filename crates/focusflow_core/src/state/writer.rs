use crate::repo::{CollectionRepository, Persisted};
use log::debug;
use std::sync::Arc;
use tokio::sync::watch;

/// One full-collection write request. Higher generations supersede lower ones.
#[derive(Debug, Clone)]
pub(super) struct PendingWrite<E> {
    pub(super) generation: u64,
    pub(super) items: Arc<Vec<E>>,
}

impl<E> PendingWrite<E> {
    pub(super) fn initial() -> Self {
        Self {
            generation: 0,
            items: Arc::new(Vec::new()),
        }
    }
}

/// Persists the newest pending collection until the controller is dropped.
///
/// Intermediate generations published while a save is in flight are skipped;
/// `persisted` reports the last generation handed to the repository.
pub(super) async fn run_writer<E: Persisted>(
    repo: CollectionRepository<E>,
    mut pending: watch::Receiver<PendingWrite<E>>,
    persisted: watch::Sender<u64>,
) {
    while pending.changed().await.is_ok() {
        let write = pending.borrow_and_update().clone();
        repo.save(&write.items).await;
        persisted.send_replace(write.generation);
    }
    debug!("event=state_writer module=state kind={} status=stopped", E::KIND);
}
