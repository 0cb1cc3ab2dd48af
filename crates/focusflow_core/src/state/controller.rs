use super::writer::{run_writer, PendingWrite};
use crate::model::Entity;
use crate::repo::{CollectionRepository, Persisted};
use log::{debug, info, warn};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;

type Replay<E> = Box<dyn Fn(&mut Vec<E>) -> bool + Send>;

/// Point-in-time read of one collection, as handed to presentation code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionView<E> {
    pub items: Vec<E>,
    pub loading: bool,
}

/// Shared handle to the authoritative collection of one entity kind.
///
/// Clones refer to the same state. Construct one per kind at startup and
/// pass it to whatever needs it.
pub struct StateController<E: Persisted> {
    inner: Arc<Inner<E>>,
}

impl<E: Persisted> Clone for StateController<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct Inner<E: Persisted> {
    repo: CollectionRepository<E>,
    state: Mutex<ControllerState<E>>,
    load_gate: tokio::sync::Mutex<()>,
    writes: watch::Sender<PendingWrite<E>>,
    persisted: watch::Receiver<u64>,
    revision: watch::Sender<u64>,
}

struct ControllerState<E> {
    items: Vec<E>,
    loading: bool,
    generation: u64,
    replay: Vec<Replay<E>>,
}

impl<E: Persisted> StateController<E> {
    /// Creates an empty controller in the loading state and spawns its writer.
    ///
    /// Call [`StateController::load`] next; until it completes, mutations are
    /// kept in memory only.
    ///
    /// # Panics
    /// Panics when called outside a Tokio runtime.
    pub fn new(repo: CollectionRepository<E>) -> Self {
        let (writes, pending) = watch::channel(PendingWrite::initial());
        let (persisted_tx, persisted) = watch::channel(0_u64);
        let (revision, _) = watch::channel(0_u64);
        tokio::spawn(run_writer(repo.clone(), pending, persisted_tx));

        Self {
            inner: Arc::new(Inner {
                repo,
                state: Mutex::new(ControllerState {
                    items: Vec::new(),
                    loading: true,
                    generation: 0,
                    replay: Vec::new(),
                }),
                load_gate: tokio::sync::Mutex::new(()),
                writes,
                persisted,
                revision,
            }),
        }
    }

    /// Reads the collection from the repository and makes it authoritative.
    ///
    /// Saves already dispatched are drained before the read, so the loaded
    /// collection is never older than memory was. Mutations made while the
    /// read was in flight are replayed on top of it and then persisted.
    pub async fn load(&self) {
        let _gate = self.inner.load_gate.lock().await;
        let pending = {
            let mut state = self.lock_state();
            state.loading = true;
            state.generation
        };
        self.wait_persisted(pending).await;

        let loaded = self.inner.repo.load().await;

        let mut state = self.lock_state();
        state.items = loaded;
        let replay = std::mem::take(&mut state.replay);
        let mut replayed_changes = false;
        for op in &replay {
            replayed_changes |= op(&mut state.items);
        }
        state.loading = false;
        info!(
            "event=state_load module=state kind={} status=ok count={} replayed={}",
            E::KIND,
            state.items.len(),
            replay.len()
        );
        if replayed_changes {
            self.dispatch_save(&mut state);
        }
        drop(state);
        self.bump_revision();
    }

    /// Re-reads durable state, e.g. after a snapshot import wrote around
    /// this controller.
    pub async fn reload(&self) {
        self.load().await;
    }

    pub fn snapshot(&self) -> CollectionView<E> {
        let state = self.lock_state();
        CollectionView {
            items: state.items.clone(),
            loading: state.loading,
        }
    }

    pub fn items(&self) -> Vec<E> {
        self.lock_state().items.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.lock_state().loading
    }

    pub fn len(&self) -> usize {
        self.lock_state().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, id: &str) -> Option<E> {
        self.lock_state()
            .items
            .iter()
            .find(|item| item.id() == id)
            .cloned()
    }

    /// Receiver that ticks whenever the in-memory collection or loading flag
    /// changes; presentation code re-reads [`StateController::snapshot`] on tick.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.inner.revision.subscribe()
    }

    /// Replaces the element with the same id. Returns `false` when absent.
    pub fn update(&self, entity: E) -> bool {
        self.mutate("update", move |items| {
            match items.iter_mut().find(|item| item.id() == entity.id()) {
                Some(slot) => {
                    *slot = entity.clone();
                    true
                }
                None => false,
            }
        })
    }

    /// Removes the element with `id`. Unknown ids are a no-op.
    pub fn delete(&self, id: &str) -> bool {
        let id = id.to_owned();
        self.mutate("delete", move |items| {
            let before = items.len();
            items.retain(|item| item.id() != id);
            items.len() != before
        })
    }

    /// Waits until the newest dispatched save has been handed to the
    /// repository. Returns immediately when nothing is pending.
    pub async fn flush(&self) {
        let target = self.lock_state().generation;
        self.wait_persisted(target).await;
    }

    async fn wait_persisted(&self, target: u64) {
        let mut persisted = self.inner.persisted.clone();
        let finished = persisted.wait_for(|done| *done >= target).await.is_ok();
        if !finished {
            warn!(
                "event=state_flush module=state kind={} status=error error=writer_stopped",
                E::KIND
            );
        }
    }

    /// Applies `op` to memory, then schedules a save of the whole collection.
    ///
    /// While loading, `op` is also queued for replay and no save is scheduled.
    pub(super) fn mutate<F>(&self, action: &'static str, op: F) -> bool
    where
        F: Fn(&mut Vec<E>) -> bool + Send + 'static,
    {
        let mut state = self.lock_state();
        let changed = op(&mut state.items);

        if state.loading {
            state.replay.push(Box::new(op));
            debug!(
                "event=state_mutate module=state kind={} action={action} status=deferred",
                E::KIND
            );
        } else if changed {
            self.dispatch_save(&mut state);
        } else {
            debug!(
                "event=state_mutate module=state kind={} action={action} status=noop",
                E::KIND
            );
        }

        drop(state);
        if changed {
            self.bump_revision();
        }
        changed
    }

    fn dispatch_save(&self, state: &mut ControllerState<E>) {
        state.generation += 1;
        self.inner.writes.send_replace(PendingWrite {
            generation: state.generation,
            items: Arc::new(state.items.clone()),
        });
    }

    fn bump_revision(&self) {
        self.inner.revision.send_modify(|revision| *revision += 1);
    }

    fn lock_state(&self) -> MutexGuard<'_, ControllerState<E>> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
