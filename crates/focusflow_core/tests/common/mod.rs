#![allow(dead_code)]

use async_trait::async_trait;
use focusflow_core::{
    DurableStore, Goal, MemoryStore, Milestone, Priority, SharedStore, StoreError, StoreResult,
    Task, TimeBlock,
};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

/// Memory-backed store that counts writes and can hold reads, hold writes or
/// fail on demand.
#[derive(Clone)]
pub struct TestStore {
    pub memory: MemoryStore,
    writes: Arc<AtomicUsize>,
    fail_reads: Arc<AtomicBool>,
    fail_writes: Arc<AtomicBool>,
    reads_open: Arc<watch::Sender<bool>>,
    writes_open: Arc<watch::Sender<bool>>,
}

impl TestStore {
    pub fn new() -> Self {
        let (reads_open, _) = watch::channel(true);
        let (writes_open, _) = watch::channel(true);
        Self {
            memory: MemoryStore::new(),
            writes: Arc::new(AtomicUsize::new(0)),
            fail_reads: Arc::new(AtomicBool::new(false)),
            fail_writes: Arc::new(AtomicBool::new(false)),
            reads_open: Arc::new(reads_open),
            writes_open: Arc::new(writes_open),
        }
    }

    /// Reads block until [`TestStore::open_reads`] is called.
    pub fn gated() -> Self {
        let store = Self::new();
        store.reads_open.send_replace(false);
        store
    }

    pub fn open_reads(&self) {
        self.reads_open.send_replace(true);
    }

    /// Writes block until [`TestStore::open_writes`] is called.
    pub fn hold_writes(&self) {
        self.writes_open.send_replace(false);
    }

    pub fn open_writes(&self) {
        self.writes_open.send_replace(true);
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn shared(&self) -> SharedStore {
        Arc::new(self.clone())
    }
}

#[async_trait]
impl DurableStore for TestStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let mut open = self.reads_open.subscribe();
        let _ = open.wait_for(|ready| *ready).await;
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("read refused".to_string()));
        }
        self.memory.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut open = self.writes_open.subscribe();
        let _ = open.wait_for(|ready| *ready).await;
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("disk full".to_string()));
        }
        self.memory.set(key, value).await
    }
}

pub fn task(id: &str, title: &str) -> Task {
    Task {
        id: id.to_string(),
        title: title.to_string(),
        completed: false,
        due_date: None,
        priority: Priority::Low,
        category: String::new(),
        notes: String::new(),
        created_at: "2026-01-04".to_string(),
        completed_at: None,
    }
}

pub fn time_block(id: &str, title: &str) -> TimeBlock {
    TimeBlock {
        id: id.to_string(),
        title: title.to_string(),
        date: "2026-01-05".to_string(),
        start_time: "09:00".to_string(),
        end_time: "10:00".to_string(),
        category: "Work".to_string(),
        color: "#0066CC".to_string(),
        notes: String::new(),
    }
}

pub fn goal(id: &str, title: &str, milestones: &[(&str, bool)]) -> Goal {
    Goal {
        id: id.to_string(),
        title: title.to_string(),
        description: String::new(),
        target_date: "2026-12-31".to_string(),
        milestones: milestones
            .iter()
            .map(|(id, completed)| Milestone {
                id: id.to_string(),
                title: format!("Milestone {id}"),
                completed: *completed,
            })
            .collect(),
        created_at: "2026-01-04".to_string(),
        completed_at: None,
    }
}
