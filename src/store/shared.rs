use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tokio::runtime::Handle;
use tokio::sync::watch;

use super::search::project;
use crate::record::Record;
use crate::source::RecordSource;
use crate::surface::StateSurface;
use crate::sync::lock;

/// State owned exclusively by the store's tasks.
pub(crate) struct Collection {
    pub records: Arc<Vec<Record>>,
    /// Next page to request. Written only by the pager.
    pub cursor: u32,
    /// Last stabilized search query (already trimmed).
    pub query: String,
}

/// Everything the pager, debouncer and edit tasks share.
pub(crate) struct Shared {
    pub source: Arc<dyn RecordSource>,
    pub surface: StateSurface,
    /// Runtime the store was created on; every task is spawned here so
    /// triggers work from threads outside it.
    pub runtime: Handle,
    state: Mutex<Collection>,
    /// Queued page signals plus in-flight edits.
    outstanding: watch::Sender<usize>,
    disposed: AtomicBool,
}

impl Shared {
    pub fn new(source: Arc<dyn RecordSource>, first_page: u32, runtime: Handle) -> Self {
        let (outstanding, _rx) = watch::channel(0);
        Self {
            source,
            surface: StateSurface::new(),
            runtime,
            state: Mutex::new(Collection {
                records: Arc::new(Vec::new()),
                cursor: first_page,
                query: String::new(),
            }),
            outstanding,
            disposed: AtomicBool::new(false),
        }
    }

    /// Run `f` with exclusive access to the collection.
    ///
    /// Surface publication happens inside `f` so that observers see changes
    /// in the same order they were applied. Listeners hear about them after
    /// the lock is released.
    pub fn with_state<R>(&self, f: impl FnOnce(&mut Collection) -> R) -> R {
        let out = {
            let mut state = lock(&self.state);
            f(&mut state)
        };
        self.surface.flush();
        out
    }

    /// Update surface fields outside the collection lock and notify.
    pub fn notify(&self, f: impl FnOnce(&StateSurface)) {
        f(&self.surface);
        self.surface.flush();
    }

    /// Publish `records` and the filtered view derived from it.
    pub fn publish_collection(&self, state: &Collection) {
        self.surface.publish_records(Arc::clone(&state.records));
        self.surface
            .publish_filtered(project(&state.records, &state.query));
    }

    pub fn begin_work(&self) {
        self.outstanding.send_modify(|n| *n += 1);
    }

    pub fn end_work(&self) {
        self.outstanding.send_modify(|n| *n = n.saturating_sub(1));
    }

    /// Count one unit of work until the returned guard drops, including
    /// when the task holding it panics.
    pub fn track_work(self: &Arc<Self>) -> WorkGuard {
        self.begin_work();
        WorkGuard(Arc::clone(self))
    }

    pub async fn settled(&self) {
        let mut rx = self.outstanding.subscribe();
        // The sender lives as long as `self`, so this only ends at zero.
        let _ = rx.wait_for(|n| *n == 0).await;
    }

    pub fn dispose(&self) -> bool {
        !self.disposed.swap(true, Ordering::SeqCst)
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }
}

pub(crate) struct WorkGuard(Arc<Shared>);

impl Drop for WorkGuard {
    fn drop(&mut self) {
        self.0.end_work();
    }
}
