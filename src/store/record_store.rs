use std::sync::{Arc, Mutex};

use tokio::runtime::Handle;
use tokio::sync::{mpsc, watch};
use tokio::task::AbortHandle;

use super::config::StoreConfig;
use super::pager::{self, PageTrigger};
use super::search;
use super::shared::Shared;
use super::watcher::LoadMoreWatcher;
use crate::record::Record;
use crate::source::RecordSource;
use crate::surface::{ListenerId, Snapshot, StateEvent, StateSurface};
use crate::sync::lock;

/// Client-side state manager for a server-paginated record set.
///
/// Trigger operations are fire-and-forget and never fail; outcomes show up on
/// the [`StateSurface`]. Must be created inside a tokio runtime; once created,
/// it may be driven from any thread.
///
/// ## Example
///
/// ```
/// use record_pager::{InMemorySource, Page, Record, RecordStore, StoreConfig};
///
/// # let rt = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();
/// # rt.block_on(async {
/// let source = InMemorySource::new(vec![
///     Page::new(vec![Record::new("Millennium Falcon"), Record::new("X-wing")])
///         .with_next("?page=2"),
///     Page::new(vec![Record::new("Star Destroyer")]),
/// ]);
///
/// let store = RecordStore::spawn(source, StoreConfig::default());
/// store.request_next_page();
/// store.request_next_page();
/// store.settled().await;
///
/// assert_eq!(store.records().len(), 3);
/// assert!(!store.has_more());
/// # });
/// ```
pub struct RecordStore {
    shared: Arc<Shared>,
    pages: Mutex<Option<PageTrigger>>,
    query: Mutex<Option<watch::Sender<String>>>,
    tasks: Mutex<Vec<AbortHandle>>,
}

impl RecordStore {
    /// Start a store over `source`.
    pub fn spawn<S>(source: S, config: StoreConfig) -> Self
    where
        S: RecordSource + 'static,
    {
        Self::spawn_shared(Arc::new(source), config)
    }

    /// Start a store over an already shared source.
    pub fn spawn_shared(source: Arc<dyn RecordSource>, config: StoreConfig) -> Self {
        let shared = Arc::new(Shared::new(source, config.first_page(), Handle::current()));

        let trigger = pager::spawn(Arc::clone(&shared));

        let (query_tx, query_rx) = watch::channel(String::new());
        let debouncer = search::spawn(Arc::clone(&shared), query_rx, config.debounce());

        tracing::debug!(
            first_page = config.first_page(),
            debounce = ?config.debounce(),
            "record store started"
        );

        Self {
            shared,
            pages: Mutex::new(Some(trigger)),
            query: Mutex::new(Some(query_tx)),
            tasks: Mutex::new(vec![debouncer.abort_handle()]),
        }
    }

    // ------------------------------------------------------------------
    // Triggers
    // ------------------------------------------------------------------

    /// Queue one "load next page" signal.
    ///
    /// Signals are processed strictly one at a time in arrival order; each
    /// one fetches the page after the last merged one, or does nothing once
    /// the server reported the final page. No-op after [`dispose`](Self::dispose).
    pub fn request_next_page(&self) {
        if let Some(trigger) = lock(&self.pages).as_ref() {
            trigger.fire();
        }
    }

    /// Clear the load error and queue one more page signal, unless a page is
    /// currently loading.
    pub fn retry(&self) {
        if self.shared.surface.loading().get() || self.shared.is_disposed() {
            return;
        }
        self.shared.notify(|surface| surface.set_load_error(None));
        self.request_next_page();
    }

    /// Replace the raw search query. The filtered view follows after the
    /// debounce window.
    pub fn set_query(&self, raw: impl Into<String>) {
        if let Some(tx) = lock(&self.query).as_ref() {
            tx.send_replace(raw.into());
        }
    }

    /// Rename the record currently named `key` to `new_value`, remotely and
    /// then locally. Runs independently of page loading.
    pub fn edit_field(&self, key: impl Into<String>, new_value: impl Into<String>) {
        if self.shared.is_disposed() {
            return;
        }

        let shared = Arc::clone(&self.shared);
        let (key, new_value) = (key.into(), new_value.into());

        let work = shared.track_work();
        self.shared.runtime.spawn(async move {
            let _work = work;
            shared.reconcile_edit(key, new_value).await;
        });
    }

    /// Drop the current edit error.
    pub fn clear_edit_error(&self) {
        self.shared.notify(|surface| surface.set_edit_error(None));
    }

    /// Forward signals from an external "load more" source into the page
    /// queue until the returned watcher is stopped or the store disposed.
    pub fn attach_load_more(&self, signals: mpsc::Receiver<()>) -> Option<LoadMoreWatcher> {
        let trigger = lock(&self.pages).as_ref()?.clone();
        let watcher = LoadMoreWatcher::spawn(&self.shared.runtime, trigger, signals);
        lock(&self.tasks).push(watcher.abort_handle());
        Some(watcher)
    }

    // ------------------------------------------------------------------
    // State Surface
    // ------------------------------------------------------------------

    pub fn surface(&self) -> &StateSurface {
        &self.shared.surface
    }

    pub fn snapshot(&self) -> Snapshot {
        self.shared.surface.snapshot()
    }

    pub fn records(&self) -> Arc<Vec<Record>> {
        self.shared.surface.records().get()
    }

    pub fn filtered_records(&self) -> Arc<Vec<Record>> {
        self.shared.surface.filtered_records().get()
    }

    pub fn filtered_count(&self) -> usize {
        self.shared.surface.filtered_count().get()
    }

    pub fn loading(&self) -> bool {
        self.shared.surface.loading().get()
    }

    pub fn load_error(&self) -> Option<String> {
        self.shared.surface.load_error().get()
    }

    pub fn edit_error(&self) -> Option<String> {
        self.shared.surface.edit_error().get()
    }

    pub fn has_more(&self) -> bool {
        self.shared.surface.has_more().get()
    }

    /// The stabilized (debounced, trimmed) search query.
    pub fn query(&self) -> String {
        self.shared.with_state(|state| state.query.clone())
    }

    /// Register a listener called synchronously after every surface change.
    ///
    /// Listeners run outside the store's internal lock and may read from or
    /// trigger the store; events they cause are delivered after they return.
    pub fn on_change<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(&StateEvent) + Send + Sync + 'static,
    {
        self.shared.surface.listeners().on(listener)
    }

    pub fn remove_listener(&self, id: ListenerId) -> bool {
        self.shared.surface.listeners().remove(id)
    }

    /// Resolves once no page signal is queued or running and no edit is in
    /// flight. Pending debounce windows are not waited for.
    pub async fn settled(&self) {
        self.shared.settled().await;
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Stop accepting triggers and tear down the debouncer and attached
    /// watchers. A fetch or edit already issued still completes and merges;
    /// queued page signals are discarded. Idempotent.
    pub fn dispose(&self) {
        if !self.shared.dispose() {
            return;
        }

        lock(&self.pages).take();
        lock(&self.query).take();
        for task in lock(&self.tasks).drain(..) {
            task.abort();
        }

        tracing::debug!("record store disposed");
    }

    pub fn is_disposed(&self) -> bool {
        self.shared.is_disposed()
    }
}

impl Drop for RecordStore {
    fn drop(&mut self) {
        self.dispose();
    }
}
