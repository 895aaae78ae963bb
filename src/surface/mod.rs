//! State Surface - the observable values the store exposes to UI code.
//!
//! Every field is an [`Observable`] (snapshot + `watch` subscription). In
//! addition, synchronous listeners registered with `on_change` receive a
//! [`StateEvent`] for each published change. Observables update immediately;
//! listener events are queued and delivered on [`StateSurface::flush`].
//!
//! | field              | initial | written by                 |
//! |--------------------|---------|----------------------------|
//! | `records`          | `[]`    | page merge, edit merge     |
//! | `filtered_records` | `[]`    | filter projection          |
//! | `filtered_count`   | `0`     | filter projection          |
//! | `loading`          | `false` | pager                      |
//! | `load_error`       | `None`  | pager, `retry`             |
//! | `edit_error`       | `None`  | edit reconciler            |
//! | `has_more`         | `true`  | pager                      |

mod listeners;
mod observable;

use std::sync::Arc;

use crate::record::Record;

pub use listeners::{ListenerId, StateEvent};
pub use observable::Observable;

pub(crate) use listeners::Listeners;

/// Point-in-time copy of every State Surface field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    pub records: Arc<Vec<Record>>,
    pub filtered_records: Arc<Vec<Record>>,
    pub filtered_count: usize,
    pub loading: bool,
    pub load_error: Option<String>,
    pub edit_error: Option<String>,
    pub has_more: bool,
}

/// Observable fields of a [`RecordStore`](crate::RecordStore).
pub struct StateSurface {
    records: Observable<Arc<Vec<Record>>>,
    filtered_records: Observable<Arc<Vec<Record>>>,
    filtered_count: Observable<usize>,
    loading: Observable<bool>,
    load_error: Observable<Option<String>>,
    edit_error: Observable<Option<String>>,
    has_more: Observable<bool>,
    listeners: Listeners,
}

impl StateSurface {
    pub(crate) fn new() -> Self {
        let empty = Arc::new(Vec::new());
        Self {
            records: Observable::new(Arc::clone(&empty)),
            filtered_records: Observable::new(empty),
            filtered_count: Observable::new(0),
            loading: Observable::new(false),
            load_error: Observable::new(None),
            edit_error: Observable::new(None),
            has_more: Observable::new(true),
            listeners: Listeners::default(),
        }
    }

    pub fn records(&self) -> &Observable<Arc<Vec<Record>>> {
        &self.records
    }

    pub fn filtered_records(&self) -> &Observable<Arc<Vec<Record>>> {
        &self.filtered_records
    }

    pub fn filtered_count(&self) -> &Observable<usize> {
        &self.filtered_count
    }

    pub fn loading(&self) -> &Observable<bool> {
        &self.loading
    }

    pub fn load_error(&self) -> &Observable<Option<String>> {
        &self.load_error
    }

    pub fn edit_error(&self) -> &Observable<Option<String>> {
        &self.edit_error
    }

    pub fn has_more(&self) -> &Observable<bool> {
        &self.has_more
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            records: self.records.get(),
            filtered_records: self.filtered_records.get(),
            filtered_count: self.filtered_count.get(),
            loading: self.loading.get(),
            load_error: self.load_error.get(),
            edit_error: self.edit_error.get(),
            has_more: self.has_more.get(),
        }
    }

    pub(crate) fn listeners(&self) -> &Listeners {
        &self.listeners
    }

    /// Deliver queued change events to listeners. Never called while the
    /// store's collection lock is held.
    pub(crate) fn flush(&self) {
        self.listeners.dispatch();
    }

    pub(crate) fn publish_records(&self, records: Arc<Vec<Record>>) {
        self.records.replace(Arc::clone(&records));
        self.listeners.queue(StateEvent::Records(records));
    }

    pub(crate) fn publish_filtered(&self, filtered: Arc<Vec<Record>>) {
        let count = filtered.len();
        self.filtered_records.replace(Arc::clone(&filtered));
        self.listeners.queue(StateEvent::FilteredRecords(filtered));
        if self.filtered_count.set(count) {
            self.listeners.queue(StateEvent::FilteredCount(count));
        }
    }

    pub(crate) fn set_loading(&self, loading: bool) {
        if self.loading.set(loading) {
            self.listeners.queue(StateEvent::Loading(loading));
        }
    }

    pub(crate) fn set_load_error(&self, error: Option<String>) {
        if self.load_error.set(error.clone()) {
            self.listeners.queue(StateEvent::LoadError(error));
        }
    }

    pub(crate) fn set_edit_error(&self, error: Option<String>) {
        if self.edit_error.set(error.clone()) {
            self.listeners.queue(StateEvent::EditError(error));
        }
    }

    pub(crate) fn set_has_more(&self, has_more: bool) {
        if self.has_more.set(has_more) {
            self.listeners.queue(StateEvent::HasMore(has_more));
        }
    }
}
