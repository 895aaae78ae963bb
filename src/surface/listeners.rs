use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use crate::record::Record;
use crate::sync::lock;

/// A single State Surface change, carrying the field's new value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StateEvent {
    Records(Arc<Vec<Record>>),
    FilteredRecords(Arc<Vec<Record>>),
    FilteredCount(usize),
    Loading(bool),
    LoadError(Option<String>),
    EditError(Option<String>),
    HasMore(bool),
}

/// Handle returned by [`Listeners::on`], used to detach the listener.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Arc<dyn Fn(&StateEvent) + Send + Sync>;

/// Synchronous change listeners.
///
/// Events are queued in the order the changes were applied and delivered by
/// [`dispatch`](Self::dispatch), which the store only calls once its
/// collection lock is released. Whichever caller finds the queue idle drains
/// it, so one listener call never overlaps another and events raised from
/// inside a listener are delivered after it returns. Listeners must not block.
#[derive(Default)]
pub(crate) struct Listeners {
    next_id: AtomicU64,
    listeners: RwLock<Vec<(ListenerId, Listener)>>,
    pending: Mutex<Pending>,
}

#[derive(Default)]
struct Pending {
    events: VecDeque<StateEvent>,
    draining: bool,
}

/// Frees the drain slot when a listener panics mid-dispatch.
struct DrainSlot<'a>(&'a Mutex<Pending>);

impl Drop for DrainSlot<'_> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            lock(self.0).draining = false;
        }
    }
}

impl Listeners {
    pub fn on<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(&StateEvent) + Send + Sync + 'static,
    {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .push((id, Arc::new(listener)));
        id
    }

    pub fn remove(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.write().unwrap_or_else(|e| e.into_inner());
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }

    /// Queue `event` for the next [`dispatch`](Self::dispatch).
    pub fn queue(&self, event: StateEvent) {
        lock(&self.pending).events.push_back(event);
    }

    /// Deliver queued events, unless another caller is already doing so.
    pub fn dispatch(&self) {
        {
            let mut pending = lock(&self.pending);
            if pending.draining {
                return;
            }
            pending.draining = true;
        }
        let _slot = DrainSlot(&self.pending);

        loop {
            let event = {
                let mut pending = lock(&self.pending);
                match pending.events.pop_front() {
                    Some(event) => event,
                    None => {
                        // Cleared under the same lock as the empty check.
                        pending.draining = false;
                        return;
                    }
                }
            };

            // Snapshot first so a listener may register or remove listeners.
            let listeners: Vec<Listener> = self
                .listeners
                .read()
                .unwrap_or_else(|e| e.into_inner())
                .iter()
                .map(|(_, listener)| Arc::clone(listener))
                .collect();

            for listener in listeners {
                listener(&event);
            }
        }
    }
}
