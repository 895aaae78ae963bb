use tokio::sync::watch;

/// A continuously observable value.
///
/// Readers take snapshots with [`get`](Self::get) or follow changes through a
/// [`watch::Receiver`] from [`subscribe`](Self::subscribe). Only the store
/// writes.
#[derive(Debug)]
pub struct Observable<T> {
    tx: watch::Sender<T>,
}

impl<T: Clone> Observable<T> {
    pub(crate) fn new(initial: T) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    /// Current value.
    pub fn get(&self) -> T {
        self.tx.borrow().clone()
    }

    /// Receiver that wakes on every published change.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }

    /// Publish `value` unconditionally.
    pub(crate) fn replace(&self, value: T) {
        self.tx.send_replace(value);
    }
}

impl<T: Clone + PartialEq> Observable<T> {
    /// Publish `value` if it differs from the current one. Returns whether a
    /// change was published.
    pub(crate) fn set(&self, value: T) -> bool {
        self.tx.send_if_modified(|current| {
            if *current == value {
                false
            } else {
                *current = value;
                true
            }
        })
    }
}
