use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::pager::PageTrigger;

/// Connection between an external "load more" signal source (a scroll or
/// intersection watcher in the UI layer) and the store's page queue.
///
/// Every `()` received becomes one page request. The connection ends when
/// [`stop`](Self::stop) is called, the handle is dropped, the sender side
/// closes, or the store is disposed.
///
/// ## Example
///
/// ```ignore
/// let (tx, rx) = tokio::sync::mpsc::channel(8);
/// let watcher = store.attach_load_more(rx);
///
/// // bottom sentinel became visible
/// tx.send(()).await?;
///
/// // view torn down
/// watcher.stop();
/// ```
pub struct LoadMoreWatcher {
    handle: JoinHandle<()>,
}

impl LoadMoreWatcher {
    pub(crate) fn spawn(
        runtime: &Handle,
        trigger: PageTrigger,
        mut signals: mpsc::Receiver<()>,
    ) -> Self {
        let handle = runtime.spawn(async move {
            while signals.recv().await.is_some() {
                trigger.fire();
            }
            tracing::debug!("load-more source closed");
        });

        Self { handle }
    }

    pub(crate) fn abort_handle(&self) -> tokio::task::AbortHandle {
        self.handle.abort_handle()
    }

    /// Disconnect the signal source. Already-queued page requests still run.
    pub fn stop(self) {
        self.handle.abort();
    }

    /// Whether the connection is still forwarding signals.
    pub fn is_active(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for LoadMoreWatcher {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
