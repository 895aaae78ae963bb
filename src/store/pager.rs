//! Pagination sequencer.
//!
//! "Load more" signals go into an unbounded FIFO channel with a single
//! consumer. The consumer runs one turn per signal and does not receive the
//! next signal until the previous turn (fetch, merge, cursor advance) has
//! fully completed, so at most one fetch is in flight and page numbers are
//! requested in strictly increasing order.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinError;

use super::shared::Shared;

/// Cloneable sender side of the page queue.
#[derive(Clone)]
pub(crate) struct PageTrigger {
    tx: mpsc::UnboundedSender<()>,
    shared: Arc<Shared>,
}

impl PageTrigger {
    /// Enqueue one "load next page" signal. No-op once the store is disposed.
    pub fn fire(&self) {
        if self.shared.is_disposed() {
            tracing::debug!("page signal after dispose ignored");
            return;
        }

        self.shared.begin_work();
        if self.tx.send(()).is_err() {
            self.shared.end_work();
        }
    }
}

/// Start the drain task and return the trigger that feeds it.
pub(crate) fn spawn(shared: Arc<Shared>) -> PageTrigger {
    let (tx, mut rx) = mpsc::unbounded_channel::<()>();

    let worker = Arc::clone(&shared);
    shared.runtime.spawn(async move {
        while rx.recv().await.is_some() {
            if !worker.is_disposed() {
                // Each turn is its own task so a panicking source cannot take
                // the queue down with it.
                let turn = Arc::clone(&worker);
                if let Err(err) = tokio::spawn(async move { turn.run_turn().await }).await {
                    worker.abandon_turn(&err);
                }
            }
            worker.end_work();
        }
        tracing::debug!("page queue closed");
    });

    PageTrigger { tx, shared }
}

impl Shared {
    /// Process one signal: fetch the cursor page and merge it.
    async fn run_turn(&self) {
        if !self.surface.has_more().get() {
            tracing::debug!("no further pages; signal dropped");
            return;
        }

        self.notify(|surface| {
            surface.set_loading(true);
            surface.set_load_error(None);
        });

        let page_number = self.with_state(|state| state.cursor);
        tracing::debug!(page = page_number, "fetching page");

        match self.source.fetch_page(page_number).await {
            Ok(page) => {
                let has_next = page.has_next();
                let received = page.results.len();

                self.with_state(|state| {
                    let mut records = Vec::with_capacity(state.records.len() + received);
                    records.extend(state.records.iter().cloned());
                    records.extend(page.results);
                    state.records = Arc::new(records);
                    state.cursor += 1;

                    self.publish_collection(state);
                    self.surface.set_has_more(has_next);
                    self.surface.set_loading(false);
                });

                tracing::debug!(page = page_number, received, has_next, "page merged");
            }
            Err(err) => {
                tracing::warn!(page = page_number, error = %err, "page load failed");
                self.notify(|surface| {
                    surface.set_load_error(Some(err.message()));
                    surface.set_loading(false);
                });
            }
        }
    }

    /// Settle the surface after a turn died without finishing. The cursor is
    /// untouched, so the next signal asks for the same page again.
    fn abandon_turn(&self, err: &JoinError) {
        tracing::warn!(error = %err, "page turn aborted");
        self.notify(|surface| {
            surface.set_load_error(Some("page load aborted unexpectedly".to_string()));
            surface.set_loading(false);
        });
    }
}
