//! Search normalizer and filter projector.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::shared::Shared;
use crate::record::Record;

/// Records whose name contains `query`, ignoring case.
///
/// An empty (or whitespace-only) query yields the input collection itself.
pub(crate) fn project(records: &Arc<Vec<Record>>, query: &str) -> Arc<Vec<Record>> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Arc::clone(records);
    }

    Arc::new(
        records
            .iter()
            .filter(|record| record.name.to_lowercase().contains(&needle))
            .cloned()
            .collect(),
    )
}

/// Start the debounce task reading raw queries from `raw`.
///
/// A raw value is stabilized once `quiet` has elapsed without another one
/// arriving. Superseded values are discarded, never queued. The task ends
/// when the raw sender is dropped.
pub(crate) fn spawn(
    shared: Arc<Shared>,
    mut raw: watch::Receiver<String>,
    quiet: Duration,
) -> JoinHandle<()> {
    let runtime = shared.runtime.clone();
    runtime.spawn(async move {
        while raw.changed().await.is_ok() {
            loop {
                tokio::select! {
                    changed = raw.changed() => {
                        if changed.is_err() {
                            return;
                        }
                    }
                    () = tokio::time::sleep(quiet) => break,
                }
            }

            let query = raw.borrow_and_update().trim().to_string();
            shared.publish_query(query);
        }
    })
}

impl Shared {
    fn publish_query(&self, query: String) {
        self.with_state(|state| {
            if state.query == query {
                tracing::debug!(query = %query, "stabilized query unchanged");
                return;
            }

            tracing::debug!(query = %query, "stabilized query published");
            state.query = query;
            self.surface
                .publish_filtered(project(&state.records, &state.query));
        });
    }
}
