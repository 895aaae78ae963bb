//! Edit reconciler.

use std::sync::Arc;

use super::shared::Shared;

impl Shared {
    /// Persist a rename remotely, then patch the collection as it stands when
    /// the response arrives (pages may have been appended meanwhile).
    pub(crate) async fn reconcile_edit(self: Arc<Self>, key: String, new_value: String) {
        if let Err(err) = self.source.update_field(&key, &new_value).await {
            tracing::warn!(key = %key, error = %err, "edit failed");
            self.notify(|surface| surface.set_edit_error(Some(err.message())));
            return;
        }

        self.with_state(|state| {
            let Some(index) = state.records.iter().position(|record| record.name == key) else {
                tracing::warn!(key = %key, "edited record is not in the loaded collection");
                self.surface.set_edit_error(Some(format!(
                    "record `{}` was updated remotely but is no longer in the loaded list",
                    key
                )));
                return;
            };

            let mut records = Vec::clone(&state.records);
            records[index] = records[index].renamed(new_value.as_str());
            state.records = Arc::new(records);

            self.publish_collection(state);
            self.surface.set_edit_error(None);
            tracing::debug!(key = %key, index, "edit merged");
        });
    }
}
