mod edit_session;
mod error;
mod record;
mod source;
mod store;
mod surface;
mod sync;

pub use edit_session::{EditCommit, EditEnd, EditSession};
pub use error::SourceError;
pub use record::{Page, Record};
pub use source::{InMemorySource, RecordSource};
pub use store::{LoadMoreWatcher, RecordStore, StoreConfig, DEFAULT_DEBOUNCE};
pub use surface::{ListenerId, Observable, Snapshot, StateEvent, StateSurface};

// Re-exported so implementors of `RecordSource` need no direct dependency.
pub use async_trait::async_trait;
