//! Record Store - paging, search and edits over one accumulated collection.
//!
//! ## Architecture
//!
//! ```text
//!   request_next_page()      set_query(raw)          edit_field(key, v)
//!   LoadMoreWatcher                │                        │
//!          │                       ▼                        ▼
//!          ▼               ┌────────────────┐      ┌──────────────────┐
//!   ┌─────────────┐        │ debounce task  │      │ spawned per edit │
//!   │ FIFO queue  │        │ (watch slot,   │      │ (independent of  │
//!   │ one drain   │        │  quiet window) │      │  paging)         │
//!   │ task        │        └───────┬────────┘      └────────┬─────────┘
//!   └──────┬──────┘                │                        │
//!          │  append page          │ stabilized query       │ replace one record
//!          ▼                       ▼                        ▼
//!   ┌──────────────────────────────────────────────────────────────────┐
//!   │      Mutex<Collection>  (records, cursor, query)                 │
//!   │      every mutation re-projects the filtered view and publishes  │
//!   └──────────────────────────────┬───────────────────────────────────┘
//!                                  ▼
//!                            StateSurface
//! ```

mod config;
mod edit;
mod pager;
mod record_store;
mod search;
mod shared;
mod watcher;

pub use config::{StoreConfig, DEFAULT_DEBOUNCE};
pub use record_store::RecordStore;
pub use watcher::LoadMoreWatcher;
