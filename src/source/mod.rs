//! Record Source - the remote collaborator the store pages through and edits.
//!
//! The store only ever talks to the server through this trait. Transport,
//! URL construction and timeouts belong to implementations; the store treats
//! every call as a suspension point whose continuation runs later.
//!
//! ```text
//! ┌───────────────────────────┐       fetch_page(n)        ┌──────────────┐
//! │        RecordStore        │ ─────────────────────────▶ │              │
//! │  pager / edit reconciler  │ ◀───────────────────────── │ RecordSource │
//! └───────────────────────────┘   Page | Record | Error    │              │
//!                                 update_field(key, v)     └──────────────┘
//! ```

mod in_memory;

use async_trait::async_trait;

use crate::error::SourceError;
use crate::record::{Page, Record};

pub use in_memory::InMemorySource;

/// Remote record API consumed by [`RecordStore`](crate::RecordStore).
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Fetch the 1-based page `page`.
    async fn fetch_page(&self, page: u32) -> Result<Page, SourceError>;

    /// Persist `new_value` as the identifying field of the record currently
    /// identified by `key`, returning the server's view of the record.
    async fn update_field(&self, key: &str, new_value: &str) -> Result<Record, SourceError>;
}
