//! Record and page types exchanged with the record source.

mod page;
mod record;

pub use page::Page;
pub use record::Record;
