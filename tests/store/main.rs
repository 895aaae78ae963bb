//! Record store integration tests.
//!
//! Exercises the store end to end against `InMemorySource`:
//! - Single-flight, strictly ordered paging
//! - Debounced, case-insensitive search
//! - Remote edits reconciled into the loaded collection
//! - Disposal and external load-more wiring

mod pagination;
mod search;
