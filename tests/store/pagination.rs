//! Paging: ordering, exhaustion, failures and retry.

use std::time::Duration;

use record_pager::{InMemorySource, SourceError, StateEvent};

use crate::support::{
    names, numbered_pages, record_events, starship_pages, store_over, until_loading,
};

// ============================================================================
// Test 1: Two pages then exhaustion
// ============================================================================

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn appends_pages_and_stops_after_last() {
    let source = InMemorySource::new(starship_pages());
    let store = store_over(&source);

    store.request_next_page();
    store.settled().await;
    assert_eq!(source.fetch_calls(), vec![1]);
    assert_eq!(names(&store.records()), vec!["Millennium Falcon", "X-wing"]);
    assert!(store.has_more());

    store.request_next_page();
    store.settled().await;
    assert_eq!(source.fetch_calls(), vec![1, 2]);
    assert_eq!(
        names(&store.records()),
        vec!["Millennium Falcon", "X-wing", "Star Destroyer"]
    );
    assert!(!store.has_more());

    // No more pages -> must not call the source again
    store.request_next_page();
    store.settled().await;
    assert_eq!(source.fetch_calls(), vec![1, 2]);
    assert!(!store.loading());
}

// ============================================================================
// Test 2: A burst of signals is drained one fetch at a time
// ============================================================================

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn burst_of_signals_fetches_sequentially() {
    let source = InMemorySource::new(numbered_pages(6))
        .with_fetch_latency(Duration::from_millis(25));
    let store = store_over(&source);

    for _ in 0..5 {
        store.request_next_page();
    }
    store.settled().await;

    assert_eq!(source.fetch_calls(), vec![1, 2, 3, 4, 5]);
    assert_eq!(source.max_concurrent_fetches(), 1);
    assert_eq!(
        names(&store.records()),
        vec!["ship-1", "ship-2", "ship-3", "ship-4", "ship-5"]
    );
    assert!(store.has_more());
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn signals_beyond_the_last_page_are_dropped() {
    let source = InMemorySource::new(numbered_pages(3))
        .with_fetch_latency(Duration::from_millis(10));
    let store = store_over(&source);

    for _ in 0..8 {
        store.request_next_page();
    }
    store.settled().await;

    assert_eq!(source.fetch_calls(), vec![1, 2, 3]);
    assert_eq!(store.records().len(), 3);
    assert!(!store.has_more());
}

// ============================================================================
// Test 3: Failures keep the cursor; the next signal retries the same page
// ============================================================================

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn failed_page_is_retried_by_next_signal() {
    let source = InMemorySource::new(starship_pages());
    source.fail_page(2, SourceError::status(502, "Bad Gateway"));
    let store = store_over(&source);

    store.request_next_page();
    store.request_next_page();
    store.settled().await;

    assert_eq!(
        store.load_error().as_deref(),
        Some("server responded 502: Bad Gateway")
    );
    assert_eq!(store.records().len(), 2);
    assert!(store.has_more());
    assert!(!store.loading());

    store.request_next_page();
    store.settled().await;

    assert_eq!(source.fetch_calls(), vec![1, 2, 2]);
    assert_eq!(store.load_error(), None);
    assert_eq!(store.records().len(), 3);
    assert!(!store.has_more());
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn failure_does_not_stop_queued_signals() {
    let source = InMemorySource::new(numbered_pages(3))
        .with_fetch_latency(Duration::from_millis(5));
    source.fail_page(1, SourceError::transport("connection reset"));
    let store = store_over(&source);

    for _ in 0..3 {
        store.request_next_page();
    }
    store.settled().await;

    assert_eq!(source.fetch_calls(), vec![1, 1, 2]);
    assert_eq!(names(&store.records()), vec!["ship-1", "ship-2"]);
    assert_eq!(store.load_error(), None);
}

// ============================================================================
// Test 4: retry()
// ============================================================================

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn retry_clears_error_and_loads_again() {
    let source = InMemorySource::new(starship_pages());
    source.fail_page(1, SourceError::transport("offline"));
    let store = store_over(&source);

    store.request_next_page();
    store.settled().await;
    assert_eq!(store.load_error().as_deref(), Some("transport failure: offline"));
    assert!(store.records().is_empty());

    store.retry();
    store.settled().await;

    assert_eq!(source.fetch_calls(), vec![1, 1]);
    assert_eq!(store.load_error(), None);
    assert_eq!(store.records().len(), 2);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn retry_while_loading_is_ignored() {
    let source = InMemorySource::new(starship_pages())
        .with_fetch_latency(Duration::from_millis(50));
    let store = store_over(&source);

    store.request_next_page();
    until_loading(&store).await;

    store.retry();
    store.settled().await;

    assert_eq!(source.fetch_calls(), vec![1]);
}

// ============================================================================
// Test 5: Observers see the merge before loading clears
// ============================================================================

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn records_publish_before_loading_clears() {
    let source = InMemorySource::new(starship_pages());
    let store = store_over(&source);
    let events = record_events(&store);

    store.request_next_page();
    store.settled().await;

    let events = events.lock().unwrap().clone();
    assert_eq!(events.first(), Some(&StateEvent::Loading(true)));
    assert_eq!(events.last(), Some(&StateEvent::Loading(false)));

    let records_at = events
        .iter()
        .position(|e| matches!(e, StateEvent::Records(r) if r.len() == 2))
        .expect("records published");
    assert!(events[records_at..].contains(&StateEvent::FilteredCount(2)));
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn first_page_is_configurable() {
    let source = InMemorySource::new(numbered_pages(4));
    let store = record_pager::RecordStore::spawn(
        source.clone(),
        record_pager::StoreConfig::new().with_first_page(3),
    );

    store.request_next_page();
    store.request_next_page();
    store.settled().await;

    assert_eq!(source.fetch_calls(), vec![3, 4]);
    assert_eq!(names(&store.records()), vec!["ship-3", "ship-4"]);
}
