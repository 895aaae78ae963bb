//! Search: debounce window, normalization and the filtered projection.

use std::sync::Arc;
use std::time::Duration;

use record_pager::{InMemorySource, StateEvent};

use crate::support::{names, record_events, starship_pages, store_over};

const PAST_WINDOW: Duration = Duration::from_millis(200);

fn filtered_emissions(events: &[StateEvent]) -> usize {
    events
        .iter()
        .filter(|e| matches!(e, StateEvent::FilteredRecords(_)))
        .count()
}

async fn loaded_fleet() -> (InMemorySource, record_pager::RecordStore) {
    let source = InMemorySource::new(starship_pages());
    let store = store_over(&source);
    store.request_next_page();
    store.request_next_page();
    store.settled().await;
    (source, store)
}

// ============================================================================
// Test 1: Trimmed, case-insensitive filter; clearing restores everything
// ============================================================================

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn filters_by_name_after_debounce() {
    let (_source, store) = loaded_fleet().await;
    assert_eq!(store.filtered_count(), 3);

    store.set_query("  Falcon");
    tokio::time::sleep(PAST_WINDOW).await;
    assert_eq!(names(&store.filtered_records()), vec!["Millennium Falcon"]);
    assert_eq!(store.filtered_count(), 1);
    assert_eq!(store.query(), "Falcon");

    store.set_query("");
    tokio::time::sleep(PAST_WINDOW).await;
    assert_eq!(store.filtered_count(), 3);
    assert_eq!(*store.filtered_records(), *store.records());
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn whitespace_query_shows_full_collection_in_order() {
    let (_source, store) = loaded_fleet().await;

    store.set_query("   ");
    tokio::time::sleep(PAST_WINDOW).await;

    assert!(Arc::ptr_eq(&store.filtered_records(), &store.records()));
    assert_eq!(
        names(&store.filtered_records()),
        vec!["Millennium Falcon", "X-wing", "Star Destroyer"]
    );
}

// ============================================================================
// Test 2: Only the last value of a burst is acted upon
// ============================================================================

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn burst_of_keystrokes_stabilizes_once() {
    let (_source, store) = loaded_fleet().await;
    let events = record_events(&store);

    store.set_query("F");
    tokio::time::sleep(Duration::from_millis(100)).await;
    store.set_query("Fa");
    tokio::time::sleep(Duration::from_millis(100)).await;
    store.set_query(" x-W ");
    tokio::time::sleep(Duration::from_millis(100)).await;

    // Still inside the window of the last keystroke
    assert_eq!(store.query(), "");
    assert_eq!(store.filtered_count(), 3);

    tokio::time::sleep(Duration::from_millis(60)).await;
    assert_eq!(store.query(), "x-W");
    assert_eq!(names(&store.filtered_records()), vec!["X-wing"]);
    assert_eq!(filtered_emissions(&events.lock().unwrap()), 1);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn unchanged_trimmed_query_is_not_republished() {
    let (_source, store) = loaded_fleet().await;

    store.set_query("Star");
    tokio::time::sleep(PAST_WINDOW).await;
    let events = record_events(&store);

    store.set_query("Star   ");
    tokio::time::sleep(PAST_WINDOW).await;

    assert_eq!(filtered_emissions(&events.lock().unwrap()), 0);
    assert_eq!(names(&store.filtered_records()), vec!["Star Destroyer"]);
}

// ============================================================================
// Test 3: The projection follows newly merged pages
// ============================================================================

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn filter_recomputes_when_pages_arrive() {
    let source = InMemorySource::new(starship_pages());
    let store = store_over(&source);

    store.set_query("destroyer");
    tokio::time::sleep(PAST_WINDOW).await;

    store.request_next_page();
    store.settled().await;
    assert_eq!(store.filtered_count(), 0);

    store.request_next_page();
    store.settled().await;
    assert_eq!(names(&store.filtered_records()), vec!["Star Destroyer"]);
    assert_eq!(store.records().len(), 3);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn debounce_window_is_configurable() {
    let source = InMemorySource::new(starship_pages());
    let store = record_pager::RecordStore::spawn(
        source,
        record_pager::StoreConfig::new().with_debounce(Duration::from_millis(20)),
    );
    store.request_next_page();
    store.settled().await;

    store.set_query("wing");
    tokio::time::sleep(Duration::from_millis(25)).await;

    assert_eq!(names(&store.filtered_records()), vec!["X-wing"]);
}
