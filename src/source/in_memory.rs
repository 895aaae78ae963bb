//! In-memory record source for testing and single-process scenarios.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use super::RecordSource;
use crate::error::SourceError;
use crate::record::{Page, Record};
use crate::sync::lock;

/// Scripted record source serving a fixed list of pages.
///
/// Features:
/// - Clone-friendly (clones share pages, scripts and call logs)
/// - Optional per-call latency so fetches and updates resolve asynchronously
/// - One-shot scripted page failures and a switchable update failure
/// - Call logs plus a high-water mark of concurrently running fetches
///
/// Requests past the last page answer with an empty terminal page.
///
/// ## Example
///
/// ```
/// use record_pager::{InMemorySource, Page, Record, RecordSource};
///
/// # let rt = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();
/// # rt.block_on(async {
/// let source = InMemorySource::new(vec![
///     Page::new(vec![Record::new("Millennium Falcon")]).with_next("?page=2"),
///     Page::new(vec![Record::new("Star Destroyer")]),
/// ]);
///
/// let page = source.fetch_page(1).await.unwrap();
/// assert!(page.has_next());
/// assert_eq!(source.fetch_calls(), vec![1]);
/// # });
/// ```
#[derive(Clone, Default)]
pub struct InMemorySource {
    pages: Arc<Mutex<Vec<Page>>>,
    fetch_latency: Duration,
    update_latency: Duration,
    page_failures: Arc<Mutex<HashMap<u32, VecDeque<SourceError>>>>,
    update_failure: Arc<Mutex<Option<SourceError>>>,
    fetch_calls: Arc<Mutex<Vec<u32>>>,
    update_calls: Arc<Mutex<Vec<(String, String)>>>,
    running_fetches: Arc<AtomicUsize>,
    max_running_fetches: Arc<AtomicUsize>,
}

impl InMemorySource {
    /// Create a source serving `pages` as pages 1..=len.
    pub fn new(pages: Vec<Page>) -> Self {
        Self {
            pages: Arc::new(Mutex::new(pages)),
            ..Default::default()
        }
    }

    /// Delay every fetch by `latency` before it resolves.
    pub fn with_fetch_latency(mut self, latency: Duration) -> Self {
        self.fetch_latency = latency;
        self
    }

    /// Delay every update by `latency` before it resolves.
    pub fn with_update_latency(mut self, latency: Duration) -> Self {
        self.update_latency = latency;
        self
    }

    /// Make the next fetch of `page` fail with `error`. Scripts stack up.
    pub fn fail_page(&self, page: u32, error: SourceError) {
        lock(&self.page_failures)
            .entry(page)
            .or_default()
            .push_back(error);
    }

    /// Make every update fail with `error` until [`heal_updates`](Self::heal_updates).
    pub fn fail_updates(&self, error: SourceError) {
        *lock(&self.update_failure) = Some(error);
    }

    pub fn heal_updates(&self) {
        *lock(&self.update_failure) = None;
    }

    /// Page numbers requested so far, in call order.
    pub fn fetch_calls(&self) -> Vec<u32> {
        lock(&self.fetch_calls).clone()
    }

    /// `(key, new_value)` pairs received by `update_field`, in call order.
    pub fn update_calls(&self) -> Vec<(String, String)> {
        lock(&self.update_calls).clone()
    }

    /// Highest number of fetches that were running at the same time.
    pub fn max_concurrent_fetches(&self) -> usize {
        self.max_running_fetches.load(Ordering::SeqCst)
    }

    /// Current server-side contents of every page.
    pub fn pages(&self) -> Vec<Page> {
        lock(&self.pages).clone()
    }

    async fn settle(latency: Duration) {
        if latency.is_zero() {
            tokio::task::yield_now().await;
        } else {
            tokio::time::sleep(latency).await;
        }
    }

    fn serve_page(&self, page: u32) -> Result<Page, SourceError> {
        if let Some(error) = lock(&self.page_failures)
            .get_mut(&page)
            .and_then(VecDeque::pop_front)
        {
            return Err(error);
        }

        if page == 0 {
            return Err(SourceError::status(404, "page 0 does not exist"));
        }

        let pages = lock(&self.pages);
        Ok(pages
            .get(page as usize - 1)
            .cloned()
            .unwrap_or_else(|| Page {
                count: pages.iter().map(|p| p.results.len() as u64).sum(),
                ..Default::default()
            }))
    }
}

#[async_trait]
impl RecordSource for InMemorySource {
    async fn fetch_page(&self, page: u32) -> Result<Page, SourceError> {
        lock(&self.fetch_calls).push(page);

        let running = self.running_fetches.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_running_fetches.fetch_max(running, Ordering::SeqCst);

        Self::settle(self.fetch_latency).await;

        self.running_fetches.fetch_sub(1, Ordering::SeqCst);
        self.serve_page(page)
    }

    async fn update_field(&self, key: &str, new_value: &str) -> Result<Record, SourceError> {
        lock(&self.update_calls).push((key.to_string(), new_value.to_string()));

        Self::settle(self.update_latency).await;

        if let Some(error) = lock(&self.update_failure).clone() {
            return Err(error);
        }

        let mut pages = lock(&self.pages);
        let record = pages
            .iter_mut()
            .flat_map(|page| page.results.iter_mut())
            .find(|record| record.name == key)
            .ok_or_else(|| SourceError::NotFound(key.to_string()))?;

        record.name = new_value.to_string();
        Ok(record.clone())
    }
}
