use serde::{Deserialize, Serialize};

use super::Record;

/// One server response unit: a slice of records plus continuation links.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    #[serde(default)]
    pub results: Vec<Record>,
}

impl Page {
    pub fn new(results: Vec<Record>) -> Self {
        Self {
            count: results.len() as u64,
            results,
            ..Default::default()
        }
    }

    pub fn with_next(mut self, next: impl Into<String>) -> Self {
        self.next = Some(next.into());
        self
    }

    pub fn with_previous(mut self, previous: impl Into<String>) -> Self {
        self.previous = Some(previous.into());
        self
    }

    /// Whether the server advertises a further page.
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }
}
