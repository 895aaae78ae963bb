use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Quiet period before a search query is stabilized.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(150);

/// Tunables for a [`RecordStore`](crate::RecordStore).
///
/// The debounce window keeps full precision in memory and is (de)serialized
/// as whole milliseconds under `debounce_ms`:
///
/// ```
/// use record_pager::StoreConfig;
///
/// let config: StoreConfig = serde_json::from_str(r#"{"debounce_ms": 300}"#).unwrap();
/// assert_eq!(config.debounce().as_millis(), 300);
/// assert_eq!(config.first_page(), 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    #[serde(rename = "debounce_ms", with = "millis")]
    debounce: Duration,
    first_page: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            first_page: 1,
        }
    }
}

impl StoreConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the search quiet period.
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Set the page the cursor starts at. Pages are 1-based; 0 becomes 1.
    pub fn with_first_page(mut self, page: u32) -> Self {
        self.first_page = page;
        self
    }

    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    pub fn first_page(&self) -> u32 {
        self.first_page.max(1)
    }
}

mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(u64::try_from(value.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
