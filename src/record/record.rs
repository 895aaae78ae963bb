use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single row of the remote record set.
///
/// `name` is the identifying field: edits address records by it and the
/// search filter matches against it. Every other server attribute is kept
/// verbatim in `attributes`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub name: String,
    #[serde(flatten)]
    pub attributes: BTreeMap<String, Value>,
}

impl Record {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Add a text attribute (model, manufacturer, crew, ...).
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes
            .insert(key.into(), Value::String(value.into()));
        self
    }

    /// Text value of an attribute, if present and textual.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).and_then(Value::as_str)
    }

    /// Copy of this record carrying `name` as its identifying field.
    pub fn renamed(&self, name: impl Into<String>) -> Record {
        Record {
            name: name.into(),
            attributes: self.attributes.clone(),
        }
    }
}
