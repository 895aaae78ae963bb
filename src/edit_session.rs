//! Edit session - the cell-editing protocol a grid UI follows before it
//! calls [`RecordStore::edit_field`].
//!
//! A session starts when the user activates a row's editable cell. The draft
//! is seeded from the record's current name, unless the activating input was
//! a single printable character, which then replaces the seed (typing over a
//! cell). Only the commit key turns the draft into an edit; cancel and focus
//! loss discard it.

use crate::record::Record;
use crate::store::RecordStore;

/// How an edit session ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditEnd {
    /// The commit key (Enter).
    Commit,
    /// The cancel key (Escape).
    Cancel,
    /// Focus left the cell.
    Blur,
}

/// A committed draft, ready to be sent to the store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditCommit {
    pub key: String,
    pub value: String,
}

impl EditCommit {
    pub fn apply(self, store: &RecordStore) {
        store.edit_field(self.key, self.value);
    }
}

/// An in-progress cell edit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditSession {
    key: String,
    draft: String,
}

impl EditSession {
    pub fn begin(record: &Record, activation: Option<char>) -> Self {
        let draft = match activation {
            Some(c) if !c.is_control() => c.to_string(),
            _ => record.name.clone(),
        };

        Self {
            key: record.name.clone(),
            draft,
        }
    }

    /// Name of the record being edited, as it was when the session began.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn insert(&mut self, c: char) {
        self.draft.push(c);
    }

    pub fn backspace(&mut self) {
        self.draft.pop();
    }

    pub fn set_draft(&mut self, draft: impl Into<String>) {
        self.draft = draft.into();
    }

    pub fn finish(self, end: EditEnd) -> Option<EditCommit> {
        match end {
            EditEnd::Commit => Some(EditCommit {
                key: self.key,
                value: self.draft,
            }),
            EditEnd::Cancel | EditEnd::Blur => None,
        }
    }
}
