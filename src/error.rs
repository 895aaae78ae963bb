use std::error::Error;
use std::fmt;

/// Failure reported by a [`RecordSource`](crate::RecordSource).
///
/// The store never propagates these to callers; it renders them with
/// [`SourceError::message`] into the `load_error` / `edit_error` fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// The request never produced a response (connection, DNS, timeout).
    Transport(String),
    /// The server answered with a non-success status.
    Status { code: u16, message: String },
    /// The response body could not be decoded.
    Decode(String),
    /// The addressed record does not exist on the server.
    NotFound(String),
}

impl SourceError {
    pub fn transport(message: impl Into<String>) -> Self {
        SourceError::Transport(message.into())
    }

    pub fn status(code: u16, message: impl Into<String>) -> Self {
        SourceError::Status {
            code,
            message: message.into(),
        }
    }

    /// Human-readable message surfaced to the UI.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::Transport(msg) => write!(f, "transport failure: {}", msg),
            SourceError::Status { code, message } => {
                write!(f, "server responded {}: {}", code, message)
            }
            SourceError::Decode(msg) => write!(f, "malformed response: {}", msg),
            SourceError::NotFound(key) => write!(f, "record not found: {}", key),
        }
    }
}

impl Error for SourceError {}

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> Self {
        SourceError::Decode(err.to_string())
    }
}
