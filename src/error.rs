//! Error type shared by every bridge command.
//!
//! Commands reject with a single message string on the web side, so the
//! `Serialize` impl renders the `Display` text rather than a tagged enum.

use serde::{Serialize, Serializer};

pub type Result<T> = std::result::Result<T, ShellError>;

#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    /// A required bridge argument was missing. Raised before any I/O.
    #[error("{0}")]
    Validation(String),

    /// Directory creation or file write failed.
    #[error("{context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// No foreground activity or window to act on.
    #[error("{0}")]
    Unavailable(String),

    /// A host platform call (JNI, window handle, path lookup) failed.
    #[error("{0}")]
    Platform(String),
}

impl ShellError {
    pub fn io(context: &'static str, source: std::io::Error) -> Self {
        ShellError::Io { context, source }
    }
}

impl Serialize for ShellError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
