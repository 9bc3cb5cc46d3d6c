//! Error types for orderedmap

use std::fmt;

/// Result type alias for ordered map operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for key-addressed operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Error {
    /// The key the operation acts on is not in the map
    KeyMissing,

    /// The mark key an insertion is positioned against is not in the map
    MarkKeyMissing,

    /// The key being inserted is already in the map
    KeyAlreadyPresent,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::KeyMissing => write!(f, "key missing"),
            Error::MarkKeyMissing => write!(f, "mark key missing"),
            Error::KeyAlreadyPresent => write!(f, "key already present"),
        }
    }
}

impl std::error::Error for Error {}
