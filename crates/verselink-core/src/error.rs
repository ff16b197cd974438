use thiserror::Error;

use crate::color::PALETTE_SIZE;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("malformed payload for {key}: {message}")]
    MalformedPayload { key: String, message: String },

    #[error("missing metadata for node {0}")]
    MissingNodeMetadata(String),

    #[error("edge {0} -> {1} references a node outside the graph")]
    DanglingEdge(String, String),

    #[error("topic id {0} is outside the palette range 0..{PALETTE_SIZE}")]
    TopicOutOfRange(i64),

    #[error("parse error in {field}: {message}")]
    Parse { field: &'static str, message: String },

    #[error("network failure: {0}")]
    NetworkFailure(String),

    #[error("no result with key {0} in the current result list")]
    UnknownResult(String),
}

/// Discriminant of [`Error`], cheap to copy into state snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MalformedPayload,
    MissingNodeMetadata,
    DanglingEdge,
    TopicOutOfRange,
    Parse,
    NetworkFailure,
    UnknownResult,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MalformedPayload { .. } => ErrorKind::MalformedPayload,
            Self::MissingNodeMetadata(_) => ErrorKind::MissingNodeMetadata,
            Self::DanglingEdge(..) => ErrorKind::DanglingEdge,
            Self::TopicOutOfRange(_) => ErrorKind::TopicOutOfRange,
            Self::Parse { .. } => ErrorKind::Parse,
            Self::NetworkFailure(_) => ErrorKind::NetworkFailure,
            Self::UnknownResult(_) => ErrorKind::UnknownResult,
        }
    }

    /// Returns `true` when the operation may succeed if retried.
    ///
    /// Only backend connectivity problems qualify; data-quality errors
    /// repeat identically on every attempt.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::NetworkFailure(_))
    }

    pub(crate) fn parse(field: &'static str, message: impl Into<String>) -> Self {
        Self::Parse {
            field,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
