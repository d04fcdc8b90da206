//! Error types for backend communication and list mutations.

use thiserror::Error;

/// Errors that can occur while talking to the backend.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The HTTP request failed before a response arrived.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// The server returned an unexpected status code.
    #[error("unexpected status {status}: {body}")]
    UnexpectedStatus {
        /// HTTP status code received.
        status: u16,
        /// Response body (truncated).
        body: String,
    },
    /// The server rejected the credential (401 or 403).
    #[error("not authorized (status {status})")]
    Auth {
        /// HTTP status code received.
        status: u16,
    },
    /// The response body is not one of the expected shapes.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
    /// A request URL could not be built.
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl {
        /// The offending URL or path.
        url: String,
        /// Parser message.
        reason: String,
    },
    /// A delete was declined or failed.
    #[error(transparent)]
    Deletion(#[from] DeletionError),
}

/// Why a delete did not happen.
#[derive(Debug, Error)]
pub enum DeletionError {
    /// The user did not confirm; no request was sent.
    #[error("deletion was not confirmed")]
    Declined,
    /// The delete request itself failed.
    #[error("failed to delete {label} {id}: {source}")]
    Failed {
        /// Kind of record.
        label: &'static str,
        /// Record id.
        id: String,
        /// Underlying request error.
        source: Box<ClientError>,
    },
}

/// Coarse classification of a [`ClientError`], as shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Transport failure, unexpected status or bad URL.
    Network,
    /// Credential rejected.
    Auth,
    /// Unexpected body shape.
    MalformedResponse,
    /// Delete declined or failed.
    Deletion,
}

impl ClientError {
    /// Classify this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Http(_) | Self::UnexpectedStatus { .. } | Self::InvalidUrl { .. } => {
                ErrorKind::Network
            }
            Self::Auth { .. } => ErrorKind::Auth,
            Self::MalformedResponse(_) => ErrorKind::MalformedResponse,
            Self::Deletion(_) => ErrorKind::Deletion,
        }
    }

    /// Map a non-success status to an error; 401 and 403 become [`ClientError::Auth`].
    #[must_use]
    pub fn from_status(status: u16, body: &str) -> Self {
        match status {
            401 | 403 => Self::Auth { status },
            _ => Self::UnexpectedStatus {
                status,
                body: body.chars().take(200).collect(),
            },
        }
    }
}
