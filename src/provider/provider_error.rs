use crate::domain::availability::SnapshotError;
use std::time::Duration;
use thiserror::Error;

/// Failures talking to the booking API. Every variant is recoverable: the
/// caller clears what it was showing and offers a retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error("network error: {0}")]
    Network(String),

    #[error("not authorized: {0}")]
    Unauthorized(String),

    #[error("provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("could not decode provider response: {0}")]
    Decode(String),

    #[error("invalid availability data: {0}")]
    Snapshot(#[from] SnapshotError),

    #[error("invalid provider URL: {0}")]
    InvalidUrl(String),

    #[error("no answer after {0:?}")]
    Timeout(Duration),
}

impl ProviderError {
    /// Text safe to show inline on a page.
    pub fn user_message(&self) -> &'static str {
        match self {
            ProviderError::Network(_) => "We could not reach the booking service. Please try again.",
            ProviderError::Unauthorized(_) => "Your session has expired. Please sign in again.",
            ProviderError::Status { status, .. } if *status == 404 => {
                "This room type could not be found."
            }
            ProviderError::Status { .. } => "The booking service returned an error. Please try again.",
            ProviderError::Decode(_) | ProviderError::Snapshot(_) => {
                "Availability data could not be read. Please try again."
            }
            ProviderError::InvalidUrl(_) => "The booking service is misconfigured.",
            ProviderError::Timeout(_) => {
                "The booking service took too long to answer. Please try again."
            }
        }
    }
}
