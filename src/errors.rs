// errors.rs
use crate::provider::ProviderError;
use astra::Response;
use thiserror::Error;

/// Errors originating from either the page server itself
/// (routing, bad input) or the booking API behind it.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Not Found")]
    NotFound,

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Upstream Error: {0}")]
    Upstream(#[from] ProviderError),

    #[error("Internal Server Error")]
    InternalError,
}

impl ServerError {
    pub fn status(&self) -> u16 {
        match self {
            ServerError::NotFound => 404,
            ServerError::BadRequest(_) => 400,
            ServerError::Upstream(ProviderError::Unauthorized(_)) => 401,
            ServerError::Upstream(ProviderError::Timeout(_)) => 504,
            ServerError::Upstream(_) => 502,
            ServerError::InternalError => 500,
        }
    }
}

// Type alias commonly used by route handlers.
pub type ResultResp = Result<Response, ServerError>;
