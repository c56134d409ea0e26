mod api_session;
mod booking;
mod client;
mod models;
mod provider_error;
mod traits;

pub use api_session::ApiSession;
pub use booking::{BookingConfirmation, BookingRequest};
pub use client::ApiClient;
pub use provider_error::ProviderError;
pub use traits::{AvailabilityProvider, BookingSubmitter};
