// src/app.rs
use crate::config::AppConfig;
use crate::provider::{ApiClient, AvailabilityProvider, BookingSubmitter, ProviderError};
use chrono::NaiveDate;
use std::sync::Arc;
use std::time::Duration;

const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(60);

/// Shared, read-only state handed to every request handler.
#[derive(Clone)]
pub struct App {
    pub provider: Arc<dyn AvailabilityProvider>,
    pub bookings: Arc<dyn BookingSubmitter>,
    pub horizon_days: u32,
    /// How long a page waits for one calendar fetch (unit plus availability).
    pub fetch_timeout: Duration,
    today: fn() -> NaiveDate,
}

fn local_today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

impl App {
    pub fn new(
        provider: Arc<dyn AvailabilityProvider>,
        bookings: Arc<dyn BookingSubmitter>,
        horizon_days: u32,
    ) -> Self {
        Self {
            provider,
            bookings,
            horizon_days,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            today: local_today,
        }
    }

    /// One HTTP client serves both availability and bookings.
    pub fn from_config(cfg: &AppConfig) -> Result<Self, ProviderError> {
        let client = Arc::new(ApiClient::new(cfg.api_base_url.clone(), cfg.api_timeout)?);
        let mut app = Self::new(client.clone(), client, cfg.horizon_days);
        // A fetch is two API calls, each bounded by the client timeout.
        app.fetch_timeout = cfg.api_timeout * 2;
        Ok(app)
    }

    /// Pin "today".
    #[cfg(test)]
    pub fn with_today(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    #[cfg(test)]
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    pub fn today(&self) -> NaiveDate {
        (self.today)()
    }
}
