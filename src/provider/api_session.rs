// src/provider/api_session.rs

use std::fmt;

/// Caller context for outbound API calls.
///
/// The token is handed in by whoever owns the user's session and travels with
/// each call; the client never looks it up on its own.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ApiSession {
    token: Option<String>,
}

impl ApiSession {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        let token = token.into();
        let token = token.trim();
        if token.is_empty() {
            return Self::anonymous();
        }
        Self {
            token: Some(token.to_string()),
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}

impl fmt::Debug for ApiSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiSession")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
