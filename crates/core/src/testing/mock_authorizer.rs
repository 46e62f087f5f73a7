//! Mock authorizer for testing.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::playlist::{Authorizer, UpstreamError};

/// Mock implementation of the Authorizer trait.
///
/// Hands out a fixed token, or fails every call when built with
/// [`MockAuthorizer::failing`]. An optional delay lets tests trip the
/// per-call timeout.
#[derive(Debug)]
pub struct MockAuthorizer {
    token: Option<String>,
    delay: Arc<RwLock<Option<Duration>>>,
    calls: Arc<RwLock<usize>>,
}

impl MockAuthorizer {
    /// Authorizer that always issues `token`.
    pub fn with_token(token: &str) -> Self {
        Self {
            token: Some(token.to_string()),
            delay: Arc::new(RwLock::new(None)),
            calls: Arc::new(RwLock::new(0)),
        }
    }

    /// Authorizer whose every call is rejected upstream.
    pub fn failing() -> Self {
        Self {
            token: None,
            delay: Arc::new(RwLock::new(None)),
            calls: Arc::new(RwLock::new(0)),
        }
    }

    /// Sleep this long before answering.
    pub async fn set_delay(&self, delay: Duration) {
        *self.delay.write().await = Some(delay);
    }

    /// Number of token requests received.
    pub async fn calls(&self) -> usize {
        *self.calls.read().await
    }
}

#[async_trait]
impl Authorizer for MockAuthorizer {
    async fn issue_token(&self) -> Result<String, UpstreamError> {
        *self.calls.write().await += 1;

        let delay = *self.delay.read().await;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        self.token.clone().ok_or_else(|| UpstreamError::ApiError {
            status: 401,
            message: "invalid_client".to_string(),
        })
    }
}
