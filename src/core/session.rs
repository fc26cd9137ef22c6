//! The session controller: the only place that talks to the backend.
//!
//! Each operation issues exactly one request and absorbs every failure at
//! this boundary, so callers always receive a usable value. Whether that value
//! came from the backend or from a fallback is recorded in [`Settled`].

use async_trait::async_trait;
use tracing::{info, warn};

use crate::api::client::{BackendClient, RequestError};
use crate::core::constants::{SEND_FALLBACK, START_FALLBACK};

/// A value that is always present, tagged with where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settled<T> {
    /// The backend answered and the answer decoded.
    Delivered(T),
    /// The request failed; this is the substitute value.
    Fallback(T),
}

impl<T> Settled<T> {
    fn from_result(result: Result<T, RequestError>, fallback: impl FnOnce() -> T) -> Self {
        match result {
            Ok(value) => Settled::Delivered(value),
            Err(err) => {
                warn!(endpoint = err.endpoint(), error = %err, "backend request failed");
                Settled::Fallback(fallback())
            }
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Settled::Fallback(_))
    }

    pub fn value(&self) -> &T {
        match self {
            Settled::Delivered(value) | Settled::Fallback(value) => value,
        }
    }

    pub fn into_inner(self) -> T {
        match self {
            Settled::Delivered(value) | Settled::Fallback(value) => value,
        }
    }
}

/// The five backend operations the chat view depends on.
///
/// None of them can fail from the caller's point of view.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn send_message(&self, text: &str) -> Settled<String>;
    async fn start_new_conversation(&self) -> Settled<String>;
    async fn get_available_models(&self) -> Settled<Vec<String>>;
    async fn select_model(&self, model: &str);
    async fn clear_memory(&self);
}

pub struct SessionController {
    client: BackendClient,
}

impl SessionController {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self::new(BackendClient::new(reqwest::Client::new(), base_url))
    }
}

#[async_trait]
impl ChatBackend for SessionController {
    async fn send_message(&self, text: &str) -> Settled<String> {
        Settled::from_result(self.client.send_message(text).await, || {
            SEND_FALLBACK.to_string()
        })
    }

    async fn start_new_conversation(&self) -> Settled<String> {
        Settled::from_result(self.client.start_conversation().await, || {
            START_FALLBACK.to_string()
        })
    }

    async fn get_available_models(&self) -> Settled<Vec<String>> {
        Settled::from_result(self.client.available_models().await, Vec::new)
    }

    async fn select_model(&self, model: &str) {
        if let Err(err) = self.client.select_model(model).await {
            warn!(model, error = %err, "error selecting model");
        }
    }

    async fn clear_memory(&self) {
        match self.client.clear_memory().await {
            Ok(message) => info!(%message, "backend memory cleared"),
            Err(err) => warn!(error = %err, "error clearing memory"),
        }
    }
}
