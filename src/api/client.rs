//! Raw HTTP access to the chat backend.
//!
//! Every method performs exactly one request and reports failure through
//! [`RequestError`]. Callers that must never fail wrap these in
//! [`crate::core::session::SessionController`].

use std::error::Error as StdError;
use std::fmt;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::api::{
    endpoint_url, ModelsResponse, NoticeResponse, SelectModelRequest, SendMessageRequest,
    SendMessageResponse, AVAILABLE_MODELS_PATH, CLEAR_MEMORY_PATH, SELECT_MODEL_PATH,
    SEND_MESSAGE_PATH, START_CONVERSATION_PATH,
};

/// Why a backend request did not produce a usable body.
#[derive(Debug)]
pub enum RequestError {
    /// The request never completed (connection refused, reset, DNS, ...).
    Transport {
        endpoint: &'static str,
        source: reqwest::Error,
    },
    /// The backend answered with a non-2xx status.
    Status {
        endpoint: &'static str,
        status: StatusCode,
    },
    /// The body could not be read or decoded as the expected JSON shape.
    Decode {
        endpoint: &'static str,
        source: reqwest::Error,
    },
}

impl RequestError {
    pub fn endpoint(&self) -> &'static str {
        match self {
            RequestError::Transport { endpoint, .. }
            | RequestError::Status { endpoint, .. }
            | RequestError::Decode { endpoint, .. } => endpoint,
        }
    }
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::Transport { endpoint, source } => {
                write!(f, "request to /{endpoint} failed: {source}")
            }
            RequestError::Status { endpoint, status } => {
                write!(f, "/{endpoint} answered with status {status}")
            }
            RequestError::Decode { endpoint, source } => {
                write!(f, "could not decode /{endpoint} response: {source}")
            }
        }
    }
}

impl StdError for RequestError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            RequestError::Transport { source, .. } | RequestError::Decode { source, .. } => {
                Some(source)
            }
            RequestError::Status { .. } => None,
        }
    }
}

#[derive(Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub async fn send_message(&self, message: &str) -> Result<String, RequestError> {
        let body = SendMessageRequest {
            message: message.to_string(),
        };
        let request = self
            .client
            .post(endpoint_url(&self.base_url, SEND_MESSAGE_PATH))
            .json(&body);
        let parsed: SendMessageResponse = self.execute(SEND_MESSAGE_PATH, request).await?;
        Ok(parsed.response)
    }

    pub async fn start_conversation(&self) -> Result<String, RequestError> {
        let request = self
            .client
            .post(endpoint_url(&self.base_url, START_CONVERSATION_PATH));
        let parsed: NoticeResponse = self.execute(START_CONVERSATION_PATH, request).await?;
        Ok(parsed.message)
    }

    pub async fn available_models(&self) -> Result<Vec<String>, RequestError> {
        let request = self
            .client
            .get(endpoint_url(&self.base_url, AVAILABLE_MODELS_PATH));
        let parsed: ModelsResponse = self.execute(AVAILABLE_MODELS_PATH, request).await?;
        Ok(parsed.models)
    }

    /// The response body of `/select-model` is ignored; only transport
    /// failures are reported.
    pub async fn select_model(&self, model: &str) -> Result<(), RequestError> {
        let body = SelectModelRequest {
            model: model.to_string(),
        };
        debug!(model, "selecting backend model");
        self.client
            .post(endpoint_url(&self.base_url, SELECT_MODEL_PATH))
            .json(&body)
            .send()
            .await
            .map_err(|source| RequestError::Transport {
                endpoint: SELECT_MODEL_PATH,
                source,
            })?;
        Ok(())
    }

    pub async fn clear_memory(&self) -> Result<String, RequestError> {
        let request = self
            .client
            .post(endpoint_url(&self.base_url, CLEAR_MEMORY_PATH));
        let parsed: NoticeResponse = self.execute(CLEAR_MEMORY_PATH, request).await?;
        Ok(parsed.message)
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        request: reqwest::RequestBuilder,
    ) -> Result<T, RequestError> {
        debug!(endpoint, "dispatching backend request");
        let response = request
            .send()
            .await
            .map_err(|source| RequestError::Transport { endpoint, source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(RequestError::Status { endpoint, status });
        }

        response
            .json::<T>()
            .await
            .map_err(|source| RequestError::Decode { endpoint, source })
    }
}
