use serde::{Deserialize, Serialize};

pub mod client;

pub const SEND_MESSAGE_PATH: &str = "send-message";
pub const START_CONVERSATION_PATH: &str = "start-conversation";
pub const AVAILABLE_MODELS_PATH: &str = "available-models";
pub const SELECT_MODEL_PATH: &str = "select-model";
pub const CLEAR_MEMORY_PATH: &str = "clear-memory";

#[derive(Serialize, Debug, Clone)]
pub struct SendMessageRequest {
    pub message: String,
}

#[derive(Deserialize, Debug)]
pub struct SendMessageResponse {
    pub response: String,
}

/// Body returned by both `/start-conversation` and `/clear-memory`.
#[derive(Deserialize, Debug)]
pub struct NoticeResponse {
    pub message: String,
}

#[derive(Deserialize, Debug)]
pub struct ModelsResponse {
    pub models: Vec<String>,
}

#[derive(Serialize, Debug, Clone)]
pub struct SelectModelRequest {
    pub model: String,
}

/// Join a backend base URL and an endpoint path without doubling slashes.
pub fn endpoint_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
