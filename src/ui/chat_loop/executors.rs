//! Backend work spawned on behalf of the reducer.
//!
//! Every command runs in its own task and reports back through the action
//! dispatcher. A panic inside the backend call is caught and replaced by the
//! command's fallback so a completion action is still produced.

use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures_util::FutureExt;
use tokio::task::JoinHandle;
use tracing::warn;

use crate::core::app::{AppAction, AppActionDispatcher, AppCommand};
use crate::core::constants::{START_FALLBACK, VIEW_SEND_FALLBACK};
use crate::core::session::ChatBackend;

pub fn spawn_command(
    backend: Arc<dyn ChatBackend>,
    dispatcher: AppActionDispatcher,
    command: AppCommand,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        match command {
            AppCommand::SendMessage { text } => {
                let reply = guarded(
                    async { backend.send_message(&text).await.into_inner() },
                    "send-message",
                    || VIEW_SEND_FALLBACK.to_string(),
                )
                .await;
                dispatcher.dispatch(AppAction::ReplyReceived { reply });
            }
            AppCommand::StartConversation => {
                let opening = guarded(
                    async { backend.start_new_conversation().await.into_inner() },
                    "start-conversation",
                    || START_FALLBACK.to_string(),
                )
                .await;
                dispatcher.dispatch(AppAction::ConversationStarted { opening });
            }
            AppCommand::LoadModels => {
                let models = guarded(
                    async { backend.get_available_models().await.into_inner() },
                    "available-models",
                    Vec::new,
                )
                .await;
                dispatcher.dispatch(AppAction::ModelsLoaded { models });
            }
            AppCommand::SelectModel { model } => {
                guarded(backend.select_model(&model), "select-model", || ()).await;
            }
            AppCommand::ClearMemory => {
                guarded(backend.clear_memory(), "clear-memory", || ()).await;
                dispatcher.dispatch(AppAction::MemoryCleared);
            }
        }
    })
}

async fn guarded<T>(
    call: impl Future<Output = T>,
    operation: &str,
    fallback: impl FnOnce() -> T,
) -> T {
    match AssertUnwindSafe(call).catch_unwind().await {
        Ok(value) => value,
        Err(_) => {
            warn!(operation, "backend call panicked");
            fallback()
        }
    }
}
