use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use super::process_actions;
use crate::core::app::{mount_actions, App, AppAction, AppActionDispatcher};
use crate::core::constants::{SEND_FALLBACK, START_FALLBACK, VIEW_SEND_FALLBACK};
use crate::core::message::{Message, Role};
use crate::core::session::{ChatBackend, Settled};
use crate::utils::test_utils::{
    controller_for, create_test_app, spawn_routed_stub_backend, BackendCall, ScriptedBackend,
    StubResponse,
};

struct Harness {
    app: App,
    backend: Arc<dyn ChatBackend>,
    dispatcher: AppActionDispatcher,
    rx: mpsc::UnboundedReceiver<AppAction>,
}

impl Harness {
    fn new(backend: Arc<dyn ChatBackend>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            app: create_test_app(),
            backend,
            dispatcher: AppActionDispatcher::new(tx),
            rx,
        }
    }

    fn act(&mut self, actions: impl IntoIterator<Item = AppAction>) {
        process_actions(&mut self.app, &self.backend, &self.dispatcher, actions);
    }

    fn submit(&mut self, text: &str) {
        self.app.ui.set_input_text(text);
        self.act([AppAction::SubmitInput]);
    }

    /// Apply completions as they arrive until `done` holds.
    async fn run_until(&mut self, done: impl Fn(&App) -> bool) {
        while !done(&self.app) {
            let action = tokio::time::timeout(Duration::from_secs(5), self.rx.recv())
                .await
                .expect("completion should arrive")
                .expect("dispatcher is alive");
            self.act([action]);
        }
    }

    /// Apply whatever is queued after giving spawned tasks a moment to run.
    async fn settle(&mut self) {
        tokio::time::sleep(Duration::from_millis(50)).await;
        while let Ok(action) = self.rx.try_recv() {
            self.act([action]);
        }
    }
}

#[tokio::test]
async fn mount_starts_conversation_and_selects_first_model() {
    let backend = Arc::new(ScriptedBackend::default());
    let mut harness = Harness::new(backend.clone());

    harness.act(mount_actions());
    harness
        .run_until(|app| {
            !app.session.is_loading && app.session.selected_model.is_some()
        })
        .await;
    harness.settle().await;

    assert_eq!(
        harness.app.session.messages(),
        &[Message::assistant("Welkom bij de chatbot.")]
    );
    assert_eq!(harness.app.session.models, vec!["a", "b"]);
    assert!(backend.calls().contains(&BackendCall::Select("a".into())));
}

#[tokio::test]
async fn empty_model_list_never_selects() {
    let backend = Arc::new(ScriptedBackend {
        models: Settled::Delivered(Vec::new()),
        ..ScriptedBackend::default()
    });
    let mut harness = Harness::new(backend.clone());

    harness.act(mount_actions());
    harness.run_until(|app| !app.session.is_loading).await;
    harness.settle().await;

    assert_eq!(harness.app.session.selected_model, None);
    assert!(!backend
        .calls()
        .iter()
        .any(|call| matches!(call, BackendCall::Select(_))));
}

#[tokio::test]
async fn failing_start_shows_single_fallback_opening() {
    let stub = spawn_routed_stub_backend(vec![
        (
            "/api/start-conversation",
            StubResponse::json(500, r#"{"error":"boom"}"#),
        ),
        (
            "/api/available-models",
            StubResponse::json(200, r#"{"models":[]}"#),
        ),
    ])
    .await;
    let mut harness = Harness::new(Arc::new(controller_for(stub.base_url())));

    harness.act(mount_actions());
    harness.run_until(|app| !app.session.messages().is_empty()).await;

    assert_eq!(
        harness.app.session.messages(),
        &[Message::assistant(START_FALLBACK)]
    );
    assert!(!harness.app.session.is_loading);
}

#[tokio::test]
async fn send_round_trip_through_http_backend() {
    let stub = spawn_routed_stub_backend(vec![(
        "/api/send-message",
        StubResponse::json(200, r#"{"response":"Uw uitkering komt op de 25e."}"#),
    )])
    .await;
    let mut harness = Harness::new(Arc::new(controller_for(stub.base_url())));

    harness.submit("Wanneer?");
    assert!(harness.app.session.is_loading);
    harness.run_until(|app| !app.session.is_loading).await;

    let roles: Vec<Role> = harness
        .app
        .session
        .messages()
        .iter()
        .map(|m| m.role)
        .collect();
    assert_eq!(roles, vec![Role::User, Role::Assistant]);
    assert_eq!(
        harness.app.session.messages()[1].content,
        "Uw uitkering komt op de 25e."
    );

    let requests = stub.requests().await;
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0].json_body(),
        Some(serde_json::json!({ "message": "Wanneer?" }))
    );
}

#[tokio::test]
async fn failing_send_appends_user_message_then_send_fallback() {
    let stub = spawn_routed_stub_backend(vec![(
        "/api/send-message",
        StubResponse::json(500, r#"{"error":"boom"}"#),
    )])
    .await;
    let mut harness = Harness::new(Arc::new(controller_for(stub.base_url())));

    harness.submit("Wat is mijn saldo?");
    harness.run_until(|app| !app.session.is_loading).await;

    assert_eq!(
        harness.app.session.messages(),
        &[
            Message::user("Wat is mijn saldo?"),
            Message::assistant(SEND_FALLBACK)
        ]
    );
    assert!(!harness.app.session.is_loading);
    assert_eq!(stub.requests().await.len(), 1);
}

#[tokio::test]
async fn panicking_send_appends_view_fallback() {
    let backend = Arc::new(ScriptedBackend {
        panic_on_send: true,
        ..ScriptedBackend::default()
    });
    let mut harness = Harness::new(backend);

    harness.submit("hallo");
    harness.run_until(|app| !app.session.is_loading).await;

    let messages = harness.app.session.messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[1], Message::assistant(VIEW_SEND_FALLBACK));
}

#[tokio::test]
async fn clear_memory_empties_history_even_when_backend_fails() {
    let stub = spawn_routed_stub_backend(vec![(
        "/api/clear-memory",
        StubResponse::json(500, r#"{"error":"nope"}"#),
    )])
    .await;
    let mut harness = Harness::new(Arc::new(controller_for(stub.base_url())));
    harness.app.session.push(Message::assistant("Welkom"));
    harness.app.session.push(Message::user("vraag"));

    harness.act([AppAction::ClearMemory]);
    harness
        .run_until(|app| app.session.messages().is_empty())
        .await;

    assert_eq!(stub.requests().await.len(), 1);
}

#[tokio::test]
async fn second_submit_while_loading_is_not_sent() {
    let backend = Arc::new(ScriptedBackend::default());
    let mut harness = Harness::new(backend.clone());

    harness.submit("eerste");
    harness.submit("tweede");
    harness.run_until(|app| !app.session.is_loading).await;
    harness.settle().await;

    assert_eq!(backend.calls(), vec![BackendCall::Send("eerste".into())]);
    assert_eq!(harness.app.session.messages().len(), 2);
}
