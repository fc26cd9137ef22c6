use tokio::sync::mpsc;

use super::App;
use crate::core::message::Message;
use crate::ui::picker::PickerState;

#[derive(Debug)]
pub enum AppAction {
    StartNewConversation,
    LoadModels,
    SubmitInput,
    ClearMemory,
    SelectModel { model: String },
    OpenModelPicker,
    PickerMoveUp,
    PickerMoveDown,
    PickerApplySelection,
    PickerEscape,
    ScrollUp { lines: u16 },
    ScrollDown { lines: u16 },
    Quit,
    ConversationStarted { opening: String },
    ReplyReceived { reply: String },
    ModelsLoaded { models: Vec<String> },
    MemoryCleared,
}

/// Backend work requested by an action. The chat loop turns each command
/// into one spawned task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    SendMessage { text: String },
    StartConversation,
    LoadModels,
    SelectModel { model: String },
    ClearMemory,
}

#[derive(Clone)]
pub struct AppActionDispatcher {
    tx: mpsc::UnboundedSender<AppAction>,
}

impl AppActionDispatcher {
    pub fn new(tx: mpsc::UnboundedSender<AppAction>) -> Self {
        Self { tx }
    }

    pub fn dispatch(&self, action: AppAction) {
        let _ = self.tx.send(action);
    }

    pub fn dispatch_many<I>(&self, actions: I)
    where
        I: IntoIterator<Item = AppAction>,
    {
        for action in actions {
            self.dispatch(action);
        }
    }
}

/// The two independent requests issued when the view first appears.
pub fn mount_actions() -> [AppAction; 2] {
    [AppAction::StartNewConversation, AppAction::LoadModels]
}

pub fn apply_actions(
    app: &mut App,
    actions: impl IntoIterator<Item = AppAction>,
) -> Vec<AppCommand> {
    actions
        .into_iter()
        .filter_map(|action| apply_action(app, action))
        .collect()
}

pub fn apply_action(app: &mut App, action: AppAction) -> Option<AppCommand> {
    match action {
        AppAction::StartNewConversation => {
            app.session.begin_request();
            Some(AppCommand::StartConversation)
        }
        AppAction::LoadModels => Some(AppCommand::LoadModels),
        AppAction::SubmitInput => submit_input(app),
        AppAction::ClearMemory => Some(AppCommand::ClearMemory),
        AppAction::SelectModel { model } => {
            app.session.remember_model(&model);
            Some(AppCommand::SelectModel { model })
        }
        AppAction::OpenModelPicker => {
            app.picker = Some(PickerState::for_models(
                &app.session.models,
                app.session.selected_model.as_deref(),
            ));
            None
        }
        AppAction::PickerMoveUp => {
            if let Some(picker) = app.picker.as_mut() {
                picker.move_up();
            }
            None
        }
        AppAction::PickerMoveDown => {
            if let Some(picker) = app.picker.as_mut() {
                picker.move_down();
            }
            None
        }
        AppAction::PickerApplySelection => {
            let model = app
                .picker
                .take()
                .and_then(|picker| picker.selected_id().map(str::to_string))?;
            apply_action(app, AppAction::SelectModel { model })
        }
        AppAction::PickerEscape => {
            app.picker = None;
            None
        }
        AppAction::ScrollUp { lines } => {
            app.ui.scroll.scroll_up(lines);
            None
        }
        AppAction::ScrollDown { lines } => {
            app.ui.scroll.scroll_down(lines);
            None
        }
        AppAction::Quit => {
            app.ui.exit_requested = true;
            None
        }
        AppAction::ConversationStarted { opening } => {
            app.session.reset_with_opening(opening);
            app.session.end_request();
            None
        }
        AppAction::ReplyReceived { reply } => {
            app.session.push(Message::assistant(reply));
            app.session.end_request();
            None
        }
        AppAction::ModelsLoaded { models } => {
            let first = models.first().cloned();
            app.session.models = models;
            let model = first?;
            apply_action(app, AppAction::SelectModel { model })
        }
        AppAction::MemoryCleared => {
            app.session.clear_messages();
            None
        }
    }
}

fn submit_input(app: &mut App) -> Option<AppCommand> {
    if !app.session.can_send() {
        return None;
    }
    let text = app.ui.input_text();
    if text.trim().is_empty() {
        return None;
    }
    app.session.push(Message::user(text.clone()));
    app.ui.clear_input();
    app.session.begin_request();
    Some(AppCommand::SendMessage { text })
}
