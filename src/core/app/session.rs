use crate::core::message::Message;

/// Conversation state owned by one chat view.
///
/// The message list only grows, except through [`SessionContext::reset_with_opening`]
/// and [`SessionContext::clear_messages`]. Every change bumps a revision counter
/// the renderer uses to keep the latest message in view.
#[derive(Debug, Default)]
pub struct SessionContext {
    messages: Vec<Message>,
    pub is_loading: bool,
    pub models: Vec<String>,
    pub selected_model: Option<String>,
    revision: u64,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
        self.revision += 1;
    }

    /// Replace the whole transcript with a single assistant opening.
    pub fn reset_with_opening(&mut self, opening: String) {
        self.messages.clear();
        self.messages.push(Message::assistant(opening));
        self.revision += 1;
    }

    pub fn clear_messages(&mut self) {
        self.messages.clear();
        self.revision += 1;
    }

    pub fn begin_request(&mut self) {
        self.is_loading = true;
    }

    pub fn end_request(&mut self) {
        self.is_loading = false;
    }

    pub fn can_send(&self) -> bool {
        !self.is_loading
    }

    /// Remember the model the backend was last told to use. The empty
    /// placeholder identifier forgets it.
    pub fn remember_model(&mut self, model: &str) {
        self.selected_model = if model.is_empty() {
            None
        } else {
            Some(model.to_string())
        };
    }
}
