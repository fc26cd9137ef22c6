//! Context-aware key routing.
//!
//! Bindings are looked up per [`KeyContext`]. Keys with no binding while
//! typing go to the input buffer.

use std::collections::HashMap;

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::core::app::{App, AppAction};

const PAGE_LINES: u16 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyContext {
    Typing,
    /// The model dropdown is open and captures navigation keys.
    Picker,
}

impl KeyContext {
    pub fn from_app(app: &App) -> Self {
        if app.is_picker_open() {
            KeyContext::Picker
        } else {
            KeyContext::Typing
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyPattern {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyPattern {
    pub fn simple(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }

    pub fn ctrl(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::CONTROL,
        }
    }
}

impl From<&KeyEvent> for KeyPattern {
    fn from(key: &KeyEvent) -> Self {
        Self {
            code: key.code,
            modifiers: key.modifiers,
        }
    }
}

type ActionFactory = fn() -> AppAction;

pub struct KeyRegistry {
    bindings: HashMap<(KeyContext, KeyPattern), ActionFactory>,
}

impl Default for KeyRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            bindings: HashMap::new(),
        };

        for context in [KeyContext::Typing, KeyContext::Picker] {
            registry.bind(context, KeyPattern::ctrl(KeyCode::Char('c')), || {
                AppAction::Quit
            });
        }

        use KeyContext::Typing;
        registry
            .bind(Typing, KeyPattern::simple(KeyCode::Esc), || AppAction::Quit)
            .bind(Typing, KeyPattern::simple(KeyCode::Enter), || {
                AppAction::SubmitInput
            })
            .bind(Typing, KeyPattern::ctrl(KeyCode::Char('n')), || {
                AppAction::StartNewConversation
            })
            .bind(Typing, KeyPattern::ctrl(KeyCode::Char('l')), || {
                AppAction::ClearMemory
            })
            .bind(Typing, KeyPattern::ctrl(KeyCode::Char('o')), || {
                AppAction::OpenModelPicker
            })
            .bind(Typing, KeyPattern::simple(KeyCode::F(2)), || {
                AppAction::OpenModelPicker
            })
            .bind(Typing, KeyPattern::simple(KeyCode::Up), || {
                AppAction::ScrollUp { lines: 1 }
            })
            .bind(Typing, KeyPattern::simple(KeyCode::Down), || {
                AppAction::ScrollDown { lines: 1 }
            })
            .bind(Typing, KeyPattern::simple(KeyCode::PageUp), || {
                AppAction::ScrollUp { lines: PAGE_LINES }
            })
            .bind(Typing, KeyPattern::simple(KeyCode::PageDown), || {
                AppAction::ScrollDown { lines: PAGE_LINES }
            });

        use KeyContext::Picker;
        registry
            .bind(Picker, KeyPattern::simple(KeyCode::Up), || {
                AppAction::PickerMoveUp
            })
            .bind(Picker, KeyPattern::simple(KeyCode::Down), || {
                AppAction::PickerMoveDown
            })
            .bind(Picker, KeyPattern::simple(KeyCode::Enter), || {
                AppAction::PickerApplySelection
            })
            .bind(Picker, KeyPattern::simple(KeyCode::Esc), || {
                AppAction::PickerEscape
            });

        registry
    }

    fn bind(
        &mut self,
        context: KeyContext,
        pattern: KeyPattern,
        action: ActionFactory,
    ) -> &mut Self {
        self.bindings.insert((context, pattern), action);
        self
    }

    pub fn lookup(&self, context: KeyContext, key: &KeyEvent) -> Option<AppAction> {
        self.bindings
            .get(&(context, KeyPattern::from(key)))
            .map(|factory| factory())
    }

    /// Resolve `key` against the current context. Unbound keys while typing
    /// edit the input in place and yield no action.
    pub fn route(&self, app: &mut App, key: &KeyEvent) -> Option<AppAction> {
        let context = KeyContext::from_app(app);
        if let Some(action) = self.lookup(context, key) {
            return Some(action);
        }
        if context == KeyContext::Typing {
            app.ui.edit_input(*key);
        }
        None
    }
}
