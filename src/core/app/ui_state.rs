use std::time::Instant;

use ratatui::crossterm::event::KeyEvent;
use ratatui::style::{Color, Modifier, Style};
use tui_textarea::TextArea;

use crate::core::constants::INPUT_PLACEHOLDER;
use crate::ui::theme::Theme;

/// Scroll position of the transcript.
///
/// While `follow` is set the view tracks the newest line; the visible offset
/// moves toward `target` a few lines per tick so jumps read as a glide.
#[derive(Debug, Clone, Default)]
pub struct TranscriptScroll {
    pub offset: u16,
    pub target: u16,
    pub follow: bool,
    max_offset: u16,
    seen_revision: u64,
}

impl TranscriptScroll {
    pub fn following() -> Self {
        Self {
            follow: true,
            ..Self::default()
        }
    }

    /// Reconcile with the latest layout. A new transcript revision re-engages
    /// following so the newest message is brought into view.
    pub fn sync(&mut self, revision: u64, max_offset: u16) {
        if revision != self.seen_revision {
            self.seen_revision = revision;
            self.follow = true;
        }
        self.max_offset = max_offset;
        if self.follow {
            self.target = max_offset;
        }
        self.target = self.target.min(max_offset);
        self.offset = self.offset.min(max_offset);
    }

    /// Advance one animation step. Returns true while still moving.
    pub fn step(&mut self) -> bool {
        if self.offset == self.target {
            return false;
        }
        if self.offset < self.target {
            let gap = self.target - self.offset;
            self.offset += (gap / 2).max(1);
        } else {
            let gap = self.offset - self.target;
            self.offset -= (gap / 2).max(1);
        }
        self.offset != self.target
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.follow = false;
        self.target = self.target.saturating_sub(lines);
        self.offset = self.target;
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.target = self.target.saturating_add(lines).min(self.max_offset);
        self.offset = self.target;
        self.follow = self.target >= self.max_offset;
    }
}

pub struct UiState {
    textarea: TextArea<'static>,
    pub scroll: TranscriptScroll,
    pub theme: Theme,
    pub exit_requested: bool,
    pub pulse_start: Instant,
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}

impl UiState {
    pub fn new() -> Self {
        let mut ui = Self {
            textarea: TextArea::default(),
            scroll: TranscriptScroll::following(),
            theme: Theme::default(),
            exit_requested: false,
            pulse_start: Instant::now(),
        };
        ui.configure_textarea();
        ui
    }

    fn configure_textarea(&mut self) {
        self.textarea.set_placeholder_text(INPUT_PLACEHOLDER);
        self.textarea
            .set_placeholder_style(Style::default().fg(Color::DarkGray));
        self.textarea.set_cursor_line_style(Style::default());
        self.textarea
            .set_cursor_style(Style::default().add_modifier(Modifier::REVERSED));
    }

    pub fn textarea(&self) -> &TextArea<'static> {
        &self.textarea
    }

    pub fn input_text(&self) -> String {
        self.textarea.lines().join("\n")
    }

    pub fn set_input_text(&mut self, text: &str) {
        self.textarea = TextArea::default();
        self.textarea.insert_str(text);
        self.configure_textarea();
    }

    pub fn clear_input(&mut self) {
        self.set_input_text("");
    }

    /// Forward an editing key to the input buffer. Returns whether the
    /// buffer changed.
    pub fn edit_input(&mut self, key: KeyEvent) -> bool {
        self.textarea.input(key)
    }
}
