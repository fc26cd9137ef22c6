//! Flattening the message list into terminal lines.
//!
//! User bubbles hug the right edge, assistant bubbles the left. Each bubble
//! is wrapped to at most four fifths of the available width.

use ratatui::layout::Alignment;
use ratatui::text::{Line, Span};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::core::message::Message;
use crate::ui::theme::Theme;

/// Horizontal padding inside a bubble, on each side.
const BUBBLE_PADDING: usize = 1;

pub fn bubble_width(area_width: u16) -> usize {
    let width = area_width as usize;
    (width * 4 / 5).max(BUBBLE_PADDING * 2 + 1).min(width.max(1))
}

/// Build display lines for `messages`, oldest first.
pub fn build_transcript_lines(
    messages: &[Message],
    theme: &Theme,
    area_width: u16,
) -> Vec<Line<'static>> {
    let text_width = bubble_width(area_width).saturating_sub(BUBBLE_PADDING * 2).max(1);
    let mut lines = Vec::new();

    for message in messages {
        let (style, alignment) = if message.role.is_user() {
            (theme.user_bubble_style, Alignment::Right)
        } else {
            (theme.assistant_bubble_style, Alignment::Left)
        };

        let wrapped = wrap_text(&message.content, text_width);
        let inner = wrapped.iter().map(|l| l.width()).max().unwrap_or(0);
        for text in wrapped {
            let fill = inner.saturating_sub(text.width());
            let padded = format!(
                "{pad}{text}{fill}{pad}",
                pad = " ".repeat(BUBBLE_PADDING),
                fill = " ".repeat(fill)
            );
            lines.push(Line::from(Span::styled(padded, style)).alignment(alignment));
        }
        lines.push(Line::default());
    }

    lines
}

/// Greedy word wrap by display width. Explicit newlines are kept, and words
/// wider than `width` are split.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut out = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();
        let mut current_width = 0;

        for word in paragraph.split_whitespace() {
            let word_width = word.width();
            let needed = if current.is_empty() {
                word_width
            } else {
                current_width + 1 + word_width
            };

            if needed <= width {
                if !current.is_empty() {
                    current.push(' ');
                    current_width += 1;
                }
                current.push_str(word);
                current_width += word_width;
                continue;
            }

            if !current.is_empty() {
                out.push(std::mem::take(&mut current));
                current_width = 0;
            }

            if word_width <= width {
                current.push_str(word);
                current_width = word_width;
                continue;
            }

            for ch in word.chars() {
                let ch_width = ch.width().unwrap_or(0);
                if current_width + ch_width > width && !current.is_empty() {
                    out.push(std::mem::take(&mut current));
                    current_width = 0;
                }
                current.push(ch);
                current_width += ch_width;
            }
        }

        out.push(current);
    }

    out
}
