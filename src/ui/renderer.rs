use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::core::app::App;
use crate::core::constants::{
    CLEAR_MEMORY_LABEL, MODEL_PLACEHOLDER, NEW_CONVERSATION_LABEL, WIDGET_TITLE,
};
use crate::ui::picker::PickerState;
use crate::ui::theme::Theme;
use crate::ui::transcript::build_transcript_lines;

const INPUT_HEIGHT: u16 = 3;
const SEND_SYMBOL: &str = "➤";
const INDICATOR_WIDTH: u16 = 3;

pub fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(INPUT_HEIGHT),
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);
    render_transcript(f, app, chunks[1]);
    render_controls(f, app, chunks[2]);
    render_input(f, app, chunks[3]);

    if let Some(picker) = app.picker_state() {
        render_picker(f, picker, &app.ui.theme);
    }
}

fn model_label(app: &App) -> &str {
    app.session
        .selected_model
        .as_deref()
        .unwrap_or(MODEL_PLACEHOLDER)
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.ui.theme;
    let title = format!(" {WIDGET_TITLE} · {}", model_label(app));
    let header = Paragraph::new(Line::from(title)).style(theme.title_style);
    f.render_widget(header, area);
}

fn render_transcript(f: &mut Frame, app: &mut App, area: Rect) {
    let lines = build_transcript_lines(app.session.messages(), &app.ui.theme, area.width);
    let total = u16::try_from(lines.len()).unwrap_or(u16::MAX);
    let max_offset = total.saturating_sub(area.height);

    app.ui.scroll.sync(app.session.revision(), max_offset);

    let transcript = Paragraph::new(lines).scroll((app.ui.scroll.offset, 0));
    f.render_widget(transcript, area);
}

fn render_controls(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.ui.theme;
    let key = |label: &'static str| Span::styled(label, theme.control_key_style);
    let label = |text: String| Span::styled(text, theme.control_label_style);

    let controls = Line::from(vec![
        key("[Ctrl+O]"),
        label(format!(" ▾ {}  ", model_label(app))),
        key("[Ctrl+N]"),
        label(format!(" {NEW_CONVERSATION_LABEL}  ")),
        key("[Ctrl+L]"),
        label(format!(" {CLEAR_MEMORY_LABEL}")),
    ]);
    f.render_widget(Paragraph::new(controls), area);
}

fn render_input(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.ui.theme;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let parts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(INDICATOR_WIDTH)])
        .split(inner);

    f.render_widget(app.ui.textarea(), parts[0]);

    let (symbol, style) = send_indicator(app);
    let indicator = Paragraph::new(Line::from(Span::styled(format!(" {symbol}"), style)));
    f.render_widget(indicator, parts[1]);
}

/// The send button: a pulsing dot while a request is outstanding, dimmed
/// when there is nothing to send.
fn send_indicator(app: &App) -> (&'static str, Style) {
    let theme = &app.ui.theme;
    if app.session.is_loading {
        let elapsed = app.ui.pulse_start.elapsed().as_millis() as f32 / 1000.0;
        let phase = (elapsed * 2.0) % 2.0;
        let intensity = if phase < 1.0 { phase } else { 2.0 - phase };
        let symbol = if intensity < 0.33 {
            "○"
        } else if intensity < 0.66 {
            "◐"
        } else {
            "●"
        };
        (symbol, theme.loading_indicator_style)
    } else if app.ui.input_text().trim().is_empty() {
        (SEND_SYMBOL, theme.disabled_style)
    } else {
        (SEND_SYMBOL, theme.control_key_style)
    }
}

fn render_picker(f: &mut Frame, picker: &PickerState, theme: &Theme) {
    let area = f.area();
    let longest = picker
        .items
        .iter()
        .map(|item| item.label.chars().count())
        .max()
        .unwrap_or(0);
    let width = (longest as u16 + 6)
        .max(picker.title.chars().count() as u16 + 4)
        .min(area.width);
    let height = (picker.items.len() as u16 + 2).min(area.height);
    let rect = Rect::new(
        area.x + area.width.saturating_sub(width) / 2,
        area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    );

    f.render_widget(Clear, rect);

    let items: Vec<ListItem> = picker
        .items
        .iter()
        .map(|item| ListItem::new(item.label.clone()))
        .collect();
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border_style)
                .title(picker.title.as_str()),
        )
        .highlight_style(theme.picker_highlight_style)
        .highlight_symbol("› ");

    let mut state = ListState::default();
    state.select(Some(picker.selected));
    f.render_stateful_widget(list, rect, &mut state);
}
