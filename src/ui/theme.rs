use ratatui::style::{Color, Modifier, Style};

const UWV_BLUE: Color = Color::Rgb(0x00, 0x5b, 0xab);
const UWV_LIGHT_BLUE: Color = Color::Rgb(0xe5, 0xf1, 0xfa);

#[derive(Debug, Clone)]
pub struct Theme {
    // Chat bubbles
    pub user_bubble_style: Style,
    pub assistant_bubble_style: Style,

    // Chrome
    pub title_style: Style,
    pub border_style: Style,
    pub control_key_style: Style,
    pub control_label_style: Style,
    pub disabled_style: Style,
    pub loading_indicator_style: Style,

    // Model dropdown
    pub picker_highlight_style: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self::uwv()
    }
}

impl Theme {
    pub fn uwv() -> Self {
        Theme {
            user_bubble_style: Style::default().fg(Color::White).bg(UWV_BLUE),
            assistant_bubble_style: Style::default()
                .fg(Color::Rgb(0x1f, 0x29, 0x37))
                .bg(UWV_LIGHT_BLUE),

            title_style: Style::default()
                .fg(Color::White)
                .bg(UWV_BLUE)
                .add_modifier(Modifier::BOLD),
            border_style: Style::default().fg(UWV_BLUE),
            control_key_style: Style::default().fg(UWV_BLUE).add_modifier(Modifier::BOLD),
            control_label_style: Style::default().fg(UWV_BLUE),
            disabled_style: Style::default().fg(Color::DarkGray),
            loading_indicator_style: Style::default().fg(UWV_BLUE),

            picker_highlight_style: Style::default()
                .fg(Color::White)
                .bg(UWV_BLUE)
                .add_modifier(Modifier::BOLD),
        }
    }
}
