//! Keybinding definitions and the help overlay.
//!
//! The status bar and the help overlay both read from these tables.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::controls::ControlField;
use super::Theme;

/// A single keybinding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBinding {
    /// Key(s) as shown to the user
    pub keys: &'static str,
    /// What the key does
    pub action: &'static str,
}

const fn bind(keys: &'static str, action: &'static str) -> KeyBinding {
    KeyBinding { keys, action }
}

/// Global bindings, active in every control.
pub const GLOBAL_BINDINGS: &[KeyBinding] = &[
    bind("Tab/↓", "Next control"),
    bind("Shift+Tab/↑", "Previous control"),
    bind("Ctrl+S", "Download card"),
    bind("F1", "Toggle this help"),
    bind("Esc/Ctrl+C", "Quit"),
];

/// Bindings shown at the bottom of the status bar.
pub const STATUS_BAR_HINTS: &[KeyBinding] = &[
    bind("Tab", "Next"),
    bind("←/→", "Adjust"),
    bind("Ctrl+S", "Download"),
    bind("F1", "Help"),
    bind("Esc", "Quit"),
];

/// Help overlay widget
pub struct HelpOverlay;

impl HelpOverlay {
    /// Lines of the help overlay.
    #[must_use]
    pub fn content(theme: &Theme) -> Vec<Line<'static>> {
        let heading = Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD);
        let key_style = Style::default().fg(theme.success);
        let text_style = Style::default().fg(theme.text);

        let mut lines = vec![
            Line::from(Span::styled("═══ GENERAL ═══", heading)),
            Line::from(""),
        ];
        for binding in GLOBAL_BINDINGS {
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<14}", binding.keys), key_style),
                Span::styled(binding.action, text_style),
            ]));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("═══ CONTROLS ═══", heading)));
        lines.push(Line::from(""));
        for field in ControlField::ALL {
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<14}", field.label()), key_style),
                Span::styled(field.help_text(), text_style),
            ]));
        }
        lines
    }

    /// Render the help overlay centered in `area`
    pub fn render(f: &mut Frame, area: Rect, theme: &Theme) {
        f.render_widget(Clear, area);
        let help = Paragraph::new(Self::content(theme))
            .style(Style::default().bg(theme.background))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Help - Christmas Card (F1/Esc to close) ")
                    .title_alignment(Alignment::Center)
                    .border_style(Style::default().fg(theme.primary))
                    .style(Style::default().bg(theme.background)),
            );
        f.render_widget(help, area);
    }
}
