//! Control panel: one input per composition field plus the Download button.
//!
//! Each control owns its input constraints. The composition holder accepts
//! any value, so the bounds on message length, font size and position live
//! here.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::constants::{
    FONT_SIZE_MAX, FONT_SIZE_MIN, MESSAGE_MAX_CHARS, POSITION_MAX, POSITION_MIN,
};
use crate::models::{CardTemplate, CompositionState, TextColor, TEMPLATES, TEXT_COLORS};

use super::{AppState, Theme};

/// Width of the slider track in cells.
const SLIDER_WIDTH: usize = 20;

/// Focusable control in the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlField {
    /// Template picker
    Template,
    /// Message text area
    Message,
    /// Font size slider
    FontSize,
    /// Text color swatches
    Color,
    /// Vertical position slider
    Position,
    /// Download button
    Download,
}

impl ControlField {
    /// All controls in focus order.
    pub const ALL: [Self; 6] = [
        Self::Template,
        Self::Message,
        Self::FontSize,
        Self::Color,
        Self::Position,
        Self::Download,
    ];

    /// Get the next field.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Template => Self::Message,
            Self::Message => Self::FontSize,
            Self::FontSize => Self::Color,
            Self::Color => Self::Position,
            Self::Position => Self::Download,
            Self::Download => Self::Template,
        }
    }

    /// Get the previous field.
    #[must_use]
    pub const fn previous(self) -> Self {
        match self {
            Self::Template => Self::Download,
            Self::Message => Self::Template,
            Self::FontSize => Self::Message,
            Self::Color => Self::FontSize,
            Self::Position => Self::Color,
            Self::Download => Self::Position,
        }
    }

    /// Get the field label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Template => "🎄 Card",
            Self::Message => "💌 Message",
            Self::FontSize => "📏 Font size",
            Self::Color => "🎨 Text color",
            Self::Position => "↕ Position",
            Self::Download => "Download",
        }
    }

    /// Get the field help text.
    #[must_use]
    pub const fn help_text(&self) -> &'static str {
        match self {
            Self::Template => "←/→ choose a card, 1-5 jump to a card",
            Self::Message => "Type your message (max 50 characters), Enter for a new line",
            Self::FontSize => "←/→ adjust by 1px, Home/End for min/max",
            Self::Color => "←/→ choose a color",
            Self::Position => "←/→ move by 1%, PgUp/PgDn by 10%, ↑ top ↓ bottom",
            Self::Download => "Enter/Space to save the card as PNG",
        }
    }
}

/// Appends `ch` to the message unless it is already at the character limit.
///
/// Returns whether the message changed.
pub fn push_message_char(state: &mut CompositionState, ch: char) -> bool {
    if state.message().chars().count() >= MESSAGE_MAX_CHARS {
        return false;
    }
    let mut message = state.message().to_string();
    message.push(ch);
    state.set_message(message);
    true
}

/// Removes the last character of the message. Returns whether it changed.
pub fn pop_message_char(state: &mut CompositionState) -> bool {
    let mut message = state.message().to_string();
    if message.pop().is_none() {
        return false;
    }
    state.set_message(message);
    true
}

/// Moves the font size by `delta`, clamped to the slider range.
pub fn step_font_size(state: &mut CompositionState, delta: i32) {
    state.set_font_size(clamp_step(state.font_size(), delta, FONT_SIZE_MIN, FONT_SIZE_MAX));
}

/// Moves the position by `delta`, clamped to the slider range.
pub fn step_position(state: &mut CompositionState, delta: i32) {
    state.set_position(clamp_step(state.position(), delta, POSITION_MIN, POSITION_MAX));
}

/// Selects the template `delta` entries away, wrapping around the catalog.
pub fn step_template(state: &mut CompositionState, delta: isize) {
    let index = state.template().index() as isize + delta;
    state.set_template(CardTemplate::at_wrapping(index));
}

/// Selects the color `delta` swatches away, wrapping around the palette.
pub fn step_color(state: &mut CompositionState, delta: isize) {
    let index = state.text_color().index() as isize + delta;
    state.set_text_color(TextColor::at_wrapping(index));
}

fn clamp_step(value: u16, delta: i32, min: u16, max: u16) -> u16 {
    let stepped = (i32::from(value) + delta).clamp(i32::from(min), i32::from(max));
    u16::try_from(stepped).unwrap_or(min)
}

/// Label of the Download button for the current state.
#[must_use]
pub fn download_label(state: &CompositionState) -> &'static str {
    if state.export_in_progress() {
        "Downloading..."
    } else if state.message().is_empty() {
        "Please enter a message"
    } else {
        "🎄 Download card"
    }
}

/// Control panel widget
pub struct ControlsPanel;

impl ControlsPanel {
    /// Render the control panel
    pub fn render(f: &mut Frame, area: Rect, state: &AppState) {
        let theme = &state.theme;
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Customize ")
            .border_style(Style::default().fg(theme.primary))
            .style(Style::default().bg(theme.background));
        let inner = block.inner(area);
        f.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4), // Template
                Constraint::Length(6), // Message
                Constraint::Length(3), // Font size
                Constraint::Length(3), // Color
                Constraint::Length(4), // Position
                Constraint::Length(3), // Download
                Constraint::Min(0),
            ])
            .split(inner);

        let composition = &state.composition;
        Self::render_templates(f, chunks[0], composition, state.focus, theme);
        Self::render_message(f, chunks[1], composition, state.focus, theme);
        Self::render_slider(
            f,
            chunks[2],
            ControlField::FontSize,
            (composition.font_size(), FONT_SIZE_MIN, FONT_SIZE_MAX),
            &format!("{}px", composition.font_size()),
            state.focus,
            theme,
        );
        Self::render_colors(f, chunks[3], composition, state.focus, theme);
        Self::render_slider(
            f,
            chunks[4],
            ControlField::Position,
            (composition.position(), POSITION_MIN, POSITION_MAX),
            &format!("{}%", composition.position()),
            state.focus,
            theme,
        );
        Self::render_download(f, chunks[5], composition, state.focus, theme);
    }

    fn label_line(field: ControlField, focus: ControlField, theme: &Theme) -> Span<'static> {
        let style = if field == focus {
            Style::default()
                .fg(theme.active)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.text_secondary)
        };
        let marker = if field == focus { "▶ " } else { "  " };
        Span::styled(format!("{marker}{}", field.label()), style)
    }

    fn render_templates(
        f: &mut Frame,
        area: Rect,
        state: &CompositionState,
        focus: ControlField,
        theme: &Theme,
    ) {
        let selected = state.template();
        let mut cards: Vec<Span> = Vec::new();
        for (i, template) in TEMPLATES.iter().enumerate() {
            if i > 0 {
                cards.push(Span::raw(" "));
            }
            if template == selected {
                cards.push(Span::styled(
                    format!("[{}]", i + 1),
                    Style::default()
                        .fg(theme.accent)
                        .bg(theme.highlight_bg)
                        .add_modifier(Modifier::BOLD),
                ));
            } else {
                cards.push(Span::styled(
                    format!(" {} ", i + 1),
                    Style::default().fg(theme.text_muted),
                ));
            }
        }

        let lines = vec![
            Line::from(Self::label_line(ControlField::Template, focus, theme)),
            Line::from(cards),
            Line::from(Span::styled(
                format!("  {}", selected.name),
                Style::default().fg(theme.text_muted),
            )),
        ];
        f.render_widget(Paragraph::new(lines), area);
    }

    fn render_message(
        f: &mut Frame,
        area: Rect,
        state: &CompositionState,
        focus: ControlField,
        theme: &Theme,
    ) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(3),
                Constraint::Length(1),
            ])
            .split(area);

        f.render_widget(
            Paragraph::new(Line::from(Self::label_line(
                ControlField::Message,
                focus,
                theme,
            ))),
            rows[0],
        );

        let focused = focus == ControlField::Message;
        let border = if focused { theme.accent } else { theme.inactive };
        let body = if state.message().is_empty() && !focused {
            Paragraph::new(Span::styled(
                "e.g. To my dear family\nMerry Christmas!",
                Style::default().fg(theme.text_muted),
            ))
        } else {
            let mut text = state.message().to_string();
            if focused {
                text.push('▏');
            }
            Paragraph::new(text).style(Style::default().fg(theme.text))
        };
        f.render_widget(
            body.wrap(Wrap { trim: false })
                .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(border))),
            rows[1],
        );

        let counter = format!(
            "{}/{MESSAGE_MAX_CHARS}",
            state.message().chars().count()
        );
        f.render_widget(
            Paragraph::new(Span::styled(counter, Style::default().fg(theme.text_muted)))
                .alignment(ratatui::layout::Alignment::Right),
            rows[2],
        );
    }

    fn render_slider(
        f: &mut Frame,
        area: Rect,
        field: ControlField,
        (value, min, max): (u16, u16, u16),
        readout: &str,
        focus: ControlField,
        theme: &Theme,
    ) {
        let filled = slider_fill(value, min, max, SLIDER_WIDTH);
        let mut lines = vec![
            Line::from(vec![
                Self::label_line(field, focus, theme),
                Span::raw("  "),
                Span::styled(
                    readout.to_string(),
                    Style::default().fg(theme.text).bg(theme.highlight_bg),
                ),
            ]),
            Line::from(vec![
                Span::raw("  "),
                Span::styled("━".repeat(filled), Style::default().fg(theme.primary)),
                Span::styled("●", Style::default().fg(theme.accent)),
                Span::styled(
                    "─".repeat(SLIDER_WIDTH - filled),
                    Style::default().fg(theme.inactive),
                ),
            ]),
        ];
        if field == ControlField::Position {
            lines.push(Line::from(Span::styled(
                format!("  ↑ top{}bottom ↓", " ".repeat(SLIDER_WIDTH.saturating_sub(12))),
                Style::default().fg(theme.text_muted),
            )));
        }
        f.render_widget(Paragraph::new(lines), area);
    }

    fn render_colors(
        f: &mut Frame,
        area: Rect,
        state: &CompositionState,
        focus: ControlField,
        theme: &Theme,
    ) {
        let selected = state.text_color();
        let mut swatches: Vec<Span> = vec![Span::raw("  ")];
        for color in &TEXT_COLORS {
            let fill = Style::default().fg(color.color.to_ratatui_color());
            if color == selected {
                swatches.push(Span::styled("(", Style::default().fg(theme.accent)));
                swatches.push(Span::styled("●", fill.add_modifier(Modifier::BOLD)));
                swatches.push(Span::styled(")", Style::default().fg(theme.accent)));
            } else if color.is_light() {
                // Light swatches get a visible ring
                swatches.push(Span::styled("○", fill));
                swatches.push(Span::raw("  "));
            } else {
                swatches.push(Span::styled("●", fill));
                swatches.push(Span::raw("  "));
            }
        }
        swatches.push(Span::styled(
            format!(" {}", selected.name),
            Style::default().fg(theme.text_muted),
        ));

        let lines = vec![
            Line::from(Self::label_line(ControlField::Color, focus, theme)),
            Line::from(swatches),
        ];
        f.render_widget(Paragraph::new(lines), area);
    }

    fn render_download(
        f: &mut Frame,
        area: Rect,
        state: &CompositionState,
        focus: ControlField,
        theme: &Theme,
    ) {
        let enabled = state.can_export();
        let focused = focus == ControlField::Download;
        let style = match (enabled, focused) {
            (false, _) => Style::default().fg(theme.inactive),
            (true, true) => Style::default()
                .fg(theme.background)
                .bg(theme.accent)
                .add_modifier(Modifier::BOLD),
            (true, false) => Style::default().fg(theme.accent),
        };
        let border = if focused { theme.accent } else { theme.inactive };
        let button = Paragraph::new(download_label(state))
            .style(style)
            .alignment(ratatui::layout::Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(border)),
            );
        f.render_widget(button, area);
    }
}

/// Number of filled track cells for `value` on a `width`-cell slider.
fn slider_fill(value: u16, min: u16, max: u16, width: usize) -> usize {
    if max <= min {
        return 0;
    }
    let value = value.clamp(min, max);
    usize::from(value - min) * width / usize::from(max - min)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_order_cycles() {
        let mut field = ControlField::Template;
        for _ in 0..ControlField::ALL.len() {
            assert_eq!(field.next().previous(), field);
            field = field.next();
        }
        assert_eq!(field, ControlField::Template);
    }

    #[test]
    fn test_message_limit() {
        let mut state = CompositionState::new();
        for _ in 0..MESSAGE_MAX_CHARS {
            assert!(push_message_char(&mut state, 'x'));
        }
        assert_eq!(state.message().chars().count(), 50);

        assert!(!push_message_char(&mut state, 'y'));
        assert_eq!(state.message(), "x".repeat(50));
    }

    #[test]
    fn test_message_limit_counts_characters() {
        let mut state = CompositionState::new();
        for _ in 0..MESSAGE_MAX_CHARS {
            assert!(push_message_char(&mut state, '눈'));
        }
        assert!(!push_message_char(&mut state, '눈'));
        assert_eq!(state.message().chars().count(), 50);
    }

    #[test]
    fn test_pop_message_char() {
        let mut state = CompositionState::new();
        assert!(!pop_message_char(&mut state));
        state.set_message("Hi🎄");
        assert!(pop_message_char(&mut state));
        assert_eq!(state.message(), "Hi");
    }

    #[test]
    fn test_font_size_slider_clamps() {
        let mut state = CompositionState::new();
        step_font_size(&mut state, 100);
        assert_eq!(state.font_size(), FONT_SIZE_MAX);
        step_font_size(&mut state, -100);
        assert_eq!(state.font_size(), FONT_SIZE_MIN);
        step_font_size(&mut state, 1);
        assert_eq!(state.font_size(), FONT_SIZE_MIN + 1);
    }

    #[test]
    fn test_position_slider_clamps() {
        let mut state = CompositionState::new();
        step_position(&mut state, -10);
        assert_eq!(state.position(), 40);
        step_position(&mut state, -1000);
        assert_eq!(state.position(), POSITION_MIN);
        step_position(&mut state, 1000);
        assert_eq!(state.position(), POSITION_MAX);
    }

    #[test]
    fn test_template_and_color_wrap() {
        let mut state = CompositionState::new();
        step_template(&mut state, -1);
        assert_eq!(state.template().id, "tree");
        step_template(&mut state, 1);
        assert_eq!(state.template().id, "snowman");

        step_color(&mut state, -1);
        assert_eq!(state.text_color().name, "Navy");
    }

    #[test]
    fn test_download_label() {
        let mut state = CompositionState::new();
        assert_eq!(download_label(&state), "Please enter a message");
        state.set_message("Hello");
        assert_eq!(download_label(&state), "🎄 Download card");
        state.set_export_in_progress(true);
        assert_eq!(download_label(&state), "Downloading...");
    }

    #[test]
    fn test_slider_fill() {
        assert_eq!(slider_fill(14, 14, 28, 20), 0);
        assert_eq!(slider_fill(28, 14, 28, 20), 20);
        assert_eq!(slider_fill(50, 10, 90, 20), 10);
        assert_eq!(slider_fill(200, 10, 90, 20), 20);
    }
}
