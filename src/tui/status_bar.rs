//! Status bar widget for displaying status messages and help

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::export::ExportStatus;

use super::help::{self, KeyBinding};
use super::{AppState, Theme};

/// Content lines above the help line (6 height - 2 borders - 1 help line).
const MAX_CONTENT_LINES: usize = 3;

/// Status bar widget
pub struct StatusBar;

impl StatusBar {
    /// Render the status bar with contextual help
    pub fn render(f: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
        let mut content_lines: Vec<Line> = Vec::new();

        // First line: status message, or the focused control's help
        if state.status_message.is_empty() {
            content_lines.push(Line::from(vec![
                Span::styled(
                    format!("{}: ", state.focus.label()),
                    Style::default().fg(theme.primary),
                ),
                Span::styled(state.focus.help_text(), Style::default().fg(theme.text_muted)),
            ]));
        } else {
            let style = state
                .status_color_override
                .map_or_else(Style::default, |color| Style::default().fg(color));
            content_lines.push(Line::from(Span::styled(
                state.status_message.as_str(),
                style,
            )));
        }

        if let Some(line) = Self::export_line(&state.export_job.status, theme) {
            content_lines.push(line);
        }

        let padding_needed = MAX_CONTENT_LINES.saturating_sub(content_lines.len());
        let mut status_text: Vec<Line> = content_lines
            .into_iter()
            .take(MAX_CONTENT_LINES)
            .collect();
        for _ in 0..padding_needed {
            status_text.push(Line::from(""));
        }
        status_text.push(Self::help_line(help::STATUS_BAR_HINTS, theme));

        let status = Paragraph::new(status_text)
            .style(Style::default().bg(theme.background))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Status ")
                    .style(Style::default().bg(theme.background)),
            );

        f.render_widget(status, area);
    }

    fn export_line(status: &ExportStatus, theme: &Theme) -> Option<Line<'static>> {
        let color = match status {
            ExportStatus::Idle => return None,
            ExportStatus::Exporting => theme.warning,
            ExportStatus::Saved(_) => theme.success,
            ExportStatus::Failed => theme.error,
        };
        Some(Line::from(vec![
            Span::styled("Download: ", Style::default().fg(theme.primary)),
            Span::styled(status.to_string(), Style::default().fg(color)),
        ]))
    }

    fn help_line(bindings: &[KeyBinding], theme: &Theme) -> Line<'static> {
        let mut spans: Vec<Span<'static>> = vec![Span::styled(
            "Help: ",
            Style::default().fg(theme.primary),
        )];
        for (i, binding) in bindings.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" | "));
            }
            spans.push(Span::styled(
                binding.keys,
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::raw(": "));
            spans.push(Span::raw(binding.action));
        }
        Line::from(spans)
    }
}
