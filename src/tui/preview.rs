//! Card preview widget.
//!
//! The background is drawn with upper half blocks, two image rows per
//! terminal row, scaled to fit the panel while keeping its aspect ratio. The
//! message is laid over it the way the exported card places it: centered
//! horizontally with side padding and vertically on the position percentage.

use image::RgbaImage;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::render::{compose_view, CardView, Overlay};

use super::AppState;

/// Aspect ratio used for the placeholder when the background cannot be loaded.
const PLACEHOLDER_SIZE: (u32, u32) = (3, 4);

/// Horizontal padding inside the card for the message, in cells.
const MESSAGE_PADDING: u16 = 2;

/// Card preview widget
pub struct CardPreview;

impl CardPreview {
    /// Render the preview panel
    pub fn render(f: &mut Frame, area: Rect, state: &AppState) {
        let theme = &state.theme;
        let view = compose_view(&state.composition);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" ✨ Card preview ✨ ")
            .title_alignment(Alignment::Center)
            .border_style(Style::default().fg(theme.primary))
            .style(Style::default().bg(theme.background));
        let inner = block.inner(area);
        f.render_widget(block, area);

        if inner.width == 0 || inner.height < 2 {
            return;
        }

        let card_area = Rect {
            height: inner.height - 1,
            ..inner
        };
        let caption_area = Rect {
            y: inner.y + inner.height - 1,
            height: 1,
            ..inner
        };

        match state.assets.background(view.background) {
            Ok(background) => {
                render_card(f.buffer_mut(), card_area, &view, Some(background.as_ref()), theme.surface);
            }
            Err(e) => {
                let card = render_card(f.buffer_mut(), card_area, &view, None, theme.surface);
                let notice = Paragraph::new(format!("{e:#}"))
                    .style(Style::default().fg(theme.error))
                    .alignment(Alignment::Center)
                    .wrap(Wrap { trim: true });
                f.render_widget(notice, Rect { height: card.height.min(3), ..card });
            }
        }

        let caption = format!(
            "{} · {}px · {}%",
            view.background.name,
            state.composition.font_size(),
            state.composition.position()
        );
        f.render_widget(
            Paragraph::new(Span::styled(caption, Style::default().fg(theme.text_muted)))
                .alignment(Alignment::Center),
            caption_area,
        );
    }
}

/// Draws the card into `area` and returns the rectangle it occupies.
///
/// Without a background the card is filled with `placeholder`.
pub fn render_card(
    buf: &mut Buffer,
    area: Rect,
    view: &CardView,
    background: Option<&RgbaImage>,
    placeholder: Color,
) -> Rect {
    let image_size = background.map_or(PLACEHOLDER_SIZE, RgbaImage::dimensions);
    let card = fit_card(area, image_size);
    if card.width == 0 || card.height == 0 {
        return card;
    }

    for row in 0..card.height {
        for col in 0..card.width {
            let (top, bottom) = background.map_or((placeholder, placeholder), |image| {
                (
                    sample(image, card, col, row * 2),
                    sample(image, card, col, row * 2 + 1),
                )
            });
            if let Some(cell) = buf.cell_mut((card.x + col, card.y + row)) {
                cell.set_symbol("▀").set_fg(top).set_bg(bottom);
            }
        }
    }

    if let Some(overlay) = &view.overlay {
        draw_message(buf, card, overlay);
    }
    card
}

/// Largest rectangle inside `area` with the image's aspect ratio.
///
/// Terminal cells are about twice as tall as wide, so each cell row holds two
/// image rows.
fn fit_card(area: Rect, (image_w, image_h): (u32, u32)) -> Rect {
    if image_w == 0 || image_h == 0 || area.width == 0 || area.height == 0 {
        return Rect::new(area.x, area.y, 0, 0);
    }
    let avail_w = u64::from(area.width);
    let avail_h = u64::from(area.height) * 2;
    let (image_w, image_h) = (u64::from(image_w), u64::from(image_h));

    // Compare avail_w / image_w with avail_h / image_h without floats
    let (card_w, card_h_px) = if avail_w * image_h <= avail_h * image_w {
        (avail_w, (avail_w * image_h / image_w).max(1))
    } else {
        ((avail_h * image_w / image_h).max(1), avail_h)
    };
    let card_h = card_h_px.div_ceil(2).min(u64::from(area.height));

    let width = u16::try_from(card_w).unwrap_or(area.width);
    let height = u16::try_from(card_h).unwrap_or(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// Color of the image pixel under preview pixel (`col`, `px_row`).
fn sample(image: &RgbaImage, card: Rect, col: u16, px_row: u16) -> Color {
    let (w, h) = image.dimensions();
    let x = (u32::from(col) * w / u32::from(card.width)).min(w - 1);
    let y = (u32::from(px_row) * h / (u32::from(card.height) * 2)).min(h - 1);
    let [r, g, b, _] = image.get_pixel(x, y).0;
    Color::Rgb(r, g, b)
}

fn draw_message(buf: &mut Buffer, card: Rect, overlay: &Overlay) {
    let text_width = card.width.saturating_sub(MESSAGE_PADDING * 2).max(1);
    let rows: Vec<String> = overlay
        .lines()
        .iter()
        .flat_map(|line| wrap_words(line, usize::from(text_width)))
        .collect();

    let style = Style::default()
        .fg(overlay.color.to_ratatui_color())
        .add_modifier(Modifier::BOLD | Modifier::ITALIC);

    let top = block_top(card, overlay.top_percent, rows.len());
    for (i, row) in rows.iter().enumerate() {
        let y = top + i as i32;
        if y < i32::from(card.y) || y >= i32::from(card.bottom()) {
            continue;
        }
        let width = u16::try_from(Span::raw(row.as_str()).width()).unwrap_or(text_width);
        let x = card.x + MESSAGE_PADDING.min(card.width) + text_width.saturating_sub(width) / 2;
        // y is inside the card, which fits in u16
        let y = u16::try_from(y).unwrap_or(card.y);
        buf.set_stringn(x, y, row, usize::from(text_width), style);
    }
}

/// First row of a block of `rows` lines centered on `top_percent` of the card.
///
/// May lie outside the card; rows beyond the card edges are clipped.
fn block_top(card: Rect, top_percent: u16, rows: usize) -> i32 {
    let center = i32::from(card.y) + i32::from(card.height) * i32::from(top_percent) / 100;
    center - i32::try_from(rows / 2).unwrap_or(0)
}

/// Greedy word wrap by display width. Words wider than `width` are split.
fn wrap_words(line: &str, width: usize) -> Vec<String> {
    let mut rows = Vec::new();
    let mut current = String::new();

    for word in line.split(' ') {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if Span::raw(candidate.as_str()).width() <= width {
            current = candidate;
            continue;
        }
        if !current.is_empty() {
            rows.push(std::mem::take(&mut current));
        }
        for ch in word.chars() {
            let mut next = current.clone();
            next.push(ch);
            if Span::raw(next.as_str()).width() > width && !current.is_empty() {
                rows.push(std::mem::take(&mut current));
                current.push(ch);
            } else {
                current = next;
            }
        }
    }
    rows.push(current);
    rows
}
