//! Raster compositor: draws a `CardView` into an RGBA bitmap.
//!
//! Layout mirrors the on-screen card: the background fills the card at its
//! natural size, the message block is centered horizontally with side padding
//! and centered vertically on its position, and the card corners are rounded.
//! Everything is multiplied by the oversampling scale.

// Pixel math converts between f32 layout units and u32 image coordinates
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]

use anyhow::{Context, Result};
use image::imageops::{self, FilterType};
use image::{GrayImage, Luma, Rgba, RgbaImage};

use super::font::GlyphRasterizer;
use super::view::{
    CardView, Overlay, CORNER_RADIUS, LINE_HEIGHT, PADDING_X, SHADOW_ALPHA, SHADOW_BLUR,
    SHADOW_OFFSET,
};

/// One laid-out line of the message.
#[derive(Debug, Clone, PartialEq)]
struct LaidOutLine {
    text: String,
    width: f32,
}

/// Composes a card bitmap.
///
/// `glyphs` may be `None` only when the view has no overlay.
pub fn compose(
    view: &CardView,
    background: &RgbaImage,
    glyphs: Option<&dyn GlyphRasterizer>,
    scale: u32,
) -> Result<RgbaImage> {
    let (natural_w, natural_h) = background.dimensions();
    if natural_w == 0 || natural_h == 0 {
        anyhow::bail!("Background '{}' has no pixels", view.background.name);
    }
    let scale = scale.max(1);
    let (width, height) = (natural_w * scale, natural_h * scale);

    let mut canvas = if scale == 1 {
        background.clone()
    } else {
        imageops::resize(background, width, height, FilterType::Lanczos3)
    };

    if let Some(overlay) = &view.overlay {
        let glyphs = glyphs.context("No font available to draw the message")?;
        draw_overlay(&mut canvas, overlay, glyphs, scale as f32);
    }

    round_corners(&mut canvas, CORNER_RADIUS * scale as f32);
    Ok(canvas)
}

/// Draws the message: blurred shadow first, then the glyphs.
fn draw_overlay(canvas: &mut RgbaImage, overlay: &Overlay, glyphs: &dyn GlyphRasterizer, scale: f32) {
    let (width, height) = canvas.dimensions();
    let px = f32::from(overlay.font_size_px) * scale;
    let line_height = px * LINE_HEIGHT;
    let max_width = (PADDING_X * 2.0).mul_add(-scale, width as f32).max(1.0);

    let lines = layout_lines(overlay, glyphs, px, max_width);
    let block_height = line_height * lines.len() as f32;
    let center_y = height as f32 * f32::from(overlay.top_percent) / 100.0;
    let block_top = center_y - block_height / 2.0;

    // Half-leading puts the glyph box in the middle of the line box
    let ascent = glyphs.ascent(px);
    let content_height = ascent + glyphs.descent(px);
    let baseline_offset = (line_height - content_height) / 2.0 + ascent;

    let mut mask = GrayImage::new(width, height);
    for (i, line) in lines.iter().enumerate() {
        let baseline = (i as f32).mul_add(line_height, block_top) + baseline_offset;
        let left = (width as f32 - line.width) / 2.0;
        draw_line(&mut mask, &line.text, glyphs, px, left, baseline);
    }

    let shadow_shift = (SHADOW_OFFSET * scale).round() as i64;
    let sigma = SHADOW_BLUR * scale / 2.0;
    let shadow = shadow_mask(&mask, shadow_shift, sigma);

    let black = Rgba([0, 0, 0, 255]);
    let fill = overlay.color.to_rgba();
    for (x, y, pixel) in canvas.enumerate_pixels_mut() {
        let shadow_cov = f32::from(shadow.get_pixel(x, y).0[0]) / 255.0 * SHADOW_ALPHA;
        if shadow_cov > 0.0 {
            blend_over(pixel, black, shadow_cov);
        }
        let text_cov = f32::from(mask.get_pixel(x, y).0[0]) / 255.0;
        if text_cov > 0.0 {
            blend_over(pixel, fill, text_cov);
        }
    }
}

/// Splits the message into lines and wraps them at `max_width`.
fn layout_lines(
    overlay: &Overlay,
    glyphs: &dyn GlyphRasterizer,
    px: f32,
    max_width: f32,
) -> Vec<LaidOutLine> {
    let space = measure(" ", glyphs, px);
    let mut out = Vec::new();

    for source in overlay.lines() {
        if source.is_empty() {
            out.push(LaidOutLine {
                text: String::new(),
                width: 0.0,
            });
            continue;
        }

        let mut current = String::new();
        let mut current_width = 0.0;
        for word in source.split(' ') {
            let word_width = measure(word, glyphs, px);
            if current.is_empty() {
                current.push_str(word);
                current_width = word_width;
            } else if current_width + space + word_width <= max_width {
                current.push(' ');
                current.push_str(word);
                current_width += space + word_width;
            } else {
                out.push(LaidOutLine {
                    text: std::mem::take(&mut current),
                    width: current_width,
                });
                current.push_str(word);
                current_width = word_width;
            }
        }
        out.push(LaidOutLine {
            text: current,
            width: current_width,
        });
    }

    out
}

fn measure(text: &str, glyphs: &dyn GlyphRasterizer, px: f32) -> f32 {
    text.chars().map(|ch| glyphs.rasterize(ch, px).advance).sum()
}

/// Writes one line's glyph coverage into the mask.
fn draw_line(
    mask: &mut GrayImage,
    text: &str,
    glyphs: &dyn GlyphRasterizer,
    px: f32,
    left: f32,
    baseline: f32,
) {
    let (width, height) = mask.dimensions();
    let mut pen = left;

    for ch in text.chars() {
        let glyph = glyphs.rasterize(ch, px);
        let origin_x = pen.round() as i64 + i64::from(glyph.xmin);
        let origin_y = baseline.round() as i64 - (glyph.height as i64 + i64::from(glyph.ymin));

        for gy in 0..glyph.height {
            for gx in 0..glyph.width {
                let x = origin_x + gx as i64;
                let y = origin_y + gy as i64;
                if x < 0 || y < 0 || x >= i64::from(width) || y >= i64::from(height) {
                    continue;
                }
                let coverage = glyph.coverage[gy * glyph.width + gx];
                let cell = mask.get_pixel_mut(x as u32, y as u32);
                cell.0[0] = cell.0[0].max(coverage);
            }
        }

        pen += glyph.advance;
    }
}

/// Offsets the text mask and blurs it. Only the region around the text is blurred.
fn shadow_mask(mask: &GrayImage, shift: i64, sigma: f32) -> GrayImage {
    let (width, height) = mask.dimensions();
    let mut shadow = GrayImage::new(width, height);

    let Some((min_x, min_y, max_x, max_y)) = ink_bounds(mask) else {
        return shadow;
    };

    let margin = (sigma * 3.0).ceil() as i64 + shift.abs();
    let x0 = (i64::from(min_x) - margin).max(0) as u32;
    let y0 = (i64::from(min_y) - margin).max(0) as u32;
    let x1 = (i64::from(max_x) + margin).min(i64::from(width) - 1) as u32;
    let y1 = (i64::from(max_y) + margin).min(i64::from(height) - 1) as u32;

    let mut region = GrayImage::new(x1 - x0 + 1, y1 - y0 + 1);
    for (x, y, pixel) in region.enumerate_pixels_mut() {
        let src_x = i64::from(x0 + x) - shift;
        let src_y = i64::from(y0 + y) - shift;
        if src_x >= 0 && src_y >= 0 && src_x < i64::from(width) && src_y < i64::from(height) {
            *pixel = *mask.get_pixel(src_x as u32, src_y as u32);
        }
    }

    let blurred = if sigma > 0.0 {
        imageops::blur(&region, sigma)
    } else {
        region
    };
    imageops::replace(&mut shadow, &blurred, i64::from(x0), i64::from(y0));
    shadow
}

/// Bounding box of non-zero mask pixels, inclusive.
fn ink_bounds(mask: &GrayImage) -> Option<(u32, u32, u32, u32)> {
    let mut bounds: Option<(u32, u32, u32, u32)> = None;
    for (x, y, Luma([v])) in mask.enumerate_pixels() {
        if *v == 0 {
            continue;
        }
        bounds = Some(match bounds {
            None => (x, y, x, y),
            Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
        });
    }
    bounds
}

/// Straight-alpha source-over blend of an opaque color at `coverage`.
fn blend_over(dst: &mut Rgba<u8>, src: Rgba<u8>, coverage: f32) {
    let src_a = coverage.clamp(0.0, 1.0);
    let dst_a = f32::from(dst.0[3]) / 255.0;
    let out_a = dst_a.mul_add(1.0 - src_a, src_a);
    if out_a <= 0.0 {
        return;
    }
    for c in 0..3 {
        let s = f32::from(src.0[c]);
        let d = f32::from(dst.0[c]);
        let v = (s * src_a + d * dst_a * (1.0 - src_a)) / out_a;
        dst.0[c] = v.round().clamp(0.0, 255.0) as u8;
    }
    dst.0[3] = (out_a * 255.0).round() as u8;
}

/// Makes pixels outside the rounded card outline transparent, anti-aliased at the edge.
fn round_corners(canvas: &mut RgbaImage, radius: f32) {
    let (width, height) = canvas.dimensions();
    let radius = radius.min(width as f32 / 2.0).min(height as f32 / 2.0);
    if radius <= 0.0 {
        return;
    }
    let reach = radius.ceil() as u32;

    for y in 0..reach.min(height) {
        for x in 0..reach.min(width) {
            // Distance from the corner circle's center, sampled at pixel centers
            let dx = radius - (x as f32 + 0.5);
            let dy = radius - (y as f32 + 0.5);
            let distance = dx.hypot(dy);
            let keep = (radius - distance + 0.5).clamp(0.0, 1.0);
            if dx <= 0.0 || dy <= 0.0 || keep >= 1.0 {
                continue;
            }
            for (cx, cy) in [
                (x, y),
                (width - 1 - x, y),
                (x, height - 1 - y),
                (width - 1 - x, height - 1 - y),
            ] {
                let pixel = canvas.get_pixel_mut(cx, cy);
                pixel.0[3] = (f32::from(pixel.0[3]) * keep).round() as u8;
            }
        }
    }
}
