//! Placeholder rasterization: background, border, diagonal accent, caption.

use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_polygon_mut};
use imageproc::point::Point;
use imageproc::rect::Rect;

use crate::catalog::Placeholder;
use crate::ports::LabelFont;

/// Vertical gap between caption lines, in pixels.
pub const LINE_SPACING: u32 = 8;

/// Color of the border, diagonal, and caption.
pub const INK: Rgb<u8> = Rgb([255, 255, 255]);

/// Border and diagonal stroke for a canvas `width` pixels wide.
#[must_use]
pub fn stroke_width(width: u32) -> u32 {
    (width / 320).max(2)
}

/// Caption font size for a canvas `width` pixels wide.
#[must_use]
pub fn font_px(width: u32) -> u32 {
    (width / 18).max(18)
}

/// Render `placeholder` with captions drawn by `font`.
#[must_use]
pub fn render(placeholder: &Placeholder, font: &dyn LabelFont) -> RgbImage {
    let (width, height) = (placeholder.width, placeholder.height);
    let mut canvas = RgbImage::from_pixel(width, height, placeholder.background);
    let stroke = stroke_width(width);

    draw_border(&mut canvas, stroke);
    draw_diagonal(&mut canvas, stroke);
    draw_centered_label(&mut canvas, &placeholder.label, font);

    canvas
}

fn draw_border(canvas: &mut RgbImage, stroke: u32) {
    let (width, height) = canvas.dimensions();
    if width == 0 || height == 0 {
        return;
    }
    let stroke = stroke.min(width).min(height);
    let right = i32::try_from(width - stroke).unwrap_or(i32::MAX);
    let bottom = i32::try_from(height - stroke).unwrap_or(i32::MAX);

    draw_filled_rect_mut(canvas, Rect::at(0, 0).of_size(width, stroke), INK);
    draw_filled_rect_mut(canvas, Rect::at(0, bottom).of_size(width, stroke), INK);
    draw_filled_rect_mut(canvas, Rect::at(0, 0).of_size(stroke, height), INK);
    draw_filled_rect_mut(canvas, Rect::at(right, 0).of_size(stroke, height), INK);
}

/// Thick line from the bottom-left corner to the top-right corner.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
fn draw_diagonal(canvas: &mut RgbImage, stroke: u32) {
    let (width, height) = canvas.dimensions();
    if width == 0 || height == 0 {
        return;
    }
    let (w, h) = (width as f32, height as f32);
    let length = w.hypot(h);
    // Unit normal of the (w, -h) direction, scaled to half the stroke.
    let half = stroke as f32 / 2.0;
    let (nx, ny) = (h / length * half, w / length * half);

    let corners = [(0.0 + nx, h + ny), (w + nx, ny), (w - nx, -ny), (0.0 - nx, h - ny)];
    let polygon: Vec<Point<i32>> =
        corners.iter().map(|&(x, y)| Point::new(x.round() as i32, y.round() as i32)).collect();
    draw_polygon_mut(canvas, &polygon, INK);
}

/// Offset that centers `inner` within `outer`; negative when it overflows.
fn center_offset(outer: u32, inner: u32) -> i32 {
    let delta = i64::from(outer) - i64::from(inner);
    i32::try_from(delta / 2).unwrap_or(if delta < 0 { i32::MIN } else { i32::MAX })
}

fn draw_centered_label(canvas: &mut RgbImage, label: &str, font: &dyn LabelFont) {
    let lines: Vec<&str> = label.split('\n').collect();
    let widths: Vec<u32> = lines.iter().map(|line| font.text_width(line)).collect();
    let line_height = font.line_height();

    let block_width = widths.iter().copied().max().unwrap_or(0);
    let count = u32::try_from(lines.len()).unwrap_or(u32::MAX);
    let block_height = count
        .saturating_mul(line_height)
        .saturating_add(count.saturating_sub(1).saturating_mul(LINE_SPACING));

    let (width, height) = canvas.dimensions();
    let block_x = center_offset(width, block_width);
    let block_y = center_offset(height, block_height);
    let pitch = i32::try_from(line_height + LINE_SPACING).unwrap_or(i32::MAX);

    let mut y = block_y;
    for (line, line_width) in lines.iter().zip(widths) {
        let x = block_x.saturating_add(center_offset(block_width, line_width));
        font.draw_line(canvas, x, y, INK, line);
        y = y.saturating_add(pitch);
    }
}
