//! Carousel page - placeholder spinner under a half-block rendering of the
//! page image, shaped by the focus transform

use ratatui::{buffer::Buffer, layout::Rect, prelude::*, widgets::*};

use crate::app::focus::FocusTransform;
use crate::app::state::PreviewSlot;
use crate::constants::{MAX_CORNER_PIXELS, RADIUS_FOCUSED};
use crate::models::Preview;

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Spinner glyph for a tick counter
pub fn spinner_glyph(frame: usize) -> &'static str {
    SPINNER[(frame / 4) % SPINNER.len()]
}

/// Shrink `area` by `scale` around its centre. Never grows past `area`.
pub fn scaled_rect(area: Rect, scale: f64) -> Rect {
    let scale = scale.clamp(0.0, 1.0);
    let width = ((area.width as f64) * scale).round() as u16;
    let height = ((area.height as f64) * scale).round() as u16;
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Corner radius in half-block pixels
pub fn corner_pixels(corner_radius: f64) -> f64 {
    (corner_radius / RADIUS_FOCUSED * MAX_CORNER_PIXELS).clamp(0.0, MAX_CORNER_PIXELS)
}

/// Whether pixel (x, y) of a `width` x `height` box survives rounding the
/// corners with radius `r`
pub fn inside_rounded(x: u32, y: u32, width: u32, height: u32, r: f64) -> bool {
    if r <= 0.0 {
        return true;
    }
    let r = r.min(width as f64 / 2.0).min(height as f64 / 2.0);
    let px = x as f64 + 0.5;
    let py = y as f64 + 0.5;
    let cx = px.clamp(r, width as f64 - r);
    let cy = py.clamp(r, height as f64 - r);
    let (dx, dy) = (px - cx, py - cy);
    dx * dx + dy * dy <= r * r
}

/// One full-viewport carousel page
pub struct PageView<'a> {
    pub preview: &'a PreviewSlot,
    pub transform: FocusTransform,
    pub spinner_frame: usize,
}

impl Widget for PageView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Block::default()
            .style(Style::default().bg(Color::Black))
            .render(area, buf);

        // Placeholder layer
        let placeholder = match self.preview {
            PreviewSlot::Failed => Span::styled("image unavailable", Style::default().fg(Color::DarkGray)),
            _ => Span::styled(spinner_glyph(self.spinner_frame), Style::default().fg(Color::Gray)),
        };
        let middle = Rect {
            y: area.y + area.height / 2,
            height: area.height.min(1),
            ..area
        };
        Paragraph::new(Line::from(placeholder))
            .alignment(Alignment::Center)
            .render(middle, buf);

        if let PreviewSlot::Ready(preview) = self.preview {
            let target = scaled_rect(area, self.transform.scale);
            render_image(preview, target, corner_pixels(self.transform.corner_radius), buf);
        }
    }
}

/// Draw `preview` into `area` as upper-half blocks (two pixels per cell),
/// covering the area and masking rounded corners
fn render_image(preview: &Preview, area: Rect, radius: f64, buf: &mut Buffer) {
    let width = area.width as u32;
    let height = area.height as u32 * 2;
    let backdrop = [0u8, 0, 0];

    for row in 0..area.height {
        for col in 0..area.width {
            let px = col as u32;
            let top_y = row as u32 * 2;
            let pixel = |y: u32| {
                if inside_rounded(px, y, width, height, radius) {
                    preview.sample_cover(width, height, px, y)
                } else {
                    backdrop
                }
            };
            let [tr, tg, tb] = pixel(top_y);
            let [br, bg, bb] = pixel(top_y + 1);
            if let Some(cell) = buf.cell_mut(Position::new(area.x + col, area.y + row)) {
                cell.set_symbol("▀")
                    .set_fg(Color::Rgb(tr, tg, tb))
                    .set_bg(Color::Rgb(br, bg, bb));
            }
        }
    }
}
