//! Action bar - slides up from the bottom of the page while focused

use ratatui::{prelude::*, widgets::*};

use crate::constants::{BAR_HEIGHT_UNITS, BAR_ROWS};
use crate::messages::UiEvent;

/// Buttons in display order
pub const BUTTONS: [(&str, UiEvent); 3] = [
    ("⟳ Refresh [r]", UiEvent::Refresh),
    ("⇪ Share [s]", UiEvent::Share),
    ("⤓ Save [d]", UiEvent::Save),
];

/// Rows of the bar on screen for a given offset (-80 hidden, 0 visible)
pub fn visible_rows(bar_offset: f64) -> u16 {
    let shown = (bar_offset + BAR_HEIGHT_UNITS) / BAR_HEIGHT_UNITS;
    (shown * BAR_ROWS as f64).round().clamp(0.0, BAR_ROWS as f64) as u16
}

/// Screen rect of the visible part of the bar inside `page`
pub fn bar_area(page: Rect, bar_offset: f64) -> Option<Rect> {
    let rows = visible_rows(bar_offset).min(page.height);
    if rows == 0 {
        return None;
    }
    Some(Rect {
        y: page.y + page.height - rows,
        height: rows,
        ..page
    })
}

fn button_columns(bar: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(bar)
        .to_vec()
}

/// Button under a screen position
pub fn button_at(bar: Rect, position: Position) -> Option<UiEvent> {
    if !bar.contains(position) {
        return None;
    }
    button_columns(bar)
        .iter()
        .zip(BUTTONS.iter())
        .find(|(column, _)| column.contains(position))
        .map(|(_, (_, event))| *event)
}

/// The bar, clipped to whatever part has slid into view
pub struct ActionBar;

impl Widget for ActionBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);
        Block::default()
            .style(Style::default().bg(Color::Black))
            .render(area, buf);

        for (column, (label, _)) in button_columns(area).iter().zip(BUTTONS.iter()) {
            let lines = vec![
                Line::from(""),
                Line::from(Span::styled(*label, Style::default().fg(Color::White).bold())),
                Line::from(""),
            ];
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .style(Style::default().bg(Color::Black))
                .render(*column, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_rows_at_end_values() {
        assert_eq!(visible_rows(-80.0), 0);
        assert_eq!(visible_rows(0.0), BAR_ROWS);
        assert_eq!(visible_rows(-40.0), 2);
        // Spring overshoot stays within the bar
        assert_eq!(visible_rows(6.0), BAR_ROWS);
        assert_eq!(visible_rows(-95.0), 0);
    }

    #[test]
    fn test_bar_area_hugs_bottom() {
        let page = Rect::new(0, 0, 60, 20);
        assert_eq!(bar_area(page, -80.0), None);
        assert_eq!(bar_area(page, 0.0), Some(Rect::new(0, 17, 60, 3)));
    }

    #[test]
    fn test_button_hit_testing() {
        let bar = Rect::new(0, 17, 60, 3);
        assert_eq!(button_at(bar, Position::new(5, 18)), Some(UiEvent::Refresh));
        assert_eq!(button_at(bar, Position::new(30, 18)), Some(UiEvent::Share));
        assert_eq!(button_at(bar, Position::new(59, 19)), Some(UiEvent::Save));
        assert_eq!(button_at(bar, Position::new(30, 5)), None);
    }
}
