//! UI drawing - loading screen, carousel page, action bar, status line and
//! notices, all derived from one [`RenderState`]

pub mod action_bar;
pub mod carousel;

use ratatui::{prelude::*, widgets::*};

use crate::app::focus::FocusState;
use crate::app::state::LoadState;
use crate::messages::{RenderState, UiEvent};
use crate::models::NoticeKind;

use action_bar::{bar_area, button_at, ActionBar};
use carousel::{spinner_glyph, PageView};

/// Split the terminal into the page area and the status line
pub fn screen_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Page
            Constraint::Length(1), // Status bar
        ])
        .split(area);
    (chunks[0], chunks[1])
}

pub fn draw(f: &mut Frame, state: &RenderState) {
    let area = f.area();
    let (page_area, status_area) = screen_layout(area);

    match state.load {
        LoadState::Loading => draw_loading(f, state, page_area),
        LoadState::Failed => draw_failed(f, state, page_area),
        LoadState::Ready => draw_carousel(f, state, page_area),
    }

    draw_status_bar(f, state, status_area);

    if let Some(notice) = &state.notice {
        let popup_area = centered_rect(60, 20, area);
        let color = match notice.kind {
            NoticeKind::Info => Color::Green,
            NoticeKind::Warning => Color::Yellow,
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .title(format!(" Notice {} ", notice.shown_at.format("%H:%M")))
            .style(Style::default().bg(Color::Black));
        let text = vec![
            Line::from(notice.message.as_str()),
            Line::from(""),
            Line::from(Span::styled("Press any key...", Style::default().fg(Color::DarkGray))),
        ];
        let popup = Paragraph::new(text).block(block).wrap(Wrap { trim: false });

        f.render_widget(Clear, popup_area);
        f.render_widget(popup, popup_area);
    }
}

fn draw_loading(f: &mut Frame, state: &RenderState, area: Rect) {
    f.render_widget(Block::default().style(Style::default().bg(Color::Black)), area);
    let text = vec![
        Line::from(Span::styled(spinner_glyph(state.spinner_frame), Style::default().fg(Color::Gray))),
        Line::from(Span::styled("Loading wallpapers...", Style::default().fg(Color::DarkGray))),
    ];
    f.render_widget(
        Paragraph::new(text).alignment(Alignment::Center),
        vertical_middle(area, 2),
    );
}

fn draw_failed(f: &mut Frame, state: &RenderState, area: Rect) {
    f.render_widget(Block::default().style(Style::default().bg(Color::Black)), area);
    let error = state.last_error.as_deref().unwrap_or("unknown error");
    let text = vec![
        Line::from(Span::styled("Could not load wallpapers", Style::default().fg(Color::Red).bold())),
        Line::from(Span::styled(error, Style::default().fg(Color::DarkGray))),
        Line::from(""),
        Line::from("Press 'r' to retry or 'q' to quit"),
    ];
    f.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        vertical_middle(area, 4),
    );
}

fn draw_carousel(f: &mut Frame, state: &RenderState, area: Rect) {
    if state.image.is_none() {
        f.render_widget(Block::default().style(Style::default().bg(Color::Black)), area);
        f.render_widget(
            Paragraph::new("No wallpapers in this batch")
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::DarkGray)),
            vertical_middle(area, 1),
        );
        return;
    }

    f.render_widget(
        PageView {
            preview: &state.preview,
            transform: state.transform,
            spinner_frame: state.spinner_frame,
        },
        area,
    );

    if let Some(bar) = bar_area(area, state.transform.bar_offset) {
        f.render_widget(ActionBar, bar);
    }
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let mut spans = Vec::new();
    if let Some(image) = &state.image {
        spans.push(Span::styled(
            format!(" {}/{} ", state.page + 1, state.page_count),
            Style::default().fg(Color::Black).bg(Color::Cyan).bold(),
        ));
        let accent = image
            .color_rgb()
            .map(|(r, g, b)| Color::Rgb(r, g, b))
            .unwrap_or(Color::Gray);
        spans.push(Span::styled(" ■ ", Style::default().fg(accent)));
        spans.push(Span::raw(image.caption()));
    }
    if state.is_loading && state.load == LoadState::Ready {
        spans.push(Span::styled(" [...]", Style::default().fg(Color::Yellow)));
    }

    let hints = match (state.load, state.focus) {
        (LoadState::Ready, FocusState::Normal) => " Space:focus | ←/→:page | q:quit ",
        (LoadState::Ready, FocusState::Focused) => " r:refresh | s:share | d:save | Esc:back ",
        (LoadState::Failed, _) => " r:retry | q:quit ",
        (LoadState::Loading, _) => " q:quit ",
    };

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(hints.chars().count() as u16)])
        .split(area);

    f.render_widget(Paragraph::new(Line::from(spans)), chunks[0]);
    f.render_widget(
        Paragraph::new(hints).style(Style::default().fg(Color::DarkGray)),
        chunks[1],
    );
}

/// Map a left click at (column, row) of a terminal of size `area` to an event
pub fn hit_test(area: Rect, state: &RenderState, column: u16, row: u16) -> Option<UiEvent> {
    if state.notice.is_some() {
        return Some(UiEvent::DismissNotice);
    }
    if state.load != LoadState::Ready || state.image.is_none() {
        return None;
    }

    let (page_area, _) = screen_layout(area);
    let position = Position::new(column, row);
    if state.focus == FocusState::Focused {
        if let Some(bar) = bar_area(page_area, state.transform.bar_offset) {
            if let Some(event) = button_at(bar, position) {
                return Some(event);
            }
        }
    }
    page_area.contains(position).then_some(UiEvent::Tap)
}

fn vertical_middle(area: Rect, height: u16) -> Rect {
    let height = height.min(area.height);
    Rect {
        y: area.y + (area.height - height) / 2,
        height,
        ..area
    }
}

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::focus::FocusTransform;
    use crate::models::fixtures::record;
    use crate::models::Notice;
    use ratatui::backend::TestBackend;

    fn screen_text(state: &RenderState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|f| draw(f, state)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn ready(image: bool) -> RenderState {
        RenderState {
            load: LoadState::Ready,
            page_count: usize::from(image),
            image: image.then(|| record("a")),
            can_page: true,
            ..RenderState::default()
        }
    }

    #[test]
    fn test_loading_screen() {
        let text = screen_text(&RenderState::default());
        assert!(text.contains("Loading wallpapers..."));
    }

    #[test]
    fn test_zero_pages_render_without_crash() {
        let text = screen_text(&ready(false));
        assert!(text.contains("No wallpapers in this batch"));
    }

    #[test]
    fn test_failed_screen_offers_retry() {
        let state = RenderState {
            load: LoadState::Failed,
            last_error: Some("server responded with status 401".into()),
            ..RenderState::default()
        };
        let text = screen_text(&state);
        assert!(text.contains("Could not load wallpapers"));
        assert!(text.contains("retry"));
    }

    #[test]
    fn test_bar_hidden_when_normal_and_shown_when_focused() {
        let normal = ready(true);
        assert!(!screen_text(&normal).contains("Refresh"));

        let focused = RenderState {
            focus: FocusState::Focused,
            transform: FocusTransform::at(1.0),
            can_page: false,
            ..ready(true)
        };
        let text = screen_text(&focused);
        assert!(text.contains("Refresh"));
        assert!(text.contains("Save"));
    }

    #[test]
    fn test_notice_popup() {
        let state = RenderState {
            notice: Some(Notice::warning("Permission to save wallpapers was denied")),
            ..ready(true)
        };
        assert!(screen_text(&state).contains("Permission to save"));
    }

    #[test]
    fn test_hit_test() {
        let area = Rect::new(0, 0, 60, 21);
        let normal = ready(true);
        assert_eq!(hit_test(area, &normal, 30, 10), Some(UiEvent::Tap));
        // Status line is not part of the page
        assert_eq!(hit_test(area, &normal, 30, 20), None);

        let focused = RenderState {
            focus: FocusState::Focused,
            transform: FocusTransform::at(1.0),
            ..ready(true)
        };
        assert_eq!(hit_test(area, &focused, 2, 18), Some(UiEvent::Refresh));
        assert_eq!(hit_test(area, &focused, 30, 10), Some(UiEvent::Tap));

        assert_eq!(hit_test(area, &ready(false), 30, 10), None);
    }
}
