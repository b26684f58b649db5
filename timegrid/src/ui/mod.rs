use crate::app::{App, StatusKind};
use chrono::TimeZone;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use std::fmt::Display;

mod activity_panel;
mod grid_view;

const ACTIVITY_PANEL_WIDTH: u16 = 30;

pub fn render<Tz: TimeZone>(frame: &mut Frame, app: &mut App<Tz>)
where
    Tz::Offset: Display,
{
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_header(frame, root[0], app);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(ACTIVITY_PANEL_WIDTH), Constraint::Min(0)])
        .split(root[1]);
    activity_panel::render_activity_panel(frame, body[0], app);
    grid_view::render_grid(frame, body[1], app);

    render_status(frame, root[2], app);
    render_hints(frame, root[3]);
}

fn render_header<Tz: TimeZone>(frame: &mut Frame, area: Rect, app: &mut App<Tz>)
where
    Tz::Offset: Display,
{
    const LABEL: &str = " timegrid";
    let title_width = 1 + 1 + LABEL.len() as u16;

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(title_width), Constraint::Min(0)])
        .split(area);

    // Throbber spins while a store call is in flight.
    let throbber_area = Rect {
        x: cols[0].x + 1,
        y: cols[0].y,
        width: 1,
        height: 1,
    };
    let label_area = Rect {
        x: throbber_area.x + 1,
        y: cols[0].y,
        width: cols[0].width.saturating_sub(2),
        height: 1,
    };
    let throbber = throbber_widgets_tui::Throbber::default()
        .style(Style::default().fg(Color::Yellow))
        .throbber_style(Style::default().fg(Color::Yellow))
        .throbber_set(throbber_widgets_tui::BRAILLE_SIX)
        .use_type(if app.is_loading {
            throbber_widgets_tui::WhichUse::Spin
        } else {
            throbber_widgets_tui::WhichUse::Full
        });
    frame.render_stateful_widget(throbber, throbber_area, &mut app.throbber_state);
    frame.render_widget(
        Paragraph::new(Span::styled(LABEL, Style::default().fg(Color::Yellow))),
        label_area,
    );

    let muted = Style::default().fg(Color::DarkGray);
    let mut spans = vec![
        Span::styled(" | ", muted),
        Span::styled(
            app.window.display_range(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" | ", muted),
        Span::styled(app.backend_label.clone(), Style::default().fg(Color::Cyan)),
    ];
    if let Some(activity) = &app.selected_activity {
        spans.push(Span::styled(" | ", muted));
        spans.push(Span::styled(
            format!("{} ({})", activity.name, activity.code),
            Style::default().fg(Color::Green),
        ));
    }
    if app.dirty {
        spans.push(Span::styled(" | ", muted));
        spans.push(Span::styled("unsaved", Style::default().fg(Color::Magenta)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), cols[1]);
}

fn render_status<Tz: TimeZone>(frame: &mut Frame, area: Rect, app: &App<Tz>) {
    let Some(status) = &app.status else {
        return;
    };
    let color = match status.kind {
        StatusKind::Info => Color::Cyan,
        StatusKind::Success => Color::Green,
        StatusKind::Error => Color::Red,
    };
    frame.render_widget(
        Paragraph::new(Span::styled(
            format!(" {}", status.text),
            Style::default().fg(color),
        )),
        area,
    );
}

fn render_hints(frame: &mut Frame, area: Rect) {
    let key = Style::default().fg(Color::Yellow);
    let hints = Line::from(vec![
        Span::styled(" ←↓↑→/hjkl", key),
        Span::raw(": Move  "),
        Span::styled("Enter", key),
        Span::raw(": Select/Fill  "),
        Span::styled("Tab", key),
        Span::raw(": Switch panel  "),
        Span::styled("r", key),
        Span::raw(": Reload  "),
        Span::styled("Ctrl+S", key),
        Span::raw(": Save  "),
        Span::styled("q", key),
        Span::raw(": Quit"),
    ]);
    frame.render_widget(
        Paragraph::new(hints).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::Activity;
    use crate::grid::SlotKey;
    use chrono::FixedOffset;
    use ratatui::{backend::TestBackend, Terminal};

    fn screen(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn renders_window_activities_and_filled_slots() {
        let now = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2024, 3, 15, 14, 37, 0)
            .unwrap();
        let mut app = App::new(&now, "Dev");
        app.set_activities(vec![
            Activity::new("", "W", "Work"),
            Activity::new("W", "W1", "Meetings"),
            Activity::new("", "S", "Sleep"),
        ]);
        app.press_code("S");
        app.click_slot(SlotKey::decode("2024.3.15-0-0").unwrap())
            .unwrap();

        let mut terminal = Terminal::new(TestBackend::new(160, 20)).unwrap();
        terminal.draw(|f| render(f, &mut app)).unwrap();
        let text = screen(&terminal);

        assert!(text.contains("Mar 14, 03:00 PM - Mar 15, 03:00 PM"));
        assert!(text.contains("Work"));
        assert!(text.contains("Sleep"));
        assert!(text.contains("2024.3.14"));
        assert!(text.contains("2024.3.15"));
        assert!(text.contains(":45"));
        assert!(text.contains("unsaved"));
    }
}
