use crate::app::{App, Focus};
use chrono::TimeZone;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Padding},
    Frame,
};

pub fn render_activity_panel<Tz: TimeZone>(frame: &mut Frame, area: Rect, app: &App<Tz>) {
    let focused = app.focus == Focus::Activities;
    let selected_code = app.selected_activity.as_ref().map(|a| a.code.as_str());

    let items: Vec<ListItem> = app
        .activities
        .visible_rows()
        .into_iter()
        .filter_map(|row| {
            let activity = app.activities.activity_at(row)?;
            let node = app.activities.node(row.root)?;

            let prefix = match row.child {
                Some(_) => "    ",
                None if !node.has_children() => "  ",
                None if node.expanded => "▾ ",
                None => "▸ ",
            };
            let is_selected = selected_code == Some(activity.code.as_str());
            let name_style = if is_selected {
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD)
            } else if row.child.is_some() {
                Style::default().fg(Color::Gray)
            } else {
                Style::default().fg(Color::White)
            };

            let mut spans = vec![
                Span::styled(prefix, Style::default().fg(Color::DarkGray)),
                Span::styled(activity.name.clone(), name_style),
                Span::styled(
                    format!(" {}", activity.code),
                    Style::default().fg(Color::DarkGray),
                ),
            ];
            if is_selected {
                spans.push(Span::styled(" ●", Style::default().fg(Color::Green)));
            }
            Some(ListItem::new(Line::from(spans)))
        })
        .collect();

    let border = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title(Span::styled(" Activities ", border))
                .padding(Padding::horizontal(1)),
        )
        .highlight_style(if focused {
            Style::default().fg(Color::Black).bg(Color::White)
        } else {
            Style::default()
        });

    let mut state = ListState::default();
    if !app.activities.is_empty() {
        state.select(Some(app.activity_cursor));
    }
    frame.render_stateful_widget(list, area, &mut state);
}
