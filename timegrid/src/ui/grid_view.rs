use crate::app::{App, Focus};
use crate::grid::{Slot, QUARTERS_PER_HOUR};
use chrono::TimeZone;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
    Frame,
};

const CELL_WIDTH: usize = 4;
const LABEL_WIDTH: usize = 4;
const QUARTER_LABELS: [&str; 4] = [":00", ":15", ":30", ":45"];

const PALETTE: [Color; 8] = [
    Color::Blue,
    Color::Green,
    Color::Magenta,
    Color::Cyan,
    Color::Yellow,
    Color::Red,
    Color::LightBlue,
    Color::LightMagenta,
];

/// Stable color per activity code.
fn code_color(code: &str) -> Color {
    let sum: usize = code.bytes().map(usize::from).sum();
    PALETTE[sum % PALETTE.len()]
}

fn fit(text: &str, width: usize) -> String {
    let clipped: String = text.chars().take(width).collect();
    format!("{:<width$}", clipped, width = width)
}

pub fn render_grid<Tz: TimeZone>(frame: &mut Frame, area: Rect, app: &App<Tz>) {
    let focused = app.focus == Focus::Grid;
    let slots = app.window.slots();
    let hours: Vec<&[Slot]> = slots.chunks(QUARTERS_PER_HOUR as usize).collect();

    let mut lines = vec![date_line(&hours), hour_line(&hours)];
    for (quarter, label) in QUARTER_LABELS.iter().enumerate() {
        let mut spans = vec![Span::styled(
            fit(label, LABEL_WIDTH),
            Style::default().fg(Color::DarkGray),
        )];
        for (column, hour) in hours.iter().enumerate() {
            let Some(slot) = hour.get(quarter) else {
                continue;
            };
            let index = column * QUARTERS_PER_HOUR as usize + quarter;
            spans.push(slot_span(app, slot, focused && index == app.grid_cursor));
        }
        lines.push(Line::from(spans));
    }

    lines.push(Line::from(""));
    lines.push(cursor_line(app));

    let border = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let grid = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(Span::styled(" Last 24 hours ", border))
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(grid, area);
}

/// Date labels above the first hour of each day, clipped at the next day.
fn date_line(hours: &[&[Slot]]) -> Line<'static> {
    let starts: Vec<usize> = hours
        .iter()
        .enumerate()
        .filter(|(_, hour)| hour.first().is_some_and(|slot| slot.is_new_day))
        .map(|(column, _)| column)
        .collect();

    let mut spans = vec![Span::raw(" ".repeat(LABEL_WIDTH))];
    for (i, &column) in starts.iter().enumerate() {
        let next = starts.get(i + 1).copied().unwrap_or(hours.len());
        let date = hours[column]
            .first()
            .map(|slot| slot.date().to_string())
            .unwrap_or_default();
        spans.push(Span::styled(
            fit(&date, (next - column) * CELL_WIDTH),
            Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        ));
    }
    Line::from(spans)
}

fn hour_line(hours: &[&[Slot]]) -> Line<'static> {
    let mut spans = vec![Span::raw(" ".repeat(LABEL_WIDTH))];
    for hour in hours {
        let Some(first) = hour.first() else {
            continue;
        };
        let style = if first.is_new_day {
            Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(
            fit(&format!("{:02}", first.hour()), CELL_WIDTH),
            style,
        ));
    }
    Line::from(spans)
}

fn slot_span<Tz: TimeZone>(app: &App<Tz>, slot: &Slot, is_cursor: bool) -> Span<'static> {
    let code = app.slot_values.get(&slot.key);
    let text = fit(code.unwrap_or("·"), CELL_WIDTH - 1);

    let mut style = match code {
        Some(code) => Style::default().fg(Color::Black).bg(code_color(code)),
        None => Style::default().fg(Color::DarkGray),
    };
    if is_cursor {
        style = style.add_modifier(Modifier::REVERSED | Modifier::BOLD);
    }

    Span::styled(format!("{} ", text), style)
}

/// What is under the cursor, spelled out.
fn cursor_line<Tz: TimeZone>(app: &App<Tz>) -> Line<'static> {
    let Some(slot) = app.cursor_slot() else {
        return Line::from("");
    };
    let muted = Style::default().fg(Color::DarkGray);
    let mut spans = vec![Span::styled(
        format!(
            "{} {:02}:{:02}",
            slot.date(),
            slot.hour(),
            u32::from(slot.quarter()) * 15
        ),
        Style::default().fg(Color::White),
    )];

    match app.slot_values.get(&slot.key) {
        Some(code) => {
            let name = app.activity_name(code).unwrap_or(code).to_string();
            spans.push(Span::styled(" | ", muted));
            spans.push(Span::styled(name, Style::default().fg(code_color(code))));
        }
        None => {
            spans.push(Span::styled(" | ", muted));
            spans.push(Span::styled("empty", muted));
        }
    }
    spans.push(Span::styled(" | ", muted));
    spans.push(Span::styled(slot.key.encode(), muted));
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_pads_and_clips() {
        assert_eq!(fit("W", 3), "W  ");
        assert_eq!(fit("LONGCODE", 3), "LON");
        assert_eq!(fit("2024.3.14", 4), "2024");
    }

    #[test]
    fn code_colors_are_stable() {
        assert_eq!(code_color("W1"), code_color("W1"));
    }
}
