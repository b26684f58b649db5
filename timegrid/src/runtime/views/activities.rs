use crate::app::{App, Input};
use chrono::TimeZone;
use crossterm::event::{KeyCode, KeyEvent};

use super::super::action_queue::ActionTx;
use super::dispatch;

pub(super) fn handle_activities_key<Tz: TimeZone>(
    key: KeyEvent,
    app: &mut App<Tz>,
    action_tx: &ActionTx,
) {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.activity_up(),
        KeyCode::Down | KeyCode::Char('j') => app.activity_down(),
        KeyCode::Enter | KeyCode::Char(' ') => {
            if let Some(row) = app.cursor_activity_row() {
                dispatch(Input::SelectActivity(row), app, action_tx);
            }
        }
        _ => {}
    }
}
