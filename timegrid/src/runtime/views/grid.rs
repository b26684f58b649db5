use crate::app::{App, Input};
use chrono::TimeZone;
use crossterm::event::{KeyCode, KeyEvent};

use super::super::action_queue::ActionTx;
use super::dispatch;

pub(super) fn handle_grid_key<Tz: TimeZone>(key: KeyEvent, app: &mut App<Tz>, action_tx: &ActionTx) {
    match key.code {
        KeyCode::Left | KeyCode::Char('h') => app.grid_left(),
        KeyCode::Right | KeyCode::Char('l') => app.grid_right(),
        KeyCode::Up | KeyCode::Char('k') => app.grid_up(),
        KeyCode::Down | KeyCode::Char('j') => app.grid_down(),
        KeyCode::Enter | KeyCode::Char(' ') => {
            if let Some(slot) = app.cursor_slot() {
                dispatch(Input::SlotClick(slot.key), app, action_tx);
            }
        }
        _ => {}
    }
}
