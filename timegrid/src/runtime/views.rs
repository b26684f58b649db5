use crate::app::{App, Focus, Input};
use chrono::TimeZone;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::action_queue::ActionTx;

mod activities;
mod grid;

/// Run an input through the session and queue whatever store work it asks for.
fn dispatch<Tz: TimeZone>(input: Input, app: &mut App<Tz>, action_tx: &ActionTx) {
    for action in app.handle(input) {
        let _ = action_tx.send(action);
    }
}

pub(super) fn handle_key<Tz: TimeZone>(key: KeyEvent, app: &mut App<Tz>, action_tx: &ActionTx) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => app.quit(),
        KeyCode::Char('c') if ctrl => app.quit(),
        KeyCode::Char('s') if ctrl => dispatch(Input::Save, app, action_tx),
        KeyCode::Char('r') | KeyCode::Char('R') => dispatch(Input::Refresh, app, action_tx),
        KeyCode::Tab | KeyCode::BackTab => app.toggle_focus(),
        _ => match app.focus {
            Focus::Grid => grid::handle_grid_key(key, app, action_tx),
            Focus::Activities => activities::handle_activities_key(key, app, action_tx),
        },
    }
}
