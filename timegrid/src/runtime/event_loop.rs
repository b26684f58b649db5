use crate::app::{App, StatusKind};
use crate::store::TimesheetStore;
use crate::ui;
use anyhow::Result;
use chrono::Local;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::{Duration, Instant};

use super::action_queue::{channel, Action};
use super::actions::run_action;
use super::views::handle_key;

pub async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    store: &dyn TimesheetStore,
) -> Result<()> {
    let (action_tx, mut action_rx) = channel();
    let _ = action_tx.send(Action::LoadCategories);
    let _ = action_tx.send(Action::LoadWindow);

    loop {
        app.expire_status(Instant::now());
        terminal.draw(|f| ui::render(f, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_key(key, app, &action_tx);
                }
            }
        }

        while let Ok(action) = action_rx.try_recv() {
            // Show progress before blocking on the store.
            app.is_loading = true;
            app.throbber_state.calc_next();
            app.set_status(action.progress_message(store.label()), StatusKind::Info);
            terminal.draw(|f| ui::render(f, app))?;

            run_action(action, app, store, &Local::now()).await;
        }

        if !app.running {
            break;
        }
    }

    Ok(())
}
