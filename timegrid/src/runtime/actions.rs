use chrono::{DateTime, TimeZone};
use futures::future::try_join_all;

use crate::app::{App, StatusKind};
use crate::store::{StoreError, TimesheetStore};

use super::action_queue::Action;

pub(super) async fn run_action<Tz: TimeZone>(
    action: Action,
    app: &mut App<Tz>,
    store: &dyn TimesheetStore,
    now: &DateTime<Tz>,
) {
    app.is_loading = true;
    match action {
        Action::LoadCategories => load_categories(app, store).await,
        Action::LoadWindow => load_window(app, store, now).await,
        Action::SaveWindow => save_window(app, store).await,
    }
    app.is_loading = false;
}

pub(super) async fn load_categories<Tz: TimeZone>(app: &mut App<Tz>, store: &dyn TimesheetStore) {
    match store.load_categories().await {
        Ok(activities) if activities.is_empty() => {
            app.set_status(
                "No activities found. Check your Categories sheet.",
                StatusKind::Error,
            );
        }
        Ok(activities) => {
            tracing::info!("loaded {} activities", activities.len());
            app.set_activities(activities);
            app.set_status("Activities loaded successfully!", StatusKind::Success);
        }
        Err(e) => {
            tracing::error!("failed to load activities: {}", e);
            app.set_status(format!("Error loading activities: {}", e), StatusKind::Error);
        }
    }
}

/// Move the window to `now` and rebuild the slot map from every date it spans.
///
/// All dates are requested at once; nothing is applied until every request
/// has finished. On failure the session keeps its previous window and slot
/// map, so a later save only writes dates that were actually loaded.
pub(super) async fn load_window<Tz: TimeZone>(
    app: &mut App<Tz>,
    store: &dyn TimesheetStore,
    now: &DateTime<Tz>,
) {
    let window = app.next_window(now);
    let dates = window.dates().to_vec();
    tracing::debug!(
        "loading window {:?} to {:?} over {} dates",
        window.start(),
        window.end(),
        dates.len()
    );
    let rows = try_join_all(dates.iter().map(|date| store.load_row(date))).await;

    match rows {
        Ok(rows) => {
            app.apply_window(window, dates.into_iter().zip(rows).collect());
            app.set_status("Data loaded!", StatusKind::Success);
        }
        Err(e) => {
            tracing::error!("failed to load window: {}", e);
            app.set_status(format!("Error loading data: {}", e), StatusKind::Error);
        }
    }
}

/// Write every window date back, oldest first. Stops at the first failure;
/// dates already written stay written.
pub(super) async fn save_window<Tz: TimeZone>(app: &mut App<Tz>, store: &dyn TimesheetStore) {
    match save_rows(app, store).await {
        Ok(saved) => {
            tracing::info!("saved {} days", saved);
            app.dirty = false;
            app.set_status(
                format!("Saved successfully to {}!", store.label()),
                StatusKind::Success,
            );
        }
        Err(e) => {
            tracing::error!("save aborted: {}", e);
            app.set_status(format!("Error saving: {}", e), StatusKind::Error);
        }
    }
}

async fn save_rows<Tz: TimeZone>(
    app: &App<Tz>,
    store: &dyn TimesheetStore,
) -> Result<usize, StoreError> {
    let rows = app.day_rows();
    for (date, row) in &rows {
        tracing::debug!("saving {} with {} filled slots", date, row.filled());
        store.save_row(date, row).await?;
    }
    Ok(rows.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::Activity;
    use crate::grid::{DateKey, DayRow, SlotKey};
    use crate::store::MemoryStore;
    use async_trait::async_trait;
    use chrono::{FixedOffset, NaiveDate};
    use std::sync::atomic::{AtomicBool, Ordering};

    fn now() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2024, 3, 15, 14, 37, 0)
            .unwrap()
    }

    fn date(d: u32) -> DateKey {
        DateKey::new(NaiveDate::from_ymd_opt(2024, 3, d).unwrap())
    }

    fn key(s: &str) -> SlotKey {
        SlotKey::decode(s).unwrap()
    }

    fn row_with(index: usize, code: &str) -> DayRow {
        let mut cells = vec![String::new(); 96];
        cells[index] = code.to_string();
        DayRow::from_cells(&cells)
    }

    #[tokio::test]
    async fn load_window_merges_every_date() {
        let store = MemoryStore::new(Vec::new())
            .with_row(date(14), row_with(95, "S"))
            .with_row(date(15), row_with(38, "W1"));
        let mut app = App::new(&now(), store.label());
        app.slot_values.set(key("2024.3.1-0-0"), "stale");

        run_action(Action::LoadWindow, &mut app, &store, &now()).await;

        assert_eq!(app.slot_values.len(), 2);
        assert_eq!(app.slot_values.get(&key("2024.3.14-23-3")), Some("S"));
        assert_eq!(app.slot_values.get(&key("2024.3.15-9-2")), Some("W1"));
        assert_eq!(app.status.as_ref().unwrap().text, "Data loaded!");
        assert!(!app.is_loading);
    }

    #[tokio::test]
    async fn missing_rows_load_as_empty() {
        let store = MemoryStore::new(Vec::new()).with_row(date(15), row_with(0, "W"));
        let mut app = App::new(&now(), store.label());

        load_window(&mut app, &store, &now()).await;

        assert_eq!(app.slot_values.len(), 1);
        assert_eq!(app.status.as_ref().unwrap().kind, StatusKind::Success);
    }

    #[tokio::test]
    async fn save_writes_each_window_date() {
        let store = MemoryStore::demo(&[date(14), date(15)]);
        let mut app = App::new(&now(), store.label());
        load_categories(&mut app, &store).await;
        app.press_code("S");
        app.click_slot(key("2024.3.14-23-3")).unwrap();
        app.click_slot(key("2024.3.15-0-0")).unwrap();

        save_window(&mut app, &store).await;

        assert!(!app.dirty);
        assert_eq!(store.row(&date(14)).unwrap().get(95), Some("S"));
        assert_eq!(store.row(&date(15)).unwrap().get(0), Some("S"));
        assert_eq!(
            app.status.as_ref().unwrap().text,
            "Saved successfully to Dev!"
        );
    }

    #[tokio::test]
    async fn save_stops_at_first_missing_date() {
        // Only the later date has a row, so the first write fails and the
        // second is never attempted.
        let store = MemoryStore::new(Vec::new()).with_row(date(15), DayRow::default());
        let mut app = App::new(&now(), store.label());
        app.set_activities(vec![Activity::new("", "W", "Work")]);
        app.press_code("W");
        app.click_slot(key("2024.3.14-20-0")).unwrap();
        app.click_slot(key("2024.3.15-9-2")).unwrap();

        save_window(&mut app, &store).await;

        assert_eq!(store.row(&date(15)), Some(DayRow::default()));
        assert!(app.dirty);
        let status = app.status.as_ref().unwrap();
        assert_eq!(status.kind, StatusKind::Error);
        assert_eq!(status.text, "Error saving: Date 2024.3.14 not found in sheet");
    }

    #[tokio::test]
    async fn later_failure_keeps_earlier_writes() {
        let store = MemoryStore::new(Vec::new()).with_row(date(14), DayRow::default());
        let mut app = App::new(&now(), store.label());
        app.set_activities(vec![Activity::new("", "W", "Work")]);
        app.press_code("W");
        app.click_slot(key("2024.3.14-20-0")).unwrap();

        save_window(&mut app, &store).await;

        assert_eq!(store.row(&date(14)).unwrap().get(80), Some("W"));
        assert_eq!(store.row(&date(15)), None);
        assert_eq!(app.status.as_ref().unwrap().kind, StatusKind::Error);
    }

    /// Delegates to a [`MemoryStore`] but can be told to fail every load.
    struct FlakyStore {
        inner: MemoryStore,
        fail_loads: AtomicBool,
    }

    impl FlakyStore {
        fn new(inner: MemoryStore) -> Self {
            Self {
                inner,
                fail_loads: AtomicBool::new(false),
            }
        }

        fn set_failing(&self, failing: bool) {
            self.fail_loads.store(failing, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl TimesheetStore for FlakyStore {
        fn label(&self) -> &str {
            self.inner.label()
        }

        async fn load_categories(&self) -> Result<Vec<Activity>, StoreError> {
            self.inner.load_categories().await
        }

        async fn load_row(&self, date: &DateKey) -> Result<Option<DayRow>, StoreError> {
            if self.fail_loads.load(Ordering::SeqCst) {
                return Err(StoreError::NetworkFailure("timeout".to_string()));
            }
            self.inner.load_row(date).await
        }

        async fn save_row(&self, date: &DateKey, row: &DayRow) -> Result<(), StoreError> {
            self.inner.save_row(date, row).await
        }
    }

    fn later() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2024, 3, 16, 1, 0, 0)
            .unwrap()
    }

    fn window_dates<Tz: TimeZone>(app: &App<Tz>) -> Vec<String> {
        app.window.dates().iter().map(ToString::to_string).collect()
    }

    #[tokio::test]
    async fn failed_reload_keeps_window_and_slots() {
        let inner = MemoryStore::demo(&[date(14), date(15)])
            .with_row(date(15), row_with(38, "W1"));
        let store = FlakyStore::new(inner);
        let mut app = App::new(&now(), store.label());
        load_window(&mut app, &store, &now()).await;
        let end_before = app.window.end().clone();

        store.set_failing(true);
        run_action(Action::LoadWindow, &mut app, &store, &later()).await;

        let status = app.status.as_ref().unwrap();
        assert_eq!(status.kind, StatusKind::Error);
        assert_eq!(status.text, "Error loading data: timeout");
        assert_eq!(*app.window.end(), end_before);
        assert_eq!(window_dates(&app), vec!["2024.3.14", "2024.3.15"]);
        assert_eq!(app.slot_values.get(&key("2024.3.15-9-2")), Some("W1"));
        assert!(!app.is_loading);
    }

    #[tokio::test]
    async fn save_after_failed_reload_leaves_unloaded_dates_alone() {
        let inner = MemoryStore::demo(&[date(14), date(15)]).with_row(date(16), row_with(0, "X"));
        let store = FlakyStore::new(inner);
        let mut app = App::new(&now(), store.label());
        load_categories(&mut app, &store).await;
        load_window(&mut app, &store, &now()).await;

        store.set_failing(true);
        load_window(&mut app, &store, &later()).await;
        store.set_failing(false);

        app.press_code("S");
        app.click_slot(key("2024.3.15-9-2")).unwrap();
        save_window(&mut app, &store).await;

        assert_eq!(store.inner.row(&date(16)).unwrap().get(0), Some("X"));
        assert_eq!(store.inner.row(&date(15)).unwrap().get(38), Some("S"));
        assert!(!app.dirty);
    }

    #[tokio::test]
    async fn successful_reload_moves_the_window() {
        let inner = MemoryStore::demo(&[date(15)]).with_row(date(16), row_with(0, "X"));
        let store = FlakyStore::new(inner);
        let mut app = App::new(&now(), store.label());

        load_window(&mut app, &store, &later()).await;

        assert_eq!(window_dates(&app), vec!["2024.3.15", "2024.3.16"]);
        assert_eq!(app.slot_values.get(&key("2024.3.16-0-0")), Some("X"));
    }

    #[tokio::test]
    async fn empty_category_list_is_reported() {
        let store = MemoryStore::new(Vec::new());
        let mut app = App::new(&now(), store.label());

        run_action(Action::LoadCategories, &mut app, &store, &now()).await;

        assert!(app.activities.is_empty());
        assert_eq!(
            app.status.as_ref().unwrap().text,
            "No activities found. Check your Categories sheet."
        );
    }
}
