use chrono::{DateTime, TimeDelta, TimeZone, Timelike};
use std::fmt::Display;

use super::slot_key::{DateKey, SlotKey, QUARTERS_PER_HOUR};

pub const WINDOW_HOURS: i64 = 24;
pub const SLOTS_PER_WINDOW: usize = WINDOW_HOURS as usize * QUARTERS_PER_HOUR as usize;

const DISPLAY_FORMAT: &str = "%b %-d, %I:%M %p";

/// One quarter-hour cell of the window, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    pub key: SlotKey,
    /// First quarter of a local midnight hour, or the very first slot of the window.
    pub is_new_day: bool,
}

impl Slot {
    pub fn date(&self) -> DateKey {
        self.key.date()
    }

    pub fn hour(&self) -> u8 {
        self.key.hour()
    }

    pub fn quarter(&self) -> u8 {
        self.key.quarter()
    }
}

/// The rolling 24 hours ending at the next full local hour.
#[derive(Debug, Clone)]
pub struct TimeWindow<Tz: TimeZone> {
    start: DateTime<Tz>,
    end: DateTime<Tz>,
    dates: Vec<DateKey>,
}

impl<Tz: TimeZone> TimeWindow<Tz> {
    /// Window whose end is the first full hour strictly after `now`.
    ///
    /// 14:30 ends at 15:00, and 15:00:00 exactly ends at 16:00.
    pub fn ending_after(now: &DateTime<Tz>) -> Self {
        let end = next_full_hour(now);
        let start = end.clone() - TimeDelta::hours(WINDOW_HOURS);
        let dates = hourly_dates(&start, &end);
        Self { start, end, dates }
    }

    /// Recompute the window from `now`, replacing boundaries and dates.
    pub fn update(&mut self, now: &DateTime<Tz>) {
        *self = Self::ending_after(now);
    }

    pub fn start(&self) -> &DateTime<Tz> {
        &self.start
    }

    pub fn end(&self) -> &DateTime<Tz> {
        &self.end
    }

    /// Every calendar day touched by `[start, end)`, in first-seen order.
    pub fn dates(&self) -> &[DateKey] {
        &self.dates
    }

    /// The 96 slots of the window, hour-major and quarter-minor.
    ///
    /// Every fourth slot starts a new hour column of the grid.
    pub fn slots(&self) -> Vec<Slot> {
        let mut slots = Vec::with_capacity(SLOTS_PER_WINDOW);

        for step in 0..WINDOW_HOURS {
            let at = self.start.clone() + TimeDelta::hours(step);
            let date = DateKey::from(at.date_naive());
            let hour = at.hour() as u8;

            for quarter in 0..QUARTERS_PER_HOUR {
                // hour() < 24 and quarter < 4 by construction.
                let Ok(key) = SlotKey::new(date, hour, quarter) else {
                    continue;
                };
                slots.push(Slot {
                    key,
                    is_new_day: quarter == 0 && (hour == 0 || step == 0),
                });
            }
        }

        slots
    }
}

impl<Tz: TimeZone> TimeWindow<Tz>
where
    Tz::Offset: Display,
{
    /// e.g. `Mar 14, 03:00 PM - Mar 15, 03:00 PM`
    pub fn display_range(&self) -> String {
        format!(
            "{} - {}",
            self.start.format(DISPLAY_FORMAT),
            self.end.format(DISPLAY_FORMAT)
        )
    }
}

fn next_full_hour<Tz: TimeZone>(now: &DateTime<Tz>) -> DateTime<Tz> {
    let into_hour = TimeDelta::seconds(i64::from(now.minute() * 60 + now.second()))
        + TimeDelta::nanoseconds(i64::from(now.nanosecond()));
    now.clone() - into_hour + TimeDelta::hours(1)
}

fn hourly_dates<Tz: TimeZone>(start: &DateTime<Tz>, end: &DateTime<Tz>) -> Vec<DateKey> {
    let mut dates: Vec<DateKey> = Vec::new();
    let mut at = start.clone();
    while at < *end {
        let date = DateKey::from(at.date_naive());
        if !dates.contains(&date) {
            dates.push(date);
        }
        at = at + TimeDelta::hours(1);
    }
    dates
}
