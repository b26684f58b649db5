use chrono::{Datelike, NaiveDate};
use std::fmt::{self, Display};
use std::str::FromStr;
use thiserror::Error;

/// Separates year, month and day in a [`DateKey`]. Stored rows use the same spelling.
pub const DATE_SEPARATOR: char = '.';
/// Separates date, hour and quarter in a [`SlotKey`].
pub const KEY_SEPARATOR: char = '-';

pub const HOURS_PER_DAY: u8 = 24;
pub const QUARTERS_PER_HOUR: u8 = 4;
pub const SLOTS_PER_DAY: usize = HOURS_PER_DAY as usize * QUARTERS_PER_HOUR as usize;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SlotKeyError {
    #[error("malformed date key: {0:?}")]
    MalformedDate(String),
    #[error("date key {given:?} is not canonical, expected {canonical:?}")]
    NonCanonicalDate { given: String, canonical: String },
    #[error("malformed slot key: {0:?}")]
    MalformedKey(String),
    #[error("hour {0} is out of range")]
    HourOutOfRange(u8),
    #[error("quarter {0} is out of range")]
    QuarterOutOfRange(u8),
    #[error("column {0} is out of range")]
    ColumnOutOfRange(usize),
}

/// A calendar day spelled `YEAR.MONTH.DAY` without zero padding, e.g. `2024.3.5`.
///
/// This is the value stored in column A of the day rows, so formatting and
/// parsing only accept that one spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey(NaiveDate);

impl DateKey {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl From<NaiveDate> for DateKey {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{sep}{}{sep}{}",
            self.0.year(),
            self.0.month(),
            self.0.day(),
            sep = DATE_SEPARATOR
        )
    }
}

impl FromStr for DateKey {
    type Err = SlotKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || SlotKeyError::MalformedDate(s.to_string());

        let mut parts = s.split(DATE_SEPARATOR);
        let (Some(year), Some(month), Some(day), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(malformed());
        };

        let year = year.parse::<i32>().map_err(|_| malformed())?;
        let month = month.parse::<u32>().map_err(|_| malformed())?;
        let day = day.parse::<u32>().map_err(|_| malformed())?;
        let key = NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(malformed)?;

        let canonical = key.to_string();
        if canonical != s {
            return Err(SlotKeyError::NonCanonicalDate {
                given: s.to_string(),
                canonical,
            });
        }

        Ok(key)
    }
}

/// Address of one quarter-hour cell: `{date}-{hour}-{quarter}`, e.g. `2024.3.15-9-2`.
///
/// `hour` is the local hour of the slot's own day, not an offset into the window.
/// Ordering is chronological within the local calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotKey {
    date: DateKey,
    hour: u8,
    quarter: u8,
}

impl SlotKey {
    pub fn new(date: DateKey, hour: u8, quarter: u8) -> Result<Self, SlotKeyError> {
        if hour >= HOURS_PER_DAY {
            return Err(SlotKeyError::HourOutOfRange(hour));
        }
        if quarter >= QUARTERS_PER_HOUR {
            return Err(SlotKeyError::QuarterOutOfRange(quarter));
        }
        Ok(Self {
            date,
            hour,
            quarter,
        })
    }

    /// The slot stored in payload column `index` (0..96, hour-major) of `date`'s row.
    pub fn from_column(date: DateKey, index: usize) -> Result<Self, SlotKeyError> {
        if index >= SLOTS_PER_DAY {
            return Err(SlotKeyError::ColumnOutOfRange(index));
        }
        let per_hour = QUARTERS_PER_HOUR as usize;
        Self::new(date, (index / per_hour) as u8, (index % per_hour) as u8)
    }

    pub fn date(&self) -> DateKey {
        self.date
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn quarter(&self) -> u8 {
        self.quarter
    }

    /// Position of this slot among the 96 payload columns of a day row.
    pub fn column_index(&self) -> usize {
        self.hour as usize * QUARTERS_PER_HOUR as usize + self.quarter as usize
    }

    pub fn encode(&self) -> String {
        self.to_string()
    }

    #[cfg(test)]
    pub fn decode(key: &str) -> Result<Self, SlotKeyError> {
        key.parse()
    }
}

impl Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{sep}{}{sep}{}",
            self.date,
            self.hour,
            self.quarter,
            sep = KEY_SEPARATOR
        )
    }
}

impl FromStr for SlotKey {
    type Err = SlotKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || SlotKeyError::MalformedKey(s.to_string());

        // Split from the right so the date part is taken whole.
        let mut parts = s.rsplitn(3, KEY_SEPARATOR);
        let (Some(quarter), Some(hour), Some(date)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(malformed());
        };

        let date = date.parse::<DateKey>()?;
        let hour = hour.parse::<u8>().map_err(|_| malformed())?;
        let quarter = quarter.parse::<u8>().map_err(|_| malformed())?;
        let key = Self::new(date, hour, quarter)?;

        // Rejects padded or signed numbers such as "09" or "+1".
        if key.to_string() != s {
            return Err(malformed());
        }

        Ok(key)
    }
}
