//! The rolling 24-hour window and the quarter-hour slot addressing shared by
//! the grid, the session state and the store.

mod slot_key;
mod slot_values;
mod window;

pub use slot_key::{DateKey, SlotKey, QUARTERS_PER_HOUR, SLOTS_PER_DAY};
pub use slot_values::{DayRow, SlotEdit, SlotValues};
pub use window::{Slot, TimeWindow, SLOTS_PER_WINDOW};
