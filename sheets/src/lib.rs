mod auth;
mod client;
pub mod domain;
mod sheets_url;

pub use auth::*;
pub use client::*;
pub use domain::{column_name, A1Range, UpdateValuesResponse, ValueRange};
pub use sheets_url::SheetsURL;
