use anyhow::{Context, Result};
use chrono::{Local, TimeDelta};
use sheets::{ServiceAccountKey, SheetsClient};
use std::path::Path;

use crate::config::TimegridConfig;
use crate::grid::DateKey;
use crate::session_store::CredentialStore;
use crate::store::{MemoryStore, SheetsStore};

/// Build the spreadsheet store from the stored key and config, checking the
/// credentials before the UI starts.
pub async fn connect_sheets(
    cfg: &TimegridConfig,
    credentials: &CredentialStore,
) -> Result<SheetsStore> {
    let key = credentials.load_key()?.context(
        "No service account key stored. Run `timegrid setup --key <file.json> --spreadsheet-id <id>` first.",
    )?;
    let spreadsheet_id = cfg.spreadsheet_id()?;

    let client = SheetsClient::new(key, spreadsheet_id);
    client
        .authenticate()
        .await
        .context("Error authenticating")?;
    tracing::info!("connected to spreadsheet {}", spreadsheet_id);

    Ok(SheetsStore::new(client, cfg.layout()))
}

/// Validate the key, prove it can obtain a token, then persist key and spreadsheet ID.
pub async fn setup(
    key_file: &Path,
    spreadsheet_id: &str,
    mut cfg: TimegridConfig,
    credentials: &CredentialStore,
) -> Result<()> {
    let key = ServiceAccountKey::from_file(key_file)?;
    let client_email = key.client_email.clone();

    SheetsClient::new(key.clone(), spreadsheet_id)
        .authenticate()
        .await
        .context("Error authenticating")?;

    credentials.save_key(&key)?;
    cfg.spreadsheet_id = Some(spreadsheet_id.to_string());
    cfg.save()?;

    tracing::info!("stored key for {}", client_email);
    println!("Authenticated as {}.", client_email);
    println!("Share the spreadsheet with this address if you have not already.");
    Ok(())
}

/// Forget the stored key and spreadsheet ID.
pub fn reset(mut cfg: TimegridConfig, credentials: &CredentialStore) -> Result<()> {
    credentials.clear()?;
    cfg.spreadsheet_id = None;
    cfg.save()?;
    println!("Removed stored key and spreadsheet ID.");
    Ok(())
}

/// In-memory store with rows for yesterday, today and tomorrow, so the dev
/// window can be saved and reloaded across midnight.
pub fn dev_store() -> MemoryStore {
    let today = Local::now().date_naive();
    let dates: Vec<DateKey> = [-1, 0, 1]
        .into_iter()
        .map(|offset| DateKey::new(today + TimeDelta::days(offset)))
        .collect();
    MemoryStore::demo(&dates)
}
