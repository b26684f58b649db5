use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "timegrid")]
#[command(about = "Classify the last 24 hours in quarter-hour slots, backed by Google Sheets")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run against the configured spreadsheet (default)
    Run,
    /// Run with local in-memory data
    Dev,
    /// Store a service-account key and the spreadsheet to use
    Setup {
        /// Service-account key file (.json)
        #[arg(long)]
        key: PathBuf,
        /// ID of the spreadsheet, as found in its URL
        #[arg(long)]
        spreadsheet_id: String,
    },
    /// Remove the stored key and spreadsheet ID
    Reset,
    /// Print config path and create default file if missing
    ConfigPath,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_run() {
        let cli = Cli::try_parse_from(["timegrid"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn setup_takes_key_and_spreadsheet() {
        let cli = Cli::try_parse_from([
            "timegrid",
            "setup",
            "--key",
            "key.json",
            "--spreadsheet-id",
            "abc",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Setup {
                key,
                spreadsheet_id,
            }) => {
                assert_eq!(key, PathBuf::from("key.json"));
                assert_eq!(spreadsheet_id, "abc");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn setup_requires_spreadsheet_id() {
        assert!(Cli::try_parse_from(["timegrid", "setup", "--key", "key.json"]).is_err());
    }
}
