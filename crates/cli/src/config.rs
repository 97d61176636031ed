//! `railnota.toml` configuration.
//!
//! Everything has a sensible default relative to the working directory;
//! the stations and person name are the parts worth setting.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::CliError;

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Directory for the per-month ledger unit files.
    pub data_dir: PathBuf,
    /// Directory of saved confirmation emails (.html) to process.
    pub inbox_dir: PathBuf,
    /// Processed-order state file.
    pub state_file: PathBuf,
    /// Name written into new ledger units.
    pub person: String,
    /// Home station, for classifying single tickets as commute legs.
    pub home_station: String,
    /// Office station, the other end of the commute.
    pub office_station: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_dir: PathBuf::from("data"),
            inbox_dir: PathBuf::from("inbox"),
            state_file: PathBuf::from("processed.json"),
            person: String::new(),
            home_station: String::new(),
            office_station: String::new(),
        }
    }
}

impl Config {
    pub fn from_toml(text: &str) -> Result<Config, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn load(path: &Path) -> Result<Config, CliError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(CliError::args(format!("config file {} not found", path.display()))
                    .with_hint("copy railnota.example.toml to railnota.toml and adjust it"));
            }
            Err(e) => {
                return Err(CliError::io(format!("cannot read {}: {}", path.display(), e)));
            }
        };
        Config::from_toml(&text)
            .map_err(|e| CliError::args(format!("invalid config {}: {}", path.display(), e)))
    }

    /// True when both commute stations are configured, enabling the
    /// route check on incoming tickets.
    pub fn has_commute(&self) -> bool {
        !self.home_station.is_empty() && !self.office_station.is_empty()
    }
}
