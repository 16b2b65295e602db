//! Global roomcal configuration.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::date::parse_date;
use crate::error::{RoomcalError, RoomcalResult};

static DEFAULT_INVENTORY_PATH: &str = "~/.roomcal/inventory.toml";
static DEFAULT_MIN_DATE: &str = "today";

fn default_inventory_path() -> PathBuf {
    PathBuf::from(DEFAULT_INVENTORY_PATH)
}

fn is_default_inventory_path(p: &PathBuf) -> bool {
    *p == default_inventory_path()
}

fn default_min_date() -> String {
    DEFAULT_MIN_DATE.to_string()
}

fn is_default_min_date(s: &String) -> bool {
    s == DEFAULT_MIN_DATE
}

/// Minimum selectable date policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MinDate {
    Today,
    Unbounded,
    Fixed(NaiveDate),
}

impl MinDate {
    /// Accepts "today", "none" or a `YYYY-MM-DD` date.
    pub fn parse(s: &str) -> RoomcalResult<Self> {
        match s.trim() {
            "today" => Ok(MinDate::Today),
            "none" | "" => Ok(MinDate::Unbounded),
            date => parse_date(date).map(MinDate::Fixed),
        }
    }

    pub fn resolve(self, today: NaiveDate) -> Option<NaiveDate> {
        match self {
            MinDate::Today => Some(today),
            MinDate::Unbounded => None,
            MinDate::Fixed(date) => Some(date),
        }
    }
}

/// Global configuration at ~/.config/roomcal/config.toml
///
/// Every key can be overridden with a `ROOMCAL_` environment variable,
/// e.g. `ROOMCAL_ROOM_TYPE=double`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct RoomcalConfig {
    #[serde(default = "default_inventory_path", skip_serializing_if = "is_default_inventory_path")]
    pub inventory: PathBuf,

    #[serde(default = "default_min_date", skip_serializing_if = "is_default_min_date")]
    pub min_date: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_type: Option<String>,
}

impl Default for RoomcalConfig {
    fn default() -> Self {
        RoomcalConfig {
            inventory: default_inventory_path(),
            min_date: default_min_date(),
            room_type: None,
        }
    }
}

impl RoomcalConfig {
    pub fn config_path() -> RoomcalResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| RoomcalError::Config("Could not determine config directory".into()))?
            .join("roomcal");

        Ok(config_dir.join("config.toml"))
    }

    /// Load ~/.config/roomcal/config.toml, creating a commented default
    /// file on first use.
    pub fn load() -> RoomcalResult<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> RoomcalResult<Self> {
        if !path.exists() {
            Self::create_default_config(path)?;
        }

        let config: RoomcalConfig = Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("ROOMCAL"))
            .build()
            .map_err(|e| RoomcalError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| RoomcalError::Config(e.to_string()))?;

        // Surface a bad min_date at load time rather than on first use.
        MinDate::parse(&config.min_date)?;

        Ok(config)
    }

    /// Inventory path with `~` expanded.
    pub fn inventory_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.inventory.to_string_lossy()).into_owned())
    }

    pub fn min_date(&self) -> RoomcalResult<MinDate> {
        MinDate::parse(&self.min_date)
    }

    pub fn save_to(&self, path: &Path) -> RoomcalResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| RoomcalError::Config(e.to_string()))?;

        std::fs::write(path, content)
            .map_err(|e| RoomcalError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> RoomcalResult<()> {
        let contents = format!(
            "\
# roomcal configuration

# Rooms and reservations (TOML or JSON):
# inventory = \"{DEFAULT_INVENTORY_PATH}\"

# Earliest selectable check-in: \"today\", \"none\" or a YYYY-MM-DD date
# min_date = \"{DEFAULT_MIN_DATE}\"

# Only count rooms of this type when computing availability:
# room_type = \"double\"
"
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                RoomcalError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| RoomcalError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_load_writes_commented_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roomcal").join("config.toml");

        let config = RoomcalConfig::load_from(&path).unwrap();

        assert!(path.exists());
        assert_eq!(config.inventory, default_inventory_path());
        assert_eq!(config.min_date().unwrap(), MinDate::Today);
        assert_eq!(config.room_type, None);
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let config = RoomcalConfig {
            inventory: PathBuf::from("/srv/hotel/inventory.json"),
            min_date: "2024-06-01".into(),
            room_type: Some("double".into()),
        };

        config.save_to(&path).unwrap();
        let loaded = RoomcalConfig::load_from(&path).unwrap();

        assert_eq!(loaded.inventory, PathBuf::from("/srv/hotel/inventory.json"));
        assert_eq!(loaded.inventory_path(), PathBuf::from("/srv/hotel/inventory.json"));
        assert_eq!(loaded.room_type.as_deref(), Some("double"));
        assert_eq!(
            loaded.min_date().unwrap().resolve(NaiveDate::MIN),
            NaiveDate::from_ymd_opt(2024, 6, 1)
        );
    }

    #[test]
    fn bad_min_date_fails_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "min_date = \"soon\"\n").unwrap();

        assert!(RoomcalConfig::load_from(&path).is_err());
    }

    #[test]
    fn min_date_policies() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        assert_eq!(MinDate::parse("today").unwrap().resolve(today), Some(today));
        assert_eq!(MinDate::parse("none").unwrap().resolve(today), None);
        assert_eq!(
            MinDate::parse("2024-01-02").unwrap(),
            MinDate::Fixed(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap())
        );
        assert!(MinDate::parse("yesterday").is_err());
    }
}
