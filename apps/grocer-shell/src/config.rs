//! # Shell Configuration
//!
//! Where the shell gets its dataset, starting location and display settings.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     GROCER_DATASET=./town.toml                                         │
//! │     GROCER_USER_X=400  GROCER_USER_Y=320                               │
//! │     GROCER_CURRENCY_SYMBOL=€                                           │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     $GROCER_CONFIG, or                                                 │
//! │     ~/.config/grocer/shell.toml (Linux)                                │
//! │     ~/Library/Application Support/com.grocer.grocer/shell.toml (macOS) │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     built-in dataset, user at (520, 290), "$"                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # shell.toml
//! [dataset]
//! path = "/home/me/groceries/town.toml"   # omit for the built-in dataset
//!
//! [user]
//! x = 520
//! y = 290
//!
//! [display]
//! currency_symbol = "$"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use grocer_core::dataset::DEFAULT_USER_LOCATION;
use grocer_core::{Dataset, DatasetConfig, Location, Money};

use crate::error::{ShellError, ShellResult};

/// Longest accepted currency symbol, in characters.
const MAX_CURRENCY_SYMBOL_LEN: usize = 3;

// =============================================================================
// Sections
// =============================================================================

/// Which dataset to load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetSettings {
    /// TOML dataset file. `None` means the built-in dataset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Where the user starts on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSettings {
    #[serde(default = "default_user_x")]
    pub x: i64,
    #[serde(default = "default_user_y")]
    pub y: i64,
}

fn default_user_x() -> i64 {
    DEFAULT_USER_LOCATION.x
}

fn default_user_y() -> i64 {
    DEFAULT_USER_LOCATION.y
}

impl Default for UserSettings {
    fn default() -> Self {
        UserSettings {
            x: default_user_x(),
            y: default_user_y(),
        }
    }
}

impl UserSettings {
    pub fn location(&self) -> Location {
        Location::new(self.x, self.y)
    }
}

/// How amounts are printed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySettings {
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings {
            currency_symbol: default_currency_symbol(),
        }
    }
}

// =============================================================================
// Shell Config
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShellConfig {
    #[serde(default)]
    pub dataset: DatasetSettings,
    #[serde(default)]
    pub user: UserSettings,
    #[serde(default)]
    pub display: DisplaySettings,
}

impl ShellConfig {
    /// Loads configuration: defaults, then file, then environment.
    ///
    /// `config_path` wins over `GROCER_CONFIG`, which wins over the
    /// platform config directory. A missing file is not an error.
    pub fn load(config_path: Option<PathBuf>) -> ShellResult<Self> {
        let mut config = Self::default();

        let path = config_path
            .or_else(|| std::env::var_os("GROCER_CONFIG").map(PathBuf::from))
            .or_else(Self::default_config_path);
        if let Some(path) = path {
            if path.exists() {
                info!(?path, "Loading shell config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ShellResult<()> {
        let symbol = self.display.currency_symbol.trim();
        if symbol.is_empty() {
            return Err(ShellError::InvalidConfig(
                "currency_symbol must not be empty".into(),
            ));
        }
        if symbol.chars().count() > MAX_CURRENCY_SYMBOL_LEN {
            return Err(ShellError::InvalidConfig(format!(
                "currency_symbol must be at most {} characters, got: {}",
                MAX_CURRENCY_SYMBOL_LEN, symbol
            )));
        }

        if let Some(ref path) = self.dataset.path {
            if path.as_os_str().is_empty() {
                return Err(ShellError::InvalidConfig(
                    "dataset path must not be empty".into(),
                ));
            }
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies `GROCER_*` overrides read through `lookup`.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup("GROCER_DATASET") {
            debug!(path = %path, "Overriding dataset path from environment");
            self.dataset.path = Some(PathBuf::from(path));
        }

        if let Some(x) = lookup("GROCER_USER_X") {
            match x.trim().parse::<i64>() {
                Ok(x) => self.user.x = x,
                Err(_) => warn!(value = %x, "Ignoring non-numeric GROCER_USER_X"),
            }
        }

        if let Some(y) = lookup("GROCER_USER_Y") {
            match y.trim().parse::<i64>() {
                Ok(y) => self.user.y = y,
                Err(_) => warn!(value = %y, "Ignoring non-numeric GROCER_USER_Y"),
            }
        }

        if let Some(symbol) = lookup("GROCER_CURRENCY_SYMBOL") {
            self.display.currency_symbol = symbol;
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "grocer", "grocer")
            .map(|dirs| dirs.config_dir().join("shell.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Loads the configured dataset, or the built-in one.
    pub fn load_dataset(&self) -> ShellResult<Dataset> {
        match self.dataset.path {
            Some(ref path) => load_dataset_file(path),
            None => {
                debug!("Using built-in dataset");
                Ok(Dataset::builtin())
            }
        }
    }

    pub fn user_location(&self) -> Location {
        self.user.location()
    }

    /// Formats an amount with the configured currency symbol.
    pub fn format_money(&self, amount: Money) -> String {
        let sign = if amount.is_negative() { "-" } else { "" };
        format!(
            "{}{}{}.{:02}",
            sign,
            self.display.currency_symbol.trim(),
            amount.dollars().abs(),
            amount.cents_part()
        )
    }
}

/// Reads and validates a TOML dataset file.
pub fn load_dataset_file(path: &Path) -> ShellResult<Dataset> {
    info!(?path, "Loading dataset from file");
    let contents = std::fs::read_to_string(path)?;
    let config: DatasetConfig = toml::from_str(&contents)?;
    Ok(Dataset::from_config(&config)?)
}
