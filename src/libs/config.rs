//! Configuration management for tareo.
//!
//! Settings live in a JSON file inside the platform data directory resolved
//! by [`DataStorage`]. A missing file is not an error: every section is
//! optional and falls back to its defaults.
//!
//! ## Sections
//!
//! - **Matrix**: standard workday length (the overtime threshold), pivot
//!   cache size and switch, overnight shift handling, roster strictness
//! - **Permissions**: extra or replacement labels for permission codes
//!
//! ## File format
//!
//! ```json
//! {
//!   "matrix": {
//!     "standard_workday_hours": 8.0,
//!     "cache_capacity": 10000,
//!     "cache_enabled": true,
//!     "allow_overnight": false,
//!     "strict_roster": false
//!   },
//!   "permissions": { "labels": { "CAP": "Capacitación" } }
//! }
//! ```
//!
//! Keys missing from a section take their default. Values that parse but
//! make no sense as a workday are replaced on read, see
//! [`MatrixConfig::validated`].
//!
//! ```rust,no_run
//! use tareo::libs::config::Config;
//!
//! let config = Config::read()?;
//! let matrix = config.matrix.unwrap_or_default();
//! println!("Overtime after {} hours", matrix.standard_workday_hours);
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use crate::libs::{aggregator::STANDARD_WORKDAY_HOURS, cache::DEFAULT_CACHE_CAPACITY, messages::Message};
use crate::{msg_print, msg_warning};
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, MultiSelect};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{self, File};

pub const CONFIG_FILE_NAME: &str = "config.json";

/// A section offered by the setup wizard.
///
/// `key` is the JSON section name, `name` is what the wizard lists.
#[derive(Debug, Clone)]
pub struct ConfigModule {
    pub key: String,
    pub name: String,
}

/// Rules for classifying and totalling the matrix.
///
/// Every field has a default, so a partial `"matrix"` object in the file is
/// accepted. Build a [`MatrixBuilder`](crate::libs::matrix::MatrixBuilder)
/// from it with `MatrixBuilder::from_matrix_config`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct MatrixConfig {
    /// Hours of a standard workday; anything above is overtime.
    ///
    /// Also used to derive an expected check-out from an expected check-in
    /// in the markings detail. Must lie strictly between 0 and 24.
    pub standard_workday_hours: f64,

    /// Maximum number of memoized cell display strings.
    ///
    /// Two strings are stored per employee and date. Zero keeps the cache
    /// switched on but storing nothing.
    pub cache_capacity: usize,

    /// Whether builders get a pivot cache at all.
    pub cache_enabled: bool,

    /// Treat a check-out earlier than the check-in as next-day.
    ///
    /// Off by default: such pairs are rejected and the day is absent.
    pub allow_overnight: bool,

    /// Reject payloads whose facts mention employees missing from the roster
    /// instead of ignoring those facts.
    pub strict_roster: bool,
}

impl Default for MatrixConfig {
    fn default() -> Self {
        MatrixConfig {
            standard_workday_hours: STANDARD_WORKDAY_HOURS,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            cache_enabled: true,
            allow_overnight: false,
            strict_roster: false,
        }
    }
}

impl MatrixConfig {
    /// Whether `hours` can be used as a standard workday.
    pub fn is_valid_workday(hours: f64) -> bool {
        hours.is_finite() && hours > 0.0 && hours < 24.0
    }

    /// This configuration with an unusable workday replaced by the default.
    ///
    /// Warns when a replacement happens. Other fields are kept as they are.
    pub fn validated(mut self) -> Self {
        if !Self::is_valid_workday(self.standard_workday_hours) {
            msg_warning!(Message::InvalidConfigWorkday(
                self.standard_workday_hours,
                STANDARD_WORKDAY_HOURS
            ));
            tracing::warn!(
                configured = self.standard_workday_hours,
                "standard workday out of range, using default"
            );
            self.standard_workday_hours = STANDARD_WORKDAY_HOURS;
        }
        self
    }
}

/// Permission labels layered over the built-in code table.
///
/// Keys are permission codes, matched the same way as the built-in ones
/// (trimmed, case-insensitive). A key already in the built-in table replaces
/// its label.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct PermissionConfig {
    pub labels: BTreeMap<String, String>,
}

/// The whole settings file. Absent sections are not written back.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matrix: Option<MatrixConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<PermissionConfig>,
}

impl Config {
    /// Loads the configuration file, or defaults when there is none.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    /// A matrix section that parses but holds an unusable workday is not an
    /// error; it is repaired by [`MatrixConfig::validated`].
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        if !config_file_path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(config_file_path)?;
        let mut config: Config = serde_json::from_str(&config_str)?;
        config.matrix = config.matrix.map(MatrixConfig::validated);
        Ok(config)
    }

    /// Writes the configuration as pretty JSON, replacing any existing file.
    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        let config_file = File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Effective matrix rules.
    pub fn matrix_or_default(&self) -> MatrixConfig {
        self.matrix.clone().unwrap_or_default()
    }

    /// Runs the interactive setup wizard, starting from the saved values.
    ///
    /// Only the sections picked in the first prompt are asked about; the
    /// rest keep what was read. The result is not saved here.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();

        let modules = vec![
            ConfigModule {
                key: "matrix".to_string(),
                name: "Matrix".to_string(),
            },
            ConfigModule {
                key: "permissions".to_string(),
                name: "Permissions".to_string(),
            },
        ];

        let selected = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptSelectModules.to_string())
            .items(&modules.iter().map(|module| &module.name).collect::<Vec<_>>())
            .interact()?;

        for &selection in &selected {
            match modules[selection].key.as_str() {
                "matrix" => {
                    let default = config.matrix_or_default();
                    msg_print!(Message::ConfigModuleMatrix);
                    config.matrix = Some(MatrixConfig {
                        standard_workday_hours: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptStandardWorkday.to_string())
                            .default(default.standard_workday_hours)
                            .validate_with(|hours: &f64| -> Result<(), String> {
                                if MatrixConfig::is_valid_workday(*hours) {
                                    Ok(())
                                } else {
                                    Err(Message::InvalidStandardWorkday.to_string())
                                }
                            })
                            .interact_text()?,
                        cache_capacity: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptCacheCapacity.to_string())
                            .default(default.cache_capacity)
                            .interact_text()?,
                        cache_enabled: Confirm::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptCacheEnabled.to_string())
                            .default(default.cache_enabled)
                            .interact()?,
                        allow_overnight: Confirm::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptAllowOvernight.to_string())
                            .default(default.allow_overnight)
                            .interact()?,
                        strict_roster: Confirm::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptStrictRoster.to_string())
                            .default(default.strict_roster)
                            .interact()?,
                    });
                }
                "permissions" => {
                    let mut permissions = config.permissions.clone().unwrap_or_default();
                    msg_print!(Message::ConfigModulePermissions);
                    loop {
                        let code: String = Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptPermissionCode.to_string())
                            .allow_empty(true)
                            .interact_text()?;
                        if code.trim().is_empty() {
                            break;
                        }
                        let label: String = Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptPermissionLabel(code.trim().to_string()).to_string())
                            .interact_text()?;
                        permissions.labels.insert(code.trim().to_uppercase(), label);
                    }
                    config.permissions = Some(permissions);
                }
                _ => {}
            }
        }

        Ok(config)
    }
}
