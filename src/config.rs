//! Configuration module for `prehealth-tracker`

use crate::core::models::Track;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

/// Default CLI configuration loaded based on build profile.
/// Uses release defaults in release mode, debug defaults in debug mode.
#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigDebug.toml");

#[cfg(not(debug_assertions))]
const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(debug_assertions)]
const CONFIG_FILE_NAME: &str = "dconfig.toml";

/// Variable expanded to the application directory inside config values
const DIR_VARIABLE: &str = "$PREHEALTH";

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug)
    #[serde(default)]
    pub level: String,
    /// Log file path
    #[serde(default)]
    pub file: String,
    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,
}

/// Student profile configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileConfig {
    /// Program track name (Pre-Med, Pre-PA, Pre-Dental, Other)
    #[serde(default)]
    pub track: String,
}

/// Paths configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory holding the record snapshots and goals
    #[serde(default)]
    pub data_dir: String,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    pub logging: LoggingConfig,
    /// Profile settings
    #[serde(default)]
    pub profile: ProfileConfig,
    /// Path settings
    #[serde(default)]
    pub paths: PathsConfig,
}

/// Optional CLI overrides for configuration values
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override logging level
    pub level: Option<String>,
    /// Override log file path
    pub file: Option<String>,
    /// Override verbose flag
    pub verbose: Option<bool>,
    /// Override program track
    pub track: Option<String>,
    /// Override data directory
    pub data_dir: Option<String>,
}

impl Config {
    /// Get the `$PREHEALTH` directory path
    ///
    /// Returns:
    /// - Linux: `~/.config/prehealth`
    /// - macOS: `~/Library/Application Support/prehealth`
    /// - Windows: `%APPDATA%\prehealth`
    #[must_use]
    pub fn get_prehealth_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("prehealth")
    }

    /// Merge missing fields from defaults into this config
    ///
    /// Only fields that are empty here and non-empty in `defaults` are filled,
    /// so settings added in a newer release show up in older config files.
    ///
    /// # Returns
    ///
    /// `true` if any fields were added/changed, `false` otherwise
    #[allow(clippy::useless_let_if_seq)]
    pub fn merge_defaults(&mut self, defaults: &Self) -> bool {
        let mut changed = false;

        if self.logging.level.is_empty() && !defaults.logging.level.is_empty() {
            self.logging.level.clone_from(&defaults.logging.level);
            changed = true;
        }
        if self.logging.file.is_empty() && !defaults.logging.file.is_empty() {
            self.logging.file.clone_from(&defaults.logging.file);
            changed = true;
        }
        if self.profile.track.is_empty() && !defaults.profile.track.is_empty() {
            self.profile.track.clone_from(&defaults.profile.track);
            changed = true;
        }
        if self.paths.data_dir.is_empty() && !defaults.paths.data_dir.is_empty() {
            self.paths.data_dir.clone_from(&defaults.paths.data_dir);
            changed = true;
        }

        changed
    }

    /// Apply CLI-provided overrides onto the loaded configuration
    ///
    /// Overrides last for the current run only; the config file is untouched.
    /// Only non-`None` values replace config values.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let mut config = Config::load();
    /// let overrides = ConfigOverrides {
    ///     track: Some("Pre-PA".to_string()),
    ///     ..Default::default()
    /// };
    /// config.apply_overrides(&overrides);
    /// ```
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(level) = &overrides.level {
            self.logging.level.clone_from(level);
        }
        if let Some(file) = &overrides.file {
            self.logging.file.clone_from(file);
        }
        if let Some(verbose) = overrides.verbose {
            self.logging.verbose = verbose;
        }
        if let Some(track) = &overrides.track {
            self.profile.track.clone_from(track);
        }
        if let Some(data_dir) = &overrides.data_dir {
            self.paths.data_dir = Self::expand_variables(data_dir);
        }
    }

    /// Get the user config file path
    ///
    /// `config.toml` for release builds, `dconfig.toml` for debug builds,
    /// inside [`get_prehealth_dir`](Self::get_prehealth_dir).
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_prehealth_dir().join(CONFIG_FILE_NAME)
    }

    /// Expand `$PREHEALTH` in a string to the application directory
    #[must_use]
    fn expand_variables(value: &str) -> String {
        if value.contains(DIR_VARIABLE) {
            let dir = Self::get_prehealth_dir();
            value.replace(DIR_VARIABLE, dir.to_str().unwrap_or("."))
        } else {
            value.to_string()
        }
    }

    /// Initialize config from a TOML string
    ///
    /// Expands `$PREHEALTH` in path values. Missing fields take their serde
    /// defaults (empty strings or false).
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML cannot be parsed or doesn't match the expected schema
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(toml_str)?;

        config.logging.file = Self::expand_variables(&config.logging.file);
        config.paths.data_dir = Self::expand_variables(&config.paths.data_dir);

        Ok(config)
    }

    /// Load configuration from embedded defaults
    ///
    /// Debug builds use `DefaultCLIConfigDebug.toml`, release builds
    /// `DefaultCLIConfigRelease.toml`.
    ///
    /// # Panics
    /// Panics if the embedded default configuration is invalid TOML.
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).expect("Failed to parse compiled-in default configuration")
    }

    /// Load configuration from file, or create from defaults if not found
    ///
    /// An existing file is merged with the defaults and re-saved when new
    /// fields were added. On first run the defaults are written out. Any read
    /// or parse failure falls back to the defaults.
    #[must_use]
    pub fn load() -> Self {
        let config_file = Self::get_config_file_path();
        let defaults = Self::from_defaults();

        if !config_file.exists() {
            if let Some(parent) = config_file.parent() {
                let _ = fs::create_dir_all(parent);
            }
            let _ = defaults.save();
            return defaults;
        }

        match fs::read_to_string(&config_file).map(|content| Self::from_toml(&content)) {
            Ok(Ok(mut config)) => {
                if config.merge_defaults(&defaults) {
                    let _ = config.save();
                }
                config
            }
            Ok(Err(e)) => {
                crate::warn!("Ignoring malformed config {}: {e}", config_file.display());
                defaults
            }
            Err(e) => {
                crate::warn!("Could not read config {}: {e}", config_file.display());
                defaults
            }
        }
    }

    /// Save configuration to file
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be created, the config
    /// cannot be serialized, or the file cannot be written
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let config_file = Self::get_config_file_path();
        if let Some(parent) = config_file.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(&config_file, toml_str)?;
        Ok(())
    }

    /// The configured program track, falling back to `Other` when unset or unknown
    #[must_use]
    pub fn track(&self) -> Track {
        self.profile.track.parse().unwrap_or_else(|e| {
            if !self.profile.track.is_empty() {
                crate::warn!("{e}; using {}", Track::Other);
            }
            Track::Other
        })
    }

    /// The configured data directory
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        PathBuf::from(&self.paths.data_dir)
    }

    /// Get a configuration value by key
    ///
    /// Supported keys: `level`, `file`, `verbose`, `track`, `data_dir`
    /// (also `data-dir`). Returns `None` for unknown keys.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "level" => Some(self.logging.level.clone()),
            "file" => Some(self.logging.file.clone()),
            "verbose" => Some(self.logging.verbose.to_string()),
            "track" => Some(self.profile.track.clone()),
            "data_dir" | "data-dir" => Some(self.paths.data_dir.clone()),
            _ => None,
        }
    }

    /// Set a configuration value by key
    ///
    /// `verbose` must be `true` or `false`; `track` must name a known track and
    /// is stored in its canonical spelling. Call [`save()`](Config::save) to persist.
    ///
    /// # Errors
    /// Returns an error if the key is not recognized or the value cannot be parsed
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match key {
            "level" => self.logging.level = value.to_string(),
            "file" => self.logging.file = value.to_string(),
            "verbose" => {
                self.logging.verbose = value
                    .parse::<bool>()
                    .map_err(|_| format!("Invalid boolean value for 'verbose': '{value}'"))?;
            }
            "track" => {
                let track: Track = value.parse()?;
                self.profile.track = track.name().to_string();
            }
            "data_dir" | "data-dir" => self.paths.data_dir = value.to_string(),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Unset a configuration value by key (reset to its value in `defaults`)
    ///
    /// # Errors
    /// Returns an error if the key is not recognized.
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        match key {
            "level" => self.logging.level.clone_from(&defaults.logging.level),
            "file" => self.logging.file.clone_from(&defaults.logging.file),
            "verbose" => self.logging.verbose = defaults.logging.verbose,
            "track" => self.profile.track.clone_from(&defaults.profile.track),
            "data_dir" | "data-dir" => self.paths.data_dir.clone_from(&defaults.paths.data_dir),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Reset all configuration to defaults by deleting the config file
    ///
    /// Succeeds without doing anything if the file doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the config file exists but cannot be deleted
    pub fn reset() -> Result<(), std::io::Error> {
        let config_file = Self::get_config_file_path();
        if config_file.exists() {
            fs::remove_file(config_file)?;
        }
        Ok(())
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[logging]")?;
        writeln!(f, "  level = \"{}\"", self.logging.level)?;
        writeln!(f, "  file = \"{}\"", self.logging.file)?;
        writeln!(f, "  verbose = {}", self.logging.verbose)?;

        writeln!(f, "\n[profile]")?;
        writeln!(f, "  track = \"{}\"", self.profile.track)?;

        writeln!(f, "\n[paths]")?;
        writeln!(f, "  data_dir = \"{}\"", self.paths.data_dir)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_variables() {
        let expanded = Config::expand_variables("$PREHEALTH/data");
        assert!(!expanded.contains(DIR_VARIABLE));
        assert!(expanded.ends_with("data"));
        assert_eq!(Config::expand_variables("/plain/path"), "/plain/path");
    }

    #[test]
    fn test_track_falls_back_to_other() {
        let mut config = Config::default();
        assert_eq!(config.track(), Track::Other);
        config.profile.track = "pre-pa".to_string();
        assert_eq!(config.track(), Track::PrePa);
        config.profile.track = "astronaut".to_string();
        assert_eq!(config.track(), Track::Other);
    }

    #[test]
    fn test_set_track_is_canonicalized() {
        let mut config = Config::default();
        config.set("track", "predental").unwrap();
        assert_eq!(config.profile.track, "Pre-Dental");
        assert!(config.set("track", "astronaut").is_err());
        assert_eq!(config.profile.track, "Pre-Dental");
    }
}
