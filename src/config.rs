//! Configuration module for `NuEnroll`

use crate::core::enrollment::policy::{
    EnrollmentPolicy, MAX_UNITS, PASSING_GRADE, PROBATION_GPA, PROBATION_MAX_UNITS,
    STANDARD_GPA, STANDARD_MAX_UNITS,
};
use crate::warn;
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

/// Placeholder expanded to the config directory in string values
const DIR_VARIABLE: &str = "$NU_ENROLL";

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

/// Enrollment policy configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Lowest passing grade
    pub passing_grade: f64,
    /// GPA below which the probation ceiling applies
    pub probation_gpa: f64,
    /// Probation unit ceiling
    pub probation_max_units: u32,
    /// GPA below which the standard ceiling applies
    pub standard_gpa: f64,
    /// Standard unit ceiling
    pub standard_max_units: u32,
    /// Absolute unit ceiling
    pub max_units: u32,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            passing_grade: PASSING_GRADE,
            probation_gpa: PROBATION_GPA,
            probation_max_units: PROBATION_MAX_UNITS,
            standard_gpa: STANDARD_GPA,
            standard_max_units: STANDARD_MAX_UNITS,
            max_units: MAX_UNITS,
        }
    }
}

impl From<&PolicyConfig> for EnrollmentPolicy {
    fn from(cfg: &PolicyConfig) -> Self {
        Self {
            passing_grade: cfg.passing_grade,
            probation_gpa: cfg.probation_gpa,
            probation_max_units: cfg.probation_max_units,
            standard_gpa: cfg.standard_gpa,
            standard_max_units: cfg.standard_max_units,
            max_units: cfg.max_units,
        }
    }
}

/// Paths configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Default catalog CSV used when `--catalog` is omitted
    #[serde(default)]
    pub catalog: String,
    /// Directory searched for student files given by bare name
    #[serde(default)]
    pub students_dir: String,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Enrollment policy
    #[serde(default)]
    pub policy: PolicyConfig,
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
    /// Override catalog path
    pub catalog: Option<String>,
    /// Override students directory
    pub students_dir: Option<String>,
}

impl Config {
    /// Get the `$NU_ENROLL` directory path
    ///
    /// Returns:
    /// - Linux: `~/.config/nuenroll`
    /// - macOS: `~/Library/Application Support/nuenroll`
    /// - Windows: `%APPDATA%\nuenroll`
    #[must_use]
    pub fn get_nuenroll_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("nuenroll")
    }

    /// Merge missing fields from defaults into this config
    ///
    /// Only string fields that are empty here and non-empty in `defaults` are
    /// filled; policy values always have a value once parsed.
    ///
    /// # Returns
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

        if self.paths.catalog.is_empty() && !defaults.paths.catalog.is_empty() {
            self.paths.catalog.clone_from(&defaults.paths.catalog);
            changed = true;
        }
        if self.paths.students_dir.is_empty() && !defaults.paths.students_dir.is_empty() {
            self.paths
                .students_dir
                .clone_from(&defaults.paths.students_dir);
            changed = true;
        }

        changed
    }

    /// Apply CLI-provided overrides onto the loaded configuration
    ///
    /// Overrides only last for this run; nothing is written back to disk.
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
        if let Some(catalog) = &overrides.catalog {
            self.paths.catalog.clone_from(catalog);
        }
        if let Some(students_dir) = &overrides.students_dir {
            self.paths.students_dir.clone_from(students_dir);
        }
    }

    /// The enrollment policy described by the `[policy]` section
    #[must_use]
    pub fn policy(&self) -> EnrollmentPolicy {
        EnrollmentPolicy::from(&self.policy)
    }

    /// Get the user config file path
    ///
    /// `config.toml` for release builds, `dconfig.toml` for debug builds, inside
    /// [`get_nuenroll_dir`](Self::get_nuenroll_dir).
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_nuenroll_dir().join(CONFIG_FILE_NAME)
    }

    /// Expand `$NU_ENROLL` variable in a string
    #[must_use]
    fn expand_variables(value: &str) -> String {
        if value.contains(DIR_VARIABLE) {
            let dir = Self::get_nuenroll_dir();
            value.replace(DIR_VARIABLE, dir.to_str().unwrap_or("."))
        } else {
            value.to_string()
        }
    }

    /// Initialize config from a TOML string
    ///
    /// Missing fields fall back to their serde defaults; `$NU_ENROLL` is expanded
    /// in every path-like value. An inconsistent `[policy]` section is replaced by
    /// the default policy.
    ///
    /// # Errors
    /// Returns an error if the TOML cannot be parsed or doesn't match the expected schema
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(toml_str)?;

        config.logging.file = Self::expand_variables(&config.logging.file);
        config.paths.catalog = Self::expand_variables(&config.paths.catalog);
        config.paths.students_dir = Self::expand_variables(&config.paths.students_dir);

        if let Err(e) = config.policy().validate() {
            warn!("Ignoring [policy] section ({e}); using default policy");
            config.policy = PolicyConfig::default();
        }

        Ok(config)
    }

    /// Load configuration from embedded defaults
    ///
    /// # Panics
    /// Panics if the embedded default configuration is invalid TOML. The defaults are
    /// compiled into the binary and covered by tests.
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).expect("Failed to parse compiled-in default configuration")
    }

    /// Load configuration from file, or create from defaults if not found
    ///
    /// An existing file has missing fields back-filled from the defaults (and is
    /// re-saved when that changes anything). On first run the config directory and
    /// file are created. Any read or parse failure falls back to the defaults.
    #[must_use]
    pub fn load() -> Self {
        let config_file = Self::get_config_file_path();
        let defaults = Self::from_defaults();

        if config_file.exists() {
            if let Ok(content) = fs::read_to_string(&config_file) {
                if let Ok(mut config) = Self::from_toml(&content) {
                    if config.merge_defaults(&defaults) {
                        let _ = config.save();
                    }
                    return config;
                }
            }
        } else {
            if let Some(parent) = config_file.parent() {
                let _ = fs::create_dir_all(parent);
            }
            let _ = defaults.save();
            return defaults;
        }

        defaults
    }

    /// Save configuration to file
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be created or the file cannot
    /// be written
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let config_file = Self::get_config_file_path();
        if let Some(parent) = config_file.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(&config_file, toml_str)?;
        Ok(())
    }

    /// Get a configuration value by key
    ///
    /// Supported keys: `level`, `file`, `verbose`, `passing_grade`, `probation_gpa`,
    /// `probation_max_units`, `standard_gpa`, `standard_max_units`, `max_units`,
    /// `catalog`, `students_dir`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "level" => Some(self.logging.level.clone()),
            "file" => Some(self.logging.file.clone()),
            "verbose" => Some(self.logging.verbose.to_string()),
            "passing_grade" | "passing-grade" => Some(self.policy.passing_grade.to_string()),
            "probation_gpa" | "probation-gpa" => Some(self.policy.probation_gpa.to_string()),
            "probation_max_units" | "probation-max-units" => {
                Some(self.policy.probation_max_units.to_string())
            }
            "standard_gpa" | "standard-gpa" => Some(self.policy.standard_gpa.to_string()),
            "standard_max_units" | "standard-max-units" => {
                Some(self.policy.standard_max_units.to_string())
            }
            "max_units" | "max-units" => Some(self.policy.max_units.to_string()),
            "catalog" => Some(self.paths.catalog.clone()),
            "students_dir" | "students-dir" => Some(self.paths.students_dir.clone()),
            _ => None,
        }
    }

    /// Set a configuration value by key
    ///
    /// Policy values are parsed as numbers, and the resulting policy must still be
    /// consistent (see [`EnrollmentPolicy::validate`]); otherwise nothing changes.
    /// Call [`save()`](Config::save) to persist.
    ///
    /// # Errors
    /// Returns an error if the key is unknown or the value is invalid
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        let mut policy = self.policy.clone();
        match key {
            "level" => self.logging.level = value.to_string(),
            "file" => self.logging.file = value.to_string(),
            "verbose" => {
                self.logging.verbose = value
                    .parse::<bool>()
                    .map_err(|_| format!("Invalid boolean value for 'verbose': '{value}'"))?;
            }
            "passing_grade" | "passing-grade" => policy.passing_grade = parse_number(key, value)?,
            "probation_gpa" | "probation-gpa" => policy.probation_gpa = parse_number(key, value)?,
            "probation_max_units" | "probation-max-units" => {
                policy.probation_max_units = parse_number(key, value)?;
            }
            "standard_gpa" | "standard-gpa" => policy.standard_gpa = parse_number(key, value)?,
            "standard_max_units" | "standard-max-units" => {
                policy.standard_max_units = parse_number(key, value)?;
            }
            "max_units" | "max-units" => policy.max_units = parse_number(key, value)?,
            "catalog" => self.paths.catalog = value.to_string(),
            "students_dir" | "students-dir" => self.paths.students_dir = value.to_string(),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }

        if policy != self.policy {
            EnrollmentPolicy::from(&policy).validate()?;
            self.policy = policy;
        }
        Ok(())
    }

    /// Unset a configuration value by key (reset to default)
    ///
    /// # Errors
    /// Returns an error if the key is unknown
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        match key {
            "level" => self.logging.level.clone_from(&defaults.logging.level),
            "file" => self.logging.file.clone_from(&defaults.logging.file),
            "verbose" => self.logging.verbose = defaults.logging.verbose,
            "passing_grade" | "passing-grade" => {
                self.policy.passing_grade = defaults.policy.passing_grade;
            }
            "probation_gpa" | "probation-gpa" => {
                self.policy.probation_gpa = defaults.policy.probation_gpa;
            }
            "probation_max_units" | "probation-max-units" => {
                self.policy.probation_max_units = defaults.policy.probation_max_units;
            }
            "standard_gpa" | "standard-gpa" => {
                self.policy.standard_gpa = defaults.policy.standard_gpa;
            }
            "standard_max_units" | "standard-max-units" => {
                self.policy.standard_max_units = defaults.policy.standard_max_units;
            }
            "max_units" | "max-units" => self.policy.max_units = defaults.policy.max_units,
            "catalog" => self.paths.catalog.clone_from(&defaults.paths.catalog),
            "students_dir" | "students-dir" => self
                .paths
                .students_dir
                .clone_from(&defaults.paths.students_dir),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Reset all configuration to defaults
    ///
    /// Deletes the config file; the next [`load()`](Config::load) recreates it.
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

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, String> {
    value
        .trim()
        .parse::<T>()
        .map_err(|_| format!("Invalid numeric value for '{key}': '{value}'"))
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[logging]")?;
        writeln!(f, "  level = \"{}\"", self.logging.level)?;
        writeln!(f, "  file = \"{}\"", self.logging.file)?;
        writeln!(f, "  verbose = {}", self.logging.verbose)?;

        writeln!(f, "\n[policy]")?;
        writeln!(f, "  passing_grade = {}", self.policy.passing_grade)?;
        writeln!(f, "  probation_gpa = {}", self.policy.probation_gpa)?;
        writeln!(f, "  probation_max_units = {}", self.policy.probation_max_units)?;
        writeln!(f, "  standard_gpa = {}", self.policy.standard_gpa)?;
        writeln!(f, "  standard_max_units = {}", self.policy.standard_max_units)?;
        writeln!(f, "  max_units = {}", self.policy.max_units)?;

        writeln!(f, "\n[paths]")?;
        writeln!(f, "  catalog = \"{}\"", self.paths.catalog)?;
        writeln!(f, "  students_dir = \"{}\"", self.paths.students_dir)?;

        Ok(())
    }
}
