//! CLI argument definitions for `NuEnroll`

use clap::{builder::BoolishValueParser, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use nu_enroll::config::ConfigOverrides;
use nu_enroll::logger::Level;

/// CLI log level argument
///
/// Converts to lowercase strings for config storage and to `Level` for runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let as_str = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        };
        write!(f, "{as_str}")
    }
}

/// A `COURSE:SECTION` request given on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionRequest {
    /// Catalog key
    pub course: String,
    /// Section number
    pub section: u32,
}

/// Parse `CS2510:1` (spaces inside the course key are dropped)
pub fn parse_section_request(raw: &str) -> Result<SectionRequest, String> {
    let (course, section) = raw
        .rsplit_once(':')
        .ok_or_else(|| format!("Expected COURSE:SECTION, got '{raw}'"))?;
    let course: String = course.split_whitespace().collect();
    if course.is_empty() {
        return Err(format!("Missing course in '{raw}'"));
    }
    let section = section
        .trim()
        .parse::<u32>()
        .map_err(|_| format!("Invalid section in '{raw}'"))?;
    Ok(SectionRequest { course, section })
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    /// If no KEY is provided, displays all configuration values.
    Get {
        /// Optional configuration key to display (e.g., `level`, `max_units`, `catalog`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// Check an enrollment request and commit it to the student file.
    ///
    /// Requests come from `--take` when given, otherwise from the student file's
    /// `[[request]]` entries.
    Enroll {
        /// Student record (TOML); a bare name is looked up in `students_dir`
        #[arg(value_name = "STUDENT")]
        student: PathBuf,

        /// Requested section as COURSE:SECTION (repeatable)
        #[arg(short, long = "take", value_name = "COURSE:SECTION", value_parser = parse_section_request)]
        take: Vec<SectionRequest>,

        /// Run the checks without committing or saving
        #[arg(long)]
        dry_run: bool,
    },
    /// Show GPA, passed courses, and the unit load a student may request.
    Standing {
        /// Student record (TOML); a bare name is looked up in `students_dir`
        #[arg(value_name = "STUDENT")]
        student: PathBuf,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "nuenroll",
    about = "NuEnroll command-line interface",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Catalog CSV to use (overrides config `catalog`)
    #[arg(long, global = true, value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    // --- Config overrides ---
    /// Override config logging level
    #[arg(long = "config-level", value_enum)]
    pub config_level: Option<LogLevelArg>,

    /// Override config log file path
    #[arg(long = "config-log-file", value_name = "PATH")]
    pub config_log_file: Option<PathBuf>,

    /// Override config verbose flag (true/false)
    #[arg(long = "config-verbose", value_parser = BoolishValueParser::new())]
    pub config_verbose: Option<bool>,

    /// Override config students directory
    #[arg(long = "students-dir", value_name = "DIR")]
    pub students_dir: Option<PathBuf>,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Collect the overrides given on the command line
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            level: self.config_level.map(|l| l.to_string()),
            file: self
                .config_log_file
                .as_ref()
                .map(|p| p.to_string_lossy().into_owned()),
            verbose: self.config_verbose,
            catalog: self
                .catalog
                .as_ref()
                .map(|p| p.to_string_lossy().into_owned()),
            students_dir: self
                .students_dir
                .as_ref()
                .map(|p| p.to_string_lossy().into_owned()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_section_request() {
        assert_eq!(
            parse_section_request("CS2510:2"),
            Ok(SectionRequest {
                course: "CS2510".to_string(),
                section: 2
            })
        );
        assert_eq!(
            parse_section_request("CS 2510 : 1").map(|r| r.course),
            Ok("CS2510".to_string())
        );
        assert!(parse_section_request("CS2510").is_err());
        assert!(parse_section_request(":1").is_err());
        assert!(parse_section_request("CS2510:one").is_err());
    }

    #[test]
    fn test_cli_parses_enroll() {
        let cli = Cli::parse_from([
            "nuenroll",
            "--catalog",
            "catalog.csv",
            "enroll",
            "ada.toml",
            "--take",
            "CS2510:1",
            "-t",
            "MATH1365:2",
            "--dry-run",
        ]);

        let overrides = cli.to_config_overrides();
        assert_eq!(overrides.catalog.as_deref(), Some("catalog.csv"));

        match cli.command {
            Command::Enroll {
                student,
                take,
                dry_run,
            } => {
                assert_eq!(student, PathBuf::from("ada.toml"));
                assert_eq!(take.len(), 2);
                assert_eq!(take[1].course, "MATH1365");
                assert!(dry_run);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
