//! Integration tests for configuration management

use nu_enroll::config::{Config, ConfigOverrides};
use nu_enroll::core::enrollment::EnrollmentPolicy;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper to create a temporary config directory
fn setup_temp_config() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_file = temp_dir.path().join("config.toml");
    (temp_dir, config_file)
}

#[test]
fn test_config_from_defaults() {
    let config = Config::from_defaults();

    assert!(
        !config.logging.level.is_empty(),
        "Default log level should not be empty"
    );
    assert!(
        !config.paths.catalog.is_empty(),
        "Default catalog path should not be empty"
    );
    assert_eq!(config.policy(), EnrollmentPolicy::default());
}

#[test]
fn test_config_from_toml_basic() {
    let toml_str = r#"
[logging]
level = "info"
file = "/tmp/test.log"
verbose = true

[policy]
passing_grade = 12.0
probation_gpa = 13.0
probation_max_units = 12
standard_gpa = 17.0
standard_max_units = 18
max_units = 22

[paths]
catalog = "./catalog.csv"
students_dir = "./students"
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse TOML");

    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.file, "/tmp/test.log");
    assert!(config.logging.verbose);
    assert_eq!(config.paths.catalog, "./catalog.csv");
    assert_eq!(config.paths.students_dir, "./students");

    let policy = config.policy();
    assert!((policy.passing_grade - 12.0).abs() < f64::EPSILON);
    assert_eq!(policy.probation_max_units, 12);
    assert_eq!(policy.standard_max_units, 18);
    assert_eq!(policy.max_units, 22);
}

#[test]
fn test_config_from_toml_partial() {
    // Missing sections and fields fall back to serde defaults
    let toml_str = r#"
[logging]
level = "error"

[policy]
max_units = 18
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse partial TOML");

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "");
    assert!(!config.logging.verbose);
    assert_eq!(config.paths.catalog, "");
    assert_eq!(config.policy.max_units, 18);
    assert_eq!(config.policy.standard_max_units, 16);
    assert!((config.policy.passing_grade - 10.0).abs() < f64::EPSILON);
}

#[test]
fn test_config_variable_expansion() {
    let toml_str = r#"
[logging]
file = "$NU_ENROLL/test.log"

[paths]
catalog = "$NU_ENROLL/catalog.csv"
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse TOML with variables");

    assert!(config.logging.file.contains("nuenroll"));
    assert!(!config.logging.file.contains("$NU_ENROLL"));
    assert!(config.paths.catalog.ends_with("catalog.csv"));
    assert!(!config.paths.catalog.contains("$NU_ENROLL"));
}

#[test]
fn test_config_get_set() {
    let mut config = Config::from_defaults();

    assert!(config.get("level").is_some());

    config.set("level", "debug").expect("Failed to set level");
    assert_eq!(config.get("level").unwrap(), "debug");

    config
        .set("verbose", "true")
        .expect("Failed to set verbose");
    assert!(config.logging.verbose);

    config.set("max_units", "24").expect("Failed to set max_units");
    assert_eq!(config.get("max-units").unwrap(), "24");
    assert_eq!(config.policy().max_units, 24);

    config
        .set("passing_grade", "11.5")
        .expect("Failed to set passing_grade");
    assert_eq!(config.get("passing_grade").unwrap(), "11.5");

    assert!(config.get("unknown_key").is_none());
    assert!(config.set("unknown_key", "value").is_err());
}

#[test]
fn test_config_set_rejects_bad_policy() {
    let mut config = Config::from_defaults();

    assert!(config.set("max_units", "lots").is_err());
    assert!(config.set("probation_max_units", "-1").is_err());

    // Standard ceiling above the absolute ceiling is inconsistent
    let err = config
        .set("standard_max_units", "30")
        .expect_err("30 > max_units");
    assert!(err.contains("ordered"));
    assert_eq!(config.policy.standard_max_units, 16);
}

#[test]
fn test_config_set_rejects_non_finite_policy() {
    let mut config = Config::from_defaults();

    assert!(config.set("probation_gpa", "NaN").is_err());
    assert!(config.set("standard_gpa", "NaN").is_err());
    assert!(config.set("passing_grade", "inf").is_err());

    let policy = config.policy();
    assert_eq!(policy, EnrollmentPolicy::default());
    assert_eq!(policy.max_units_for(5.0), 14);
    assert!(policy.exceeds_unit_load(5.0, 20));
}

#[test]
fn test_config_load_replaces_inconsistent_policy() {
    let (_temp_dir, config_file) = setup_temp_config();
    fs::write(
        &config_file,
        r#"
[logging]
level = "warn"

[policy]
standard_max_units = 24
max_units = 20

[paths]
catalog = "./catalog.csv"
"#,
    )
    .expect("Failed to write config");

    let content = fs::read_to_string(&config_file).expect("Failed to read config");
    let config = Config::from_toml(&content).expect("Failed to parse config");

    assert_eq!(config.policy(), EnrollmentPolicy::default());
    // Sections other than [policy] are kept
    assert_eq!(config.logging.level, "warn");
    assert_eq!(config.paths.catalog, "./catalog.csv");
}

#[test]
fn test_config_from_toml_rejects_negative_threshold() {
    let config = Config::from_toml("[policy]\npassing_grade = -1.0\n").expect("valid TOML");
    assert!((config.policy.passing_grade - 10.0).abs() < f64::EPSILON);
}

#[test]
fn test_config_unset() {
    let mut config = Config::from_defaults();
    let defaults = Config::from_defaults();

    config.set("level", "debug").expect("Failed to set level");
    config.set("max_units", "22").expect("Failed to set max_units");

    config
        .unset("level", &defaults)
        .expect("Failed to unset level");
    config
        .unset("max_units", &defaults)
        .expect("Failed to unset max_units");

    assert_eq!(config.logging.level, defaults.logging.level);
    assert_eq!(config.policy.max_units, defaults.policy.max_units);
    assert!(config.unset("nope", &defaults).is_err());
}

#[test]
fn test_config_save_and_load() {
    let (_temp_dir, config_file) = setup_temp_config();

    let mut config = Config::from_defaults();
    config.set("level", "info").expect("Failed to set level");
    config
        .set("probation_max_units", "12")
        .expect("Failed to set probation_max_units");

    let toml_str = toml::to_string_pretty(&config).expect("Failed to serialize");
    fs::write(&config_file, toml_str).expect("Failed to write config");

    let content = fs::read_to_string(&config_file).expect("Failed to read config");
    let loaded_config = Config::from_toml(&content).expect("Failed to parse loaded config");

    assert_eq!(loaded_config.logging.level, "info");
    assert_eq!(loaded_config.policy.probation_max_units, 12);
}

#[test]
fn test_config_merge_defaults() {
    let mut config = Config::from_toml("[logging]\nverbose = true\n").expect("minimal TOML");
    let defaults = Config::from_defaults();

    assert!(config.merge_defaults(&defaults));
    assert_eq!(config.logging.level, defaults.logging.level);
    assert_eq!(config.paths.catalog, defaults.paths.catalog);
    assert!(config.logging.verbose);

    // Nothing left to fill on a second pass
    assert!(!config.merge_defaults(&defaults));
}

#[test]
fn test_config_overrides_apply() {
    let mut config = Config::from_defaults();

    let overrides = ConfigOverrides {
        level: Some("error".to_string()),
        file: Some("/custom/path.log".to_string()),
        verbose: Some(true),
        catalog: Some("./spring.csv".to_string()),
        students_dir: Some("./roster".to_string()),
    };

    config.apply_overrides(&overrides);

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "/custom/path.log");
    assert!(config.logging.verbose);
    assert_eq!(config.paths.catalog, "./spring.csv");
    assert_eq!(config.paths.students_dir, "./roster");
}

#[test]
fn test_config_overrides_partial() {
    let mut config = Config::from_defaults();
    let before = config.paths.catalog.clone();

    config.apply_overrides(&ConfigOverrides {
        level: Some("debug".to_string()),
        ..Default::default()
    });

    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.paths.catalog, before);
}

#[test]
fn test_config_display_format() {
    let config = Config::from_defaults();
    let display_str = format!("{config}");

    assert!(display_str.contains("[logging]"));
    assert!(display_str.contains("[policy]"));
    assert!(display_str.contains("max_units = 20"));
    assert!(display_str.contains("[paths]"));
}

#[test]
fn test_config_file_path() {
    let path = Config::get_config_file_path();
    let path_str = path.to_string_lossy();
    assert!(path_str.ends_with("config.toml") || path_str.ends_with("dconfig.toml"));
}
