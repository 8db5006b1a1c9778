//! CLI command handlers for `NuEnroll`.
//!
//! Each subcommand is implemented in its own submodule.

pub mod config;
pub mod enroll;
pub mod standing;

use nu_enroll::config::Config;
use nu_enroll::core::loader::{load_student, parse_catalog_csv};
use nu_enroll::core::models::{Catalog, Student};
use nu_enroll::{error, info, warn};
use std::path::{Path, PathBuf};

/// Load the catalog named by `--catalog` or the config `catalog` path
pub(crate) fn load_catalog(config: &Config) -> Result<Catalog, String> {
    if config.paths.catalog.is_empty() {
        return Err("✗ No catalog given; pass --catalog or set `catalog` in config".to_string());
    }
    let path = PathBuf::from(&config.paths.catalog);

    let catalog = parse_catalog_csv(&path).map_err(|e| {
        error!("Failed to load catalog {}: {e}", path.display());
        format!("✗ Failed to load catalog {}: {e}", path.display())
    })?;

    if let Err(problems) = catalog.validate_course_dependencies() {
        for problem in &problems {
            warn!("{problem}");
        }
    }
    info!(
        "Catalog loaded: {} ({} courses, {} offerings)",
        path.display(),
        catalog.courses().len(),
        catalog.offerings().len()
    );
    Ok(catalog)
}

/// Resolve a student argument: existing paths win, bare names go to `students_dir`
pub(crate) fn resolve_student_path(arg: &Path, config: &Config) -> PathBuf {
    if arg.exists() || config.paths.students_dir.is_empty() || arg.components().count() > 1 {
        return arg.to_path_buf();
    }
    let mut candidate = PathBuf::from(&config.paths.students_dir).join(arg);
    if candidate.extension().is_none() {
        candidate.set_extension("toml");
    }
    candidate
}

/// Load a student file against the catalog
pub(crate) fn load_student_record(
    path: &Path,
    catalog: &Catalog,
) -> Result<(Student, Vec<(String, u32)>), String> {
    load_student(path, catalog).map_err(|e| {
        error!("Failed to load student {}: {e}", path.display());
        format!("✗ Failed to load student {}: {e}", path.display())
    })
}
