//! Enroll command handler

use super::{load_catalog, load_student_record, resolve_student_path};
use crate::args::SectionRequest;
use nu_enroll::config::Config;
use nu_enroll::core::enrollment::{EnrollmentSummary, EnrollmentValidator};
use nu_enroll::core::loader::save_student;
use nu_enroll::{info, verbose};
use std::path::Path;

/// Run the enroll command
///
/// # Arguments
/// * `student_arg` - Student file path or bare name
/// * `take` - Requests from the command line; empty means use the file's requests
/// * `dry_run` - Check only, do not commit or save
/// * `config` - Loaded configuration
pub fn run(
    student_arg: &Path,
    take: &[SectionRequest],
    dry_run: bool,
    config: &Config,
) -> Result<(), String> {
    let catalog = load_catalog(config)?;
    let student_path = resolve_student_path(student_arg, config);
    let (mut student, file_requests) = load_student_record(&student_path, &catalog)?;

    let requests: Vec<(String, u32)> = if take.is_empty() {
        file_requests
    } else {
        take.iter().map(|r| (r.course.clone(), r.section)).collect()
    };
    if requests.is_empty() {
        println!("✓ Nothing requested for {}", student.name);
        return Ok(());
    }

    let offerings = catalog
        .resolve_requests(&requests)
        .map_err(|e| format!("✗ {e}"))?;
    for offering in &offerings {
        verbose!("  requested {offering} ({} units)", offering.units());
    }

    let validator = EnrollmentValidator::new(config.policy());
    let outcome = if dry_run {
        validator.validate(&student.transcript, &offerings)
    } else {
        validator.enroll(&mut student, &offerings)
    };

    let summary = outcome.map_err(|violation| {
        format!(
            "✗ Enrollment rejected [{}]: {violation}",
            violation.reason()
        )
    })?;

    print_summary(&student.name, &summary, dry_run);

    if !dry_run {
        save_student(&student_path, &student).map_err(|e| {
            format!(
                "✗ Enrollment accepted but saving {} failed: {e}",
                student_path.display()
            )
        })?;
        info!("Student record saved: {}", student_path.display());
        println!("✓ Student record updated: {}", student_path.display());
    }

    Ok(())
}

fn print_summary(name: &str, summary: &EnrollmentSummary, dry_run: bool) {
    let gpa = summary
        .gpa
        .map_or_else(|| "n/a".to_string(), |g| format!("{g:.2}"));
    if dry_run {
        println!(
            "✓ Request is valid for {name}: {} unit(s) at GPA {gpa} (dry run, nothing committed)",
            summary.units_requested
        );
    } else {
        println!(
            "✓ Enrolled {name} in {} offering(s): {} unit(s) at GPA {gpa}",
            summary.committed, summary.units_requested
        );
    }
}
