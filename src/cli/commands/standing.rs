//! Standing command handler

use super::{load_catalog, load_student_record, resolve_student_path};
use nu_enroll::config::Config;
use std::path::Path;

/// Print a student's GPA, passed courses, and allowed unit load
pub fn run(student_arg: &Path, config: &Config) -> Result<(), String> {
    let catalog = load_catalog(config)?;
    let student_path = resolve_student_path(student_arg, config);
    let (student, _) = load_student_record(&student_path, &catalog)?;

    let policy = config.policy();
    let gpa = student.transcript.gpa();

    let mut passed: Vec<String> = student
        .transcript
        .passed_course_keys(policy.passing_grade)
        .into_iter()
        .collect();
    passed.sort();

    println!("\n=== Standing for {} ({}) ===\n", student.name, student.id);
    match gpa {
        Some(g) => println!("GPA: {g:.2}"),
        None => println!("GPA: n/a (no graded units)"),
    }
    println!("Transcript units: {}", student.transcript.total_units());
    println!(
        "Passed courses ({}): {}",
        passed.len(),
        if passed.is_empty() {
            "none".to_string()
        } else {
            passed.join(", ")
        }
    );
    println!(
        "Maximum unit load: {}",
        policy.max_units_for(gpa.unwrap_or(0.0))
    );

    if !student.current_term.is_empty() {
        println!(
            "Current term: {} section(s), {} unit(s)",
            student.current_term.len(),
            student.current_units()
        );
        for selection in &student.current_term {
            println!(
                "  {}-{} {}",
                selection.course.key(),
                selection.section,
                selection.course.name
            );
        }
    }

    Ok(())
}
