//! CSV parser for course catalogs and section schedules

use crate::core::models::{Catalog, Course, Offering, EXAM_TIME_FORMAT};
use crate::debug;
use chrono::NaiveDateTime;
use std::collections::HashMap;
use std::error::Error;
use std::fs;
use std::path::Path;

/// Catalog metadata from the CSV header
#[derive(Debug, Clone, Default)]
struct CatalogMetadata {
    name: String,
    institution: String,
    term: String,
}

/// Parse a catalog CSV file
///
/// # Errors
/// Returns an error if the file cannot be read or parsed
pub fn parse_catalog_csv<P: AsRef<Path>>(path: P) -> Result<Catalog, Box<dyn Error>> {
    let content = fs::read_to_string(path)?;
    parse_catalog_str(&content)
}

/// Parse catalog CSV content
///
/// The file has three parts: `key,value` metadata lines, a `Courses` section,
/// and an optional `Offerings` section. Each section starts with its own header row.
///
/// # Errors
/// Returns an error if required metadata or the `Courses` section is missing, or a
/// course or offering line is malformed
pub fn parse_catalog_str(content: &str) -> Result<Catalog, Box<dyn Error>> {
    let lines: Vec<&str> = content.lines().collect();

    let courses_start =
        find_section(&lines, "courses", 0).ok_or("No 'Courses' section found in CSV")?;
    let offerings_start = find_section(&lines, "offerings", courses_start + 1);

    let metadata = parse_metadata(&lines[..courses_start])?;
    let mut catalog = Catalog::new(metadata.name, metadata.institution, metadata.term);

    let course_lines = &lines[courses_start + 1..offerings_start.unwrap_or(lines.len())];
    let (header_line, rows) = course_lines
        .split_first()
        .ok_or("No course header found")?;
    let headers = parse_csv_line(header_line);

    // First pass: create courses and remember their Course IDs
    let mut courses_by_key: HashMap<String, Course> = HashMap::new();
    let mut order: Vec<String> = Vec::new();
    let mut course_id_to_key: HashMap<String, String> = HashMap::new();

    for line in rows.iter().filter(|l| !l.trim().is_empty()) {
        let course = parse_course_line(line, &headers)?;
        let key = course.key();
        if let Some(course_id) = get_field(line, "Course ID", &headers) {
            if !course_id.is_empty() {
                course_id_to_key.insert(course_id.to_string(), key.clone());
            }
        }
        if courses_by_key.insert(key.clone(), course).is_some() {
            return Err(format!("Duplicate course '{key}' in catalog").into());
        }
        order.push(key);
    }

    // Second pass: resolve prerequisites now that every Course ID is known
    let names: HashMap<String, String> = courses_by_key
        .iter()
        .map(|(key, course)| (key.clone(), course.name.clone()))
        .collect();
    for line in rows.iter().filter(|l| !l.trim().is_empty()) {
        let key = extract_course_key(line, &headers)?;
        if let (Some(course), Some(prereq_str)) = (
            courses_by_key.get_mut(&key),
            get_field(line, "Prerequisites", &headers),
        ) {
            add_prerequisites_with_mapping(course, prereq_str, &course_id_to_key);
            for prereq in course.prerequisites.clone() {
                if let Some(name) = names.get(&prereq) {
                    course.name_prerequisite(&prereq, name.clone());
                }
            }
        }
    }

    if let Some(start) = offerings_start {
        let (header_line, rows) = lines[start + 1..]
            .split_first()
            .ok_or("No offering header found")?;
        let headers = parse_csv_line(header_line);

        for line in rows.iter().filter(|l| !l.trim().is_empty()) {
            let offering = parse_offering_line(line, &headers, &courses_by_key, &course_id_to_key)?;
            catalog.add_offering(offering);
        }
    }

    for key in order {
        if let Some(course) = courses_by_key.remove(&key) {
            catalog.add_course(course);
        }
    }

    debug!(
        "Parsed catalog '{}': {} course(s), {} offering(s)",
        catalog.name,
        catalog.courses().len(),
        catalog.offerings().len()
    );

    Ok(catalog)
}

/// Index of the first line at or after `from` that opens the named section
fn find_section(lines: &[&str], name: &str, from: usize) -> Option<usize> {
    lines
        .iter()
        .skip(from)
        .position(|line| {
            line.split(',')
                .next()
                .is_some_and(|first| first.trim().eq_ignore_ascii_case(name))
        })
        .map(|idx| idx + from)
}

/// Parse catalog metadata from the header section
fn parse_metadata(lines: &[&str]) -> Result<CatalogMetadata, Box<dyn Error>> {
    let mut metadata = CatalogMetadata::default();

    for line in lines {
        let parts: Vec<&str> = line.split(',').map(str::trim).collect();
        if parts.len() < 2 {
            continue;
        }

        let value = parts[1].to_string();
        match parts[0].to_lowercase().as_str() {
            "catalog" => metadata.name = value,
            "institution" => metadata.institution = value,
            "term" => metadata.term = value,
            _ => {}
        }
    }

    if metadata.institution.is_empty() {
        return Err("Missing Institution".into());
    }
    if metadata.name.is_empty() {
        metadata.name.clone_from(&metadata.institution);
    }

    Ok(metadata)
}

/// Parse a CSV line into fields
fn parse_csv_line(line: &str) -> Vec<String> {
    line.split(',')
        .map(str::trim)
        .map(std::string::ToString::to_string)
        .collect()
}

/// Parse a single course line from the CSV
fn parse_course_line(line: &str, headers: &[String]) -> Result<Course, Box<dyn Error>> {
    let name = get_field(line, "Course Name", headers)
        .unwrap_or_default()
        .to_string();
    let prefix = get_field(line, "Prefix", headers)
        .unwrap_or_default()
        .to_string();
    let number = get_field(line, "Number", headers)
        .unwrap_or_default()
        .to_string();

    if prefix.is_empty() || number.is_empty() {
        return Err(format!("Missing prefix or number in course line: {line}").into());
    }

    let units_str = get_field(line, "Units", headers).unwrap_or_default();
    let units = units_str
        .parse::<u32>()
        .ok()
        .filter(|u| *u > 0)
        .ok_or_else(|| format!("Invalid units '{units_str}' for {prefix}{number}"))?;

    Ok(Course::new(name, prefix, number, units))
}

/// Parse a single offering line from the CSV
fn parse_offering_line(
    line: &str,
    headers: &[String],
    courses_by_key: &HashMap<String, Course>,
    course_id_to_key: &HashMap<String, String>,
) -> Result<Offering, Box<dyn Error>> {
    let course_ref = get_field(line, "Course", headers).unwrap_or_default();
    let key = course_id_to_key
        .get(course_ref)
        .cloned()
        .unwrap_or_else(|| normalize_course_key(course_ref));
    let course = courses_by_key
        .get(&key)
        .ok_or_else(|| format!("Offering references unknown course '{course_ref}': {line}"))?;

    let section_str = get_field(line, "Section", headers).unwrap_or_default();
    let section = section_str
        .parse::<u32>()
        .map_err(|_| format!("Invalid section '{section_str}': {line}"))?;

    let exam_str = get_field(line, "Exam Time", headers).unwrap_or_default();
    let exam_time = NaiveDateTime::parse_from_str(exam_str, EXAM_TIME_FORMAT)
        .map_err(|e| format!("Invalid exam time '{exam_str}' ({e}): {line}"))?;

    Ok(Offering::new(course.clone(), section, exam_time))
}

/// Extract the course key (PREFIXNUMBER) from a course line
fn extract_course_key(line: &str, headers: &[String]) -> Result<String, Box<dyn Error>> {
    let prefix = get_field(line, "Prefix", headers).ok_or("Missing Prefix")?;
    let number = get_field(line, "Number", headers).ok_or("Missing Number")?;

    Ok(format!("{prefix}{number}"))
}

/// Get a field value from a CSV line by header name
fn get_field<'a>(line: &'a str, header_name: &str, headers: &[String]) -> Option<&'a str> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();

    headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case(header_name))
        .and_then(|idx| fields.get(idx))
        .copied()
}

/// Add prerequisites from a semicolon-separated string, converting course IDs to keys
fn add_prerequisites_with_mapping(
    course: &mut Course,
    prereq_str: &str,
    course_id_to_key: &HashMap<String, String>,
) {
    for prereq in prereq_str.split(';') {
        let trimmed = prereq.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(key) = course_id_to_key.get(trimmed) {
            course.add_prerequisite(key.clone());
        } else {
            let normalized = normalize_course_key(trimmed);
            if !normalized.is_empty() {
                course.add_prerequisite(normalized);
            }
        }
    }
}

/// Normalize a course key to PREFIXNUMBER format
/// Handles cases like "CS 1800", "CS1800", "CS 1800 (min grade 12)"
pub(crate) fn normalize_course_key(input: &str) -> String {
    let cleaned = input.split('(').next().unwrap_or(input).trim();
    cleaned.split_whitespace().collect()
}
