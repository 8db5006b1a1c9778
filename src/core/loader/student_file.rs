//! Student record files (TOML)

use crate::core::models::{Catalog, CourseSelection, Student, Term, Transcript};
use crate::info;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs;
use std::path::Path;

/// One graded transcript entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeEntry {
    /// Term label
    pub term: String,
    /// Catalog key
    pub course: String,
    /// Grade earned
    pub grade: f64,
}

/// A course section reference (committed or requested)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionEntry {
    /// Catalog key
    pub course: String,
    /// Section number
    pub section: u32,
}

/// On-disk layout of a student record
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StudentFile {
    /// Student identifier
    pub id: String,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Graded history
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub transcript: Vec<GradeEntry>,
    /// Sections already committed for the current term
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub current: Vec<SectionEntry>,
    /// Sections the student asks to take
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub request: Vec<SectionEntry>,
}

impl StudentFile {
    /// Read a student file from disk
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not valid TOML
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Write the student file to disk
    ///
    /// # Errors
    /// Returns an error if serialization or the write fails
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn Error>> {
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(path, toml_str)?;
        Ok(())
    }

    /// Build the student, resolving every course against the catalog
    ///
    /// # Errors
    /// Returns an error naming the first course that is not in the catalog
    pub fn to_student(&self, catalog: &Catalog) -> Result<Student, Box<dyn Error>> {
        let mut transcript = Transcript::new();
        for entry in &self.transcript {
            let course = catalog.get_course(&entry.course).ok_or_else(|| {
                format!(
                    "Transcript entry for term {} references unknown course '{}'",
                    entry.term, entry.course
                )
            })?;
            transcript.record(Term::new(entry.term.as_str()), course.clone(), entry.grade);
        }

        let mut student = Student::with_transcript(self.id.clone(), self.name.clone(), transcript);
        for entry in &self.current {
            let course = catalog.get_course(&entry.course).ok_or_else(|| {
                format!("Current-term entry references unknown course '{}'", entry.course)
            })?;
            student.current_term.push(CourseSelection {
                course: course.clone(),
                section: entry.section,
            });
        }

        Ok(student)
    }

    /// Requested sections as (catalog key, section) pairs
    #[must_use]
    pub fn requests(&self) -> Vec<(String, u32)> {
        self.request
            .iter()
            .map(|r| (r.course.clone(), r.section))
            .collect()
    }

    /// Snapshot a student back into file form
    ///
    /// Transcript entries are written in term order, then catalog-key order. The
    /// request list is left empty.
    #[must_use]
    pub fn from_student(student: &Student) -> Self {
        let mut transcript: Vec<GradeEntry> = student
            .transcript
            .entries()
            .map(|(term, course, grade)| GradeEntry {
                term: term.label().to_string(),
                course: course.key(),
                grade,
            })
            .collect();
        transcript.sort_by(|a, b| a.term.cmp(&b.term).then_with(|| a.course.cmp(&b.course)));

        let current = student
            .current_term
            .iter()
            .map(|s| SectionEntry {
                course: s.course.key(),
                section: s.section,
            })
            .collect();

        Self {
            id: student.id.clone(),
            name: student.name.clone(),
            transcript,
            current,
            request: Vec::new(),
        }
    }
}

/// Load a student and their pending requests
///
/// # Errors
/// Returns an error if the file cannot be read, parsed, or resolved against the catalog
pub fn load_student<P: AsRef<Path>>(
    path: P,
    catalog: &Catalog,
) -> Result<(Student, Vec<(String, u32)>), Box<dyn Error>> {
    let path = path.as_ref();
    let file = StudentFile::read(path)?;
    let student = file.to_student(catalog)?;
    info!(
        "Loaded student {} from {} ({} transcript entries)",
        student.id,
        path.display(),
        student.transcript.entry_count()
    );
    Ok((student, file.requests()))
}

/// Save a student record, clearing any pending requests
///
/// # Errors
/// Returns an error if the file cannot be written
pub fn save_student<P: AsRef<Path>>(path: P, student: &Student) -> Result<(), Box<dyn Error>> {
    StudentFile::from_student(student).write(path)
}
