//! Student model

use super::{Course, Transcript};
use serde::{Deserialize, Serialize};

/// A course section committed for the current term
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseSelection {
    /// The course taken
    pub course: Course,
    /// Section taken
    pub section: u32,
}

/// What enrollment needs from a student record: read the transcript, commit a course
pub trait StudentRecord {
    /// Historical and in-progress grades
    fn transcript(&self) -> &Transcript;

    /// Record a newly taken course section for the current term
    fn take_course(&mut self, course: &Course, section: u32);
}

/// A student and their academic record
#[derive(Debug, Clone)]
pub struct Student {
    /// Student identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// Graded history
    pub transcript: Transcript,

    /// Sections committed for the current term
    pub current_term: Vec<CourseSelection>,
}

impl Student {
    /// Create a student with an empty record
    #[must_use]
    pub fn new(id: String, name: String) -> Self {
        Self {
            id,
            name,
            transcript: Transcript::new(),
            current_term: Vec::new(),
        }
    }

    /// Create a student with an existing transcript
    #[must_use]
    pub const fn with_transcript(id: String, name: String, transcript: Transcript) -> Self {
        Self {
            id,
            name,
            transcript,
            current_term: Vec::new(),
        }
    }

    /// Units committed for the current term
    #[must_use]
    pub fn current_units(&self) -> u32 {
        self.current_term.iter().map(|s| s.course.units).sum()
    }
}

impl StudentRecord for Student {
    fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    fn take_course(&mut self, course: &Course, section: u32) {
        self.current_term.push(CourseSelection {
            course: course.clone(),
            section,
        });
    }
}
