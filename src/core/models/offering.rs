//! Offering model

use super::Course;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Exam time format used in catalog files and display
pub const EXAM_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// A scheduled section of a course for the upcoming term
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offering {
    /// The course being offered
    pub course: Course,

    /// Section number
    pub section: u32,

    /// Final exam slot
    pub exam_time: NaiveDateTime,
}

impl Offering {
    /// Create a new offering
    #[must_use]
    pub const fn new(course: Course, section: u32, exam_time: NaiveDateTime) -> Self {
        Self {
            course,
            section,
            exam_time,
        }
    }

    /// Units carried by the offered course
    #[must_use]
    pub const fn units(&self) -> u32 {
        self.course.units
    }
}

impl fmt::Display for Offering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{} (exam {})",
            self.course.key(),
            self.section,
            self.exam_time.format(EXAM_TIME_FORMAT)
        )
    }
}
