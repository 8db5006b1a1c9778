//! Enrollment rule violations

use std::fmt;
use thiserror::Error;

/// Which rule an enrollment request broke
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViolationReason {
    /// A requested course was already passed
    AlreadyPassed,
    /// A prerequisite of a requested course was not passed
    PrerequisiteMissing,
    /// Two requested offerings share an exam slot
    ExamConflict,
    /// The same course was requested twice
    DuplicateCourse,
    /// Requested units exceed what the GPA allows
    UnitLoadExceeded,
}

impl ViolationReason {
    /// Stable tag for display and scripting
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AlreadyPassed => "already-passed",
            Self::PrerequisiteMissing => "prerequisite-missing",
            Self::ExamConflict => "exam-conflict",
            Self::DuplicateCourse => "duplicate-course",
            Self::UnitLoadExceeded => "unit-load-exceeded",
        }
    }
}

impl fmt::Display for ViolationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The first rule an enrollment request broke
///
/// Raising one of these aborts the whole request; nothing is committed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EnrollmentRulesViolation {
    /// The course appears in the transcript with a passing grade
    #[error("The student has already passed {course}")]
    AlreadyPassed {
        /// Name of the requested course
        course: String,
    },

    /// A prerequisite has no passing grade in any term
    #[error("The student has not passed {prerequisite} as a prerequisite of {course}")]
    PrerequisiteNotPassed {
        /// Name of the missing prerequisite (its catalog key when unnamed)
        prerequisite: String,
        /// Name of the requested course
        course: String,
    },

    /// Two offerings have the same exam time
    #[error("Two offerings {first} and {second} have the same exam time")]
    ExamTimeConflict {
        /// The earlier offering in request order
        first: String,
        /// The later offering in request order
        second: String,
    },

    /// A course is requested more than once
    #[error("{course} is requested to be taken twice")]
    DuplicateCourse {
        /// Name of the repeated course
        course: String,
    },

    /// The requested load is too high for the student's GPA
    #[error("Number of units ({units}) requested does not match GPA of {gpa:.2}")]
    UnitLoadExceeded {
        /// Units requested in total
        units: u32,
        /// GPA the load was judged against
        gpa: f64,
    },
}

impl EnrollmentRulesViolation {
    /// Machine-readable reason for this violation
    #[must_use]
    pub const fn reason(&self) -> ViolationReason {
        match self {
            Self::AlreadyPassed { .. } => ViolationReason::AlreadyPassed,
            Self::PrerequisiteNotPassed { .. } => ViolationReason::PrerequisiteMissing,
            Self::ExamTimeConflict { .. } => ViolationReason::ExamConflict,
            Self::DuplicateCourse { .. } => ViolationReason::DuplicateCourse,
            Self::UnitLoadExceeded { .. } => ViolationReason::UnitLoadExceeded,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let v = EnrollmentRulesViolation::AlreadyPassed {
            course: "Discrete Structures".to_string(),
        };
        assert_eq!(v.to_string(), "The student has already passed Discrete Structures");
        assert_eq!(v.reason(), ViolationReason::AlreadyPassed);

        let v = EnrollmentRulesViolation::PrerequisiteNotPassed {
            prerequisite: "Fundamentals of Computer Science 1".to_string(),
            course: "Fundamentals of Computer Science 2".to_string(),
        };
        assert_eq!(
            v.to_string(),
            "The student has not passed Fundamentals of Computer Science 1 as a prerequisite of Fundamentals of Computer Science 2"
        );

        let v = EnrollmentRulesViolation::UnitLoadExceeded {
            units: 18,
            gpa: 11.5,
        };
        assert_eq!(
            v.to_string(),
            "Number of units (18) requested does not match GPA of 11.50"
        );
        assert_eq!(v.reason().as_str(), "unit-load-exceeded");
    }
}
