//! Enrollment validation
//!
//! Decides whether a student may take a requested set of offerings. The checks
//! run in a fixed order and the first violation aborts the request:
//!
//! 1. no requested course has already been passed
//! 2. every prerequisite of every requested course has been passed
//! 3. no two requested offerings share an exam time
//! 4. no course is requested twice
//! 5. the requested units fit the GPA-based load limits
//!
//! Only when every check passes are the offerings committed to the student record.

pub mod policy;
pub mod violation;

pub use policy::EnrollmentPolicy;
pub use violation::{EnrollmentRulesViolation, ViolationReason};

use crate::core::models::{Offering, StudentRecord, Transcript};
use crate::{debug, info, warn};
use std::collections::HashSet;

/// Outcome of an accepted enrollment request
#[derive(Debug, Clone, PartialEq)]
pub struct EnrollmentSummary {
    /// Units across all requested offerings
    pub units_requested: u32,
    /// GPA the load was judged against (`None` for an empty transcript)
    pub gpa: Option<f64>,
    /// Offerings committed to the student record (0 for a dry run)
    pub committed: usize,
}

/// Runs the enrollment rule set
#[derive(Debug, Clone, Copy, Default)]
pub struct EnrollmentValidator {
    policy: EnrollmentPolicy,
}

impl EnrollmentValidator {
    /// Create a validator for the given policy
    #[must_use]
    pub const fn new(policy: EnrollmentPolicy) -> Self {
        Self { policy }
    }

    /// The policy in force
    #[must_use]
    pub const fn policy(&self) -> &EnrollmentPolicy {
        &self.policy
    }

    /// Validate and commit an enrollment request
    ///
    /// On success every offering is recorded on the student, in request order.
    /// On failure the student record is left untouched.
    ///
    /// # Errors
    /// Returns the first [`EnrollmentRulesViolation`] found
    pub fn enroll<S: StudentRecord>(
        &self,
        student: &mut S,
        offerings: &[Offering],
    ) -> Result<EnrollmentSummary, EnrollmentRulesViolation> {
        let mut summary = self.validate(student.transcript(), offerings)?;

        for offering in offerings {
            student.take_course(&offering.course, offering.section);
        }
        summary.committed = offerings.len();

        info!(
            "Enrollment committed: {} offering(s), {} unit(s)",
            summary.committed, summary.units_requested
        );
        Ok(summary)
    }

    /// Run every check without committing anything
    ///
    /// # Errors
    /// Returns the first [`EnrollmentRulesViolation`] found
    pub fn validate(
        &self,
        transcript: &Transcript,
        offerings: &[Offering],
    ) -> Result<EnrollmentSummary, EnrollmentRulesViolation> {
        self.run_checks(transcript, offerings).inspect_err(|violation| {
            warn!("Enrollment rejected [{}]: {violation}", violation.reason());
        })
    }

    fn run_checks(
        &self,
        transcript: &Transcript,
        offerings: &[Offering],
    ) -> Result<EnrollmentSummary, EnrollmentRulesViolation> {
        let passed = transcript.passed_course_keys(self.policy.passing_grade);
        debug!(
            "Checking {} offering(s) against {} passed course(s)",
            offerings.len(),
            passed.len()
        );

        check_not_passed(offerings, &passed)?;
        check_prerequisites(offerings, &passed)?;
        check_exam_time_conflicts(offerings)?;
        check_duplicate_courses(offerings)?;

        let units_requested: u32 = offerings.iter().map(Offering::units).sum();
        let gpa = transcript.gpa();
        self.check_unit_load(gpa, units_requested)?;

        Ok(EnrollmentSummary {
            units_requested,
            gpa,
            committed: 0,
        })
    }

    /// An empty transcript is judged as a GPA of zero.
    fn check_unit_load(&self, gpa: Option<f64>, units: u32) -> Result<(), EnrollmentRulesViolation> {
        let effective = gpa.unwrap_or(0.0);
        debug!(
            "Unit load: {units} requested, GPA {effective:.2}, ceiling {}",
            self.policy.max_units_for(effective)
        );

        if self.policy.exceeds_unit_load(effective, units) {
            return Err(EnrollmentRulesViolation::UnitLoadExceeded {
                units,
                gpa: effective,
            });
        }
        Ok(())
    }
}

fn check_not_passed(
    offerings: &[Offering],
    passed: &HashSet<String>,
) -> Result<(), EnrollmentRulesViolation> {
    match offerings.iter().find(|o| passed.contains(&o.course.key())) {
        Some(offering) => Err(EnrollmentRulesViolation::AlreadyPassed {
            course: offering.course.name.clone(),
        }),
        None => Ok(()),
    }
}

fn check_prerequisites(
    offerings: &[Offering],
    passed: &HashSet<String>,
) -> Result<(), EnrollmentRulesViolation> {
    for offering in offerings {
        if let Some(missing) = offering
            .course
            .prerequisites
            .iter()
            .find(|pre| !passed.contains(pre.as_str()))
        {
            return Err(EnrollmentRulesViolation::PrerequisiteNotPassed {
                prerequisite: offering.course.prerequisite_name(missing).to_string(),
                course: offering.course.name.clone(),
            });
        }
    }
    Ok(())
}

fn check_exam_time_conflicts(offerings: &[Offering]) -> Result<(), EnrollmentRulesViolation> {
    for (i, first) in offerings.iter().enumerate() {
        if let Some(second) = offerings[i + 1..]
            .iter()
            .find(|other| other.exam_time == first.exam_time)
        {
            return Err(EnrollmentRulesViolation::ExamTimeConflict {
                first: first.to_string(),
                second: second.to_string(),
            });
        }
    }
    Ok(())
}

fn check_duplicate_courses(offerings: &[Offering]) -> Result<(), EnrollmentRulesViolation> {
    for (i, first) in offerings.iter().enumerate() {
        if offerings[i + 1..].iter().any(|other| other.course == first.course) {
            return Err(EnrollmentRulesViolation::DuplicateCourse {
                course: first.course.name.clone(),
            });
        }
    }
    Ok(())
}
