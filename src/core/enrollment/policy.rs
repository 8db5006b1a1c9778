//! Grade and unit-load policy values

use crate::core::models::Grade;

/// Lowest grade that counts as passing a course
pub const PASSING_GRADE: Grade = 10.0;
/// Below this GPA a student is limited to [`PROBATION_MAX_UNITS`]
pub const PROBATION_GPA: f64 = 12.0;
/// Unit ceiling for GPAs below [`PROBATION_GPA`]
pub const PROBATION_MAX_UNITS: u32 = 14;
/// Below this GPA a student is limited to [`STANDARD_MAX_UNITS`]
pub const STANDARD_GPA: f64 = 16.0;
/// Unit ceiling for GPAs below [`STANDARD_GPA`]
pub const STANDARD_MAX_UNITS: u32 = 16;
/// Unit ceiling regardless of GPA
pub const MAX_UNITS: u32 = 20;

/// Policy values the enrollment checks are evaluated against
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnrollmentPolicy {
    /// Lowest passing grade; used by the already-passed and prerequisite checks
    pub passing_grade: Grade,
    /// GPA threshold of the probation band
    pub probation_gpa: f64,
    /// Unit ceiling inside the probation band
    pub probation_max_units: u32,
    /// GPA threshold of the standard band
    pub standard_gpa: f64,
    /// Unit ceiling inside the standard band
    pub standard_max_units: u32,
    /// Absolute unit ceiling
    pub max_units: u32,
}

impl Default for EnrollmentPolicy {
    fn default() -> Self {
        Self {
            passing_grade: PASSING_GRADE,
            probation_gpa: PROBATION_GPA,
            probation_max_units: PROBATION_MAX_UNITS,
            standard_gpa: STANDARD_GPA,
            standard_max_units: STANDARD_MAX_UNITS,
            max_units: MAX_UNITS,
        }
    }
}

impl EnrollmentPolicy {
    /// Whether `grade` is a pass
    #[must_use]
    pub fn is_passing(&self, grade: Grade) -> bool {
        grade >= self.passing_grade
    }

    /// Whether requesting `units` at `gpa` breaks the unit-load rule
    ///
    /// The three bands are independent conditions; any one of them rejects.
    #[must_use]
    pub fn exceeds_unit_load(&self, gpa: f64, units: u32) -> bool {
        (gpa < self.probation_gpa && units > self.probation_max_units)
            || (gpa < self.standard_gpa && units > self.standard_max_units)
            || units > self.max_units
    }

    /// Largest load that [`exceeds_unit_load`](Self::exceeds_unit_load) accepts at `gpa`
    #[must_use]
    pub fn max_units_for(&self, gpa: f64) -> u32 {
        let mut ceiling = self.max_units;
        if gpa < self.standard_gpa {
            ceiling = ceiling.min(self.standard_max_units);
        }
        if gpa < self.probation_gpa {
            ceiling = ceiling.min(self.probation_max_units);
        }
        ceiling
    }

    /// Check that the bands are internally consistent
    ///
    /// # Errors
    /// Returns a description of the first inconsistency found
    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in [
            ("passing_grade", self.passing_grade),
            ("probation_gpa", self.probation_gpa),
            ("standard_gpa", self.standard_gpa),
        ] {
            if !value.is_finite() {
                return Err(format!("{name} must be a finite number, got {value}"));
            }
        }
        if self.passing_grade < 0.0 || self.probation_gpa < 0.0 || self.standard_gpa < 0.0 {
            return Err("Policy grades and GPA thresholds must not be negative".to_string());
        }
        if self.probation_gpa > self.standard_gpa {
            return Err(format!(
                "probation_gpa ({}) must not exceed standard_gpa ({})",
                self.probation_gpa, self.standard_gpa
            ));
        }
        if self.probation_max_units > self.standard_max_units
            || self.standard_max_units > self.max_units
        {
            return Err(format!(
                "Unit ceilings must be ordered: probation ({}) <= standard ({}) <= max ({})",
                self.probation_max_units, self.standard_max_units, self.max_units
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_values() {
        let policy = EnrollmentPolicy::default();
        assert!((policy.passing_grade - 10.0).abs() < f64::EPSILON);
        assert_eq!(policy.probation_max_units, 14);
        assert_eq!(policy.standard_max_units, 16);
        assert_eq!(policy.max_units, 20);
        assert!(policy.validate().is_ok());
    }

    #[test]
    fn test_is_passing_threshold_inclusive() {
        let policy = EnrollmentPolicy::default();
        assert!(policy.is_passing(10.0));
        assert!(!policy.is_passing(9.99));
    }

    #[test]
    fn test_unit_load_boundaries() {
        let policy = EnrollmentPolicy::default();

        assert!(!policy.exceeds_unit_load(12.0, 14));
        assert!(policy.exceeds_unit_load(11.99, 15));
        assert!(!policy.exceeds_unit_load(16.0, 16));
        assert!(policy.exceeds_unit_load(15.99, 17));
        assert!(policy.exceeds_unit_load(20.0, 21));
        assert!(!policy.exceeds_unit_load(18.0, 20));
        // Middle band applies to 14 as well
        assert!(policy.exceeds_unit_load(14.0, 18));
        assert!(!policy.exceeds_unit_load(14.0, 16));
    }

    #[test]
    fn test_max_units_for_agrees_with_exceeds() {
        let policy = EnrollmentPolicy::default();
        for gpa in [0.0, 11.99, 12.0, 15.99, 16.0, 20.0] {
            let ceiling = policy.max_units_for(gpa);
            assert!(!policy.exceeds_unit_load(gpa, ceiling), "gpa {gpa}");
            assert!(policy.exceeds_unit_load(gpa, ceiling + 1), "gpa {gpa}");
        }
        assert_eq!(policy.max_units_for(11.0), 14);
        assert_eq!(policy.max_units_for(13.0), 16);
        assert_eq!(policy.max_units_for(17.0), 20);
    }

    #[test]
    fn test_validate_rejects_unordered_ceilings() {
        let policy = EnrollmentPolicy {
            standard_max_units: 22,
            ..EnrollmentPolicy::default()
        };
        assert!(policy.validate().is_err());

        let policy = EnrollmentPolicy {
            probation_gpa: 17.0,
            ..EnrollmentPolicy::default()
        };
        assert!(policy.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_non_finite_thresholds() {
        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let policy = EnrollmentPolicy {
                standard_gpa: value,
                ..EnrollmentPolicy::default()
            };
            let err = policy.validate().expect_err("non-finite standard_gpa");
            assert!(err.contains("standard_gpa"), "{err}");

            let policy = EnrollmentPolicy {
                passing_grade: value,
                ..EnrollmentPolicy::default()
            };
            assert!(policy.validate().is_err());
        }
    }
}
