//! Catalog model

use super::{Course, Offering};
use std::collections::HashMap;

/// The course catalog and section schedule for one enrollment term
#[derive(Debug, Clone)]
pub struct Catalog {
    /// Catalog name (e.g., "Fall 2026 Schedule")
    pub name: String,

    /// Institution name
    pub institution: String,

    /// Term the offerings are scheduled for
    pub term: String,

    /// Courses indexed by catalog key (PREFIXNUMBER)
    courses: HashMap<String, Course>,

    /// Scheduled sections, in file order
    offerings: Vec<Offering>,
}

impl Catalog {
    /// Create an empty catalog
    ///
    /// # Arguments
    /// * `name` - Catalog name
    /// * `institution` - Institution name
    /// * `term` - Term label for the scheduled offerings
    #[must_use]
    pub fn new(name: String, institution: String, term: String) -> Self {
        Self {
            name,
            institution,
            term,
            courses: HashMap::new(),
            offerings: Vec::new(),
        }
    }

    /// Add a course to the catalog
    ///
    /// # Returns
    /// `true` if the course was added, `false` if a course with that key already exists
    pub fn add_course(&mut self, course: Course) -> bool {
        let key = course.key();
        if self.courses.contains_key(&key) {
            return false;
        }
        self.courses.insert(key, course);
        true
    }

    /// Get a course by its catalog key
    #[must_use]
    pub fn get_course(&self, key: &str) -> Option<&Course> {
        self.courses.get(key)
    }

    /// Get all courses
    #[must_use]
    pub fn courses(&self) -> Vec<&Course> {
        self.courses.values().collect()
    }

    /// Schedule an offering
    pub fn add_offering(&mut self, offering: Offering) {
        self.offerings.push(offering);
    }

    /// All scheduled offerings
    #[must_use]
    pub fn offerings(&self) -> &[Offering] {
        &self.offerings
    }

    /// Find the offering for a course section
    ///
    /// # Arguments
    /// * `course_key` - Catalog key (e.g., "CS2510")
    /// * `section` - Section number
    #[must_use]
    pub fn find_offering(&self, course_key: &str, section: u32) -> Option<&Offering> {
        self.offerings
            .iter()
            .find(|o| o.section == section && o.course.has_key(course_key))
    }

    /// Turn (course key, section) requests into scheduled offerings
    ///
    /// Request order is preserved, and repeated requests are kept as-is so the
    /// enrollment checks can see them.
    ///
    /// # Errors
    /// Returns an error naming the first request with no scheduled offering
    pub fn resolve_requests(&self, requests: &[(String, u32)]) -> Result<Vec<Offering>, String> {
        requests
            .iter()
            .map(|(key, section)| {
                self.find_offering(key, *section)
                    .cloned()
                    .ok_or_else(|| format!("No offering scheduled for {key} section {section}"))
            })
            .collect()
    }

    /// Validate that every prerequisite and every offered course exists
    ///
    /// # Errors
    /// Returns `Err` with a list of messages for every dangling reference
    pub fn validate_course_dependencies(&self) -> Result<(), Vec<String>> {
        let mut invalid = Vec::new();

        for course in self.courses.values() {
            for prereq in &course.prerequisites {
                if self.get_course(prereq).is_none() {
                    invalid.push(format!(
                        "Course '{}': prerequisite '{}' not found",
                        course.key(),
                        prereq
                    ));
                }
            }
        }

        for offering in &self.offerings {
            let key = offering.course.key();
            if self.get_course(&key).is_none() {
                invalid.push(format!(
                    "Offering '{key}-{}': course not in catalog",
                    offering.section
                ));
            }
        }

        if invalid.is_empty() {
            Ok(())
        } else {
            invalid.sort();
            Err(invalid)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::EXAM_TIME_FORMAT;
    use chrono::NaiveDateTime;

    fn exam(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, EXAM_TIME_FORMAT).expect("valid exam time")
    }

    fn sample_catalog() -> Catalog {
        let mut catalog = Catalog::new(
            "Fall 2026".to_string(),
            "Northeastern University".to_string(),
            "2026FA".to_string(),
        );
        let fundies1 = Course::new(
            "Fundamentals of Computer Science 1".to_string(),
            "CS".to_string(),
            "2500".to_string(),
            4,
        );
        let fundies2 = Course::new(
            "Fundamentals of Computer Science 2".to_string(),
            "CS".to_string(),
            "2510".to_string(),
            4,
        )
        .with_prerequisite("CS2500");

        catalog.add_offering(Offering::new(fundies1.clone(), 1, exam("2026-12-10 09:00")));
        catalog.add_offering(Offering::new(fundies2.clone(), 1, exam("2026-12-11 09:00")));
        catalog.add_offering(Offering::new(fundies2.clone(), 2, exam("2026-12-12 09:00")));
        catalog.add_course(fundies1);
        catalog.add_course(fundies2);
        catalog
    }

    #[test]
    fn test_add_and_get_course() {
        let mut catalog = sample_catalog();

        assert_eq!(catalog.courses().len(), 2);
        assert!(catalog.get_course("CS2510").is_some());
        assert!(catalog.get_course("CS9999").is_none());

        let dup = Course::new("Dup".to_string(), "CS".to_string(), "2500".to_string(), 4);
        assert!(!catalog.add_course(dup));
        assert_eq!(
            catalog.get_course("CS2500").map(|c| c.name.as_str()),
            Some("Fundamentals of Computer Science 1")
        );
    }

    #[test]
    fn test_find_offering() {
        let catalog = sample_catalog();

        let section_two = catalog.find_offering("CS2510", 2).expect("section 2 scheduled");
        assert_eq!(section_two.exam_time, exam("2026-12-12 09:00"));
        assert!(catalog.find_offering("CS2510", 3).is_none());
    }

    #[test]
    fn test_resolve_requests_keeps_order_and_repeats() {
        let catalog = sample_catalog();
        let requests = vec![
            ("CS2510".to_string(), 2),
            ("CS2500".to_string(), 1),
            ("CS2510".to_string(), 2),
        ];

        let offerings = catalog.resolve_requests(&requests).expect("all scheduled");
        let keys: Vec<String> = offerings.iter().map(|o| o.course.key()).collect();
        assert_eq!(keys, vec!["CS2510", "CS2500", "CS2510"]);
    }

    #[test]
    fn test_resolve_requests_unknown_section() {
        let catalog = sample_catalog();
        let err = catalog
            .resolve_requests(&[("CS2500".to_string(), 7)])
            .expect_err("section 7 is not scheduled");
        assert_eq!(err, "No offering scheduled for CS2500 section 7");
    }

    #[test]
    fn test_validate_course_dependencies() {
        let mut catalog = sample_catalog();
        assert!(catalog.validate_course_dependencies().is_ok());

        let orphan = Course::new("Theory".to_string(), "CS".to_string(), "3800".to_string(), 4)
            .with_prerequisite("CS1800");
        catalog.add_offering(Offering::new(
            Course::new("Ghost".to_string(), "CS".to_string(), "0000".to_string(), 1),
            1,
            exam("2026-12-13 09:00"),
        ));
        catalog.add_course(orphan);

        let errors = catalog
            .validate_course_dependencies()
            .expect_err("dangling references");
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().any(|e| e.contains("CS1800")));
        assert!(errors.iter().any(|e| e.contains("CS0000-1")));
    }
}
