//! Course model

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

/// Represents a catalog course
///
/// Two courses are the same course when their catalog keys match; name, units,
/// and prerequisites are attributes of that identity and do not take part in
/// equality or hashing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    /// Course name (e.g., "Fundamentals of Computer Science 2")
    pub name: String,

    /// Course prefix (e.g., "MATH", "CS")
    pub prefix: String,

    /// Course number (e.g., "1342", "2510")
    pub number: String,

    /// Credit units (positive)
    pub units: u32,

    /// Prerequisites - stored as catalog keys (e.g., "CS2500")
    pub prerequisites: Vec<String>,

    /// Display names of prerequisites, by catalog key
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub prerequisite_names: BTreeMap<String, String>,
}

impl Course {
    /// Create a new course
    ///
    /// # Arguments
    /// * `name` - Full course name
    /// * `prefix` - Course prefix
    /// * `number` - Course number
    /// * `units` - Credit units
    #[must_use]
    pub const fn new(name: String, prefix: String, number: String, units: u32) -> Self {
        Self {
            name,
            prefix,
            number,
            units,
            prerequisites: Vec::new(),
            prerequisite_names: BTreeMap::new(),
        }
    }

    /// Get the catalog key (prefix + number)
    ///
    /// # Returns
    /// A string in the format "PREFIXNUMBER" (e.g., "CS2510")
    #[must_use]
    pub fn key(&self) -> String {
        format!("{}{}", self.prefix, self.number)
    }

    /// Add a prerequisite by catalog key
    pub fn add_prerequisite(&mut self, prereq_key: String) {
        if !self.prerequisites.contains(&prereq_key) {
            self.prerequisites.push(prereq_key);
        }
    }

    /// Builder-style variant of [`add_prerequisite`](Self::add_prerequisite)
    #[must_use]
    pub fn with_prerequisite(mut self, prereq_key: impl Into<String>) -> Self {
        self.add_prerequisite(prereq_key.into());
        self
    }

    /// Record the display name of a prerequisite
    pub fn name_prerequisite(&mut self, prereq_key: &str, name: String) {
        if self.prerequisites.iter().any(|p| p == prereq_key) {
            self.prerequisite_names.insert(prereq_key.to_string(), name);
        }
    }

    /// Display name of a prerequisite, or its key when the name is unknown
    #[must_use]
    pub fn prerequisite_name<'a>(&'a self, prereq_key: &'a str) -> &'a str {
        self.prerequisite_names
            .get(prereq_key)
            .map_or(prereq_key, String::as_str)
    }

    /// Whether this course is identified by `key`
    #[must_use]
    pub fn has_key(&self, key: &str) -> bool {
        self.key() == key
    }
}

impl PartialEq for Course {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Course {}

impl Hash for Course {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn fundies_two() -> Course {
        Course::new(
            "Fundamentals of Computer Science 2".to_string(),
            "CS".to_string(),
            "2510".to_string(),
            4,
        )
    }

    #[test]
    fn test_course_creation() {
        let course = fundies_two();

        assert_eq!(course.name, "Fundamentals of Computer Science 2");
        assert_eq!(course.prefix, "CS");
        assert_eq!(course.number, "2510");
        assert_eq!(course.units, 4);
        assert!(course.prerequisites.is_empty());
    }

    #[test]
    fn test_course_key() {
        let course = fundies_two();
        assert_eq!(course.key(), "CS2510");
        assert!(course.has_key("CS2510"));
        assert!(!course.has_key("CS25100"));
        assert!(!course.has_key("CS2500"));
    }

    #[test]
    fn test_add_prerequisite() {
        let mut course = fundies_two();

        course.add_prerequisite("CS2500".to_string());
        assert_eq!(course.prerequisites, vec!["CS2500".to_string()]);

        // Adding duplicate should not duplicate
        course.add_prerequisite("CS2500".to_string());
        assert_eq!(course.prerequisites.len(), 1);
    }

    #[test]
    fn test_prerequisite_name_falls_back_to_key() {
        let mut course = fundies_two()
            .with_prerequisite("CS2500")
            .with_prerequisite("CS1800");
        course.name_prerequisite("CS2500", "Fundamentals of Computer Science 1".to_string());
        course.name_prerequisite("MATH1341", "Calculus 1".to_string());

        assert_eq!(
            course.prerequisite_name("CS2500"),
            "Fundamentals of Computer Science 1"
        );
        assert_eq!(course.prerequisite_name("CS1800"), "CS1800");
        // Names are only kept for actual prerequisites
        assert!(!course.prerequisite_names.contains_key("MATH1341"));
    }

    #[test]
    fn test_equality_is_catalog_identity() {
        let a = fundies_two();
        let mut b = fundies_two().with_prerequisite("CS2500");
        b.name = "Fundies 2".to_string();
        b.units = 5;

        assert_eq!(a, b);

        let mut set = HashSet::new();
        set.insert(a);
        assert!(!set.insert(b));

        let other = Course::new(
            "Discrete Structures".to_string(),
            "CS".to_string(),
            "1800".to_string(),
            4,
        );
        assert!(set.insert(other));
    }
}
