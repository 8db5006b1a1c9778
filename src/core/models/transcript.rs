//! Transcript model

use super::{Course, Term};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Grade points earned in a course (0-20 scale)
pub type Grade = f64;

/// A student's grades, grouped by term
///
/// Every check that asks "has the student passed X" must look across all
/// terms, so the per-term grouping is only kept for reporting.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    terms: BTreeMap<Term, HashMap<Course, Grade>>,
}

impl Transcript {
    /// Create an empty transcript
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a grade for a course in a term
    ///
    /// A second grade for the same course in the same term replaces the first.
    pub fn record(&mut self, term: Term, course: Course, grade: Grade) {
        self.terms.entry(term).or_default().insert(course, grade);
    }

    /// Iterate over every (term, course, grade) entry
    pub fn entries(&self) -> impl Iterator<Item = (&Term, &Course, Grade)> {
        self.terms.iter().flat_map(|(term, grades)| {
            grades
                .iter()
                .map(move |(course, grade)| (term, course, *grade))
        })
    }

    /// Terms present in the transcript, in label order
    pub fn terms(&self) -> impl Iterator<Item = &Term> {
        self.terms.keys()
    }

    /// Grades recorded for a single term
    #[must_use]
    pub fn term(&self, term: &Term) -> Option<&HashMap<Course, Grade>> {
        self.terms.get(term)
    }

    /// Whether no grades are recorded at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.values().all(HashMap::is_empty)
    }

    /// Number of graded entries across all terms
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.terms.values().map(HashMap::len).sum()
    }

    /// Total units attempted across all terms
    #[must_use]
    pub fn total_units(&self) -> u32 {
        self.entries().map(|(_, course, _)| course.units).sum()
    }

    /// Catalog keys of every course passed in any term
    ///
    /// # Arguments
    /// * `passing_grade` - Lowest grade that counts as a pass
    #[must_use]
    pub fn passed_course_keys(&self, passing_grade: Grade) -> HashSet<String> {
        self.entries()
            .filter(|(_, _, grade)| *grade >= passing_grade)
            .map(|(_, course, _)| course.key())
            .collect()
    }

    /// Unit-weighted grade point average over the whole transcript
    ///
    /// # Returns
    /// `None` when the transcript carries no units
    #[must_use]
    pub fn gpa(&self) -> Option<f64> {
        let (points, units) = self
            .entries()
            .fold((0.0, 0u32), |(points, units), (_, course, grade)| {
                (
                    grade.mul_add(f64::from(course.units), points),
                    units + course.units,
                )
            });

        if units == 0 {
            None
        } else {
            Some(points / f64::from(units))
        }
    }
}
