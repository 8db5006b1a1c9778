//! Data models for `NuEnroll`

pub mod catalog;
pub mod course;
pub mod offering;
pub mod student;
pub mod term;
pub mod transcript;

pub use catalog::Catalog;
pub use course::Course;
pub use offering::{Offering, EXAM_TIME_FORMAT};
pub use student::{CourseSelection, Student, StudentRecord};
pub use term::Term;
pub use transcript::{Grade, Transcript};
