//! Input loading: course catalogs (CSV) and student records (TOML)

pub mod catalog_csv;
pub mod student_file;

pub use catalog_csv::{parse_catalog_csv, parse_catalog_str};
pub use student_file::{load_student, save_student, StudentFile};
