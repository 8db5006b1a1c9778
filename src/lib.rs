//! Shared library for `NuEnroll`
//! Enrollment rule checking used by the CLI and integration tests

pub mod config;
pub mod core;
pub mod logger;

pub use crate::core::get_version;
