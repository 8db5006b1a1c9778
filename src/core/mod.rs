//! Core module: domain models, enrollment rules, and input loading

pub mod enrollment;
pub mod loader;
pub mod models;

/// Returns the current version of the `NuEnroll` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
