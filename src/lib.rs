//! GPA Calculator Library
//!
//! Computes term and cumulative grade-point averages from
//! (grade, credit) pairs:
//! - Letter grades (AA..FF) or raw point values in [0.0, 4.0]
//! - Credit-weighted averaging with defined zero-credit behavior
//! - Merging a term against a previously recorded cumulative GPA
//!
//! The `api` module exposes the calculation over a REST endpoint.

pub mod api;
pub mod config;
pub mod gpa;

pub use config::ServerConfig;
pub use gpa::{
    accumulate, calculate_both_gpa, calculate_cumulative_gpa, calculate_term_gpa, convert_grade,
    Course, GpaError, GpaSummary, Grade, GRADE_SCALE,
};
