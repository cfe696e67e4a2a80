//! GPA Calculation Module
//! Grade-to-point conversion and credit-weighted averaging
//!
//! All functions here are pure: no I/O, no shared mutable state,
//! safe for unsynchronized concurrent calls.

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

lazy_static! {
    /// Fixed letter-grade scale. Process-wide constant, read-only.
    pub static ref GRADE_SCALE: HashMap<&'static str, f64> = {
        let mut m = HashMap::new();
        m.insert("AA", 4.0);
        m.insert("BA", 3.5);
        m.insert("BB", 3.0);
        m.insert("CB", 2.5);
        m.insert("CC", 2.0);
        m.insert("DC", 1.5);
        m.insert("DD", 1.0);
        m.insert("FF", 0.0);
        m
    };
}

/// A grade as it arrives at the boundary: either a letter token
/// ("AA", "cb", " bb ") or a raw point value in [0.0, 4.0].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Grade {
    Points(f64),
    Letter(String),
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Grade::Letter(s) => write!(f, "{}", s),
            Grade::Points(v) => write!(f, "{}", v),
        }
    }
}

/// One (grade, credit) entry in a term.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub grade: Grade,
    /// Credit hours. Non-negative by construction.
    pub credit: u32,
}

impl Course {
    pub fn new(grade: Grade, credit: u32) -> Self {
        Self { grade, credit }
    }
}

/// Term GPA plus updated cumulative GPA. Neither value is rounded;
/// display formatting is left to callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GpaSummary {
    pub term_gpa: f64,
    pub cumulative_gpa: f64,
}

/// Error raised by the calculation core
#[derive(Debug, Clone, PartialEq)]
pub enum GpaError {
    /// Grade token is neither a known letter grade nor a numeric
    /// value within [0.0, 4.0]. Carries the original token text,
    /// pre-normalization, for diagnostic display.
    InvalidGrade(String),
}

impl fmt::Display for GpaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpaError::InvalidGrade(token) => write!(f, "Invalid grade input: {}", token),
        }
    }
}

impl std::error::Error for GpaError {}

/// Map a grade token to its point value.
///
/// Text is trimmed and upper-cased before lookup in [`GRADE_SCALE`].
/// Unmatched text falls back to a numeric parse; values within
/// [0.0, 4.0] inclusive pass through unchanged.
pub fn convert_grade(grade: &Grade) -> Result<f64, GpaError> {
    let invalid = || GpaError::InvalidGrade(grade.to_string());

    let value = match grade {
        Grade::Points(v) => *v,
        Grade::Letter(text) => {
            let normalized = text.trim().to_uppercase();
            if let Some(points) = GRADE_SCALE.get(normalized.as_str()) {
                return Ok(*points);
            }
            normalized.parse::<f64>().map_err(|_| invalid())?
        }
    };

    if (0.0..=4.0).contains(&value) {
        Ok(value)
    } else {
        Err(invalid())
    }
}

/// Accumulate raw weighted sums over a batch of courses.
///
/// Returns (total points, total credits). The cumulative merger needs
/// these sums directly, not just the averaged ratio. The first invalid
/// grade aborts the whole batch. Credits are summed in `u64` so a batch
/// of maximal per-course credits cannot overflow the total.
pub fn accumulate(courses: &[Course]) -> Result<(f64, u64), GpaError> {
    let mut total_points = 0.0;
    let mut total_credits = 0u64;

    for course in courses {
        let points = convert_grade(&course.grade)?;
        total_points += points * course.credit as f64;
        total_credits += course.credit as u64;
    }

    Ok((total_points, total_credits))
}

/// Credit-weighted average over a batch of courses.
///
/// Zero total credits (empty batch, or every entry zero-credit) is a
/// defined edge case returning 0.0, not an error.
pub fn calculate_term_gpa(courses: &[Course]) -> Result<f64, GpaError> {
    let (points, credits) = accumulate(courses)?;
    Ok(weighted_ratio(points, credits))
}

/// Merge a prior (GPA, credits) snapshot with a new term's courses.
pub fn calculate_cumulative_gpa(
    existing_gpa: f64,
    existing_credits: u32,
    new_courses: &[Course],
) -> Result<f64, GpaError> {
    let prev_points = existing_gpa * existing_credits as f64;
    let (new_points, new_credits) = accumulate(new_courses)?;
    Ok(weighted_ratio(
        prev_points + new_points,
        existing_credits as u64 + new_credits,
    ))
}

/// Compute both the term GPA and the updated cumulative GPA.
///
/// Accumulates the new courses once and derives both values from the
/// same sums. A missing `existing_gpa`, or `existing_credits == 0`,
/// means there is no history to merge: the cumulative GPA equals the
/// term GPA and any weightless `existing_gpa` value is discarded.
pub fn calculate_both_gpa(
    existing_gpa: Option<f64>,
    existing_credits: u32,
    new_courses: &[Course],
) -> Result<GpaSummary, GpaError> {
    let (new_points, new_credits) = accumulate(new_courses)?;
    let term_gpa = weighted_ratio(new_points, new_credits);

    let cumulative_gpa = match existing_gpa {
        Some(gpa) if existing_credits > 0 => {
            let prev_points = gpa * existing_credits as f64;
            weighted_ratio(prev_points + new_points, existing_credits as u64 + new_credits)
        }
        _ => term_gpa,
    };

    Ok(GpaSummary {
        term_gpa,
        cumulative_gpa,
    })
}

#[inline]
fn weighted_ratio(points: f64, credits: u64) -> f64 {
    if credits == 0 {
        0.0
    } else {
        points / credits as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn letter(token: &str, credit: u32) -> Course {
        Course::new(Grade::Letter(token.to_string()), credit)
    }

    #[test]
    fn test_letter_grade_conversion() {
        assert_eq!(convert_grade(&Grade::Letter("AA".into())).unwrap(), 4.0);
        assert_eq!(convert_grade(&Grade::Letter("BA".into())).unwrap(), 3.5);
        assert_eq!(convert_grade(&Grade::Letter("FF".into())).unwrap(), 0.0);
    }

    #[test]
    fn test_conversion_normalizes_case_and_whitespace() {
        assert_eq!(convert_grade(&Grade::Letter("ff".into())).unwrap(), 0.0);
        assert_eq!(convert_grade(&Grade::Letter("  cb ".into())).unwrap(), 2.5);
    }

    #[test]
    fn test_numeric_grades_pass_through() {
        assert_eq!(convert_grade(&Grade::Points(3.75)).unwrap(), 3.75);
        assert_eq!(convert_grade(&Grade::Letter("3.75".into())).unwrap(), 3.75);
        // Inclusive bounds
        assert_eq!(convert_grade(&Grade::Points(0.0)).unwrap(), 0.0);
        assert_eq!(convert_grade(&Grade::Points(4.0)).unwrap(), 4.0);
    }

    #[test]
    fn test_invalid_grades_rejected() {
        for bad in ["5.0", "XX", "", "-1"] {
            let err = convert_grade(&Grade::Letter(bad.into())).unwrap_err();
            assert_eq!(err, GpaError::InvalidGrade(bad.to_string()));
        }
        assert!(convert_grade(&Grade::Points(4.01)).is_err());
        assert!(convert_grade(&Grade::Points(-0.5)).is_err());
    }

    #[test]
    fn test_error_preserves_original_token() {
        let err = convert_grade(&Grade::Letter("  zz ".into())).unwrap_err();
        assert_eq!(err.to_string(), "Invalid grade input:   zz ");
    }

    #[test]
    fn test_term_gpa_weighted_average() {
        let courses = vec![letter("AA", 3), letter("BB", 3)];
        assert_eq!(calculate_term_gpa(&courses).unwrap(), 3.5);
    }

    #[test]
    fn test_term_gpa_zero_credits() {
        assert_eq!(calculate_term_gpa(&[]).unwrap(), 0.0);
        let weightless = vec![letter("AA", 0), letter("BB", 0)];
        assert_eq!(calculate_term_gpa(&weightless).unwrap(), 0.0);
    }

    #[test]
    fn test_both_without_history() {
        let summary = calculate_both_gpa(None, 0, &[letter("AA", 3)]).unwrap();
        assert_eq!(summary.term_gpa, 4.0);
        assert_eq!(summary.cumulative_gpa, 4.0);
    }

    #[test]
    fn test_both_merges_history() {
        let summary = calculate_both_gpa(Some(3.0), 30, &[letter("AA", 3)]).unwrap();
        assert_eq!(summary.term_gpa, 4.0);
        let expected = (3.0 * 30.0 + 4.0 * 3.0) / 33.0;
        assert!((summary.cumulative_gpa - expected).abs() < 1e-12);
    }

    #[test]
    fn test_zero_credit_history_is_discarded() {
        // existing_gpa present but weightless counts as no history
        let summary = calculate_both_gpa(Some(3.5), 0, &[letter("BB", 3)]).unwrap();
        assert_eq!(summary.term_gpa, 3.0);
        assert_eq!(summary.cumulative_gpa, 3.0);
    }

    #[test]
    fn test_empty_term_keeps_cumulative() {
        let summary = calculate_both_gpa(Some(3.2), 60, &[]).unwrap();
        assert_eq!(summary.term_gpa, 0.0);
        assert_eq!(summary.cumulative_gpa, 3.2);
    }

    #[test]
    fn test_credit_totals_survive_u32_max_sums() {
        // Per-course credits max out u32; the sums must not wrap
        let courses = vec![letter("AA", u32::MAX), letter("CC", 1)];
        let (points, credits) = accumulate(&courses).unwrap();
        assert_eq!(credits, u32::MAX as u64 + 1);

        let expected = points / credits as f64;
        assert_eq!(calculate_term_gpa(&courses).unwrap(), expected);
        assert!(expected > 3.99 && expected < 4.0, "GPA was {}", expected);

        let summary = calculate_both_gpa(Some(4.0), u32::MAX, &courses).unwrap();
        assert!(
            summary.cumulative_gpa > 3.99 && summary.cumulative_gpa <= 4.0,
            "Cumulative was {}",
            summary.cumulative_gpa
        );
    }

    #[test]
    fn test_invalid_entry_aborts_batch() {
        let courses = vec![letter("AA", 3), letter("XX", 3), letter("BB", 3)];
        let err = calculate_term_gpa(&courses).unwrap_err();
        assert_eq!(err, GpaError::InvalidGrade("XX".to_string()));

        let err = calculate_both_gpa(Some(3.0), 30, &courses).unwrap_err();
        assert!(matches!(err, GpaError::InvalidGrade(_)));
    }
}
