//! API Request/Response Types

use crate::gpa::{Course, GpaSummary};
use serde::{Deserialize, Serialize};

/// API Response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
    pub latency_ms: f64,
    pub timestamp: i64,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T, latency_ms: f64) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            latency_ms,
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}

impl ApiResponse<()> {
    pub fn error(error: ApiError, latency_ms: f64) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
            latency_ms,
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}

/// API Error
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn rate_limited(retry_after: u64) -> Self {
        Self {
            code: "RATE_LIMITED".to_string(),
            message: format!("Rate limit exceeded. Retry after {} seconds", retry_after),
            details: Some(format!("retry_after: {}", retry_after)),
        }
    }
}

// ============================================
// GPA Calculation
// ============================================

#[derive(Debug, Deserialize)]
pub struct CalculateRequest {
    /// Cumulative GPA recorded before this term, in [0.0, 4.0]
    #[serde(default)]
    pub existing_gpa: Option<f64>,
    /// Credits recorded before this term
    #[serde(default)]
    pub existing_credits: u32,
    /// This term's (grade, credit) entries
    pub new_courses: Vec<Course>,
}

#[derive(Debug, Serialize)]
pub struct CalculateData {
    pub term_gpa: f64,
    pub cumulative_gpa: f64,
}

impl From<GpaSummary> for CalculateData {
    fn from(summary: GpaSummary) -> Self {
        Self {
            term_gpa: summary.term_gpa,
            cumulative_gpa: summary.cumulative_gpa,
        }
    }
}

// ============================================
// Grade Scale
// ============================================

#[derive(Debug, Serialize)]
pub struct ScaleData {
    pub scale: Vec<ScaleEntry>,
}

#[derive(Debug, Serialize)]
pub struct ScaleEntry {
    pub letter: String,
    pub points: f64,
}

// ============================================
// Health Check
// ============================================

#[derive(Debug, Serialize)]
pub struct HealthData {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
}
