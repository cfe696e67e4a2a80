//! API Request Handlers

use axum::{
    extract::{Json, State},
    http::StatusCode,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

use super::types::*;
use crate::gpa::{self, GRADE_SCALE};

/// Shared application state
pub struct AppState {
    pub start_time: Instant,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================
// Health Check
// ============================================

pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<ApiResponse<HealthData>> {
    let start = Instant::now();

    let data = HealthData {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime_seconds(),
    };

    Json(ApiResponse::success(
        data,
        start.elapsed().as_secs_f64() * 1000.0,
    ))
}

// ============================================
// GPA Calculation
// ============================================

pub async fn calculate(
    Json(req): Json<CalculateRequest>,
) -> Result<Json<ApiResponse<CalculateData>>, (StatusCode, Json<ApiResponse<()>>)> {
    let start = Instant::now();

    // Validate prior GPA range; credit non-negativity is enforced by u32
    if let Some(gpa) = req.existing_gpa {
        if !(0.0..=4.0).contains(&gpa) {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error(
                    ApiError::bad_request("existing_gpa must be between 0.0 and 4.0"),
                    start.elapsed().as_secs_f64() * 1000.0,
                )),
            ));
        }
    }

    let summary = gpa::calculate_both_gpa(req.existing_gpa, req.existing_credits, &req.new_courses)
        .map_err(|e| {
            warn!("Calculation rejected: {}", e);
            (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error(
                    ApiError::bad_request(e.to_string()),
                    start.elapsed().as_secs_f64() * 1000.0,
                )),
            )
        })?;

    info!(
        courses = req.new_courses.len(),
        term_gpa = summary.term_gpa,
        cumulative_gpa = summary.cumulative_gpa,
        "GPA calculated"
    );

    Ok(Json(ApiResponse::success(
        summary.into(),
        start.elapsed().as_secs_f64() * 1000.0,
    )))
}

// ============================================
// Grade Scale
// ============================================

pub async fn get_scale() -> Json<ApiResponse<ScaleData>> {
    let start = Instant::now();

    let mut scale: Vec<ScaleEntry> = GRADE_SCALE
        .iter()
        .map(|(letter, points)| ScaleEntry {
            letter: letter.to_string(),
            points: *points,
        })
        .collect();
    // HashMap order is unstable; present highest grade first
    scale.sort_by(|a, b| b.points.total_cmp(&a.points));

    Json(ApiResponse::success(
        ScaleData { scale },
        start.elapsed().as_secs_f64() * 1000.0,
    ))
}
