//! API 핸들러 모듈.

pub mod vitals;

use axum::http::{Method, Uri};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use webvitals_core::models::period::DateRange;

use crate::error::ApiError;

/// 기간 조회 쿼리 파라미터
#[derive(Debug, Default, Deserialize)]
pub struct VitalsRangeQuery {
    /// 시작 시각 (RFC3339 또는 YYYY-MM-DD, 기본: 종료 시각 - 7일)
    pub start: Option<String>,
    /// 종료 시각 (RFC3339 또는 YYYY-MM-DD, 기본: 현재)
    pub end: Option<String>,
    /// 페이지 경로 필터 (정확히 일치)
    pub page: Option<String>,
}

impl VitalsRangeQuery {
    /// 기본값이 적용된 조회 기간
    pub fn period(&self, now: DateTime<Utc>, default_days: u32) -> Result<DateRange, ApiError> {
        Ok(DateRange::resolve(
            self.start.as_deref(),
            self.end.as_deref(),
            now,
            default_days,
        )?)
    }
}

/// 헬스 체크 응답
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// 헬스 체크
///
/// GET /api/health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// 등록된 경로에 허용되지 않은 메서드로 요청한 경우
pub async fn method_not_allowed(method: Method, uri: Uri) -> ApiError {
    ApiError::MethodNotAllowed(format!("{method} {}", uri.path()))
}

/// 등록되지 않은 경로
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(uri.path().to_string())
}
