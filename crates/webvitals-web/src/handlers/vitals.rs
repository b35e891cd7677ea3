//! Web Vitals 수집/요약 API 핸들러.

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::Json;
use chrono::Utc;
use serde::Serialize;
use tracing::{debug, warn};
use webvitals_core::models::period::{day_key, DateRange};
use webvitals_core::models::vitals::{MetricEvent, MetricPayload};
use webvitals_core::ports::day_log::DayLog;
use webvitals_core::summary::{summarize, VitalsSummary};

use crate::error::ApiError;
use crate::AppState;

use super::VitalsRangeQuery;

/// 수집 성공 응답
#[derive(Debug, Serialize)]
pub struct CollectResponse {
    pub success: bool,
}

/// 성능 지표 수집
///
/// POST /api/vitals
///
/// `navigator.sendBeacon`은 `text/plain`으로 보내는 경우가 많아
/// Content-Type과 무관하게 본문을 JSON으로 해석한다.
pub async fn collect_vital(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<CollectResponse>, ApiError> {
    let payload: MetricPayload = serde_json::from_slice(&body)
        .map_err(|e| ApiError::BadRequest(format!("잘못된 JSON 본문: {e}")))?;

    let received_at = Utc::now();
    let event = payload.into_event(received_at)?;
    let name = event.name.clone();

    let date = state.day_log.append(event, received_at).await?;
    debug!("지표 수집: {name} → {}", day_key(date));

    Ok(Json(CollectResponse { success: true }))
}

/// 기간 요약 조회
///
/// GET /api/vitals/summary?start=&end=&page=
pub async fn get_summary(
    State(state): State<AppState>,
    Query(params): Query<VitalsRangeQuery>,
) -> Result<Json<VitalsSummary>, ApiError> {
    let period = params.period(Utc::now(), state.vitals.default_range_days)?;

    let max_days = u64::from(state.vitals.max_range_days);
    if period.day_count() > max_days {
        return Err(ApiError::BadRequest(format!(
            "조회 기간이 너무 깁니다: {}일 (최대 {max_days}일)",
            period.day_count()
        )));
    }

    let events = load_range(state.day_log.as_ref(), &period).await;
    Ok(Json(summarize(period, events, params.page.as_deref())))
}

/// 기간 내 모든 일자의 이벤트를 방문 순서대로 이어 붙임.
///
/// 읽을 수 없는 일자는 경고만 남기고 건너뛴다.
pub async fn load_range(day_log: &dyn DayLog, period: &DateRange) -> Vec<MetricEvent> {
    let mut events = Vec::new();
    for date in period.days() {
        match day_log.load_day(date).await {
            Ok(load) => events.extend(load.events),
            Err(e) => warn!("일자 {} 로드 실패, 빈 일자로 처리: {e}", day_key(date)),
        }
    }
    events
}
