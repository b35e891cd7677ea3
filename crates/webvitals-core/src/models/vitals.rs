//! Web Vitals 성능 지표 모델.
//!
//! 브라우저가 보고한 단일 측정값([`MetricEvent`])과
//! 수집 API가 받는 입력 형태([`MetricPayload`])를 정의.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CoreError;

/// 알려진 Web Vitals 지표 이름.
///
/// 목록에 없는 이름도 저장은 허용한다.
pub const KNOWN_METRICS: &[&str] = &["LCP", "FID", "CLS", "FCP", "TTFB", "INP"];

/// 지표 평가 등급
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Rating {
    Good,
    NeedsImprovement,
    Poor,
}

/// 저장된 단일 성능 지표 샘플
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricEvent {
    /// 지표 이름 (예: "LCP", "CLS")
    pub name: String,
    /// 샘플 식별자 (중복 허용)
    pub id: String,
    /// 측정값
    pub value: f64,
    /// 직전 보고 대비 변화량
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delta: Option<f64>,
    /// 평가 등급
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<Rating>,
    /// 내비게이션 유형 (navigate, reload, back-forward 등)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub navigation_type: Option<String>,
    /// 측정된 페이지 경로
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
    /// 브라우저 User-Agent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    /// 측정 시각
    pub timestamp: DateTime<Utc>,
}

/// 일자별 저장 단위 (삽입 순서 유지, 추가 전용)
pub type DailyStore = Vec<MetricEvent>;

/// 수집 API 입력.
///
/// 모든 필드가 선택적이며 [`MetricPayload::into_event`]에서 필수 필드를 검증한다.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricPayload {
    pub name: Option<String>,
    pub id: Option<String>,
    pub value: Option<f64>,
    pub delta: Option<f64>,
    pub rating: Option<Rating>,
    pub navigation_type: Option<String>,
    pub page: Option<String>,
    pub user_agent: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
}

impl MetricPayload {
    /// 필수 필드(`name`, `id`, `value`)를 검증하고 저장 가능한 이벤트로 변환.
    ///
    /// `timestamp`가 없으면 `now`로 채운다.
    pub fn into_event(self, now: DateTime<Utc>) -> Result<MetricEvent, CoreError> {
        let name = required_text("name", self.name)?;
        let id = required_text("id", self.id)?;
        let value = self
            .value
            .ok_or_else(|| CoreError::validation("value", "필수 필드 누락"))?;
        if !value.is_finite() {
            return Err(CoreError::validation("value", "유한한 숫자여야 합니다"));
        }
        if let Some(delta) = self.delta {
            if !delta.is_finite() {
                return Err(CoreError::validation("delta", "유한한 숫자여야 합니다"));
            }
        }

        if !KNOWN_METRICS.contains(&name.as_str()) {
            debug!("알 수 없는 지표 이름: {name}");
        }

        Ok(MetricEvent {
            name,
            id,
            value,
            delta: self.delta,
            rating: self.rating,
            navigation_type: self.navigation_type,
            page: self.page,
            user_agent: self.user_agent,
            timestamp: self.timestamp.unwrap_or(now),
        })
    }
}

fn required_text(field: &str, value: Option<String>) -> Result<String, CoreError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(CoreError::validation(field, "필수 필드 누락")),
    }
}
