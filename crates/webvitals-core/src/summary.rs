//! Web Vitals 집계.
//!
//! 일자별 저장소에서 읽은 이벤트를 페이지로 거르고,
//! 지표 이름별 평균값과 등급 분포를 계산한다.
//!
//! 등급 분포는 저장된 이벤트의 `rating`을 그대로 센 값이다.
//! 평균값으로부터 다시 계산하지 않는다.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::period::DateRange;
use crate::models::vitals::{MetricEvent, Rating};

/// 지표별 등급 분포
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingDistribution {
    pub good: u64,
    pub needs_improvement: u64,
    pub poor: u64,
    /// 등급 없이 보고된 샘플 수
    pub unrated: u64,
}

impl RatingDistribution {
    fn record(&mut self, rating: Option<Rating>) {
        match rating {
            Some(Rating::Good) => self.good += 1,
            Some(Rating::NeedsImprovement) => self.needs_improvement += 1,
            Some(Rating::Poor) => self.poor += 1,
            None => self.unrated += 1,
        }
    }
}

/// 단일 지표 집계 결과
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricAverage {
    /// 산술 평균
    pub average: f64,
    /// 샘플 수
    pub count: u64,
    /// 등급 분포
    pub ratings: RatingDistribution,
}

/// 지표 이름 → 집계 결과
pub type MetricAverages = BTreeMap<String, MetricAverage>;

/// 요약 응답의 `metrics` 섹션
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSection {
    /// 집계에 포함된 이벤트 수
    pub total: usize,
    /// 전체 지표별 평균
    pub averages: MetricAverages,
    /// 페이지별 지표 평균
    pub by_page: BTreeMap<String, MetricAverages>,
}

/// 기간 요약 결과 (저장하지 않는 파생 데이터)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VitalsSummary {
    pub period: DateRange,
    pub metrics: MetricsSection,
    /// 관측된 서로 다른 페이지 수
    pub pages: usize,
}

#[derive(Default)]
struct Accumulator {
    sum: f64,
    count: u64,
    ratings: RatingDistribution,
}

impl Accumulator {
    fn push(&mut self, event: &MetricEvent) {
        self.sum += event.value;
        self.count += 1;
        self.ratings.record(event.rating);
    }

    fn finish(self) -> MetricAverage {
        MetricAverage {
            average: self.sum / self.count as f64,
            count: self.count,
            ratings: self.ratings,
        }
    }
}

/// `page`가 주어지면 경로가 정확히 일치하는 이벤트만 남김 (대소문자 구분)
pub fn filter_by_page(events: Vec<MetricEvent>, page: Option<&str>) -> Vec<MetricEvent> {
    match page {
        Some(page) => events
            .into_iter()
            .filter(|e| e.page.as_deref() == Some(page))
            .collect(),
        None => events,
    }
}

/// 지표 이름별 평균. 샘플이 없는 지표는 결과에 나타나지 않는다.
pub fn average_by_metric<'a, I>(events: I) -> MetricAverages
where
    I: IntoIterator<Item = &'a MetricEvent>,
{
    let mut groups: BTreeMap<String, Accumulator> = BTreeMap::new();
    for event in events {
        groups.entry(event.name.clone()).or_default().push(event);
    }
    groups
        .into_iter()
        .map(|(name, acc)| (name, acc.finish()))
        .collect()
}

/// 기간 요약 생성.
///
/// `page`가 없는 이벤트는 전체 합계와 평균에는 포함되지만
/// 페이지별 집계와 페이지 수에서는 제외된다.
pub fn summarize(period: DateRange, events: Vec<MetricEvent>, page: Option<&str>) -> VitalsSummary {
    let events = filter_by_page(events, page);

    let mut per_page: BTreeMap<&str, Vec<&MetricEvent>> = BTreeMap::new();
    for event in &events {
        if let Some(page) = event.page.as_deref() {
            per_page.entry(page).or_default().push(event);
        }
    }

    let by_page = per_page
        .iter()
        .map(|(page, group)| (page.to_string(), average_by_metric(group.iter().copied())))
        .collect();

    VitalsSummary {
        period,
        metrics: MetricsSection {
            total: events.len(),
            averages: average_by_metric(&events),
            by_page,
        },
        pages: per_page.len(),
    }
}
