//! 조회 기간 모델.
//!
//! 쿼리 문자열로 들어온 시작/종료 시각을 실제 시각으로 해석하고,
//! 기간에 포함되는 UTC 달력 일자를 나열한다.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;

use crate::error::CoreError;

/// 일자 키 형식 (파일 이름에 사용)
pub const DAY_KEY_FORMAT: &str = "%Y-%m-%d";

/// 일자 키 문자열 (YYYY-MM-DD)
pub fn day_key(date: NaiveDate) -> String {
    date.format(DAY_KEY_FORMAT).to_string()
}

/// 해석이 끝난 조회 기간
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// 쿼리 문자열에서 기간 해석.
    ///
    /// - `end` 생략: `now`
    /// - `start` 생략: `end - default_days`
    ///
    /// 파싱할 수 없는 문자열은 `Validation` 에러.
    pub fn resolve(
        start: Option<&str>,
        end: Option<&str>,
        now: DateTime<Utc>,
        default_days: u32,
    ) -> Result<Self, CoreError> {
        let end = match end {
            Some(raw) => parse_instant("end", raw)?,
            None => now,
        };
        let start = match start {
            Some(raw) => parse_instant("start", raw)?,
            None => end - Duration::days(i64::from(default_days)),
        };
        Ok(Self { start, end })
    }

    /// 기간에 포함된 UTC 일자 (양 끝 포함). `start > end`이면 비어 있음.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let last = self.end.date_naive();
        self.start
            .date_naive()
            .iter_days()
            .take_while(move |d| *d <= last)
    }

    /// 기간에 포함된 일자 수
    pub fn day_count(&self) -> u64 {
        let first = self.start.date_naive();
        let last = self.end.date_naive();
        if last < first {
            0
        } else {
            (last - first).num_days() as u64 + 1
        }
    }
}

/// 오프셋이 있지만 초가 생략된 형식 (`2026-10-01T10:00+09:00`)
const OFFSET_MINUTE_FORMAT: &str = "%Y-%m-%dT%H:%M%:z";

/// 오프셋 없는 형식, UTC로 해석 (`datetime-local` 입력 포함)
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// ISO-8601 시각/날짜 해석.
///
/// 오프셋이 없으면 UTC, 날짜만 있으면 UTC 자정으로 본다.
pub fn parse_instant(field: &str, raw: &str) -> Result<DateTime<Utc>, CoreError> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(raw, OFFSET_MINUTE_FORMAT) {
        return Ok(dt.with_timezone(&Utc));
    }
    let utc_local = raw.strip_suffix('Z').unwrap_or(raw);
    if let Some(naive) = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(utc_local, fmt).ok())
    {
        return Ok(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, DAY_KEY_FORMAT)
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| CoreError::validation(field, format!("잘못된 날짜 형식: {raw}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn defaults_to_last_seven_days() {
        let now = Utc.with_ymd_and_hms(2026, 10, 15, 10, 0, 0).unwrap();
        let range = DateRange::resolve(None, None, now, 7).unwrap();
        assert_eq!(range.end, now);
        assert_eq!(range.start, now - Duration::days(7));
        assert_eq!(range.day_count(), 8);
    }

    #[test]
    fn accepts_plain_dates_and_rfc3339() {
        let now = Utc::now();
        let range =
            DateRange::resolve(Some("2026-10-01"), Some("2026-10-03T23:59:59+09:00"), now, 7)
                .unwrap();
        assert_eq!(range.start, Utc.with_ymd_and_hms(2026, 10, 1, 0, 0, 0).unwrap());
        assert_eq!(range.end, Utc.with_ymd_and_hms(2026, 10, 3, 14, 59, 59).unwrap());

        let days: Vec<String> = range.days().map(day_key).collect();
        assert_eq!(days, vec!["2026-10-01", "2026-10-02", "2026-10-03"]);

        let ten = Utc.with_ymd_and_hms(2026, 10, 1, 10, 0, 0).unwrap();
        for raw in [
            "2026-10-01T10:00:00",
            "2026-10-01T10:00:00.000",
            "2026-10-01T10:00",
            "2026-10-01T10:00Z",
            "2026-10-01T10:00:00Z",
            "2026-10-01T19:00+09:00",
        ] {
            assert_eq!(parse_instant("start", raw).unwrap(), ten, "{raw}");
        }
    }

    #[test]
    fn unparseable_dates_are_rejected() {
        let now = Utc::now();
        let err = DateRange::resolve(Some("yesterday"), None, now, 7).unwrap_err();
        assert!(matches!(err, CoreError::Validation { ref field, .. } if field == "start"));

        let err = DateRange::resolve(None, Some("2026-13-45"), now, 7).unwrap_err();
        assert!(matches!(err, CoreError::Validation { ref field, .. } if field == "end"));

        assert!(DateRange::resolve(Some(""), None, now, 7).is_err());
    }

    #[test]
    fn inverted_range_has_no_days() {
        let range = DateRange::new(
            Utc.with_ymd_and_hms(2026, 10, 5, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2026, 10, 1, 0, 0, 0).unwrap(),
        );
        assert_eq!(range.days().count(), 0);
        assert_eq!(range.day_count(), 0);
    }
}
