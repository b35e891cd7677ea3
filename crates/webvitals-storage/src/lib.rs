//! # webvitals-storage
//!
//! 로컬 저장소 어댑터.
//! UTC 일자별 JSON 파일에 Web Vitals 이벤트를 누적 저장한다.
//!
//! ## 모듈
//! - `day_log`: 일자별 이벤트 로그 (DayLog 구현)

pub mod day_log;

pub use day_log::JsonDayLog;
