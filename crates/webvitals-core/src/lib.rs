//! # webvitals-core
//!
//! Web Vitals 도메인 모델, 포트(trait) 정의, 집계 로직, 에러 타입.
//! 모든 크레이트가 공유하는 핵심 타입과 인터페이스를 제공한다.
//!
//! ## 구조
//!
//! - [`models`]: 성능 지표 이벤트, 평가 등급, 조회 기간 (serde Serialize/Deserialize)
//! - [`summary`]: 페이지 필터링 및 지표별 평균 집계
//! - [`ports`]: 일자별 이벤트 로그 포트 인터페이스 (async_trait)
//! - [`error`]: 핵심 에러 타입 (thiserror)
//! - [`config`]: 애플리케이션 설정 구조체
//! - [`config_manager`]: 설정 파일 관리 (로드/저장)

pub mod config;
pub mod config_manager;
pub mod error;
pub mod models;
pub mod ports;
pub mod summary;
