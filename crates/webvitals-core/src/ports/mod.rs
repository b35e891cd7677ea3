//! 포트 인터페이스 (Hexagonal Architecture).
//!
//! 구현은 어댑터 crate(`webvitals-storage`)에 둔다.

pub mod day_log;
