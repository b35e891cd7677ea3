//! Web Vitals 핵심 에러 타입.
//!
//! 어댑터 crate는 자체 에러 타입에서 `CoreError`를 변환해 사용한다.

use thiserror::Error;

/// 코어 레이어 에러.
///
/// - `Validation`: 잘못된 입력. 호출자에게 4xx로 전달되며 재시도하지 않음
/// - `Storage`: 파일 시스템 읽기/쓰기 실패. 5xx로 전달
/// - `CorruptData`: 저장된 JSON 파싱 실패. 저장소 내부에서 빈 데이터로 복구
#[derive(Debug, Error)]
pub enum CoreError {
    /// 필드 유효성 검증 실패
    #[error("유효성 검증 실패 ({field}): {message}")]
    Validation {
        /// 검증 실패한 필드명
        field: String,
        /// 실패 사유
        message: String,
    },

    /// 저장소 I/O 실패 (디스크, 권한 등)
    #[error("저장소 에러: {0}")]
    Storage(String),

    /// 저장된 데이터 파싱 실패
    #[error("손상된 데이터 ({key}): {reason}")]
    CorruptData {
        /// 손상된 일자 키 (YYYY-MM-DD)
        key: String,
        /// 파싱 실패 사유
        reason: String,
    },

    /// JSON 직렬화/역직렬화 실패
    #[error("직렬화 에러: {0}")]
    Serialization(#[from] serde_json::Error),

    /// 설정값 오류
    #[error("설정 에러: {0}")]
    Config(String),
}

impl CoreError {
    /// 필드 검증 에러 생성 헬퍼
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// 호출자 입력 문제인지 여부 (4xx 계열)
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_display_names_field() {
        let err = CoreError::validation("name", "필수 필드 누락");
        assert!(err.to_string().contains("name"));
        assert!(err.is_client_error());
    }

    #[test]
    fn storage_is_server_error() {
        let err = CoreError::Storage("permission denied".to_string());
        assert!(!err.is_client_error());
    }
}
