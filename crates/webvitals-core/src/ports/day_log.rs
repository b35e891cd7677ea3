//! 일자별 이벤트 로그 포트.
//!
//! 구현: `webvitals-storage` crate (`JsonDayLog`)
//!
//! ## 동시성 계약
//! - 같은 일자 키에 대한 `append`는 구현체가 직렬화한다. 동시에 들어온
//!   이벤트가 서로를 덮어써 유실되지 않아야 한다.
//! - `load_day`는 잠금 없이 동시에 호출될 수 있다. 쓰기 도중의 파일을
//!   읽더라도 손상된 데이터로 취급할 뿐 실패하지 않는다.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use crate::error::CoreError;
use crate::models::vitals::{DailyStore, MetricEvent};

/// 일자별 로드 결과
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DayLoad {
    /// 저장된 이벤트 (삽입 순서)
    pub events: DailyStore,
    /// 저장된 내용을 파싱하지 못해 빈 저장소로 대체했는지 여부
    pub was_corrupt: bool,
}

impl DayLoad {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn corrupt() -> Self {
        Self {
            events: Vec::new(),
            was_corrupt: true,
        }
    }
}

/// 추가 전용 일자별 이벤트 로그
#[async_trait]
pub trait DayLog: Send + Sync {
    /// 일자 저장소 로드.
    ///
    /// 파일이 없으면 빈 결과, 파싱 실패 시 빈 결과 + `was_corrupt`.
    /// 그 외 I/O 실패만 `CoreError::Storage`로 반환한다.
    async fn load_day(&self, date: NaiveDate) -> Result<DayLoad, CoreError>;

    /// `received_at`의 UTC 일자 저장소에 이벤트 추가.
    ///
    /// 저장된 일자 키를 반환한다.
    async fn append(
        &self,
        event: MetricEvent,
        received_at: DateTime<Utc>,
    ) -> Result<NaiveDate, CoreError>;
}
