//! 일자별 JSON 이벤트 로그.
//!
//! 구조: `<base_dir>/vitals/YYYY-MM-DD.json` (이벤트 객체의 JSON 배열)
//!
//! 추가는 파일 전체를 읽고-수정하고-다시 쓰는 방식이다.
//! - 같은 일자에 대한 추가는 일자별 비동기 뮤텍스로 직렬화
//! - 쓰기는 같은 디렉토리의 임시 파일에 기록한 뒤 `rename`으로 교체
//! - 읽기는 잠금을 잡지 않으며 파싱 실패는 빈 일자로 취급
//! - 배열 안의 개별 레코드가 잘못된 경우 그 레코드만 건너뜀

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use serde_json::Value;
use std::sync::Arc;
use tokio::fs;
use tokio::sync::Mutex as AsyncMutex;
use tracing::{debug, error, info, warn};
use uuid::Uuid;
use webvitals_core::error::CoreError;
use webvitals_core::models::period::day_key;
use webvitals_core::models::vitals::MetricEvent;
use webvitals_core::ports::day_log::{DayLoad, DayLog};

/// 일자 파일을 담는 하위 디렉토리
const VITALS_DIR_NAME: &str = "vitals";

/// 파일 기반 일자별 이벤트 로그
pub struct JsonDayLog {
    /// `<base_dir>/vitals`
    vitals_dir: PathBuf,
    /// 일자별 쓰기 잠금
    write_locks: Mutex<HashMap<NaiveDate, Arc<AsyncMutex<()>>>>,
}

impl JsonDayLog {
    /// 새 이벤트 로그 생성
    ///
    /// # Arguments
    /// * `base_dir` - 데이터 디렉토리 (vitals 하위 폴더에 저장)
    pub async fn new(base_dir: impl AsRef<Path>) -> Result<Self, CoreError> {
        let vitals_dir = base_dir.as_ref().join(VITALS_DIR_NAME);
        fs::create_dir_all(&vitals_dir).await.map_err(|e| {
            CoreError::Storage(format!(
                "vitals 디렉토리 생성 실패: {}: {e}",
                vitals_dir.display()
            ))
        })?;

        info!("Web Vitals 저장소 초기화: {}", vitals_dir.display());

        Ok(Self {
            vitals_dir,
            write_locks: Mutex::new(HashMap::new()),
        })
    }

    /// 일자 파일 디렉토리
    pub fn vitals_dir(&self) -> &Path {
        &self.vitals_dir
    }

    /// 일자 파일 경로
    pub fn day_path(&self, date: NaiveDate) -> PathBuf {
        self.vitals_dir.join(format!("{}.json", day_key(date)))
    }

    /// 일자별 쓰기 잠금. 새 일자를 등록할 때 아무도 잡고 있지 않은 지난 잠금은 정리
    fn write_lock(&self, date: NaiveDate) -> Arc<AsyncMutex<()>> {
        let mut locks = self.write_locks.lock();
        if !locks.contains_key(&date) {
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
        }
        locks
            .entry(date)
            .or_insert_with(|| Arc::new(AsyncMutex::new(())))
            .clone()
    }

    async fn read_day(&self, date: NaiveDate) -> Result<DayLoad, CoreError> {
        let path = self.day_path(date);

        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(DayLoad::empty()),
            Err(e) => {
                return Err(CoreError::Storage(format!(
                    "일자 파일 읽기 실패: {}: {e}",
                    path.display()
                )))
            }
        };

        let records = match serde_json::from_slice::<Value>(&bytes) {
            Ok(Value::Array(records)) => records,
            Ok(_) => return Ok(self.corrupt_day(date, "최상위 값이 배열이 아님".to_string())),
            Err(e) => return Ok(self.corrupt_day(date, e.to_string())),
        };

        let mut events = Vec::with_capacity(records.len());
        for (index, record) in records.into_iter().enumerate() {
            match serde_json::from_value::<MetricEvent>(record) {
                Ok(event) => events.push(event),
                Err(e) => warn!("잘못된 레코드 건너뜀: {} [{index}]: {e}", day_key(date)),
            }
        }

        Ok(DayLoad {
            events,
            was_corrupt: false,
        })
    }

    fn corrupt_day(&self, date: NaiveDate, reason: String) -> DayLoad {
        let err = CoreError::CorruptData {
            key: day_key(date),
            reason,
        };
        warn!("{err}, 빈 저장소로 취급");
        DayLoad::corrupt()
    }

    async fn write_day(&self, date: NaiveDate, events: &[MetricEvent]) -> Result<(), CoreError> {
        let path = self.day_path(date);
        let tmp_path = self
            .vitals_dir
            .join(format!(".{}.{}.tmp", day_key(date), Uuid::new_v4().simple()));

        let content = serde_json::to_vec_pretty(events)?;

        fs::write(&tmp_path, &content).await.map_err(|e| {
            CoreError::Storage(format!("임시 파일 저장 실패: {}: {e}", tmp_path.display()))
        })?;

        if let Err(e) = fs::rename(&tmp_path, &path).await {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(CoreError::Storage(format!(
                "일자 파일 교체 실패: {}: {e}",
                path.display()
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl DayLog for JsonDayLog {
    async fn load_day(&self, date: NaiveDate) -> Result<DayLoad, CoreError> {
        self.read_day(date).await
    }

    async fn append(
        &self,
        event: MetricEvent,
        received_at: DateTime<Utc>,
    ) -> Result<NaiveDate, CoreError> {
        let date = received_at.date_naive();
        let lock = self.write_lock(date);
        let _guard = lock.lock().await;

        let DayLoad {
            mut events,
            was_corrupt,
        } = self.read_day(date).await?;
        if was_corrupt {
            warn!("손상된 일자 파일을 새 저장소로 덮어씀: {}", day_key(date));
        }

        events.push(event);
        if let Err(e) = self.write_day(date, &events).await {
            error!("Web Vitals 저장 실패: {e}");
            return Err(e);
        }

        debug!("Web Vitals 저장: {} ({}건)", day_key(date), events.len());
        Ok(date)
    }
}
