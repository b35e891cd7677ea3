//! 애플리케이션 설정 구조체.
//!
//! 웹 서버 포트, 데이터 저장 경로, 조회 기간 제한 등 런타임 설정을 정의한다.
//! [`crate::config_manager::ConfigManager`]를 통해 JSON 파일에서 로드.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 최상위 애플리케이션 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// 웹 서버 설정
    #[serde(default)]
    pub web: WebConfig,
    /// 로컬 저장소 설정
    #[serde(default)]
    pub storage: StorageConfig,
    /// Web Vitals 수집/조회 설정
    #[serde(default)]
    pub vitals: VitalsConfig,
}

// ============================================================
// 웹 서버 설정
// ============================================================

/// 웹 서버 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    /// 웹 서버 포트 (기본: 3100)
    #[serde(default = "default_web_port")]
    pub port: u16,
    /// 외부 접근 허용 여부 (false: 127.0.0.1 only)
    #[serde(default)]
    pub allow_external: bool,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            port: default_web_port(),
            allow_external: false,
        }
    }
}

fn default_web_port() -> u16 {
    3100
}

// ============================================================
// 저장소 설정
// ============================================================

/// 저장소 설정
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// 데이터 디렉토리 (None이면 플랫폼 기본 경로).
    /// 일자별 파일은 `<data_dir>/vitals/YYYY-MM-DD.json`에 저장된다.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

// ============================================================
// Web Vitals 설정
// ============================================================

/// Web Vitals 조회 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VitalsConfig {
    /// `start` 생략 시 `end`로부터 거슬러 올라갈 일수
    #[serde(default = "default_range_days")]
    pub default_range_days: u32,
    /// 한 번에 조회할 수 있는 최대 일수
    #[serde(default = "default_max_range_days")]
    pub max_range_days: u32,
}

impl Default for VitalsConfig {
    fn default() -> Self {
        Self {
            default_range_days: default_range_days(),
            max_range_days: default_max_range_days(),
        }
    }
}

fn default_range_days() -> u32 {
    7
}

fn default_max_range_days() -> u32 {
    366
}

impl AppConfig {
    /// 기본 설정값
    pub fn default_config() -> Self {
        Self {
            web: WebConfig::default(),
            storage: StorageConfig::default(),
            vitals: VitalsConfig::default(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::default_config()
    }
}
