//! # webvitals-app
//!
//! Web Vitals 수집 서버 바이너리 진입점.
//! 설정 로드, 저장소/웹 서버 와이어링, 라이프사이클 관리.

mod lifecycle;

use anyhow::{Context, Result};
use clap::Parser;
use directories::ProjectDirs;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use webvitals_core::config::AppConfig;
use webvitals_core::config_manager::ConfigManager;
use webvitals_storage::JsonDayLog;
use webvitals_web::WebServer;

use crate::lifecycle::LifecycleManager;

/// Web Vitals 수집/요약 서버
#[derive(Parser, Debug)]
#[command(name = "webvitals")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// 설정 파일 경로 (기본: 플랫폼 설정 디렉토리의 config.json)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// 데이터 저장 경로 (설정 파일 값보다 우선)
    #[arg(long, short = 'd')]
    data_dir: Option<PathBuf>,

    /// 웹 서버 포트 (설정 파일 값보다 우선)
    #[arg(long, short = 'p')]
    port: Option<u16>,

    /// 외부 접근 허용 (0.0.0.0 바인드)
    #[arg(long)]
    allow_external: bool,

    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, short = 'l', default_value = "info")]
    log_level: String,
}

/// 데이터 디렉토리 결정 (CLI 인자 → 설정 파일 → 플랫폼별 기본 경로)
///
/// # 플랫폼별 기본 경로:
/// - macOS: `~/Library/Application Support/com.webvitals.server/`
/// - Windows: `%APPDATA%\webvitals\server\data\`
/// - Linux: `~/.local/share/webvitals/`
fn resolve_data_dir(cli: Option<PathBuf>, config: &AppConfig) -> PathBuf {
    cli.or_else(|| config.storage.data_dir.clone())
        .or_else(|| {
            ProjectDirs::from("com", "webvitals", "server").map(|p| p.data_dir().to_path_buf())
        })
        .unwrap_or_else(|| PathBuf::from("./data"))
}

/// CLI 인자로 설정 덮어쓰기
fn apply_overrides(mut config: AppConfig, args: &Args) -> AppConfig {
    if let Some(port) = args.port {
        config.web.port = port;
    }
    if args.allow_external {
        config.web.allow_external = true;
    }
    config
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_filter = format!(
        "webvitals={},webvitals_app={},webvitals_core={},webvitals_storage={},webvitals_web={},tower_http={}",
        args.log_level, args.log_level, args.log_level, args.log_level, args.log_level, args.log_level
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_filter)),
        )
        .init();

    let config_manager = match &args.config {
        Some(path) => ConfigManager::with_path(path.clone()),
        None => ConfigManager::new(),
    }
    .context("설정 로드 실패")?;
    info!("설정 파일: {}", config_manager.config_path().display());

    let config = apply_overrides(config_manager.get(), &args);
    let data_dir = resolve_data_dir(args.data_dir.clone(), &config);

    let day_log = Arc::new(
        JsonDayLog::new(&data_dir)
            .await
            .with_context(|| format!("저장소 초기화 실패: {}", data_dir.display()))?,
    );

    let lifecycle = LifecycleManager::new();
    let server = WebServer::new(day_log, config.web.clone())
        .with_vitals_config(config.vitals.clone());
    info!("Web Vitals 서버: {}", server.url());

    let shutdown_rx = lifecycle.subscribe();
    let server_handle = tokio::spawn(async move {
        if let Err(e) = server.run(shutdown_rx).await {
            error!("웹 서버 오류: {e}");
        }
    });

    info!("Web Vitals 서버 실행 중 (Ctrl+C로 종료)");
    lifecycle.wait_for_signal().await;

    if let Err(e) = server_handle.await {
        error!("웹 서버 태스크 종료 실패: {e}");
    }

    info!("Web Vitals 서버 종료");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["webvitals"];
        argv.extend_from_slice(extra);
        Args::parse_from(argv)
    }

    #[test]
    fn cli_overrides_config_values() {
        let config = apply_overrides(
            AppConfig::default_config(),
            &args(&["--port", "8088", "--allow-external"]),
        );
        assert_eq!(config.web.port, 8088);
        assert!(config.web.allow_external);
    }

    #[test]
    fn config_values_kept_without_flags() {
        let config = apply_overrides(AppConfig::default_config(), &args(&[]));
        assert_eq!(config.web.port, 3100);
        assert!(!config.web.allow_external);
    }

    #[test]
    fn data_dir_priority() {
        let mut config = AppConfig::default_config();
        config.storage.data_dir = Some(PathBuf::from("/srv/vitals"));

        assert_eq!(
            resolve_data_dir(Some(PathBuf::from("/tmp/cli")), &config),
            PathBuf::from("/tmp/cli")
        );
        assert_eq!(resolve_data_dir(None, &config), PathBuf::from("/srv/vitals"));
    }
}
