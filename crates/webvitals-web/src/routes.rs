//! API 라우트 정의.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers;
use crate::AppState;

/// API 라우트 생성
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health))
        // 성능 지표 수집
        .route(
            "/vitals",
            post(handlers::vitals::collect_vital).fallback(handlers::method_not_allowed),
        )
        // 기간 요약
        .route(
            "/vitals/summary",
            get(handlers::vitals::get_summary).fallback(handlers::method_not_allowed),
        )
}
