//! # 라우트 핸들러 모듈
//!
//! HTTP 요청을 처리하는 핸들러 함수들과 라우터 구성입니다.
//!
//! 각 하위 모듈:
//! - `health`: 서버 상태 확인
//! - `plots`: 차트 설정(JSON) 엔드포인트
//! - `stats`: 사용자별 최신 통계 요약
//! - `update`: 수집기 즉시 실행

pub mod health;
pub mod plots;
pub mod stats;
pub mod update;

pub use health::*;
pub use plots::*;
pub use stats::*;
pub use update::*;

use crate::{config::Config, services::leetcode::StatsSource};
use axum::{
    routing::{get, post},
    Router,
};
use std::{path::Path, sync::Arc};
use tower_http::services::{ServeDir, ServeFile}; // 정적 파일 서빙 서비스

/// 애플리케이션 공유 상태
///
/// 요청 사이에 공유되는 가변 상태는 없습니다. 표 번들은 요청마다 새로 만듭니다.
#[derive(Clone)]
pub struct AppState {
    /// 시작 시 읽은 설정
    pub config: Arc<Config>,
    /// `/api/update`가 사용하는 통계 소스
    pub source: Arc<dyn StatsSource>,
}

impl AppState {
    pub fn log_path(&self) -> &Path {
        Path::new(&self.config.log_path)
    }
}

/// `/api` 아래의 모든 라우트를 구성합니다.
///
/// 대시보드 정적 파일은 `with_dashboard`, 미들웨어는 `main`에서 덧붙입니다.
pub fn api_router(state: AppState) -> Router {
    let plot_routes = Router::new()
        .route("/plot/progress", get(progress_plot))
        .route("/plot/total", get(total_plot))
        .route("/plot/difficulty-breakdown", get(difficulty_breakdown_plot))
        .route("/plot/daily-progress", get(daily_progress_plot))
        .route("/plot/difficulty-total", get(difficulty_total_plot))
        .route("/plot/difficulty-progress", get(difficulty_progress_plot))
        .route("/plot/weekly-heatmap", get(weekly_heatmap_plot));

    let api_routes = Router::new()
        .merge(plot_routes)
        .route("/stats", get(get_stats))
        .route("/update", post(update_data))
        .route("/health", get(health_check))
        .with_state(state);

    Router::new().nest("/api", api_routes)
}

/// 대시보드 정적 파일을 라우터에 붙입니다.
///
/// - `/static/*` → `static_dir` 아래 파일 (예: `/static/js/app.js` → `static_dir/js/app.js`)
/// - `/` → `static_dir/index.html`
///
/// 디렉토리가 없으면 API만 서빙합니다.
pub fn with_dashboard(router: Router, static_dir: &Path) -> Router {
    if !static_dir.exists() {
        tracing::warn!(
            "Static directory {} not found, serving API only",
            static_dir.display()
        );
        return router;
    }

    tracing::info!("Serving dashboard static files from {}", static_dir.display());
    router
        // nest_service: "/static" 접두사를 떼고 나머지 경로로 ServeDir에서 파일을 찾습니다.
        .nest_service("/static", ServeDir::new(static_dir))
        .route_service("/", ServeFile::new(static_dir.join("index.html")))
}

#[cfg(test)]
mod tests {
    use super::test_support::test_app;
    use super::*;
    use crate::services::collector::tests::FakeSource;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tempfile::TempDir;
    use tower::ServiceExt;

    async fn get_text(app: Router, uri: &str) -> (StatusCode, String) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8_lossy(&body).into_owned())
    }

    fn dashboard_app(dir: &TempDir) -> Router {
        let static_dir = dir.path().join("static");
        std::fs::create_dir_all(static_dir.join("js")).unwrap();
        std::fs::write(static_dir.join("js").join("app.js"), "loadCharts();").unwrap();
        std::fs::write(static_dir.join("index.html"), "<h1>dashboard</h1>").unwrap();
        let api = test_app(&dir.path().join("log.csv"), &[], FakeSource::with(&[]));
        with_dashboard(api, &static_dir)
    }

    #[tokio::test]
    async fn static_assets_are_served_under_static_prefix() {
        let dir = TempDir::new().unwrap();
        let (status, body) = get_text(dashboard_app(&dir), "/static/js/app.js").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "loadCharts();");
    }

    #[tokio::test]
    async fn root_serves_dashboard_index() {
        let dir = TempDir::new().unwrap();
        let (status, body) = get_text(dashboard_app(&dir), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "<h1>dashboard</h1>");
    }

    #[tokio::test]
    async fn api_routes_still_win_with_dashboard_mounted() {
        let dir = TempDir::new().unwrap();
        let (status, body) = get_text(dashboard_app(&dir), "/api/health").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("ok"));
    }

    #[tokio::test]
    async fn missing_static_dir_serves_api_only() {
        let dir = TempDir::new().unwrap();
        let api = test_app(&dir.path().join("log.csv"), &[], FakeSource::with(&[]));
        let app = with_dashboard(api, &dir.path().join("absent"));
        let (status, _) = get_text(app, "/static/js/app.js").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::services::{collector::tests::FakeSource, i18n::Locale};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::Value;
    use std::path::Path;
    use tower::ServiceExt;

    pub fn test_config(log_path: &Path, usernames: &[&str]) -> Config {
        Config {
            usernames: usernames.iter().map(|s| s.to_string()).collect(),
            log_path: log_path.to_string_lossy().into_owned(),
            graphql_url: "http://127.0.0.1:9/graphql".to_string(),
            request_timeout_secs: 1,
            default_locale: Locale::En,
            static_dir: "static".to_string(),
            host: "127.0.0.1".to_string(),
            port: 0,
        }
    }

    pub fn test_app(log_path: &Path, usernames: &[&str], source: FakeSource) -> Router {
        api_router(AppState {
            config: Arc::new(test_config(log_path, usernames)),
            source: Arc::new(source),
        })
    }

    /// 요청 하나를 보내고 (상태 코드, JSON 본문)을 돌려줍니다.
    pub async fn send(app: Router, method: &str, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&body).unwrap())
    }

    pub const SAMPLE_LOG: &str = "timestamp,username,total_solved,easy_solved,medium_solved,hard_solved\n\
        2025-01-06T10:00:00,a,5,3,1,1\n\
        2025-01-07T12:00:00,a,8,5,2,1\n\
        2025-01-06T10:00:00,b,2,2,0,0\n";

    pub const OLD_LOG: &str = "timestamp,username,total_solved\n\
        2024-06-01T10:00:00,a,5\n\
        2024-06-02T10:00:00,a,7\n";
}
