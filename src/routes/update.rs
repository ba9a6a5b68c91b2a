//! # 데이터 갱신 API
//!
//! `POST /api/update` → 수집기를 즉시 한 번 실행합니다.
//!
//! 일부 사용자만 실패해도 200을 돌려주고, `success: false`와 `failed` 목록으로 알립니다.

use crate::{routes::AppState, services::collector};
use axum::{extract::State, Json};
use chrono::Local;
use serde_json::{json, Value};

pub async fn update_data(State(state): State<AppState>) -> Json<Value> {
    let now = Local::now().naive_local();
    let report = collector::collect_all(
        state.source.as_ref(),
        state.log_path(),
        &state.config.usernames,
        now,
    )
    .await;

    let message = if report.is_success() {
        "Data updated successfully"
    } else if report.collected.is_empty() {
        "Failed to update data"
    } else {
        "Data partially updated"
    };

    Json(json!({
        "success": report.is_success(),
        "message": message,
        "timestamp": report.timestamp,
        "collected": report.collected,
        "failed": report.failed,
    }))
}

#[cfg(test)]
mod tests {
    use crate::routes::test_support::{send, test_app};
    use crate::services::collector::tests::FakeSource;
    use axum::http::StatusCode;
    use tempfile::TempDir;

    #[tokio::test]
    async fn update_appends_and_feeds_the_pipeline() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("log.csv");
        let app = test_app(&path, &["a", "b"], FakeSource::with(&[("a", 12), ("b", 4)]));

        let (status, body) = send(app.clone(), "POST", "/api/update").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["collected"].as_array().unwrap().len(), 2);
        assert_eq!(body["collected"][0]["total"], 12);

        let (status, stats) = send(app, "GET", "/api/stats").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(stats["stats"]["a"]["total_solved"], 12);
        assert_eq!(stats["stats"]["a"]["progress_from_start"], 0);
    }

    #[tokio::test]
    async fn update_reports_failed_users() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("log.csv");
        let app = test_app(&path, &["a", "ghost"], FakeSource::with(&[("a", 1)]));

        let (status, body) = send(app, "POST", "/api/update").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Data partially updated");
        assert_eq!(body["failed"][0]["username"], "ghost");
    }
}
