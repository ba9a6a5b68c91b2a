//! # 차트 데이터 API
//!
//! ## 엔드포인트 목록
//! | 메서드 | 경로 | 핸들러 |
//! |--------|------|--------|
//! | GET | /api/plot/progress | `progress_plot` |
//! | GET | /api/plot/total | `total_plot` |
//! | GET | /api/plot/difficulty-breakdown | `difficulty_breakdown_plot` |
//! | GET | /api/plot/daily-progress | `daily_progress_plot` |
//! | GET | /api/plot/difficulty-total | `difficulty_total_plot` |
//! | GET | /api/plot/difficulty-progress | `difficulty_progress_plot` |
//! | GET | /api/plot/weekly-heatmap | `weekly_heatmap_plot` |
//!
//! 모든 엔드포인트는 `?lang=ru|en`을 받습니다. 없으면 설정의 기본 언어를 씁니다.
//! 요청마다 로그 전체를 다시 읽어 번들을 만듭니다.

use crate::{
    error::AppError,
    models::{Metric, ProgressBundle, WideTable},
    routes::AppState,
    services::{charts, i18n::Locale, pipeline},
};
use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::Value;

/// `?lang=` 쿼리 파라미터
#[derive(Debug, Default, Deserialize)]
pub struct LangQuery {
    pub lang: Option<String>,
}

impl LangQuery {
    /// 요청 언어. 모르는 코드이거나 없으면 `fallback`.
    pub fn locale_or(&self, fallback: Locale) -> Locale {
        self.lang
            .as_deref()
            .and_then(Locale::from_code)
            .unwrap_or(fallback)
    }
}

async fn load(state: &AppState, query: &LangQuery) -> Result<(ProgressBundle, Locale), AppError> {
    let bundle = pipeline::process(state.log_path()).await?;
    Ok((bundle, query.locale_or(state.config.default_locale)))
}

/// 난이도 표 세 개 (easy, medium, hard 순서). `progress`면 진행도 표를 돌려줍니다.
///
/// 난이도 차트는 난이도 컬럼이 있는 로그에서만 만들 수 있습니다.
fn difficulty_tables(bundle: &ProgressBundle, progress: bool) -> Result<[&WideTable; 3], AppError> {
    if !bundle.has_difficulty_data {
        return Err(AppError::DifficultyUnavailable);
    }
    Ok(Metric::DIFFICULTIES.map(|metric| {
        if progress {
            bundle.progress(metric)
        } else {
            bundle.metric(metric)
        }
    }))
}

pub async fn progress_plot(
    State(state): State<AppState>,
    Query(query): Query<LangQuery>,
) -> Result<Json<Value>, AppError> {
    let (bundle, locale) = load(&state, &query).await?;
    Ok(Json(charts::progress_chart(&bundle.progress_total, locale)))
}

pub async fn total_plot(
    State(state): State<AppState>,
    Query(query): Query<LangQuery>,
) -> Result<Json<Value>, AppError> {
    let (bundle, locale) = load(&state, &query).await?;
    Ok(Json(charts::total_chart(&bundle.total, locale)))
}

pub async fn difficulty_breakdown_plot(
    State(state): State<AppState>,
    Query(query): Query<LangQuery>,
) -> Result<Json<Value>, AppError> {
    let (bundle, locale) = load(&state, &query).await?;
    let [easy, medium, hard] = difficulty_tables(&bundle, false)?;
    Ok(Json(charts::difficulty_breakdown_chart(easy, medium, hard, locale)))
}

pub async fn daily_progress_plot(
    State(state): State<AppState>,
    Query(query): Query<LangQuery>,
) -> Result<Json<Value>, AppError> {
    let (bundle, locale) = load(&state, &query).await?;
    Ok(Json(charts::daily_progress_chart(&bundle.total, locale)))
}

pub async fn difficulty_total_plot(
    State(state): State<AppState>,
    Query(query): Query<LangQuery>,
) -> Result<Json<Value>, AppError> {
    let (bundle, locale) = load(&state, &query).await?;
    let [easy, medium, hard] = difficulty_tables(&bundle, false)?;
    Ok(Json(charts::difficulty_total_chart(easy, medium, hard, locale)))
}

pub async fn difficulty_progress_plot(
    State(state): State<AppState>,
    Query(query): Query<LangQuery>,
) -> Result<Json<Value>, AppError> {
    let (bundle, locale) = load(&state, &query).await?;
    let [easy, medium, hard] = difficulty_tables(&bundle, true)?;
    Ok(Json(charts::difficulty_progress_chart(easy, medium, hard, locale)))
}

/// 활동량 히트맵. 감소한 구간은 활동으로 치지 않습니다.
pub async fn weekly_heatmap_plot(
    State(state): State<AppState>,
    Query(query): Query<LangQuery>,
) -> Result<Json<Value>, AppError> {
    let (bundle, locale) = load(&state, &query).await?;
    Ok(Json(charts::weekly_heatmap_chart(&bundle.total, locale)))
}

#[cfg(test)]
mod tests {
    use crate::routes::test_support::{send, test_app, OLD_LOG, SAMPLE_LOG};
    use crate::services::collector::tests::FakeSource;
    use axum::http::StatusCode;
    use tempfile::TempDir;

    fn app_with_log(contents: Option<&str>) -> (TempDir, axum::Router) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("log.csv");
        if let Some(contents) = contents {
            std::fs::write(&path, contents).unwrap();
        }
        let app = test_app(&path, &["a", "b"], FakeSource::with(&[]));
        (dir, app)
    }

    #[tokio::test]
    async fn progress_plot_returns_series() {
        let (_dir, app) = app_with_log(Some(SAMPLE_LOG));
        let (status, body) = send(app, "GET", "/api/plot/progress").await;
        assert_eq!(status, StatusCode::OK);
        let series = body["series"].as_array().unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series[0]["data"][1]["y"], 3.0);
    }

    #[tokio::test]
    async fn lang_query_switches_labels() {
        let (_dir, app) = app_with_log(Some(SAMPLE_LOG));
        let (_, en) = send(app.clone(), "GET", "/api/plot/total?lang=en").await;
        let (_, ru) = send(app, "GET", "/api/plot/total?lang=ru").await;
        assert_eq!(en["title"]["text"], "Total problems solved on LeetCode");
        assert_ne!(en["title"]["text"], ru["title"]["text"]);
    }

    #[tokio::test]
    async fn missing_log_is_no_data() {
        let (_dir, app) = app_with_log(None);
        let (status, body) = send(app, "GET", "/api/plot/total").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "no_data");
    }

    #[tokio::test]
    async fn header_only_log_is_empty() {
        let (_dir, app) = app_with_log(Some("timestamp,username,total_solved\n"));
        let (status, body) = send(app, "GET", "/api/plot/progress").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "empty");
    }

    #[tokio::test]
    async fn corrupt_timestamp_is_processing_error() {
        let (_dir, app) = app_with_log(Some("timestamp,username,total_solved\nnope,a,1\n"));
        let (status, body) = send(app, "GET", "/api/plot/total").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "processing_error");
    }

    #[tokio::test]
    async fn difficulty_plots_need_difficulty_columns() {
        let (_dir, app) = app_with_log(Some(OLD_LOG));
        for uri in [
            "/api/plot/difficulty-breakdown",
            "/api/plot/difficulty-total",
            "/api/plot/difficulty-progress",
        ] {
            let (status, body) = send(app.clone(), "GET", uri).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
            assert_eq!(body["error"]["code"], "no_difficulty_data");
        }
        let (status, _) = send(app, "GET", "/api/plot/total").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn difficulty_breakdown_lists_users() {
        let (_dir, app) = app_with_log(Some(SAMPLE_LOG));
        let (status, body) = send(app, "GET", "/api/plot/difficulty-breakdown").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["xaxis"]["categories"], serde_json::json!(["a", "b"]));
        assert_eq!(body["series"][0]["data"], serde_json::json!([5.0, 2.0]));
    }

    #[tokio::test]
    async fn heatmap_counts_activity() {
        let (_dir, app) = app_with_log(Some(SAMPLE_LOG));
        let (status, body) = send(app, "GET", "/api/plot/weekly-heatmap?lang=en").await;
        assert_eq!(status, StatusCode::OK);
        // a: 월요일 5 → 화요일 12시 8 (+3)
        assert_eq!(body["series"][1]["name"], "Tuesday");
        assert_eq!(body["series"][1]["data"][12]["y"], 3.0);
    }

    #[tokio::test]
    async fn daily_and_difficulty_charts_render() {
        let (_dir, app) = app_with_log(Some(SAMPLE_LOG));
        for uri in [
            "/api/plot/daily-progress",
            "/api/plot/difficulty-total",
            "/api/plot/difficulty-progress",
        ] {
            let (status, body) = send(app.clone(), "GET", uri).await;
            assert_eq!(status, StatusCode::OK, "{uri}");
            assert!(!body["series"].as_array().unwrap().is_empty(), "{uri}");
        }
    }
}
