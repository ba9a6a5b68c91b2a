//! # 통계 요약 API
//!
//! `GET /api/stats` → 설정된 사용자마다 최신 풀이 수와 시작 대비 진행도
//!
//! 로그에 아직 없는 사용자도 0으로 채워 응답에 포함합니다.

use crate::{error::AppError, models::ProgressBundle, routes::AppState, services::pipeline};
use axum::{extract::State, Json};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UserStats {
    pub total_solved: u64,
    pub progress_from_start: i64,
    pub easy_solved: u64,
    pub medium_solved: u64,
    pub hard_solved: u64,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub stats: BTreeMap<String, UserStats>,
    /// total 표의 마지막 타임스탬프 (ISO-8601)
    pub last_update: Option<String>,
    pub total_users: usize,
    pub has_difficulty_data: bool,
}

/// 번들에서 한 사용자의 요약을 뽑습니다. 표에 없는 사용자는 모두 0입니다.
pub fn user_stats(bundle: &ProgressBundle, username: &str) -> UserStats {
    UserStats {
        total_solved: bundle.total.latest_value(username) as u64,
        progress_from_start: bundle.progress_total.latest_value(username) as i64,
        easy_solved: bundle.easy.latest_value(username) as u64,
        medium_solved: bundle.medium.latest_value(username) as u64,
        hard_solved: bundle.hard.latest_value(username) as u64,
    }
}

pub async fn get_stats(State(state): State<AppState>) -> Result<Json<StatsResponse>, AppError> {
    let bundle = pipeline::process(state.log_path()).await?;

    let stats = state
        .config
        .usernames
        .iter()
        .map(|user| (user.clone(), user_stats(&bundle, user)))
        .collect();

    Ok(Json(StatsResponse {
        stats,
        last_update: bundle
            .total
            .last_timestamp()
            .map(|ts| ts.format("%Y-%m-%dT%H:%M:%S").to_string()),
        total_users: state.config.usernames.len(),
        has_difficulty_data: bundle.has_difficulty_data,
    }))
}
