//! # 스냅샷 수집기
//!
//! 설정된 사용자마다 통계 소스를 호출하고, 성공한 사용자마다 로그에 한 행을 추가합니다.
//! 한 사용자가 실패해도 나머지 사용자는 계속 시도합니다.
//! 한 번의 수집(batch)에 속한 행은 모두 같은 타임스탬프를 가집니다.

use crate::db;
use crate::models::{format_timestamp, Snapshot, SolvedCounts};
use crate::services::leetcode::StatsSource;
use chrono::NaiveDateTime;
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Clone, Serialize)]
pub struct CollectedUser {
    pub username: String,
    #[serde(flatten)]
    pub counts: SolvedCounts,
}

#[derive(Debug, Clone, Serialize)]
pub struct FailedUser {
    pub username: String,
    pub reason: String,
}

/// 수집 결과 요약
#[derive(Debug, Clone, Serialize)]
pub struct CollectionReport {
    pub timestamp: String,
    pub collected: Vec<CollectedUser>,
    pub failed: Vec<FailedUser>,
}

impl CollectionReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// 모든 사용자에 대해 한 번 수집합니다.
///
/// 통계 조회 실패와 로그 쓰기 실패 모두 해당 사용자의 `failed` 항목이 되며,
/// 함수 자체는 실패하지 않습니다.
pub async fn collect_all(
    source: &dyn StatsSource,
    log_path: &Path,
    usernames: &[String],
    now: NaiveDateTime,
) -> CollectionReport {
    tracing::info!(users = usernames.len(), at = %now, "starting collection");

    let mut collected = Vec::new();
    let mut failed = Vec::new();

    for username in usernames {
        let counts = match source.fetch(username).await {
            Ok(counts) => counts,
            Err(e) => {
                tracing::warn!(%username, error = %e, "failed to fetch stats");
                failed.push(FailedUser {
                    username: username.clone(),
                    reason: e.to_string(),
                });
                continue;
            }
        };

        let snapshot = Snapshot {
            timestamp: now,
            username: username.clone(),
            counts,
        };
        match db::append(log_path, &snapshot).await {
            Ok(()) => {
                tracing::info!(
                    %username,
                    total = counts.total,
                    easy = counts.easy,
                    medium = counts.medium,
                    hard = counts.hard,
                    "snapshot recorded"
                );
                collected.push(CollectedUser {
                    username: username.clone(),
                    counts,
                });
            }
            Err(e) => {
                tracing::error!(%username, error = %e, "failed to append snapshot");
                failed.push(FailedUser {
                    username: username.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    tracing::info!(
        collected = collected.len(),
        failed = failed.len(),
        "collection finished"
    );

    CollectionReport {
        timestamp: format_timestamp(now),
        collected,
        failed,
    }
}
