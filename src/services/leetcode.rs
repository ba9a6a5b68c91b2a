//! # LeetCode 통계 소스
//!
//! 사용자 이름으로 LeetCode GraphQL API를 호출하여 난이도별 풀이 수를 가져옵니다.
//! 재시도는 하지 않습니다. 실패하면 그 사용자만 실패로 보고합니다.
//!
//! `StatsSource` 트레이트 뒤에 숨겨 두어서, 수집기와 `/api/update` 테스트에서는
//! 네트워크 없이 가짜 구현을 씁니다.

use crate::models::SolvedCounts;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use thiserror::Error;

/// 사용자 프로필의 풀이 통계 쿼리
const USER_PROFILE_QUERY: &str = r#"
    query getUserProfile($username: String!) {
      matchedUser(username: $username) {
        submitStats: submitStatsGlobal {
          acSubmissionNum {
            difficulty
            count
          }
        }
      }
    }
"#;

#[derive(Debug, Error)]
pub enum FetchError {
    /// `matchedUser`가 null: 그런 사용자가 없음
    #[error("user '{0}' not found")]
    UserNotFound(String),

    /// 연결 실패, 타임아웃, 4xx/5xx 응답
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// 예상과 다른 응답 형태
    #[error("unexpected response: {0}")]
    InvalidResponse(String),
}

/// 사용자별 풀이 수를 알려주는 외부 소스
#[async_trait]
pub trait StatsSource: Send + Sync {
    async fn fetch(&self, username: &str) -> Result<SolvedCounts, FetchError>;
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    data: Option<ProfileData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProfileData {
    matched_user: Option<MatchedUser>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MatchedUser {
    submit_stats: SubmitStats,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubmitStats {
    ac_submission_num: Vec<DifficultyCount>,
}

#[derive(Debug, Deserialize)]
struct DifficultyCount {
    difficulty: String,
    count: u64,
}

/// GraphQL 응답 본문을 풀이 수로 변환합니다.
///
/// 난이도 이름은 대소문자를 구분하지 않습니다 (`All`, `Easy`, `Medium`, `Hard`).
/// 응답에 없는 난이도는 0입니다.
fn counts_from_response(username: &str, body: GraphQlResponse) -> Result<SolvedCounts, FetchError> {
    let user = body
        .data
        .and_then(|d| d.matched_user)
        .ok_or_else(|| FetchError::UserNotFound(username.to_string()))?;

    let mut counts = SolvedCounts::default();
    for item in user.submit_stats.ac_submission_num {
        match item.difficulty.to_ascii_lowercase().as_str() {
            "all" => counts.total = item.count,
            "easy" => counts.easy = item.count,
            "medium" => counts.medium = item.count,
            "hard" => counts.hard = item.count,
            _ => {}
        }
    }
    Ok(counts)
}

/// reqwest 기반 LeetCode GraphQL 클라이언트
pub struct LeetCodeClient {
    url: String,
    client: reqwest::Client,
}

impl LeetCodeClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("leetrack/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            url: url.into(),
            client,
        })
    }
}

#[async_trait]
impl StatsSource for LeetCodeClient {
    async fn fetch(&self, username: &str) -> Result<SolvedCounts, FetchError> {
        let payload = json!({
            "query": USER_PROFILE_QUERY,
            "variables": { "username": username }
        });

        let body: GraphQlResponse = self
            .client
            .post(&self.url)
            .json(&payload)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .map_err(|e| FetchError::InvalidResponse(e.to_string()))?;

        counts_from_response(username, body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> GraphQlResponse {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn maps_difficulties_to_counts() {
        let body = parse(
            r#"{"data":{"matchedUser":{"submitStats":{"acSubmissionNum":[
                {"difficulty":"All","count":120},
                {"difficulty":"Easy","count":70},
                {"difficulty":"Medium","count":40},
                {"difficulty":"Hard","count":10}
            ]}}}}"#,
        );
        let counts = counts_from_response("iris0o", body).unwrap();
        assert_eq!(
            counts,
            SolvedCounts { total: 120, easy: 70, medium: 40, hard: 10 }
        );
    }

    #[test]
    fn missing_difficulties_default_to_zero() {
        let body = parse(
            r#"{"data":{"matchedUser":{"submitStats":{"acSubmissionNum":[
                {"difficulty":"All","count":3}
            ]}}}}"#,
        );
        let counts = counts_from_response("a", body).unwrap();
        assert_eq!(counts.total, 3);
        assert_eq!(counts.hard, 0);
    }

    #[test]
    fn null_matched_user_is_not_found() {
        let body = parse(r#"{"data":{"matchedUser":null}}"#);
        let err = counts_from_response("ghost", body).unwrap_err();
        assert!(matches!(err, FetchError::UserNotFound(ref u) if u == "ghost"));
    }

    #[test]
    fn missing_data_is_not_found() {
        let body = parse(r#"{"errors":[{"message":"boom"}]}"#);
        assert!(matches!(
            counts_from_response("a", body),
            Err(FetchError::UserNotFound(_))
        ));
    }

    #[test]
    fn client_builds_with_timeout() {
        assert!(LeetCodeClient::new("http://localhost:9", Duration::from_secs(1)).is_ok());
    }
}
