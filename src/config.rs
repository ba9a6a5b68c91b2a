//! # 애플리케이션 설정(Configuration) 모듈
//!
//! 환경변수에서 트래커 설정값을 읽어오는 모듈입니다.
//! `.env` 파일이나 시스템 환경변수에서 값을 가져옵니다.
//!
//! 설정 항목:
//! - `TRACKED_USERNAMES`: 추적할 LeetCode 사용자 목록 (쉼표 구분)
//! - `PROGRESS_LOG_PATH`: 스냅샷 CSV 로그 경로
//! - `LEETCODE_GRAPHQL_URL`: LeetCode GraphQL 엔드포인트
//! - `REQUEST_TIMEOUT_SECS`: 외부 요청 타임아웃 (초)
//! - `DEFAULT_LANGUAGE`: 차트 라벨 기본 언어 (`ru` 또는 `en`)
//! - `STATIC_DIR`: 대시보드 정적 파일 디렉토리
//! - `HOST`, `PORT`: 서버 바인딩 주소

use crate::services::i18n::Locale;
use std::env;

/// 기본 추적 대상 사용자
const DEFAULT_USERNAMES: &str = "iris0o,NG7";

/// 애플리케이션 전체 설정을 담는 구조체
///
/// 서버 시작 시 환경변수에서 한 번 읽어온 후,
/// 요청 핸들러와 수집기(collector)가 공유합니다.
#[derive(Debug, Clone)]
pub struct Config {
    /// 추적 대상 사용자 목록 (대소문자 구분)
    pub usernames: Vec<String>,
    /// 스냅샷 로그 CSV 파일 경로
    pub log_path: String,
    /// LeetCode GraphQL API 주소
    pub graphql_url: String,
    /// 외부 HTTP 요청 타임아웃 (초)
    pub request_timeout_secs: u64,
    /// `?lang=`이 없는 요청에 적용할 언어
    pub default_locale: Locale,
    /// 대시보드 정적 파일 디렉토리
    pub static_dir: String,
    /// 서버가 바인딩할 호스트 주소 (기본값: "0.0.0.0")
    pub host: String,
    /// 서버 포트 번호 (기본값: 8000)
    pub port: u16,
}

impl Config {
    /// 환경변수에서 설정값을 읽어 Config 인스턴스를 생성합니다.
    ///
    /// 모든 항목에 기본값이 있으므로 환경변수가 하나도 없어도 동작합니다.
    /// 숫자 항목은 파싱에 실패하면 기본값을 사용합니다.
    pub fn from_env() -> Self {
        Self {
            usernames: parse_usernames(
                &env::var("TRACKED_USERNAMES").unwrap_or_else(|_| DEFAULT_USERNAMES.to_string()),
            ),
            log_path: env::var("PROGRESS_LOG_PATH")
                .unwrap_or_else(|_| "leetcode_progress.csv".to_string()),
            graphql_url: env::var("LEETCODE_GRAPHQL_URL")
                .unwrap_or_else(|_| "https://leetcode.com/graphql".to_string()),
            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            default_locale: env::var("DEFAULT_LANGUAGE")
                .ok()
                .and_then(|v| Locale::from_code(&v))
                .unwrap_or_default(),
            static_dir: env::var("STATIC_DIR").unwrap_or_else(|_| "static".to_string()),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()
                .unwrap_or(8000),
        }
    }
}

/// 쉼표로 구분된 사용자 목록을 파싱합니다.
///
/// 앞뒤 공백은 제거하고, 빈 항목은 버립니다. 대소문자는 그대로 유지합니다.
pub fn parse_usernames(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}
