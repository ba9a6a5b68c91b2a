//! # 스냅샷 모델 정의
//!
//! 스냅샷(Snapshot)은 한 사용자의 풀이 수를 한 시점에 측정한 기록입니다.
//! 수집기가 사용자마다 한 행씩 CSV 로그에 추가하고, 파이프라인이 전체 로그를 읽어
//! 시계열 표로 재구성합니다.
//!
//! ## 로그 스키마
//! ```text
//! timestamp,username,total_solved,easy_solved,medium_solved,hard_solved
//! ```
//! 예전 로그에는 앞의 세 컬럼만 있을 수 있습니다 (난이도 세분화 이전 형식).

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// 새 로그 파일에 기록하는 전체 컬럼 목록
pub const LOG_COLUMNS: [&str; 6] = [
    "timestamp",
    "username",
    "total_solved",
    "easy_solved",
    "medium_solved",
    "hard_solved",
];

/// 난이도 컬럼 세 개. 셋 모두 있어야 난이도 데이터가 있는 것으로 봅니다.
pub const DIFFICULTY_COLUMNS: [&str; 3] = ["easy_solved", "medium_solved", "hard_solved"];

/// 로그에 쓰는 타임스탬프 형식 (마이크로초까지, 타임존 없음)
const WRITE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// 한 사용자의 풀이 수 (전체 + 난이도별)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SolvedCounts {
    pub total: u64,
    pub easy: u64,
    pub medium: u64,
    pub hard: u64,
}

/// 로그에 추가할 측정 한 건
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub timestamp: NaiveDateTime,
    pub username: String,
    pub counts: SolvedCounts,
}

impl Snapshot {
    /// CSV 한 행으로 기록할 필드 목록을 만듭니다. 순서는 `LOG_COLUMNS`와 같습니다.
    pub fn to_record(&self) -> [String; 6] {
        [
            format_timestamp(self.timestamp),
            self.username.clone(),
            self.counts.total.to_string(),
            self.counts.easy.to_string(),
            self.counts.medium.to_string(),
            self.counts.hard.to_string(),
        ]
    }
}

/// 로그에서 읽은 한 행
///
/// 타임스탬프는 아직 문자열입니다. 파싱은 파이프라인이 행 번호와 함께 처리하여
/// 어느 행이 깨졌는지 에러 메시지에 남깁니다.
///
/// 숫자 컬럼이 `Option`인 이유: 빈 칸은 "측정 안 됨"이고, 0은 "0문제 풀이"입니다.
/// 두 상태를 섞으면 안 됩니다.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LogRecord {
    pub timestamp: String,
    pub username: String,
    #[serde(default)]
    pub total_solved: Option<f64>,
    #[serde(default)]
    pub easy_solved: Option<f64>,
    #[serde(default)]
    pub medium_solved: Option<f64>,
    #[serde(default)]
    pub hard_solved: Option<f64>,
}

/// 전체 로그: 헤더의 컬럼 목록과 파일 순서 그대로의 행들
///
/// 파일 순서는 추가 순서이지만 시간순 정렬이 보장되지는 않습니다.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SnapshotLog {
    pub columns: Vec<String>,
    pub records: Vec<LogRecord>,
}

impl SnapshotLog {
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// 난이도 컬럼 세 개가 모두 헤더에 있는지 확인합니다.
    /// 일부만 있는 경우는 지원하지 않으며 "없음"으로 취급합니다.
    pub fn has_difficulty_columns(&self) -> bool {
        DIFFICULTY_COLUMNS.iter().all(|c| self.has_column(c))
    }
}

pub fn format_timestamp(ts: NaiveDateTime) -> String {
    ts.format(WRITE_FORMAT).to_string()
}

/// 로그의 타임스탬프 문자열을 파싱합니다.
///
/// 허용 형식:
/// - `2025-01-15T10:30:00` / `2025-01-15T10:30:00.123456`
/// - `2025-01-15 10:30:00` (공백 구분)
/// - RFC 3339 (`2025-01-15T10:30:00+03:00`) → UTC 기준 naive 시각으로 정규화
/// - `2025-01-15` → 자정
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(ts) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(ts);
        }
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.naive_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}
