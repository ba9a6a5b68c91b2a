//! # 진행도 파이프라인
//!
//! 스냅샷 로그 전체를 읽어 차트/통계 생산자들이 소비하는 표 번들을 만듭니다.
//!
//! ## 처리 순서
//! 1. 로그 전체 로딩 (`NotFound` / `Empty`는 저장소에서 그대로 전파)
//! 2. 행 검증: 타임스탬프 파싱 실패, 빈 사용자 이름, 음수/소수 풀이 수는
//!    한 행이라도 있으면 `Processing` 에러 (건너뛰지 않음)
//! 3. 스키마 감지: 난이도 컬럼 세 개가 모두 있어야 난이도 데이터 있음
//! 4. 지표별 와이드 표로 재구성 (중복 `(타임스탬프, 사용자)`는 마지막 행 우선)
//! 5. total 표가 비어 있으면 `Empty`
//! 6. 지표별 진행도 표 계산
//!
//! 캐시는 없습니다. 호출할 때마다 로그 전체를 새로 읽고 계산합니다.

use crate::db;
use crate::error::PipelineError;
use crate::models::{parse_timestamp, LogRecord, Metric, ProgressBundle, SnapshotLog, WideTable};
use chrono::NaiveDateTime;
use std::path::Path;

/// 로그 파일을 읽어 진행도 번들을 만듭니다.
pub async fn process(log_path: &Path) -> Result<ProgressBundle, PipelineError> {
    let log = db::load_all(log_path).await?;
    let bundle = build_bundle(&log)?;
    tracing::debug!(
        rows = log.records.len(),
        timestamps = bundle.total.timestamps().len(),
        users = bundle.total.columns().len(),
        has_difficulty_data = bundle.has_difficulty_data,
        "processed progress log"
    );
    Ok(bundle)
}

/// 이미 로딩된 로그로 번들을 만듭니다. 로그 자체는 변경하지 않습니다.
pub fn build_bundle(log: &SnapshotLog) -> Result<ProgressBundle, PipelineError> {
    if log.records.is_empty() {
        return Err(PipelineError::Empty);
    }

    let rows = parse_rows(&log.records)?;
    let has_difficulty_data = log.has_difficulty_columns();

    // 난이도 컬럼이 없는 로그라면 난이도 표는 빈 표로 둡니다.
    let [total, easy, medium, hard] = Metric::ALL.map(|metric| {
        if metric == Metric::Total || has_difficulty_data {
            pivot(&rows, metric)
        } else {
            WideTable::default()
        }
    });
    if total.is_empty() {
        return Err(PipelineError::Empty);
    }

    Ok(ProgressBundle {
        progress_total: total.progress(),
        progress_easy: easy.progress(),
        progress_medium: medium.progress(),
        progress_hard: hard.progress(),
        total,
        easy,
        medium,
        hard,
        has_difficulty_data,
    })
}

/// 타임스탬프가 파싱된 행
struct ParsedRow<'a> {
    timestamp: NaiveDateTime,
    record: &'a LogRecord,
}

fn parse_rows(records: &[LogRecord]) -> Result<Vec<ParsedRow<'_>>, PipelineError> {
    records
        .iter()
        .enumerate()
        .map(|(i, record)| {
            // 헤더가 1행이므로 데이터는 2행부터
            let line = i + 2;
            let timestamp = parse_timestamp(&record.timestamp).ok_or_else(|| {
                PipelineError::Processing(format!(
                    "line {line}: invalid timestamp {:?}",
                    record.timestamp
                ))
            })?;
            if record.username.is_empty() {
                return Err(PipelineError::Processing(format!(
                    "line {line}: missing username"
                )));
            }
            for value in [
                record.total_solved,
                record.easy_solved,
                record.medium_solved,
                record.hard_solved,
            ]
            .into_iter()
            .flatten()
            {
                // 풀이 수는 0 이상의 정수여야 합니다. NaN/inf도 여기서 걸러집니다.
                if !value.is_finite() || value < 0.0 || value.fract() != 0.0 {
                    return Err(PipelineError::Processing(format!(
                        "line {line}: invalid count {value}"
                    )));
                }
            }
            Ok(ParsedRow { timestamp, record })
        })
        .collect()
}

fn metric_value(record: &LogRecord, metric: Metric) -> Option<f64> {
    match metric {
        Metric::Total => record.total_solved,
        Metric::Easy => record.easy_solved,
        Metric::Medium => record.medium_solved,
        Metric::Hard => record.hard_solved,
    }
}

/// 한 지표의 와이드 표. 값이 비어 있는 행은 이 지표에 기여하지 않습니다.
fn pivot(rows: &[ParsedRow<'_>], metric: Metric) -> WideTable {
    WideTable::from_observations(rows.iter().filter_map(|row| {
        metric_value(row.record, metric)
            .map(|value| (row.timestamp, row.record.username.clone(), value))
    }))
}
