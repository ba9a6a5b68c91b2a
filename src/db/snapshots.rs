//! # 스냅샷 로그 저장소
//!
//! 추가 전용(append-only) CSV 로그를 다루는 함수들입니다.
//! 행을 수정하거나 삭제하는 함수는 없습니다.
//!
//! ## 계약
//! - `append`: 파일이 없으면 6개 컬럼 헤더와 함께 만들고, 한 행을 추가합니다.
//!   이미 있는 파일이면 그 파일의 헤더 순서와 너비에 맞춰 씁니다.
//! - `load_all`: 전체 로그를 파일 순서대로 읽습니다.
//!   파일이 없으면 `NotFound`, 헤더만 있으면 `Empty`입니다.
//!
//! 잠금은 하지 않습니다. 쓰기 빈도가 낮고 한 줄 단위 추가라서
//! 읽기와 쓰기가 겹치는 경우는 감수합니다.

use crate::error::PipelineError;
use crate::models::{LogRecord, Snapshot, SnapshotLog, LOG_COLUMNS};
use std::io::ErrorKind; // io 에러 종류 (NotFound 구분용)
use std::path::Path; // 파일 경로 참조 타입
use tokio::fs::{self, OpenOptions}; // 비동기 파일 시스템 작업 (std::fs의 비동기 버전)
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader}; // 비동기 읽기/쓰기 확장 트레이트

/// 스냅샷 한 건을 로그 끝에 추가합니다.
///
/// 파일이 없거나 비어 있으면 헤더를 먼저 씁니다. 부모 디렉토리도 필요하면 만듭니다.
/// 기존 파일의 헤더가 예전 형식(`timestamp,username,total_solved`)이면
/// 그 세 컬럼만 기록하고 난이도 값은 버립니다. 헤더보다 넓은 행을 쓰면
/// 다시 읽을 수 없기 때문입니다.
///
/// # 에러
/// - 쓰기/권한 에러: `PipelineError::Io`
/// - 헤더에 모르는 컬럼이 있거나 `timestamp`/`username`이 없음: `PipelineError::Processing`
pub async fn append(path: &Path, snapshot: &Snapshot) -> Result<(), PipelineError> {
    // 부모 디렉토리가 없으면 만듭니다 (mkdir -p와 같음).
    // 경로가 파일 이름뿐이면 parent()가 빈 경로를 돌려주므로 건너뜁니다.
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }
    }

    // create(true) + append(true): 없으면 만들고, 있으면 끝에 이어 씁니다.
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await?;

    // 비어 있는 파일이면 새 헤더를 쓰고, 아니면 기존 헤더를 읽어옵니다.
    let existing = if file.metadata().await?.len() == 0 {
        None
    } else {
        Some(read_header(path).await?)
    };

    // 레코드 직렬화(따옴표 처리 등)는 csv 크레이트에 맡기고, 완성된 바이트를 한 번에 씁니다.
    // Vec<u8>을 버퍼로 쓰는 Writer라서 실제 파일 I/O는 아래 write_all 한 번뿐입니다.
    let mut writer = csv::Writer::from_writer(Vec::new());
    let record = snapshot.to_record();
    match existing {
        None => {
            writer.write_record(LOG_COLUMNS)?;
            writer.write_record(&record)?;
        }
        Some(columns) => {
            if columns.len() < LOG_COLUMNS.len() {
                tracing::warn!(
                    columns = ?columns,
                    "progress log uses an older header; difficulty counts are not recorded"
                );
            }
            writer.write_record(match_header(&columns, &record)?)?;
        }
    }
    // into_inner(): Writer를 풀어 내부 버퍼(Vec<u8>)를 꺼냅니다.
    let bytes = writer
        .into_inner()
        .map_err(|e| PipelineError::Io(e.into_error()))?;

    file.write_all(&bytes).await?;
    file.flush().await?;

    tracing::debug!(
        username = %snapshot.username,
        total = snapshot.counts.total,
        "appended snapshot"
    );
    Ok(())
}

/// 기존 로그 파일의 첫 줄(헤더)만 읽어 컬럼 이름 목록으로 돌려줍니다.
async fn read_header(path: &Path) -> Result<Vec<String>, PipelineError> {
    // BufReader: 한 줄씩 읽기 위한 버퍼 래퍼. 파일 전체를 읽지 않습니다.
    let mut reader = BufReader::new(fs::File::open(path).await?);
    let mut line = String::new();
    reader.read_line(&mut line).await?;

    // 헤더 한 줄도 csv 크레이트로 파싱해야 따옴표 처리가 로더와 같아집니다.
    let mut parser = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(line.as_bytes());
    Ok(parser.headers()?.iter().map(str::to_string).collect())
}

/// 스냅샷 레코드(`LOG_COLUMNS` 순서)를 기존 헤더의 순서와 너비에 맞춥니다.
fn match_header(columns: &[String], record: &[String; 6]) -> Result<Vec<String>, PipelineError> {
    // timestamp와 username이 없으면 어떤 행도 다시 읽을 수 없습니다.
    for required in &LOG_COLUMNS[..2] {
        if !columns.iter().any(|c| c == required) {
            return Err(PipelineError::Processing(format!(
                "progress log header is missing {required:?}"
            )));
        }
    }

    columns
        .iter()
        .map(|column| {
            // position(): 조건을 만족하는 첫 원소의 인덱스 (Option<usize>)
            LOG_COLUMNS
                .iter()
                .position(|known| known == column)
                .map(|i| record[i].clone())
                .ok_or_else(|| {
                    PipelineError::Processing(format!(
                        "progress log header has unknown column {column:?}"
                    ))
                })
        })
        // Iterator<Item = Result<T, E>>를 Result<Vec<T>, E>로 모읍니다.
        // 하나라도 Err이면 첫 Err을 돌려줍니다.
        .collect()
}

/// 전체 로그를 읽어 반환합니다.
///
/// 행 순서는 파일 순서 그대로이며 정렬하지 않습니다.
/// 컬럼이 적은 예전 형식의 행도 읽을 수 있습니다 (빠진 값은 `None`).
pub async fn load_all(path: &Path) -> Result<SnapshotLog, PipelineError> {
    // 파일이 없는 경우만 NotFound로 구분하고, 나머지 io 에러는 Io로 전파합니다.
    let bytes = match fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Err(PipelineError::NotFound),
        Err(e) => return Err(e.into()),
    };

    let log = parse_log(&bytes)?;
    if log.records.is_empty() {
        return Err(PipelineError::Empty);
    }
    Ok(log)
}

/// CSV 바이트를 `SnapshotLog`로 파싱합니다.
///
/// 헤더보다 짧은 행은 예전 형식으로 보고 허용하지만, 헤더보다 긴 행은
/// 값이 어느 컬럼에 속하는지 알 수 없으므로 `Processing` 에러입니다.
fn parse_log(bytes: &[u8]) -> Result<SnapshotLog, PipelineError> {
    // flexible(true): 행마다 필드 수가 달라도 파싱 에러를 내지 않습니다 (너비 검사는 아래에서 직접).
    // Trim::Headers: 헤더 이름만 공백을 자릅니다. 사용자 이름은 공백까지 그대로 키로 씁니다.
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(bytes);

    // headers()는 reader를 빌려가므로, 행을 읽는 동안 쓰려면 복제해 둡니다.
    let headers = reader.headers()?.clone();
    let mut records = Vec::new();
    for result in reader.records() {
        let record = result?;
        if record.len() > headers.len() {
            let line = record.position().map_or(0, |p| p.line());
            return Err(PipelineError::Processing(format!(
                "line {line}: {} fields but the header has {}",
                record.len(),
                headers.len()
            )));
        }
        // 헤더 이름으로 LogRecord 필드를 채웁니다. 빠진 뒤쪽 필드는 serde default(None)입니다.
        records.push(record.deserialize::<LogRecord>(Some(&headers))?);
    }

    let columns = headers.iter().map(str::to_string).collect();
    Ok(SnapshotLog { columns, records })
}
