//! # 에러 처리 모듈
//!
//! 애플리케이션에서 발생할 수 있는 에러 타입을 정의합니다.
//!
//! 이 모듈의 핵심:
//! - `PipelineError`: 스냅샷 로그 적재와 표 재구성 단계의 에러
//! - `AppError`: 요청 경계에서 사용하는 에러, HTTP 응답으로 자동 변환
//!
//! 모든 에러는 요청 단위에서 복구 가능합니다. 호출자는 "데이터 없음" 또는
//! "오류" 상태를 그려주면 되고, 프로세스가 죽지는 않습니다.

use axum::{
    http::StatusCode,                   // HTTP 상태 코드 (200, 404, 500 등)
    response::{IntoResponse, Response}, // Axum의 응답 변환 트레이트
    Json,                               // JSON 응답 래퍼
};
use serde_json::json; // json! 매크로: JSON 객체를 간편하게 생성
use thiserror::Error; // thiserror: 커스텀 에러 타입을 쉽게 만들어주는 매크로 크레이트

// #[derive(Debug, Error)]:
// - Debug: 디버깅용 출력 ({:?})
// - Error (thiserror): std::error::Error 트레이트와, #[error("...")]로 Display를 자동 구현

/// 스냅샷 로그 저장소와 진행도 파이프라인의 에러
///
/// `NotFound`와 `Empty`는 서로 다른 상황입니다:
/// - `NotFound`: 로그 파일 자체가 없음 (한 번도 수집하지 않음)
/// - `Empty`: 파일은 있지만 쓸 수 있는 행이 없음
#[derive(Debug, Error)]
pub enum PipelineError {
    /// 로그 파일이 디스크에 없음
    #[error("progress log not found; run the collector first")]
    NotFound,

    /// 헤더만 있거나, 유효한 total 값을 가진 행이 없음
    #[error("progress log has no usable rows")]
    Empty,

    /// 잘못된 타임스탬프, 숫자가 아닌 값 등 데이터 형태 오류
    #[error("failed to process progress log: {0}")]
    Processing(String),

    /// 파일 읽기/쓰기 오류
    /// #[from]: std::io::Error → PipelineError::Io 자동 변환. 파일 함수에 `?`를 바로 쓸 수 있습니다.
    #[error("progress log IO error: {0}")]
    Io(#[from] std::io::Error),
}

// csv::Error는 원인이 I/O일 수도, 형식 오류일 수도 있어서 #[from] 대신 직접 구현합니다.
impl From<csv::Error> for PipelineError {
    /// CSV 에러 중 I/O 원인은 `Io`로, 나머지(형식 오류)는 `Processing`으로 분류합니다.
    fn from(err: csv::Error) -> Self {
        if err.is_io_error() {
            match err.into_kind() {
                csv::ErrorKind::Io(io) => PipelineError::Io(io),
                other => PipelineError::Processing(format!("{other:?}")),
            }
        } else {
            PipelineError::Processing(err.to_string())
        }
    }
}

/// 요청 처리 중 발생할 수 있는 모든 에러 종류
///
/// 핸들러에서 `Result<T, AppError>`를 반환하면,
/// Axum이 자동으로 `IntoResponse`를 호출하여 HTTP 응답으로 변환합니다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 로그/파이프라인 단계 에러 (HTTP 404 또는 500)
    /// transparent: Display 메시지를 안쪽 PipelineError에 그대로 위임합니다.
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    /// 로그에 난이도 컬럼이 없어 난이도 차트를 만들 수 없음 (HTTP 404)
    #[error("difficulty data is not available; collect fresh data to enable it")]
    DifficultyUnavailable,
}

impl IntoResponse for AppError {
    /// AppError를 HTTP 응답으로 변환합니다.
    ///
    /// 응답 본문: `{ "error": { "code": "...", "message": "..." } }`
    /// `code`로 "수집 전"(no_data)과 "빈 로그"(empty)와 "깨진 데이터"(processing_error)를
    /// 클라이언트가 구분할 수 있습니다.
    fn into_response(self) -> Response {
        // match로 모든 variant를 빠짐없이 (상태 코드, 에러 코드, 메시지)로 변환합니다.
        // `ref msg`: self를 옮기지 않고 안쪽 값을 빌려옵니다 (뒤에서 self.to_string()을 쓰기 위해).
        let (status, code, message) = match self {
            AppError::Pipeline(PipelineError::NotFound) => {
                (StatusCode::NOT_FOUND, "no_data", self.to_string())
            }
            AppError::Pipeline(PipelineError::Empty) => {
                (StatusCode::NOT_FOUND, "empty", self.to_string())
            }
            AppError::Pipeline(PipelineError::Processing(ref msg)) => {
                tracing::error!("Processing error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "processing_error",
                    self.to_string(),
                )
            }
            AppError::Pipeline(PipelineError::Io(ref e)) => {
                tracing::error!("IO error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "io_error",
                    // 내부 경로가 노출되지 않도록 고정 메시지를 보냅니다.
                    "An IO error occurred while reading the progress log".to_string(),
                )
            }
            AppError::DifficultyUnavailable => (
                StatusCode::NOT_FOUND,
                "no_difficulty_data",
                self.to_string(),
            ),
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        // (StatusCode, Json) 튜플도 IntoResponse를 구현합니다.
        (status, body).into_response()
    }
}
