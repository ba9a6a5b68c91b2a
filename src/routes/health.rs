//! # 헬스체크(Health Check) 핸들러
//!
//! 서버가 정상적으로 동작하는지 확인하는 엔드포인트입니다.
//!
//! ## 엔드포인트
//! - `GET /api/health` → `{ "status": "ok" }`

use axum::Json;                // JSON 응답 래퍼
use serde_json::{json, Value}; // JSON 생성 유틸리티

/// `GET /api/health` — 서버 상태를 확인합니다.
///
/// State가 필요 없는 가장 단순한 핸들러입니다. 로그 파일이 없어도 항상 성공합니다.
pub async fn health_check() -> Json<Value> {
    // json! 매크로로 JSON 객체를 생성합니다.
    Json(json!({
        "status": "ok"
    }))
}
