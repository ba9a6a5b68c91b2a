//! # 데이터 접근 계층 (Data Access Layer)
//!
//! 스냅샷 로그 파일과 직접 상호작용하는 함수들을 모아둔 모듈입니다.
//! 파이프라인(services/pipeline)과 수집기(services/collector)가 이 모듈을 통해서만
//! 로그를 읽고 씁니다.
//!
//! 각 하위 모듈:
//! - `snapshots`: 추가 전용 CSV 로그 (append / load_all)

pub mod snapshots;

// 하위 모듈의 공개 함수를 재공개(re-export)하여
// `crate::db::load_all`처럼 바로 접근할 수 있게 합니다.
pub use snapshots::*;
