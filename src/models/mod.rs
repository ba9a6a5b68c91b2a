//! # 데이터 모델 모듈
//!
//! 각 하위 모듈:
//! - `snapshot`: 로그에 기록/로딩되는 스냅샷 행과 타임스탬프 형식
//! - `table`: 와이드 지표 표, 지표 종류, 파이프라인 결과 번들
//! - `chart`: 차트 API가 돌려주는 시리즈/포인트
//!
//! `pub use X::*;`로 재공개하여 `crate::models::WideTable`처럼 짧게 접근합니다.

pub mod chart;
pub mod snapshot;
pub mod table;

pub use chart::*;
pub use snapshot::*;
pub use table::*;
