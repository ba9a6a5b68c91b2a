//! # 서비스 계층
//!
//! 라우트 핸들러가 호출하는 도메인 로직입니다.
//!
//! 각 하위 모듈:
//! - `pipeline`: 로그 → 와이드 표/진행도 표 번들
//! - `charts`: 번들 → ApexCharts 설정 JSON
//! - `collector`: 통계 소스 → 로그 추가
//! - `leetcode`: LeetCode GraphQL 클라이언트
//! - `i18n`: 요청 단위 라벨 언어

pub mod charts;
pub mod collector;
pub mod i18n;
pub mod leetcode;
pub mod pipeline;
