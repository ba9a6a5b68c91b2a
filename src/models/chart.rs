//! # 차트 데이터 모델
//!
//! 대시보드(ApexCharts)가 그대로 소비하는 시리즈/포인트 구조체입니다.

use serde::{Deserialize, Serialize};

/// 시계열 차트의 한 점. `x`는 밀리초 단위 epoch 시각입니다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimePoint {
    pub x: i64,
    pub y: f64,
}

/// 히트맵의 한 칸. `x`는 `"13:00"` 같은 시간 라벨입니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatCell {
    pub x: String,
    pub y: f64,
}

/// 이름이 붙은 데이터 시리즈
///
/// `color`는 난이도별 차트에서만 지정합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series<P> {
    pub name: String,
    pub data: Vec<P>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}
