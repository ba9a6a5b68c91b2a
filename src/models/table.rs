//! # 와이드 지표 표(Wide Metric Table)
//!
//! 스냅샷 로그를 "타임스탬프 × 사용자" 격자로 재구성한 표입니다.
//! 지표(total/easy/medium/hard)마다 하나씩 만들어지며, 요청마다 새로 계산되는 뷰입니다.
//!
//! ## 구조
//! ```text
//!                 alice   bob
//! 2025-01-01T10    5.0    2.0
//! 2025-01-02T10    8.0    None   ← bob은 이 시각에 측정되지 않음
//! ```
//! - 행: 서로 다른 타임스탬프 (오름차순)
//! - 열: 사용자 이름 (사전순, 소비자는 열 순서에 의존하면 안 됨)
//! - 칸: `Option<f64>`. `None`은 "측정 없음"이며 0과 구분됩니다.

use chrono::{NaiveDateTime, NaiveTime};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// 추적하는 지표 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Total,
    Easy,
    Medium,
    Hard,
}

impl Metric {
    pub const ALL: [Metric; 4] = [Metric::Total, Metric::Easy, Metric::Medium, Metric::Hard];
    pub const DIFFICULTIES: [Metric; 3] = [Metric::Easy, Metric::Medium, Metric::Hard];

    /// 차트 범례에 쓰는 난이도 이름
    pub fn label(self) -> &'static str {
        match self {
            Metric::Total => "Total",
            Metric::Easy => "Easy",
            Metric::Medium => "Medium",
            Metric::Hard => "Hard",
        }
    }

    /// 난이도별 차트 색상
    pub fn color(self) -> &'static str {
        match self {
            Metric::Total => "#2196F3",
            Metric::Easy => "#4CAF50",
            Metric::Medium => "#FF9800",
            Metric::Hard => "#F44336",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct WideTable {
    timestamps: Vec<NaiveDateTime>,
    columns: Vec<String>,
    /// 행 우선(row-major) 칸 값: `cells[행][열]`
    cells: Vec<Vec<Option<f64>>>,
}

impl WideTable {
    /// `(타임스탬프, 사용자, 값)` 관측값들로 표를 만듭니다.
    ///
    /// 같은 `(타임스탬프, 사용자)`가 여러 번 나오면 마지막 값이 남습니다 (로그 순서 기준).
    /// 관측값이 하나도 없는 타임스탬프나 사용자는 표에 나타나지 않습니다.
    pub fn from_observations<I>(observations: I) -> Self
    where
        I: IntoIterator<Item = (NaiveDateTime, String, f64)>,
    {
        let mut grid: BTreeMap<NaiveDateTime, BTreeMap<String, f64>> = BTreeMap::new();
        let mut users = BTreeSet::new();
        for (ts, user, value) in observations {
            users.insert(user.clone());
            grid.entry(ts).or_default().insert(user, value);
        }

        let columns: Vec<String> = users.into_iter().collect();
        let mut timestamps = Vec::with_capacity(grid.len());
        let mut cells = Vec::with_capacity(grid.len());
        for (ts, row) in grid {
            timestamps.push(ts);
            cells.push(columns.iter().map(|c| row.get(c).copied()).collect());
        }

        Self {
            timestamps,
            columns,
            cells,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn timestamps(&self) -> &[NaiveDateTime] {
        &self.timestamps
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn has_column(&self, username: &str) -> bool {
        self.column_index(username).is_some()
    }

    fn column_index(&self, username: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == username)
    }

    /// `(행 번호, 사용자)` 칸의 값. 측정이 없거나 그런 행/열이 없으면 `None`.
    pub fn get(&self, row: usize, username: &str) -> Option<f64> {
        let col = self.column_index(username)?;
        self.cells.get(row)?.get(col).copied().flatten()
    }

    /// 한 사용자의 열 전체 (타임스탬프 오름차순, 빈 칸 포함)
    #[cfg(test)]
    pub fn column(&self, username: &str) -> Option<Vec<Option<f64>>> {
        let col = self.column_index(username)?;
        Some(self.cells.iter().map(|row| row[col]).collect())
    }

    /// 한 사용자의 실제 관측값만 시간순으로 반환합니다.
    pub fn observations(&self, username: &str) -> Vec<(NaiveDateTime, f64)> {
        self.timestamps
            .iter()
            .enumerate()
            .filter_map(|(row, ts)| self.get(row, username).map(|v| (*ts, v)))
            .collect()
    }

    /// 사용자의 마지막 관측값. 데이터가 없으면 0을 돌려줍니다.
    ///
    /// 요약/통계 응답에서 쓰며 표를 변경하지 않습니다.
    pub fn latest_value(&self, username: &str) -> f64 {
        self.observations(username)
            .last()
            .map(|(_, v)| *v)
            .unwrap_or(0.0)
    }

    pub fn last_timestamp(&self) -> Option<NaiveDateTime> {
        self.timestamps.last().copied()
    }

    /// 진행도 표: 각 열에서 그 열의 첫 관측값을 뺀 표
    ///
    /// 열마다 독립적으로 기준점을 잡으므로, 모든 사용자가 자신의 첫 측정 시점에 0에서 시작합니다.
    /// 빈 칸은 빈 칸으로 남습니다.
    pub fn progress(&self) -> WideTable {
        let baselines: Vec<Option<f64>> = (0..self.columns.len())
            .map(|col| self.cells.iter().find_map(|row| row[col]))
            .collect();

        let cells = self
            .cells
            .iter()
            .map(|row| {
                row.iter()
                    .zip(&baselines)
                    .map(|(value, base)| match (value, base) {
                        (Some(v), Some(b)) => Some(v - b),
                        _ => None,
                    })
                    .collect()
            })
            .collect();

        WideTable {
            timestamps: self.timestamps.clone(),
            columns: self.columns.clone(),
            cells,
        }
    }

    /// 날짜별로 묶은 표: 사용자마다 그날의 마지막 관측값을 자정 시각에 둡니다.
    pub fn daily_last(&self) -> WideTable {
        let midnight = NaiveTime::MIN;
        let observations = self.columns.iter().flat_map(|user| {
            self.observations(user)
                .into_iter()
                .map(move |(ts, v)| (ts.date().and_time(midnight), user.clone(), v))
        });
        // 관측값이 시간순이므로 같은 날의 마지막 값이 덮어씁니다.
        WideTable::from_observations(observations)
    }

    /// 활동량: 연속된 관측값 사이의 증가분
    ///
    /// - 첫 관측값의 증가분은 0 (기준점 없음)
    /// - 감소는 초기화/정정으로 보고 0으로 처리합니다
    pub fn activity_deltas(&self, username: &str) -> Vec<(NaiveDateTime, f64)> {
        let observations = self.observations(username);
        let mut previous: Option<f64> = None;
        observations
            .into_iter()
            .map(|(ts, value)| {
                let delta = match previous {
                    Some(prev) => (value - prev).max(0.0),
                    None => 0.0,
                };
                previous = Some(value);
                (ts, delta)
            })
            .collect()
    }
}

/// 파이프라인 결과: 이름이 붙은 표 8개와 난이도 데이터 존재 여부
///
/// 난이도 컬럼이 없는 로그라면 easy/medium/hard와 그 진행도 표는 빈 표입니다.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ProgressBundle {
    pub total: WideTable,
    pub easy: WideTable,
    pub medium: WideTable,
    pub hard: WideTable,
    pub progress_total: WideTable,
    pub progress_easy: WideTable,
    pub progress_medium: WideTable,
    pub progress_hard: WideTable,
    pub has_difficulty_data: bool,
}

impl ProgressBundle {
    pub fn metric(&self, metric: Metric) -> &WideTable {
        match metric {
            Metric::Total => &self.total,
            Metric::Easy => &self.easy,
            Metric::Medium => &self.medium,
            Metric::Hard => &self.hard,
        }
    }

    pub fn progress(&self, metric: Metric) -> &WideTable {
        match metric {
            Metric::Total => &self.progress_total,
            Metric::Easy => &self.progress_easy,
            Metric::Medium => &self.progress_medium,
            Metric::Hard => &self.progress_hard,
        }
    }
}
