//! # 차트 설정 생성
//!
//! 파이프라인 번들의 표를 ApexCharts 설정 JSON으로 변환합니다.
//! 모든 함수는 표를 읽기만 하며, 라벨 언어는 `Locale` 인자로 받습니다.

use crate::models::{HeatCell, Metric, Series, TimePoint, WideTable};
use crate::services::i18n::Locale;
use chrono::{Datelike, NaiveDateTime, Timelike};
use serde_json::{json, Value};

/// 히트맵 색 구간 (하한, 상한)
const HEAT_RANGES: [(u32, u32, &str); 3] = [(0, 5, "#FFF3E0"), (6, 20, "#FF9800"), (21, 50, "#F57C00")];

/// naive 타임스탬프를 UTC로 보고 epoch 밀리초로 변환합니다.
fn epoch_millis(ts: NaiveDateTime) -> i64 {
    ts.and_utc().timestamp_millis()
}

/// 사용자별 시계열. 관측값이 없는 사용자는 빠집니다.
fn user_series(table: &WideTable) -> Vec<Series<TimePoint>> {
    table
        .columns()
        .iter()
        .filter_map(|user| {
            let data: Vec<TimePoint> = table
                .observations(user)
                .into_iter()
                .map(|(ts, y)| TimePoint { x: epoch_millis(ts), y })
                .collect();
            (!data.is_empty()).then(|| Series {
                name: user.clone(),
                data,
                color: None,
            })
        })
        .collect()
}

/// 난이도별 시계열: `"<사용자> (Easy)"` 형식의 이름과 난이도 색상
fn difficulty_series(tables: [(&WideTable, Metric); 3]) -> Vec<Series<TimePoint>> {
    tables
        .into_iter()
        .flat_map(|(table, metric)| {
            user_series(table).into_iter().map(move |series| Series {
                name: format!("{} ({})", series.name, metric.label()),
                color: Some(metric.color().to_string()),
                ..series
            })
        })
        .collect()
}

fn line_chart(
    series: Vec<Series<TimePoint>>,
    title: &str,
    x_title: &str,
    y_title: &str,
    height: u32,
    marker_size: u32,
    tooltip_format: &str,
) -> Value {
    json!({
        "chart": {
            "type": "line",
            "height": height,
            "toolbar": { "show": true },
            "animations": { "enabled": true }
        },
        "series": series,
        "xaxis": {
            "type": "datetime",
            "title": { "text": x_title }
        },
        "yaxis": {
            "title": { "text": y_title }
        },
        "title": { "text": title, "align": "center" },
        "stroke": { "width": 2, "curve": "smooth" },
        "markers": { "size": marker_size },
        "tooltip": { "x": { "format": tooltip_format } },
        "legend": { "position": "top" }
    })
}

/// 첫 측정 대비 진행도 선 그래프 (`progress_total`)
pub fn progress_chart(progress_total: &WideTable, locale: Locale) -> Value {
    let labels = locale.labels();
    line_chart(
        user_series(progress_total),
        labels.progress_title,
        labels.date_time,
        labels.progress_axis,
        500,
        4,
        "dd/MM/yyyy HH:mm",
    )
}

/// 전체 풀이 수 선 그래프 (`total`)
pub fn total_chart(total: &WideTable, locale: Locale) -> Value {
    let labels = locale.labels();
    line_chart(
        user_series(total),
        labels.total_title,
        labels.date_time,
        labels.total_axis,
        500,
        4,
        "dd/MM/yyyy HH:mm",
    )
}

/// 날짜별 마지막 값으로 묶은 선 그래프
pub fn daily_progress_chart(total: &WideTable, locale: Locale) -> Value {
    let labels = locale.labels();
    line_chart(
        user_series(&total.daily_last()),
        labels.daily_title,
        labels.date,
        labels.total_axis,
        500,
        6,
        "dd/MM/yyyy",
    )
}

/// 사용자별 최신 easy/medium/hard 누적 막대 그래프
///
/// 세 난이도 표 모두에 열이 있는 사용자만 포함합니다.
pub fn difficulty_breakdown_chart(
    easy: &WideTable,
    medium: &WideTable,
    hard: &WideTable,
    locale: Locale,
) -> Value {
    let labels = locale.labels();
    let users: Vec<&String> = easy
        .columns()
        .iter()
        .filter(|u| medium.has_column(u) && hard.has_column(u))
        .collect();

    let series: Vec<Series<f64>> = [(easy, Metric::Easy), (medium, Metric::Medium), (hard, Metric::Hard)]
        .into_iter()
        .map(|(table, metric)| Series {
            name: metric.label().to_string(),
            data: users.iter().map(|u| table.latest_value(u)).collect(),
            color: Some(metric.color().to_string()),
        })
        .collect();

    json!({
        "chart": {
            "type": "bar",
            "height": 500,
            "stacked": true,
            "toolbar": { "show": true }
        },
        "series": series,
        "xaxis": {
            "categories": users,
            "title": { "text": labels.users }
        },
        "yaxis": { "title": { "text": labels.problem_count } },
        "title": { "text": labels.breakdown_title, "align": "center" },
        "legend": { "position": "top" },
        "plotOptions": { "bar": { "horizontal": false } }
    })
}

fn difficulty_line_chart(series: Vec<Series<TimePoint>>, title: &str, y_title: &str, locale: Locale) -> Value {
    let mut chart = line_chart(
        series,
        title,
        locale.labels().date_time,
        y_title,
        600,
        4,
        "dd/MM/yyyy HH:mm",
    );
    chart["legend"]["onItemClick"] = json!({ "toggleDataSeries": false });
    chart
}

/// 난이도별 누적 풀이 수 선 그래프
pub fn difficulty_total_chart(
    easy: &WideTable,
    medium: &WideTable,
    hard: &WideTable,
    locale: Locale,
) -> Value {
    let labels = locale.labels();
    difficulty_line_chart(
        difficulty_series([(easy, Metric::Easy), (medium, Metric::Medium), (hard, Metric::Hard)]),
        labels.difficulty_total_title,
        labels.total_axis,
        locale,
    )
}

/// 난이도별 진행도 선 그래프
pub fn difficulty_progress_chart(
    progress_easy: &WideTable,
    progress_medium: &WideTable,
    progress_hard: &WideTable,
    locale: Locale,
) -> Value {
    let labels = locale.labels();
    difficulty_line_chart(
        difficulty_series([
            (progress_easy, Metric::Easy),
            (progress_medium, Metric::Medium),
            (progress_hard, Metric::Hard),
        ]),
        labels.difficulty_progress_title,
        labels.difficulty_progress_axis,
        locale,
    )
}

/// 요일 × 시간 활동량 격자. `grid[요일][시]`, 요일은 월요일이 0입니다.
///
/// 모든 사용자의 양수 증가분을 합산합니다.
pub fn weekly_activity(total: &WideTable) -> [[f64; 24]; 7] {
    let mut grid = [[0.0; 24]; 7];
    for user in total.columns() {
        for (ts, delta) in total.activity_deltas(user) {
            if delta > 0.0 {
                let day = ts.weekday().num_days_from_monday() as usize;
                grid[day][ts.hour() as usize] += delta;
            }
        }
    }
    grid
}

/// 요일/시간 활동량 히트맵
pub fn weekly_heatmap_chart(total: &WideTable, locale: Locale) -> Value {
    let labels = locale.labels();
    let grid = weekly_activity(total);

    let series: Vec<Series<HeatCell>> = labels
        .weekdays
        .iter()
        .zip(grid.iter())
        .map(|(day, hours)| Series {
            name: day.to_string(),
            data: hours
                .iter()
                .enumerate()
                .map(|(hour, y)| HeatCell {
                    x: format!("{hour}:00"),
                    y: *y,
                })
                .collect(),
            color: None,
        })
        .collect();

    let names = [labels.heat_low, labels.heat_medium, labels.heat_high];
    let ranges: Vec<Value> = HEAT_RANGES
        .iter()
        .zip(names)
        .map(|((from, to, color), name)| {
            json!({ "from": from, "to": to, "name": name, "color": color })
        })
        .collect();

    json!({
        "chart": {
            "type": "heatmap",
            "height": 400,
            "toolbar": { "show": true }
        },
        "series": series,
        "xaxis": { "title": { "text": labels.hour_of_day } },
        "yaxis": { "title": { "text": labels.day_of_week } },
        "title": { "text": labels.heatmap_title, "align": "center" },
        "plotOptions": {
            "heatmap": {
                "shadeIntensity": 0.5,
                "colorScale": { "ranges": ranges }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts(day: u32, hour: u32) -> NaiveDateTime {
        // 2025-01-06은 월요일
        NaiveDate::from_ymd_opt(2025, 1, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn table(obs: &[(u32, u32, &str, f64)]) -> WideTable {
        WideTable::from_observations(
            obs.iter()
                .map(|(d, h, u, v)| (ts(*d, *h), u.to_string(), *v)),
        )
    }

    #[test]
    fn series_skip_missing_points_and_use_epoch_millis() {
        let t = table(&[(6, 0, "a", 1.0), (7, 0, "b", 2.0), (8, 0, "a", 3.0)]);
        let chart = total_chart(&t, Locale::En);
        let series = chart["series"].as_array().unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series[0]["name"], "a");
        assert_eq!(series[0]["data"].as_array().unwrap().len(), 2);
        assert_eq!(series[0]["data"][0]["x"], 1_736_121_600_000_i64);
        assert_eq!(series[0]["data"][1]["y"], 3.0);
        assert_eq!(chart["title"]["text"], "Total problems solved on LeetCode");
    }

    #[test]
    fn locale_changes_titles_only() {
        let t = table(&[(6, 0, "a", 1.0)]);
        let ru = progress_chart(&t, Locale::Ru);
        let en = progress_chart(&t, Locale::En);
        assert_ne!(ru["title"], en["title"]);
        assert_eq!(ru["series"], en["series"]);
    }

    #[test]
    fn breakdown_uses_latest_values_for_users_in_all_tiers() {
        let easy = table(&[(6, 0, "a", 1.0), (7, 0, "a", 4.0), (6, 0, "b", 9.0)]);
        let medium = table(&[(6, 0, "a", 2.0)]);
        let hard = table(&[(6, 0, "a", 0.0)]);
        let chart = difficulty_breakdown_chart(&easy, &medium, &hard, Locale::En);
        assert_eq!(chart["xaxis"]["categories"], json!(["a"]));
        assert_eq!(chart["series"][0]["data"], json!([4.0]));
        assert_eq!(chart["series"][2]["color"], "#F44336");
    }

    #[test]
    fn difficulty_series_are_labelled_by_tier() {
        let easy = table(&[(6, 0, "a", 1.0)]);
        let medium = table(&[(6, 0, "a", 2.0)]);
        let hard = WideTable::default();
        let chart = difficulty_total_chart(&easy, &medium, &hard, Locale::En);
        let names: Vec<&str> = chart["series"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["a (Easy)", "a (Medium)"]);
        assert_eq!(chart["legend"]["onItemClick"]["toggleDataSeries"], false);
    }

    #[test]
    fn daily_chart_groups_by_day() {
        let t = table(&[(6, 8, "a", 1.0), (6, 20, "a", 5.0), (7, 9, "a", 6.0)]);
        let chart = daily_progress_chart(&t, Locale::En);
        let data = chart["series"][0]["data"].as_array().unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data[0]["y"], 5.0);
    }

    #[test]
    fn weekly_activity_sums_positive_deltas_only() {
        // a: 월 10시 10 → 월 12시 15 (+5) → 화 12시 12 (감소, 무시) → 수 9시 20 (+8)
        // b: 월 12시 1 → 수 9시 3 (+2)
        let t = table(&[
            (6, 10, "a", 10.0),
            (6, 12, "a", 15.0),
            (7, 12, "a", 12.0),
            (8, 9, "a", 20.0),
            (6, 12, "b", 1.0),
            (8, 9, "b", 3.0),
        ]);
        let grid = weekly_activity(&t);
        assert_eq!(grid[0][12], 5.0);
        assert_eq!(grid[1][12], 0.0);
        assert_eq!(grid[2][9], 10.0);
        assert_eq!(grid[0][10], 0.0);
    }

    #[test]
    fn heatmap_has_seven_days_of_24_hours() {
        let t = table(&[(6, 10, "a", 10.0)]);
        let chart = weekly_heatmap_chart(&t, Locale::En);
        let series = chart["series"].as_array().unwrap();
        assert_eq!(series.len(), 7);
        assert_eq!(series[0]["name"], "Monday");
        assert_eq!(series[6]["data"].as_array().unwrap().len(), 24);
        assert_eq!(series[0]["data"][13]["x"], "13:00");
        assert_eq!(
            chart["plotOptions"]["heatmap"]["colorScale"]["ranges"][2]["name"],
            "high"
        );
    }
}
