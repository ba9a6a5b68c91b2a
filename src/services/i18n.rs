//! # 차트 라벨 언어 선택
//!
//! 언어는 전역 상태로 두지 않고, 요청마다 `Locale` 값을 명시적으로 넘깁니다.
//! 동시에 들어온 요청끼리 서로의 언어 설정을 덮어쓰지 않습니다.

use serde::{Deserialize, Serialize};

/// 지원 언어
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Ru,
    En,
}

impl Locale {
    /// `"ru"`, `"EN"`, `"en-US"` 같은 언어 코드를 해석합니다. 모르는 코드는 `None`.
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim().to_ascii_lowercase();
        match code.split(['-', '_']).next() {
            Some("ru") => Some(Locale::Ru),
            Some("en") => Some(Locale::En),
            _ => None,
        }
    }

    pub fn labels(self) -> &'static ChartLabels {
        match self {
            Locale::Ru => &RU,
            Locale::En => &EN,
        }
    }
}

/// 차트 제목과 축 이름
#[derive(Debug)]
pub struct ChartLabels {
    pub date_time: &'static str,
    pub date: &'static str,
    pub progress_title: &'static str,
    pub progress_axis: &'static str,
    pub total_title: &'static str,
    pub total_axis: &'static str,
    pub users: &'static str,
    pub problem_count: &'static str,
    pub breakdown_title: &'static str,
    pub daily_title: &'static str,
    pub difficulty_total_title: &'static str,
    pub difficulty_progress_title: &'static str,
    pub difficulty_progress_axis: &'static str,
    pub heatmap_title: &'static str,
    pub hour_of_day: &'static str,
    pub day_of_week: &'static str,
    pub heat_low: &'static str,
    pub heat_medium: &'static str,
    pub heat_high: &'static str,
    /// 월요일부터 일요일까지
    pub weekdays: [&'static str; 7],
}

static RU: ChartLabels = ChartLabels {
    date_time: "Дата и время",
    date: "Дата",
    progress_title: "Прогресс на LeetCode (с начала отслеживания)",
    progress_axis: "Решено задач (относительно старта)",
    total_title: "Общее количество решенных задач на LeetCode",
    total_axis: "Общее количество решенных задач",
    users: "Пользователи",
    problem_count: "Количество задач",
    breakdown_title: "Распределение решенных задач по уровням сложности",
    daily_title: "Прогресс по дням",
    difficulty_total_title: "Общее количество задач по уровням сложности",
    difficulty_progress_title: "Прогресс по уровням сложности (с начала отслеживания)",
    difficulty_progress_axis: "Прогресс решенных задач (относительно старта)",
    heatmap_title: "Тепловая карта активности по дням недели и часам",
    hour_of_day: "Час дня",
    day_of_week: "День недели",
    heat_low: "низкая",
    heat_medium: "средняя",
    heat_high: "высокая",
    weekdays: [
        "Понедельник",
        "Вторник",
        "Среда",
        "Четверг",
        "Пятница",
        "Суббота",
        "Воскресенье",
    ],
};

static EN: ChartLabels = ChartLabels {
    date_time: "Date and time",
    date: "Date",
    progress_title: "LeetCode progress (since tracking started)",
    progress_axis: "Problems solved (relative to start)",
    total_title: "Total problems solved on LeetCode",
    total_axis: "Total problems solved",
    users: "Users",
    problem_count: "Problem count",
    breakdown_title: "Solved problems by difficulty",
    daily_title: "Daily progress",
    difficulty_total_title: "Total problems by difficulty",
    difficulty_progress_title: "Progress by difficulty (since tracking started)",
    difficulty_progress_axis: "Problems solved (relative to start)",
    heatmap_title: "Activity heatmap by weekday and hour",
    hour_of_day: "Hour of day",
    day_of_week: "Day of week",
    heat_low: "low",
    heat_medium: "medium",
    heat_high: "high",
    weekdays: [
        "Monday",
        "Tuesday",
        "Wednesday",
        "Thursday",
        "Friday",
        "Saturday",
        "Sunday",
    ],
};
